// crates/geoprofiles-core/src/common.rs
use crate::model::GeogType;
use crate::traits::GeoBackend;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default backend: plain `String`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultBackend;

impl GeoBackend for DefaultBackend {
    type Str = String;

    #[inline]
    fn str_from(s: &str) -> Self::Str {
        s.to_owned()
    }

    #[inline]
    fn str_to_string(v: &Self::Str) -> String {
        v.clone()
    }
}

/// Convenient alias used in examples and tests.
pub type StandardBackend = DefaultBackend;

/// Simple aggregate statistics for a loaded region set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbStats {
    pub regions: usize,
    pub per_kind: BTreeMap<GeogType, usize>,
}
