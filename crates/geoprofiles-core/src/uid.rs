// crates/geoprofiles-core/src/uid.rs

//! # Region uids
//!
//! A uid is `"<geogType>:<globalGeoid>"`: ASCII, one `:` separator, the type
//! tag taken from the fixed kind set. It identifies one region across every
//! kind.

use crate::error::{GeoError, Result};
use crate::model::RegionRecord;
use crate::registry::RegionTypeRegistry;
use crate::traits::{GeoBackend, RegionStore};

pub const UID_SEPARATOR: char = ':';

pub fn build_uid<B: GeoBackend>(region: &RegionRecord<B>) -> String {
    format!(
        "{}{}{}",
        region.geog_type(),
        UID_SEPARATOR,
        region.global_geoid()
    )
}

/// Splits a uid into `(type tag, geoid)` at the first `:`.
///
/// The tag is returned as written; it is not checked against the registry.
/// Missing separator or an empty half is a [`GeoError::MalformedUid`].
pub fn parse_uid(uid: &str) -> Result<(&str, &str)> {
    match uid.split_once(UID_SEPARATOR) {
        Some((tag, geoid)) if !tag.is_empty() && !geoid.is_empty() => Ok((tag, geoid)),
        _ => Err(GeoError::MalformedUid(uid.to_string())),
    }
}

/// Turns uids into region records: registry for the kind, store for the row.
pub struct UidResolver<'a, B: GeoBackend> {
    registry: &'a RegionTypeRegistry,
    store: &'a dyn RegionStore<B>,
}

impl<'a, B: GeoBackend> UidResolver<'a, B> {
    pub fn new(registry: &'a RegionTypeRegistry, store: &'a dyn RegionStore<B>) -> Self {
        Self { registry, store }
    }

    /// Resolves a uid to its region.
    ///
    /// `Ok(None)` when the kind is not registered or no region of that kind
    /// has the geoid. A malformed uid is reported as an error rather than
    /// treated as a miss. Geoid matching is exact.
    pub fn resolve(&self, uid: &str) -> Result<Option<&'a RegionRecord<B>>> {
        let (tag, geoid) = parse_uid(uid).inspect_err(|_| {
            tracing::warn!(uid, "malformed uid");
        })?;

        let Some(descriptor) = self.registry.resolve(tag) else {
            tracing::debug!(uid, tag, "uid names an unregistered region kind");
            return Ok(None);
        };

        let found = self.store.find_by_global_geoid(descriptor.kind, geoid)?;
        if found.is_none() {
            tracing::debug!(uid, kind = %descriptor.kind, "no region with this geoid");
        }
        Ok(found)
    }
}
