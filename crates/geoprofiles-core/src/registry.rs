// crates/geoprofiles-core/src/registry.rs

//! # Region Type Registry
//!
//! Maps a type tag (`"tract"`, `"county"`, ...) to its
//! [`RegionKindDescriptor`]. The process-wide registry is built once, on first
//! use, from the fixed kind set and is read-only afterwards.

use crate::config::Settings;
use crate::error::{GeoError, Result};
use crate::model::kind::{GeogType, RegionKindDescriptor};
use once_cell::sync::Lazy;
use std::collections::HashMap;

static REGISTRY: Lazy<RegionTypeRegistry> = Lazy::new(|| {
    // A duplicate here is a bug in the fixed kind table, not a runtime condition.
    RegionTypeRegistry::standard().expect("fixed region kind set has a duplicate type id")
});

/// The process-wide registry holding every kind in [`GeogType::ALL`].
pub fn registry() -> &'static RegionTypeRegistry {
    &REGISTRY
}

#[derive(Debug, Default)]
pub struct RegionTypeRegistry {
    kinds: Vec<&'static RegionKindDescriptor>,
    by_id: HashMap<&'static str, usize>,
}

impl RegionTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry populated with exactly the fixed kind set.
    pub fn standard() -> Result<Self> {
        let mut reg = Self::new();
        for kind in GeogType::ALL {
            reg.register(kind.descriptor())?;
        }
        Ok(reg)
    }

    pub fn register(&mut self, descriptor: &'static RegionKindDescriptor) -> Result<()> {
        if self.by_id.contains_key(descriptor.type_id) {
            return Err(GeoError::DuplicateKind(descriptor.type_id));
        }
        self.by_id.insert(descriptor.type_id, self.kinds.len());
        self.kinds.push(descriptor);
        Ok(())
    }

    /// Looks up a kind by type tag.
    ///
    /// Exact match first, then a case-insensitive match. `None` is an
    /// ordinary outcome for unknown tags.
    pub fn resolve(&self, tag: &str) -> Option<&'static RegionKindDescriptor> {
        if let Some(&idx) = self.by_id.get(tag) {
            return Some(self.kinds[idx]);
        }
        self.kinds
            .iter()
            .copied()
            .find(|d| d.type_id.eq_ignore_ascii_case(tag))
    }

    /// Like [`Self::resolve`], but a miss is an error.
    pub fn require(&self, tag: &str) -> Result<&'static RegionKindDescriptor> {
        self.resolve(tag)
            .ok_or_else(|| GeoError::UnknownKind(tag.to_string()))
    }

    /// Registered kinds, in registration order.
    pub fn kinds(&self) -> &[&'static RegionKindDescriptor] {
        &self.kinds
    }

    /// Registered kinds that are enabled in `settings`.
    pub fn available<'a>(
        &'a self,
        settings: &'a Settings,
    ) -> impl Iterator<Item = &'static RegionKindDescriptor> + 'a {
        self.kinds
            .iter()
            .copied()
            .filter(move |d| settings.available_geog_types.contains(&d.kind))
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::kind::{COUNTY, TRACT};

    #[test]
    fn standard_holds_every_kind() {
        let reg = RegionTypeRegistry::standard().unwrap();
        assert_eq!(reg.len(), GeogType::ALL.len());
        for kind in GeogType::ALL {
            assert_eq!(reg.resolve(kind.type_id()).unwrap().kind, kind);
        }
    }

    #[test]
    fn resolve_falls_back_to_case_insensitive() {
        let reg = registry();
        assert_eq!(reg.resolve("tract"), Some(&TRACT));
        assert_eq!(reg.resolve("Tract"), Some(&TRACT));
        assert_eq!(reg.resolve("BLOCKGROUP").unwrap().kind, GeogType::BlockGroup);
        assert_eq!(reg.resolve("TRACT_TYPO"), None);
        assert_eq!(reg.resolve(""), None);
    }

    #[test]
    fn duplicate_registration_fails() {
        let mut reg = RegionTypeRegistry::new();
        reg.register(&COUNTY).unwrap();
        let err = reg.register(&COUNTY).unwrap_err();
        assert!(matches!(err, GeoError::DuplicateKind("county")));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn require_reports_unknown_kind() {
        assert!(matches!(
            registry().require("place"),
            Err(GeoError::UnknownKind(tag)) if tag == "place"
        ));
    }

    #[test]
    fn available_honors_settings() {
        let settings = Settings {
            available_geog_types: vec![GeogType::County, GeogType::Tract],
            ..Settings::default()
        };
        let kinds: Vec<_> = registry().available(&settings).map(|d| d.kind).collect();
        assert_eq!(kinds, vec![GeogType::Tract, GeogType::County]);
    }
}
