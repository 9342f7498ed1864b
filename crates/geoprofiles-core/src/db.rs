// crates/geoprofiles-core/src/db.rs
use crate::common::{DbStats, DefaultBackend};
use crate::config::Settings;
use crate::error::{GeoError, Result};
use crate::geometry::PlanarGeometry;
use crate::model::{GeogType, RegionRecord};
use crate::text::fold_key;
use crate::traits::{GeoBackend, GeometryStore, RegionStore};
use bincode::Options;
use geo::MultiPolygon;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::ops::Range;

/// In-memory region store.
///
/// All regions live in one contiguous vector, sorted by kind and then by
/// `global_geoid`; `kind_ranges` maps each kind to its slice. Lookups by
/// geoid binary-search inside that slice.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct RegionDb<B: GeoBackend> {
    regions: Vec<RegionRecord<B>>,
    kind_ranges: BTreeMap<GeogType, Range<u32>>,
    #[serde(skip)]
    engine: PlanarGeometry,
}

/// Convenient alias for the default backend.
pub type DefaultRegionDb = RegionDb<DefaultBackend>;

/// Upper bound for a bincode payload; guards against corrupt caches.
const MAX_CACHE_BYTES: u64 = 1024 * 1024 * 1024;

impl<B: GeoBackend> RegionDb<B> {
    /// Indexes a set of records.
    ///
    /// Fails when two records share `(geog_type, global_geoid)`, an `id` or
    /// an `affgeoid`.
    pub fn from_records(mut regions: Vec<RegionRecord<B>>) -> Result<Self> {
        regions.sort_by(|a, b| {
            (a.geog_type(), a.global_geoid()).cmp(&(b.geog_type(), b.global_geoid()))
        });

        for pair in regions.windows(2) {
            if pair[0].geog_type() == pair[1].geog_type()
                && pair[0].global_geoid() == pair[1].global_geoid()
            {
                return Err(GeoError::InvalidData(format!(
                    "duplicate region {}",
                    pair[0].uid()
                )));
            }
        }

        let mut seen_ids = HashSet::new();
        for r in &regions {
            if !seen_ids.insert(r.id()) {
                return Err(GeoError::InvalidData(format!(
                    "duplicate id {} on {}",
                    r.id(),
                    r.uid()
                )));
            }
        }

        let mut seen_aff = HashSet::new();
        for r in &regions {
            if let Some(aff) = r.affgeoid() {
                if !aff.is_empty() && !seen_aff.insert(aff) {
                    return Err(GeoError::InvalidData(format!("duplicate affgeoid {aff}")));
                }
            }
        }

        let mut kind_ranges = BTreeMap::new();
        let mut start = 0usize;
        while start < regions.len() {
            let kind = regions[start].geog_type();
            let end = start
                + regions[start..]
                    .iter()
                    .take_while(|r| r.geog_type() == kind)
                    .count();
            kind_ranges.insert(kind, (start as u32)..(end as u32));
            start = end;
        }

        Ok(Self {
            regions,
            kind_ranges,
            engine: PlanarGeometry,
        })
    }

    /// Reconstructs the store from its bincode form, optionally keeping only
    /// the listed kinds.
    pub fn from_bytes(data: &[u8], filter: Option<&[GeogType]>) -> Result<Self> {
        let master: RegionDb<B> = bincode::DefaultOptions::new()
            .with_fixint_encoding()
            .with_limit(MAX_CACHE_BYTES)
            .allow_trailing_bytes()
            .deserialize(data)?;

        // Ranges and sort order are rebuilt rather than trusted.
        let kept = match filter {
            Some(f) if !f.is_empty() => master
                .regions
                .into_iter()
                .filter(|r| f.contains(&r.geog_type()))
                .collect(),
            _ => master.regions,
        };
        Self::from_records(kept)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::DefaultOptions::new()
            .with_fixint_encoding()
            .serialize(self)?)
    }

    /// Every region, sorted by kind then `global_geoid`.
    pub fn regions(&self) -> &[RegionRecord<B>] {
        &self.regions
    }

    /// All regions of one kind.
    pub fn regions_of(&self, kind: GeogType) -> &[RegionRecord<B>] {
        match self.kind_ranges.get(&kind) {
            Some(range) => &self.regions[range.start as usize..range.end as usize],
            None => &[],
        }
    }

    /// Regions of `kind` flagged as inside the area of interest.
    pub fn all_in_extent(&self, kind: GeogType) -> Vec<&RegionRecord<B>> {
        self.regions_of(kind)
            .iter()
            .filter(|r| r.in_extent() == Some(true))
            .collect()
    }

    /// [`Self::all_in_extent`] narrowed to the kinds and counties the
    /// settings expose.
    pub fn available_in_extent(
        &self,
        kind: GeogType,
        settings: &Settings,
    ) -> Vec<&RegionRecord<B>> {
        self.regions_of(kind)
            .iter()
            .filter(|r| r.in_extent() == Some(true) && settings.is_region_available(r))
            .collect()
    }

    /// Regions whose name contains `query`, ignoring case and accents.
    pub fn find_by_name(&self, query: &str, kind: Option<GeogType>) -> Vec<&RegionRecord<B>> {
        let q = fold_key(query.trim());
        if q.is_empty() {
            return Vec::new();
        }
        let pool = match kind {
            Some(k) => self.regions_of(k),
            None => &self.regions[..],
        };
        pool.iter()
            .filter(|r| fold_key(r.name()).contains(&q))
            .collect()
    }

    pub fn stats(&self) -> DbStats {
        DbStats {
            regions: self.regions.len(),
            per_kind: self
                .kind_ranges
                .iter()
                .map(|(k, r)| (*k, (r.end - r.start) as usize))
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }
}

impl<B: GeoBackend> RegionStore<B> for RegionDb<B> {
    fn find_by_global_geoid(
        &self,
        kind: GeogType,
        geoid: &str,
    ) -> Result<Option<&RegionRecord<B>>> {
        let slice = self.regions_of(kind);
        Ok(slice
            .binary_search_by(|r| r.global_geoid().cmp(geoid))
            .ok()
            .map(|i| &slice[i]))
    }

    fn find_by_geoid_prefix(
        &self,
        kind: GeogType,
        prefix: &str,
    ) -> Result<Option<&RegionRecord<B>>> {
        // Linear scan is fine: a kind holds at most a few thousand regions.
        Ok(self
            .regions_of(kind)
            .iter()
            .find(|r| r.geoid() == Some(prefix)))
    }

    fn filter_by_intersection(
        &self,
        kind: GeogType,
        geometry: &MultiPolygon<f64>,
    ) -> Result<Vec<&RegionRecord<B>>> {
        let Some(query_extent) = self.engine.extent(geometry) else {
            return Ok(Vec::new());
        };

        let hits: Vec<_> = self
            .regions_of(kind)
            .iter()
            .filter(|r| {
                self.engine
                    .extent(r.geometry())
                    .is_some_and(|e| e.overlaps(&query_extent))
            })
            .filter(|r| self.engine.intersects(r.geometry(), geometry))
            .collect();

        tracing::debug!(%kind, hits = hits.len(), "intersection query");
        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CensusFields, KindFields, RegionDraft};
    use geo::polygon;

    fn tract(id: u64, tractce: &str) -> RegionRecord<DefaultBackend> {
        let geoid = format!("42003{tractce}");
        RegionDraft::new(
            tractce,
            KindFields::Tract {
                statefp: "42".into(),
                countyfp: "003".into(),
                tractce: tractce.into(),
            },
            MultiPolygon(vec![polygon![
                (x: 0.0, y: 0.0),
                (x: 1.0, y: 0.0),
                (x: 1.0, y: 1.0),
                (x: 0.0, y: 1.0),
            ]]),
        )
        .with_census(CensusFields {
            affgeoid: format!("1400000US{geoid}"),
            geoid,
            lsad: "CT".into(),
            land_area: 1,
            water_area: 0,
        })
        .build(id, &PlanarGeometry)
        .unwrap()
    }

    #[test]
    fn stale_ranges_in_a_cache_are_rebuilt() {
        let stale = DefaultRegionDb {
            regions: vec![],
            kind_ranges: BTreeMap::from([(GeogType::Tract, 0..5)]),
            engine: PlanarGeometry,
        };
        let db = DefaultRegionDb::from_bytes(&stale.to_bytes().unwrap(), None).unwrap();
        assert!(db.regions_of(GeogType::Tract).is_empty());
        assert!(db.is_empty());
    }

    #[test]
    fn unsorted_cache_is_searchable() {
        let unsorted = DefaultRegionDb {
            regions: vec![tract(2, "140200"), tract(1, "140100")],
            kind_ranges: BTreeMap::from([(GeogType::Tract, 0..2)]),
            engine: PlanarGeometry,
        };
        let db = DefaultRegionDb::from_bytes(&unsorted.to_bytes().unwrap(), None).unwrap();
        let hit = db
            .find_by_global_geoid(GeogType::Tract, "42003140100")
            .unwrap()
            .unwrap();
        assert_eq!(hit.id(), 1);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = DefaultRegionDb::from_records(vec![tract(1, "140100"), tract(1, "140200")])
            .unwrap_err();
        assert!(matches!(err, GeoError::InvalidData(msg) if msg.contains("duplicate id 1")));
    }
}
