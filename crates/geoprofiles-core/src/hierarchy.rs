// crates/geoprofiles-core/src/hierarchy.rs

//! # Hierarchy and Overlap
//!
//! Two read-only relationships over a region:
//!
//! - **Ancestors** follow the fixed chain of the region's kind (block group
//!   → county, tract). They are looked up by geoid prefix, never by
//!   geometry: census geoids nest exactly, polygons only approximately.
//! - **Overlap** lists, per candidate kind, the regions whose geometry meets
//!   the subject's geometry shrunk inward by a small tolerance. One spatial
//!   query is issued per candidate kind; the queries run in parallel.

use crate::config::{is_valid_tolerance, DEFAULT_OVERLAP_TOLERANCE};
use crate::indicator::DataRetrievalError;
use crate::model::{GeogType, RegionRecord, RegionSummary};
use crate::traits::{GeoBackend, GeometryStore, RegionStore};
use geo::Point;
use rayon::prelude::*;
use std::collections::BTreeMap;

/// Overlapping regions keyed by kind. Every candidate kind has an entry.
pub type OverlapMap = BTreeMap<GeogType, Vec<RegionSummary>>;

/// An enclosing region together with its label point.
#[derive(Debug, Clone)]
pub struct Ancestor<'a, B: GeoBackend> {
    pub region: &'a RegionRecord<B>,
    pub centroid: Option<Point<f64>>,
}

pub struct RegionGraph<'a, B: GeoBackend> {
    store: &'a dyn RegionStore<B>,
    engine: &'a dyn GeometryStore,
    tolerance: f64,
}

impl<'a, B: GeoBackend> RegionGraph<'a, B> {
    pub fn new(store: &'a dyn RegionStore<B>, engine: &'a dyn GeometryStore) -> Self {
        Self {
            store,
            engine,
            tolerance: DEFAULT_OVERLAP_TOLERANCE,
        }
    }

    /// Sets the inward buffer used by [`Self::overlap`]. Negative or
    /// non-finite values are ignored.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        if is_valid_tolerance(tolerance) {
            self.tolerance = tolerance;
        } else {
            tracing::warn!(tolerance, "ignoring invalid overlap tolerance");
        }
        self
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Enclosing regions, in the order fixed by the region's kind.
    ///
    /// Terminal kinds (county, zcta, school district, neighborhood, ...)
    /// yield an empty list. An ancestor absent from the store is a
    /// [`DataRetrievalError::MissingSource`]: the chain is fixed, so a gap
    /// means the boundary data is incomplete.
    pub fn hierarchy(
        &self,
        region: &RegionRecord<B>,
    ) -> Result<Vec<&'a RegionRecord<B>>, DataRetrievalError> {
        let ancestors = region.descriptor().ancestors;
        let mut out = Vec::with_capacity(ancestors.len());

        for &kind in ancestors {
            let prefix = region.fields().ancestor_geoid(kind).ok_or_else(|| {
                DataRetrievalError::missing_source(format!(
                    "{} has no {} identifier to look up",
                    region.uid(),
                    kind
                ))
            })?;

            let found = self.store.find_by_geoid_prefix(kind, &prefix)?;
            match found {
                Some(ancestor) => out.push(ancestor),
                None => {
                    tracing::warn!(uid = %region.uid(), %kind, geoid = %prefix, "ancestor missing");
                    return Err(DataRetrievalError::missing_source(format!(
                        "{kind}:{prefix} (ancestor of {}) not found",
                        region.uid()
                    )));
                }
            }
        }
        Ok(out)
    }

    /// [`Self::hierarchy`] with each ancestor's centroid attached.
    pub fn hierarchy_with_centroids(
        &self,
        region: &RegionRecord<B>,
    ) -> Result<Vec<Ancestor<'a, B>>, DataRetrievalError> {
        Ok(self
            .hierarchy(region)?
            .into_iter()
            .map(|r| Ancestor {
                region: r,
                centroid: self.engine.centroid(r.geometry()),
            })
            .collect())
    }

    /// Regions of each candidate kind that overlap `region`.
    ///
    /// Counties are the top-level container: for a county subject every
    /// candidate list is empty. The subject never appears in its own result.
    pub fn overlap(&self, region: &RegionRecord<B>) -> Result<OverlapMap, DataRetrievalError> {
        if region.geog_type() == GeogType::County {
            return Ok(GeogType::OVERLAP_CANDIDATES
                .iter()
                .map(|&k| (k, Vec::new()))
                .collect());
        }

        let shrunk = self.engine.buffer(region.geometry(), -self.tolerance)?;
        tracing::debug!(uid = %region.uid(), tolerance = self.tolerance, "computing overlap");

        GeogType::OVERLAP_CANDIDATES
            .par_iter()
            .map(|&kind| -> Result<(GeogType, Vec<RegionSummary>), DataRetrievalError> {
                let hits = self.store.filter_by_intersection(kind, &shrunk)?;
                let summaries = hits
                    .into_iter()
                    .filter(|r| !is_same_region(r, region))
                    .map(RegionRecord::summary)
                    .collect();
                Ok((kind, summaries))
            })
            .collect()
    }
}

fn is_same_region<B: GeoBackend>(a: &RegionRecord<B>, b: &RegionRecord<B>) -> bool {
    a.geog_type() == b.geog_type() && a.global_geoid() == b.global_geoid()
}
