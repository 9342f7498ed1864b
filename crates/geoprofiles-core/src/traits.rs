// crates/geoprofiles-core/src/traits.rs
use crate::error::Result;
use crate::geometry::{Extent, Srid};
use crate::model::{GeogType, RegionRecord};
use geo::{MultiPolygon, Point};
use serde::{Deserialize, Serialize};

/// Storage backend for strings used by region records.
///
/// This abstraction allows the crate to swap how textual data is stored
/// internally (for example to use more compact types) without changing the
/// public API of accessors that return `&str` views.
///
/// The associated string type must be serializable so region sets can be
/// cached via bincode.
pub trait GeoBackend: Clone + std::fmt::Debug + Send + Sync + 'static {
    type Str: Clone
        + Send
        + Sync
        + std::fmt::Debug
        + PartialEq
        + Serialize
        + for<'de> Deserialize<'de>
        + AsRef<str>;

    fn str_from(s: &str) -> Self::Str;

    #[inline]
    fn str_to_string(v: &Self::Str) -> String {
        v.as_ref().to_string()
    }
}

/// Narrow query interface to the geometry engine.
///
/// The core never implements geometry algorithms against this trait; it only
/// issues queries. All methods are read-only and side-effect free, so one
/// engine can be shared by every concurrent request.
pub trait GeometryStore: Send + Sync {
    /// `true` when the two geometries share at least one point.
    fn intersects(&self, a: &MultiPolygon<f64>, b: &MultiPolygon<f64>) -> bool;

    /// `(xmin, ymin, xmax, ymax)`, or `None` for an empty geometry.
    fn extent(&self, geometry: &MultiPolygon<f64>) -> Option<Extent>;

    /// Reprojects a geometry assumed to be in `from` into `to`.
    fn transform(
        &self,
        geometry: &MultiPolygon<f64>,
        from: Srid,
        to: Srid,
    ) -> Result<MultiPolygon<f64>>;

    fn centroid(&self, geometry: &MultiPolygon<f64>) -> Option<Point<f64>>;

    /// Grows (positive) or shrinks (negative) a geometry by `distance`.
    fn buffer(&self, geometry: &MultiPolygon<f64>, distance: f64) -> Result<MultiPolygon<f64>>;
}

/// Storage interface for region records.
///
/// Lookups return `Ok(None)` for a miss; `Err` is reserved for the store
/// itself failing.
pub trait RegionStore<B: GeoBackend>: Send + Sync {
    /// Exact match on `global_geoid` within one kind.
    fn find_by_global_geoid(&self, kind: GeogType, geoid: &str)
        -> Result<Option<&RegionRecord<B>>>;

    /// Finds the region of `kind` whose census geoid is `prefix`.
    ///
    /// Census geoids nest by prefix: the county of tract `42003140100` is the
    /// county whose geoid is `42003`. Non-census kinds never match.
    fn find_by_geoid_prefix(&self, kind: GeogType, prefix: &str)
        -> Result<Option<&RegionRecord<B>>>;

    /// All regions of `kind` whose geometry intersects `geometry`.
    fn filter_by_intersection(
        &self,
        kind: GeogType,
        geometry: &MultiPolygon<f64>,
    ) -> Result<Vec<&RegionRecord<B>>>;
}
