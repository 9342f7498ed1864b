// crates/geoprofiles-core/src/model/mod.rs
pub mod census;
pub mod geojson;
pub mod kind;
pub mod region;

pub use census::{CensusFields, CensusGeo, KindFields};
pub use geojson::{FeatureProperties, GeoJsonGeometry, SimpleFeature};
pub use kind::{GeogType, RegionKindDescriptor, TitleRule};
pub use region::{RegionDraft, RegionRecord, RegionSummary, Subregions};

#[cfg(not(feature = "compact"))]
pub const CACHE_SUFFIX: &str = "regions.bin";
#[cfg(feature = "compact")]
pub const CACHE_SUFFIX: &str = "regions.comp.bin";
