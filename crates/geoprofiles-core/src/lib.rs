// crates/geoprofiles-core/src/lib.rs

//! Region model for neighborhood profiles.
//!
//! Census and locally defined regions (block groups, tracts, counties,
//! neighborhoods, ...) share one record type. Each kind is described by a
//! static [`RegionKindDescriptor`] held in the [`RegionTypeRegistry`]; regions
//! are addressed across kinds by `"{type_id}:{global_geoid}"` uids.
//!
//! ```no_run
//! use geoprofiles_core::prelude::*;
//!
//! let settings = Settings::default().with_env();
//! let db = DefaultRegionDb::load(&settings)?;
//! let resolver = UidResolver::new(registry(), &db);
//!
//! if let Some(tract) = resolver.resolve("tract:42003140100")? {
//!     let graph = RegionGraph::new(&db, &PlanarGeometry);
//!     for ancestor in graph.hierarchy(tract).unwrap_or_default() {
//!         println!("{}", ancestor.title());
//!     }
//! }
//! # Ok::<(), geoprofiles_core::GeoError>(())
//! ```

pub mod common;
pub mod config;
pub mod db;
pub mod error;
pub mod geometry;
pub mod hierarchy;
pub mod indicator;
pub mod loader;
pub mod model;
pub mod registry;
pub mod text;
pub mod traits;
pub mod uid;

pub use crate::common::{DbStats, DefaultBackend, StandardBackend};
pub use crate::config::Settings;
pub use crate::db::{DefaultRegionDb, RegionDb};
pub use crate::error::{GeoError, Result};
pub use crate::geometry::{Extent, PlanarGeometry, Srid};
pub use crate::hierarchy::{Ancestor, OverlapMap, RegionGraph};
pub use crate::indicator::{DataRetrievalError, ErrorLevel, ErrorReport, IndicatorReport, PartialResult};
pub use crate::model::{
    CensusFields, CensusGeo, GeogType, KindFields, RegionDraft, RegionKindDescriptor, RegionRecord,
    RegionSummary, SimpleFeature,
};
pub use crate::registry::{registry, RegionTypeRegistry};
pub use crate::traits::{GeoBackend, GeometryStore, RegionStore};
pub use crate::uid::{parse_uid, UidResolver};

pub mod prelude {
    pub use crate::{
        registry, DataRetrievalError, DefaultRegionDb, GeoBackend, GeogType, GeometryStore,
        PlanarGeometry, RegionGraph, RegionRecord, RegionStore, Settings, UidResolver,
    };
}
