// crates/geoprofiles-core/src/loader/builder.rs
#![cfg(feature = "json")]

use super::{common_io, source};
use crate::common::DefaultBackend;
use crate::db::RegionDb;
use crate::error::{GeoError, Result};
use crate::geometry::PlanarGeometry;
use crate::model::CACHE_SUFFIX;
use crate::registry::registry;

use bincode::Options;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

#[cfg(feature = "compact")]
use flate2::{write::GzEncoder, Compression};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionMode {
    Gzip,
    None,
}

impl Default for CompressionMode {
    #[cfg(feature = "compact")]
    fn default() -> Self {
        Self::Gzip
    }

    #[cfg(not(feature = "compact"))]
    fn default() -> Self {
        Self::None
    }
}

/// Parses a JSON region dataset and writes its binary form to `out_path`.
pub fn build_dataset(source_path: &Path, out_path: &Path, compression: CompressionMode) -> Result<()> {
    tracing::info!(
        source = %source_path.display(),
        out = %out_path.display(),
        ?compression,
        "building region dataset"
    );
    let db = RegionDb::<DefaultBackend>::build_from_source(source_path)?;
    write_generic(out_path, &db, compression)?;
    tracing::info!(regions = db.len(), "dataset written");
    Ok(())
}

impl RegionDb<DefaultBackend> {
    /// **Smart Load:** reuses a fresh cache, otherwise builds from source and
    /// refreshes the cache when `use_cache` is set.
    pub(super) fn load_via_builder(path: &Path, use_cache: bool) -> Result<Self> {
        let cache_path = common_io::get_cache_path(path, CACHE_SUFFIX);

        if use_cache && Self::is_cache_fresh(path, &cache_path) {
            match Self::load_binary_file(&cache_path) {
                Ok(db) => {
                    tracing::debug!(cache = %cache_path.display(), "using region cache");
                    return Ok(db);
                }
                Err(e) => {
                    tracing::warn!(cache = %cache_path.display(), error = %e, "region cache unreadable, rebuilding")
                }
            }
        }

        let db = Self::build_from_source(path)?;

        if use_cache {
            if let Err(e) = write_generic(&cache_path, &db, CompressionMode::default()) {
                tracing::warn!(cache = %cache_path.display(), error = %e, "could not write region cache");
            }
        }
        Ok(db)
    }

    /// Parses a JSON (or `.json.gz`) dataset without touching any cache.
    pub fn load_raw_json(path: impl AsRef<Path>) -> Result<Self> {
        Self::build_from_source(path.as_ref())
    }

    pub fn save_as(&self, path: impl AsRef<Path>) -> Result<()> {
        write_generic(path.as_ref(), self, CompressionMode::default())
    }

    fn build_from_source(path: &Path) -> Result<Self> {
        let reader = common_io::open_stream(path, common_io::is_gzip_path(path))?;
        let raw = source::read_raw(reader)?;
        tracing::debug!(path = %path.display(), raw = raw.len(), "parsed region source");

        let records = source::from_raw(raw, registry(), &PlanarGeometry)?;
        Self::from_records(records)
    }

    fn is_cache_fresh(source_path: &Path, cache_path: &Path) -> bool {
        let cache_time = match fs::metadata(cache_path).and_then(|m| m.modified()) {
            Ok(m) => m,
            Err(_) => return false,
        };
        match fs::metadata(source_path).and_then(|m| m.modified()) {
            Ok(source_time) => source_time <= cache_time,
            Err(_) => true,
        }
    }
}

/// Writes any serializable store to disk as bincode.
fn write_generic<T: serde::Serialize>(path: &Path, db: &T, compression: CompressionMode) -> Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);

    let mut encoder: Box<dyn Write> = match compression {
        CompressionMode::Gzip => {
            #[cfg(feature = "compact")]
            {
                Box::new(GzEncoder::new(writer, Compression::default()))
            }
            #[cfg(not(feature = "compact"))]
            {
                return Err(GeoError::InvalidData(
                    "gzip requested but the 'compact' feature is disabled".into(),
                ));
            }
        }
        CompressionMode::None => Box::new(writer),
    };

    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .serialize_into(&mut encoder, db)
        .map_err(GeoError::Bincode)?;
    encoder.flush()?;
    Ok(())
}
