// crates/geoprofiles-core/src/loader/mod.rs

//! # Data Loader
//!
//! Handles the physical layer (files, gzip, the bincode cache) and delegates
//! to the JSON source parser when no usable cache exists.

use crate::common::DefaultBackend;
use crate::config::Settings;
use crate::db::RegionDb;
use crate::error::Result;
use crate::model::GeogType;
use std::io::Read;
use std::path::{Path, PathBuf};

pub mod common_io;

#[cfg(feature = "json")]
pub mod builder;
#[cfg(feature = "json")]
pub mod source;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

impl RegionDb<DefaultBackend> {
    pub fn default_data_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
    }

    pub fn default_dataset_filename() -> &'static str {
        "regions.json.gz"
    }

    /// Loads the dataset named by `settings.data_path`, or the bundled default.
    pub fn load(settings: &Settings) -> Result<Self> {
        let path = settings.data_path.clone().unwrap_or_else(|| {
            Self::default_data_dir().join(Self::default_dataset_filename())
        });
        Self::load_from_path(path, settings)
    }

    /// `.bin` files are read as-is; JSON sources go through the cache.
    pub fn load_from_path(path: impl AsRef<Path>, settings: &Settings) -> Result<Self> {
        let path = path.as_ref();
        let db = if is_binary_path(path) {
            Self::load_binary_file(path)?
        } else {
            Self::load_source(path, settings)?
        };
        tracing::info!(path = %path.display(), regions = db.len(), "region dataset loaded");
        Ok(db)
    }

    /// Reads a binary dataset, keeping only `kinds`.
    pub fn load_filtered(path: impl AsRef<Path>, kinds: &[GeogType]) -> Result<Self> {
        let data = read_binary(path.as_ref())?;
        Self::from_bytes(&data, Some(kinds))
    }

    /// Reads a binary dataset, gzipped or not.
    pub fn load_binary_file(path: &Path) -> Result<Self> {
        let data = read_binary(path)?;
        Self::from_bytes(&data, None)
    }

    #[cfg(feature = "json")]
    fn load_source(path: &Path, settings: &Settings) -> Result<Self> {
        Self::load_via_builder(path, settings.use_cache)
    }

    #[cfg(not(feature = "json"))]
    fn load_source(path: &Path, _settings: &Settings) -> Result<Self> {
        Err(crate::error::GeoError::InvalidData(format!(
            "{} is not a binary dataset and the 'json' feature is disabled",
            path.display()
        )))
    }
}

fn is_binary_path(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("bin"))
}

fn read_binary(path: &Path) -> Result<Vec<u8>> {
    let mut raw = Vec::new();
    common_io::open_stream(path, false)?.read_to_end(&mut raw)?;
    if !raw.starts_with(&GZIP_MAGIC) {
        return Ok(raw);
    }

    #[cfg(feature = "compact")]
    {
        let mut data = Vec::new();
        flate2::read::GzDecoder::new(raw.as_slice()).read_to_end(&mut data)?;
        Ok(data)
    }

    #[cfg(not(feature = "compact"))]
    {
        Err(crate::error::GeoError::InvalidData(format!(
            "{} is gzip-compressed but the 'compact' feature is disabled",
            path.display()
        )))
    }
}
