// crates/geoprofiles-core/src/loader/common_io.rs
use crate::error::{GeoError, Result};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

#[cfg(feature = "compact")]
use flate2::read::GzDecoder;

/// Opens a file for reading, transparently un-gzipping it when `gzip` is set.
pub fn open_stream(path: &Path, gzip: bool) -> Result<Box<dyn Read>> {
    let file = File::open(path).map_err(|e| {
        GeoError::NotFound(format!("Dataset not found at {}: {}", path.display(), e))
    })?;

    let reader = BufReader::new(file);

    if !gzip {
        return Ok(Box::new(reader));
    }

    #[cfg(feature = "compact")]
    {
        Ok(Box::new(GzDecoder::new(reader)))
    }

    #[cfg(not(feature = "compact"))]
    {
        Err(GeoError::InvalidData(format!(
            "{} is gzip-compressed but the 'compact' feature is disabled",
            path.display()
        )))
    }
}

pub fn is_gzip_path(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("gz"))
}

/// `regions.json.gz` -> `regions.json.gz.<suffix>`, next to the source.
pub fn get_cache_path(source_path: &Path, suffix: &str) -> PathBuf {
    let filename = source_path
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| "regions".to_string());
    source_path.with_file_name(format!("{filename}.{suffix}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_path_sits_next_to_source() {
        let p = get_cache_path(Path::new("/data/regions.json.gz"), "regions.bin");
        assert_eq!(p, PathBuf::from("/data/regions.json.gz.regions.bin"));
    }

    #[test]
    fn gzip_detection_is_by_extension() {
        assert!(is_gzip_path(Path::new("a/regions.json.GZ")));
        assert!(!is_gzip_path(Path::new("a/regions.json")));
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = open_stream(Path::new("/nonexistent/regions.json"), false)
            .err()
            .unwrap();
        assert!(matches!(err, GeoError::NotFound(_)));
    }
}
