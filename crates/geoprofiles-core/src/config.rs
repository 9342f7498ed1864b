// crates/geoprofiles-core/src/config.rs

//! Runtime settings.
//!
//! Read once at startup and passed by reference; nothing mutates them while
//! requests are served.

use crate::model::{GeogType, RegionRecord};
use crate::traits::GeoBackend;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Overrides [`Settings::data_path`].
pub const ENV_DATA_PATH: &str = "GEOPROFILES_DATA";
/// Overrides [`Settings::overlap_tolerance`].
pub const ENV_OVERLAP_TOLERANCE: &str = "GEOPROFILES_OVERLAP_TOLERANCE";

/// Inward buffer, in geometry units, applied before overlap queries so that
/// regions which only share a boundary do not count as overlapping.
pub const DEFAULT_OVERLAP_TOLERANCE: f64 = 0.001;

/// Counties in the area of interest (south-western Pennsylvania).
pub const DEFAULT_COUNTY_IDS: [&str; 10] = [
    "42073", "42003", "42007", "42125", "42059", "42051", "42129", "42063", "42005", "42019",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Region dataset (`.json`, `.json.gz`) or its bincode cache.
    pub data_path: Option<PathBuf>,
    /// Kinds exposed to clients.
    pub available_geog_types: Vec<GeogType>,
    pub available_county_ids: Vec<String>,
    pub overlap_tolerance: f64,
    /// Write and reuse the bincode cache next to the source dataset.
    pub use_cache: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_path: None,
            available_geog_types: vec![
                GeogType::BlockGroup,
                GeogType::Tract,
                GeogType::CountySubdivision,
                GeogType::County,
                GeogType::Neighborhood,
                GeogType::Zcta,
            ],
            available_county_ids: DEFAULT_COUNTY_IDS.iter().map(|s| s.to_string()).collect(),
            overlap_tolerance: DEFAULT_OVERLAP_TOLERANCE,
            use_cache: true,
        }
    }
}

impl Settings {
    /// Reads settings from a JSON file. A missing file yields the defaults.
    #[cfg(feature = "json")]
    pub fn load_from(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
        let path = path.as_ref();
        match std::fs::read(path) {
            Ok(bytes) => {
                let settings: Settings = serde_json::from_slice(&bytes)?;
                if !is_valid_tolerance(settings.overlap_tolerance) {
                    return Err(crate::GeoError::InvalidData(format!(
                        "{}: overlap_tolerance must be a non-negative number, got {}",
                        path.display(),
                        settings.overlap_tolerance
                    )));
                }
                tracing::debug!(path = %path.display(), "loaded settings");
                Ok(settings)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no settings file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Applies `GEOPROFILES_*` environment overrides.
    pub fn with_env(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(path) = lookup(ENV_DATA_PATH).filter(|p| !p.is_empty()) {
            self.data_path = Some(PathBuf::from(path));
        }
        if let Some(raw) = lookup(ENV_OVERLAP_TOLERANCE) {
            match raw.trim().parse::<f64>() {
                Ok(t) if is_valid_tolerance(t) => self.overlap_tolerance = t,
                _ => tracing::warn!(
                    value = %raw,
                    "ignoring {ENV_OVERLAP_TOLERANCE}: expected a non-negative number"
                ),
            }
        }
        self
    }

    pub fn is_county_available(&self, county_geoid: &str) -> bool {
        self.available_county_ids.iter().any(|c| c == county_geoid)
    }

    /// `true` when the region's kind is exposed and, for kinds that sit
    /// inside one county, that county is in the area of interest.
    pub fn is_region_available<B: GeoBackend>(&self, region: &RegionRecord<B>) -> bool {
        self.available_geog_types.contains(&region.geog_type())
            && region
                .fields()
                .county_geoid()
                .map_or(true, |county| self.is_county_available(&county))
    }
}

/// Overlap tolerances must be finite and non-negative; a negative value
/// would grow the query geometry instead of shrinking it.
pub(crate) fn is_valid_tolerance(t: f64) -> bool {
    t.is_finite() && t >= 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let s = Settings::default();
        assert_eq!(s.overlap_tolerance, 0.001);
        assert!(s.is_county_available("42003"));
        assert!(!s.available_geog_types.contains(&GeogType::SchoolDistrict));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let s: Settings = serde_json::from_str(r#"{"overlap_tolerance": 0.01}"#).unwrap();
        assert_eq!(s.overlap_tolerance, 0.01);
        assert_eq!(s.available_county_ids.len(), 10);
    }

    #[test]
    fn kinds_deserialize_from_type_ids() {
        let s: Settings =
            serde_json::from_str(r#"{"available_geog_types": ["tract", "schoolDistrict"]}"#)
                .unwrap();
        assert_eq!(
            s.available_geog_types,
            vec![GeogType::Tract, GeogType::SchoolDistrict]
        );
    }

    #[test]
    fn env_overrides() {
        let s = Settings::default().with_overrides(|k| match k {
            ENV_DATA_PATH => Some("/srv/regions.json.gz".into()),
            ENV_OVERLAP_TOLERANCE => Some("0.0005".into()),
            _ => None,
        });
        assert_eq!(s.data_path, Some(PathBuf::from("/srv/regions.json.gz")));
        assert_eq!(s.overlap_tolerance, 0.0005);
    }

    #[test]
    fn bad_tolerance_override_is_ignored() {
        let s = Settings::default().with_overrides(|k| {
            (k == ENV_OVERLAP_TOLERANCE).then(|| "-1".to_string())
        });
        assert_eq!(s.overlap_tolerance, DEFAULT_OVERLAP_TOLERANCE);
    }

    #[test]
    fn negative_tolerance_in_file_is_rejected() {
        let path = std::env::temp_dir().join(format!(
            "geoprofiles-settings-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, r#"{"overlap_tolerance": -0.5}"#).unwrap();
        let err = Settings::load_from(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(matches!(err, crate::GeoError::InvalidData(msg) if msg.contains("-0.5")));
    }

    #[test]
    fn tolerance_validation() {
        assert!(is_valid_tolerance(0.0));
        assert!(is_valid_tolerance(0.25));
        assert!(!is_valid_tolerance(-0.001));
        assert!(!is_valid_tolerance(f64::INFINITY));
        assert!(!is_valid_tolerance(f64::NAN));
    }

    #[test]
    fn missing_file_gives_defaults() {
        let s = Settings::load_from("/nonexistent/geoprofiles.json").unwrap();
        assert_eq!(s, Settings::default());
    }
}
