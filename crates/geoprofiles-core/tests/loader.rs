#![cfg(feature = "json")]

use geoprofiles_core::model::CACHE_SUFFIX;
use geoprofiles_core::prelude::*;
use geoprofiles_core::GeoError;
use serde_json::json;
use std::fs;
use std::path::PathBuf;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("geoprofiles-{name}-{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn square(x0: f64, y0: f64, x1: f64, y1: f64) -> serde_json::Value {
    json!({
        "type": "Polygon",
        "coordinates": [[[x0, y0], [x1, y0], [x1, y1], [x0, y1], [x0, y0]]]
    })
}

fn dataset() -> serde_json::Value {
    json!([
        {
            "id": 1, "geog_type": "county", "name": "Allegheny", "in_extent": true,
            "geoid": "42003", "affgeoid": "0500000US42003", "lsad": "06",
            "aland": 1_890_000_000_i64, "awater": 30_000_000_i64,
            "statefp": "42", "countyfp": "003", "countyns": "01213657",
            "geometry": square(0.0, 0.0, 10.0, 10.0)
        },
        {
            "id": 2, "geog_type": "tract", "name": "1401", "in_extent": true,
            "geoid": "42003140100", "affgeoid": "1400000US42003140100", "lsad": "CT",
            "statefp": "42", "countyfp": "003", "tractce": "140100",
            "geometry": square(0.0, 0.0, 5.0, 5.0)
        },
        {
            "geog_type": "neighborhood", "name": "Bloomfield", "global_geoid": "bloomfield",
            "geometry": {
                "type": "MultiPolygon",
                "coordinates": [[[[1.0, 1.0], [4.0, 1.0], [4.0, 4.0], [1.0, 4.0], [1.0, 1.0]]]]
            }
        }
    ])
}

fn settings() -> Settings {
    Settings {
        use_cache: true,
        ..Settings::default()
    }
}

#[test]
fn json_source_is_loaded_and_cached() {
    let dir = scratch_dir("cache");
    let source = dir.join("regions.json");
    fs::write(&source, serde_json::to_vec(&dataset()).unwrap()).unwrap();

    let db = DefaultRegionDb::load_from_path(&source, &settings()).unwrap();
    assert_eq!(db.len(), 3);
    let stats = db.stats();
    assert_eq!(stats.per_kind[&GeogType::County], 1);
    assert_eq!(stats.per_kind.get(&GeogType::BlockGroup), None);

    let cache = dir.join(format!("regions.json.{CACHE_SUFFIX}"));
    assert!(cache.exists(), "cache not written at {}", cache.display());

    // Second load is served from the cache and must agree.
    let again = DefaultRegionDb::load_from_path(&source, &settings()).unwrap();
    assert_eq!(again.stats(), stats);

    let resolver = UidResolver::new(registry(), &again);
    let hood = resolver.resolve("neighborhood:bloomfield").unwrap().unwrap();
    assert_eq!(hood.id(), 3);
    let county = resolver.resolve("county:42003").unwrap().unwrap();
    assert_eq!(county.title(), "Allegheny County");
    assert_eq!(county.land_area(), Some(1_890_000_000));

    let graph = RegionGraph::new(&again, &PlanarGeometry);
    let tract = resolver.resolve("tract:42003140100").unwrap().unwrap();
    assert_eq!(graph.hierarchy(tract).unwrap()[0].uid(), "county:42003");

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn cache_is_skipped_when_disabled() {
    let dir = scratch_dir("nocache");
    let source = dir.join("regions.json");
    fs::write(&source, serde_json::to_vec(&dataset()).unwrap()).unwrap();

    let settings = Settings {
        use_cache: false,
        ..Settings::default()
    };
    DefaultRegionDb::load_from_path(&source, &settings).unwrap();
    assert!(!dir.join(format!("regions.json.{CACHE_SUFFIX}")).exists());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn saved_binary_round_trips_with_filter() {
    let dir = scratch_dir("binary");
    let source = dir.join("regions.json");
    fs::write(&source, serde_json::to_vec(&dataset()).unwrap()).unwrap();

    let db = DefaultRegionDb::load_raw_json(&source).unwrap();
    let bin = dir.join("regions.bin");
    db.save_as(&bin).unwrap();

    let loaded = DefaultRegionDb::load_from_path(&bin, &settings()).unwrap();
    assert_eq!(loaded.len(), db.len());

    let only_tracts = DefaultRegionDb::load_filtered(&bin, &[GeogType::Tract]).unwrap();
    assert_eq!(only_tracts.len(), 1);
    assert_eq!(only_tracts.regions()[0].uid(), "tract:42003140100");

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn missing_dataset_is_not_found() {
    let err = DefaultRegionDb::load_from_path("/nonexistent/regions.json", &settings()).unwrap_err();
    assert!(matches!(err, GeoError::NotFound(_)), "{err}");
}

#[test]
fn invalid_record_fails_the_load() {
    let dir = scratch_dir("invalid");
    let source = dir.join("regions.json");
    let bad = json!([{ "geog_type": "neighborhood", "name": "Nowhere", "geometry": square(0.0, 0.0, 1.0, 1.0) }]);
    fs::write(&source, serde_json::to_vec(&bad).unwrap()).unwrap();

    let err = DefaultRegionDb::load_from_path(&source, &settings()).unwrap_err();
    assert!(matches!(err, GeoError::InvalidData(_)), "{err}");

    let _ = fs::remove_dir_all(&dir);
}
