mod common;

use geoprofiles_core::prelude::*;
use geoprofiles_core::{GeoError, RegionDb};
use proptest::prelude::*;

#[test]
fn resolves_every_fixture_region_by_its_uid() {
    let db = common::db();
    let resolver = UidResolver::new(registry(), &db);

    for region in db.regions() {
        let found = resolver.resolve(&region.uid()).unwrap().unwrap();
        assert_eq!(found.id(), region.id());
    }
}

#[test]
fn derived_identity_matches_profile_urls() {
    let db = common::db();
    let resolver = UidResolver::new(registry(), &db);

    let tract = resolver.resolve("tract:42003140100").unwrap().unwrap();
    assert_eq!(tract.slug(), "tract-42003140100");
    assert_eq!(tract.title(), "Tract 42003140100");
    assert_eq!(tract.geog_path(), "tract/42003140100");
    assert_eq!(tract.geog_id(), "42003140100");
    assert_eq!(tract.bbox(&PlanarGeometry), Some([[0.0, 0.0], [5.0, 5.0]]));

    let hood = resolver.resolve("neighborhood:bloomfield").unwrap().unwrap();
    assert_eq!(hood.title(), "Bloomfield");
    assert_eq!(hood.slug(), "neighborhood-bloomfield");
    assert!(hood.census_geo().is_none());
}

#[test]
fn type_tag_falls_back_to_case_insensitive_match() {
    let db = common::db();
    let resolver = UidResolver::new(registry(), &db);

    let a = resolver.resolve("countySubdivision:4200361000").unwrap().unwrap();
    let b = resolver.resolve("COUNTYSUBDIVISION:4200361000").unwrap().unwrap();
    assert_eq!(a.id(), b.id());
}

#[test]
fn misses_are_none_and_malformed_uids_are_errors() {
    let db = common::db();
    let resolver = UidResolver::new(registry(), &db);

    assert!(resolver.resolve("tract:99999999999").unwrap().is_none());
    assert!(resolver.resolve("place:4261000").unwrap().is_none());
    // geoid matching is exact
    assert!(resolver.resolve("neighborhood:Bloomfield").unwrap().is_none());

    for bad in ["tract42003140100", "tract:", ":42003", ""] {
        assert!(
            matches!(resolver.resolve(bad), Err(GeoError::MalformedUid(_))),
            "{bad:?}"
        );
    }
}

#[test]
fn region_availability_follows_kind_and_county() {
    let db = common::db();
    let mut settings = Settings::default();

    let in_area: Vec<_> = db
        .available_in_extent(GeogType::Tract, &settings)
        .iter()
        .map(|r| r.uid())
        .collect();
    assert_eq!(in_area, ["tract:42003140100", "tract:42003140200"]);

    settings.available_county_ids = vec!["42005".to_string()];
    assert!(db.available_in_extent(GeogType::Tract, &settings).is_empty());
    assert!(db.available_in_extent(GeogType::County, &settings).is_empty());

    let hood = UidResolver::new(registry(), &db)
        .resolve("neighborhood:bloomfield")
        .unwrap()
        .unwrap();
    assert!(settings.is_region_available(hood));
    settings.available_geog_types.retain(|k| *k != GeogType::Neighborhood);
    assert!(!settings.is_region_available(hood));
}

#[test]
fn available_kinds_follow_settings() {
    let mut settings = Settings::default();
    let ids: Vec<_> = registry().available(&settings).map(|d| d.type_id).collect();
    assert!(ids.contains(&"tract"));
    assert!(!ids.contains(&"schoolDistrict"));

    settings.available_geog_types = vec![GeogType::SchoolDistrict];
    let ids: Vec<_> = registry().available(&settings).map(|d| d.type_id).collect();
    assert_eq!(ids, ["schoolDistrict"]);
}

#[test]
fn name_search_folds_case_and_accents() {
    let db = common::db();
    let hits: Vec<_> = db.find_by_name("BLOOMFÍELD", None).iter().map(|r| r.uid()).collect();
    assert_eq!(hits, ["neighborhood:bloomfield"]);

    let tracts = db.find_by_name("140", Some(GeogType::Tract));
    assert_eq!(tracts.len(), 2);
    assert!(db.find_by_name("  ", None).is_empty());
}

proptest! {
    #[test]
    fn uid_round_trips_through_the_store(
        kind in prop::sample::select(GeogType::ALL.to_vec()),
        code in "[0-9]{1,6}",
    ) {
        let record = common::draft_of(kind, &code).build(7, &PlanarGeometry).unwrap();
        let uid = record.uid();
        prop_assert_eq!(
            &uid,
            &format!("{}:{}", kind.descriptor().type_id, record.global_geoid())
        );
        prop_assert!(record.global_geoid().ends_with(code.as_str()));

        let db = RegionDb::from_records(vec![record]).unwrap();
        let resolver = UidResolver::new(registry(), &db);
        let found = resolver.resolve(&uid).unwrap();
        prop_assert_eq!(found.map(|r| (r.id(), r.geog_type())), Some((7, kind)));
    }

    #[test]
    fn neighborhood_slugs_round_trip(geoid in "[a-z0-9][a-z0-9-]{0,30}") {
        let record = common::neighborhood()
            .with_global_geoid(geoid.clone())
            .build(7, &PlanarGeometry)
            .unwrap();
        let uid = record.uid();
        prop_assert_eq!(&uid, &format!("neighborhood:{geoid}"));

        let db = RegionDb::from_records(vec![record]).unwrap();
        let found = UidResolver::new(registry(), &db).resolve(&uid).unwrap();
        prop_assert_eq!(found.map(|r| r.id()), Some(7));
    }
}
