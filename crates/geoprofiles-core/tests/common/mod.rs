//! Synthetic Allegheny County fixture: axis-aligned squares in degree units.
//!
//! ```text
//! county 42003            [0,0]-[10,10]
//! tract 42003140100       [0,0]-[5,5]
//! tract 42003140200       [5,0]-[10,5]   shares the x=5 edge with 140100
//! block group 4200314010… [0,0]-[2.5,2.5]
//! neighborhood bloomfield [1,1]-[4,4]
//! cousub 4200361000       [0,0]-[6,6]
//! ```
#![allow(dead_code)]

use geo::{polygon, MultiPolygon};
use geoprofiles_core::model::{CensusFields, KindFields, RegionDraft};
use geoprofiles_core::{DefaultBackend, DefaultRegionDb, GeogType, PlanarGeometry, RegionRecord};

pub fn square(x0: f64, y0: f64, x1: f64, y1: f64) -> MultiPolygon<f64> {
    MultiPolygon(vec![polygon![
        (x: x0, y: y0),
        (x: x1, y: y0),
        (x: x1, y: y1),
        (x: x0, y: y1),
    ]])
}

pub fn census(geoid: &str, summary_level: &str, lsad: &str) -> CensusFields<DefaultBackend> {
    CensusFields {
        geoid: geoid.to_string(),
        affgeoid: format!("{summary_level}0000US{geoid}"),
        lsad: lsad.to_string(),
        land_area: 1_000_000,
        water_area: 0,
    }
}

fn s(v: &str) -> String {
    v.to_string()
}

pub fn county() -> RegionDraft<DefaultBackend> {
    RegionDraft::new(
        "Allegheny",
        KindFields::County {
            statefp: s("42"),
            countyfp: s("003"),
            countyns: s("01213657"),
        },
        square(0.0, 0.0, 10.0, 10.0),
    )
    .with_census(census("42003", "050", "06"))
    .with_in_extent(true)
}

pub fn tract(tractce: &str, geometry: MultiPolygon<f64>) -> RegionDraft<DefaultBackend> {
    let geoid = format!("42003{tractce}");
    RegionDraft::new(
        tractce.trim_end_matches('0'),
        KindFields::Tract {
            statefp: s("42"),
            countyfp: s("003"),
            tractce: s(tractce),
        },
        geometry,
    )
    .with_census(census(&geoid, "140", "CT"))
    .with_in_extent(true)
}

pub fn block_group() -> RegionDraft<DefaultBackend> {
    RegionDraft::new(
        "Block Group 1",
        KindFields::BlockGroup {
            statefp: s("42"),
            countyfp: s("003"),
            tractce: s("140100"),
            blkgrpce: s("1"),
        },
        square(0.0, 0.0, 2.5, 2.5),
    )
    .with_census(census("420031401001", "150", "BG"))
    .with_in_extent(false)
}

pub fn county_subdivision() -> RegionDraft<DefaultBackend> {
    RegionDraft::new(
        "Pittsburgh",
        KindFields::CountySubdivision {
            statefp: s("42"),
            countyfp: s("003"),
            cousubfp: s("61000"),
            cousubns: s("01214818"),
        },
        square(0.0, 0.0, 6.0, 6.0),
    )
    .with_census(census("4200361000", "060", "25"))
}

pub fn neighborhood() -> RegionDraft<DefaultBackend> {
    RegionDraft::new(
        "Bloomfield",
        KindFields::Neighborhood,
        square(1.0, 1.0, 4.0, 4.0),
    )
    .with_global_geoid("bloomfield")
}

/// A draft of any kind whose last identifier component is `code`, inside
/// state 42 / county 003 where the kind needs one.
pub fn draft_of(kind: GeogType, code: &str) -> RegionDraft<DefaultBackend> {
    let (fields, geoid, level) = match kind {
        GeogType::BlockGroup => (
            KindFields::BlockGroup {
                statefp: s("42"),
                countyfp: s("003"),
                tractce: s("140100"),
                blkgrpce: s(code),
            },
            format!("42003140100{code}"),
            "150",
        ),
        GeogType::Tract => (
            KindFields::Tract {
                statefp: s("42"),
                countyfp: s("003"),
                tractce: s(code),
            },
            format!("42003{code}"),
            "140",
        ),
        GeogType::CountySubdivision => (
            KindFields::CountySubdivision {
                statefp: s("42"),
                countyfp: s("003"),
                cousubfp: s(code),
                cousubns: s("00000000"),
            },
            format!("42003{code}"),
            "060",
        ),
        GeogType::County => (
            KindFields::County {
                statefp: s("42"),
                countyfp: s(code),
                countyns: s("00000000"),
            },
            format!("42{code}"),
            "050",
        ),
        GeogType::Zcta => (KindFields::Zcta { zctace: s(code) }, s(code), "860"),
        GeogType::SchoolDistrict => (
            KindFields::SchoolDistrict {
                statefp: s("42"),
                unsdlea: s(code),
                placens: s("00000000"),
            },
            format!("42{code}"),
            "970",
        ),
        GeogType::StateHouse => (
            KindFields::StateHouse {
                statefp: s("42"),
                sldlst: s(code),
            },
            format!("42{code}"),
            "620",
        ),
        GeogType::StateSenate => (
            KindFields::StateSenate {
                statefp: s("42"),
                sldust: s(code),
            },
            format!("42{code}"),
            "610",
        ),
        GeogType::Puma => (
            KindFields::Puma {
                statefp: s("42"),
                pumace: s(code),
            },
            format!("42{code}"),
            "795",
        ),
        GeogType::Neighborhood => {
            return RegionDraft::new(code, KindFields::Neighborhood, square(0.0, 0.0, 1.0, 1.0))
                .with_global_geoid(code);
        }
    };
    RegionDraft::new(code, fields, square(0.0, 0.0, 1.0, 1.0)).with_census(census(&geoid, level, "00"))
}

/// Kinds that sit above or beside the census nesting and are absent from
/// [`drafts`].
pub fn unnested_drafts() -> Vec<RegionDraft<DefaultBackend>> {
    vec![
        draft_of(GeogType::Zcta, "15213"),
        draft_of(GeogType::SchoolDistrict, "19170"),
        draft_of(GeogType::StateHouse, "023"),
        draft_of(GeogType::StateSenate, "043"),
        draft_of(GeogType::Puma, "01701"),
    ]
}

pub fn drafts() -> Vec<RegionDraft<DefaultBackend>> {
    vec![
        county(),
        tract("140100", square(0.0, 0.0, 5.0, 5.0)),
        tract("140200", square(5.0, 0.0, 10.0, 5.0)),
        block_group(),
        county_subdivision(),
        neighborhood(),
    ]
}

pub fn records() -> Vec<RegionRecord<DefaultBackend>> {
    drafts()
        .into_iter()
        .enumerate()
        .map(|(i, d)| d.build(i as u64 + 1, &PlanarGeometry).unwrap())
        .collect()
}

pub fn db() -> DefaultRegionDb {
    DefaultRegionDb::from_records(records()).unwrap()
}
