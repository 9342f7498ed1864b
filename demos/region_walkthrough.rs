//! Region walkthrough for geoprofiles-rs
//!
//! This example builds a tiny in-memory dataset and demonstrates how to:
//! - Resolve regions by uid
//! - Walk up the census hierarchy
//! - List overlapping regions
//! - Collect indicator results that may partially fail

use geo::{polygon, MultiPolygon};
use geoprofiles_core::model::{CensusFields, KindFields, RegionDraft};
use geoprofiles_core::prelude::*;
use geoprofiles_core::{DataRetrievalError, DefaultBackend, IndicatorReport, Result};

fn square(x0: f64, y0: f64, x1: f64, y1: f64) -> MultiPolygon<f64> {
    MultiPolygon(vec![polygon![
        (x: x0, y: y0),
        (x: x1, y: y0),
        (x: x1, y: y1),
        (x: x0, y: y1),
    ]])
}

fn census(geoid: &str) -> CensusFields<DefaultBackend> {
    CensusFields {
        geoid: geoid.into(),
        affgeoid: String::new(),
        lsad: String::new(),
        land_area: 0,
        water_area: 0,
    }
}

fn main() -> Result<()> {
    println!("=== geoprofiles region walkthrough ===\n");

    let drafts: Vec<RegionDraft<DefaultBackend>> = vec![
        RegionDraft::new(
            "Allegheny",
            KindFields::County {
                statefp: "42".into(),
                countyfp: "003".into(),
                countyns: "01213657".into(),
            },
            square(-80.36, 40.19, -79.69, 40.67),
        )
        .with_census(census("42003")),
        RegionDraft::new(
            "804",
            KindFields::Tract {
                statefp: "42".into(),
                countyfp: "003".into(),
                tractce: "080400".into(),
            },
            square(-79.96, 40.45, -79.94, 40.47),
        )
        .with_census(census("42003080400")),
        RegionDraft::new("Bloomfield", KindFields::Neighborhood, square(-79.955, 40.455, -79.945, 40.465))
            .with_global_geoid("bloomfield"),
    ];

    let engine = PlanarGeometry;
    let records = drafts
        .into_iter()
        .zip(1..)
        .map(|(d, id)| d.build(id, &engine))
        .collect::<Result<Vec<_>>>()?;
    let db = DefaultRegionDb::from_records(records)?;
    let resolver = UidResolver::new(registry(), &db);
    let graph = RegionGraph::new(&db, &engine);

    println!("--- Resolve ---");
    let Some(tract) = resolver.resolve("tract:42003080400")? else {
        println!("tract not found");
        return Ok(());
    };
    println!("{} -> /profiles/{}", tract.title(), tract.geog_path());

    println!("\n--- Hierarchy ---");
    match graph.hierarchy(tract) {
        Ok(chain) => chain.iter().for_each(|r| println!("- {}", r.title())),
        Err(e) => println!("unavailable: {e}"),
    }

    println!("\n--- Overlap ---");
    if let Ok(overlap) = graph.overlap(tract) {
        for (kind, regions) in &overlap {
            let names: Vec<_> = regions.iter().map(|r| r.name.as_str()).collect();
            println!("{:<20} {:?}", kind.descriptor().type_title, names);
        }
    }

    println!("\n--- Indicators ---");
    let mut report = IndicatorReport::new();
    report.settle("land_area", || {
        tract
            .land_area()
            .filter(|a| *a > 0)
            .ok_or_else(|| DataRetrievalError::aggregation("land area not recorded"))
    });
    report.settle("county_count", || Ok(db.regions_of(GeogType::County).len() as i64));
    println!("{}", serde_json::to_string_pretty(&report).unwrap_or_default());

    Ok(())
}
