//! geoprofiles: command-line interface for geoprofiles-core
//!
//! Loads a region dataset and answers the questions a profile page asks
//! about one region: what is it, what encloses it, what overlaps it, and
//! how to draw it.
//!
//! Usage examples
//! --------------
//!
//! - Show overall stats
//!   $ geoprofiles -i data/regions.json.gz stats
//!
//! - Resolve a uid and list its enclosing regions
//!   $ geoprofiles resolve tract:42003140100
//!   $ geoprofiles hierarchy blockGroup:420031401001
//!
//! - Overlapping regions grouped by kind, as JSON
//!   $ geoprofiles overlap neighborhood:bloomfield
//!
//! - Drill-down listing below a county
//!   $ geoprofiles subregions county:42003
//!
//! - Precompile a dataset into the binary format
//!   $ geoprofiles build data/regions.json.gz data/regions.bin
//!
//! Data source
//! -----------
//!
//! The dataset path comes from `--input`, else `GEOPROFILES_DATA`, else the
//! settings file (`-c`), else the file bundled with `geoprofiles-core`.
//! Environment variables override the settings file. JSON sources are cached
//! as bincode next to the source for fast later runs.
mod args;

use crate::args::{CliArgs, Commands};
use anyhow::{bail, Context};
use clap::Parser;
use geoprofiles_core::prelude::*;
use geoprofiles_core::DefaultBackend;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    init_logging(args.verbose);

    let mut settings = match &args.config {
        Some(path) => load_settings(path)?,
        None => Settings::default(),
    }
    .with_env();
    if let Some(input) = args.input {
        settings.data_path = Some(input);
    }
    tracing::debug!(?settings, "effective settings");

    // `build` works on its own source, so handle it before loading anything.
    let command = match args.command {
        Commands::Build {
            source,
            out,
            no_compress,
        } => return build(&source, &out, no_compress),
        other => other,
    };

    let db = DefaultRegionDb::load(&settings).context("loading region dataset")?;
    let engine = PlanarGeometry;
    let resolver = UidResolver::new(registry(), &db);
    let graph = RegionGraph::new(&db, &engine).with_tolerance(settings.overlap_tolerance);

    match command {
        Commands::Stats => {
            let stats = db.stats();
            println!("Dataset statistics:");
            println!("  Regions: {}", stats.regions);
            for (kind, count) in &stats.per_kind {
                println!("  {:<20} {count}", kind.descriptor().type_title);
            }
        }

        Commands::Kinds { all } => {
            let kinds: Vec<_> = if all {
                registry().kinds().to_vec()
            } else {
                registry().available(&settings).collect()
            };
            for d in kinds {
                println!(
                    "{:<20} {:<20} zoom {:>2}  {}",
                    d.type_id, d.type_title, d.base_zoom, d.type_description
                );
            }
        }

        Commands::Resolve { uid } => {
            let region = lookup(&resolver, &uid)?;
            println!("{}", region.title());
            println!("  uid:       {}", region.uid());
            println!("  path:      {}", region.geog_path());
            println!("  slug:      {}", region.slug());
            if let Some(geoid) = region.geoid() {
                println!("  geoid:     {geoid}");
            }
            if let Some(land) = region.land_area() {
                println!("  land area: {land} m²");
            }
            if let Some([[xmin, ymin], [xmax, ymax]]) = region.bbox(&engine) {
                println!("  bbox:      [{xmin}, {ymin}] - [{xmax}, {ymax}]");
            }
        }

        Commands::Hierarchy { uid } => {
            let region = lookup(&resolver, &uid)?;
            let ancestors = graph.hierarchy_with_centroids(region)?;
            if ancestors.is_empty() {
                println!("{} has no enclosing regions", region.title());
            }
            for a in ancestors {
                match a.centroid {
                    Some(c) => println!(
                        "{} ({}) @ {:.5}, {:.5}",
                        a.region.title(),
                        a.region.uid(),
                        c.x(),
                        c.y()
                    ),
                    None => println!("{} ({})", a.region.title(), a.region.uid()),
                }
            }
        }

        Commands::Overlap { uid } => {
            let region = lookup(&resolver, &uid)?;
            let overlap = graph.overlap(region)?;
            println!("{}", serde_json::to_string_pretty(&overlap)?);
        }

        Commands::Geojson { uid } => {
            let region = lookup(&resolver, &uid)?;
            println!("{}", serde_json::to_string(&region.simple_geojson())?);
        }

        Commands::Census { uid } => {
            let region = lookup(&resolver, &uid)?;
            match region.census_geo() {
                Some(geo) => println!("{}", serde_json::to_string(&geo)?),
                None => bail!("{} is not a census geography", region.uid()),
            }
        }

        Commands::Extent { kind, all } => {
            let kind = registry().require(&kind)?.kind;
            let regions = if all {
                db.all_in_extent(kind)
            } else {
                db.available_in_extent(kind, &settings)
            };
            for r in regions {
                println!("{:<24} {}", r.global_geoid(), r.title());
            }
        }

        Commands::Subregions { uid } => {
            let region = lookup(&resolver, &uid)?;
            let mut any = false;
            for (kind, children) in region.ordered_subregions() {
                any = true;
                println!("{}:", kind.descriptor().type_title);
                for child in children {
                    println!("  {:<36} {}", child.slug, child.name);
                }
            }
            if !any {
                println!("{} has no subregions", region.title());
            }
        }

        Commands::Search { query, kind } => {
            let kind = kind.map(|k| registry().require(&k).map(|d| d.kind)).transpose()?;
            let hits = db.find_by_name(&query, kind);
            if hits.is_empty() {
                println!("No regions found matching: {query}");
            }
            for r in hits {
                println!("{:<36} {}", r.uid(), r.title());
            }
        }

        Commands::Build { .. } => {}
    }

    Ok(())
}

fn lookup<'a>(
    resolver: &UidResolver<'a, DefaultBackend>,
    uid: &str,
) -> anyhow::Result<&'a RegionRecord<DefaultBackend>> {
    match resolver.resolve(uid)? {
        Some(region) => Ok(region),
        None => bail!("no region found for {uid}"),
    }
}

#[cfg(feature = "json")]
fn load_settings(path: &std::path::Path) -> anyhow::Result<Settings> {
    Settings::load_from(path).with_context(|| format!("reading settings from {}", path.display()))
}

#[cfg(not(feature = "json"))]
fn load_settings(path: &std::path::Path) -> anyhow::Result<Settings> {
    bail!("cannot read {}: the 'json' feature is disabled", path.display())
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(feature = "json")]
fn build(source: &std::path::Path, out: &std::path::Path, no_compress: bool) -> anyhow::Result<()> {
    use geoprofiles_core::loader::builder::{build_dataset, CompressionMode};

    let compression = if no_compress {
        CompressionMode::None
    } else {
        CompressionMode::default()
    };
    build_dataset(source, out, compression)
        .with_context(|| format!("building {}", out.display()))?;
    println!("Wrote {}", out.display());
    Ok(())
}

#[cfg(not(feature = "json"))]
fn build(_source: &std::path::Path, _out: &std::path::Path, _no_compress: bool) -> anyhow::Result<()> {
    bail!("this build of geoprofiles cannot read JSON sources (enable the 'json' feature)")
}
