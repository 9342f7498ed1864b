use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for geoprofiles
#[derive(Debug, Parser)]
#[command(
    name = "geoprofiles",
    version,
    about = "Resolve, relate and export census and neighborhood regions"
)]
pub struct CliArgs {
    /// Region dataset (.json, .json.gz or a prebuilt .bin); overrides the settings file
    #[arg(short = 'i', long = "input", global = true)]
    pub input: Option<PathBuf>,

    /// Settings file (JSON)
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show a summary of the dataset contents
    Stats,

    /// List region kinds
    Kinds {
        /// Include kinds disabled in the settings
        #[arg(long)]
        all: bool,
    },

    /// Look up a region by uid (e.g. tract:42003140100)
    Resolve { uid: String },

    /// List the regions enclosing a region
    Hierarchy { uid: String },

    /// List the regions overlapping a region, grouped by kind
    Overlap { uid: String },

    /// Print a region's simplified GeoJSON feature
    Geojson { uid: String },

    /// Print a region's census API geography fragment
    Census { uid: String },

    /// List the regions of a kind inside the area of interest
    Extent {
        /// Type id, e.g. tract
        kind: String,
        /// Ignore the kinds and counties enabled in the settings
        #[arg(long)]
        all: bool,
    },

    /// List a region's subregions, coarsest kind first
    Subregions { uid: String },

    /// Search regions by name (case- and accent-insensitive)
    Search {
        query: String,
        /// Restrict to one kind
        #[arg(short = 'k', long = "kind")]
        kind: Option<String>,
    },

    /// Convert a JSON dataset into the binary format
    Build {
        source: PathBuf,
        out: PathBuf,
        /// Write uncompressed bincode
        #[arg(long)]
        no_compress: bool,
    },
}
