use clap::{Args, Parser, Subcommand, ValueHint};
use std::path::PathBuf;

use crate::config::{Layout, DEFAULT_APP_DIR, DEFAULT_OUT_DIR, DEFAULT_REGIONS_DIR};

/// Merge, reconcile and validate the VHSL school region dataset
#[derive(Parser, Debug)]
#[command(name = "vhsl", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Directory holding the per-region `Region {N}{L}.geojson` files
    #[arg(long, global = true, default_value = DEFAULT_REGIONS_DIR, value_hint = ValueHint::DirPath)]
    pub regions_dir: PathBuf,

    /// Directory for `all_schools.geojson` and `school_lookup.json`
    #[arg(long, global = true, default_value = DEFAULT_OUT_DIR, value_hint = ValueHint::DirPath)]
    pub out_dir: PathBuf,

    /// Directory holding the application config documents
    #[arg(long, global = true, default_value = DEFAULT_APP_DIR, value_hint = ValueHint::DirPath)]
    pub app_dir: PathBuf,

    /// Fail the stage on warnings (skipped files, dropped features, unresolved schools)
    #[arg(long, global = true)]
    pub strict: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn layout(&self) -> Layout {
        Layout::new(&self.regions_dir, &self.out_dir, &self.app_dir)
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Inventory the raw region files (read-only)
    Survey,

    /// Merge region files into all_schools.geojson and write the lookup
    Merge,

    /// Repair class/size/region attribution in all_schools.geojson
    Reconcile,

    /// Rebuild school_lookup.json from all_schools.geojson
    Lookup,

    /// Cross-check the collection, lookup and application config
    Validate(ValidateArgs),

    /// Write *_updated.json application config proposals
    Propose,

    /// merge -> reconcile -> lookup -> validate
    Run,
}

#[derive(Args, Debug, Default)]
pub struct ValidateArgs {
    /// Print the structured result as JSON instead of text
    #[arg(long)]
    pub json: bool,
}
