use anyhow::Result;
use tracing::{info, warn};

use crate::cli::Cli;
use crate::common::{write_json_atomic, JsonStyle};
use crate::config::Layout;
use crate::lookup::build_lookup;
use crate::merge::load_region_sources;
use crate::reconcile::{extract_known_mapping, reconcile_collection, KnownMapping, ReconcileReport};
use crate::report::Verdict;

/// Known mapping from the region files, or empty when the directory is gone.
fn known_mapping(layout: &Layout) -> Result<KnownMapping> {
    if !layout.regions_dir.is_dir() {
        warn!("{} not found; reconciling without a known mapping", layout.regions_dir.display());
        return Ok(KnownMapping::default());
    }
    let loaded = load_region_sources(&layout.regions_dir)?;
    Ok(extract_known_mapping(&loaded.sources))
}

/// Repair the collection in place on disk and refresh the lookup from it.
pub fn execute(layout: &Layout) -> Result<ReconcileReport> {
    let mut collection = super::load_collection(layout)?;
    let known = known_mapping(layout)?;
    let report = reconcile_collection(&mut collection, &known);

    write_json_atomic(&layout.all_schools(), &collection, JsonStyle::Compact)?;
    write_json_atomic(&layout.lookup(), &build_lookup(&collection), JsonStyle::Pretty)?;
    info!("{} corrections written to {}", report.corrected(), layout.all_schools().display());
    Ok(report)
}

pub fn run(cli: &Cli) -> Result<Verdict> {
    let report = execute(&cli.layout())?;
    println!("{report}");
    Ok(super::finish("reconcile", super::strict_verdict(cli, report.chain.unresolved.len())))
}
