use anyhow::Result;
use tracing::{info, warn};

use crate::cli::Cli;
use crate::common::{ensure_dir_exists, write_json_atomic, JsonStyle};
use crate::config::Layout;
use crate::lookup::build_lookup;
use crate::merge::{load_region_sources, merge_sources, LoadedSources, MergeOutcome};
use crate::report::{MergeReport, Verdict};

pub struct MergeStage {
    pub loaded: LoadedSources,
    pub outcome: MergeOutcome,
}

impl MergeStage {
    pub fn warnings(&self) -> usize {
        self.loaded.skipped.len()
            + self.loaded.missing_regions.len()
            + self.outcome.dropped.len()
            + self.outcome.duplicates.len()
    }
}

/// Merge the region files and write the collection and its lookup.
pub fn execute(layout: &Layout) -> Result<MergeStage> {
    let loaded = load_region_sources(&layout.regions_dir)?;
    if loaded.sources.is_empty() {
        warn!("no readable region files in {}", layout.regions_dir.display());
    }
    let outcome = merge_sources(&loaded.sources);

    ensure_dir_exists(&layout.out_dir)?;
    write_json_atomic(&layout.all_schools(), &outcome.collection, JsonStyle::Compact)?;
    write_json_atomic(&layout.lookup(), &build_lookup(&outcome.collection), JsonStyle::Pretty)?;
    info!("wrote {} and {}", layout.all_schools().display(), layout.lookup().display());

    Ok(MergeStage { loaded, outcome })
}

pub fn run(cli: &Cli) -> Result<Verdict> {
    let stage = execute(&cli.layout())?;
    println!("{}", MergeReport { loaded: &stage.loaded, outcome: &stage.outcome });
    Ok(super::finish("merge", super::strict_verdict(cli, stage.warnings())))
}
