//! One module per CLI stage. Each `run` prints its summary and verdict line
//! and returns the verdict; `execute` does the work without printing.

pub mod lookup;
pub mod merge;
pub mod pipeline;
pub mod propose;
pub mod reconcile;
pub mod survey;
pub mod validate;

use anyhow::Result;

use crate::cli::Cli;
use crate::common::read_json_file;
use crate::config::Layout;
use crate::report::Verdict;
use crate::types::FeatureCollection;

/// Warnings fail the stage only under `--strict`.
fn strict_verdict(cli: &Cli, warnings: usize) -> Verdict {
    Verdict::from_clean(!cli.strict || warnings == 0)
}

fn finish(stage: &str, verdict: Verdict) -> Verdict {
    println!("{stage}: {verdict}");
    verdict
}

/// The merged collection; required by every stage after `merge`.
fn load_collection(layout: &Layout) -> Result<FeatureCollection> {
    read_json_file(&layout.all_schools())
}
