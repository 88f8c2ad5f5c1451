use anyhow::Result;

use crate::cli::Cli;
use crate::common::{write_json_atomic, JsonStyle};
use crate::config::Layout;
use crate::lookup::{build_lookup, LookupTable};
use crate::report::Verdict;

pub fn execute(layout: &Layout) -> Result<LookupTable> {
    let collection = super::load_collection(layout)?;
    let lookup = build_lookup(&collection);
    write_json_atomic(&layout.lookup(), &lookup, JsonStyle::Pretty)?;
    Ok(lookup)
}

pub fn run(cli: &Cli) -> Result<Verdict> {
    let layout = cli.layout();
    let lookup = execute(&layout)?;
    println!("\n=== LOOKUP ===\nEntries written: {} -> {}", lookup.len(), layout.lookup().display());
    Ok(super::finish("lookup", Verdict::Pass))
}
