use anyhow::Result;

use crate::cli::Cli;
use crate::config::Layout;
use crate::propose::{build_proposal, write_proposal, Proposal, ProposalFiles};
use crate::report::Verdict;

pub fn execute(layout: &Layout) -> Result<(Proposal, ProposalFiles)> {
    let collection = super::load_collection(layout)?;
    let proposal = build_proposal(&collection);
    let files = write_proposal(&proposal, layout)?;
    Ok((proposal, files))
}

pub fn run(cli: &Cli) -> Result<Verdict> {
    let (proposal, files) = execute(&cli.layout())?;
    println!("\n=== PROPOSAL ===");
    println!("Schools: {} -> {}", proposal.roster.schools.len(), files.roster.display());
    println!("Classes: {} -> {}", proposal.classes.classes.len(), files.classes.display());
    println!("Districts: {} -> {}", proposal.districts.districts.len(), files.districts.display());
    println!("Skipped without coordinates: {}", proposal.skipped.len());
    for name in proposal.skipped.iter().take(crate::report::MAX_EXAMPLES) {
        println!("  - {name}");
    }
    Ok(super::finish("propose", super::strict_verdict(cli, proposal.skipped.len())))
}
