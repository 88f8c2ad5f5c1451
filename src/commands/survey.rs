use anyhow::Result;

use crate::cli::Cli;
use crate::config::Layout;
use crate::merge::load_region_sources;
use crate::report::Verdict;
use crate::survey::{survey, Survey};

pub fn execute(layout: &Layout) -> Result<Survey> {
    let loaded = load_region_sources(&layout.regions_dir)?;
    Ok(survey(&loaded))
}

pub fn run(cli: &Cli) -> Result<Verdict> {
    let survey = execute(&cli.layout())?;
    println!("{survey}");
    let warnings = survey.skipped.len() + survey.missing_regions.len() + survey.multi_file_names.len();
    Ok(super::finish("survey", super::strict_verdict(cli, warnings)))
}
