use anyhow::{Context, Result};

use crate::cli::{Cli, ValidateArgs};
use crate::common::read_json_file_if_exists;
use crate::config::Layout;
use crate::lookup::LookupTable;
use crate::report::Verdict;
use crate::validate::{validate, ValidationInputs, ValidationReport};

pub fn execute(layout: &Layout) -> Result<ValidationReport> {
    let collection = super::load_collection(layout)?;
    let lookup: Option<LookupTable> = read_json_file_if_exists(&layout.lookup())?;
    let app = layout.load_app_config()?;
    Ok(validate(ValidationInputs { collection: &collection, lookup: lookup.as_ref(), app: &app }))
}

pub fn run(cli: &Cli, args: &ValidateArgs) -> Result<Verdict> {
    let report = execute(&cli.layout())?;
    let verdict = Verdict::from_clean(report.is_clean());
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report).context("Failed to serialize validation report")?);
        return Ok(verdict);
    }
    println!("{report}");
    Ok(super::finish("validate", verdict))
}
