use anyhow::Result;

use crate::cli::{Cli, ValidateArgs};
use crate::report::Verdict;

/// merge -> reconcile -> lookup -> validate. Stops at the first fatal error;
/// a failing verdict does not stop later stages.
pub fn run(cli: &Cli) -> Result<Verdict> {
    let verdicts = [
        super::merge::run(cli)?,
        super::reconcile::run(cli)?,
        super::lookup::run(cli)?,
        super::validate::run(cli, &ValidateArgs::default())?,
    ];
    Ok(super::finish("run", Verdict::from_clean(verdicts.iter().all(|v| v.passed()))))
}
