//! Text rendering of stage summaries.
//!
//! Counts are always exact; only the example lists are cut to
//! [`MAX_EXAMPLES`] entries.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::Serializer;

use crate::merge::{LoadedSources, MergeOutcome};
use crate::reconcile::ReconcileReport;
use crate::survey::{Count, Survey};
use crate::validate::{MismatchKind, ValidationReport};

pub const MAX_EXAMPLES: usize = 10;

/// Serialize a list through each item's `Display`.
pub fn serialize_display_seq<T: Display, S: Serializer>(items: &[T], s: S) -> Result<S::Ok, S::Error> {
    s.collect_seq(items.iter().map(ToString::to_string))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict { Pass, Fail }

impl Verdict {
    pub fn from_clean(clean: bool) -> Self { if clean { Verdict::Pass } else { Verdict::Fail } }

    #[inline] pub fn passed(self) -> bool { self == Verdict::Pass }
}

impl Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self { Verdict::Pass => "PASS", Verdict::Fail => "FAIL" })
    }
}

fn heading(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    writeln!(f, "\n=== {title} ===")
}

/// Up to [`MAX_EXAMPLES`] items as `  - item`, then a count of the rest.
fn examples<I>(f: &mut fmt::Formatter<'_>, items: I) -> fmt::Result
where
    I: IntoIterator,
    I::Item: Display,
{
    let mut total = 0;
    for item in items {
        if total < MAX_EXAMPLES {
            writeln!(f, "  - {item}")?;
        }
        total += 1;
    }
    if total > MAX_EXAMPLES {
        writeln!(f, "  ... and {} more", total - MAX_EXAMPLES)?;
    }
    Ok(())
}

fn tally(f: &mut fmt::Formatter<'_>, title: &str, counts: &BTreeMap<String, usize>) -> fmt::Result {
    heading(f, title)?;
    for (key, n) in counts {
        writeln!(f, "{key}: {n}")?;
    }
    Ok(())
}

fn raw_unique(f: &mut fmt::Formatter<'_>, title: &str, counts: &BTreeMap<String, Count>) -> fmt::Result {
    heading(f, title)?;
    for (key, c) in counts {
        writeln!(f, "{key}: {} features, {} unique", c.raw, c.unique)?;
    }
    Ok(())
}

impl Display for Survey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        heading(f, "REGION FILE SURVEY")?;
        writeln!(f, "Files read: {}", self.files)?;
        writeln!(f, "Files skipped: {}", self.skipped.len())?;
        examples(f, self.skipped.iter().map(|s| format!("{}: {}", s.file, s.reason)))?;
        writeln!(f, "Total features: {}", self.total_features)?;
        writeln!(f, "Unique school names: {}", self.unique_names)?;
        raw_unique(f, "BY CLASS", &self.by_class)?;
        raw_unique(f, "BY REGION", &self.by_region)?;
        raw_unique(f, "BY DISTRICT", &self.by_district)?;
        heading(f, "MISSING REGION FILES")?;
        writeln!(f, "{}", self.missing_regions.len())?;
        examples(f, self.missing_regions.iter().map(|r| r.file_name()))?;
        heading(f, "NAMES IN MORE THAN ONE FILE")?;
        writeln!(f, "{}", self.multi_file_names.len())?;
        examples(f, self.multi_file_names.iter().map(|(name, files)| format!("{name}: {}", files.join(", "))))
    }
}

/// Summary of the merge stage.
pub struct MergeReport<'a> {
    pub loaded: &'a LoadedSources,
    pub outcome: &'a MergeOutcome,
}

impl Display for MergeReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let MergeReport { loaded, outcome } = self;
        heading(f, "MERGE")?;
        writeln!(f, "Region files merged: {}", loaded.sources.len())?;
        writeln!(f, "Region files skipped: {}", loaded.skipped.len())?;
        examples(f, loaded.skipped.iter().map(|s| format!("{}: {}", s.file, s.reason)))?;
        writeln!(f, "Missing region files: {}", loaded.missing_regions.len())?;
        examples(f, loaded.missing_regions.iter().map(|r| r.file_name()))?;
        writeln!(f, "Input features: {}", outcome.input_features)?;
        writeln!(f, "Features without a name: {}", outcome.dropped.len())?;
        examples(f, outcome.dropped.iter().map(|d| format!("{} #{}", d.file, d.index)))?;
        writeln!(f, "Duplicates dropped: {}", outcome.duplicates.len())?;
        examples(f, outcome.duplicates.iter()
            .map(|d| format!("{} (kept from {}, dropped from {})", d.name, d.kept_from, d.dropped_from)))?;
        writeln!(f, "Schools merged: {}", outcome.collection.len())
    }
}

impl Display for ReconcileReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        heading(f, "RECONCILE")?;
        writeln!(f, "Known mapping entries: {}", self.mapping_entries)?;
        writeln!(f, "Mapping conflicts: {}", self.mapping_conflicts.len())?;
        examples(f, self.mapping_conflicts.iter()
            .map(|c| format!("{}: kept {}, ignored {}", c.name, c.kept, c.ignored)))?;
        writeln!(f, "Already consistent: {}", self.chain.unchanged)?;
        writeln!(f, "Corrected: {}", self.corrected())?;
        examples(f, self.broadcast.iter().chain(&self.chain.corrections).map(|c| {
            let before = c.before.region.as_deref().unwrap_or("<none>");
            format!("{}: {before} -> {} ({})", c.name, c.after, c.strategy)
        }))?;
        writeln!(f, "Unresolved: {}", self.chain.unresolved.len())?;
        examples(f, self.chain.unresolved.iter()
            .map(|u| format!("{} (region {:?})", u.name, u.current.region.as_deref().unwrap_or(""))))
    }
}

impl Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        heading(f, "VALIDATION")?;
        writeln!(f, "Total schools: {}", self.total_schools)?;
        tally(f, "SCHOOLS BY CLASS", &self.tallies.by_class)?;
        tally(f, "SCHOOLS BY REGION", &self.tallies.by_region)?;
        tally(f, "SCHOOLS BY DISTRICT", &self.tallies.by_district)?;

        heading(f, "CROSS-SOURCE DIFFERENCES")?;
        for source in &self.missing_artifacts {
            writeln!(f, "{source}: MISSING")?;
        }
        for source in &self.unavailable {
            writeln!(f, "{source}: not available")?;
        }
        for d in &self.source_diffs {
            writeln!(f, "{} ({}) vs {} ({})", d.left, d.left_total, d.right, d.right_total)?;
            writeln!(f, " only in {}: {}", d.left, d.only_left.len())?;
            examples(f, &d.only_left)?;
            writeln!(f, " only in {}: {}", d.right, d.only_right.len())?;
            examples(f, &d.only_right)?;
        }

        heading(f, "CLASS/REGION MISMATCHES")?;
        writeln!(f, "{}", self.class_region_mismatches.len())?;
        examples(f, self.class_region_mismatches.iter().map(|m| match m.kind {
            MismatchKind::InvalidRegion => format!("{}: invalid region format {:?}", m.name, m.region),
            MismatchKind::ClassDisagrees => format!(
                "{}: {} but class {:?}, size {:?}",
                m.name, m.region, m.class.as_deref().unwrap_or(""), m.size.as_deref().unwrap_or(""),
            ),
            MismatchKind::Incomplete => format!("{}: {} without both class and size", m.name, m.region),
        }))?;

        heading(f, "MISSING REGIONS")?;
        writeln!(f, "{}", self.missing_regions.len())?;
        examples(f, &self.missing_regions)?;

        heading(f, "MISSING PROPERTIES")?;
        writeln!(f, "{}", self.missing_properties.len())?;
        examples(f, self.missing_properties.iter().map(|m| format!("{}: no {}", m.name, m.property)))?;

        heading(f, "DUPLICATE NAMES")?;
        writeln!(f, "{}", self.duplicate_names.len())?;
        examples(f, &self.duplicate_names)?;

        heading(f, "CONFIG ISSUES")?;
        writeln!(f, "{}", self.config_issues.len())?;
        examples(f, &self.config_issues)?;

        writeln!(f, "\nTotal issues: {}", self.issue_count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Listing(Vec<String>);

    impl Display for Listing {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { examples(f, &self.0) }
    }

    #[test]
    fn examples_are_capped_with_exact_remainder() {
        let text = Listing((0..13).map(|i| format!("School {i}")).collect()).to_string();
        assert_eq!(text.lines().count(), MAX_EXAMPLES + 1);
        assert!(text.ends_with("  ... and 3 more\n"));
    }

    #[test]
    fn short_lists_are_complete() {
        let text = Listing(vec!["A".into(), "B".into()]).to_string();
        assert_eq!(text, "  - A\n  - B\n");
    }

    #[test]
    fn validation_report_shows_exact_counts() {
        let report = ValidationReport {
            duplicate_names: (0..12).map(|i| format!("Dup {i:02}")).collect(),
            ..Default::default()
        };
        let text = report.to_string();
        assert!(text.contains("=== DUPLICATE NAMES ===\n12\n"));
        assert!(text.contains("  ... and 2 more"));
        assert!(text.contains("Total issues: 12"));
    }

    #[test]
    fn verdict_text() {
        assert_eq!(Verdict::from_clean(true).to_string(), "PASS");
        assert!(!Verdict::from_clean(false).passed());
    }
}
