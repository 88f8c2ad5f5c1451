use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

/// An independently maintained list of school names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NameSource {
    Collection,
    Lookup,
    Roster,
    DistrictRoster,
}

impl NameSource {
    pub fn label(self) -> &'static str {
        match self {
            NameSource::Collection => "merged GeoJSON",
            NameSource::Lookup => "lookup table",
            NameSource::Roster => "school roster",
            NameSource::DistrictRoster => "district roster",
        }
    }
}

impl fmt::Display for NameSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.label()) }
}

/// Symmetric difference between two name sets. Lists are complete and sorted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SetDiff {
    pub left: NameSource,
    pub right: NameSource,
    pub left_total: usize,
    pub right_total: usize,
    pub only_left: Vec<String>,
    pub only_right: Vec<String>,
}

impl SetDiff {
    pub fn is_empty(&self) -> bool { self.only_left.is_empty() && self.only_right.is_empty() }

    pub fn issue_count(&self) -> usize { self.only_left.len() + self.only_right.len() }
}

pub fn diff_names(
    (left, left_names): (NameSource, &BTreeSet<String>),
    (right, right_names): (NameSource, &BTreeSet<String>),
) -> SetDiff {
    SetDiff {
        left,
        right,
        left_total: left_names.len(),
        right_total: right_names.len(),
        only_left: left_names.difference(right_names).cloned().collect(),
        only_right: right_names.difference(left_names).cloned().collect(),
    }
}

/// Differences for every pair of the given sources, in input order.
pub fn pairwise_diffs(sources: &[(NameSource, BTreeSet<String>)]) -> Vec<SetDiff> {
    let mut diffs = Vec::new();
    for (i, (a, a_names)) in sources.iter().enumerate() {
        for (b, b_names) in &sources[i + 1..] {
            diffs.push(diff_names((*a, a_names), (*b, b_names)));
        }
    }
    diffs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(names: &[&str]) -> BTreeSet<String> { names.iter().map(|s| s.to_string()).collect() }

    #[test]
    fn diff_is_exact_in_both_directions() {
        let d = diff_names(
            (NameSource::Collection, &set(&["A", "B", "C"])),
            (NameSource::Roster, &set(&["B", "C", "D", "E"])),
        );
        assert_eq!(d.left_total, 3);
        assert_eq!(d.right_total, 4);
        assert_eq!(d.only_left, ["A"]);
        assert_eq!(d.only_right, ["D", "E"]);
        assert_eq!(d.issue_count(), 3);
    }

    #[test]
    fn counts_are_not_truncated() {
        let many: Vec<String> = (0..25).map(|i| format!("School {i:02}")).collect();
        let left: BTreeSet<String> = many.iter().cloned().collect();
        let d = diff_names((NameSource::Collection, &left), (NameSource::Lookup, &BTreeSet::new()));
        assert_eq!(d.only_left.len(), 25);
    }

    #[test]
    fn pairs_cover_every_combination() {
        let sources = vec![
            (NameSource::Collection, set(&["A"])),
            (NameSource::Lookup, set(&["A"])),
            (NameSource::Roster, set(&["B"])),
        ];
        let diffs = pairwise_diffs(&sources);
        let pairs: Vec<_> = diffs.iter().map(|d| (d.left, d.right)).collect();
        assert_eq!(pairs, [
            (NameSource::Collection, NameSource::Lookup),
            (NameSource::Collection, NameSource::Roster),
            (NameSource::Lookup, NameSource::Roster),
        ]);
        assert!(diffs[0].is_empty());
        assert!(!diffs[1].is_empty());
    }
}
