//! Cross-source validation.
//!
//! Read-only: [`validate`] borrows its inputs and returns a [`ValidationReport`]
//! holding exact counts and complete issue lists. Truncation for display
//! happens in the report layer.

mod checks;
mod config;
mod sources;

pub use checks::{
    class_region_mismatches, duplicate_names, missing_properties, missing_regions, tallies,
    ClassRegionMismatch, MismatchKind, MissingProperty, Tallies, UNKNOWN,
};
pub use config::{check_class_tree, check_roster, ConfigIssue};
pub use sources::{diff_names, pairwise_diffs, NameSource, SetDiff};

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::{info, warn};

use crate::lookup::LookupTable;
use crate::types::{AppConfig, FeatureCollection, RegionId};

/// Borrowed view of everything the validator compares.
#[derive(Debug, Clone, Copy)]
pub struct ValidationInputs<'a> {
    pub collection: &'a FeatureCollection,
    pub lookup: Option<&'a LookupTable>,
    pub app: &'a AppConfig,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub total_schools: usize,
    #[serde(flatten)]
    pub tallies: Tallies,
    pub source_diffs: Vec<SetDiff>,
    pub class_region_mismatches: Vec<ClassRegionMismatch>,
    #[serde(serialize_with = "crate::report::serialize_display_seq")]
    pub missing_regions: Vec<RegionId>,
    pub missing_properties: Vec<MissingProperty>,
    pub duplicate_names: Vec<String>,
    pub config_issues: Vec<ConfigIssue>,
    /// Pipeline outputs that should exist but were not found. Each one is an issue.
    pub missing_artifacts: Vec<NameSource>,
    /// Optional config documents that were not available, so their
    /// comparisons were skipped.
    pub unavailable: Vec<NameSource>,
}

impl ValidationReport {
    pub fn issue_count(&self) -> usize {
        self.source_diffs.iter().map(SetDiff::issue_count).sum::<usize>()
            + self.class_region_mismatches.len()
            + self.missing_regions.len()
            + self.missing_properties.len()
            + self.duplicate_names.len()
            + self.config_issues.len()
            + self.missing_artifacts.len()
    }

    #[inline] pub fn is_clean(&self) -> bool { self.issue_count() == 0 }
}

pub fn validate(inputs: ValidationInputs<'_>) -> ValidationReport {
    let ValidationInputs { collection, lookup, app } = inputs;

    let mut sources: Vec<(NameSource, BTreeSet<String>)> =
        vec![(NameSource::Collection, collection.names().map(str::to_string).collect())];
    let mut unavailable = Vec::new();
    let mut missing_artifacts = Vec::new();

    match lookup {
        Some(table) => sources.push((NameSource::Lookup, table.keys().cloned().collect())),
        None => {
            warn!("{} is missing", NameSource::Lookup);
            missing_artifacts.push(NameSource::Lookup);
        }
    }
    match &app.roster {
        Some(roster) => sources.push((
            NameSource::Roster,
            roster.schools.iter().map(|s| s.name.clone()).filter(|n| !n.is_empty()).collect(),
        )),
        None => unavailable.push(NameSource::Roster),
    }
    match &app.districts {
        Some(districts) => sources.push((
            NameSource::DistrictRoster,
            districts.districts.iter().flat_map(|d| d.schools.iter().cloned()).collect(),
        )),
        None => unavailable.push(NameSource::DistrictRoster),
    }
    for source in &unavailable {
        warn!("{source} not available; skipping its comparisons");
    }

    let mut config_issues = Vec::new();
    if let Some(tree) = &app.classes {
        config_issues.extend(check_class_tree(tree));
    }
    if let Some(roster) = &app.roster {
        config_issues.extend(check_roster(roster));
    }

    let report = ValidationReport {
        total_schools: collection.len(),
        tallies: tallies(collection),
        source_diffs: pairwise_diffs(&sources),
        class_region_mismatches: class_region_mismatches(collection),
        missing_regions: missing_regions(collection),
        missing_properties: missing_properties(collection),
        duplicate_names: duplicate_names(collection),
        config_issues,
        missing_artifacts,
        unavailable,
    };
    info!("validated {} schools: {} issues", report.total_schools, report.issue_count());
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::build_lookup;
    use crate::types::{DistrictEntry, DistrictRoster, RosterSchool, SchoolRoster};
    use serde_json::{json, Value};

    fn statewide() -> FeatureCollection {
        let features: Vec<Value> = RegionId::all().iter()
            .map(|r| json!({ "properties": {
                "name": format!("School {}", r.code()),
                "class": r.class.label(),
                "size": r.class.size(),
                "region": r.to_string(),
                "district": "Dist",
            }}))
            .collect();
        serde_json::from_value(json!({ "features": features })).unwrap()
    }

    #[test]
    fn clean_collection_and_lookup() {
        let collection = statewide();
        let lookup = build_lookup(&collection);
        let app = AppConfig::default();
        let report = validate(ValidationInputs { collection: &collection, lookup: Some(&lookup), app: &app });
        assert!(report.is_clean(), "{report:#?}");
        assert_eq!(report.total_schools, 24);
        assert_eq!(report.source_diffs.len(), 1);
        assert_eq!(report.unavailable, [NameSource::Roster, NameSource::DistrictRoster]);
        assert_eq!(report.tallies.by_class["3"], 4);
    }

    #[test]
    fn roster_and_district_differences_are_counted() {
        let collection = statewide();
        let lookup = build_lookup(&collection);
        let app = AppConfig {
            roster: Some(SchoolRoster { schools: vec![RosterSchool {
                name: "Elsewhere High".into(),
                class: "2".into(),
                region: "Region 2A".into(),
                district: "D".into(),
                ..Default::default()
            }] }),
            classes: None,
            districts: Some(DistrictRoster { districts: vec![DistrictEntry {
                id: String::new(),
                name: "Dist".into(),
                schools: collection.names().map(str::to_string).collect(),
            }] }),
        };
        let report = validate(ValidationInputs { collection: &collection, lookup: Some(&lookup), app: &app });
        // collection/lookup/districts agree; roster differs from each on 24 + 1 names
        assert_eq!(report.source_diffs.len(), 6);
        assert_eq!(report.issue_count(), 3 * 25);
        assert!(!report.is_clean());
    }

    #[test]
    fn report_serializes_regions_as_strings() {
        let mut collection = statewide();
        collection.features.retain(|f| f.name() != Some("School 6D"));
        let app = AppConfig::default();
        let report = validate(ValidationInputs { collection: &collection, lookup: None, app: &app });
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["missing_regions"], json!(["Region 6D"]));
        assert_eq!(value["by_class"]["6"], json!(3));
    }

    #[test]
    fn regions_without_class_fail() {
        let mut collection = statewide();
        for f in &mut collection.features {
            f.properties.remove("class");
        }
        let lookup = build_lookup(&collection);
        let app = AppConfig::default();
        let report = validate(ValidationInputs { collection: &collection, lookup: Some(&lookup), app: &app });
        assert_eq!(report.class_region_mismatches.len(), 24);
        assert!(report.class_region_mismatches.iter().all(|m| m.kind == MismatchKind::Incomplete));
        assert!(!report.is_clean());
    }

    #[test]
    fn absent_lookup_is_an_issue() {
        let collection = statewide();
        let app = AppConfig::default();
        let report = validate(ValidationInputs { collection: &collection, lookup: None, app: &app });
        assert_eq!(report.missing_artifacts, [NameSource::Lookup]);
        assert_eq!(report.unavailable, [NameSource::Roster, NameSource::DistrictRoster]);
        assert_eq!(report.issue_count(), 1);
        assert!(!report.is_clean());
    }
}
