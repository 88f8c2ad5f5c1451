use std::fmt;

use serde::Serialize;

use crate::region::parse_region;
use crate::types::{ClassNum, ClassTree, RegionId, RegionLetter, SchoolRoster};

/// A problem in the application config documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConfigIssue {
    MissingClass { class: String },
    MissingRegion { class: String, region: String },
    RosterMissingProperty { name: String, property: &'static str },
    RosterClassMismatch { name: String, class: String, region: String },
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigIssue::MissingClass { class } => write!(f, "class tree has no entry for {class}"),
            ConfigIssue::MissingRegion { class, region } => write!(f, "{class} is missing {region}"),
            ConfigIssue::RosterMissingProperty { name, property } => {
                write!(f, "roster school {name:?} has no {property}")
            }
            ConfigIssue::RosterClassMismatch { name, class, region } => {
                write!(f, "roster school {name:?} has class {class:?} but region {region:?}")
            }
        }
    }
}

/// Classes 1 to 6 must each be present with their four regions. Entries match
/// on either id (`class3`, `region3B`) or display name.
pub fn check_class_tree(tree: &ClassTree) -> Vec<ConfigIssue> {
    let mut issues = Vec::new();
    for class in ClassNum::all() {
        let Some(entry) = tree.classes.iter().find(|c| c.id == class.config_id() || c.name == class.label()) else {
            issues.push(ConfigIssue::MissingClass { class: class.label() });
            continue;
        };
        for letter in RegionLetter::ALL {
            let region = RegionId::new(class, letter);
            let name = region.to_string();
            if !entry.regions.iter().any(|r| r.id == region.config_id() || r.name == name) {
                issues.push(ConfigIssue::MissingRegion { class: class.label(), region: name });
            }
        }
    }
    issues
}

/// Every roster school needs class, region and district, and its class must
/// match its region's digit.
pub fn check_roster(roster: &SchoolRoster) -> Vec<ConfigIssue> {
    let mut issues = Vec::new();
    for school in &roster.schools {
        let fields = [("class", &school.class), ("region", &school.region), ("district", &school.district)];
        for (property, value) in fields {
            if value.trim().is_empty() {
                issues.push(ConfigIssue::RosterMissingProperty { name: school.name.clone(), property });
            }
        }

        let region = parse_region(&school.region).ok().and_then(|p| p.full());
        let class = ClassNum::parse(&school.class).ok();
        if let (Some(region), Some(class)) = (region, class) {
            if region.class != class {
                issues.push(ConfigIssue::RosterClassMismatch {
                    name: school.name.clone(),
                    class: school.class.clone(),
                    region: school.region.clone(),
                });
            }
        }
    }
    issues
}
