//! Replacement application config built from the reconciled collection.
//!
//! Proposals are written beside the live documents as `*_updated.json`;
//! the live files are never touched.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use anyhow::Result;
use serde::Serialize;
use tracing::{info, warn};

use crate::common::{write_json_atomic, JsonStyle};
use crate::config::{Layout, CLASS_TREE_FILE, DISTRICT_ROSTER_FILE, ROSTER_FILE};
use crate::region::parse_region;
use crate::types::{
    ClassEntry, ClassNum, ClassTree, Coordinates, DistrictEntry, DistrictRoster, FeatureCollection,
    RegionEntry, RegionId, RosterSchool, SchoolRoster, PROP_CLASS, PROP_REGION, PROP_SIZE,
};
use crate::validate::UNKNOWN;

#[derive(Debug, Clone, Default)]
pub struct Proposal {
    pub roster: SchoolRoster,
    pub classes: ClassTree,
    pub districts: DistrictRoster,
    /// Named schools left out of the roster for lack of coordinates.
    pub skipped: Vec<String>,
}

/// Paths a proposal was written to.
#[derive(Debug, Clone, Serialize)]
pub struct ProposalFiles {
    pub roster: PathBuf,
    pub classes: PathBuf,
    pub districts: PathBuf,
}

pub fn build_proposal(collection: &FeatureCollection) -> Proposal {
    let mut proposal = Proposal::default();
    let mut regions: BTreeMap<ClassNum, BTreeSet<RegionId>> = BTreeMap::new();
    let mut districts: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for feature in &collection.features {
        let Some(name) = feature.name() else { continue };
        let Some(point) = feature.coordinates() else {
            warn!("{name:?} has no coordinates; left out of the roster");
            proposal.skipped.push(name.to_string());
            continue;
        };

        let region = feature.prop_str(PROP_REGION).unwrap_or_default();
        let district = feature.district().unwrap_or(UNKNOWN);

        if let Some(id) = parse_region(region).ok().and_then(|p| p.full()) {
            regions.entry(id.class).or_default().insert(id);
        }
        districts.entry(district.to_string()).or_default().push(name.to_string());

        proposal.roster.schools.push(RosterSchool {
            name: name.to_string(),
            coordinates: Some(Coordinates { lng: point.x(), lat: point.y() }),
            address: Some(format!("{name}, Virginia")),
            class: class_digit(feature.prop_str(PROP_SIZE), feature.prop_str(PROP_CLASS)),
            region: region.to_string(),
            district: district.to_string(),
            synthetic: false,
            extra: Default::default(),
        });
    }

    proposal.classes.classes = regions.into_iter()
        .map(|(class, ids)| ClassEntry {
            id: class.config_id(),
            name: class.label(),
            regions: ids.into_iter().map(|r| RegionEntry { id: r.config_id(), name: r.to_string() }).collect(),
        })
        .collect();

    proposal.districts.districts = districts.into_iter()
        .filter(|(name, _)| name != UNKNOWN)
        .map(|(name, schools)| DistrictEntry { id: district_id(&name), name, schools })
        .collect();

    proposal
}

/// Class digit from `size`, falling back to a `"Class N"` label.
fn class_digit(size: Option<&str>, class: Option<&str>) -> String {
    size.and_then(|s| ClassNum::parse(s).ok())
        .or_else(|| class.and_then(|c| ClassNum::parse(c).ok()))
        .map(ClassNum::size)
        .unwrap_or_default()
}

/// `"Bull Run"` -> `"bull_run"`.
pub fn district_id(name: &str) -> String {
    name.to_lowercase().replace(' ', "_")
}

pub fn write_proposal(proposal: &Proposal, layout: &Layout) -> Result<ProposalFiles> {
    let files = ProposalFiles {
        roster: layout.proposed(ROSTER_FILE),
        classes: layout.proposed(CLASS_TREE_FILE),
        districts: layout.proposed(DISTRICT_ROSTER_FILE),
    };
    write_json_atomic(&files.roster, &proposal.roster, JsonStyle::Pretty)?;
    write_json_atomic(&files.classes, &proposal.classes, JsonStyle::Pretty)?;
    write_json_atomic(&files.districts, &proposal.districts, JsonStyle::Pretty)?;
    info!(
        "proposed {} schools, {} classes, {} districts",
        proposal.roster.schools.len(), proposal.classes.classes.len(), proposal.districts.districts.len(),
    );
    Ok(files)
}
