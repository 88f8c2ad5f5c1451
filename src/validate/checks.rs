use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::region::parse_region;
use crate::types::{FeatureCollection, RegionId, PROP_CLASS, PROP_DISTRICT, PROP_REGION, PROP_SIZE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MismatchKind {
    /// `region` is present but not `"Region {digit}{letter}"`.
    InvalidRegion,
    /// `class` or `size` disagrees with the region's digit.
    ClassDisagrees,
    /// `region` is well-formed but `class` or `size` is absent or blank.
    Incomplete,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassRegionMismatch {
    pub name: String,
    pub kind: MismatchKind,
    pub region: String,
    pub class: Option<String>,
    pub size: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingProperty {
    pub name: String,
    pub property: &'static str,
}

/// Per-class, per-region and per-district school counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Tallies {
    /// Keyed by `size`; "Unknown" when absent.
    pub by_class: BTreeMap<String, usize>,
    pub by_region: BTreeMap<String, usize>,
    pub by_district: BTreeMap<String, usize>,
}

pub const UNKNOWN: &str = "Unknown";

pub fn tallies(collection: &FeatureCollection) -> Tallies {
    let mut t = Tallies::default();
    for f in &collection.features {
        let key = |k| f.prop_nonempty(k).unwrap_or(UNKNOWN).to_string();
        *t.by_class.entry(key(PROP_SIZE)).or_default() += 1;
        *t.by_region.entry(key(PROP_REGION)).or_default() += 1;
        *t.by_district.entry(key(PROP_DISTRICT)).or_default() += 1;
    }
    t
}

/// One entry per school whose region digit disagrees with its class or size,
/// or whose region is set without both of them. Features without a region are
/// left to [`missing_properties`].
pub fn class_region_mismatches(collection: &FeatureCollection) -> Vec<ClassRegionMismatch> {
    let mut out = Vec::new();
    for f in &collection.features {
        let Some(region) = f.prop_nonempty(PROP_REGION) else { continue };
        let class = f.prop_nonempty(PROP_CLASS);
        let size = f.prop_nonempty(PROP_SIZE);

        let kind = match parse_region(region).ok().and_then(|p| p.full()) {
            None => Some(MismatchKind::InvalidRegion),
            Some(id) => match (class, size) {
                (Some(c), Some(s)) if c == id.class.label() && s == id.class.size() => None,
                (Some(c), _) if c != id.class.label() => Some(MismatchKind::ClassDisagrees),
                (_, Some(s)) if s != id.class.size() => Some(MismatchKind::ClassDisagrees),
                _ => Some(MismatchKind::Incomplete),
            },
        };

        if let Some(kind) = kind {
            out.push(ClassRegionMismatch {
                name: f.name().unwrap_or_default().to_string(),
                kind,
                region: region.to_string(),
                class: class.map(str::to_string),
                size: size.map(str::to_string),
            });
        }
    }
    out
}

/// Statewide regions that no school's `region` names.
pub fn missing_regions(collection: &FeatureCollection) -> Vec<RegionId> {
    let present: BTreeSet<RegionId> = collection.features.iter()
        .filter_map(|f| f.prop_str(PROP_REGION))
        .filter_map(|r| parse_region(r).ok()?.full())
        .collect();
    RegionId::all().into_iter().filter(|r| !present.contains(r)).collect()
}

/// Every absent or blank `name`, `size`, `region` or `district`, one entry each.
pub fn missing_properties(collection: &FeatureCollection) -> Vec<MissingProperty> {
    let mut out = Vec::new();
    for (idx, f) in collection.features.iter().enumerate() {
        let Some(name) = f.name() else {
            out.push(MissingProperty { name: format!("<feature #{idx}>"), property: "name" });
            continue;
        };
        for property in [PROP_SIZE, PROP_REGION, PROP_DISTRICT] {
            if f.prop_nonempty(property).is_none() {
                out.push(MissingProperty { name: name.to_string(), property });
            }
        }
    }
    out
}

/// Names carried by more than one feature, sorted.
pub fn duplicate_names(collection: &FeatureCollection) -> Vec<String> {
    let mut seen = BTreeSet::new();
    let mut dups = BTreeSet::new();
    for name in collection.names() {
        if !seen.insert(name) {
            dups.insert(name.to_string());
        }
    }
    dups.into_iter().collect()
}
