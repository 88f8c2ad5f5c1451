//! Resolver strategies for a feature's class, size and region.
//!
//! Each strategy is a pure function of the feature and the evidence around it;
//! the reconciler tries them in [`STRATEGIES`] order and stops at the first hit.

use super::known::KnownMapping;
use crate::region::{parse_region, parse_region_file};
use crate::types::{ClassNum, Feature, RegionId, PROP_REGION, PROP_SIZE};

/// What a strategy may consult besides the feature's own attributes.
#[derive(Debug, Clone, Copy)]
pub struct Evidence<'a> {
    /// Source file the feature was merged from.
    pub provenance: Option<&'a str>,
    pub known: &'a KnownMapping,
}

impl<'a> Evidence<'a> {
    pub fn for_feature(feature: &'a Feature, known: &'a KnownMapping) -> Self {
        Self { provenance: feature.source_file(), known }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// `region` well-formed and `class`/`size` agree: nothing to do.
    Consistent,
    /// Class and letter encoded in the provenance file name.
    Provenance,
    /// Well-formed `region`, with `class`/`size` missing or disagreeing.
    RegionString,
    /// Malformed `"Region {letter}"` and the school is in the known mapping.
    KnownMapping,
    /// Malformed `"Region {letter}"` with a usable `size` digit.
    LetterWithSize,
}

impl Strategy {
    pub fn name(self) -> &'static str {
        match self {
            Strategy::Consistent => "consistent",
            Strategy::Provenance => "provenance",
            Strategy::RegionString => "region-string",
            Strategy::KnownMapping => "known-mapping",
            Strategy::LetterWithSize => "letter-with-size",
        }
    }
}

pub type Resolver = fn(&Feature, &Evidence<'_>) -> Option<RegionId>;

pub const STRATEGIES: [(Strategy, Resolver); 5] = [
    (Strategy::Consistent, resolve_consistent),
    (Strategy::Provenance, resolve_provenance),
    (Strategy::RegionString, resolve_region_string),
    (Strategy::KnownMapping, resolve_known_mapping),
    (Strategy::LetterWithSize, resolve_letter_with_size),
];

pub fn resolve_consistent(feature: &Feature, _: &Evidence<'_>) -> Option<RegionId> {
    feature.consistent_region()
}

pub fn resolve_provenance(_: &Feature, evidence: &Evidence<'_>) -> Option<RegionId> {
    parse_region_file(evidence.provenance?).ok()
}

pub fn resolve_region_string(feature: &Feature, _: &Evidence<'_>) -> Option<RegionId> {
    parse_region(feature.prop_str(PROP_REGION)?).ok()?.full()
}

pub fn resolve_known_mapping(feature: &Feature, evidence: &Evidence<'_>) -> Option<RegionId> {
    feature.region_letter_only()?;
    evidence.known.get(feature.name()?)
}

pub fn resolve_letter_with_size(feature: &Feature, _: &Evidence<'_>) -> Option<RegionId> {
    let letter = feature.region_letter_only()?;
    let class = ClassNum::parse(feature.prop_str(PROP_SIZE)?).ok()?;
    Some(RegionId::new(class, letter))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn feature(props: Value) -> Feature {
        serde_json::from_value(json!({ "type": "Feature", "geometry": null, "properties": props })).unwrap()
    }

    fn region(s: &str) -> RegionId { s.parse().unwrap() }

    #[test]
    fn consistent_needs_agreement() {
        let known = KnownMapping::default();
        let good = feature(json!({ "name": "A", "region": "Region 2D", "class": "Class 2", "size": "2" }));
        let bad = feature(json!({ "name": "A", "region": "Region 2D", "class": "Class 3", "size": "3" }));
        assert_eq!(resolve_consistent(&good, &Evidence::for_feature(&good, &known)), Some(region("Region 2D")));
        assert_eq!(resolve_consistent(&bad, &Evidence::for_feature(&bad, &known)), None);
    }

    #[test]
    fn provenance_reads_either_file_spelling() {
        let known = KnownMapping::default();
        for file in ["Region_5A.geojson", "Region 5A.geojson"] {
            let f = feature(json!({ "name": "A", "source_file": file }));
            assert_eq!(resolve_provenance(&f, &Evidence::for_feature(&f, &known)), Some(region("Region 5A")));
        }
        let f = feature(json!({ "name": "A", "source_file": "misc.geojson" }));
        assert_eq!(resolve_provenance(&f, &Evidence::for_feature(&f, &known)), None);
    }

    #[test]
    fn region_string_ignores_malformed() {
        let known = KnownMapping::default();
        let f = feature(json!({ "name": "A", "region": "Region C" }));
        assert_eq!(resolve_region_string(&f, &Evidence::for_feature(&f, &known)), None);
        let f = feature(json!({ "name": "A", "region": "Region 6C", "class": "Class 1" }));
        assert_eq!(resolve_region_string(&f, &Evidence::for_feature(&f, &known)), Some(region("Region 6C")));
    }

    #[test]
    fn known_mapping_only_for_letter_only_regions() {
        let mut known = KnownMapping::default();
        known.insert("A", region("Region 3C"));
        let malformed = feature(json!({ "name": "A", "region": "Region C" }));
        let missing = feature(json!({ "name": "A" }));
        assert_eq!(resolve_known_mapping(&malformed, &Evidence::for_feature(&malformed, &known)), Some(region("Region 3C")));
        assert_eq!(resolve_known_mapping(&missing, &Evidence::for_feature(&missing, &known)), None);
    }

    #[test]
    fn letter_with_size_combines_both() {
        let known = KnownMapping::default();
        let f = feature(json!({ "name": "A", "region": "Region B", "size": "4" }));
        assert_eq!(resolve_letter_with_size(&f, &Evidence::for_feature(&f, &known)), Some(region("Region 4B")));
        let f = feature(json!({ "name": "A", "region": "Region B", "size": "9" }));
        assert_eq!(resolve_letter_with_size(&f, &Evidence::for_feature(&f, &known)), None);
    }
}
