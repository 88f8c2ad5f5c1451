use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, warn};

use crate::merge::RegionSource;
use crate::types::{Attribution, FeatureCollection, RegionId};

/// A school listed in more than one filename-encoded region file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MappingConflict {
    pub name: String,
    pub kept: String,
    pub ignored: String,
}

/// Name → region table built only from files whose names encode class and
/// letter. First file wins, matching the merge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnownMapping {
    entries: BTreeMap<String, RegionId>,
    conflicts: Vec<MappingConflict>,
}

impl KnownMapping {
    pub fn get(&self, name: &str) -> Option<RegionId> { self.entries.get(name).copied() }

    #[inline] pub fn len(&self) -> usize { self.entries.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn conflicts(&self) -> &[MappingConflict] { &self.conflicts }

    pub fn insert(&mut self, name: &str, region: RegionId) {
        match self.entries.get(name) {
            Some(&kept) if kept != region => {
                self.conflicts.push(MappingConflict {
                    name: name.to_string(),
                    kept: kept.to_string(),
                    ignored: region.to_string(),
                });
            }
            Some(_) => {}
            None => { self.entries.insert(name.to_string(), region); }
        }
    }
}

/// Pass 1: collect the authoritative region of every school from the region
/// files. Sources whose names don't encode a region contribute nothing.
pub fn extract_known_mapping(sources: &[RegionSource]) -> KnownMapping {
    let mut mapping = KnownMapping::default();
    for source in sources {
        let Some(region) = source.region() else {
            debug!("{}: no region in file name, not used for the mapping", source.file_name);
            continue;
        };
        for name in source.collection.names() {
            mapping.insert(name, region);
        }
    }
    for c in &mapping.conflicts {
        warn!("{:?} listed in both {} and {}; keeping {}", c.name, c.kept, c.ignored, c.kept);
    }
    mapping
}

/// A feature whose class, size and region were (re)written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Correction {
    pub name: String,
    pub strategy: &'static str,
    pub before: Attribution,
    /// Region written, e.g. "Region 3B".
    pub after: String,
}

/// Pass 2: overwrite class, size and region of every feature whose name is in
/// the mapping. Names absent from the mapping are left alone.
pub fn apply_known_mapping(collection: &mut FeatureCollection, mapping: &KnownMapping) -> Vec<Correction> {
    let mut corrections = Vec::new();
    for feature in &mut collection.features {
        let Some(name) = feature.name().map(str::to_string) else { continue };
        let Some(region) = mapping.get(&name) else { continue };
        let before = feature.attribution();
        if feature.apply_region(region) {
            corrections.push(Correction { name, strategy: "region-file", before, after: region.to_string() });
        }
    }
    corrections
}
