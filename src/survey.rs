//! Inventory of the raw region files, before any dedup or repair.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::merge::{LoadedSources, SkippedFile};
use crate::types::RegionId;
use crate::validate::UNKNOWN;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Count {
    pub raw: usize,
    pub unique: usize,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Survey {
    pub files: usize,
    pub skipped: Vec<SkippedFile>,
    pub total_features: usize,
    pub unique_names: usize,
    /// Keyed by the class encoded in the file name.
    pub by_class: BTreeMap<String, Count>,
    /// Keyed by the region encoded in the file name.
    pub by_region: BTreeMap<String, Count>,
    pub by_district: BTreeMap<String, Count>,
    #[serde(serialize_with = "crate::report::serialize_display_seq")]
    pub missing_regions: Vec<RegionId>,
    /// Names found in more than one file, with the files in read order.
    pub multi_file_names: BTreeMap<String, Vec<String>>,
}

#[derive(Default)]
struct Bucket {
    raw: usize,
    names: BTreeSet<String>,
}

fn counts(buckets: BTreeMap<String, Bucket>) -> BTreeMap<String, Count> {
    buckets.into_iter().map(|(k, b)| (k, Count { raw: b.raw, unique: b.names.len() })).collect()
}

pub fn survey(loaded: &LoadedSources) -> Survey {
    let mut names: BTreeSet<&str> = BTreeSet::new();
    let mut by_class: BTreeMap<String, Bucket> = BTreeMap::new();
    let mut by_region: BTreeMap<String, Bucket> = BTreeMap::new();
    let mut by_district: BTreeMap<String, Bucket> = BTreeMap::new();
    let mut files_by_name: BTreeMap<String, Vec<String>> = BTreeMap::new();
    let mut total_features = 0;

    for source in &loaded.sources {
        let region = source.region();
        let class_key = region.map_or_else(|| UNKNOWN.to_string(), |r| r.class.label());
        let region_key = region.map_or_else(|| UNKNOWN.to_string(), |r| r.to_string());

        for feature in &source.collection.features {
            total_features += 1;
            let Some(name) = feature.name() else { continue };
            names.insert(name);

            let district_key = feature.district().unwrap_or(UNKNOWN).to_string();
            for (map, key) in [(&mut by_class, &class_key), (&mut by_region, &region_key), (&mut by_district, &district_key)] {
                let bucket = map.entry(key.clone()).or_default();
                bucket.raw += 1;
                bucket.names.insert(name.to_string());
            }

            let files = files_by_name.entry(name.to_string()).or_default();
            if !files.contains(&source.file_name) {
                files.push(source.file_name.clone());
            }
        }
    }

    files_by_name.retain(|_, files| files.len() > 1);

    Survey {
        files: loaded.sources.len(),
        skipped: loaded.skipped.clone(),
        total_features,
        unique_names: names.len(),
        by_class: counts(by_class),
        by_region: counts(by_region),
        by_district: counts(by_district),
        missing_regions: loaded.missing_regions.clone(),
        multi_file_names: files_by_name,
    }
}
