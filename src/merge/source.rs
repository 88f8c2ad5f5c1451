use std::collections::BTreeSet;
use std::path::Path;

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, warn};

use crate::common::{file_name_of, list_geojson_files, read_json_file};
use crate::region::parse_region_file;
use crate::types::{FeatureCollection, RegionId};

/// One per-region input file, already parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionSource {
    /// File name (no directory), e.g. "Region 3B.geojson".
    pub file_name: String,
    pub collection: FeatureCollection,
}

impl RegionSource {
    pub fn new(file_name: impl Into<String>, collection: FeatureCollection) -> Self {
        Self { file_name: file_name.into(), collection }
    }

    /// Region encoded in the file name, if it has one.
    pub fn region(&self) -> Option<RegionId> {
        parse_region_file(&self.file_name).ok()
    }
}

/// An input file that could not be used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    pub file: String,
    pub reason: String,
}

/// Everything read from a regions directory.
#[derive(Debug, Clone, Default)]
pub struct LoadedSources {
    pub sources: Vec<RegionSource>,
    pub skipped: Vec<SkippedFile>,
    /// Expected `Region {1-6}{A-D}` files with no readable counterpart.
    pub missing_regions: Vec<RegionId>,
}

/// Read a single region file. Fails on unreadable or invalid JSON and on a
/// document without `features`.
pub fn load_region_file(path: &Path) -> Result<RegionSource> {
    let collection: FeatureCollection = read_json_file(path)?;
    Ok(RegionSource::new(file_name_of(path), collection))
}

/// Read every `*.geojson` file in `dir` in file-name order. Bad files are
/// logged and skipped, never fatal; only an unreadable directory is.
pub fn load_region_sources(dir: &Path) -> Result<LoadedSources> {
    let mut loaded = LoadedSources::default();

    for path in list_geojson_files(dir)? {
        match load_region_file(&path) {
            Ok(source) => {
                debug!(file = %source.file_name, features = source.collection.len(), "loaded region file");
                loaded.sources.push(source);
            }
            Err(e) => {
                warn!("skipping {}: {e:#}", path.display());
                loaded.skipped.push(SkippedFile { file: file_name_of(&path), reason: format!("{e:#}") });
            }
        }
    }

    loaded.missing_regions = missing_regions(&loaded.sources);
    for region in &loaded.missing_regions {
        warn!("no region file for {region}");
    }
    Ok(loaded)
}

/// Statewide regions not covered by any source file name.
pub fn missing_regions(sources: &[RegionSource]) -> Vec<RegionId> {
    let present: BTreeSet<RegionId> = sources.iter().filter_map(RegionSource::region).collect();
    RegionId::all().into_iter().filter(|r| !present.contains(r)).collect()
}
