//! Where every artifact lives.

use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::warn;

use crate::common::read_json_file_if_exists;
use crate::types::AppConfig;

pub const DEFAULT_REGIONS_DIR: &str = "data/geojson/schools_by_region";
pub const DEFAULT_OUT_DIR: &str = "dist/data/geojson";
pub const DEFAULT_APP_DIR: &str = "data";

pub const ALL_SCHOOLS_FILE: &str = "all_schools.geojson";
pub const LOOKUP_FILE: &str = "school_lookup.json";
pub const ROSTER_FILE: &str = "va_schools_geocodes.json";
pub const CLASS_TREE_FILE: &str = "vhsl_classes_regions.json";
pub const DISTRICT_ROSTER_FILE: &str = "vhsl_districts.json";

/// The artifact file set for one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub regions_dir: PathBuf,
    pub out_dir: PathBuf,
    pub app_dir: PathBuf,
}

impl Default for Layout {
    fn default() -> Self {
        Self::new(DEFAULT_REGIONS_DIR, DEFAULT_OUT_DIR, DEFAULT_APP_DIR)
    }
}

impl Layout {
    pub fn new(regions_dir: impl Into<PathBuf>, out_dir: impl Into<PathBuf>, app_dir: impl Into<PathBuf>) -> Self {
        Self { regions_dir: regions_dir.into(), out_dir: out_dir.into(), app_dir: app_dir.into() }
    }

    #[inline] pub fn all_schools(&self) -> PathBuf { self.out_dir.join(ALL_SCHOOLS_FILE) }

    #[inline] pub fn lookup(&self) -> PathBuf { self.out_dir.join(LOOKUP_FILE) }

    #[inline] pub fn roster(&self) -> PathBuf { self.app_dir.join(ROSTER_FILE) }

    #[inline] pub fn class_tree(&self) -> PathBuf { self.app_dir.join(CLASS_TREE_FILE) }

    #[inline] pub fn district_roster(&self) -> PathBuf { self.app_dir.join(DISTRICT_ROSTER_FILE) }

    /// Proposal path beside a live config file: `foo.json` -> `foo_updated.json`.
    pub fn proposed(&self, live_file: &str) -> PathBuf {
        let stem = Path::new(live_file).file_stem().and_then(|s| s.to_str()).unwrap_or(live_file);
        self.app_dir.join(format!("{stem}_updated.json"))
    }

    /// Load whichever application config documents exist. A missing file is a
    /// warning; a present but unparseable one is an error.
    pub fn load_app_config(&self) -> Result<AppConfig> {
        Ok(AppConfig {
            roster: load_optional(&self.roster())?,
            classes: load_optional(&self.class_tree())?,
            districts: load_optional(&self.district_roster())?,
        })
    }
}

fn load_optional<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let doc = read_json_file_if_exists(path)?;
    if doc.is_none() {
        warn!("{} not found; its checks are skipped", path.display());
    }
    Ok(doc)
}
