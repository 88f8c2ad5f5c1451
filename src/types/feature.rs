use geo::Point;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::region::{parse_region, ParsedRegion};
use crate::types::{RegionId, RegionLetter};

pub const PROP_NAME: &str = "name";
pub const PROP_CLASS: &str = "class";
pub const PROP_SIZE: &str = "size";
pub const PROP_REGION: &str = "region";
pub const PROP_DISTRICT: &str = "district";
/// Provenance stamped by the merge: the region file a feature was read from.
pub const PROP_SOURCE_FILE: &str = "source_file";
/// Older outputs carried provenance under this key.
const PROP_SOURCE_FILE_LEGACY: &str = "_source_file";

/// One school point record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(rename = "type", default = "feature_type")]
    pub kind: String,
    #[serde(default)]
    pub geometry: Value,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub properties: Map<String, Value>,
    /// Other members such as `bbox`, carried through unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn feature_type() -> String { "Feature".into() }

fn collection_type() -> String { "FeatureCollection".into() }

fn null_as_empty<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Map<String, Value>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Feature {
    /// A point feature with the given properties (mostly for tests and fixtures).
    pub fn point(lng: f64, lat: f64, properties: Map<String, Value>) -> Self {
        Self {
            id: None,
            kind: feature_type(),
            geometry: serde_json::json!({ "type": "Point", "coordinates": [lng, lat] }),
            properties,
            extra: Map::new(),
        }
    }

    /// String property value; non-string values read as absent.
    pub fn prop_str(&self, key: &str) -> Option<&str> {
        self.properties.get(key).and_then(Value::as_str)
    }

    /// String property value, or `None` when absent or blank.
    pub fn prop_nonempty(&self, key: &str) -> Option<&str> {
        self.prop_str(key).filter(|s| !s.trim().is_empty())
    }

    pub fn name(&self) -> Option<&str> { self.prop_nonempty(PROP_NAME) }

    pub fn district(&self) -> Option<&str> { self.prop_nonempty(PROP_DISTRICT) }

    pub fn set_prop(&mut self, key: &str, value: impl Into<Value>) {
        self.properties.insert(key.to_string(), value.into());
    }

    /// File name the feature was merged from, if recorded.
    pub fn source_file(&self) -> Option<&str> {
        self.prop_nonempty(PROP_SOURCE_FILE)
            .or_else(|| self.prop_nonempty(PROP_SOURCE_FILE_LEGACY))
    }

    /// `[longitude, latitude]` of the geometry; `None` when missing or short.
    pub fn coordinates(&self) -> Option<Point<f64>> {
        let coords = self.geometry.get("coordinates")?.as_array()?;
        if coords.len() < 2 {
            return None;
        }
        Some(Point::new(coords[0].as_f64()?, coords[1].as_f64()?))
    }

    /// The region this feature is attributed to, when `region`, `class` and
    /// `size` are all present and agree with each other.
    pub fn consistent_region(&self) -> Option<RegionId> {
        let region = parse_region(self.prop_str(PROP_REGION)?).ok()?.full()?;
        (self.prop_str(PROP_CLASS) == Some(region.class.label().as_str())
            && self.prop_str(PROP_SIZE) == Some(region.class.size().as_str()))
            .then_some(region)
    }

    /// Letter of a malformed `"Region {letter}"` value.
    pub fn region_letter_only(&self) -> Option<RegionLetter> {
        match parse_region(self.prop_str(PROP_REGION)?) {
            Ok(ParsedRegion::LetterOnly(letter)) => Some(letter),
            _ => None,
        }
    }

    /// Sets `class`, `size` and `region` together. Returns true if anything changed.
    pub fn apply_region(&mut self, region: RegionId) -> bool {
        let wanted = [
            (PROP_CLASS, region.class.label()),
            (PROP_SIZE, region.class.size()),
            (PROP_REGION, region.to_string()),
        ];
        let mut changed = false;
        for (key, value) in wanted {
            if self.prop_str(key) != Some(value.as_str()) {
                self.set_prop(key, value);
                changed = true;
            }
        }
        changed
    }

    /// Current `(class, size, region)` values, for before/after reporting.
    pub fn attribution(&self) -> Attribution {
        Attribution {
            class: self.prop_str(PROP_CLASS).map(str::to_string),
            size: self.prop_str(PROP_SIZE).map(str::to_string),
            region: self.prop_str(PROP_REGION).map(str::to_string),
        }
    }
}

/// Snapshot of the three class-related properties of a feature.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Attribution {
    pub class: Option<String>,
    pub size: Option<String>,
    pub region: Option<String>,
}

/// A GeoJSON FeatureCollection of schools. `features` is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type", default = "collection_type")]
    pub kind: String,
    pub features: Vec<Feature>,
    /// Foreign members (`name`, `crs`, `bbox`, ...), written back as read.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for FeatureCollection {
    fn default() -> Self { Self::new(Vec::new()) }
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        Self { kind: collection_type(), features, extra: Map::new() }
    }

    #[inline] pub fn len(&self) -> usize { self.features.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.features.is_empty() }

    /// Non-empty school names, in feature order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.features.iter().filter_map(Feature::name)
    }
}
