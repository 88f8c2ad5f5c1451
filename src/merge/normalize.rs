use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::types::{Feature, PROP_SOURCE_FILE};

/// A feature rejected for lacking a usable `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DroppedFeature {
    pub file: String,
    /// Position of the feature within its file.
    pub index: usize,
}

/// Validates features and hands out run-scoped ids, starting at 1.
#[derive(Debug)]
pub struct Normalizer {
    next_id: u64,
    dropped: Vec<DroppedFeature>,
}

impl Default for Normalizer {
    fn default() -> Self { Self::new() }
}

impl Normalizer {
    pub fn new() -> Self { Self { next_id: 1, dropped: Vec::new() } }

    /// The feature's name, or `None` after recording it as dropped.
    pub fn check<'f>(&mut self, feature: &'f Feature, file: &str, index: usize) -> Option<&'f str> {
        let name = feature.name();
        if name.is_none() {
            warn!("{file}: feature #{index} has no name, dropped");
            self.dropped.push(DroppedFeature { file: file.to_string(), index });
        }
        name
    }

    /// Stamp the next id and the provenance onto an admitted feature.
    pub fn admit(&mut self, mut feature: Feature, file: &str) -> Feature {
        feature.id = Some(Value::from(self.next_id));
        self.next_id += 1;
        if feature.source_file().is_none() {
            feature.set_prop(PROP_SOURCE_FILE, file);
        }
        feature
    }

    pub fn into_dropped(self) -> Vec<DroppedFeature> { self.dropped }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map};

    fn named(name: Value) -> Feature {
        let mut props = Map::new();
        props.insert("name".into(), name);
        Feature::point(-78.0, 38.0, props)
    }

    #[test]
    fn ids_are_sequential_from_one() {
        let mut n = Normalizer::new();
        let a = n.admit(named(json!("A")), "Region 1A.geojson");
        let b = n.admit(named(json!("B")), "Region 1A.geojson");
        assert_eq!(a.id, Some(json!(1)));
        assert_eq!(b.id, Some(json!(2)));
        assert_eq!(a.source_file(), Some("Region 1A.geojson"));
    }

    #[test]
    fn nameless_features_are_counted() {
        let mut n = Normalizer::new();
        assert_eq!(n.check(&named(json!("")), "f.geojson", 0), None);
        assert_eq!(n.check(&named(json!(null)), "f.geojson", 1), None);
        assert_eq!(n.check(&named(json!("Ok")), "f.geojson", 2), Some("Ok"));
        assert_eq!(n.into_dropped().len(), 2);
    }

    #[test]
    fn existing_provenance_is_kept() {
        let mut n = Normalizer::new();
        let mut f = named(json!("A"));
        f.set_prop("_source_file", "Region_2B.geojson");
        let f = n.admit(f, "Region 3C.geojson");
        assert_eq!(f.source_file(), Some("Region_2B.geojson"));
    }
}
