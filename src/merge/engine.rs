use ahash::AHashMap;
use serde::Serialize;
use tracing::{debug, info};

use super::normalize::{DroppedFeature, Normalizer};
use super::source::RegionSource;
use crate::types::FeatureCollection;

/// A later occurrence of an already-merged school name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateName {
    pub name: String,
    pub kept_from: String,
    pub dropped_from: String,
}

#[derive(Debug, Clone)]
pub struct MergeOutcome {
    pub collection: FeatureCollection,
    /// Features read across all sources, before validation and dedup.
    pub input_features: usize,
    pub dropped: Vec<DroppedFeature>,
    pub duplicates: Vec<DuplicateName>,
}

/// Union the features of `sources`, in order, keeping the first feature seen
/// for each name. Later features with the same name are discarded even when
/// their region or district differ.
pub fn merge_sources(sources: &[RegionSource]) -> MergeOutcome {
    let mut normalizer = Normalizer::new();
    let mut seen: AHashMap<String, usize> = AHashMap::new(); // name -> index of source it was kept from
    let mut features = Vec::new();
    let mut duplicates = Vec::new();
    let mut input_features = 0;

    for (src_idx, source) in sources.iter().enumerate() {
        let file = source.file_name.as_str();
        debug!("merging {file} ({} features)", source.collection.len());

        for (idx, feature) in source.collection.features.iter().enumerate() {
            input_features += 1;
            let Some(name) = normalizer.check(feature, file, idx) else { continue };

            if let Some(&kept) = seen.get(name) {
                debug!("{file}: duplicate {name:?} dropped (kept from {})", sources[kept].file_name);
                duplicates.push(DuplicateName {
                    name: name.to_string(),
                    kept_from: sources[kept].file_name.clone(),
                    dropped_from: file.to_string(),
                });
                continue;
            }

            seen.insert(name.to_string(), src_idx);
            features.push(normalizer.admit(feature.clone(), file));
        }
    }

    let dropped = normalizer.into_dropped();
    info!(
        "merged {} sources: {} features in, {} unique, {} duplicates, {} without name",
        sources.len(), input_features, features.len(), duplicates.len(), dropped.len(),
    );

    MergeOutcome {
        collection: FeatureCollection::new(features),
        input_features,
        dropped,
        duplicates,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn source(file: &str, features: Value) -> RegionSource {
        let collection = serde_json::from_value(json!({ "type": "FeatureCollection", "features": features })).unwrap();
        RegionSource::new(file, collection)
    }

    fn school(name: &str, district: &str) -> Value {
        json!({
            "type": "Feature",
            "geometry": { "type": "Point", "coordinates": [-77.1, 38.8] },
            "properties": { "name": name, "district": district }
        })
    }

    #[test]
    fn first_occurrence_wins() {
        let sources = [
            source("Region 1A.geojson", json!([school("Alpha High", "Dist1"), school("Beta High", "Dist1")])),
            source("Region 2A.geojson", json!([school("Alpha High", "Dist2"), school("Gamma High", "Dist3")])),
        ];
        let out = merge_sources(&sources);

        assert_eq!(out.input_features, 4);
        assert_eq!(out.collection.len(), 3);
        let alpha: Vec<_> = out.collection.features.iter().filter(|f| f.name() == Some("Alpha High")).collect();
        assert_eq!(alpha.len(), 1);
        assert_eq!(alpha[0].district(), Some("Dist1"));
        assert_eq!(alpha[0].source_file(), Some("Region 1A.geojson"));
        assert_eq!(out.duplicates, vec![DuplicateName {
            name: "Alpha High".into(),
            kept_from: "Region 1A.geojson".into(),
            dropped_from: "Region 2A.geojson".into(),
        }]);
    }

    #[test]
    fn duplicate_within_one_file_is_dropped() {
        let sources = [source("Region 1A.geojson", json!([school("Alpha High", "Dist1"), school("Alpha High", "Dist2")]))];
        let out = merge_sources(&sources);
        assert_eq!(out.collection.len(), 1);
        assert_eq!(out.collection.features[0].district(), Some("Dist1"));
        assert_eq!(out.duplicates.len(), 1);
    }

    #[test]
    fn ids_follow_merge_order_and_skip_dropped() {
        let sources = [
            source("Region 1A.geojson", json!([school("A", "d"), { "type": "Feature", "properties": {} }])),
            source("Region 1B.geojson", json!([school("A", "d"), school("B", "d")])),
        ];
        let out = merge_sources(&sources);
        let ids: Vec<_> = out.collection.features.iter().map(|f| f.id.clone().unwrap()).collect();
        assert_eq!(ids, [json!(1), json!(2)]);
        assert_eq!(out.dropped, vec![DroppedFeature { file: "Region 1A.geojson".into(), index: 1 }]);
    }

    #[test]
    fn output_never_exceeds_input() {
        let out = merge_sources(&[]);
        assert!(out.collection.is_empty());
        assert_eq!(out.input_features, 0);
    }
}
