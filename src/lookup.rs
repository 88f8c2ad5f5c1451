//! Name-keyed lookup table projected from the merged collection.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{FeatureCollection, PROP_CLASS, PROP_DISTRICT, PROP_REGION, PROP_SIZE};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupEntry {
    pub name: String,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub class: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub district: String,
}

/// `school_lookup.json`: school name → entry.
pub type LookupTable = BTreeMap<String, LookupEntry>;

/// Copy each named feature's current values into the table. No inference:
/// absent properties become empty strings.
pub fn build_lookup(collection: &FeatureCollection) -> LookupTable {
    collection.features.iter()
        .filter_map(|f| {
            let name = f.name()?;
            let get = |key| f.prop_str(key).unwrap_or_default().to_string();
            Some((name.to_string(), LookupEntry {
                name: name.to_string(),
                size: get(PROP_SIZE),
                class: get(PROP_CLASS),
                region: get(PROP_REGION),
                district: get(PROP_DISTRICT),
            }))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use serde_json::json;

    #[test]
    fn keys_match_collection_names() {
        let collection: FeatureCollection = serde_json::from_value(json!({ "features": [
            { "properties": { "name": "Alpha High", "class": "Class 1", "size": "1", "region": "Region 1A", "district": "Dist1" } },
            { "properties": { "name": "Beta High", "region": "Region B" } },
            { "properties": { "name": "" } },
            { "properties": {} },
        ]})).unwrap();

        let lookup = build_lookup(&collection);
        let keys: BTreeSet<&str> = lookup.keys().map(String::as_str).collect();
        let names: BTreeSet<&str> = collection.names().collect();
        assert_eq!(keys, names);

        assert_eq!(lookup["Alpha High"], LookupEntry {
            name: "Alpha High".into(), size: "1".into(), class: "Class 1".into(),
            region: "Region 1A".into(), district: "Dist1".into(),
        });
        // no inference from the malformed region
        assert_eq!(lookup["Beta High"].class, "");
        assert_eq!(lookup["Beta High"].region, "Region B");
    }
}
