use crate::geometry::Feature;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

/// Address fragments of a result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Address {
    pub region: Value,
    pub state: Value,
}

/// One rendered search result, shaped like a Nominatim place.
///
/// `place_id`, `osm_type`, `licence` and `osm_id` have no meaning for local
/// datasets and are always null.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureStoreEntry {
    pub display_name: Value,
    pub class: Value,
    #[serde(rename = "type")]
    pub kind: Value,
    pub importance: f64,
    pub icon: Option<String>,
    pub address: Address,
    pub lon: f64,
    pub lat: f64,
    /// `[south, north, west, east]`
    pub boundingbox: [f64; 4],
    pub place_id: Option<String>,
    pub osm_type: Option<String>,
    pub licence: Option<String>,
    pub osm_id: Option<String>,
    /// The source feature, kept only for interfaces in debug mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feature: Option<Feature>,
}

/// Read-only mapping from reference to rendered entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureStore {
    pub(crate) entries: HashMap<String, FeatureStoreEntry>,
}

impl FeatureStore {
    pub fn get(&self, reference: &str) -> Option<&FeatureStoreEntry> {
        self.entries.get(reference)
    }

    pub fn contains(&self, reference: &str) -> bool {
        self.entries.contains_key(reference)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
