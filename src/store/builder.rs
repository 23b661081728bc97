use super::template::render;
use super::types::{Address, FeatureStore, FeatureStoreEntry};
use crate::config::InterfaceDefinition;
use crate::geometry::{Attributes, Feature, FeatureCollection};
use serde_json::Value;
use std::collections::HashMap;

/// Attribute names holding externally supplied extents.
pub const EXTENT_ATTRIBUTES: [&str; 4] = ["minlat", "maxlat", "minlon", "maxlon"];

/// Builds the store for `collection`.
///
/// Entries are keyed by the feature reference; a later feature with the same
/// reference replaces the earlier entry. Features without a reference are
/// skipped, matching the index.
pub fn build_store(collection: &FeatureCollection, definition: &InterfaceDefinition) -> FeatureStore {
    let mut entries = HashMap::with_capacity(collection.len());

    for feature in collection.features() {
        let Some(reference) = feature.reference(&definition.id_property) else {
            tracing::warn!(
                "[{}] Skipping feature without '{}' attribute",
                definition.name,
                definition.id_property
            );
            continue;
        };

        let entry = build_entry(feature, definition);
        if entries.insert(reference.clone(), entry).is_some() {
            tracing::debug!(
                "[{}] Duplicate reference '{}' replaced an earlier entry",
                definition.name,
                reference
            );
        }
    }

    FeatureStore { entries }
}

pub fn build_entry(feature: &Feature, definition: &InterfaceDefinition) -> FeatureStoreEntry {
    let attributes = feature.properties();
    let bbox = feature.bounding_box();
    let centroid = bbox.centroid();

    let boundingbox = if definition.extents_supplied {
        supplied_extent(attributes).unwrap_or_else(|| {
            tracing::warn!(
                "[{}] Feature {:?} lacks numeric {:?}; deriving extent from geometry",
                definition.name,
                feature.reference(&definition.id_property),
                EXTENT_ATTRIBUTES
            );
            bbox.to_extent()
        })
    } else {
        bbox.to_extent()
    };

    FeatureStoreEntry {
        display_name: render(&definition.display_name, attributes),
        class: render(&definition.class, attributes),
        kind: render(&definition.kind, attributes),
        importance: 1.0,
        icon: None,
        address: Address {
            region: render(&definition.region, attributes),
            state: render(&definition.state, attributes),
        },
        lon: centroid.x,
        lat: centroid.y,
        boundingbox,
        place_id: None,
        osm_type: None,
        licence: None,
        osm_id: None,
        feature: definition.debug.then(|| feature.clone()),
    }
}

/// Reads `[minlat, maxlat, minlon, maxlon]` from the attributes, accepting
/// numbers and numeric strings.
pub fn supplied_extent(attributes: &Attributes) -> Option<[f64; 4]> {
    let mut extent = [0.0; 4];
    for (slot, name) in extent.iter_mut().zip(EXTENT_ATTRIBUTES) {
        *slot = match attributes.get(name)? {
            Value::Number(n) => n.as_f64()?,
            Value::String(s) => s.trim().parse().ok()?,
            _ => return None,
        };
    }
    Some(extent)
}
