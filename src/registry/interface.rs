use crate::config::InterfaceDefinition;
use crate::geometry::FeatureCollection;
use crate::search::{FieldSet, SearchIndex, build_index};
use crate::store::{FeatureStore, FeatureStoreEntry, build_store};

/// A fully built, queryable interface.
///
/// Constructed once from its definition and ingested features; nothing in it
/// changes afterwards, so it is shared across requests behind an `Arc`.
#[derive(Debug)]
pub struct Interface {
    definition: InterfaceDefinition,
    features: FeatureCollection,
    fields: FieldSet,
    index: SearchIndex,
    store: FeatureStore,
}

impl Interface {
    /// Derives the field set, index and store from `features`.
    pub fn build(definition: InterfaceDefinition, features: FeatureCollection) -> Self {
        let fields = FieldSet::discover(&features, definition.exclude_pattern());
        let index = build_index(&features, &fields, &definition.id_property);
        let store = build_store(&features, &definition);

        if index.document_count() != store.len() {
            tracing::info!(
                "[{}] {} documents map onto {} store entries (duplicate ids)",
                definition.name,
                index.document_count(),
                store.len()
            );
        }

        Self::from_parts(definition, features, fields, index, store)
    }

    /// Assembles an interface from already built parts.
    pub(crate) fn from_parts(
        definition: InterfaceDefinition,
        features: FeatureCollection,
        fields: FieldSet,
        index: SearchIndex,
        store: FeatureStore,
    ) -> Self {
        Self {
            definition,
            features,
            fields,
            index,
            store,
        }
    }

    pub fn name(&self) -> &str {
        &self.definition.name
    }

    pub fn definition(&self) -> &InterfaceDefinition {
        &self.definition
    }

    pub fn features(&self) -> &FeatureCollection {
        &self.features
    }

    pub fn fields(&self) -> &FieldSet {
        &self.fields
    }

    pub fn index(&self) -> &SearchIndex {
        &self.index
    }

    pub fn store(&self) -> &FeatureStore {
        &self.store
    }

    /// Searches with the interface's configured options and resolves hits to
    /// store entries in rank order, keeping at most `limit` of them.
    ///
    /// Hits whose reference has no store entry are skipped.
    pub fn search(&self, query: &str, limit: Option<usize>) -> Vec<&FeatureStoreEntry> {
        let hits = self.index.search(query, self.definition.search_options());
        let entries = hits.iter().filter_map(|hit| {
            let entry = self.store.get(&hit.reference);
            if entry.is_none() {
                tracing::warn!(
                    "[{}] Search hit '{}' has no store entry",
                    self.name(),
                    hit.reference
                );
            }
            entry
        });

        match limit {
            Some(limit) => entries.take(limit).collect(),
            None => entries.collect(),
        }
    }
}
