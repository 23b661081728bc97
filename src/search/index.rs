use super::tokenizer::tokenize;
use super::types::FieldSet;
use crate::geometry::{Attributes, FeatureCollection, value_to_text};
use std::collections::{BTreeMap, HashMap};

/// Postings of one indexed field.
#[derive(Debug, Default)]
pub(crate) struct FieldIndex {
    /// token -> (document -> occurrences). Ordered so prefix expansion is a range scan.
    pub(crate) postings: BTreeMap<String, HashMap<usize, u32>>,
    /// Token count of this field per document.
    pub(crate) lengths: Vec<usize>,
}

/// Read-only inverted index over the selected fields of a feature collection.
///
/// Documents are numbered in insertion order and carry only their reference.
/// Two documents may share a reference; both stay searchable.
#[derive(Debug)]
pub struct SearchIndex {
    pub(crate) fields: FieldSet,
    pub(crate) refs: Vec<String>,
    pub(crate) field_indexes: Vec<FieldIndex>,
}

impl SearchIndex {
    pub fn fields(&self) -> &FieldSet {
        &self.fields
    }

    pub fn document_count(&self) -> usize {
        self.refs.len()
    }

    /// References of all documents, in insertion order.
    pub fn references(&self) -> &[String] {
        &self.refs
    }
}

pub struct IndexBuilder {
    fields: FieldSet,
    refs: Vec<String>,
    field_indexes: Vec<FieldIndex>,
}

impl IndexBuilder {
    pub fn new(fields: FieldSet) -> Self {
        let field_indexes = fields.iter().map(|_| FieldIndex::default()).collect();
        Self {
            fields,
            refs: Vec::new(),
            field_indexes,
        }
    }

    /// Indexes the selected fields of `attributes` under `reference`.
    /// Attributes outside the field set are ignored.
    pub fn add_document(&mut self, reference: String, attributes: &Attributes) {
        let doc = self.refs.len();
        self.refs.push(reference);

        for (field, index) in self.fields.iter().zip(self.field_indexes.iter_mut()) {
            let tokens = attributes
                .get(field)
                .map(|value| tokenize(&value_to_text(value)))
                .unwrap_or_default();

            index.lengths.push(tokens.len());
            for token in tokens {
                *index.postings.entry(token).or_default().entry(doc).or_insert(0) += 1;
            }
        }
    }

    pub fn build(self) -> SearchIndex {
        SearchIndex {
            fields: self.fields,
            refs: self.refs,
            field_indexes: self.field_indexes,
        }
    }
}

/// Builds the index for `collection`, one document per feature that has a
/// reference under `id_property`.
pub fn build_index(
    collection: &FeatureCollection,
    fields: &FieldSet,
    id_property: &str,
) -> SearchIndex {
    let mut builder = IndexBuilder::new(fields.clone());
    for feature in collection.features() {
        match feature.reference(id_property) {
            Some(reference) => builder.add_document(reference, feature.properties()),
            None => tracing::warn!(
                "Skipping feature without '{}' attribute during indexing",
                id_property
            ),
        }
    }
    builder.build()
}
