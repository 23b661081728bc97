use crate::geometry::FeatureCollection;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// How the per-token matches of a query are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BoolMode {
    /// A document must match every query token within one field.
    #[default]
    #[serde(rename = "AND", alias = "and")]
    And,
    /// A document matching any query token is returned.
    #[serde(rename = "OR", alias = "or")]
    Or,
}

/// Per-query search behaviour, taken from the interface definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    pub bool_mode: BoolMode,
    /// Also match indexed tokens that start with a query token.
    pub expand: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            bool_mode: BoolMode::And,
            expand: true,
        }
    }
}

/// A ranked document reference.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub reference: String,
    pub score: f64,
}

/// The attribute keys an interface indexes.
///
/// Computed once from the representative (first) feature of a collection and
/// fixed for the life of the interface.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSet {
    fields: Vec<String>,
}

impl FieldSet {
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::default();
        for field in fields {
            let field = field.into();
            if !set.fields.contains(&field) {
                set.fields.push(field);
            }
        }
        set
    }

    /// Keys of the first feature not matched by `exclude`.
    pub fn discover(collection: &FeatureCollection, exclude: Option<&Regex>) -> Self {
        let Some(first) = collection.first() else {
            return Self::default();
        };
        Self::new(
            first
                .properties()
                .keys()
                .filter(|key| !exclude.is_some_and(|pattern| pattern.is_match(key)))
                .cloned(),
        )
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.iter().any(|f| f == field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
