//! Search Module
//!
//! The full-text index behind every interface.
//!
//! ## Overview
//! Each interface owns one [`SearchIndex`], built once from its feature
//! collection and never mutated afterwards. The index keeps only tokenized
//! postings and one reference per document; rendered results live in the
//! feature store.
//!
//! ## Responsibilities
//! - **Tokenization**: Normalizing attribute values and query text into tokens.
//! - **Field discovery**: Selecting which attribute keys are indexed.
//! - **Ranking**: TF-IDF relevance with field-length normalization, prefix
//!   expansion and AND/OR term combination.
//!
//! ## Submodules
//! - **`engine`**: Query execution and scoring.
//! - **`index`**: Index construction.
//! - **`tokenizer`**: Text processing utilities (normalization, stop words, stemming).
//! - **`types`**: Field sets, query options and hits.

pub mod engine;
pub mod index;
pub mod tokenizer;
pub mod types;

pub use index::{IndexBuilder, SearchIndex, build_index};
pub use types::{BoolMode, FieldSet, SearchHit, SearchOptions};
