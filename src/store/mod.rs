//! Feature Store Module
//!
//! Turns each feature into the response entry returned for it, keyed by the
//! feature's reference so search hits can be resolved without touching the
//! source collection.
//!
//! ## Submodules
//! - **`builder`**: Per-feature entry construction (centroid, extent, placeholders).
//! - **`template`**: `{attribute}` substitution for display name, class, type and address.
//! - **`types`**: `FeatureStore` and the serialized `FeatureStoreEntry`.

pub mod builder;
pub mod template;
pub mod types;

pub use builder::build_store;
pub use template::render;
pub use types::{Address, FeatureStore, FeatureStoreEntry};
