//! Geometry Module
//!
//! The typed feature model and the bounding-box calculator.
//!
//! ## Submodules
//! - **`types`**: `Geometry` (six GeoJSON kinds), `Feature`, `FeatureCollection`.
//! - **`bbox`**: Per-axis min/max fold over a geometry's positions.

pub mod bbox;
pub mod types;

pub use bbox::{BoundingBox, bounding_box};
pub use types::{Attributes, Feature, FeatureCollection, Geometry, Position, value_to_text};

#[cfg(test)]
mod tests;
