//! Ingestion Module
//!
//! Turns a dataset locator into a typed [`FeatureCollection`](crate::geometry::FeatureCollection).
//!
//! ## Workflow
//! 1. **Convert**: A [`DatasetConverter`] streams the dataset as GeoJSON.
//! 2. **Accumulate**: The stream is read to the end; the converter's exit status is checked.
//! 3. **Parse**: The payload is parsed; features whose geometry can not be
//!    indexed are dropped individually.
//!
//! Any failure rejects the whole ingestion. Nothing is retried.

pub mod converter;
pub mod loader;

#[cfg(test)]
pub(crate) mod testing;

pub use converter::{
    ConversionStream, DatasetConverter, GeoJsonFileConverter, Ogr2OgrConverter, from_config,
};
pub use loader::{load_features, parse_collection};

#[cfg(test)]
mod tests;
