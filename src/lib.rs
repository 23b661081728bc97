//! Feature Search Library
//!
//! Text search over configured collections of geographic features, answered in
//! the shape of the Nominatim place-search API. The binary (`main.rs`) wires
//! these modules into an HTTP server.
//!
//! ## Architecture Modules
//! The pipeline runs ingest → index → store at startup and query per request:
//!
//! - **`ingestion`**: Converts a dataset into GeoJSON through an external
//!   converter (`ogr2ogr`) and parses it into typed features.
//! - **`geometry`**: The feature model and the bounding-box calculator.
//! - **`search`**: Tokenizer, field discovery and the read-only inverted index.
//! - **`store`**: Template rendering and the reference → result entry map.
//! - **`registry`**: Builds each configured interface on its own task and
//!   publishes it once complete.
//! - **`query`**: The axum router resolving search requests.
//! - **`config`** / **`error`**: Startup configuration and the error taxonomy.

pub mod config;
pub mod error;
pub mod geometry;
pub mod ingestion;
pub mod query;
pub mod registry;
pub mod search;
pub mod store;
