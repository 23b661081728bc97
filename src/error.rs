//! Error Taxonomy
//!
//! One enum per failure domain. Configuration and ingestion errors abort a
//! startup step and are only ever logged; request errors map onto HTTP status
//! codes with empty bodies.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::path::PathBuf;

/// Raised while loading or validating the startup configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Interface '{interface}' has an invalid exclusion pattern: {source}")]
    InvalidExclude {
        interface: String,
        #[source]
        source: regex::Error,
    },

    #[error("Interface '{0}' has an empty id property")]
    MissingIdProperty(String),

    #[error("Invalid listen address '{0}'")]
    InvalidListenAddr(String),
}

/// Raised when a dataset can not be turned into a feature collection.
///
/// An interface whose ingestion fails is never published.
#[derive(Debug, thiserror::Error)]
pub enum IngestionError {
    #[error("Failed to start converter for '{dataset}': {source}")]
    Spawn {
        dataset: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Conversion stream for '{dataset}' failed: {source}")]
    Stream {
        dataset: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Converter exited with {status} for '{dataset}': {stderr}")]
    ConverterFailed {
        dataset: String,
        status: String,
        stderr: String,
    },

    #[error("Payload for '{dataset}' is not a feature collection: {source}")]
    Parse {
        dataset: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Ingestion of '{dataset}' timed out after {secs}s")]
    Timeout { dataset: String, secs: u64 },

    #[error("Index construction task failed: {0}")]
    Build(String),
}

/// Raised for geometry that can not yield a bounding box.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    #[error("Geometry is missing")]
    Missing,

    #[error("Unsupported geometry type '{0}'")]
    UnsupportedType(String),

    #[error("Malformed coordinates for {kind}: {reason}")]
    Malformed { kind: String, reason: String },

    #[error("Geometry has no coordinates")]
    Empty,
}

/// Terminal outcomes of a search request other than success.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("Unsupported response format")]
    UnsupportedFormat,

    #[error("Unknown interface '{0}'")]
    UnknownInterface(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl RequestError {
    pub fn status(&self) -> StatusCode {
        match self {
            RequestError::UnsupportedFormat => StatusCode::METHOD_NOT_ALLOWED,
            RequestError::UnknownInterface(_) => StatusCode::NOT_FOUND,
            RequestError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RequestError {
    fn into_response(self) -> Response {
        // No error detail leaves the process.
        self.status().into_response()
    }
}
