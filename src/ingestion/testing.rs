//! In-memory converters for tests.

use super::converter::{ConversionStream, DatasetConverter};
use crate::error::IngestionError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::io::Cursor;
use std::time::Duration;

/// Serves fixed payloads by dataset name; unknown datasets fail to open.
#[derive(Default)]
pub struct StaticConverter {
    payloads: HashMap<String, Vec<u8>>,
    delays: HashMap<String, Duration>,
}

impl StaticConverter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, dataset: &str, payload: impl Into<Vec<u8>>) -> Self {
        self.payloads.insert(dataset.to_string(), payload.into());
        self
    }

    pub fn with_delay(mut self, dataset: &str, delay: Duration) -> Self {
        self.delays.insert(dataset.to_string(), delay);
        self
    }
}

#[async_trait]
impl DatasetConverter for StaticConverter {
    async fn open(&self, dataset: &str) -> Result<ConversionStream, IngestionError> {
        if let Some(delay) = self.delays.get(dataset) {
            tokio::time::sleep(*delay).await;
        }
        match self.payloads.get(dataset) {
            Some(payload) => Ok(ConversionStream::from_reader(Cursor::new(payload.clone()))),
            None => Err(IngestionError::Stream {
                dataset: dataset.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such dataset"),
            }),
        }
    }
}

/// Builds a GeoJSON feature collection of points from `(x, y, properties)`.
pub fn point_collection(points: &[(f64, f64, serde_json::Value)]) -> String {
    let features: Vec<serde_json::Value> = points
        .iter()
        .map(|(x, y, properties)| {
            serde_json::json!({
                "type": "Feature",
                "geometry": {"type": "Point", "coordinates": [x, y]},
                "properties": properties
            })
        })
        .collect();
    serde_json::json!({"type": "FeatureCollection", "features": features}).to_string()
}
