use super::converter::DatasetConverter;
use crate::error::IngestionError;
use crate::geometry::{Attributes, Feature, FeatureCollection, Geometry};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tokio::io::AsyncReadExt;

#[derive(Deserialize)]
struct RawCollection {
    features: Vec<RawFeature>,
}

#[derive(Deserialize)]
struct RawFeature {
    #[serde(default)]
    geometry: Value,
    #[serde(default)]
    properties: Option<Attributes>,
}

/// Converts `dataset` and parses the accumulated payload.
///
/// With a `timeout`, the whole conversion is abandoned (and the converter
/// process killed) once it elapses.
pub async fn load_features(
    converter: &dyn DatasetConverter,
    dataset: &str,
    timeout: Option<Duration>,
) -> Result<FeatureCollection, IngestionError> {
    let work = async {
        let payload = accumulate(converter, dataset).await?;
        parse_collection(dataset, &payload)
    };

    match timeout {
        Some(limit) => tokio::time::timeout(limit, work)
            .await
            .map_err(|_| IngestionError::Timeout {
                dataset: dataset.to_string(),
                secs: limit.as_secs(),
            })?,
        None => work.await,
    }
}

async fn accumulate(
    converter: &dyn DatasetConverter,
    dataset: &str,
) -> Result<Vec<u8>, IngestionError> {
    let mut stream = converter.open(dataset).await?;
    let mut payload = Vec::new();
    stream
        .reader
        .read_to_end(&mut payload)
        .await
        .map_err(|source| IngestionError::Stream {
            dataset: dataset.to_string(),
            source,
        })?;
    stream.finish().await?;

    tracing::debug!("Read {} bytes of GeoJSON for {}", payload.len(), dataset);
    Ok(payload)
}

/// Parses a GeoJSON feature collection.
///
/// A payload that is not a feature collection fails as a whole. Individual
/// features with missing, unsupported or malformed geometry are dropped with a
/// warning.
pub fn parse_collection(dataset: &str, payload: &[u8]) -> Result<FeatureCollection, IngestionError> {
    let raw: RawCollection =
        serde_json::from_slice(payload).map_err(|source| IngestionError::Parse {
            dataset: dataset.to_string(),
            source,
        })?;

    let total = raw.features.len();
    let mut features = Vec::with_capacity(total);
    for (position, raw_feature) in raw.features.into_iter().enumerate() {
        let properties = raw_feature.properties.unwrap_or_default();
        let feature = Geometry::from_value(&raw_feature.geometry)
            .and_then(|geometry| Feature::new(geometry, properties));

        match feature {
            Ok(feature) => features.push(feature),
            Err(e) => tracing::warn!("Dropping feature #{} of {}: {}", position, dataset, e),
        }
    }

    if features.len() < total {
        tracing::warn!(
            "Kept {} of {} features from {}",
            features.len(),
            total,
            dataset
        );
    }
    Ok(FeatureCollection::new(features))
}
