//! Dataset Converters
//!
//! A converter turns a dataset locator into a byte stream of GeoJSON. The
//! production converter shells out to GDAL's `ogr2ogr`, which reads any vector
//! format GDAL supports; datasets that are GeoJSON already can be opened
//! directly.

use crate::config::{ConverterConfig, ConverterKind};
use crate::error::IngestionError;
use async_trait::async_trait;
use std::future::Future;
use std::pin::Pin;
use std::process::Stdio;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;

pub type ConversionReader = Pin<Box<dyn AsyncRead + Send>>;
pub type Completion = Pin<Box<dyn Future<Output = Result<(), IngestionError>> + Send>>;

/// Output of a running conversion.
///
/// `reader` yields the GeoJSON payload. `completion`, when present, resolves
/// once the producer has finished and reports whether it succeeded; it must be
/// awaited after the reader is drained.
pub struct ConversionStream {
    pub reader: ConversionReader,
    pub completion: Option<Completion>,
}

impl ConversionStream {
    pub fn from_reader<R: AsyncRead + Send + 'static>(reader: R) -> Self {
        Self {
            reader: Box::pin(reader),
            completion: None,
        }
    }

    pub async fn finish(self) -> Result<(), IngestionError> {
        match self.completion {
            Some(completion) => completion.await,
            None => Ok(()),
        }
    }
}

#[async_trait]
pub trait DatasetConverter: Send + Sync {
    async fn open(&self, dataset: &str) -> Result<ConversionStream, IngestionError>;
}

/// Builds the converter selected by the configuration.
pub fn from_config(config: &ConverterConfig) -> Arc<dyn DatasetConverter> {
    match config.kind {
        ConverterKind::Ogr2ogr => Arc::new(Ogr2OgrConverter::new(&config.program)),
        ConverterKind::Geojson => Arc::new(GeoJsonFileConverter),
    }
}

/// Runs `<program> -f GeoJSON /vsistdout/ <dataset>` and streams its stdout.
pub struct Ogr2OgrConverter {
    program: String,
}

impl Ogr2OgrConverter {
    pub fn new(program: &str) -> Self {
        Self {
            program: program.to_string(),
        }
    }
}

#[async_trait]
impl DatasetConverter for Ogr2OgrConverter {
    async fn open(&self, dataset: &str) -> Result<ConversionStream, IngestionError> {
        tracing::debug!("Spawning {} for dataset {}", self.program, dataset);

        let mut child = Command::new(&self.program)
            .args(["-f", "GeoJSON", "/vsistdout/", dataset])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| IngestionError::Spawn {
                dataset: dataset.to_string(),
                source,
            })?;

        let stdout = child.stdout.take().ok_or_else(|| IngestionError::Spawn {
            dataset: dataset.to_string(),
            source: std::io::Error::other("converter stdout was not captured"),
        })?;

        // Drain stderr concurrently so a chatty converter never blocks on a full pipe.
        let stderr_task = child.stderr.take().map(|mut stderr| {
            tokio::spawn(async move {
                let mut captured = String::new();
                let _ = stderr.read_to_string(&mut captured).await;
                captured
            })
        });

        let dataset = dataset.to_string();
        let completion = async move {
            let status = child.wait().await.map_err(|source| IngestionError::Stream {
                dataset: dataset.clone(),
                source,
            })?;
            let stderr = match stderr_task {
                Some(task) => task.await.unwrap_or_default(),
                None => String::new(),
            };

            if status.success() {
                if !stderr.trim().is_empty() {
                    tracing::debug!("Converter output for {}: {}", dataset, stderr.trim());
                }
                Ok(())
            } else {
                Err(IngestionError::ConverterFailed {
                    dataset,
                    status: status.to_string(),
                    stderr: stderr.trim().to_string(),
                })
            }
        };

        Ok(ConversionStream {
            reader: Box::pin(stdout),
            completion: Some(Box::pin(completion)),
        })
    }
}

/// Opens the dataset path as a GeoJSON file.
pub struct GeoJsonFileConverter;

#[async_trait]
impl DatasetConverter for GeoJsonFileConverter {
    async fn open(&self, dataset: &str) -> Result<ConversionStream, IngestionError> {
        let file = tokio::fs::File::open(dataset)
            .await
            .map_err(|source| IngestionError::Stream {
                dataset: dataset.to_string(),
                source,
            })?;
        Ok(ConversionStream::from_reader(file))
    }
}
