//! Interface Registry
//!
//! The name → interface lookup table. Startup tasks publish interfaces into it
//! as they finish building; request handlers only ever read from it. A name is
//! either absent or bound to a complete, immutable [`Interface`].

use super::interface::Interface;
use crate::config::InterfaceDefinition;
use crate::error::IngestionError;
use crate::ingestion::{DatasetConverter, load_features};

use dashmap::DashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

pub struct InterfaceRegistry {
    interfaces: DashMap<String, Arc<Interface>>,
}

impl InterfaceRegistry {
    /// Creates a new, empty registry.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Looks up a published interface. Interfaces still initializing, and
    /// those that failed, are indistinguishable from unknown names.
    pub fn get(&self, name: &str) -> Option<Arc<Interface>> {
        self.interfaces.get(name).map(|entry| entry.value().clone())
    }

    pub(crate) fn publish(&self, interface: Interface) {
        let name = interface.name().to_string();
        if self
            .interfaces
            .insert(name.clone(), Arc::new(interface))
            .is_some()
        {
            tracing::warn!("Interface '{}' was published twice; keeping the latest", name);
        }
    }

    /// Starts one initialization task per definition.
    ///
    /// Tasks run independently: a failing interface is logged and never
    /// published, and does not affect the others. The returned handles resolve
    /// once the respective task has finished either way.
    pub fn spawn_interfaces<I>(
        self: &Arc<Self>,
        definitions: I,
        converter: Arc<dyn DatasetConverter>,
        timeout: Option<Duration>,
    ) -> Vec<JoinHandle<()>>
    where
        I: IntoIterator<Item = InterfaceDefinition>,
    {
        definitions
            .into_iter()
            .map(|definition| {
                let registry = Arc::clone(self);
                let converter = Arc::clone(&converter);
                tokio::spawn(async move {
                    let name = definition.name.clone();
                    tracing::info!("Initializing interface '{}' from {}", name, definition.dataset);
                    if let Err(e) = registry.initialize(definition, converter.as_ref(), timeout).await {
                        tracing::error!("Interface '{}' is unavailable: {}", name, e);
                    }
                })
            })
            .collect()
    }

    /// Ingests, builds and publishes one interface.
    pub async fn initialize(
        &self,
        definition: InterfaceDefinition,
        converter: &dyn DatasetConverter,
        timeout: Option<Duration>,
    ) -> Result<(), IngestionError> {
        let features = load_features(converter, &definition.dataset, timeout).await?;

        let interface = tokio::task::spawn_blocking(move || Interface::build(definition, features))
            .await
            .map_err(|e| IngestionError::Build(e.to_string()))?;

        tracing::info!(
            "Interface '{}' ready ({} features, {} fields indexed).",
            interface.name(),
            interface.features().len(),
            interface.fields().len()
        );
        self.publish(interface);
        Ok(())
    }

    /// Returns the names of all published interfaces.
    pub fn list_interfaces(&self) -> Vec<String> {
        self.interfaces
            .iter()
            .map(|entry| entry.key().clone())
            .collect()
    }

    /// Returns the number of published interfaces.
    pub fn interface_count(&self) -> usize {
        self.interfaces.len()
    }
}

impl Default for InterfaceRegistry {
    fn default() -> Self {
        Self {
            interfaces: DashMap::new(),
        }
    }
}
