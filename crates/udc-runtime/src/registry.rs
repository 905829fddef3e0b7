//! Explicit mapping from source to connector, built once at startup.

use crate::connector::{Connector, JsonFileConnector};
use std::collections::HashMap;
use std::sync::Arc;
use udc_core::{DataConfig, Source};

#[derive(Clone, Default)]
pub struct ConnectorRegistry {
    connectors: HashMap<Source, Arc<dyn Connector>>,
}

impl ConnectorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// JSON file connectors for every source under the configured directory.
    pub fn from_config(data: &DataConfig) -> Self {
        let mut registry = Self::new();
        for source in Source::ALL {
            registry.register(JsonFileConnector::for_source(source, data));
        }
        registry
    }

    /// Register a connector under its own source, replacing any previous one.
    pub fn register(&mut self, connector: impl Connector + 'static) {
        self.connectors.insert(connector.source(), Arc::new(connector));
    }

    pub fn with(mut self, connector: impl Connector + 'static) -> Self {
        self.register(connector);
        self
    }

    pub fn get(&self, source: Source) -> Option<Arc<dyn Connector>> {
        self.connectors.get(&source).cloned()
    }

    /// Registered sources in declaration order.
    pub fn sources(&self) -> Vec<Source> {
        let mut sources: Vec<Source> = self.connectors.keys().copied().collect();
        sources.sort();
        sources
    }

    pub fn len(&self) -> usize {
        self.connectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connectors.is_empty()
    }
}

impl std::fmt::Debug for ConnectorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectorRegistry")
            .field("sources", &self.sources())
            .finish()
    }
}
