use std::sync::Arc;

use pagewatch_core::ResourceSnapshot;

use crate::{MonitorError, Registry, ResourceList};

/// Blocking front for synchronous callers. Owns its own Tokio runtime, so it
/// must not be created or used from inside another runtime.
pub struct MonitorHandle {
    runtime: tokio::runtime::Runtime,
    registry: Arc<Registry>,
}

impl MonitorHandle {
    pub fn new(registry: Registry) -> std::io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("pagewatch-engine")
            .build()?;
        Ok(Self {
            runtime,
            registry: Arc::new(registry),
        })
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    pub fn add(&self, url: &str) -> Result<ResourceSnapshot, MonitorError> {
        self.runtime.block_on(self.registry.add(url))
    }

    pub fn check(&self, url: &str) -> Result<ResourceSnapshot, MonitorError> {
        self.runtime.block_on(self.registry.check(url))
    }

    pub fn remove(&self, url: &str) -> Result<(), MonitorError> {
        self.registry.remove(url)
    }

    pub fn list(&self) -> ResourceList {
        self.registry.list()
    }
}
