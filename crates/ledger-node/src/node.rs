//! Node wiring: store → registry → router.

use crate::config::{NodeConfig, StorageBackend, StorageConfig};
use anyhow::{Context, Result};
use ol_01_domain_ledger::{
    shared_store, FileBackedKVStore, InMemoryKVStore, KVStoreError, KeyLayout, LedgerRegistry,
    SharedStore, SystemTimeSource,
};
use ol_02_request_router::RequestRouterService;
use std::future::Future;
use std::sync::Arc;
use tracing::{info, warn};

/// A fully wired node, ready to serve.
pub struct LedgerNode {
    registry: Arc<LedgerRegistry>,
    router: RequestRouterService,
}

impl LedgerNode {
    /// Open storage and assemble the router.
    pub fn new(config: NodeConfig) -> Result<Self> {
        let store = open_store(&config.storage).with_context(|| {
            format!(
                "failed to open {:?} storage at {}",
                config.storage.backend,
                config.storage.data_path.display()
            )
        })?;

        if config.storage.key_layout == KeyLayout::Shared {
            warn!(
                "Shared key layout: tracking requests on a domain that has offers will fail"
            );
        }

        let registry = Arc::new(LedgerRegistry::new(
            store,
            Arc::new(SystemTimeSource),
            config.storage.key_layout,
        ));

        let domains = registry
            .known_domains()
            .context("failed to scan stored domains")?;
        info!(
            backend = ?config.storage.backend,
            layout = ?config.storage.key_layout,
            domains = domains.len(),
            "Ledger storage ready"
        );

        let router = RequestRouterService::new(config.router, Arc::clone(&registry))
            .context("invalid router configuration")?;

        Ok(Self { registry, router })
    }

    pub fn registry(&self) -> Arc<LedgerRegistry> {
        Arc::clone(&self.registry)
    }

    pub fn router(&self) -> &RequestRouterService {
        &self.router
    }

    /// Serve HTTP until `shutdown` resolves.
    pub async fn run<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.router
            .serve(shutdown)
            .await
            .context("request router failed")
    }
}

/// Open the configured key-value store.
pub fn open_store(config: &StorageConfig) -> Result<SharedStore, KVStoreError> {
    match config.backend {
        StorageBackend::Memory => Ok(shared_store(InMemoryKVStore::new())),
        StorageBackend::File => Ok(shared_store(FileBackedKVStore::open(&config.data_path)?)),
    }
}
