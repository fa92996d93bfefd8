//! # Outbound Ports (Driven Ports)
//!
//! Dependencies required by the ledger. The host application picks the
//! adapters; see `adapters/` for the bundled ones.

use crate::domain::errors::KVStoreError;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::sync::Arc;

/// Result of a prefix scan: `(key, value)` pairs.
pub type ScanResult = Vec<(Vec<u8>, Vec<u8>)>;

/// Abstract interface for key-value database operations.
///
/// Implementations must be linearizable per key: a `get` after a successful
/// `put` observes that value.
pub trait KeyValueStore: Send + Sync {
    /// Get a value by key.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError>;

    /// Put a single key-value pair, replacing any previous value.
    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError>;

    /// Iterate over keys with a prefix.
    fn prefix_scan(&self, prefix: &[u8]) -> Result<ScanResult, KVStoreError>;
}

/// A store shared by every ledger in the process.
pub type SharedStore = Arc<RwLock<dyn KeyValueStore>>;

/// Wrap a concrete store for sharing.
pub fn shared_store<S: KeyValueStore + 'static>(store: S) -> SharedStore {
    Arc::new(RwLock::new(store))
}

/// Abstract interface for time operations (for testability).
pub trait TimeSource: Send + Sync {
    /// Current wall-clock time.
    fn now(&self) -> DateTime<Utc>;
}
