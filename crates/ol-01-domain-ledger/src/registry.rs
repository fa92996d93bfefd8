//! # Ledger Registry
//!
//! Lazily creates one [`DomainLedger`] per [`LedgerId`] and keeps it for the
//! lifetime of the process.
//!
//! Each ledger sits behind its own mutex, so operations on one domain run one
//! at a time in lock-acquisition order while different domains proceed in
//! parallel.

use crate::adapters::{InMemoryKVStore, SystemTimeSource};
use crate::domain::entities::{DomainKey, KeyLayout, LedgerId, Offer, DOMAIN_KEY_PREFIX};
use crate::domain::errors::LedgerError;
use crate::ports::outbound::{shared_store, SharedStore, TimeSource};
use crate::service::DomainLedger;
use dashmap::DashMap;
use parking_lot::Mutex;
use std::sync::Arc;

/// Exclusive-access handle to one domain's ledger.
pub type LedgerHandle = Arc<Mutex<DomainLedger>>;

/// Process-wide cache of ledgers, keyed by ledger id.
pub struct LedgerRegistry {
    ledgers: DashMap<LedgerId, LedgerHandle>,
    store: SharedStore,
    clock: Arc<dyn TimeSource>,
    layout: KeyLayout,
}

impl LedgerRegistry {
    pub fn new(store: SharedStore, clock: Arc<dyn TimeSource>, layout: KeyLayout) -> Self {
        Self {
            ledgers: DashMap::new(),
            store,
            clock,
            layout,
        }
    }

    /// Registry over a fresh in-memory store and the system clock.
    pub fn in_memory() -> Self {
        Self::new(
            shared_store(InMemoryKVStore::new()),
            Arc::new(SystemTimeSource),
            KeyLayout::default(),
        )
    }

    /// Handle to the ledger for `domain`, created on first use.
    pub fn ledger(&self, domain: &DomainKey) -> LedgerHandle {
        let id = domain.ledger_id();
        let handle = self.ledgers.entry(id).or_insert_with(|| {
            #[cfg(feature = "tracing-log")]
            tracing::debug!(domain = %domain, ledger_id = %id, "[ol-01] Ledger created");

            Arc::new(Mutex::new(DomainLedger::new(
                domain.clone(),
                self.layout,
                Arc::clone(&self.store),
                Arc::clone(&self.clock),
            )))
        });
        Arc::clone(handle.value())
    }

    /// Number of ledgers instantiated so far.
    pub fn len(&self) -> usize {
        self.ledgers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ledgers.is_empty()
    }

    /// Domains with a persisted offer log, sorted.
    ///
    /// Under the shared layout a counter also lives under `domain:<name>`;
    /// entries that do not decode as an offer log are skipped.
    pub fn known_domains(&self) -> Result<Vec<String>, LedgerError> {
        let entries = self.store.read().prefix_scan(DOMAIN_KEY_PREFIX.as_bytes())?;
        let mut domains: Vec<String> = entries
            .into_iter()
            .filter(|(_, value)| serde_json::from_slice::<Vec<Offer>>(value).is_ok())
            .map(|(key, _)| String::from_utf8_lossy(&key[DOMAIN_KEY_PREFIX.len()..]).into_owned())
            .collect();
        domains.sort();
        Ok(domains)
    }
}
