//! # Domain Ledger Service
//!
//! The per-domain unit implementing [`DomainLedgerApi`].
//!
//! Every operation touches at most one key with one read followed by at most
//! one write. The ledger itself takes no locks around that pair; callers get
//! exclusive access through the registry's per-domain mutex.

use crate::domain::entities::{
    DomainKey, KeyLayout, LedgerId, NewOffer, Offer, OfferReceipt, RequestTally,
};
use crate::domain::errors::LedgerError;
use crate::ports::inbound::DomainLedgerApi;
use crate::ports::outbound::{SharedStore, TimeSource};
use chrono::{DateTime, SubsecRound, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// The ledger for a single domain.
pub struct DomainLedger {
    /// Domain this ledger is bound to.
    key: DomainKey,
    /// Cached identifier of `key`.
    id: LedgerId,
    /// Storage key scheme for the request counter.
    layout: KeyLayout,
    /// Process-wide store.
    store: SharedStore,
    /// Clock for offer and request timestamps.
    clock: Arc<dyn TimeSource>,
}

impl DomainLedger {
    pub fn new(
        key: DomainKey,
        layout: KeyLayout,
        store: SharedStore,
        clock: Arc<dyn TimeSource>,
    ) -> Self {
        let id = key.ledger_id();
        Self {
            key,
            id,
            layout,
            store,
            clock,
        }
    }

    pub fn id(&self) -> LedgerId {
        self.id
    }

    /// Timestamps are truncated to the precision they are serialized with, so
    /// a returned offer compares equal to its stored copy.
    fn now(&self) -> DateTime<Utc> {
        self.clock.now().trunc_subsecs(3)
    }

    fn read_value<T: DeserializeOwned>(
        &self,
        key: &[u8],
        expected: &'static str,
    ) -> Result<Option<T>, LedgerError> {
        let raw = self.store.read().get(key)?;
        raw.map(|bytes| {
            serde_json::from_slice(&bytes).map_err(|e| LedgerError::Corrupted {
                key: String::from_utf8_lossy(key).into_owned(),
                expected,
                reason: e.to_string(),
            })
        })
        .transpose()
    }

    fn write_value<T: Serialize + ?Sized>(
        &self,
        key: &[u8],
        value: &T,
        what: &'static str,
    ) -> Result<(), LedgerError> {
        let bytes = serde_json::to_vec(value).map_err(|e| LedgerError::Encoding {
            what,
            reason: e.to_string(),
        })?;
        self.store.write().put(key, &bytes)?;
        Ok(())
    }
}

impl DomainLedgerApi for DomainLedger {
    fn domain(&self) -> &DomainKey {
        &self.key
    }

    fn track_request(&mut self) -> Result<RequestTally, LedgerError> {
        let key = self.key.request_counter_key(self.layout);
        let current: u64 = self.read_value(&key, "request counter")?.unwrap_or(0);
        let count = current.saturating_add(1);
        self.write_value(&key, &count, "request counter")?;

        #[cfg(feature = "tracing-log")]
        tracing::debug!(domain = %self.key, count, "[ol-01] Request tracked");

        Ok(RequestTally {
            count,
            timestamp: self.now(),
        })
    }

    fn request_count(&self) -> Result<u64, LedgerError> {
        let key = self.key.request_counter_key(self.layout);
        Ok(self.read_value(&key, "request counter")?.unwrap_or(0))
    }

    fn append_offer(&mut self, offer: NewOffer) -> Result<OfferReceipt, LedgerError> {
        let key = self.key.offer_log_key();
        let mut offers: Vec<Offer> = self.read_value(&key, "offer log")?.unwrap_or_default();

        let offer = Offer::stamp(offer, self.now());
        offers.push(offer.clone());
        self.write_value(&key, &offers, "offer log")?;

        #[cfg(feature = "tracing-log")]
        tracing::info!(
            domain = %self.key,
            total_offers = offers.len(),
            "[ol-01] Offer appended"
        );

        Ok(OfferReceipt {
            offer,
            total_offers: offers.len(),
        })
    }

    fn list_offers(&self) -> Result<Vec<Offer>, LedgerError> {
        let key = self.key.offer_log_key();
        Ok(self.read_value(&key, "offer log")?.unwrap_or_default())
    }
}
