//! # Domain Ledger (ol-01)
//!
//! Per-domain persistence for offer submissions and request counts.
//!
//! ## Architecture
//!
//! Every domain name owns exactly one [`DomainLedger`]. The ledger is the only
//! writer of that domain's storage entries and performs each operation as a
//! read-modify-write of the whole value:
//!
//! ```text
//! RequestRouter ──ledger(domain)──→ LedgerRegistry ──Mutex──→ DomainLedger
//!                                    [LedgerId cache]             │
//!                                                                 ↓ get / put
//!                                                          KeyValueStore
//! ```
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Description |
//! |----|-----------|-------------|
//! | 1 | Append-only | Offers are never reordered, rewritten or removed |
//! | 2 | Serialized access | One operation per domain at a time (registry mutex) |
//! | 3 | Monotonic counter | Each `track_request` adds exactly one |
//! | 4 | Stable addressing | `LedgerId` is a pure function of the domain name |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Entities, key layout and errors
//! - `ports/` - Port traits (inbound API, outbound SPI)
//! - `adapters/` - Key-value store and clock implementations
//! - `service.rs` - `DomainLedger`, the inbound API implementation
//! - `registry.rs` - Lazily populated ledger cache
//!
//! ## Usage
//!
//! ```ignore
//! use ol_01_domain_ledger::{DomainKey, LedgerRegistry, NewOffer};
//!
//! let registry = LedgerRegistry::in_memory();
//! let key = DomainKey::parse("example.com")?;
//! let receipt = registry.ledger(&key).lock().append_offer(offer)?;
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod registry;
pub mod service;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use adapters::{FileBackedKVStore, InMemoryKVStore, SystemTimeSource};
pub use domain::entities::{
    DomainKey, KeyLayout, LedgerId, NewOffer, Offer, OfferReceipt, RequestTally,
};
pub use domain::errors::{KVStoreError, LedgerError};
pub use ports::inbound::DomainLedgerApi;
pub use ports::outbound::{shared_store, KeyValueStore, SharedStore, TimeSource};
pub use registry::{LedgerHandle, LedgerRegistry};
pub use service::DomainLedger;
