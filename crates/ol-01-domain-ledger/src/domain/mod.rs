//! # Domain Layer
//!
//! Pure domain types for the ledger. No I/O happens here.
//!
//! - `entities.rs` - Domain keys, offers, receipts and the storage key layout
//! - `errors.rs` - Ledger and key-value store errors

pub mod entities;
pub mod errors;
