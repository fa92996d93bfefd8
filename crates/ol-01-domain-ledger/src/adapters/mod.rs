//! # Adapters Module
//!
//! Implementations of the outbound ports.
//!
//! ## Modules
//!
//! - `storage`: In-memory and file-backed `KeyValueStore`s
//! - `infra`: System clock

pub mod infra;
pub mod storage;

pub use infra::SystemTimeSource;
pub use storage::{FileBackedKVStore, InMemoryKVStore};
