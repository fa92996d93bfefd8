//! # Ledger Node Library
//!
//! Exposes the node's configuration loading and wiring for testing.
//! The main entry point is the `main.rs` binary.
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (optional JSON file, then `OL_*` environment)
//! 2. Validate the router configuration
//! 3. Open the key-value store (memory or file)
//! 4. Build the ledger registry and request router
//! 5. Serve until shutdown

#![allow(missing_docs)]

pub mod config;
pub mod node;

pub use config::{load_config, NodeConfig, NodeConfigError, StorageBackend, StorageConfig};
pub use node::LedgerNode;
