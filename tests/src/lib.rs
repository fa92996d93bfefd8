//! # Offer Ledger Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── benches/          # Ledger and router throughput
//! └── src/integration/  # Cross-crate flows
//!     ├── http_flows.rs   # Router + registry over HTTP, in process
//!     └── persistence.rs  # File-backed store across restarts
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p ol-tests
//!
//! # Benchmarks
//! cargo bench -p ol-tests
//! ```

pub mod integration;
