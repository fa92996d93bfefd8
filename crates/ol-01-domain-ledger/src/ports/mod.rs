//! # Ports Layer
//!
//! Defines the port traits for the ledger.
//!
//! ## Hexagonal Architecture
//!
//! - `inbound.rs` - Driving ports (API exposed to the request router)
//! - `outbound.rs` - Driven ports (dependencies required by the ledger)

pub mod inbound;
pub mod outbound;
