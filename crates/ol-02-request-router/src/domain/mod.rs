//! Domain types for the request router.

pub mod config;
pub mod error;
pub mod types;
