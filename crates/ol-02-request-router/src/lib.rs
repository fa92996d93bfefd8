// Allow missing docs for internal items in development
#![allow(missing_docs)]

//! OL-02 Request Router - authenticated HTTP front controller for offer ledgers.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     REQUEST ROUTER (ol-02)                      │
//! ├─────────────────────────────────────────────────────────────────┤
//! │   HTTP :8787                                                    │
//! │        │                                                        │
//! │  ┌─────┴──────────────────────────────────────────────┐         │
//! │  │  Tracing → Cors → Auth → BodyLimit                 │         │
//! │  │            (OPTIONS answered here, before Auth)    │         │
//! │  └─────┬──────────────────────────────────────────────┘         │
//! │        │                                                        │
//! │  ┌─────┴──────────────────┐   ┌──────────────────────┐          │
//! │  │  /          offers     │   │  /requests  counter  │          │
//! │  └─────┬──────────────────┘   └──────────┬───────────┘          │
//! └────────┼─────────────────────────────────┼──────────────────────┘
//!          └────────────── LedgerRegistry ───┘
//!                               │
//!                        DomainLedger (ol-01)
//! ```
//!
//! # Endpoints
//!
//! - `OPTIONS *` - CORS preflight, no auth
//! - `GET|HEAD /?domain=` - list offers
//! - `POST /?domain=` - append an offer
//! - `GET|HEAD /requests?domain=` - read the request counter
//! - `POST /requests?domain=` - increment the request counter
//! - `GET /health` - liveness, no auth
//!
//! Every response, errors included, carries the configured CORS headers.

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod domain;
pub mod middleware;
pub mod routes;
pub mod service;

// Re-exports for public API
pub use domain::config::RouterConfig;
pub use domain::error::{ApiError, ConfigError, RouterError};
pub use service::{build_router, AppState, RequestRouterService};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
