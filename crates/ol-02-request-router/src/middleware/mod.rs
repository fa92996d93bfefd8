//! Middleware stack for the request router.
//!
//! Layer order (outermost first): Tracing → Cors → Auth → BodyLimit → Handler

pub mod auth;
pub mod cors;
pub mod tracing;

pub use auth::{constant_time_compare, AuthLayer};
pub use cors::CorsLayer;
pub use self::tracing::TracingLayer;
