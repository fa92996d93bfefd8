//! Infrastructure adapters.

mod time;

pub use time::SystemTimeSource;
