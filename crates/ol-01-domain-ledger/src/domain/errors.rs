//! # Domain Errors
//!
//! Error types for the ledger. Nothing here is retried: every error is
//! terminal for the operation that produced it.

use thiserror::Error;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Domain name is empty or whitespace.
    #[error("domain name must not be empty")]
    EmptyDomain,

    /// The underlying key-value store failed.
    #[error("storage failure: {0}")]
    Storage(#[from] KVStoreError),

    /// Stored bytes do not decode as the expected value.
    ///
    /// Under the shared key layout this is how a counter/offer-log collision
    /// surfaces.
    #[error("value under '{key}' is not a valid {expected}: {reason}")]
    Corrupted {
        key: String,
        expected: &'static str,
        reason: String,
    },

    /// A value could not be encoded for storage.
    #[error("failed to encode {what}: {reason}")]
    Encoding { what: &'static str, reason: String },
}

/// Key-value store errors.
#[derive(Debug, Clone, Error)]
pub enum KVStoreError {
    /// I/O error during read/write.
    #[error("KV store I/O error: {message}")]
    IOError { message: String },
    /// Data corruption in the store.
    #[error("KV store corruption: {message}")]
    CorruptionError { message: String },
}

impl From<std::io::Error> for KVStoreError {
    fn from(err: std::io::Error) -> Self {
        KVStoreError::IOError {
            message: err.to_string(),
        }
    }
}
