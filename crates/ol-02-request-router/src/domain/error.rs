//! Router error types and their HTTP mapping.
//!
//! Client errors carry a fixed plain-text body. Server errors log the
//! underlying cause and answer with a generic body.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use ol_01_domain_ledger::LedgerError;
use tracing::error;

/// Error returned by a request handler.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Missing or wrong bearer token
    #[error("Unauthorized")]
    Unauthorized,

    /// `domain` query parameter absent or blank
    #[error("Domain parameter is required")]
    MissingDomain,

    /// `email` or `amount` absent, empty or zero
    #[error("Email and amount are required")]
    MissingOfferFields,

    /// Body is not a JSON object of the expected shape
    #[error("Invalid request body")]
    InvalidBody,

    /// Ledger operation failed
    #[error("Internal Server Error")]
    Ledger(#[source] LedgerError),

    /// Failure outside the ledger (e.g. a panicked blocking task)
    #[error("Internal Server Error")]
    Internal(String),
}

impl ApiError {
    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::MissingDomain | ApiError::MissingOfferFields | ApiError::InvalidBody => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Ledger(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::EmptyDomain => ApiError::MissingDomain,
            other => ApiError::Ledger(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self {
            ApiError::Ledger(cause) => error!(error = %cause, "Ledger operation failed"),
            ApiError::Internal(cause) => error!(error = %cause, "Request handling failed"),
            _ => {}
        }

        (
            status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.to_string(),
        )
            .into_response()
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("auth.api_token must be set to a non-empty secret")]
    MissingApiToken,

    #[error("cors.allowed_origin is not a valid header value: {0:?}")]
    InvalidOrigin(String),

    #[error("http.port cannot be 0")]
    InvalidPort,

    #[error("invalid limit: {0}")]
    InvalidLimit(String),
}

/// Errors that stop the router from serving
#[derive(Debug, thiserror::Error)]
pub enum RouterError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}
