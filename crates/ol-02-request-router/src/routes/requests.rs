//! `/requests` - the domain's request counter.

use super::{domain_key, with_ledger};
use crate::domain::error::ApiError;
use crate::domain::types::{RequestCountResponse, RequestTrackedResponse};
use crate::service::AppState;
use axum::{
    extract::{RawQuery, State},
    http::Method,
    response::{IntoResponse, Response},
    Json,
};
use ol_01_domain_ledger::DomainLedgerApi;
use tracing::debug;

/// `POST` increments the counter; every other method reads it.
pub async fn requests(
    State(state): State<AppState>,
    method: Method,
    query: RawQuery,
) -> Result<Response, ApiError> {
    let domain = domain_key(query)?;

    if method == Method::POST {
        let tally = with_ledger(&state, &domain, |ledger| ledger.track_request()).await?;
        debug!(domain = %domain, count = tally.count, "Request tracked");

        Ok(Json(RequestTrackedResponse {
            domain: domain.as_str().to_string(),
            tally,
        })
        .into_response())
    } else {
        let count = with_ledger(&state, &domain, |ledger| ledger.request_count()).await?;

        Ok(Json(RequestCountResponse {
            domain: domain.as_str().to_string(),
            count,
        })
        .into_response())
    }
}
