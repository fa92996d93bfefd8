//! `/` - the domain's offer log.

use super::{domain_key, with_ledger};
use crate::domain::error::ApiError;
use crate::domain::types::{parse_offer, OfferCreatedResponse, OfferListResponse};
use crate::service::AppState;
use axum::{
    body::Bytes,
    extract::{RawQuery, State},
    http::Method,
    response::{IntoResponse, Response},
    Json,
};
use ol_01_domain_ledger::DomainLedgerApi;
use tracing::info;

/// `POST` appends an offer; every other method lists the log.
pub async fn offers(
    State(state): State<AppState>,
    method: Method,
    query: RawQuery,
    body: Bytes,
) -> Result<Response, ApiError> {
    let domain = domain_key(query)?;

    if method == Method::POST {
        let offer = parse_offer(&body)?;
        let receipt = with_ledger(&state, &domain, move |ledger| ledger.append_offer(offer)).await?;

        info!(
            domain = %domain,
            total_offers = receipt.total_offers,
            "Offer recorded"
        );

        Ok(Json(OfferCreatedResponse {
            domain: domain.as_str().to_string(),
            receipt,
        })
        .into_response())
    } else {
        let offers = with_ledger(&state, &domain, |ledger| ledger.list_offers()).await?;

        Ok(Json(OfferListResponse {
            domain: domain.as_str().to_string(),
            offers,
        })
        .into_response())
    }
}
