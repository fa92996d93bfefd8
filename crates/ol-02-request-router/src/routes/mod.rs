//! Request handlers.
//!
//! Handlers resolve the `domain` query parameter, then run one ledger
//! operation on the blocking pool while holding that domain's lock.

pub mod health;
pub mod offers;
pub mod requests;

use crate::domain::error::ApiError;
use crate::domain::types::query_domain;
use crate::service::AppState;
use axum::extract::RawQuery;
use ol_01_domain_ledger::{DomainKey, DomainLedger, LedgerError};

/// Resolve the addressed domain, rejecting absent and blank names.
pub(crate) fn domain_key(RawQuery(query): RawQuery) -> Result<DomainKey, ApiError> {
    let name = query_domain(query.as_deref()).unwrap_or_default();
    Ok(DomainKey::parse(&name)?)
}

/// Run `op` against the domain's ledger under its exclusive lock.
pub(crate) async fn with_ledger<T, F>(
    state: &AppState,
    domain: &DomainKey,
    op: F,
) -> Result<T, ApiError>
where
    F: FnOnce(&mut DomainLedger) -> Result<T, LedgerError> + Send + 'static,
    T: Send + 'static,
{
    let handle = state.registry.ledger(domain);
    let result = tokio::task::spawn_blocking(move || {
        let mut ledger = handle.lock();
        op(&mut *ledger)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("ledger task failed: {}", e)))?;

    Ok(result?)
}
