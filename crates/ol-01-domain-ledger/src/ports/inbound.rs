//! # Inbound Ports (Driving Ports)
//!
//! The API a single domain's ledger exposes to the request router.

use crate::domain::entities::{DomainKey, NewOffer, Offer, OfferReceipt, RequestTally};
use crate::domain::errors::LedgerError;

/// Operations on one domain's ledger.
///
/// Every method is scoped to the domain the ledger was created for. Mutating
/// methods take `&mut self`: the registry hands out one exclusive lock per
/// domain, so a read-modify-write never interleaves with another operation on
/// the same domain.
pub trait DomainLedgerApi {
    /// The domain this ledger is bound to.
    fn domain(&self) -> &DomainKey;

    /// Increment the request counter and return the new value.
    ///
    /// ## Errors
    ///
    /// - `Storage`: the store failed to read or write
    /// - `Corrupted`: the counter key holds something other than an integer
    fn track_request(&mut self) -> Result<RequestTally, LedgerError>;

    /// Current request counter, 0 when never tracked.
    fn request_count(&self) -> Result<u64, LedgerError>;

    /// Stamp and append an offer, persisting the whole log.
    ///
    /// ## Errors
    ///
    /// - `Storage`: the store failed to read or write
    /// - `Corrupted`: the offer log key holds something other than a list of offers
    fn append_offer(&mut self, offer: NewOffer) -> Result<OfferReceipt, LedgerError>;

    /// Every offer in submission order, empty when none were recorded.
    fn list_offers(&self) -> Result<Vec<Offer>, LedgerError>;
}
