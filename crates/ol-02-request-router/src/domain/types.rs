//! Request and response bodies.

use crate::domain::error::ApiError;
use ol_01_domain_ledger::{NewOffer, Offer, OfferReceipt, RequestTally};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// First `domain` value in a raw query string, percent-decoded.
///
/// Later repeats of the parameter are ignored.
pub fn query_domain(query: Option<&str>) -> Option<String> {
    url::form_urlencoded::parse(query?.as_bytes())
        .find(|(key, _)| key == "domain")
        .map(|(_, value)| value.into_owned())
}

/// Response to a read on `/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfferListResponse {
    pub domain: String,
    pub offers: Vec<Offer>,
}

/// Response to a successful `POST /`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfferCreatedResponse {
    pub domain: String,
    #[serde(flatten)]
    pub receipt: OfferReceipt,
}

/// Response to a read on `/requests`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestCountResponse {
    pub domain: String,
    pub count: u64,
}

/// Response to `POST /requests`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestTrackedResponse {
    pub domain: String,
    #[serde(flatten)]
    pub tally: RequestTally,
}

/// Parse and validate an offer submission.
///
/// ## Errors
///
/// - `InvalidBody`: not JSON, not an object, or `description` is neither a
///   string nor null
/// - `MissingOfferFields`: `email` is not a non-empty string, or `amount` is
///   not a non-zero number
pub fn parse_offer(body: &[u8]) -> Result<NewOffer, ApiError> {
    let value: Value = serde_json::from_slice(body).map_err(|_| ApiError::InvalidBody)?;
    let Value::Object(mut fields) = value else {
        return Err(ApiError::InvalidBody);
    };

    let email = match fields.remove("email") {
        Some(Value::String(email)) if !email.is_empty() => email,
        _ => return Err(ApiError::MissingOfferFields),
    };

    let amount = match fields.remove("amount") {
        Some(Value::Number(amount)) if !is_zero(&amount) => amount,
        _ => return Err(ApiError::MissingOfferFields),
    };

    let description = match fields.remove("description") {
        None | Some(Value::Null) => None,
        Some(Value::String(description)) => Some(description),
        Some(_) => return Err(ApiError::InvalidBody),
    };

    Ok(NewOffer {
        email,
        amount,
        description,
    })
}

fn is_zero(n: &serde_json::Number) -> bool {
    n.as_f64() == Some(0.0)
}
