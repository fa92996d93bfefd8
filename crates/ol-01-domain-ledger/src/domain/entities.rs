//! # Domain Entities
//!
//! Offers, receipts and the addressing scheme that maps a domain name to its
//! storage keys and ledger identifier.

use crate::domain::errors::LedgerError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

/// Prefix of every offer log key.
pub const DOMAIN_KEY_PREFIX: &str = "domain:";

/// Prefix of the request counter key under [`KeyLayout::Separate`].
///
/// Disjoint from [`DOMAIN_KEY_PREFIX`], so no domain name can make a counter
/// key equal to some other domain's offer log key.
pub const REQUEST_COUNTER_PREFIX: &str = "requests:";

/// A validated domain name.
///
/// Only whitespace-only and empty names are rejected; the name is otherwise
/// kept exactly as supplied so that it is echoed back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DomainKey(String);

impl DomainKey {
    /// Validate a raw domain name.
    pub fn parse(name: &str) -> Result<Self, LedgerError> {
        if name.trim().is_empty() {
            return Err(LedgerError::EmptyDomain);
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Storage key of the offer log: `domain:<name>`.
    pub fn offer_log_key(&self) -> Vec<u8> {
        format!("{}{}", DOMAIN_KEY_PREFIX, self.0).into_bytes()
    }

    /// Storage key of the request counter under the given layout.
    pub fn request_counter_key(&self, layout: KeyLayout) -> Vec<u8> {
        match layout {
            KeyLayout::Separate => {
                format!("{}{}", REQUEST_COUNTER_PREFIX, self.0).into_bytes()
            }
            KeyLayout::Shared => self.offer_log_key(),
        }
    }

    /// Identifier of the ledger instance that owns this domain.
    pub fn ledger_id(&self) -> LedgerId {
        LedgerId::derive(self)
    }
}

impl fmt::Display for DomainKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Deterministic identifier of a [`DomainLedger`](crate::DomainLedger).
///
/// SHA-256 of the offer log key, so two names map to the same ledger exactly
/// when they map to the same storage entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LedgerId([u8; 32]);

impl LedgerId {
    pub fn derive(domain: &DomainKey) -> Self {
        let digest = Sha256::digest(domain.offer_log_key());
        let mut id = [0u8; 32];
        id.copy_from_slice(&digest);
        Self(id)
    }
}

impl fmt::Display for LedgerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

/// Where the request counter lives relative to the offer log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyLayout {
    /// Counter under `requests:<name>`, offers under `domain:<name>`.
    #[default]
    Separate,
    /// Counter and offers both under `domain:<name>`.
    ///
    /// A domain used for both purposes fails to decode whichever value was
    /// written second.
    Shared,
}

impl FromStr for KeyLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "separate" => Ok(KeyLayout::Separate),
            "shared" => Ok(KeyLayout::Shared),
            other => Err(format!("unknown key layout: {}", other)),
        }
    }
}

/// An offer as submitted, before the ledger stamps it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOffer {
    pub email: String,
    pub amount: serde_json::Number,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A recorded offer. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    pub email: String,
    pub amount: serde_json::Number,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(with = "iso_millis")]
    pub timestamp: DateTime<Utc>,
}

impl Offer {
    /// Stamp a submission with the server time.
    pub fn stamp(input: NewOffer, timestamp: DateTime<Utc>) -> Self {
        Self {
            email: input.email,
            amount: input.amount,
            description: input.description,
            timestamp,
        }
    }
}

/// Result of `append_offer`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferReceipt {
    pub offer: Offer,
    pub total_offers: usize,
}

/// Result of `track_request`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestTally {
    pub count: u64,
    #[serde(with = "iso_millis")]
    pub timestamp: DateTime<Utc>,
}

/// ISO-8601 UTC with millisecond precision (`2024-05-01T12:00:00.000Z`).
pub mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_domain_key_rejects_blank() {
        assert!(matches!(DomainKey::parse(""), Err(LedgerError::EmptyDomain)));
        assert!(matches!(DomainKey::parse("   "), Err(LedgerError::EmptyDomain)));
        assert_eq!(DomainKey::parse("example.com").unwrap().as_str(), "example.com");
    }

    #[test]
    fn test_storage_keys() {
        let key = DomainKey::parse("example.com").unwrap();
        assert_eq!(key.offer_log_key(), b"domain:example.com".to_vec());
        assert_eq!(
            key.request_counter_key(KeyLayout::Separate),
            b"requests:example.com".to_vec()
        );
        assert_eq!(key.request_counter_key(KeyLayout::Shared), key.offer_log_key());
    }

    #[test]
    fn test_ledger_id_is_deterministic() {
        let a = DomainKey::parse("example.com").unwrap();
        let b = DomainKey::parse("example.com").unwrap();
        let c = DomainKey::parse("example.org").unwrap();

        assert_eq!(a.ledger_id(), b.ledger_id());
        assert_ne!(a.ledger_id(), c.ledger_id());
        assert_eq!(a.ledger_id().to_string().len(), 64);
    }

    #[test]
    fn test_key_layout_parsing() {
        assert_eq!("separate".parse::<KeyLayout>().unwrap(), KeyLayout::Separate);
        assert_eq!("SHARED".parse::<KeyLayout>().unwrap(), KeyLayout::Shared);
        assert!("both".parse::<KeyLayout>().is_err());
        assert_eq!(KeyLayout::default(), KeyLayout::Separate);
    }

    #[test]
    fn test_offer_json_shape() {
        let timestamp = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let offer = Offer::stamp(
            NewOffer {
                email: "a@b.com".into(),
                amount: 500.into(),
                description: None,
            },
            timestamp,
        );

        let json = serde_json::to_value(&offer).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "email": "a@b.com",
                "amount": 500,
                "timestamp": "2024-05-01T12:00:00.000Z"
            })
        );
    }

    #[test]
    fn test_offer_description_kept_when_present() {
        let timestamp = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let offer = Offer::stamp(
            NewOffer {
                email: "a@b.com".into(),
                amount: serde_json::Number::from_f64(12.5).unwrap(),
                description: Some("for the .com".into()),
            },
            timestamp,
        );

        let json = serde_json::to_string(&offer).unwrap();
        assert!(json.contains(r#""description":"for the .com""#));
        assert!(json.contains(r#""amount":12.5"#));

        let decoded: Offer = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, offer);
    }

    #[test]
    fn test_receipt_uses_camel_case() {
        let timestamp = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let receipt = OfferReceipt {
            offer: Offer::stamp(
                NewOffer {
                    email: "a@b.com".into(),
                    amount: 1.into(),
                    description: None,
                },
                timestamp,
            ),
            total_offers: 3,
        };
        let json = serde_json::to_value(&receipt).unwrap();
        assert_eq!(json["totalOffers"], 3);
    }
}
