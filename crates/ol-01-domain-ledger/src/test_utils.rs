//! Test doubles for the outbound ports.

use crate::domain::entities::NewOffer;
use crate::domain::errors::KVStoreError;
use crate::ports::outbound::{KeyValueStore, ScanResult, TimeSource};
use chrono::{DateTime, Duration, TimeZone, Utc};
use parking_lot::Mutex;

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct ManualTimeSource {
    now: Mutex<DateTime<Utc>>,
}

impl ManualTimeSource {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    /// 2024-01-01T00:00:00Z
    pub fn at_epoch() -> Self {
        Self::new(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock();
        *now += by;
    }
}

impl TimeSource for ManualTimeSource {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock()
    }
}

/// A store whose every call fails with an I/O error.
#[derive(Debug, Default)]
pub struct FailingKVStore;

impl FailingKVStore {
    fn failure() -> KVStoreError {
        KVStoreError::IOError {
            message: "simulated storage outage".to_string(),
        }
    }
}

impl KeyValueStore for FailingKVStore {
    fn get(&self, _key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        Err(Self::failure())
    }

    fn put(&mut self, _key: &[u8], _value: &[u8]) -> Result<(), KVStoreError> {
        Err(Self::failure())
    }

    fn prefix_scan(&self, _prefix: &[u8]) -> Result<ScanResult, KVStoreError> {
        Err(Self::failure())
    }
}

/// Offer submission with no description.
pub fn new_offer(email: &str, amount: i64) -> NewOffer {
    NewOffer {
        email: email.to_string(),
        amount: amount.into(),
        description: None,
    }
}
