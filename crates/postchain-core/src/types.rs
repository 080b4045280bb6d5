//! Strong type definitions for Postchain.
//!
//! The transaction type tag and the timestamp both take part in hash inputs,
//! so their binary and textual renderings are fixed here once.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::error::CoreError;

/// The kind of transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i32)]
pub enum TransactionType {
    /// A leaf post with no receiver.
    Post = 0,
    /// A comment on a prior transaction, addressed to its sender.
    Critique = 1,
}

impl TransactionType {
    /// Convert to the i32 wire tag.
    pub fn to_i32(self) -> i32 {
        self as i32
    }

    /// Try to parse from the i32 wire tag.
    pub fn from_i32(value: i32) -> Option<Self> {
        match value {
            0 => Some(Self::Post),
            1 => Some(Self::Critique),
            _ => None,
        }
    }

    /// Fixed-width big-endian tag, as fed into the transaction hash.
    pub fn to_be_bytes(self) -> [u8; 4] {
        self.to_i32().to_be_bytes()
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Post => f.write_str("POST"),
            Self::Critique => f.write_str("CRITIQUE"),
        }
    }
}

/// A UTC instant with nanosecond resolution.
///
/// The canonical rendering is RFC 3339 with exactly nine fractional digits
/// and a `Z` suffix, e.g. `2023-11-14T22:13:20.123456789Z`. Every hash input
/// and every serialized form uses this rendering.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// The current wall-clock time.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Create from nanoseconds since the Unix epoch.
    pub fn from_unix_nanos(nanos: i64) -> Self {
        let secs = nanos.div_euclid(1_000_000_000);
        let sub = nanos.rem_euclid(1_000_000_000) as u32;
        // Every i64 nanosecond count is inside chrono's supported range.
        Self(DateTime::from_timestamp(secs, sub).unwrap_or_default())
    }

    /// Nanoseconds since the Unix epoch, or `None` outside the years
    /// 1677..=2262 where the count no longer fits in an `i64`.
    pub fn unix_nanos(&self) -> Option<i64> {
        self.0.timestamp_nanos_opt()
    }

    /// Parse an RFC 3339 string.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        DateTime::parse_from_rfc3339(s)
            .map(|dt| Self(dt.with_timezone(&Utc)))
            .map_err(|e| CoreError::DecodingError(format!("invalid timestamp {s:?}: {e}")))
    }

    /// The canonical textual rendering used in hash inputs.
    pub fn canonical_string(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Nanos, true)
    }

    /// The underlying chrono value.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timestamp({})", self.canonical_string())
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical_string())
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.canonical_string())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
