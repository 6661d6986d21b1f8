//! # Timestamp Value Object
//!
//! UTC point in time used for shipment and tracking records.
//!
//! # Examples
//!
//! ```
//! use delivery_gateway::domain::value_objects::timestamp::Timestamp;
//!
//! let created = Timestamp::from_secs(1_700_000_000).unwrap();
//! let delivered = created.add_secs(86_400);
//!
//! assert!(delivered.is_after(&created));
//! ```

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A UTC timestamp.
///
/// Serialized as an RFC 3339 string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from Unix milliseconds.
    ///
    /// Returns `None` if the value is out of range.
    #[must_use]
    pub fn from_millis(millis: i64) -> Option<Self> {
        DateTime::from_timestamp_millis(millis).map(Self)
    }

    /// Creates a timestamp from Unix seconds.
    ///
    /// Returns `None` if the value is out of range.
    #[must_use]
    pub fn from_secs(secs: i64) -> Option<Self> {
        DateTime::from_timestamp(secs, 0).map(Self)
    }

    /// Returns Unix milliseconds.
    #[inline]
    #[must_use]
    pub fn timestamp_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    /// Returns a new timestamp shifted by `secs` seconds.
    #[must_use]
    pub fn add_secs(&self, secs: i64) -> Self {
        Self(self.0 + Duration::seconds(secs))
    }

    /// Returns true if this timestamp is strictly before `other`.
    #[inline]
    #[must_use]
    pub fn is_before(&self, other: &Self) -> bool {
        self.0 < other.0
    }

    /// Returns true if this timestamp is strictly after `other`.
    #[inline]
    #[must_use]
    pub fn is_after(&self, other: &Self) -> bool {
        self.0 > other.0
    }

    /// Formats as RFC 3339.
    #[must_use]
    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339()
    }

    /// Returns the wrapped `DateTime`.
    #[inline]
    #[must_use]
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

impl FromStr for Timestamp {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DateTime::parse_from_rfc3339(s).map(|dt| Self(dt.with_timezone(&Utc)))
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

impl From<Timestamp> for DateTime<Utc> {
    fn from(ts: Timestamp) -> Self {
        ts.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn from_millis_roundtrips() {
        let ts = Timestamp::from_millis(1_700_000_000_123).unwrap();
        assert_eq!(ts.timestamp_millis(), 1_700_000_000_123);
    }

    #[test]
    fn ordering_helpers() {
        let a = Timestamp::from_secs(100).unwrap();
        let b = a.add_secs(5);
        assert!(a.is_before(&b));
        assert!(b.is_after(&a));
        assert!(!a.is_after(&a));
    }

    #[test]
    fn parses_rfc3339_with_offset() {
        let ts: Timestamp = "2024-03-01T12:00:00+01:00".parse().unwrap();
        assert_eq!(ts.to_rfc3339(), "2024-03-01T11:00:00+00:00");
    }

    #[test]
    fn rejects_garbage() {
        assert!("yesterday".parse::<Timestamp>().is_err());
    }

    #[test]
    fn serializes_transparently() {
        let ts = Timestamp::from_secs(0).unwrap();
        let json = serde_json::to_string(&ts).unwrap();
        assert_eq!(json, "\"1970-01-01T00:00:00Z\"");
    }
}
