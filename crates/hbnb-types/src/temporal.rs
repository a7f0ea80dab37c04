use std::fmt;

use chrono::{DateTime, Duration, NaiveDateTime, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TypeError;

/// Rendering used for every persisted timestamp: always six fractional digits.
pub const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Audit timestamp with microsecond precision.
///
/// Timestamps are naive UTC wall-clock values, truncated to microseconds so
/// that rendering to ISO-8601 and parsing back yields the same value.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    /// The current wall-clock time.
    pub fn now() -> Self {
        Self::from_naive(Utc::now().naive_utc())
    }

    /// The current time, or one microsecond past `previous` if the clock has
    /// not moved beyond it. The result is always strictly after `previous`;
    /// fails when `previous` has no representable successor.
    pub fn now_after(previous: Timestamp) -> Result<Self, TypeError> {
        let now = Self::now();
        if now > previous {
            return Ok(now);
        }
        previous
            .0
            .checked_add_signed(Duration::microseconds(1))
            .map(Self)
            .ok_or_else(|| TypeError::InvalidTimestamp {
                value: previous.to_iso(),
                reason: "no later timestamp is representable".into(),
            })
    }

    pub fn from_naive(dt: NaiveDateTime) -> Self {
        Self(dt.trunc_subsecs(6))
    }

    /// Parse an ISO-8601 string.
    ///
    /// Accepts `YYYY-MM-DDTHH:MM:SS` with optional fractional seconds, and
    /// RFC 3339 strings carrying an offset (converted to UTC).
    pub fn parse(s: &str) -> Result<Self, TypeError> {
        match s.parse::<NaiveDateTime>() {
            Ok(dt) => Ok(Self::from_naive(dt)),
            Err(naive_err) => DateTime::parse_from_rfc3339(s)
                .map(|dt| Self::from_naive(dt.naive_utc()))
                .map_err(|_| TypeError::InvalidTimestamp {
                    value: s.to_string(),
                    reason: naive_err.to_string(),
                }),
        }
    }

    /// ISO-8601 rendering, e.g. `2023-01-01T00:00:00.000000`.
    pub fn to_iso(&self) -> String {
        self.0.format(ISO_FORMAT).to_string()
    }

    pub fn as_naive(&self) -> &NaiveDateTime {
        &self.0
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timestamp({})", self.to_iso())
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_iso())
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_iso())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Timestamp::parse(&s).map_err(serde::de::Error::custom)
    }
}
