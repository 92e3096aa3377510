use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TypeError;

const NANOS_PER_SECOND: i32 = 1_000_000_000;

/// An instant in UTC as whole seconds since the Unix epoch plus the
/// nanosecond remainder within that second.
///
/// The field layout matches the `google.protobuf.Timestamp` message
/// (`seconds: int64`, `nanos: int32`) so values embed directly in protocol
/// messages. `nanos` is always in `[0, 1_000_000_000)`.
///
/// Ordering: `seconds` → `nanos`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "TimestampParts")]
pub struct Timestamp {
    seconds: i64,
    nanos: i32,
}

/// Unvalidated wire form; decoding goes through [`Timestamp::from_parts`].
#[derive(Deserialize)]
struct TimestampParts {
    seconds: i64,
    nanos: i32,
}

impl TryFrom<TimestampParts> for Timestamp {
    type Error = TypeError;

    fn try_from(parts: TimestampParts) -> Result<Self, TypeError> {
        Self::from_parts(parts.seconds, parts.nanos)
    }
}

impl Timestamp {
    /// Capture the current wall-clock time in UTC.
    pub fn now_utc() -> Self {
        Self::from_datetime(Utc::now())
    }

    /// Create a timestamp from explicit parts.
    ///
    /// Fails if `nanos` is outside `[0, 1_000_000_000)` or the instant is not
    /// representable as a calendar date.
    pub fn from_parts(seconds: i64, nanos: i32) -> Result<Self, TypeError> {
        let out_of_range = TypeError::InvalidTimestamp { seconds, nanos };
        if !(0..NANOS_PER_SECOND).contains(&nanos) {
            return Err(out_of_range);
        }
        DateTime::<Utc>::from_timestamp(seconds, nanos as u32).ok_or(out_of_range)?;
        Ok(Self { seconds, nanos })
    }

    /// Split a `chrono` UTC datetime into seconds and nanoseconds.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        // chrono encodes a leap second as nanos >= 1e9; fold it into the
        // last representable instant of that second.
        let nanos = dt.timestamp_subsec_nanos().min(NANOS_PER_SECOND as u32 - 1);
        Self {
            seconds: dt.timestamp(),
            nanos: nanos as i32,
        }
    }

    /// Whole seconds since the Unix epoch.
    pub fn seconds(&self) -> i64 {
        self.seconds
    }

    /// Nanosecond remainder within the second.
    pub fn nanos(&self) -> i32 {
        self.nanos
    }

    /// The same instant as a `chrono` UTC datetime.
    pub fn to_datetime(&self) -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(self.seconds, self.nanos as u32).unwrap_or_default()
    }

    /// RFC 3339 rendering with nanosecond precision and a `Z` suffix.
    pub fn to_rfc3339(&self) -> String {
        self.to_datetime().to_rfc3339_opts(SecondsFormat::Nanos, true)
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timestamp({}s.{:09})", self.seconds, self.nanos)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_rfc3339())
    }
}

/// Capture the current time as a UTC [`Timestamp`].
pub fn create_utc_timestamp() -> Timestamp {
    Timestamp::now_utc()
}
