//! Timestamp formatting shared by listings and health reports

use chrono::{DateTime, SecondsFormat, Utc};
use std::time::SystemTime;

/// RFC 3339 in UTC with millisecond precision, e.g. `2024-05-01T12:00:00.000Z`
pub fn iso_timestamp(time: impl Into<DateTime<Utc>>) -> String {
    time.into().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Current time as an [`iso_timestamp`]
pub fn now_timestamp() -> String {
    iso_timestamp(SystemTime::now())
}
