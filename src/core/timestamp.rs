//! Timestamp rendering for formatted log lines
//!
//! The timestamp is captured once when an event is built and is only used for
//! display; queue order, not the clock, decides output order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How the `<timestamp>` field of a log line is rendered
///
/// # Examples
///
/// ```
/// use spektral_log::TimestampFormat;
/// use chrono::Utc;
///
/// let text = TimestampFormat::Iso8601.format(&Utc::now());
/// assert!(text.ends_with('Z'));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// ISO 8601 with milliseconds: `2025-01-08T10:30:45.123Z`
    #[default]
    Iso8601,

    /// ISO 8601 with microseconds: `2025-01-08T10:30:45.123456Z`
    Iso8601Micros,

    /// Space separated date and time with nanoseconds:
    /// `2025-01-08 10:30:45.123456000`
    DateTimeNanos,

    /// RFC 3339 with offset: `2025-01-08T10:30:45.123+00:00`
    Rfc3339,

    /// Unix timestamp in milliseconds: `1736332245123`
    UnixMillis,

    /// Any strftime-compatible format string
    Custom(String),
}

impl TimestampFormat {
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::Iso8601 => datetime.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            TimestampFormat::Iso8601Micros => datetime.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string(),
            TimestampFormat::DateTimeNanos => datetime.format("%Y-%m-%d %H:%M:%S%.9f").to_string(),
            TimestampFormat::Rfc3339 => {
                datetime.to_rfc3339_opts(chrono::SecondsFormat::Millis, false)
            }
            TimestampFormat::UnixMillis => datetime.timestamp_millis().to_string(),
            TimestampFormat::Custom(format_str) => datetime.format(format_str).to_string(),
        }
    }
}
