//! Logger configuration

use super::{
    event_queue::DEFAULT_QUEUE_CAPACITY, log_level::LogLevel, overflow_policy::OverflowPolicy,
    timestamp::TimestampFormat,
};
use serde::{Deserialize, Serialize};

/// Settings shared by every logger flavour
///
/// Fields missing from a serialized config fall back to their defaults.
///
/// # Example
///
/// ```
/// use spektral_log::{LogLevel, LoggerConfig, OverflowPolicy};
///
/// let config = LoggerConfig {
///     min_level: LogLevel::Warn,
///     queue_capacity: 1024,
///     ..Default::default()
/// };
/// assert_eq!(config.overflow_policy, OverflowPolicy::Reject);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Events strictly below this level are discarded on insert
    pub min_level: LogLevel,

    /// Capacity of each event queue
    pub queue_capacity: usize,

    pub overflow_policy: OverflowPolicy,

    pub timestamp_format: TimestampFormat,

    /// Color level tokens on console output
    pub colors: bool,

    /// File loggers: start from an empty file
    pub truncate: bool,

    /// File loggers: hold an exclusive lock on the file
    pub lock: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Info,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            overflow_policy: OverflowPolicy::Reject,
            timestamp_format: TimestampFormat::Iso8601,
            colors: false,
            truncate: false,
            lock: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LoggerConfig::default();
        assert_eq!(config.min_level, LogLevel::Info);
        assert_eq!(config.queue_capacity, 50_000);
        assert_eq!(config.overflow_policy, OverflowPolicy::Reject);
        assert!(!config.colors);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: LoggerConfig =
            serde_json::from_str(r#"{"min_level":"WARN","queue_capacity":16,"colors":true}"#)
                .unwrap();

        assert_eq!(config.min_level, LogLevel::Warn);
        assert_eq!(config.queue_capacity, 16);
        assert!(config.colors);
        assert_eq!(config.timestamp_format, TimestampFormat::Iso8601);
        assert!(!config.truncate);
    }
}
