//! Error types for the logging pipeline

use super::log_level::LogLevel;

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Event built without one of its required parts
    #[error("Invalid log event: missing {field}")]
    InvalidEvent { field: &'static str },

    /// Bounded queue reached capacity
    #[error("Log queue full: rejected {level} event ({capacity} events buffered)")]
    QueueFull { level: LogLevel, capacity: usize },

    /// Insert attempted after shutdown was requested
    #[error("Logger already closed")]
    LoggerClosed,

    /// Destination could not be opened or created
    #[error("Failed to open sink '{path}': {source}")]
    SinkOpen {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Exclusive lock on a log file is held elsewhere
    #[error("Failed to acquire file lock on '{path}'")]
    FileLock { path: String },

    /// Write, flush or close on a sink failed
    #[error("Write to sink '{sink}' failed: {source}")]
    SinkWrite {
        sink: String,
        #[source]
        source: std::io::Error,
    },

    /// Background writer or one of its sinks panicked
    #[error("Writer panicked: {message}")]
    WriterPanicked { message: String },

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LoggerError {
    /// Create an invalid event error naming the missing part
    pub fn invalid_event(field: &'static str) -> Self {
        LoggerError::InvalidEvent { field }
    }

    /// Create a queue full error for the rejected level
    pub fn queue_full(level: LogLevel, capacity: usize) -> Self {
        LoggerError::QueueFull { level, capacity }
    }

    /// Create a sink open error with the offending path
    pub fn sink_open(path: impl Into<String>, source: std::io::Error) -> Self {
        LoggerError::SinkOpen {
            path: path.into(),
            source,
        }
    }

    /// Create a file lock error
    pub fn file_lock(path: impl Into<String>) -> Self {
        LoggerError::FileLock { path: path.into() }
    }

    /// Create a sink write error
    pub fn sink_write(sink: impl Into<String>, source: std::io::Error) -> Self {
        LoggerError::SinkWrite {
            sink: sink.into(),
            source,
        }
    }

    /// Create a writer panic error
    pub fn writer_panicked(message: impl Into<String>) -> Self {
        LoggerError::WriterPanicked {
            message: message.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Whether the caller can reasonably retry or carry on.
    ///
    /// A full queue drains over time and a closed logger only signals misuse,
    /// so neither leaves the process in a broken state.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            LoggerError::QueueFull { .. } | LoggerError::LoggerClosed
        )
    }
}
