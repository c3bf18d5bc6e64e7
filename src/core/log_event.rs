//! Log event structure

use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use super::render::Render;
use super::timestamp::TimestampFormat;
use chrono::{DateTime, Utc};
use colored::Colorize;
use std::fmt;

/// One record travelling from a producer to the background writer.
///
/// An event owns its source and message outright and is not `Clone`: it is
/// moved into a queue on insert and moved out again by the writer, so there is
/// never more than one owner. Rendering of the source and message is deferred
/// until the writer formats the line, keeping producers off the formatting path.
pub struct LogEvent {
    level: LogLevel,
    timestamp: DateTime<Utc>,
    source: Box<dyn Render>,
    message: Box<dyn Render>,
}

impl LogEvent {
    /// Escape control characters so a single event always renders as a single
    /// line and cannot forge additional entries.
    fn sanitize(text: &str) -> String {
        text.replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    /// Build an event from owned parts, capturing the current time.
    pub fn new(level: LogLevel, source: impl Render + 'static, message: impl Render + 'static) -> Self {
        Self {
            level,
            timestamp: Utc::now(),
            source: Box::new(source),
            message: Box::new(message),
        }
    }

    /// Build an event from parts that may be missing.
    ///
    /// Fails with [`LoggerError::InvalidEvent`] when either part is `None`; no
    /// event is created in that case.
    pub fn try_new(
        level: LogLevel,
        source: Option<Box<dyn Render>>,
        message: Option<Box<dyn Render>>,
    ) -> Result<Self> {
        let message = message.ok_or_else(|| LoggerError::invalid_event("message"))?;
        let source = source.ok_or_else(|| LoggerError::invalid_event("source"))?;

        Ok(Self {
            level,
            timestamp: Utc::now(),
            source,
            message,
        })
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Rendered, sanitized source text
    pub fn source(&self) -> String {
        Self::sanitize(&self.source.render())
    }

    /// Rendered, sanitized message text
    pub fn message(&self) -> String {
        Self::sanitize(&self.message.render())
    }

    /// Format as `<LEVEL>: <timestamp> <message> from <source>\n` using the
    /// default timestamp format.
    pub fn render(&self) -> String {
        self.render_with(&TimestampFormat::default())
    }

    pub fn render_with(&self, format: &TimestampFormat) -> String {
        self.render_styled(format, false)
    }

    /// Like [`render_with`](Self::render_with), optionally coloring the level
    /// token for terminal output.
    pub fn render_styled(&self, format: &TimestampFormat, colored: bool) -> String {
        let level = if colored {
            self.level
                .as_str()
                .color(self.level.color())
                .to_string()
        } else {
            self.level.as_str().to_string()
        };

        format!(
            "{}: {} {} from {}\n",
            level,
            format.format(&self.timestamp),
            self.message(),
            self.source()
        )
    }
}

impl fmt::Debug for LogEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogEvent")
            .field("level", &self.level)
            .field("timestamp", &self.timestamp)
            .field("source", &self.source())
            .field("message", &self.message())
            .finish()
    }
}
