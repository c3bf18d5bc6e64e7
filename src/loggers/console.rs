//! Console logger: stdout for everything but errors, stderr for errors

use crate::core::{
    ErrorHandler, LogLevel, Logger, LoggerConfig, OverflowCallback, OverflowPolicy, Result,
    TimestampFormat,
};
use crate::sinks::ConsoleSink;
use parking_lot::Mutex;
use std::ops::Deref;
use std::sync::Arc;

static GLOBAL: Mutex<Option<Arc<ConsoleLogger>>> = parking_lot::const_mutex(None);

/// Logger writing `INFO`, `WARN` and `DEBUG` to stdout and `ERROR` to stderr.
///
/// Each stream has its own queue; the writer alternates between them.
///
/// # Example
///
/// ```
/// use spektral_log::{ConsoleLogger, LogLevel};
///
/// let logger = ConsoleLogger::new(LogLevel::Info).unwrap();
/// logger.info("main", "listening on port 8080").unwrap();
/// logger.error("main", "bind failed").unwrap();
/// logger.close().unwrap();
/// ```
pub struct ConsoleLogger {
    inner: Logger,
}

impl ConsoleLogger {
    pub fn new(min_level: LogLevel) -> Result<Self> {
        Self::builder().min_level(min_level).build()
    }

    #[must_use]
    pub fn builder() -> ConsoleLoggerBuilder {
        ConsoleLoggerBuilder::new()
    }

    /// The process-wide console logger, created on first use.
    ///
    /// Only the first caller's `min_level` takes effect. Concurrent first
    /// calls still produce a single instance.
    ///
    /// # Example
    ///
    /// ```
    /// use spektral_log::{ConsoleLogger, LogLevel};
    ///
    /// let a = ConsoleLogger::global(LogLevel::Warn).unwrap();
    /// let b = ConsoleLogger::global(LogLevel::Error).unwrap();
    /// assert!(std::sync::Arc::ptr_eq(&a, &b));
    /// assert_eq!(b.min_level(), LogLevel::Warn);
    ///
    /// assert!(ConsoleLogger::shutdown_global().unwrap());
    /// ```
    pub fn global(min_level: LogLevel) -> Result<Arc<ConsoleLogger>> {
        let mut slot = GLOBAL.lock();
        if let Some(ref logger) = *slot {
            return Ok(Arc::clone(logger));
        }

        let logger = Arc::new(ConsoleLogger::new(min_level)?);
        *slot = Some(Arc::clone(&logger));
        Ok(logger)
    }

    /// Close the process-wide logger and forget it.
    ///
    /// Returns `false` when there was none. Handles obtained earlier stay
    /// valid but reject further inserts; the next [`global`](Self::global)
    /// call creates a fresh instance.
    pub fn shutdown_global() -> Result<bool> {
        let Some(logger) = GLOBAL.lock().take() else {
            return Ok(false);
        };
        logger.close()?;
        Ok(true)
    }

    pub fn into_inner(self) -> Logger {
        self.inner
    }
}

impl Deref for ConsoleLogger {
    type Target = Logger;

    fn deref(&self) -> &Logger {
        &self.inner
    }
}

/// Builder for [`ConsoleLogger`]
pub struct ConsoleLoggerBuilder {
    config: LoggerConfig,
    on_overflow: Option<OverflowCallback>,
    on_error: Option<ErrorHandler>,
}

impl ConsoleLoggerBuilder {
    pub fn new() -> Self {
        Self {
            config: LoggerConfig::default(),
            on_overflow: None,
            on_error: None,
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn config(mut self, config: LoggerConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.config.min_level = level;
        self
    }

    /// Color the level token with ANSI escapes
    #[must_use = "builder methods return a new value"]
    pub fn colors(mut self, enabled: bool) -> Self {
        self.config.colors = enabled;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.config.queue_capacity = capacity;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn overflow_policy(mut self, policy: OverflowPolicy) -> Self {
        self.config.overflow_policy = policy;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.config.timestamp_format = format;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn on_overflow(mut self, callback: OverflowCallback) -> Self {
        self.on_overflow = Some(callback);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn on_error(mut self, handler: ErrorHandler) -> Self {
        self.on_error = Some(handler);
        self
    }

    pub fn build(self) -> Result<ConsoleLogger> {
        let colors = self.config.colors;
        let mut builder = Logger::builder()
            .config(self.config)
            .sink(ConsoleSink::stdout().with_colors(colors))
            .error_sink(ConsoleSink::stderr().with_colors(colors));

        if let Some(callback) = self.on_overflow {
            builder = builder.on_overflow(callback);
        }
        if let Some(handler) = self.on_error {
            builder = builder.on_error(handler);
        }

        Ok(ConsoleLogger {
            inner: builder.build()?,
        })
    }
}

impl Default for ConsoleLoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
