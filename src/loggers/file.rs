//! File logger: every event, one queue, one file

use crate::core::{
    ErrorHandler, LogLevel, Logger, LoggerConfig, OverflowCallback, OverflowPolicy, Result,
    TimestampFormat,
};
use crate::sinks::{FileSink, FileSinkOptions};
use std::ops::Deref;
use std::path::{Path, PathBuf};

/// Logger appending every accepted event to one file.
///
/// The file is opened during construction, so a missing parent directory or
/// a permission problem is reported right away as `SinkOpen`.
///
/// # Example
///
/// ```
/// use spektral_log::{FileLogger, LogLevel};
///
/// let dir = tempfile::tempdir().unwrap();
/// let path = dir.path().join("app.log");
///
/// let logger = FileLogger::builder(&path).min_level(LogLevel::Warn).build().unwrap();
/// logger.warn("main", "disk at 91%").unwrap();
/// logger.close().unwrap();
///
/// let contents = std::fs::read_to_string(&path).unwrap();
/// assert!(contents.ends_with("disk at 91% from main\n"));
/// ```
pub struct FileLogger {
    inner: Logger,
    path: PathBuf,
}

impl FileLogger {
    /// Open `path` for appending with default settings
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::builder(path).build()
    }

    pub fn with_config(path: impl AsRef<Path>, config: LoggerConfig) -> Result<Self> {
        Self::builder(path).config(config).build()
    }

    #[must_use]
    pub fn builder(path: impl AsRef<Path>) -> FileLoggerBuilder {
        FileLoggerBuilder::new(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn into_inner(self) -> Logger {
        self.inner
    }
}

impl Deref for FileLogger {
    type Target = Logger;

    fn deref(&self) -> &Logger {
        &self.inner
    }
}

/// Builder for [`FileLogger`]
pub struct FileLoggerBuilder {
    path: PathBuf,
    config: LoggerConfig,
    on_overflow: Option<OverflowCallback>,
    on_error: Option<ErrorHandler>,
}

impl FileLoggerBuilder {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
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

    /// Empty the file on open instead of appending
    #[must_use = "builder methods return a new value"]
    pub fn truncate(mut self, truncate: bool) -> Self {
        self.config.truncate = truncate;
        self
    }

    /// Take an exclusive lock on the file; fails with `FileLock` if another
    /// process or logger holds it
    #[must_use = "builder methods return a new value"]
    pub fn lock(mut self, lock: bool) -> Self {
        self.config.lock = lock;
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

    pub fn build(self) -> Result<FileLogger> {
        let options = FileSinkOptions {
            truncate: self.config.truncate,
            lock: self.config.lock,
        };
        let sink = FileSink::with_options(&self.path, options)?;

        let mut builder = Logger::builder().config(self.config).sink(sink);
        if let Some(callback) = self.on_overflow {
            builder = builder.on_overflow(callback);
        }
        if let Some(handler) = self.on_error {
            builder = builder.on_error(handler);
        }

        Ok(FileLogger {
            inner: builder.build()?,
            path: self.path,
        })
    }
}
