//! Logging macros for ergonomic log message formatting.
//!
//! Each macro formats its arguments like `format!` and inserts the result,
//! evaluating to the `Result` of the insert.
//!
//! # Examples
//!
//! ```
//! use spektral_log::prelude::*;
//! use spektral_log::info;
//!
//! let logger = ConsoleLogger::new(LogLevel::Info).unwrap();
//!
//! // Basic logging
//! info!(logger, "server", "Server started").unwrap();
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "server", "Listening on port {}", port).unwrap();
//! ```

/// Log a formatted message at the given level.
///
/// # Examples
///
/// ```
/// # use spektral_log::prelude::*;
/// # let logger = ConsoleLogger::new(LogLevel::Info).unwrap();
/// use spektral_log::log;
/// log!(logger, LogLevel::Info, "main", "Simple message").unwrap();
/// log!(logger, LogLevel::Error, "main", "Error code: {}", 500).unwrap();
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $source:expr, $($arg:tt)+) => {
        $logger.insert($level, $source, format!($($arg)+))
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use spektral_log::prelude::*;
/// # let logger = ConsoleLogger::new(LogLevel::Info).unwrap();
/// use spektral_log::info;
/// info!(logger, "app", "Processing {} items", 100).unwrap();
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $source:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $source, $($arg)+)
    };
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # use spektral_log::prelude::*;
/// # let logger = ConsoleLogger::new(LogLevel::Info).unwrap();
/// use spektral_log::warn;
/// warn!(logger, "retry", "Retry attempt {} of {}", 3, 5).unwrap();
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr, $source:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $source, $($arg)+)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $source:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $source, $($arg)+)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use spektral_log::prelude::*;
/// # let logger = ConsoleLogger::new(LogLevel::Info).unwrap();
/// use spektral_log::error;
/// error!(logger, "db", "Error code: {}, message: {}", 500, "Internal error").unwrap();
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $source:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $source, $($arg)+)
    };
}
