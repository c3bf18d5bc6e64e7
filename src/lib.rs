//! # Spektral Log
//!
//! Asynchronous logging: producers hand events to a bounded queue and return
//! at once, while a background writer formats them and writes them to the
//! console or a file.
//!
//! ## Features
//!
//! - **Non-blocking inserts**: formatting and I/O happen on the writer thread
//! - **Guaranteed drain**: `close` (or drop) returns only after every accepted
//!   event has been written
//! - **Backpressure**: full queues report `QueueFull` or block, per policy
//! - **Thread Safe**: any number of threads may insert concurrently
//!
//! ## Output format
//!
//! One UTF-8 line per event:
//!
//! ```text
//! <LEVEL>: <timestamp> <message> from <source>
//! ```

pub mod core;
pub mod loggers;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        ErrorHandler, LogEvent, LogLevel, Logger, LoggerBuilder, LoggerConfig, LoggerError,
        LoggerMetrics, OverflowCallback, OverflowPolicy, Render, Result, Sink, TimestampFormat,
        WriterState,
    };
    pub use crate::loggers::{ConsoleLogger, FileLogger};
    pub use crate::sinks::{ConsoleSink, FileSink};
}

pub use crate::core::{
    ErrorHandler, EventQueue, Lane, LogEvent, LogLevel, Logger, LoggerBuilder, LoggerConfig,
    LoggerError, LoggerMetrics, OverflowCallback, OverflowPolicy, Render, Result, Routing, Sink,
    TimestampFormat, Writer, WriterState, DEFAULT_QUEUE_CAPACITY,
};
pub use loggers::{ConsoleLogger, ConsoleLoggerBuilder, FileLogger, FileLoggerBuilder};
