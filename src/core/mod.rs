//! Core logger types and traits

pub mod config;
pub mod error;
pub mod event_queue;
pub mod log_event;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod overflow_policy;
pub mod render;
pub mod sink;
pub mod timestamp;
pub mod writer;

pub use config::LoggerConfig;
pub use error::{LoggerError, Result};
pub use event_queue::{EventQueue, DEFAULT_QUEUE_CAPACITY};
pub use log_event::LogEvent;
pub use log_level::LogLevel;
pub use logger::{Logger, LoggerBuilder, Routing};
pub use metrics::LoggerMetrics;
pub use overflow_policy::{OverflowCallback, OverflowPolicy};
pub use render::Render;
pub use sink::Sink;
pub use timestamp::TimestampFormat;
pub use writer::{ErrorHandler, Lane, Writer, WriterState};
