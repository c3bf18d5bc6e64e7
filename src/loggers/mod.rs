//! Ready-made loggers for the console and for files

pub mod console;
pub mod file;

pub use console::{ConsoleLogger, ConsoleLoggerBuilder};
pub use file::{FileLogger, FileLoggerBuilder};
