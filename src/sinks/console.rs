//! Console sink implementation

use crate::core::{LoggerError, Result, Sink};
use std::io::{self, Write};

/// Which process stream a [`ConsoleSink`] writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleStream {
    Stdout,
    Stderr,
}

pub struct ConsoleSink {
    stream: ConsoleStream,
    use_colors: bool,
    closed: bool,
}

impl ConsoleSink {
    pub fn new(stream: ConsoleStream) -> Self {
        Self {
            stream,
            use_colors: false,
            closed: false,
        }
    }

    pub fn stdout() -> Self {
        Self::new(ConsoleStream::Stdout)
    }

    pub fn stderr() -> Self {
        Self::new(ConsoleStream::Stderr)
    }

    /// Color the level token of each line
    ///
    /// # Example
    ///
    /// ```
    /// use spektral_log::sinks::ConsoleSink;
    /// use spektral_log::Sink;
    ///
    /// let sink = ConsoleSink::stderr().with_colors(true);
    /// assert!(sink.supports_color());
    /// ```
    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    pub fn stream(&self) -> ConsoleStream {
        self.stream
    }

    fn write_locked(&self, text: &str) -> io::Result<()> {
        match self.stream {
            ConsoleStream::Stdout => {
                let mut out = io::stdout().lock();
                out.write_all(text.as_bytes())?;
                out.flush()
            }
            ConsoleStream::Stderr => {
                let mut err = io::stderr().lock();
                err.write_all(text.as_bytes())?;
                err.flush()
            }
        }
    }
}

impl Sink for ConsoleSink {
    fn write(&mut self, text: &str) -> Result<()> {
        if self.closed {
            return Err(LoggerError::sink_write(
                self.name(),
                io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"),
            ));
        }
        self.write_locked(text)
            .map_err(|e| LoggerError::sink_write(self.name(), e))
    }

    fn flush(&mut self) -> Result<()> {
        let result = match self.stream {
            ConsoleStream::Stdout => io::stdout().flush(),
            ConsoleStream::Stderr => io::stderr().flush(),
        };
        result.map_err(|e| LoggerError::sink_write(self.name(), e))
    }

    /// Flushes and stops accepting writes; the process stream itself stays open.
    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.flush()
    }

    fn name(&self) -> &str {
        match self.stream {
            ConsoleStream::Stdout => "stdout",
            ConsoleStream::Stderr => "stderr",
        }
    }

    fn supports_color(&self) -> bool {
        self.use_colors
    }
}
