//! Main logger implementation

use super::{
    config::LoggerConfig,
    error::{LoggerError, Result},
    event_queue::EventQueue,
    log_event::LogEvent,
    log_level::LogLevel,
    metrics::LoggerMetrics,
    overflow_policy::{OverflowCallback, OverflowPolicy},
    render::Render,
    sink::Sink,
    timestamp::TimestampFormat,
    writer::{ErrorHandler, Lane, Writer, WriterState},
};
use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Arc;

/// How events are assigned to queues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Routing {
    /// Every event goes to the one queue
    Single,
    /// `Error` events go to the second queue, everything else to the first
    SplitErrors,
}

impl Routing {
    fn lane_for(&self, level: LogLevel) -> usize {
        match (self, level) {
            (Routing::SplitErrors, LogLevel::Error) => 1,
            _ => 0,
        }
    }
}

/// Asynchronous logger: producers insert, a background writer drains.
///
/// Construction starts the writer; [`close`](Logger::close) (or drop) stops
/// accepting events, waits until everything already accepted has reached its
/// sink, and then releases the sinks. `insert` never performs I/O.
pub struct Logger {
    min_level: RwLock<LogLevel>,
    queues: Vec<Arc<EventQueue>>,
    routing: Routing,
    writer: Mutex<Writer>,
    writer_state: Arc<AtomicU8>,
    closed: AtomicBool,
    metrics: Arc<LoggerMetrics>,
    overflow_policy: OverflowPolicy,
    on_overflow: Option<OverflowCallback>,
}

impl Logger {
    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use spektral_log::prelude::*;
    ///
    /// let logger = Logger::builder()
    ///     .min_level(LogLevel::Warn)
    ///     .capacity(1000)
    ///     .sink(ConsoleSink::stdout())
    ///     .error_sink(ConsoleSink::stderr())
    ///     .build()
    ///     .unwrap();
    ///
    /// logger.warn("main", "cache miss rate above 20%").unwrap();
    /// logger.close().unwrap();
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Record an event built from `level`, `source` and `message`.
    ///
    /// Fails with `LoggerClosed` once [`close`](Logger::close) has been called.
    /// Events below the minimum level are discarded and still count as success.
    /// A full queue is handled according to the overflow policy and otherwise
    /// reported as `QueueFull`.
    pub fn insert(
        &self,
        level: LogLevel,
        source: impl Render + 'static,
        message: impl Render + 'static,
    ) -> Result<()> {
        if !self.admit(level)? {
            return Ok(());
        }
        self.enqueue(LogEvent::new(level, source, message))
    }

    /// Record an already built event, taking ownership of it.
    pub fn insert_event(&self, event: LogEvent) -> Result<()> {
        if !self.admit(event.level())? {
            return Ok(());
        }
        self.enqueue(event)
    }

    #[inline]
    pub fn info(&self, source: impl Render + 'static, message: impl Render + 'static) -> Result<()> {
        self.insert(LogLevel::Info, source, message)
    }

    #[inline]
    pub fn warn(&self, source: impl Render + 'static, message: impl Render + 'static) -> Result<()> {
        self.insert(LogLevel::Warn, source, message)
    }

    #[inline]
    pub fn debug(&self, source: impl Render + 'static, message: impl Render + 'static) -> Result<()> {
        self.insert(LogLevel::Debug, source, message)
    }

    #[inline]
    pub fn error(&self, source: impl Render + 'static, message: impl Render + 'static) -> Result<()> {
        self.insert(LogLevel::Error, source, message)
    }

    /// Closed check first, then the level filter. `Ok(false)` means filtered.
    fn admit(&self, level: LogLevel) -> Result<bool> {
        if self.is_closed() {
            return Err(LoggerError::LoggerClosed);
        }
        if level < *self.min_level.read() {
            self.metrics.record_filtered();
            return Ok(false);
        }
        Ok(true)
    }

    fn enqueue(&self, event: LogEvent) -> Result<()> {
        let queue = &self.queues[self.routing.lane_for(event.level())];

        let result = match self.overflow_policy {
            OverflowPolicy::Reject => queue.push(event),
            OverflowPolicy::Block => {
                if queue.len() >= queue.capacity() {
                    self.metrics.record_block();
                }
                queue.push_blocking(event)
            }
            OverflowPolicy::BlockWithTimeout(timeout) => {
                if queue.len() >= queue.capacity() {
                    self.metrics.record_block();
                }
                queue.push_timeout(event, timeout)
            }
        };

        match result {
            Ok(()) => {
                self.metrics.record_accepted();
                Ok(())
            }
            Err(e @ LoggerError::QueueFull { .. }) => {
                self.alert_queue_full();
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    /// Notify the overflow callback, or warn on stderr on the first rejection
    /// and every thousandth after it.
    fn alert_queue_full(&self) {
        let count = self.metrics.record_queue_full() + 1;

        if let Some(ref callback) = self.on_overflow {
            callback(count);
        } else if count == 1 || count % 1000 == 0 {
            eprintln!(
                "[LOGGER WARNING] Queue full, {} events rejected. \
                 Consider increasing capacity or using a blocking overflow policy.",
                count
            );
        }
    }

    pub fn min_level(&self) -> LogLevel {
        *self.min_level.read()
    }

    pub fn set_min_level(&self, level: LogLevel) {
        *self.min_level.write() = level;
    }

    /// Whether `close` has been requested
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Events currently buffered across all queues
    pub fn queue_len(&self) -> usize {
        self.queues.iter().map(|queue| queue.len()).sum()
    }

    /// Capacity of each queue
    pub fn capacity(&self) -> usize {
        self.queues.first().map_or(0, |queue| queue.capacity())
    }

    pub fn writer_state(&self) -> WriterState {
        WriterState::from_u8(self.writer_state.load(Ordering::Acquire))
    }

    /// Get the logger metrics for detailed observability
    ///
    /// # Example
    ///
    /// ```
    /// use spektral_log::prelude::*;
    ///
    /// let logger = Logger::builder().sink(ConsoleSink::stdout()).build().unwrap();
    /// logger.info("main", "hello").unwrap();
    /// logger.close().unwrap();
    ///
    /// let metrics = logger.metrics();
    /// assert_eq!(metrics.accepted(), 1);
    /// assert_eq!(metrics.written(), 1);
    /// ```
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Stop accepting events and block until every accepted event is written.
    ///
    /// After this returns the sinks are flushed and closed. Safe to call more
    /// than once and from several threads; later calls wait for the first to
    /// finish and then return `Ok(())`.
    pub fn close(&self) -> Result<()> {
        self.closed.store(true, Ordering::Release);
        self.writer.lock().stop()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        match self.close() {
            Ok(()) => {}
            Err(e @ LoggerError::WriterPanicked { .. }) => {
                eprintln!("[LOGGER CRITICAL] Queued events may be lost: {}", e);
            }
            Err(e) => eprintln!("[LOGGER ERROR] Failed to close logger: {}", e),
        }

        let rejected = self.metrics.queue_full_events();
        if rejected > 0 {
            eprintln!(
                "[LOGGER WARNING] Logger closed after rejecting {} events on full queues",
                rejected
            );
        }
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use spektral_log::prelude::*;
/// use std::sync::Arc;
///
/// let logger = Logger::builder()
///     .min_level(LogLevel::Debug)
///     .sink(ConsoleSink::stdout())
///     .capacity(1000)
///     .overflow_policy(OverflowPolicy::Reject)
///     .on_overflow(Arc::new(|count| {
///         eprintln!("ALERT: {} events rejected", count);
///     }))
///     .build()
///     .unwrap();
/// ```
pub struct LoggerBuilder {
    config: LoggerConfig,
    sink: Option<Box<dyn Sink>>,
    error_sink: Option<Box<dyn Sink>>,
    on_overflow: Option<OverflowCallback>,
    on_error: Option<ErrorHandler>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            config: LoggerConfig::default(),
            sink: None,
            error_sink: None,
            on_overflow: None,
            on_error: None,
        }
    }

    /// Replace every setting at once
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

    /// Capacity of each queue; must be at least 1
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

    /// Set a callback for full-queue notifications
    ///
    /// # Example
    ///
    /// ```
    /// use spektral_log::prelude::*;
    /// use std::sync::Arc;
    ///
    /// let logger = Logger::builder()
    ///     .sink(ConsoleSink::stdout())
    ///     .on_overflow(Arc::new(|count| {
    ///         eprintln!("Warning: {} events rejected", count);
    ///     }))
    ///     .build()
    ///     .unwrap();
    /// ```
    #[must_use = "builder methods return a new value"]
    pub fn on_overflow(mut self, callback: OverflowCallback) -> Self {
        self.on_overflow = Some(callback);
        self
    }

    /// Observe failures inside the writer instead of printing them to stderr
    #[must_use = "builder methods return a new value"]
    pub fn on_error(mut self, handler: ErrorHandler) -> Self {
        self.on_error = Some(handler);
        self
    }

    /// The destination for all events (or all but `Error` when an error
    /// sink is set)
    #[must_use = "builder methods return a new value"]
    pub fn sink<S: Sink + 'static>(self, sink: S) -> Self {
        self.boxed_sink(Box::new(sink))
    }

    #[must_use = "builder methods return a new value"]
    pub fn boxed_sink(mut self, sink: Box<dyn Sink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Route `Error` events to their own queue and sink
    #[must_use = "builder methods return a new value"]
    pub fn error_sink<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.error_sink = Some(Box::new(sink));
        self
    }

    /// Build the Logger and start its writer
    pub fn build(self) -> Result<Logger> {
        let sink = self
            .sink
            .ok_or_else(|| LoggerError::config("LoggerBuilder", "a sink is required"))?;
        let capacity = self.config.queue_capacity;

        let mut queues = vec![Arc::new(EventQueue::new(capacity)?)];
        let mut lanes = vec![Lane::new(Arc::clone(&queues[0]), sink)];
        let routing = match self.error_sink {
            Some(error_sink) => {
                let queue = Arc::new(EventQueue::new(capacity)?);
                lanes.push(Lane::new(Arc::clone(&queue), error_sink));
                queues.push(queue);
                Routing::SplitErrors
            }
            None => Routing::Single,
        };

        let metrics = Arc::new(LoggerMetrics::new());
        let writer = Writer::spawn(
            lanes,
            self.config.timestamp_format,
            Arc::clone(&metrics),
            self.on_error,
        )?;

        Ok(Logger {
            min_level: RwLock::new(self.config.min_level),
            queues,
            routing,
            writer_state: writer.state_cell(),
            writer: Mutex::new(writer),
            closed: AtomicBool::new(false),
            metrics,
            overflow_policy: self.config.overflow_policy,
            on_overflow: self.on_overflow,
        })
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::time::Duration;

    /// Captures lines into a shared buffer
    #[derive(Clone, Default)]
    struct MemorySink {
        lines: Arc<Mutex<Vec<String>>>,
        gate: Option<Arc<Mutex<()>>>,
    }

    impl Sink for MemorySink {
        fn write(&mut self, text: &str) -> Result<()> {
            // Holding the gate lock from a test stalls the writer
            let _guard = self.gate.as_ref().map(|gate| gate.lock());
            self.lines.lock().push(text.to_string());
            Ok(())
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }

        fn close(&mut self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "memory"
        }
    }

    struct BrokenSink;

    impl Sink for BrokenSink {
        fn write(&mut self, _text: &str) -> Result<()> {
            Err(LoggerError::sink_write(
                "broken",
                io::Error::new(io::ErrorKind::Other, "device gone"),
            ))
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }

        fn close(&mut self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "broken"
        }
    }

    #[test]
    fn test_builder_requires_sink() {
        let result = Logger::builder().build();
        assert!(matches!(
            result,
            Err(LoggerError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_builder_rejects_zero_capacity() {
        let result = Logger::builder()
            .capacity(0)
            .sink(MemorySink::default())
            .build();
        assert!(matches!(
            result,
            Err(LoggerError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_builder_default() {
        let logger = LoggerBuilder::default()
            .sink(MemorySink::default())
            .build()
            .unwrap();

        assert_eq!(logger.min_level(), LogLevel::Info);
        assert_eq!(logger.capacity(), 50_000);
        assert_eq!(logger.writer_state(), WriterState::Running);
    }

    #[test]
    fn test_insert_and_close_delivers_in_order() {
        let sink = MemorySink::default();
        let logger = Logger::builder().sink(sink.clone()).build().unwrap();

        for i in 0..25 {
            logger.info("main", i).unwrap();
        }
        logger.close().unwrap();

        let lines = sink.lines.lock();
        assert_eq!(lines.len(), 25);
        for (i, line) in lines.iter().enumerate() {
            assert!(line.ends_with(&format!(" {} from main\n", i)), "{}", line);
        }
        assert_eq!(logger.writer_state(), WriterState::Stopped);
    }

    #[test]
    fn test_filter_counts_as_success() {
        let sink = MemorySink::default();
        let logger = Logger::builder()
            .min_level(LogLevel::Debug)
            .sink(sink.clone())
            .build()
            .unwrap();

        assert!(logger.info("main", "dropped").is_ok());
        assert!(logger.warn("main", "dropped").is_ok());
        logger.debug("main", "kept").unwrap();
        logger.error("main", "kept").unwrap();
        logger.close().unwrap();

        assert_eq!(sink.lines.lock().len(), 2);
        assert_eq!(logger.metrics().filtered(), 2);
        assert_eq!(logger.metrics().accepted(), 2);
    }

    #[test]
    fn test_set_min_level_at_runtime() {
        let sink = MemorySink::default();
        let logger = Logger::builder().sink(sink.clone()).build().unwrap();

        logger.set_min_level(LogLevel::Error);
        logger.warn("main", "hidden").unwrap();
        logger.error("main", "shown").unwrap();
        logger.close().unwrap();

        let lines = sink.lines.lock();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("ERROR: "));
    }

    #[test]
    fn test_insert_after_close_fails() {
        let logger = Logger::builder()
            .sink(MemorySink::default())
            .build()
            .unwrap();
        logger.close().unwrap();
        logger.close().unwrap();

        assert!(logger.is_closed());
        assert!(matches!(
            logger.info("main", "late"),
            Err(LoggerError::LoggerClosed)
        ));
        // Closed beats filtered
        logger.set_min_level(LogLevel::Error);
        assert!(matches!(
            logger.info("main", "late"),
            Err(LoggerError::LoggerClosed)
        ));
    }

    #[test]
    fn test_split_errors_routing() {
        let out = MemorySink::default();
        let err = MemorySink::default();
        let logger = Logger::builder()
            .sink(out.clone())
            .error_sink(err.clone())
            .build()
            .unwrap();

        logger.info("main", "a").unwrap();
        logger.warn("main", "b").unwrap();
        logger.debug("main", "c").unwrap();
        logger.error("main", "d").unwrap();
        logger.close().unwrap();

        assert_eq!(out.lines.lock().len(), 3);
        let err_lines = err.lines.lock();
        assert_eq!(err_lines.len(), 1);
        assert!(err_lines[0].starts_with("ERROR: "));
    }

    #[test]
    fn test_queue_full_is_reported() {
        let gate = Arc::new(Mutex::new(()));
        let sink = MemorySink {
            gate: Some(Arc::clone(&gate)),
            ..Default::default()
        };
        let overflow_count = Arc::new(std::sync::atomic::AtomicU64::new(0));
        let overflow_clone = Arc::clone(&overflow_count);

        let logger = Logger::builder()
            .capacity(2)
            .sink(sink.clone())
            .on_overflow(Arc::new(move |count| {
                overflow_clone.store(count, Ordering::Relaxed);
            }))
            .build()
            .unwrap();

        let held = gate.lock();
        // The writer takes the first event and blocks inside the sink,
        // leaving the queue itself empty.
        logger.info("main", 0).unwrap();
        while logger.queue_len() > 0 {
            std::thread::sleep(Duration::from_millis(1));
        }
        logger.info("main", 1).unwrap();
        logger.info("main", 2).unwrap();

        let err = logger.info("main", 3).unwrap_err();
        assert!(matches!(
            err,
            LoggerError::QueueFull {
                level: LogLevel::Info,
                capacity: 2
            }
        ));
        assert_eq!(logger.queue_len(), 2);
        assert_eq!(overflow_count.load(Ordering::Relaxed), 1);
        assert_eq!(logger.metrics().queue_full_events(), 1);

        drop(held);
        logger.close().unwrap();
        assert_eq!(sink.lines.lock().len(), 3);
    }

    #[test]
    fn test_block_policy_waits_for_space() {
        let gate = Arc::new(Mutex::new(()));
        let sink = MemorySink {
            gate: Some(Arc::clone(&gate)),
            ..Default::default()
        };
        let logger = Arc::new(
            Logger::builder()
                .capacity(1)
                .overflow_policy(OverflowPolicy::Block)
                .sink(sink.clone())
                .build()
                .unwrap(),
        );

        let held = gate.lock();
        let producer = {
            let logger = Arc::clone(&logger);
            std::thread::spawn(move || {
                for i in 0..5 {
                    logger.info("main", i).unwrap();
                }
            })
        };

        std::thread::sleep(Duration::from_millis(50));
        assert!(!producer.is_finished(), "producer should be blocked on a full queue");

        drop(held);
        producer.join().unwrap();
        logger.close().unwrap();

        assert_eq!(sink.lines.lock().len(), 5);
        assert!(logger.metrics().block_events() > 0);
        assert_eq!(logger.metrics().queue_full_events(), 0);
    }

    #[test]
    fn test_block_with_timeout_gives_up() {
        let gate = Arc::new(Mutex::new(()));
        let sink = MemorySink {
            gate: Some(Arc::clone(&gate)),
            ..Default::default()
        };
        let logger = Logger::builder()
            .capacity(1)
            .overflow_policy(OverflowPolicy::BlockWithTimeout(Duration::from_millis(20)))
            .on_overflow(Arc::new(|_| {}))
            .sink(sink.clone())
            .build()
            .unwrap();

        let held = gate.lock();
        logger.warn("main", 0).unwrap();
        while logger.queue_len() > 0 {
            std::thread::sleep(Duration::from_millis(1));
        }
        logger.warn("main", 1).unwrap();

        let err = logger.warn("main", 2).unwrap_err();
        assert!(matches!(err, LoggerError::QueueFull { level: LogLevel::Warn, .. }));

        drop(held);
        logger.close().unwrap();
        assert_eq!(sink.lines.lock().len(), 2);
    }

    #[test]
    fn test_write_failures_reach_error_hook() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = Arc::clone(&seen);
        let logger = Logger::builder()
            .sink(BrokenSink)
            .on_error(Arc::new(move |e: &LoggerError| {
                seen_clone.lock().push(e.to_string());
            }))
            .build()
            .unwrap();

        for i in 0..3 {
            logger.error("main", i).unwrap();
        }
        logger.close().unwrap();

        assert_eq!(seen.lock().len(), 3);
        assert_eq!(logger.metrics().write_failures(), 3);
        assert_eq!(logger.metrics().written(), 0);
        assert_eq!(logger.metrics().failure_rate(), 100.0);
    }

    #[test]
    fn test_insert_event_takes_ownership() {
        let sink = MemorySink::default();
        let logger = Logger::builder().sink(sink.clone()).build().unwrap();

        let event = LogEvent::try_new(
            LogLevel::Warn,
            Some(Box::new("parser")),
            Some(Box::new("unexpected token")),
        )
        .unwrap();
        logger.insert_event(event).unwrap();
        logger.close().unwrap();

        let lines = sink.lines.lock();
        assert!(lines[0].starts_with("WARN: "));
        assert!(lines[0].ends_with(" unexpected token from parser\n"));
    }
}
