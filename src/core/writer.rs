//! Background writer draining event queues into sinks

use super::{
    error::{LoggerError, Result},
    event_queue::EventQueue,
    log_event::LogEvent,
    metrics::LoggerMetrics,
    sink::Sink,
    timestamp::TimestampFormat,
};
use crossbeam_channel::Select;
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// Callback for faults inside the writer (failed writes, sink panics)
pub type ErrorHandler = Arc<dyn Fn(&LoggerError) + Send + Sync>;

/// Lifecycle of the background writer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriterState {
    /// Waiting for and writing events
    Running = 0,
    /// Shutdown requested; writing whatever is still queued
    Draining = 1,
    /// Every queue is drained and the thread has returned
    Stopped = 2,
}

impl WriterState {
    pub(crate) fn from_u8(value: u8) -> Self {
        match value {
            0 => WriterState::Running,
            1 => WriterState::Draining,
            _ => WriterState::Stopped,
        }
    }
}

/// A queue paired with the sink its events are written to
pub struct Lane {
    queue: Arc<EventQueue>,
    sink: Box<dyn Sink>,
}

impl Lane {
    pub fn new(queue: Arc<EventQueue>, sink: Box<dyn Sink>) -> Self {
        Self { queue, sink }
    }
}

/// Owns the writer thread and the queues it drains.
///
/// Each pass pops at most one event per lane, in lane order, so a busy lane
/// cannot starve the others. When every lane is empty the thread parks on a
/// `Select` over the open queues until an event arrives or a queue closes.
pub struct Writer {
    handle: Option<JoinHandle<Vec<Box<dyn Sink>>>>,
    queues: Vec<Arc<EventQueue>>,
    state: Arc<AtomicU8>,
    on_error: Option<ErrorHandler>,
}

struct Worker {
    timestamp_format: TimestampFormat,
    metrics: Arc<LoggerMetrics>,
    on_error: Option<ErrorHandler>,
    state: Arc<AtomicU8>,
}

impl Writer {
    pub fn spawn(
        lanes: Vec<Lane>,
        timestamp_format: TimestampFormat,
        metrics: Arc<LoggerMetrics>,
        on_error: Option<ErrorHandler>,
    ) -> Result<Self> {
        if lanes.is_empty() {
            return Err(LoggerError::config("Writer", "at least one lane is required"));
        }

        let queues = lanes.iter().map(|lane| Arc::clone(&lane.queue)).collect();
        let state = Arc::new(AtomicU8::new(WriterState::Running as u8));
        let worker = Worker {
            timestamp_format,
            metrics,
            on_error: on_error.clone(),
            state: Arc::clone(&state),
        };

        let handle = thread::Builder::new()
            .name("spektral-log-writer".into())
            .spawn(move || worker.run(lanes))?;

        Ok(Self {
            handle: Some(handle),
            queues,
            state,
            on_error,
        })
    }

    pub fn state(&self) -> WriterState {
        WriterState::from_u8(self.state.load(Ordering::Acquire))
    }

    pub(crate) fn state_cell(&self) -> Arc<AtomicU8> {
        Arc::clone(&self.state)
    }

    /// Close every queue, wait for the thread to drain them, then flush and
    /// close the sinks it hands back.
    ///
    /// Blocks the caller until all queued events are written. Calling it again
    /// after it returned is a no-op.
    pub fn stop(&mut self) -> Result<()> {
        let Some(handle) = self.handle.take() else {
            return Ok(());
        };

        for queue in &self.queues {
            queue.close();
        }

        let sinks = handle.join().map_err(|panic| {
            self.state
                .store(WriterState::Stopped as u8, Ordering::Release);
            LoggerError::writer_panicked(panic_message(panic.as_ref()))
        })?;

        let mut first_error = None;
        for mut sink in sinks {
            let result = sink.flush().and_then(|_| sink.close());
            if let Err(e) = result {
                report(self.on_error.as_ref(), &e);
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl Drop for Writer {
    fn drop(&mut self) {
        if let Err(e) = self.stop() {
            eprintln!("[LOGGER ERROR] Writer shutdown failed: {}", e);
        }
    }
}

impl Worker {
    fn run(self, mut lanes: Vec<Lane>) -> Vec<Box<dyn Sink>> {
        let mut finished = vec![false; lanes.len()];

        loop {
            let mut progressed = false;

            for (idx, lane) in lanes.iter_mut().enumerate() {
                if finished[idx] {
                    continue;
                }
                match lane.queue.try_pop() {
                    Some(event) => {
                        self.deliver(lane, event);
                        progressed = true;
                    }
                    None => finished[idx] = lane.queue.is_drained(),
                }
            }

            if self.state() == WriterState::Running
                && lanes.iter().any(|lane| lane.queue.is_closed())
            {
                self.set_state(WriterState::Draining);
            }

            if progressed {
                continue;
            }
            if finished.iter().all(|done| *done) {
                break;
            }

            let mut select = Select::new();
            for (idx, lane) in lanes.iter().enumerate() {
                if !finished[idx] {
                    select.recv(lane.queue.receiver());
                }
            }
            // Only waits; the next pass does the actual pop.
            select.ready();
        }

        self.set_state(WriterState::Stopped);
        lanes.into_iter().map(|lane| lane.sink).collect()
    }

    /// Render and write one event; a failure is reported and counted, never
    /// propagated, so the remaining events still get written.
    fn deliver(&self, lane: &mut Lane, event: LogEvent) {
        let colored = lane.sink.supports_color();
        let outcome = catch_unwind(AssertUnwindSafe(|| {
            let line = event.render_styled(&self.timestamp_format, colored);
            lane.sink.write(&line)
        }));

        match outcome {
            Ok(Ok(())) => {
                self.metrics.record_written();
            }
            Ok(Err(e)) => {
                self.metrics.record_write_failure();
                report(self.on_error.as_ref(), &e);
            }
            Err(panic) => {
                self.metrics.record_write_failure();
                let err = LoggerError::writer_panicked(format!(
                    "sink '{}' panicked: {}",
                    lane.sink.name(),
                    panic_message(panic.as_ref())
                ));
                report(self.on_error.as_ref(), &err);
            }
        }
    }

    fn state(&self) -> WriterState {
        WriterState::from_u8(self.state.load(Ordering::Acquire))
    }

    fn set_state(&self, state: WriterState) {
        self.state.store(state as u8, Ordering::Release);
    }
}

/// Hand an error to the installed hook, or fall back to stderr.
fn report(on_error: Option<&ErrorHandler>, err: &LoggerError) {
    match on_error {
        Some(handler) => handler(err),
        None => eprintln!("[LOGGER ERROR] {}", err),
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}
