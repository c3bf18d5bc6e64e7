//! Bounded FIFO queue carrying events from producers to the writer
//!
//! The queue is a bounded crossbeam channel. Any number of producer threads
//! may push concurrently; the writer is the only consumer. The sending half
//! lives behind an `RwLock<Option<_>>`: pushes take the read side, `close()`
//! takes the write side and drops the sender, so a push either lands before
//! the close (and will be drained) or fails with `LoggerClosed`.

use super::error::{LoggerError, Result};
use super::log_event::LogEvent;
use crossbeam_channel::{
    bounded, Receiver, RecvTimeoutError, SendTimeoutError, Sender, TryRecvError, TrySendError,
};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Default capacity of each event queue
pub const DEFAULT_QUEUE_CAPACITY: usize = 50_000;

pub struct EventQueue {
    sender: RwLock<Option<Sender<LogEvent>>>,
    receiver: Receiver<LogEvent>,
    capacity: usize,
    closed: AtomicBool,
}

impl EventQueue {
    /// Create a queue holding at most `capacity` events.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(LoggerError::config(
                "EventQueue",
                "capacity must be at least 1",
            ));
        }

        let (sender, receiver) = bounded(capacity);
        Ok(Self {
            sender: RwLock::new(Some(sender)),
            receiver,
            capacity,
            closed: AtomicBool::new(false),
        })
    }

    /// Append to the tail without blocking.
    ///
    /// Fails with `QueueFull` when `capacity` events are already buffered; the
    /// queue is left untouched and the rejected event is dropped.
    pub fn push(&self, event: LogEvent) -> Result<()> {
        let guard = self.sender.read();
        let sender = guard.as_ref().ok_or(LoggerError::LoggerClosed)?;

        match sender.try_send(event) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(event)) => {
                Err(LoggerError::queue_full(event.level(), self.capacity))
            }
            Err(TrySendError::Disconnected(_)) => Err(LoggerError::LoggerClosed),
        }
    }

    /// Append to the tail, waiting for space if the queue is full.
    ///
    /// `close()` waits for blocked pushes to finish, so the consumer must keep
    /// draining for this to return.
    pub fn push_blocking(&self, event: LogEvent) -> Result<()> {
        let guard = self.sender.read();
        let sender = guard.as_ref().ok_or(LoggerError::LoggerClosed)?;
        sender.send(event).map_err(|_| LoggerError::LoggerClosed)
    }

    /// Append to the tail, waiting at most `timeout` for space.
    pub fn push_timeout(&self, event: LogEvent, timeout: Duration) -> Result<()> {
        let guard = self.sender.read();
        let sender = guard.as_ref().ok_or(LoggerError::LoggerClosed)?;

        match sender.send_timeout(event, timeout) {
            Ok(()) => Ok(()),
            Err(SendTimeoutError::Timeout(event)) => {
                Err(LoggerError::queue_full(event.level(), self.capacity))
            }
            Err(SendTimeoutError::Disconnected(_)) => Err(LoggerError::LoggerClosed),
        }
    }

    /// Remove the head if one is available right now.
    pub fn try_pop(&self) -> Option<LogEvent> {
        self.receiver.try_recv().ok()
    }

    /// Remove the head, suspending the caller until an event arrives.
    ///
    /// Returns `None` only once the queue is closed and empty, after which it
    /// will never yield another event.
    pub fn pop(&self) -> Option<LogEvent> {
        self.receiver.recv().ok()
    }

    /// Like [`pop`](Self::pop) but gives up after `timeout`.
    pub fn pop_timeout(&self, timeout: Duration) -> Option<LogEvent> {
        match self.receiver.recv_timeout(timeout) {
            Ok(event) => Some(event),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Stop accepting pushes. Events already queued stay poppable.
    ///
    /// Idempotent.
    pub fn close(&self) {
        let mut guard = self.sender.write();
        guard.take();
        self.closed.store(true, Ordering::Release);
    }

    /// Empty the queue in FIFO order.
    pub fn drain_all(&self) -> Vec<LogEvent> {
        let mut events = Vec::with_capacity(self.receiver.len());
        loop {
            match self.receiver.try_recv() {
                Ok(event) => events.push(event),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        events
    }

    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Closed and empty: nothing will ever come out of this queue again.
    pub fn is_drained(&self) -> bool {
        self.is_closed() && self.receiver.is_empty()
    }

    pub(crate) fn receiver(&self) -> &Receiver<LogEvent> {
        &self.receiver
    }
}

impl std::fmt::Debug for EventQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventQueue")
            .field("len", &self.len())
            .field("capacity", &self.capacity)
            .field("closed", &self.is_closed())
            .finish()
    }
}
