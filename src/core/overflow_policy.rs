//! Overflow policies for full event queues
//!
//! A full queue is never handled by silently dropping the event: every policy
//! either waits for space or reports `QueueFull` to the caller.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// What `insert` does when the target queue is at capacity
///
/// # Example
///
/// ```
/// use spektral_log::OverflowPolicy;
/// use std::time::Duration;
///
/// assert_eq!(OverflowPolicy::default(), OverflowPolicy::Reject);
///
/// let policy = OverflowPolicy::BlockWithTimeout(Duration::from_millis(100));
/// assert_eq!(policy.to_string(), "BlockWithTimeout(100ms)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OverflowPolicy {
    /// Fail immediately with `QueueFull`; the caller decides what to do
    #[default]
    Reject,

    /// Wait until the writer frees a slot
    ///
    /// Producers slow down to the writer's pace instead of losing events.
    Block,

    /// Wait up to the given duration, then fail with `QueueFull`
    BlockWithTimeout(Duration),
}

impl fmt::Display for OverflowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverflowPolicy::Reject => write!(f, "Reject"),
            OverflowPolicy::Block => write!(f, "Block"),
            OverflowPolicy::BlockWithTimeout(d) => write!(f, "BlockWithTimeout({:?})", d),
        }
    }
}

/// Callback for full-queue notifications
///
/// Called every time a push is rejected for lack of space, with the total
/// number of such rejections so far. The `QueueFull` error still reaches the
/// caller of `insert`.
pub type OverflowCallback = Arc<dyn Fn(u64) + Send + Sync>;
