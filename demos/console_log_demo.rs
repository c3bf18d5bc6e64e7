//! Console logging demo
//!
//! Pushes a burst of numbered INFO events through the process-wide console
//! logger, using the blocking overflow policy so none are rejected.
//!
//! Run with: cargo run --example console_log_demo [count]

use spektral_log::prelude::*;
use std::time::Instant;

/// A source that renders as a small integer id
struct WorkerId(u32);

impl std::fmt::Display for WorkerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "worker-{}", self.0)
    }
}

fn main() -> Result<()> {
    let count: u64 = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(500_000);

    let logger = ConsoleLogger::builder()
        .min_level(LogLevel::Info)
        .overflow_policy(OverflowPolicy::Block)
        .colors(true)
        .build()?;

    let start = Instant::now();
    for ii in 0..=count {
        logger.insert(LogLevel::Info, "main", ii)?;
    }
    logger.warn(WorkerId(7), "finished inserting")?;
    let inserted = start.elapsed();

    logger.close()?;
    let drained = start.elapsed();

    let metrics = logger.metrics();
    eprintln!(
        "inserted {} events in {:?}, drained in {:?} ({} written, {} failed)",
        metrics.accepted(),
        inserted,
        drained,
        metrics.written(),
        metrics.write_failures()
    );

    Ok(())
}
