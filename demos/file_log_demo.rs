//! File logging demo
//!
//! Writes numbered INFO events to `output_logs/file_demo.log` and reports how
//! long inserting and draining took.
//!
//! Run with: cargo run --example file_log_demo [count]

use spektral_log::prelude::*;
use std::time::Instant;

fn main() -> Result<()> {
    let count: u64 = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(500_000);

    std::fs::create_dir_all("output_logs")?;

    let logger = FileLogger::builder("output_logs/file_demo.log")
        .truncate(true)
        .overflow_policy(OverflowPolicy::Block)
        .build()?;

    let start = Instant::now();
    for ii in 0..=count {
        logger.insert(LogLevel::Info, "main", ii)?;
    }
    let inserted = start.elapsed();

    logger.close()?;
    let drained = start.elapsed();

    println!(
        "{} events to {} (inserted in {:?}, drained in {:?})",
        logger.metrics().written(),
        logger.path().display(),
        inserted,
        drained
    );

    Ok(())
}
