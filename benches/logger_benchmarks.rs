//! Criterion benchmarks for spektral_log

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use spektral_log::prelude::*;
use spektral_log::EventQueue;
use std::sync::Arc;
use std::thread;

/// Discards everything; isolates pipeline cost from I/O
struct NullSink;

impl Sink for NullSink {
    fn write(&mut self, text: &str) -> Result<()> {
        black_box(text);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "null"
    }
}

// ============================================================================
// Event Benchmarks
// ============================================================================

fn bench_event_creation(c: &mut Criterion) {
    let mut group = c.benchmark_group("event_creation");
    group.throughput(Throughput::Elements(1));

    group.bench_function("str", |b| {
        b.iter(|| black_box(LogEvent::new(LogLevel::Info, "bench", "static message")));
    });

    group.bench_function("integer", |b| {
        b.iter(|| black_box(LogEvent::new(LogLevel::Info, "bench", black_box(42u64))));
    });

    group.bench_function("formatted", |b| {
        b.iter(|| {
            black_box(LogEvent::new(
                LogLevel::Info,
                "bench",
                format!("request {} took {}ms", black_box(7), black_box(13)),
            ))
        });
    });

    group.bench_function("render", |b| {
        let event = LogEvent::new(LogLevel::Warn, "bench", "line\twith\ncontrol chars");
        b.iter(|| black_box(event.render()));
    });

    group.finish();
}

// ============================================================================
// Queue Benchmarks
// ============================================================================

fn bench_queue(c: &mut Criterion) {
    let mut group = c.benchmark_group("event_queue");
    group.throughput(Throughput::Elements(1));

    group.bench_function("push_pop", |b| {
        let queue = EventQueue::new(1024).unwrap();
        b.iter(|| {
            queue
                .push(LogEvent::new(LogLevel::Info, "bench", "payload"))
                .unwrap();
            black_box(queue.try_pop())
        });
    });

    group.throughput(Throughput::Elements(1000));
    group.bench_function("push_1000_drain", |b| {
        let queue = EventQueue::new(1000).unwrap();
        b.iter(|| {
            for i in 0..1000 {
                queue.push(LogEvent::new(LogLevel::Info, "bench", i)).unwrap();
            }
            black_box(queue.drain_all())
        });
    });

    group.finish();
}

// ============================================================================
// Logger Benchmarks
// ============================================================================

fn bench_level_filtering(c: &mut Criterion) {
    let mut group = c.benchmark_group("level_filtering");
    group.throughput(Throughput::Elements(1));

    let logger = Logger::builder()
        .min_level(LogLevel::Error)
        .overflow_policy(OverflowPolicy::Block)
        .sink(NullSink)
        .build()
        .unwrap();

    group.bench_function("below_threshold", |b| {
        b.iter(|| logger.info("bench", black_box("filtered")));
    });

    group.bench_function("above_threshold", |b| {
        b.iter(|| logger.error("bench", black_box("accepted")));
    });

    group.finish();
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");
    group.throughput(Throughput::Elements(1));

    let null_logger = Logger::builder()
        .overflow_policy(OverflowPolicy::Block)
        .sink(NullSink)
        .build()
        .unwrap();
    group.bench_function("null_sink", |b| {
        b.iter(|| null_logger.info("bench", black_box("message")));
    });

    let console = ConsoleLogger::builder()
        .overflow_policy(OverflowPolicy::Block)
        .build()
        .unwrap();
    group.bench_function("console", |b| {
        b.iter(|| console.info("bench", black_box("console message")));
    });

    let temp_dir = tempfile::tempdir().unwrap();
    let file = FileLogger::builder(temp_dir.path().join("bench.log"))
        .overflow_policy(OverflowPolicy::Block)
        .build()
        .unwrap();
    group.bench_function("file", |b| {
        b.iter(|| file.info("bench", black_box("file message")));
    });

    group.finish();
}

fn bench_concurrent_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent_insert");
    group.throughput(Throughput::Elements(4000));

    let logger = Arc::new(
        Logger::builder()
            .overflow_policy(OverflowPolicy::Block)
            .sink(NullSink)
            .build()
            .unwrap(),
    );

    group.bench_function("4_threads_x_1000", |b| {
        b.iter(|| {
            let handles: Vec<_> = (0..4)
                .map(|t| {
                    let logger = Arc::clone(&logger);
                    thread::spawn(move || {
                        for i in 0..1000 {
                            let _ = logger.info(format!("t{}", t), i);
                        }
                    })
                })
                .collect();
            for handle in handles {
                handle.join().unwrap();
            }
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_event_creation,
    bench_queue,
    bench_level_filtering,
    bench_insert,
    bench_concurrent_insert,
);
criterion_main!(benches);
