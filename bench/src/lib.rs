//! Benchmark utilities for the event hub.
//!
//! This crate provides the benchmarking infrastructure for dispatch and
//! registration, including:
//!
//! - **Microbenchmarks**: Individual hub operations (register, fire, miss)
//! - **Fan-out scaling**: Dispatch cost as listener counts grow
//! - **Name corpora**: Realistic dotted event-name generation
//!
//! # Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench -p eventhub_bench
//!
//! # Run specific benchmark group
//! cargo bench -p eventhub_bench -- fire
//! ```
//!
//! # Benchmark Results
//!
//! Results are written to `target/criterion/` with HTML reports for
//! visualization.

pub mod names;
