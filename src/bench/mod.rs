//! Benchmark module for the inference endpoint.
//!
//! This module provides:
//! - Payload construction and compressed body framing
//! - A sequential runner with warm-up and measured phases
//! - Scoped timing and HdrHistogram-based summary statistics
//! - Report generation

pub mod config;
pub mod metrics;
pub mod payload;
pub mod report;
pub mod runner;
pub mod timing;

pub use config::{BenchmarkConfig, OutputFormat};
pub use metrics::TimingStats;
pub use payload::{build_payload, serialize_and_compress, BodyEncoding, CompressedPayload};
pub use report::BenchmarkReport;
pub use runner::BenchmarkRunner;
pub use timing::track_infer_time;
