//! Report generation for benchmark results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::metrics::TimingStats;
use crate::error::Result;

/// Complete benchmark report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkReport {
    pub label: String,
    pub url: String,
    pub generated_at: DateTime<Utc>,
    pub warmup_requests: usize,
    pub measured_requests: usize,
    pub stats: TimingStats,
    /// Raw samples in seconds, in measurement order
    pub timings: Vec<f64>,
}

impl BenchmarkReport {
    /// Summarize the timing buffer under `label`
    pub fn from_timings(label: &str, timings: &[f64]) -> Result<Self> {
        Ok(Self {
            label: label.to_string(),
            url: String::new(),
            generated_at: Utc::now(),
            warmup_requests: 0,
            measured_requests: timings.len(),
            stats: TimingStats::from_samples(timings)?,
            timings: timings.to_vec(),
        })
    }

    pub fn with_run_info(mut self, url: &str, warmup_requests: usize) -> Self {
        self.url = url.to_string();
        self.warmup_requests = warmup_requests;
        self
    }

    /// `[label] mean=..ms, sd=..ms, min=..ms, max=..ms, median=..ms, 95p=..ms, 99p=..ms`
    pub fn summary_line(&self) -> String {
        let s = &self.stats;
        format!(
            "[{}] mean={:.2}ms, sd={:.2}ms, min={:.2}ms, max={:.2}ms, median={:.2}ms, 95p={:.2}ms, 99p={:.2}ms",
            self.label, s.mean_ms, s.sd_ms, s.min_ms, s.max_ms, s.median_ms, s.p95_ms, s.p99_ms
        )
    }

    pub fn print_line(&self) {
        println!("{}", self.summary_line());
    }

    /// Print the report as an ASCII table
    pub fn print_table(&self) {
        let s = &self.stats;
        println!();
        println!("{}", self.label);
        println!("  {}", self.url);
        println!(
            "  warmup: {} requests, measured: {} requests",
            self.warmup_requests, self.measured_requests
        );
        println!();
        println!("┌──────────┬──────────┬──────────┬──────────┬──────────┬──────────┬──────────┐");
        println!("│ mean(ms) │  sd(ms)  │ min(ms)  │ max(ms)  │  p50(ms) │  p95(ms) │  p99(ms) │");
        println!("├──────────┼──────────┼──────────┼──────────┼──────────┼──────────┼──────────┤");
        println!(
            "│ {:>8.2} │ {:>8.2} │ {:>8.2} │ {:>8.2} │ {:>8.2} │ {:>8.2} │ {:>8.2} │",
            s.mean_ms, s.sd_ms, s.min_ms, s.max_ms, s.median_ms, s.p95_ms, s.p99_ms
        );
        println!("└──────────┴──────────┴──────────┴──────────┴──────────┴──────────┴──────────┘");
        println!();
    }

    /// Export the report as JSON
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_generation() {
        let report = BenchmarkReport::from_timings("triton", &[0.010, 0.020, 0.030, 0.040])
            .unwrap()
            .with_run_info("http://127.0.0.1:8000/v2/models/m/versions/1/infer", 500);

        assert_eq!(report.measured_requests, 4);
        assert_eq!(report.warmup_requests, 500);
        assert_eq!(report.timings.len(), 4);
        assert!((report.stats.mean_ms - 25.0).abs() < 0.01);
    }

    #[test]
    fn test_summary_line_format() {
        let report = BenchmarkReport::from_timings("triton (onnx backend) - requests", &[0.002])
            .unwrap();
        let line = report.summary_line();

        assert!(line.starts_with("[triton (onnx backend) - requests] mean=2.00ms, sd=0.00ms, "));
        assert!(line.contains("min=2.00ms"));
        assert!(line.contains("median=2.00ms"));
        assert!(line.ends_with("99p=2.00ms"));
    }

    #[test]
    fn test_json_export() {
        let report = BenchmarkReport::from_timings("label", &[0.001, 0.003]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&report.to_json()).unwrap();

        assert_eq!(value["label"], "label");
        assert_eq!(value["measured_requests"], 2);
        assert_eq!(value["stats"]["count"], 2);
        assert_eq!(value["timings"].as_array().unwrap().len(), 2);
        assert!(value["generated_at"].is_string());
    }

    #[test]
    fn test_empty_timings_rejected() {
        assert!(BenchmarkReport::from_timings("label", &[]).is_err());
    }
}
