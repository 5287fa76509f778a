//! Summary statistics over the timing buffer.
//!
//! Mean, standard deviation and extrema are computed exactly from the
//! samples; percentiles come from an HdrHistogram at microsecond resolution.

use hdrhistogram::Histogram;
use serde::{Deserialize, Serialize};

use crate::error::{BenchError, Result};

/// Latency summary in milliseconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingStats {
    pub count: usize,
    pub mean_ms: f64,
    pub sd_ms: f64,
    pub min_ms: f64,
    pub max_ms: f64,
    pub median_ms: f64,
    pub p95_ms: f64,
    pub p99_ms: f64,
}

impl TimingStats {
    /// Summarize samples given in seconds
    pub fn from_samples(samples: &[f64]) -> Result<Self> {
        if samples.is_empty() {
            return Err(BenchError::Metrics("timing buffer is empty".to_string()));
        }

        // Latencies up to 10 minutes with 3 significant figures
        let mut histogram = Histogram::<u64>::new_with_bounds(1, 600_000_000, 3)
            .map_err(|e| BenchError::Metrics(e.to_string()))?;

        let count = samples.len();
        let mut sum = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for &secs in samples {
            sum += secs;
            min = min.min(secs);
            max = max.max(secs);
            let micros = (secs * 1_000_000.0).round() as u64;
            histogram.saturating_record(micros.max(1));
        }

        let mean = sum / count as f64;
        let variance = samples.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / count as f64;
        let percentile_ms = |p: f64| histogram.value_at_percentile(p) as f64 / 1000.0;

        Ok(Self {
            count,
            mean_ms: mean * 1000.0,
            sd_ms: variance.sqrt() * 1000.0,
            min_ms: min * 1000.0,
            max_ms: max * 1000.0,
            median_ms: percentile_ms(50.0),
            p95_ms: percentile_ms(95.0),
            p99_ms: percentile_ms(99.0),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 0.05
    }

    #[test]
    fn test_timing_stats() {
        let stats = TimingStats::from_samples(&[0.010, 0.020, 0.030, 0.040]).unwrap();

        assert_eq!(stats.count, 4);
        assert!(close(stats.mean_ms, 25.0));
        assert!(close(stats.sd_ms, 125f64.sqrt()));
        assert!(close(stats.min_ms, 10.0));
        assert!(close(stats.max_ms, 40.0));
        assert!(close(stats.median_ms, 20.0));
        assert!(close(stats.p95_ms, 40.0));
        assert!(close(stats.p99_ms, 40.0));
    }

    #[test]
    fn test_single_sample() {
        let stats = TimingStats::from_samples(&[0.0015]).unwrap();

        assert_eq!(stats.count, 1);
        assert!(close(stats.mean_ms, 1.5));
        assert_eq!(stats.sd_ms, 0.0);
        assert!(close(stats.median_ms, 1.5));
        assert!(close(stats.p99_ms, 1.5));
    }

    #[test]
    fn test_percentiles_over_hundred_samples() {
        // 1ms .. 100ms
        let samples: Vec<f64> = (1..=100).map(|ms| ms as f64 / 1000.0).collect();
        let stats = TimingStats::from_samples(&samples).unwrap();

        assert_eq!(stats.count, 100);
        assert!(close(stats.mean_ms, 50.5));
        assert!((stats.median_ms - 50.0).abs() < 0.1);
        assert!((stats.p95_ms - 95.0).abs() < 0.1);
        assert!((stats.p99_ms - 99.0).abs() < 0.1);
    }

    #[test]
    fn test_sub_microsecond_samples_are_clamped() {
        let stats = TimingStats::from_samples(&[0.0, 0.0000001]).unwrap();
        assert!(stats.median_ms > 0.0);
        assert!(stats.min_ms >= 0.0);
    }

    #[test]
    fn test_empty_buffer_is_error() {
        assert!(matches!(
            TimingStats::from_samples(&[]),
            Err(BenchError::Metrics(_))
        ));
    }
}
