//! Benchmark runner: warm-up phase, then a timed phase.
//!
//! Requests are strictly sequential. Every iteration re-serializes and
//! re-compresses the payload so that codec cost is part of the measured
//! latency.

use reqwest::StatusCode;

use super::config::BenchmarkConfig;
use super::payload::{build_payload, serialize_and_compress};
use super::timing::track_infer_time;
use crate::error::Result;
use crate::http_client::InferenceClient;
use crate::models::InferenceRequest;
use crate::tokenizer::InputTokenizer;

const WARMUP_LOG_EVERY: usize = 1_000;

/// Benchmark runner that posts one inference request against the server
pub struct BenchmarkRunner {
    config: BenchmarkConfig,
    client: InferenceClient,
    request: InferenceRequest,
}

impl BenchmarkRunner {
    /// Tokenize the configured text and open the HTTP session
    pub fn new(config: BenchmarkConfig, tokenizer: &InputTokenizer) -> Result<Self> {
        let request = build_payload(tokenizer, &config.text, &config.request_id)?;
        let client = InferenceClient::new(config.endpoint_url(), config.timeout())?;

        Ok(Self {
            config,
            client,
            request,
        })
    }

    pub fn request(&self) -> &InferenceRequest {
        &self.request
    }

    pub fn config(&self) -> &BenchmarkConfig {
        &self.config
    }

    /// One full cycle: serialize, compress, post, drain
    async fn send_once(&self) -> Result<StatusCode> {
        let payload = serialize_and_compress(&self.request, self.config.body_encoding)?;
        self.client.send(&payload).await
    }

    /// Send a single request and fail on a non-2xx answer. Not timed.
    pub async fn smoke_test(&self) -> Result<()> {
        let payload = serialize_and_compress(&self.request, self.config.body_encoding)?;
        let status = self.client.send_checked(&payload).await?;
        tracing::info!(status = %status, "Smoke test passed");
        Ok(())
    }

    /// Run `count` untimed requests
    pub async fn run_warmup(&self, count: usize) -> Result<()> {
        tracing::info!(count, url = %self.client.url(), "Running warmup requests");

        for i in 0..count {
            self.send_once().await?;
            if (i + 1) % WARMUP_LOG_EVERY == 0 {
                tracing::debug!(done = i + 1, total = count, "Warmup progress");
            }
        }

        Ok(())
    }

    /// Run `count` requests, appending each one's wall-clock time to `timings`
    pub async fn run_measured(&self, count: usize, timings: &mut Vec<f64>) -> Result<()> {
        tracing::info!(count, "Running measured requests");

        for _ in 0..count {
            let _timer = track_infer_time(timings);
            self.send_once().await?;
        }

        Ok(())
    }

    /// Smoke test (strict mode only), warm-up, then the measured phase
    pub async fn run(&self) -> Result<Vec<f64>> {
        if self.config.strict {
            self.smoke_test().await?;
        }

        self.run_warmup(self.config.warmup_requests).await?;

        let mut timings = Vec::with_capacity(self.config.measured_requests);
        self.run_measured(self.config.measured_requests, &mut timings)
            .await?;

        tracing::info!(samples = timings.len(), "Benchmark complete");
        Ok(timings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BenchError;
    use crate::tokenizer::tests::TEST_VOCAB;

    fn tokenizer() -> InputTokenizer {
        InputTokenizer::from_vocab(TEST_VOCAB, 16).unwrap()
    }

    #[test]
    fn test_runner_builds_request_once() {
        let config = BenchmarkConfig {
            request_id: "7".to_string(),
            ..Default::default()
        };
        let runner = BenchmarkRunner::new(config, &tokenizer()).unwrap();

        let request = runner.request();
        assert_eq!(request.id, "7");
        assert_eq!(request.inputs.len(), 3);
        assert_eq!(request.outputs[0].name, "output");
        assert_eq!(runner.config().measured_requests, 100);
    }

    #[tokio::test]
    async fn test_measured_failure_still_records_sample() {
        let config = BenchmarkConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            timeout_secs: Some(5),
            ..Default::default()
        };
        let runner = BenchmarkRunner::new(config, &tokenizer()).unwrap();

        let mut timings = Vec::new();
        let result = runner.run_measured(3, &mut timings).await;

        assert!(matches!(result, Err(BenchError::Http(_))));
        assert_eq!(timings.len(), 1);
    }

    #[tokio::test]
    async fn test_zero_counts_send_nothing() {
        let config = BenchmarkConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            ..Default::default()
        };
        let runner = BenchmarkRunner::new(config, &tokenizer()).unwrap();

        let mut timings = Vec::new();
        runner.run_warmup(0).await.unwrap();
        runner.run_measured(0, &mut timings).await.unwrap();
        assert!(timings.is_empty());
    }
}
