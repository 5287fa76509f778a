//! Configuration structs for benchmarking.

use serde::{Deserialize, Serialize};

use super::payload::BodyEncoding;
use crate::tokenizer::TokenizerSource;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_MODEL: &str = "transformer_onnx_model";
pub const DEFAULT_MODEL_VERSION: &str = "1";
pub const DEFAULT_TEXT: &str = "This live event is great. I will sign-up for Infinity.";
pub const DEFAULT_MAX_LENGTH: usize = 16;
pub const DEFAULT_WARMUP_REQUESTS: usize = 10_000;
pub const DEFAULT_MEASURED_REQUESTS: usize = 100;
pub const DEFAULT_REQUEST_ID: &str = "42";
pub const DEFAULT_LABEL: &str = "triton (onnx backend) - requests";

/// How the final report is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutputFormat {
    /// One `[label] mean=..ms, sd=..ms, ...` line
    #[default]
    Line,
    Table,
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Line => write!(f, "line"),
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "line" => Ok(OutputFormat::Line),
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

/// Configuration for a benchmark run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkConfig {
    /// Inference server base URL (scheme, host, port)
    pub base_url: String,
    /// Model name in the repository
    pub model: String,
    /// Model version
    pub model_version: String,
    /// Sentence to classify
    pub text: String,
    /// Truncation length for the tokenizer
    pub max_length: usize,
    /// Tokenizer location
    pub tokenizer: TokenizerSource,
    /// Unmeasured requests sent first
    pub warmup_requests: usize,
    /// Requests whose latency is recorded
    pub measured_requests: usize,
    /// Value of the request's `id` field
    pub request_id: String,
    /// Container used for the compressed body
    pub body_encoding: BodyEncoding,
    /// Send one status-checked request before warm-up
    pub strict: bool,
    /// Request timeout in seconds (none: wait forever)
    pub timeout_secs: Option<u64>,
    /// Label printed with the results
    pub label: String,
    /// Report format
    pub output: OutputFormat,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            model_version: DEFAULT_MODEL_VERSION.to_string(),
            text: DEFAULT_TEXT.to_string(),
            max_length: DEFAULT_MAX_LENGTH,
            tokenizer: TokenizerSource::default(),
            warmup_requests: DEFAULT_WARMUP_REQUESTS,
            measured_requests: DEFAULT_MEASURED_REQUESTS,
            request_id: DEFAULT_REQUEST_ID.to_string(),
            body_encoding: BodyEncoding::Zlib,
            strict: false,
            timeout_secs: None,
            label: DEFAULT_LABEL.to_string(),
            output: OutputFormat::Line,
        }
    }
}

impl BenchmarkConfig {
    /// Full inference URL, e.g. `http://127.0.0.1:8000/v2/models/m/versions/1/infer`
    pub fn endpoint_url(&self) -> String {
        format!(
            "{}/v2/models/{}/versions/{}/infer",
            self.base_url.trim_end_matches('/'),
            self.model,
            self.model_version
        )
    }

    pub fn timeout(&self) -> Option<std::time::Duration> {
        self.timeout_secs.map(std::time::Duration::from_secs)
    }
}
