use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use crate::bench::config::{
    BenchmarkConfig, OutputFormat, DEFAULT_BASE_URL, DEFAULT_LABEL, DEFAULT_MODEL,
    DEFAULT_MODEL_VERSION, DEFAULT_REQUEST_ID, DEFAULT_TEXT,
};
use crate::bench::payload::BodyEncoding;
use crate::tokenizer::{TokenizerSource, DEFAULT_TOKENIZER};

/// Latency benchmark for a Triton inference server's HTTP endpoint
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Inference server base URL
    #[arg(short = 'u', long, env = "TRITON_URL", default_value = DEFAULT_BASE_URL)]
    pub url: String,

    /// Model name
    #[arg(short = 'm', long, env = "TRITON_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Model version
    #[arg(long, env = "TRITON_MODEL_VERSION", default_value = DEFAULT_MODEL_VERSION)]
    pub model_version: String,

    /// Sentence sent to the model
    #[arg(short = 't', long, env = "BENCH_TEXT", default_value = DEFAULT_TEXT)]
    pub text: String,

    /// Tokenizer truncation length
    #[arg(long, env = "BENCH_MAX_LENGTH", default_value = "16")]
    pub max_length: usize,

    /// Hugging Face hub tokenizer identifier
    #[arg(long, env = "BENCH_TOKENIZER", default_value = DEFAULT_TOKENIZER)]
    pub tokenizer: String,

    /// Local tokenizer.json (overrides --tokenizer)
    #[arg(long, env = "BENCH_TOKENIZER_FILE")]
    pub tokenizer_file: Option<String>,

    /// Local BERT vocab.txt (overrides --tokenizer)
    #[arg(long, env = "BENCH_VOCAB_FILE")]
    pub vocab_file: Option<String>,

    /// Unmeasured warmup requests
    #[arg(short = 'w', long, env = "BENCH_WARMUP", default_value = "10000")]
    pub warmup: usize,

    /// Measured requests
    #[arg(short = 'n', long, env = "BENCH_ITERATIONS", default_value = "100")]
    pub iterations: usize,

    /// Request id field
    #[arg(long, env = "BENCH_REQUEST_ID", default_value = DEFAULT_REQUEST_ID)]
    pub request_id: String,

    /// Body compression container (zlib, gzip)
    #[arg(long, env = "BENCH_BODY_ENCODING", default_value = "zlib")]
    pub body_encoding: String,

    /// Send one status-checked request before warmup and fail on non-2xx
    #[arg(long, env = "BENCH_STRICT")]
    pub strict: bool,

    /// Request timeout in seconds (default: wait forever)
    #[arg(long, env = "BENCH_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Label printed with the results
    #[arg(long, env = "BENCH_LABEL", default_value = DEFAULT_LABEL)]
    pub label: String,

    /// Report format (line, table, json)
    #[arg(short = 'o', long, env = "BENCH_OUTPUT", default_value = "line")]
    pub output: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Emit logs as JSON
    #[arg(long, env = "LOG_JSON")]
    pub log_json: bool,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub bench: BenchmarkConfig,

    // Logging
    pub log_level: String,
    pub log_json: bool,
}

impl Config {
    /// Load configuration from all sources with priority: CLI > ENV > defaults
    pub fn load() -> Result<Self> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        Self::from_args(CliArgs::parse())
    }

    pub fn from_args(args: CliArgs) -> Result<Self> {
        let tokenizer = match (args.tokenizer_file, args.vocab_file) {
            (Some(_), Some(_)) => {
                anyhow::bail!("--tokenizer-file and --vocab-file are mutually exclusive")
            }
            (Some(file), None) => TokenizerSource::File(expand_tilde(&file)),
            (None, Some(file)) => TokenizerSource::Vocab(expand_tilde(&file)),
            (None, None) => TokenizerSource::Pretrained(args.tokenizer),
        };

        let body_encoding: BodyEncoding = args
            .body_encoding
            .parse()
            .map_err(anyhow::Error::msg)
            .context("Invalid --body-encoding")?;

        let output: OutputFormat = args
            .output
            .parse()
            .map_err(anyhow::Error::msg)
            .context("Invalid --output")?;

        let bench = BenchmarkConfig {
            base_url: args.url,
            model: args.model,
            model_version: args.model_version,
            text: args.text,
            max_length: args.max_length,
            tokenizer,
            warmup_requests: args.warmup,
            measured_requests: args.iterations,
            request_id: args.request_id,
            body_encoding,
            strict: args.strict,
            timeout_secs: args.timeout,
            label: args.label,
            output,
        };

        Ok(Config {
            bench,
            log_level: args.log_level,
            log_json: args.log_json,
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let bench = &self.bench;

        if bench.max_length == 0 {
            anyhow::bail!("--max-length must be greater than zero");
        }

        if bench.measured_requests == 0 {
            anyhow::bail!("--iterations must be greater than zero");
        }

        let url = reqwest::Url::parse(&bench.endpoint_url())
            .with_context(|| format!("Invalid inference URL: {}", bench.endpoint_url()))?;
        if !matches!(url.scheme(), "http" | "https") {
            anyhow::bail!("Unsupported URL scheme: {}", url.scheme());
        }

        match &bench.tokenizer {
            TokenizerSource::File(path) | TokenizerSource::Vocab(path) if !path.exists() => {
                anyhow::bail!("Tokenizer file does not exist: {}", path.display());
            }
            _ => {}
        }

        Ok(())
    }
}

/// Expand tilde (~) in file paths to user's home directory
fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}
