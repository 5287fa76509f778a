// Error handling module
// Defines the error taxonomy shared by the tokenizer, codec, client and runner

use thiserror::Error;

/// Errors that can end a benchmark run
#[derive(Error, Debug)]
pub enum BenchError {
    /// Tokenizer could not be loaded or could not encode the text
    #[error("Tokenizer error: {0}")]
    Tokenizer(String),

    /// Payload could not be rendered as JSON
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Body could not be compressed or decompressed
    #[error("Compression error: {0}")]
    Compression(#[from] std::io::Error),

    /// Transport-level failure talking to the inference server
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response while running the strict smoke test
    #[error("Unexpected status from inference server: {status} - {body}")]
    UnexpectedStatus { status: u16, body: String },

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Statistics could not be computed from the timing buffer
    #[error("Metrics error: {0}")]
    Metrics(String),
}

/// Result type alias for benchmark operations
pub type Result<T> = std::result::Result<T, BenchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = BenchError::Tokenizer("unknown token".to_string());
        assert_eq!(err.to_string(), "Tokenizer error: unknown token");

        let err = BenchError::UnexpectedStatus {
            status: 400,
            body: "bad request".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Unexpected status from inference server: 400 - bad request"
        );
    }

    #[test]
    fn test_config_error_message() {
        let err = BenchError::Config("iterations must be positive".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: iterations must be positive"
        );
    }

    #[test]
    fn test_metrics_error_message() {
        let err = BenchError::Metrics("empty timing buffer".to_string());
        assert_eq!(err.to_string(), "Metrics error: empty timing buffer");
    }

    #[test]
    fn test_io_error_converts_to_compression() {
        let io = std::io::Error::new(std::io::ErrorKind::InvalidData, "corrupt deflate stream");
        let err: BenchError = io.into();
        assert!(matches!(err, BenchError::Compression(_)));
        assert_eq!(err.to_string(), "Compression error: corrupt deflate stream");
    }

    #[test]
    fn test_json_error_converts_to_serialization() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: BenchError = json_err.into();
        assert!(matches!(err, BenchError::Serialization(_)));
        assert!(err.to_string().starts_with("Serialization error: "));
    }
}
