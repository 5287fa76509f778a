use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_ENCODING, CONTENT_ENCODING};
use reqwest::{Client, Request, StatusCode};

use crate::bench::payload::CompressedPayload;
use crate::error::{BenchError, Result};

/// Tells the server where the JSON header ends inside the (decompressed) body
pub const INFERENCE_HEADER_CONTENT_LENGTH: &str = "Inference-Header-Content-Length";

/// HTTP session for the inference endpoint.
///
/// One `reqwest::Client` is created up front and reused, so every request
/// after the first rides on a pooled keep-alive connection.
pub struct InferenceClient {
    /// Shared HTTP client with connection pooling
    client: Client,

    /// Full `/v2/models/{model}/versions/{version}/infer` URL
    url: String,
}

impl InferenceClient {
    /// Create a client for `url`. Without `timeout` a stalled server blocks forever.
    pub fn new(url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        // Triton matches Inference-Header-Content-Length by its canonical casing
        let mut builder = Client::builder()
            .pool_max_idle_per_host(1)
            .http1_title_case_headers();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Build the POST carrying a compressed body and its framing headers
    pub fn build_request(&self, payload: &CompressedPayload) -> Result<Request> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_ENCODING, HeaderValue::from_static("gzip"));
        headers.insert(ACCEPT_ENCODING, HeaderValue::from_static("gzip"));
        headers.insert(
            INFERENCE_HEADER_CONTENT_LENGTH,
            HeaderValue::from(payload.json_len),
        );

        let request = self
            .client
            .post(&self.url)
            .headers(headers)
            .body(payload.body.clone())
            .build()?;
        Ok(request)
    }

    /// Send one request and drain the response.
    ///
    /// The status is returned but not checked; the body is read to completion
    /// so the connection goes back to the pool, then dropped.
    pub async fn send(&self, payload: &CompressedPayload) -> Result<StatusCode> {
        let request = self.build_request(payload)?;
        let response = self.client.execute(request).await?;
        let status = response.status();
        let body = response.bytes().await?;

        tracing::trace!(status = %status, bytes = body.len(), "Received inference response");
        Ok(status)
    }

    /// Send one request and fail unless the server answers 2xx
    pub async fn send_checked(&self, payload: &CompressedPayload) -> Result<StatusCode> {
        let request = self.build_request(payload)?;
        let response = self.client.execute(request).await?;
        let status = response.status();

        if status.is_success() {
            let _ = response.bytes().await?;
            return Ok(status);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::error!(
            status = status.as_u16(),
            url = %self.url,
            response_body = %body,
            "Inference server rejected request"
        );
        Err(BenchError::UnexpectedStatus {
            status: status.as_u16(),
            body,
        })
    }
}
