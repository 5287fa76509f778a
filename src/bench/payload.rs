//! Request payload construction and body framing.
//!
//! The body is the JSON request compressed as a whole. The server also needs
//! the uncompressed JSON length in `Inference-Header-Content-Length` to know
//! where the JSON header ends, so both travel together in [`CompressedPayload`].

use std::io::{Read, Write};

use flate2::read::{GzDecoder, ZlibDecoder};
use flate2::write::{GzEncoder, ZlibEncoder};
use flate2::Compression;
use serde::{Deserialize, Serialize};

use crate::error::{BenchError, Result};
use crate::models::InferenceRequest;
use crate::tokenizer::InputTokenizer;

/// Container used for the compressed body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BodyEncoding {
    /// zlib stream (RFC 1950), what `zlib.compress` produces
    #[default]
    Zlib,
    /// gzip container (RFC 1952), what `Content-Encoding: gzip` formally means
    Gzip,
}

impl std::fmt::Display for BodyEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BodyEncoding::Zlib => write!(f, "zlib"),
            BodyEncoding::Gzip => write!(f, "gzip"),
        }
    }
}

impl std::str::FromStr for BodyEncoding {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "zlib" | "deflate" => Ok(BodyEncoding::Zlib),
            "gzip" => Ok(BodyEncoding::Gzip),
            _ => Err(format!("Unknown body encoding: {}", s)),
        }
    }
}

/// Compressed request body plus the length of the JSON it was made from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedPayload {
    pub body: Vec<u8>,
    pub json_len: usize,
}

/// Tokenize `text` and wrap the tensors in an inference request
pub fn build_payload(
    tokenizer: &InputTokenizer,
    text: &str,
    request_id: &str,
) -> Result<InferenceRequest> {
    let tokens = tokenizer.encode(text)?;
    Ok(InferenceRequest::from_tokens(request_id, &tokens))
}

/// Render the request as UTF-8 JSON and compress it
pub fn serialize_and_compress(
    request: &InferenceRequest,
    encoding: BodyEncoding,
) -> Result<CompressedPayload> {
    let json = serde_json::to_vec(request)?;
    let body = compress(&json, encoding)?;
    Ok(CompressedPayload {
        body,
        json_len: json.len(),
    })
}

/// Compress `data` at the default level (6)
pub fn compress(data: &[u8], encoding: BodyEncoding) -> Result<Vec<u8>> {
    let out = match encoding {
        BodyEncoding::Zlib => {
            let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
            encoder.write_all(data)?;
            encoder.finish()?
        }
        BodyEncoding::Gzip => {
            let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
            encoder.write_all(data)?;
            encoder.finish()?
        }
    };
    Ok(out)
}

pub fn decompress(data: &[u8], encoding: BodyEncoding) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    match encoding {
        BodyEncoding::Zlib => ZlibDecoder::new(data).read_to_end(&mut out)?,
        BodyEncoding::Gzip => GzDecoder::new(data).read_to_end(&mut out)?,
    };
    Ok(out)
}

/// Decompress a body and parse it back into a request
pub fn decode_body(body: &[u8], encoding: BodyEncoding) -> Result<InferenceRequest> {
    let json = decompress(body, encoding)?;
    serde_json::from_slice(&json).map_err(BenchError::from)
}
