//! Transport framing for the remote content API
//!
//! The content API carries file bodies as base64. Responses may wrap the
//! encoded text across lines, so whitespace is ignored when decoding.

use base64::Engine;
use thiserror::Error;

/// Transport decode failure
#[derive(Debug, Error, PartialEq)]
pub enum TransportError {
    /// Body is not valid base64
    #[error("Invalid base64: {0}")]
    InvalidBase64(String),
}

/// Encode raw bytes for an upload body
pub fn encode_content(bytes: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(bytes)
}

/// Decode a download body, ignoring embedded whitespace
pub fn decode_content(encoded: &str) -> Result<Vec<u8>, TransportError> {
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    base64::engine::general_purpose::STANDARD
        .decode(compact)
        .map_err(|e| TransportError::InvalidBase64(e.to_string()))
}
