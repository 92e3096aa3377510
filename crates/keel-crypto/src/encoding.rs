use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

/// Encode bytes as base64 using the standard, padded alphabet.
pub fn encode_to_b64(data: &[u8]) -> String {
    STANDARD.encode(data)
}

/// Decode standard, padded base64 text.
pub fn decode_from_b64(text: &str) -> Result<Vec<u8>, EncodingError> {
    STANDARD
        .decode(text)
        .map_err(|e| EncodingError::InvalidBase64(e.to_string()))
}

/// Errors from text encoding.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EncodingError {
    #[error("invalid base64: {0}")]
    InvalidBase64(String),
}
