//! Errors raised while building or reading share links.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShareError {
    #[error("share token is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("failed to compress share data: {0}")]
    Deflate(#[source] std::io::Error),

    #[error("failed to decompress share data: {0}")]
    Inflate(#[source] std::io::Error),

    #[error("share data is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("share data is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid base URL: {0}")]
    Url(#[from] url::ParseError),
}

/// A specialized Result type for share operations.
pub type ShareResult<T> = Result<T, ShareError>;
