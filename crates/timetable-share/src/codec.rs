//! Share token encoding and decoding.
//!
//! Current tokens are `base64url(zlib(json))` without padding. Links made
//! before compression was introduced carry
//! `base64(encodeURIComponent(json))` and are still accepted by [`decode`].

use std::io::{Read, Write};

use base64::Engine;
use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, URL_SAFE_NO_PAD};
use base64::engine::DecodePaddingMode;
use flate2::Compression;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use serde::{Deserialize, Serialize};
use timetable_core::TimetableEvent;
use tracing::debug;

use crate::error::{ShareError, ShareResult};

/// Standard alphabet that tolerates missing padding, as browsers' `atob` does.
const LEGACY_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// The unit carried by a share link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareData {
    pub events: Vec<TimetableEvent>,
    #[serde(default)]
    pub file_name: String,
}

impl ShareData {
    pub fn new(events: Vec<TimetableEvent>, file_name: impl Into<String>) -> Self {
        Self {
            events,
            file_name: file_name.into(),
        }
    }

    /// Encodes this value as a share token.
    pub fn to_token(&self) -> ShareResult<String> {
        let json = serde_json::to_vec(self)?;
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::best());
        encoder.write_all(&json).map_err(ShareError::Deflate)?;
        let compressed = encoder.finish().map_err(ShareError::Deflate)?;

        debug!(
            json_bytes = json.len(),
            compressed_bytes = compressed.len(),
            "Encoded share token"
        );
        Ok(URL_SAFE_NO_PAD.encode(compressed))
    }
}

/// Encodes events and the originating file name as a share token.
pub fn encode(events: &[TimetableEvent], file_name: &str) -> ShareResult<String> {
    ShareData::new(events.to_vec(), file_name).to_token()
}

/// Decodes a share token, falling back to the legacy uncompressed format.
///
/// Returns `None` when neither format yields valid data; callers should
/// report an invalid or corrupted link.
pub fn decode(token: &str) -> Option<ShareData> {
    match decode_compressed(token) {
        Ok(data) => Some(data),
        Err(compressed_err) => {
            debug!(error = %compressed_err, "Compressed decode failed, trying legacy format");
            match decode_legacy(token) {
                Ok(data) => Some(data),
                Err(legacy_err) => {
                    debug!(error = %legacy_err, "Legacy decode failed");
                    None
                }
            }
        }
    }
}

/// Decodes a current `base64url(zlib(json))` token.
pub fn decode_compressed(token: &str) -> ShareResult<ShareData> {
    let trimmed = token.trim().trim_end_matches('=');
    let compressed = URL_SAFE_NO_PAD.decode(trimmed)?;

    let mut json = Vec::new();
    ZlibDecoder::new(compressed.as_slice())
        .read_to_end(&mut json)
        .map_err(ShareError::Inflate)?;

    Ok(serde_json::from_slice(&json)?)
}

/// Decodes a legacy `base64(encodeURIComponent(json))` token.
///
/// The token itself may still be percent-encoded from the URL.
pub fn decode_legacy(token: &str) -> ShareResult<ShareData> {
    let unescaped = urlencoding::decode(token.trim())?;
    let bytes = LEGACY_ENGINE.decode(unescaped.as_bytes())?;
    let component = String::from_utf8(bytes)?;
    let json = urlencoding::decode(&component)?;
    Ok(serde_json::from_str(&json)?)
}
