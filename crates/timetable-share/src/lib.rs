//! Share links for timetables.
//!
//! A timetable travels inside a URL fragment as a compact token:
//!
//! ```text
//! ShareData ──json──▶ zlib ──▶ base64url ──▶ https://host/#share=<token>
//! ```
//!
//! Decoding reverses the pipeline and, failing that, tries the legacy
//! uncompressed encoding so that old links keep working.

pub mod codec;
pub mod error;
pub mod link;

pub use codec::{ShareData, decode, decode_compressed, decode_legacy, encode};
pub use error::{ShareError, ShareResult};
pub use link::{SHARE_PREFIX, extract_token, share_url};
