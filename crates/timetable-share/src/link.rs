//! Share link assembly and token extraction.
//!
//! A link is the app's base URL with the token in the fragment, e.g.
//! `https://example.org/timetable#share=eJy...`. Fragments never reach the
//! server, so the timetable stays on the client.

use url::Url;

use crate::error::ShareResult;

/// Fragment prefix that marks a share token.
pub const SHARE_PREFIX: &str = "share=";

/// Builds a share link, replacing any fragment already on `base`.
pub fn share_url(base: &str, token: &str) -> ShareResult<String> {
    let mut url = Url::parse(base)?;
    url.set_fragment(Some(&format!("{SHARE_PREFIX}{token}")));
    Ok(url.into())
}

/// Pulls the token out of a share link.
///
/// Accepts a full URL, a bare `#share=...` or `share=...` fragment, or the
/// token on its own. Returns `None` for a URL without a share fragment.
pub fn extract_token(input: &str) -> Option<String> {
    let input = input.trim();

    if let Ok(url) = Url::parse(input) {
        return url
            .fragment()
            .and_then(|fragment| fragment.strip_prefix(SHARE_PREFIX))
            .filter(|token| !token.is_empty())
            .map(str::to_string);
    }

    let input = input.strip_prefix('#').unwrap_or(input);
    let token = input.strip_prefix(SHARE_PREFIX).unwrap_or(input);
    (!token.is_empty()).then(|| token.to_string())
}
