//! Shortcode extraction from heterogeneous user input.
//!
//! Accepts a bare shortcode, a full post URL in any of the known path
//! flavors (`/p/`, `/reel/`, `/reels/`, `/tv/`, with or without a username
//! prefix), or an obscure URL whose last long path segment is the code.
//!
//! Extraction policy: the full three-rule chain (bare-input passthrough,
//! path-segment match, trailing-segment scan). The variant that skips the
//! trailing-segment scan and falls back to the whole trimmed string is
//! deliberately not implemented.

use crate::core::error::{AppError, AppResult};
use once_cell::sync::Lazy;
use regex::Regex;

/// Path segment names that precede a shortcode, delimited by `/` and
/// terminated by the next `/`, `?`, `#`, or `&`.
static CONTENT_SEGMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|/)(?:reel|reels|p|tv)/([^/?#&]+)").expect("shortcode regex is valid"));

/// Derive a canonical shortcode from user input.
///
/// Rules, in priority order:
/// 1. Input with no URL markers is treated as an already-canonical id,
///    trimmed of whitespace and any query/path suffix.
/// 2. A `reel|reels|p|tv` path segment yields the segment that follows it.
/// 3. Otherwise the path segments are scanned from the end; the first one
///    longer than 5 characters (query suffix stripped) wins.
pub fn extract_shortcode(input: &str) -> AppResult<String> {
    let trimmed = input.trim();

    if !trimmed.contains("instagram.com") && !trimmed.contains("http") {
        let code = trimmed
            .split('?')
            .next()
            .unwrap_or("")
            .split('/')
            .next()
            .unwrap_or("");
        if !code.is_empty() {
            return Ok(code.to_string());
        }
        return Err(AppError::NotExtractable(format!("empty input {:?}", input)));
    }

    if let Some(caps) = CONTENT_SEGMENT_RE.captures(trimmed) {
        return Ok(caps[1].to_string());
    }

    for part in trimmed.trim_end_matches('/').split('/').rev() {
        let clean = part.split('?').next().unwrap_or("");
        if clean.len() > 5 {
            return Ok(clean.to_string());
        }
    }

    Err(AppError::NotExtractable(format!("no shortcode in {:?}", input)))
}
