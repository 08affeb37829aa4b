//! Tile preview text derived from item content.
//!
//! Rules:
//! - whitespace runs (including blank lines) collapse to one space;
//! - the first `PREVIEW_MAX_CHARS` characters are kept, with `...` appended
//!   when text was cut;
//! - blank content has no preview.

use once_cell::sync::Lazy;
use regex::Regex;

pub const PREVIEW_MAX_CHARS: usize = 100;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Derives a single-line preview of `content`.
pub fn derive_content_preview(content: &str) -> Option<String> {
    let normalized = WHITESPACE_RE.replace_all(content, " ");
    let trimmed = normalized.trim();
    if trimmed.is_empty() {
        return None;
    }

    let mut preview = trimmed.chars().take(PREVIEW_MAX_CHARS).collect::<String>();
    if trimmed.chars().count() > PREVIEW_MAX_CHARS {
        preview.push_str("...");
    }
    Some(preview)
}
