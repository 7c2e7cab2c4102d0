//! Destination names taken from the `Content-Disposition` header.

use regex::Regex;
use std::sync::LazyLock;

static FILENAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"filename="(?P<filename>.+)""#).expect("Invalid filename regex")
});

/// Characters stripped from server-provided names on every platform.
const ILLEGAL_CHARS: &[char] = &['/', '\\', '<', '>', ':', '"', '|', '?', '*'];

/// Extract the quoted `filename="..."` value from a `Content-Disposition` header.
pub fn from_content_disposition(header: &str) -> Option<String> {
    FILENAME_REGEX
        .captures(header)
        .and_then(|captures| captures.name("filename"))
        .map(|m| m.as_str().to_string())
}

/// Strip characters that are illegal in a filename on common filesystems.
///
/// Returns `None` when nothing usable is left.
pub fn sanitize(name: &str) -> Option<String> {
    let cleaned: String = name
        .chars()
        .filter(|c| !ILLEGAL_CHARS.contains(c) && !c.is_control())
        .collect();
    let cleaned = cleaned.trim();

    match cleaned {
        "" | "." | ".." => None,
        _ => Some(cleaned.to_string()),
    }
}
