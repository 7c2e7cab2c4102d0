//! Extraction of Drive file IDs from share links.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{DownloadError, Result};

/// `https://drive.google.com/file/d/<ID>/view`
static FILE_URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://drive\.google\.com/file/(?:u/\d+/)?d/([a-zA-Z0-9_-]+)")
        .expect("Invalid file URL regex")
});

/// `https://drive.google.com/open?id=<ID>` and `https://docs.google.com/uc?export=download&id=<ID>`
static QUERY_URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://(?:drive|docs)\.google\.com/(?:open|uc)\?(?:[^#]*&)?id=([a-zA-Z0-9_-]+)")
        .expect("Invalid query URL regex")
});

static ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_-]+$").expect("Invalid ID regex"));

/// Extract a file ID from a share link or validate a raw ID.
///
/// Supports the following formats:
/// - `https://drive.google.com/file/d/<ID>/view`
/// - `https://drive.google.com/open?id=<ID>`
/// - `https://drive.google.com/uc?id=<ID>&export=download`
/// - `https://docs.google.com/uc?export=download&id=<ID>`
/// - Raw ID string
///
/// # Examples
///
/// ```
/// use gdrive_download::url_parser::extract_id;
///
/// let id = extract_id("https://drive.google.com/file/d/1abc123/view?usp=sharing").unwrap();
/// assert_eq!(id, "1abc123");
///
/// let id = extract_id("1abc123").unwrap();
/// assert_eq!(id, "1abc123");
/// ```
pub fn extract_id(url_or_id: &str) -> Result<String> {
    let trimmed = url_or_id.trim();

    for regex in [&*FILE_URL_REGEX, &*QUERY_URL_REGEX] {
        if let Some(id) = regex.captures(trimmed).and_then(|c| c.get(1)) {
            return Ok(id.as_str().to_string());
        }
    }

    if ID_REGEX.is_match(trimmed) {
        return Ok(trimmed.to_string());
    }

    Err(DownloadError::InvalidUrlOrId(url_or_id.to_string()))
}
