//! Error types for the gdrive_download crate.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while downloading a shared Google Drive file.
#[derive(Error, Debug)]
pub enum DownloadError {
    #[error("File already exists on disk: {}. Set `overwrite` to download it again.", .0.display())]
    AlreadyExists(PathBuf),

    #[error("Unable to retrieve a destination path for `{0}` from the response headers, please set it manually")]
    UnresolvableDestination(String),

    #[error("Remote error ({status}): {reason}")]
    RemoteError { status: u16, reason: String },

    #[error("Ignoring unzip since {} does not look like a valid zip file: {reason}", .path.display())]
    InvalidArchive { path: PathBuf, reason: String },

    #[error("File download cancelled.{}", cancel_hint(.partial, .overwrite))]
    Cancelled {
        partial: Option<PathBuf>,
        overwrite: bool,
    },

    #[error("Invalid URL or ID: {0}")]
    InvalidUrlOrId(String),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

fn cancel_hint(partial: &Option<PathBuf>, overwrite: &bool) -> String {
    match partial {
        Some(path) if !*overwrite => format!(
            " Delete the incomplete download {} from the disk before retrying.",
            path.display()
        ),
        _ => String::new(),
    }
}

/// Result type alias for DownloadError.
pub type Result<T> = std::result::Result<T, DownloadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancelled_mentions_partial_file() {
        let err = DownloadError::Cancelled {
            partial: Some(PathBuf::from("data/big.bin")),
            overwrite: false,
        };
        let display = err.to_string();
        assert!(display.starts_with("File download cancelled."));
        assert!(display.contains("data/big.bin"));
        assert!(display.contains("before retrying"));
    }

    #[test]
    fn test_cancelled_with_overwrite_has_no_hint() {
        let err = DownloadError::Cancelled {
            partial: Some(PathBuf::from("data/big.bin")),
            overwrite: true,
        };
        assert_eq!(err.to_string(), "File download cancelled.");

        let err = DownloadError::Cancelled {
            partial: None,
            overwrite: false,
        };
        assert_eq!(err.to_string(), "File download cancelled.");
    }
}
