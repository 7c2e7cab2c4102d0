//! Downloader configuration and the strict/non-strict error policy.

use std::path::PathBuf;

use crate::error::{DownloadError, Result};

/// Export endpoint for publicly shared Drive files.
pub const DOWNLOAD_URL: &str = "https://docs.google.com/uc?export=download";

/// Size of a single read from the response body (32 KiB).
pub const CHUNK_SIZE: usize = 32768;

/// How recoverable failures (remote status, invalid archive) are surfaced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Log a warning and let the download call return normally.
    #[default]
    Warn,
    /// Return the failure as an error.
    Raise,
}

impl ErrorPolicy {
    /// `Raise` when `strict` is set, `Warn` otherwise.
    pub fn from_strict(strict: bool) -> Self {
        if strict {
            Self::Raise
        } else {
            Self::Warn
        }
    }

    /// Surface `err` according to the policy.
    ///
    /// Returns `Ok(())` after logging under `Warn`, so the caller can fall
    /// back to its non-fatal path.
    pub fn check(self, err: DownloadError) -> Result<()> {
        match self {
            Self::Raise => Err(err),
            Self::Warn => {
                tracing::warn!("{}", err);
                Ok(())
            }
        }
    }
}

/// Settings shared by every download issued through a [`crate::Downloader`].
#[derive(Debug, Clone)]
pub struct DownloaderConfig {
    /// Export URL; `id` and `confirm` are appended as query parameters.
    pub endpoint: String,
    /// Maximum number of bytes read from the body per write.
    pub chunk_size: usize,
    /// Directory for files named from `Content-Disposition`.
    pub download_dir: PathBuf,
    pub policy: ErrorPolicy,
}

impl Default for DownloaderConfig {
    fn default() -> Self {
        Self {
            endpoint: DOWNLOAD_URL.to_string(),
            chunk_size: CHUNK_SIZE,
            download_dir: PathBuf::from("."),
            policy: ErrorPolicy::Warn,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_strict() {
        assert_eq!(ErrorPolicy::from_strict(true), ErrorPolicy::Raise);
        assert_eq!(ErrorPolicy::from_strict(false), ErrorPolicy::Warn);
        assert_eq!(ErrorPolicy::default(), ErrorPolicy::Warn);
    }

    #[test]
    fn test_check_warn_swallows() {
        let err = DownloadError::RemoteError {
            status: 404,
            reason: "Not Found".to_string(),
        };
        assert!(ErrorPolicy::Warn.check(err).is_ok());
    }

    #[test]
    fn test_check_raise_returns_error() {
        let err = DownloadError::RemoteError {
            status: 500,
            reason: "Internal Server Error".to_string(),
        };
        match ErrorPolicy::Raise.check(err) {
            Err(DownloadError::RemoteError { status, .. }) => assert_eq!(status, 500),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_default_config() {
        let config = DownloaderConfig::default();
        assert_eq!(config.endpoint, DOWNLOAD_URL);
        assert_eq!(config.chunk_size, 32768);
        assert_eq!(config.download_dir, PathBuf::from("."));
        assert_eq!(config.policy, ErrorPolicy::Warn);
    }
}
