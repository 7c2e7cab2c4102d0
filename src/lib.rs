//! gdrive_download - Download publicly shared Google Drive files.
//!
//! This library provides functionality to:
//! - Download a shared file by ID, confirming Drive's large-file warning
//! - Name the file from the server's `Content-Disposition` header
//! - Optionally extract zip archives next to the downloaded file
//! - Optionally print live download size
//!
//! # Example
//!
//! ```no_run
//! use gdrive_download::{DownloadRequest, Downloader, DownloaderConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let downloader = Downloader::new(DownloaderConfig::default())?;
//!
//!     let request = DownloadRequest::new("1abc123")
//!         .dest_path("data/archive.zip")
//!         .unzip(true);
//!     let outcome = downloader.download(&request).await?;
//!     println!("{:?}", outcome);
//!
//!     Ok(())
//! }
//! ```

use std::path::Path;

pub mod archive;
pub mod client;
pub mod config;
pub mod error;
pub mod filename;
pub mod models;
pub mod progress;
pub mod url_parser;

// Re-exports for convenience
pub use archive::maybe_expand;
pub use client::Downloader;
pub use config::{DownloaderConfig, ErrorPolicy};
pub use error::{DownloadError, Result};
pub use models::{ArchiveStatus, DownloadOutcome, DownloadRequest};
pub use progress::format_size;
pub use url_parser::extract_id;

/// Download a shared file with the default endpoint and settings.
///
/// `raise_on_error` selects [`ErrorPolicy::Raise`] for remote failures and
/// invalid archives; otherwise they are logged as warnings.
///
/// The call is not tied to Ctrl-C; use [`Downloader::download_with_cancel`]
/// for a cancellable download.
pub async fn download_file(
    file_id: &str,
    dest_path: Option<&Path>,
    overwrite: bool,
    unzip: bool,
    show_progress: bool,
    raise_on_error: bool,
) -> Result<DownloadOutcome> {
    let config = DownloaderConfig {
        policy: ErrorPolicy::from_strict(raise_on_error),
        ..DownloaderConfig::default()
    };
    let downloader = Downloader::new(config)?;

    let mut request = DownloadRequest::new(file_id)
        .overwrite(overwrite)
        .unzip(unzip)
        .show_progress(show_progress);
    request.dest_path = dest_path.map(Path::to_path_buf);

    downloader.download(&request).await
}
