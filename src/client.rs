//! Downloader for publicly shared Google Drive files.

use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};

use futures::TryStreamExt;
use reqwest::header::CONTENT_DISPOSITION;
use reqwest::{Client, Response};
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio_util::io::StreamReader;

use crate::archive::maybe_expand;
use crate::config::DownloaderConfig;
use crate::error::{DownloadError, Result};
use crate::filename;
use crate::models::{ArchiveStatus, DownloadOutcome, DownloadRequest};
use crate::progress::ProgressLine;

/// Cookie name prefix Drive uses to ask for a virus-scan bypass confirmation.
const DOWNLOAD_WARNING_PREFIX: &str = "download_warning";

/// Client that downloads shared files through the Drive export endpoint.
pub struct Downloader {
    config: DownloaderConfig,
    http: Client,
}

impl Downloader {
    /// Create a new Downloader.
    ///
    /// The HTTP client keeps a cookie store so the large-file warning cookie
    /// is sent back with the confirmation request.
    pub fn new(config: DownloaderConfig) -> Result<Self> {
        let http = Client::builder().cookie_store(true).build()?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &DownloaderConfig {
        &self.config
    }

    /// Download a file without any cancellation source.
    ///
    /// No signal handler is installed; use [`Downloader::download_with_cancel`]
    /// to stop on Ctrl-C or any other event.
    pub async fn download(&self, request: &DownloadRequest) -> Result<DownloadOutcome> {
        self.download_with_cancel(request, std::future::pending::<()>()).await
    }

    /// Download a file, stopping with [`DownloadError::Cancelled`] as soon as
    /// `cancel` completes.
    ///
    /// A cancelled download leaves any partially written file on disk.
    pub async fn download_with_cancel<F>(
        &self,
        request: &DownloadRequest,
        cancel: F,
    ) -> Result<DownloadOutcome>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(cancel);

        if let Some(dest) = &request.dest_path {
            ensure_parent_dir(dest).await?;
            // Skip the network round trip entirely
            check_overwrite(dest, request.overwrite)?;
        }

        let response = tokio::select! {
            biased;
            _ = &mut cancel => return Err(cancelled(None, request.overwrite)),
            response = self.fetch(&request.file_id) => response?,
        };

        let status = response.status();
        if !status.is_success() {
            let reason = status.canonical_reason().unwrap_or("Unknown").to_string();
            self.config.policy.check(DownloadError::RemoteError {
                status: status.as_u16(),
                reason: reason.clone(),
            })?;
            return Ok(DownloadOutcome::RemoteRejected {
                status: status.as_u16(),
                reason,
            });
        }

        let dest = match &request.dest_path {
            Some(path) => path.clone(),
            None => {
                let path = self.resolve_destination(&request.file_id, &response).await?;
                check_overwrite(&path, request.overwrite)?;
                path
            }
        };

        tracing::info!("Downloading {} into {}", request.file_id, dest.display());

        let mut file = File::create(&dest).await?;
        let bytes = tokio::select! {
            biased;
            _ = &mut cancel => return Err(cancelled(Some(dest), request.overwrite)),
            written = self.save_response_content(response, &mut file, request.show_progress) => written?,
        };
        drop(file);

        tracing::info!(bytes, "Finished downloading {}", dest.display());

        let archive = if request.unzip {
            let (path, target_dir) = (dest.clone(), parent_dir(&dest).to_path_buf());
            let policy = self.config.policy;
            tokio::task::spawn_blocking(move || maybe_expand(&path, &target_dir, true, policy))
                .await
                .map_err(io::Error::other)??
        } else {
            ArchiveStatus::NotRequested
        };

        Ok(DownloadOutcome::Completed {
            path: dest,
            bytes,
            archive,
        })
    }

    /// Request the file, confirming the large-file warning when Drive asks for it.
    async fn fetch(&self, file_id: &str) -> Result<Response> {
        let response = self
            .http
            .get(&self.config.endpoint)
            .query(&[("id", file_id)])
            .send()
            .await?;

        let Some(token) = confirm_token(&response) else {
            return Ok(response);
        };
        drop(response);

        tracing::debug!("Confirming large file download for {}", file_id);

        let response = self
            .http
            .get(&self.config.endpoint)
            .query(&[("id", file_id), ("confirm", token.as_str())])
            .send()
            .await?;

        Ok(response)
    }

    /// Destination named by the response's `Content-Disposition` header.
    async fn resolve_destination(&self, file_id: &str, response: &Response) -> Result<PathBuf> {
        let name = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(filename::from_content_disposition)
            .and_then(|name| filename::sanitize(&name))
            .ok_or_else(|| DownloadError::UnresolvableDestination(file_id.to_string()))?;

        let path = self.config.download_dir.join(name);
        ensure_parent_dir(&path).await?;
        Ok(path)
    }

    /// Stream the body into `file`, returning the number of bytes written.
    async fn save_response_content(
        &self,
        response: Response,
        file: &mut File,
        show_progress: bool,
    ) -> Result<u64> {
        // StreamReader skips empty keep-alive chunks, so a zero-length read is end of body
        let reader = StreamReader::new(response.bytes_stream().map_err(io::Error::other));
        tokio::pin!(reader);

        let mut buf = vec![0u8; self.config.chunk_size.max(1)];
        let mut progress = show_progress.then(ProgressLine::stderr);
        let mut written: u64 = 0;

        loop {
            let n = reader.read(&mut buf).await?;
            if n == 0 {
                break;
            }

            file.write_all(&buf[..n]).await?;
            written += n as u64;

            if let Some(progress) = progress.as_mut() {
                progress.update(written)?;
            }
        }

        file.flush().await?;

        if let Some(progress) = progress.as_mut() {
            progress.finish()?;
        }

        Ok(written)
    }
}

fn confirm_token(response: &Response) -> Option<String> {
    response
        .cookies()
        .find(|cookie| cookie.name().starts_with(DOWNLOAD_WARNING_PREFIX))
        .map(|cookie| cookie.value().to_string())
}

fn check_overwrite(path: &Path, overwrite: bool) -> Result<()> {
    if path.exists() && !overwrite {
        return Err(DownloadError::AlreadyExists(path.to_path_buf()));
    }
    Ok(())
}

async fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    Ok(())
}

/// Directory an archive is extracted into.
fn parent_dir(path: &Path) -> &Path {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
}

fn cancelled(partial: Option<PathBuf>, overwrite: bool) -> DownloadError {
    let err = DownloadError::Cancelled { partial, overwrite };
    tracing::warn!("{}", err);
    err
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_check_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("file.bin");

        assert!(check_overwrite(&path, false).is_ok());

        std::fs::write(&path, b"old").unwrap();
        assert!(matches!(
            check_overwrite(&path, false),
            Err(DownloadError::AlreadyExists(p)) if p == path
        ));
        assert!(check_overwrite(&path, true).is_ok());
    }

    #[tokio::test]
    async fn test_ensure_parent_dir_creates_intermediate_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a").join("b").join("file.bin");

        ensure_parent_dir(&path).await.unwrap();
        assert!(dir.path().join("a").join("b").is_dir());

        ensure_parent_dir(Path::new("relative.bin")).await.unwrap();
    }

    #[test]
    fn test_parent_dir() {
        assert_eq!(parent_dir(Path::new("file.zip")), Path::new("."));
        assert_eq!(parent_dir(Path::new("data/file.zip")), Path::new("data"));
    }
}
