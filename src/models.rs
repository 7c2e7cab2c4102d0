//! Request and outcome types for a single download.

use std::path::{Path, PathBuf};

/// Parameters for one download invocation.
#[derive(Debug, Clone, Default)]
pub struct DownloadRequest {
    pub file_id: String,
    /// Where to write the file. When `None`, the name comes from the
    /// `Content-Disposition` response header.
    pub dest_path: Option<PathBuf>,
    pub overwrite: bool,
    pub unzip: bool,
    pub show_progress: bool,
}

impl DownloadRequest {
    pub fn new(file_id: impl Into<String>) -> Self {
        Self {
            file_id: file_id.into(),
            ..Self::default()
        }
    }

    pub fn dest_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.dest_path = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn unzip(mut self, unzip: bool) -> Self {
        self.unzip = unzip;
        self
    }

    pub fn show_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }
}

/// What happened to the archive expansion step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArchiveStatus {
    NotRequested,
    Extracted { entries: usize },
    /// Expansion was requested but the file could not be read as a zip.
    NotAnArchive { reason: String },
}

/// Result of a download call that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    Completed {
        path: PathBuf,
        bytes: u64,
        archive: ArchiveStatus,
    },
    /// The service answered with a non-success status and the error policy
    /// only asked for a warning. Nothing was written.
    RemoteRejected { status: u16, reason: String },
}

impl DownloadOutcome {
    /// Path of the written file, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Completed { path, .. } => Some(path),
            Self::RemoteRejected { .. } => None,
        }
    }
}
