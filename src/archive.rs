//! Optional zip extraction of a downloaded file.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use zip::ZipArchive;

use crate::config::ErrorPolicy;
use crate::error::{DownloadError, Result};
use crate::models::ArchiveStatus;

/// Extract `path` into `target_dir` when `unzip_requested` is set.
///
/// Entries keep their relative paths inside the archive. A file that cannot
/// be read as a zip is reported through `policy`; it is never modified or
/// removed.
pub fn maybe_expand(
    path: &Path,
    target_dir: &Path,
    unzip_requested: bool,
    policy: ErrorPolicy,
) -> Result<ArchiveStatus> {
    if !unzip_requested {
        return Ok(ArchiveStatus::NotRequested);
    }

    let file = File::open(path)?;

    match extract_zip(file, target_dir) {
        Ok(entries) => {
            tracing::info!(entries, "Extracted {} into {}", path.display(), target_dir.display());
            Ok(ArchiveStatus::Extracted { entries })
        }
        Err(e) => {
            let reason = e.to_string();
            policy.check(DownloadError::InvalidArchive {
                path: path.to_path_buf(),
                reason: reason.clone(),
            })?;
            Ok(ArchiveStatus::NotAnArchive { reason })
        }
    }
}

fn extract_zip(file: File, target_dir: &Path) -> zip::result::ZipResult<usize> {
    let mut archive = ZipArchive::new(BufReader::new(file))?;
    std::fs::create_dir_all(target_dir)?;
    archive.extract(target_dir)?;
    Ok(archive.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use tempfile::TempDir;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    fn write_zip(path: &Path, entries: &[(&str, &[u8])]) {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, content) in entries {
            writer.start_file(*name, SimpleFileOptions::default()).unwrap();
            writer.write_all(content).unwrap();
        }
        let bytes = writer.finish().unwrap().into_inner();
        std::fs::write(path, bytes).unwrap();
    }

    #[test]
    fn test_not_requested_is_noop() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.zip");

        let status = maybe_expand(&path, dir.path(), false, ErrorPolicy::Raise).unwrap();
        assert_eq!(status, ArchiveStatus::NotRequested);
    }

    #[test]
    fn test_extracts_nested_entries() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bundle.zip");
        write_zip(&path, &[("foo.txt", b"hi"), ("nested/bar.txt", b"there")]);

        let status = maybe_expand(&path, dir.path(), true, ErrorPolicy::Raise).unwrap();

        assert_eq!(status, ArchiveStatus::Extracted { entries: 2 });
        assert_eq!(std::fs::read_to_string(dir.path().join("foo.txt")).unwrap(), "hi");
        assert_eq!(
            std::fs::read_to_string(dir.path().join("nested").join("bar.txt")).unwrap(),
            "there"
        );
        assert!(path.exists());
    }

    #[test]
    fn test_invalid_archive_warns() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "this is plainly not a zip archive").unwrap();

        let status = maybe_expand(&path, dir.path(), true, ErrorPolicy::Warn).unwrap();

        assert!(matches!(status, ArchiveStatus::NotAnArchive { .. }));
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "this is plainly not a zip archive"
        );
    }

    #[test]
    fn test_invalid_archive_raises_in_strict_mode() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "this is plainly not a zip archive").unwrap();

        let result = maybe_expand(&path, dir.path(), true, ErrorPolicy::Raise);

        assert!(matches!(result, Err(DownloadError::InvalidArchive { .. })));
        assert!(path.exists());
    }
}
