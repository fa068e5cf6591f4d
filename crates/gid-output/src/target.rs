//! Exclusive handle on the output workbook file.

use std::fs::{self, File, OpenOptions, TryLockError};
use std::io::{self, ErrorKind, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{ExportError, Result};

/// Output file opened and locked for the duration of an export.
///
/// Opening doubles as a probe: a file held by another process fails here,
/// before any sheet is built. Existing content is only replaced by
/// [`OutputTarget::commit`]. If the target is dropped without a commit and
/// the file did not exist beforehand, the empty file is removed again.
#[derive(Debug)]
pub struct OutputTarget {
    path: PathBuf,
    file: Option<File>,
    created: bool,
    committed: bool,
}

impl OutputTarget {
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| io_error(path, source))?;
        }
        let created = !path.exists();
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)
            .map_err(|source| io_error(path, source))?;
        match file.try_lock() {
            Ok(()) => {}
            Err(TryLockError::WouldBlock) => {
                return Err(ExportError::OutputLocked {
                    path: path.to_path_buf(),
                    source: None,
                });
            }
            Err(TryLockError::Error(source)) => return Err(io_error(path, source)),
        }
        debug!(path = %path.display(), created, "output locked");
        Ok(Self {
            path: path.to_path_buf(),
            file: Some(file),
            created,
            committed: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replaces the file content with `bytes` and releases the handle.
    pub fn commit(mut self, bytes: &[u8]) -> Result<()> {
        let Some(mut file) = self.file.take() else {
            return Err(io_error(&self.path, io::Error::other("output handle already released")));
        };
        let written = replace_content(&mut file, bytes);
        self.committed = true;
        written.map_err(|source| io_error(&self.path, source))
    }
}

fn replace_content(file: &mut File, bytes: &[u8]) -> io::Result<()> {
    file.set_len(0)?;
    file.seek(SeekFrom::Start(0))?;
    file.write_all(bytes)?;
    file.sync_all()
}

impl Drop for OutputTarget {
    fn drop(&mut self) {
        // Close before removing; some platforms refuse to delete open files.
        drop(self.file.take());
        if self.created && !self.committed && fs::remove_file(&self.path).is_ok() {
            debug!(path = %self.path.display(), "removed unused output file");
        }
    }
}

/// Maps an I/O failure on `path` to the locked or the generic variant.
pub fn io_error(path: &Path, source: io::Error) -> ExportError {
    if is_lock_error(&source) {
        ExportError::OutputLocked {
            path: path.to_path_buf(),
            source: Some(source),
        }
    } else {
        ExportError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Returns true for errors meaning another process holds the file.
pub fn is_lock_error(error: &io::Error) -> bool {
    if matches!(
        error.kind(),
        ErrorKind::PermissionDenied | ErrorKind::ResourceBusy
    ) {
        return true;
    }
    // ERROR_SHARING_VIOLATION / ERROR_LOCK_VIOLATION
    cfg!(windows) && matches!(error.raw_os_error(), Some(32 | 33))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_lock_error_classification() {
        assert!(is_lock_error(&io::Error::from(ErrorKind::PermissionDenied)));
        assert!(is_lock_error(&io::Error::from(ErrorKind::ResourceBusy)));
        assert!(!is_lock_error(&io::Error::from(ErrorKind::NotFound)));
        assert!(!is_lock_error(&io::Error::other("disk full")));
    }

    #[test]
    fn test_second_open_reports_locked() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.xlsx");
        let _held = OutputTarget::open(&path).unwrap();

        let err = OutputTarget::open(&path).unwrap_err();

        assert!(err.is_locked());
    }

    #[test]
    fn test_commit_replaces_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.xlsx");
        fs::write(&path, b"previous content that is longer").unwrap();

        OutputTarget::open(&path).unwrap().commit(b"new").unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"new");
    }

    #[test]
    fn test_uncommitted_new_file_is_removed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("out.xlsx");

        drop(OutputTarget::open(&path).unwrap());

        assert!(!path.exists());
    }

    #[test]
    fn test_uncommitted_existing_file_is_untouched() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.xlsx");
        fs::write(&path, b"keep").unwrap();

        drop(OutputTarget::open(&path).unwrap());

        assert_eq!(fs::read(&path).unwrap(), b"keep");
    }
}
