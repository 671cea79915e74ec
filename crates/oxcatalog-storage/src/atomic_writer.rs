//! Atomic replacement of small state files
//!
//! Content goes to a sibling `.tmp` file which is synced and renamed over the
//! target, so a crash mid-write leaves either the old or the new document.

use crate::StorageResult;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Removes the temp file unless the rename went through
struct TempGuard {
    path: PathBuf,
    armed: bool,
}

impl Drop for TempGuard {
    fn drop(&mut self) {
        if self.armed {
            let _ = fs::remove_file(&self.path);
        }
    }
}

/// Replace the contents of `path` with `data` atomically
///
/// Parent directories are created as needed. On unix the file is created
/// owner-readable only since it holds credentials.
pub fn write_atomic(path: &Path, data: &[u8]) -> StorageResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let mut guard = TempGuard {
        path: temp_path(path),
        armed: true,
    };

    let mut file = open_private(&guard.path)?;
    file.write_all(data)?;
    file.flush()?;
    file.sync_all()?;
    drop(file);

    fs::rename(&guard.path, path)?;
    guard.armed = false;

    Ok(())
}

fn temp_path(final_path: &Path) -> PathBuf {
    let mut temp = final_path.as_os_str().to_owned();
    temp.push(".tmp");
    PathBuf::from(temp)
}

#[cfg(unix)]
fn open_private(path: &Path) -> std::io::Result<File> {
    use std::os::unix::fs::OpenOptionsExt;

    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)
}

#[cfg(not(unix))]
fn open_private(path: &Path) -> std::io::Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_atomic_creates_file_and_parents() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("nested/session.json");

        write_atomic(&file_path, b"{}").unwrap();

        assert_eq!(fs::read_to_string(&file_path).unwrap(), "{}");
        assert!(!temp_path(&file_path).exists());
    }

    #[test]
    fn test_write_atomic_overwrites_existing() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("session.json");
        fs::write(&file_path, b"old").unwrap();

        write_atomic(&file_path, b"new").unwrap();

        assert_eq!(fs::read_to_string(&file_path).unwrap(), "new");
    }

    #[test]
    fn test_write_atomic_failure_leaves_no_temp() {
        let temp_dir = TempDir::new().unwrap();
        // Renaming a file over a non-empty directory fails
        let target = temp_dir.path().join("occupied");
        fs::create_dir_all(target.join("child")).unwrap();

        assert!(write_atomic(&target, b"data").is_err());
        assert!(!temp_path(&target).exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_write_atomic_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("session.json");
        write_atomic(&file_path, b"{}").unwrap();

        let mode = fs::metadata(&file_path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
