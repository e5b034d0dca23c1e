//! Atomic file write helpers.
//!
//! Uses a temp file + rename pattern so a reader never observes a partially
//! written artifact. The destination directory is created on demand. On
//! Windows, rename-over-existing fails, so we fall back to backup-and-restore
//! when overwriting.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::fs::ensure_dir;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileSyncPolicy {
    SyncAll,
    SkipSync,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentDirSyncPolicy {
    SyncBestEffort,
    SkipSync,
}

#[derive(Debug, Clone, Copy)]
pub struct AtomicWriteOptions {
    /// File sync policy for the temp file before persisting.
    pub file_sync: FileSyncPolicy,
    /// Parent directory sync policy after the file has been persisted.
    pub parent_dir_sync: ParentDirSyncPolicy,
}

impl Default for AtomicWriteOptions {
    fn default() -> Self {
        Self {
            file_sync: FileSyncPolicy::SyncAll,
            parent_dir_sync: ParentDirSyncPolicy::SkipSync,
        }
    }
}

fn parent_of(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

pub fn atomic_write_with_options(
    path: impl AsRef<Path>,
    bytes: &[u8],
    options: AtomicWriteOptions,
) -> io::Result<()> {
    let path = path.as_ref();
    let parent = parent_of(path);
    ensure_dir(parent)?;

    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(bytes)?;
    if matches!(options.file_sync, FileSyncPolicy::SyncAll) {
        tmp.as_file().sync_all()?;
    }

    // Persist (rename) - handle Windows where rename fails if target exists.
    // Only a regular file is ever moved aside.
    if let Err(err) = tmp.persist(path) {
        if path.is_file() {
            let backup_path = path.with_extension("bak");
            let _ = fs::remove_file(&backup_path);
            fs::rename(path, &backup_path)?;

            if let Err(rename_err) = err.file.persist(path) {
                let _ = fs::rename(&backup_path, path);
                return Err(rename_err.error);
            }
            if let Err(e) = fs::remove_file(&backup_path) {
                tracing::warn!(
                    path = %backup_path.display(),
                    "Failed to remove .bak after atomic write: {e}"
                );
            }
        } else {
            return Err(err.error);
        }
    }

    if matches!(options.parent_dir_sync, ParentDirSyncPolicy::SyncBestEffort) {
        best_effort_sync_parent_dir(parent);
    }

    debug!(path = %path.display(), bytes = bytes.len(), "Wrote file");
    Ok(())
}

fn best_effort_sync_parent_dir(parent: &Path) {
    #[cfg(unix)]
    {
        if let Err(e) = fs::File::open(parent).and_then(|d| d.sync_all()) {
            debug!(path = %parent.display(), "Parent directory sync_all failed (best-effort): {e}");
        }
    }

    #[cfg(not(unix))]
    {
        debug!(path = %parent.display(), "Parent directory sync not supported on this platform");
    }
}
