//! Directory creation and stale-file removal.

use std::fs;
use std::io::{self, ErrorKind};
use std::path::Path;

use tracing::debug;

/// Create `dir` and all of its parents. Existing directories are fine.
pub fn ensure_dir(dir: impl AsRef<Path>) -> io::Result<()> {
    fs::create_dir_all(dir.as_ref())
}

/// Remove a file if it is present.
///
/// Returns `Ok(true)` when a file was removed and `Ok(false)` when there was
/// nothing to remove. Any other failure is surfaced.
pub fn remove_if_exists(path: impl AsRef<Path>) -> io::Result<bool> {
    let path = path.as_ref();
    match fs::remove_file(path) {
        Ok(()) => {
            debug!(path = %path.display(), "Removed stale file");
            Ok(true)
        }
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::{ensure_dir, remove_if_exists};

    #[test]
    fn remove_if_exists_tolerates_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let removed = remove_if_exists(dir.path().join("groundings.data")).expect("remove");
        assert!(!removed);
    }

    #[test]
    fn remove_if_exists_removes_present_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("groundings.data");
        fs::write(&path, "# 0 move\n").expect("seed");

        assert!(remove_if_exists(&path).expect("remove"));
        assert!(!path.exists());
    }

    #[test]
    fn remove_if_exists_surfaces_other_errors() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("groundings.data");
        fs::create_dir(&path).expect("dir in the way");

        assert!(remove_if_exists(&path).is_err());
    }

    #[test]
    fn ensure_dir_is_idempotent() {
        let dir = tempfile::tempdir().expect("tempdir");
        let nested = dir.path().join("data").join("debug");
        ensure_dir(&nested).expect("first");
        ensure_dir(&nested).expect("second");
        assert!(nested.is_dir());
    }
}
