//! Reading a serialized problem index from disk.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use fsgen_types::{IndexError, ProblemIndex};

#[derive(Debug, Error)]
pub enum IndexLoadError {
    #[error("failed to read problem index {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("invalid problem index {}: {source}", path.display())]
    Parse { path: PathBuf, source: IndexError },
}

/// Load a problem index serialized as JSON.
pub fn load_index(path: impl AsRef<Path>) -> Result<ProblemIndex, IndexLoadError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| IndexLoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let index = ProblemIndex::from_json_str(&raw).map_err(|source| IndexLoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(
        path = %path.display(),
        objects = index.objects.len(),
        variables = index.state_variables.len(),
        "Loaded problem index"
    );
    Ok(index)
}
