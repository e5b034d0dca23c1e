//! File layout under the output root.
//!
//! ```text
//! <root>/components.hxx
//! <root>/components.cxx
//! <root>/data/problem.json
//! <root>/data/groundings.data
//! <root>/data/<element>.data
//! <root>/data/debug/...
//! ```

use std::path::{Path, PathBuf};

pub const DATA_DIR: &str = "data";
pub const DEBUG_DIR: &str = "debug";
pub const PROBLEM_FILE: &str = "problem.json";
pub const GROUNDINGS_NAME: &str = "groundings";
pub const DATA_EXTENSION: &str = "data";
pub const COMPONENTS_HEADER_FILE: &str = "components.hxx";
pub const COMPONENTS_SOURCE_FILE: &str = "components.cxx";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    root: PathBuf,
}

impl OutputLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.root.join(DATA_DIR)
    }

    #[must_use]
    pub fn debug_dir(&self) -> PathBuf {
        self.data_dir().join(DEBUG_DIR)
    }

    #[must_use]
    pub fn problem_path(&self) -> PathBuf {
        self.data_dir().join(PROBLEM_FILE)
    }

    /// `data/<name>.data`
    #[must_use]
    pub fn data_file(&self, name: &str) -> PathBuf {
        self.data_dir().join(format!("{name}.{DATA_EXTENSION}"))
    }

    #[must_use]
    pub fn groundings_path(&self) -> PathBuf {
        self.data_file(GROUNDINGS_NAME)
    }

    /// `data/debug/<name>.<ext>`
    #[must_use]
    pub fn debug_file(&self, name: &str, ext: &str) -> PathBuf {
        self.debug_dir().join(format!("{name}.{ext}"))
    }

    #[must_use]
    pub fn components_header(&self) -> PathBuf {
        self.root.join(COMPONENTS_HEADER_FILE)
    }

    #[must_use]
    pub fn components_source(&self) -> PathBuf {
        self.root.join(COMPONENTS_SOURCE_FILE)
    }
}
