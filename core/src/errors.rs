//! Export errors.
//!
//! Index inconsistencies abort the run before anything is written. Filesystem
//! failures name the artifact that could not be written; artifacts completed
//! earlier in the run are left in place.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use fsgen_types::IndexError;

use crate::templates::TemplateError;

/// A consumer-facing file produced by an export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Artifact {
    ProblemDocument,
    StaticData(String),
    Groundings,
    ComponentsHeader,
    ComponentsSource,
    Debug(String),
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ProblemDocument => f.write_str("problem document"),
            Self::StaticData(name) => write!(f, "static data `{name}`"),
            Self::Groundings => f.write_str("groundings file"),
            Self::ComponentsHeader => f.write_str("components header"),
            Self::ComponentsSource => f.write_str("components source"),
            Self::Debug(name) => write!(f, "debug view `{name}`"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("inconsistent problem index: {0}")]
    Index(#[from] IndexError),
    #[error("component generation failed: {0}")]
    Template(#[from] TemplateError),
    #[error("failed to encode {artifact}: {source}")]
    Encode {
        artifact: Artifact,
        source: serde_json::Error,
    },
    #[error("failed to write {artifact} at {}: {source}", path.display())]
    Write {
        artifact: Artifact,
        path: PathBuf,
        source: io::Error,
    },
    #[error("failed to remove stale {artifact} at {}: {source}", path.display())]
    Cleanup {
        artifact: Artifact,
        path: PathBuf,
        source: io::Error,
    },
}

impl ExportError {
    /// The artifact that failed, for filesystem and encoding errors.
    #[must_use]
    pub fn artifact(&self) -> Option<&Artifact> {
        match self {
            Self::Encode { artifact, .. }
            | Self::Write { artifact, .. }
            | Self::Cleanup { artifact, .. } => Some(artifact),
            Self::Index(_) | Self::Template(_) => None,
        }
    }
}
