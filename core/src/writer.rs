//! Persistence of the problem document and the static data files.
//!
//! Every artifact goes through [`ArtifactWriter`], which creates directories
//! on demand and writes atomically, so the solver never reads a half-written
//! file.

use std::path::{Path, PathBuf};

use tracing::debug;

use fsgen_types::{DataElement, IndexError, ObjectTable, ProblemDocument};
use fsgen_utils::{AtomicWriteOptions, atomic_write_with_options};

use crate::errors::{Artifact, ExportError};
use crate::layout::{GROUNDINGS_NAME, OutputLayout};

/// Lines rendered as a file body: each line followed by a newline.
#[must_use]
pub fn render_lines<S: AsRef<str>>(lines: &[S]) -> String {
    let mut out = String::new();
    for line in lines {
        out.push_str(line.as_ref());
        out.push('\n');
    }
    out
}

/// Encoded contents of one static data element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticPayload {
    pub name: String,
    pub lines: Vec<String>,
}

/// Encode every data element against the object table.
///
/// Runs before anything is written: an unresolvable value is an index
/// inconsistency and must abort the export. An element may not share its
/// file with `data/groundings.data`.
pub fn encode_static_data<'a>(
    elements: impl IntoIterator<Item = &'a dyn DataElement>,
    objects: &ObjectTable,
) -> Result<Vec<StaticPayload>, IndexError> {
    elements
        .into_iter()
        .map(|elem| {
            if elem.name() == GROUNDINGS_NAME {
                return Err(IndexError::ReservedName {
                    name: elem.name().to_string(),
                });
            }
            Ok(StaticPayload {
                name: elem.name().to_string(),
                lines: elem.serialize_data(objects)?,
            })
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct ArtifactWriter {
    layout: OutputLayout,
    options: AtomicWriteOptions,
}

impl ArtifactWriter {
    #[must_use]
    pub fn new(layout: OutputLayout) -> Self {
        Self {
            layout,
            options: AtomicWriteOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: AtomicWriteOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn layout(&self) -> &OutputLayout {
        &self.layout
    }

    pub fn write_file(
        &self,
        artifact: Artifact,
        path: &Path,
        contents: &[u8],
    ) -> Result<PathBuf, ExportError> {
        atomic_write_with_options(path, contents, self.options).map_err(|source| {
            ExportError::Write {
                artifact,
                path: path.to_path_buf(),
                source,
            }
        })?;
        Ok(path.to_path_buf())
    }

    pub fn write_lines<S: AsRef<str>>(
        &self,
        artifact: Artifact,
        path: &Path,
        lines: &[S],
    ) -> Result<PathBuf, ExportError> {
        self.write_file(artifact, path, render_lines(lines).as_bytes())
    }

    /// `data/problem.json`: the compact document on a single line.
    pub fn write_document(&self, document: &ProblemDocument) -> Result<PathBuf, ExportError> {
        let json = serde_json::to_string(document).map_err(|source| ExportError::Encode {
            artifact: Artifact::ProblemDocument,
            source,
        })?;
        let path = self.layout.problem_path();
        self.write_lines(Artifact::ProblemDocument, &path, &[json])?;
        debug!(
            path = %path.display(),
            variables = document.variables.len(),
            objects = document.objects.len(),
            "Wrote problem document"
        );
        Ok(path)
    }

    /// `data/<name>.data` for every static data element.
    pub fn write_static_data(
        &self,
        payloads: &[StaticPayload],
    ) -> Result<Vec<PathBuf>, ExportError> {
        payloads
            .iter()
            .map(|payload| {
                self.write_lines(
                    Artifact::StaticData(payload.name.clone()),
                    &self.layout.data_file(&payload.name),
                    &payload.lines,
                )
            })
            .collect()
    }
}
