//! Precomputed action groundings.
//!
//! `data/groundings.data` holds one block per action schema, in document
//! order: a `# <position> <name>` comment line followed by one line per
//! grounding, each a comma-joined tuple of object indices. Within a block the
//! tuples are in ascending lexicographic order; the solver does not re-sort.

use std::path::PathBuf;

use serde_json::Value as JsonValue;
use tracing::debug;

use fsgen_types::{Groundings, IndexError, ObjectTable, record_name};
use fsgen_utils::remove_if_exists;

use crate::errors::{Artifact, ExportError};
use crate::writer::ArtifactWriter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroundingsOutcome {
    Written { path: PathBuf, groundings: usize },
    /// No groundings were supplied; `removed_stale` tells whether a file
    /// from an earlier run had to be deleted.
    Absent { removed_stale: bool },
}

/// Resolve and order the groundings of each schema into file lines.
pub fn encode_groundings(
    schemata: &[JsonValue],
    groundings: &Groundings,
    objects: &ObjectTable,
) -> Result<Vec<String>, IndexError> {
    let mut lines = Vec::new();

    for (position, schema) in schemata.iter().enumerate() {
        let name = record_name(schema).ok_or_else(|| {
            IndexError::Malformed(format!("action schema {position} has no name"))
        })?;
        lines.push(format!("# {position} {name}"));

        let Some(tuples) = groundings.get(name) else {
            debug!(schema = name, "No groundings recorded for schema");
            continue;
        };

        let mut resolved = tuples
            .iter()
            .map(|tuple| {
                tuple
                    .iter()
                    .map(|obj| objects.object_index(obj))
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        resolved.sort_unstable();

        lines.extend(resolved.iter().map(|tuple| {
            tuple
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(",")
        }));
    }

    Ok(lines)
}

/// Write `data/groundings.data` from already encoded lines, or remove a stale
/// file when there are none.
pub fn emit_encoded_groundings(
    lines: Option<&[String]>,
    writer: &ArtifactWriter,
) -> Result<GroundingsOutcome, ExportError> {
    let path = writer.layout().groundings_path();

    let Some(lines) = lines else {
        let removed_stale = remove_if_exists(&path).map_err(|source| ExportError::Cleanup {
            artifact: Artifact::Groundings,
            path: path.clone(),
            source,
        })?;
        return Ok(GroundingsOutcome::Absent { removed_stale });
    };

    writer.write_lines(Artifact::Groundings, &path, lines)?;
    let groundings = lines.iter().filter(|line| !line.starts_with('#')).count();
    debug!(path = %path.display(), groundings, "Wrote groundings");
    Ok(GroundingsOutcome::Written { path, groundings })
}

pub fn emit_groundings(
    schemata: &[JsonValue],
    groundings: Option<&Groundings>,
    objects: &ObjectTable,
    writer: &ArtifactWriter,
) -> Result<GroundingsOutcome, ExportError> {
    let lines = groundings
        .map(|groundings| encode_groundings(schemata, groundings, objects))
        .transpose()?;
    emit_encoded_groundings(lines.as_deref(), writer)
}
