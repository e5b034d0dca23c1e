//! Human-readable explosion of the problem document under `data/debug/`.
//!
//! Runs after every consumer-facing artifact is in place and only reads the
//! already built document. Failures are collected and reported; they never
//! abort the export.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use tracing::warn;

use fsgen_types::{ProblemDocument, TypeDomain, record_name};

use crate::errors::{Artifact, ExportError};
use crate::writer::{ArtifactWriter, render_lines};

/// A debug file that could not be produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugFailure {
    pub file: String,
    pub reason: String,
}

impl fmt::Display for DebugFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.file, self.reason)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugFile {
    /// File stem under `data/debug/`.
    pub name: String,
    pub ext: &'static str,
    pub contents: String,
}

impl DebugFile {
    fn json(name: impl Into<String>, value: &impl Serialize) -> Result<Self, DebugFailure> {
        let name = name.into();
        match serde_json::to_string_pretty(value) {
            Ok(json) => Ok(Self {
                contents: render_lines(&[json]),
                name,
                ext: "json",
            }),
            Err(err) => Err(DebugFailure {
                file: format!("{name}.json"),
                reason: err.to_string(),
            }),
        }
    }

    fn text(name: &str, lines: &[String]) -> Self {
        Self {
            name: name.to_string(),
            ext: "txt",
            contents: render_lines(lines),
        }
    }
}

#[must_use]
pub fn schemas_view(document: &ProblemDocument) -> Vec<String> {
    document
        .schema_names()
        .map(|name| name.unwrap_or_default().to_string())
        .collect()
}

/// Each axiom's source text followed by a blank line.
#[must_use]
pub fn axioms_view(axiom_texts: &[&str]) -> Vec<String> {
    axiom_texts.iter().map(|text| format!("{text}\n\n")).collect()
}

#[must_use]
pub fn types_view(document: &ProblemDocument) -> Vec<String> {
    document
        .types
        .iter()
        .map(|t| {
            let objects = match &t.domain {
                TypeDomain::Int { min, max } => format!("int[{min}..{max}]"),
                TypeDomain::Objects(indices) => {
                    let joined: Vec<String> = indices.iter().map(ToString::to_string).collect();
                    format!("[{}]", joined.join(", "))
                }
            };
            format!("{}: {}. Objects: {}", t.id, t.name, objects)
        })
        .collect()
}

#[must_use]
pub fn variables_view(document: &ProblemDocument) -> Vec<String> {
    document
        .variables
        .iter()
        .map(|v| format!("{}: \"{}\" ({})", v.id, v.name, v.type_name))
        .collect()
}

#[must_use]
pub fn symbols_view(document: &ProblemDocument) -> Vec<String> {
    document
        .symbols
        .iter()
        .map(|s| {
            format!(
                "{}: \"{}\" ({}). Signature: ({})",
                s.id,
                s.name,
                s.kind.as_str(),
                s.domain.join(", ")
            )
        })
        .collect()
}

#[must_use]
pub fn objects_view(document: &ProblemDocument) -> Vec<String> {
    document
        .objects
        .iter()
        .map(|o| format!("{}: \"{}\"", o.id, o.name))
        .collect()
}

#[must_use]
pub fn init_view(document: &ProblemDocument) -> Vec<String> {
    document
        .init
        .atoms
        .iter()
        .map(|(var, value)| format!("Variable {var} has value \"{value}\""))
        .collect()
}

/// Build every debug file. Files that fail to render are returned as failures
/// alongside the ones that succeeded.
#[must_use]
pub fn debug_files(
    document: &ProblemDocument,
    axiom_texts: &[&str],
) -> (Vec<DebugFile>, Vec<DebugFailure>) {
    let mut files = Vec::new();
    let mut failures = Vec::new();
    let mut push = |result: Result<DebugFile, DebugFailure>| match result {
        Ok(file) => files.push(file),
        Err(failure) => failures.push(failure),
    };

    push(DebugFile::json("debug.problem", document));

    match document.sections() {
        Ok(sections) => {
            for (key, value) in &sections {
                push(DebugFile::json(*key, value));
            }
        }
        Err(err) => push(Err(DebugFailure {
            file: "<sections>".to_string(),
            reason: err.to_string(),
        })),
    }

    for (kind, records) in [
        ("action", &document.action_schemata),
        ("axiom", &document.axioms),
    ] {
        for (position, record) in records.iter().enumerate() {
            match record_name(record) {
                Some(name) => push(DebugFile::json(format!("{kind}.{name}"), record)),
                None => push(Err(DebugFailure {
                    file: format!("{kind} #{position}"),
                    reason: "record has no name".to_string(),
                })),
            }
        }
    }

    push(Ok(DebugFile::text("schemas", &schemas_view(document))));
    push(Ok(DebugFile::text("axioms", &axioms_view(axiom_texts))));
    push(Ok(DebugFile::text("types", &types_view(document))));
    push(Ok(DebugFile::text("variables", &variables_view(document))));
    push(Ok(DebugFile::text("symbols", &symbols_view(document))));
    push(Ok(DebugFile::text("objects", &objects_view(document))));
    push(Ok(DebugFile::text("init", &init_view(document))));

    (files, failures)
}

/// Write the debug explosion. Returns the written paths and every failure.
pub fn write_debug(
    document: &ProblemDocument,
    axiom_texts: &[&str],
    writer: &ArtifactWriter,
) -> (Vec<PathBuf>, Vec<DebugFailure>) {
    let (files, mut failures) = debug_files(document, axiom_texts);
    let mut written = Vec::with_capacity(files.len());

    for file in files {
        let path = writer.layout().debug_file(&file.name, file.ext);
        let artifact = Artifact::Debug(format!("{}.{}", file.name, file.ext));
        match writer.write_file(artifact, &path, file.contents.as_bytes()) {
            Ok(path) => written.push(path),
            Err(err) => failures.push(DebugFailure {
                file: format!("{}.{}", file.name, file.ext),
                reason: match err {
                    ExportError::Write { source, .. } => source.to_string(),
                    other => other.to_string(),
                },
            }),
        }
    }

    for failure in &failures {
        warn!(file = %failure.file, reason = %failure.reason, "Debug output failed");
    }

    (written, failures)
}
