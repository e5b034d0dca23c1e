//! The export entry point.
//!
//! Order of work:
//! 1. project the index onto the problem document and encode every static
//!    data element and grounding (any index inconsistency aborts here, before
//!    a single byte is written);
//! 2. write `data/problem.json`, then the static data files;
//! 3. write or clear `data/groundings.data`;
//! 4. generate the component sources when some symbol is external;
//! 5. when enabled, explode the document under `data/debug/`.

use std::path::PathBuf;

use tracing::info;

use fsgen_config::ExportConfig;
use fsgen_types::{ProblemIndex, Schema, SymbolClassifier};

use crate::codegen::{generate_components, write_components};
use crate::debug::{DebugFailure, write_debug};
use crate::errors::ExportError;
use crate::groundings::{GroundingsOutcome, emit_encoded_groundings, encode_groundings};
use crate::layout::OutputLayout;
use crate::projector::{generate_document, requires_compilation};
use crate::templates::{TemplateSet, TemplateSource};
use crate::writer::{ArtifactWriter, encode_static_data};

/// What an export produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub output_root: PathBuf,
    /// Consumer-facing files, in write order. Debug files are not listed.
    pub written: Vec<PathBuf>,
    pub groundings: GroundingsOutcome,
    pub components_generated: bool,
    /// Debug files that could not be produced.
    pub debug_failures: Vec<DebugFailure>,
}

/// Export `index` as configured.
pub fn generate(index: &ProblemIndex, config: &ExportConfig) -> Result<ExportReport, ExportError> {
    let mut templates = TemplateSet::builtin();
    if let Some(dir) = &config.templates_dir {
        templates = templates.with_overrides_dir(dir);
    }
    let writer = ArtifactWriter::new(OutputLayout::new(&config.output_root));
    generate_with(
        index,
        &writer,
        config.debug,
        &templates,
        &config.classifier(),
    )
}

/// Export with explicit collaborators.
pub fn generate_with(
    index: &ProblemIndex,
    writer: &ArtifactWriter,
    debug: bool,
    templates: &dyn TemplateSource,
    classifier: &dyn SymbolClassifier,
) -> Result<ExportReport, ExportError> {
    let document = generate_document(index, classifier)?;
    let static_data = encode_static_data(index.data_elements(), &index.objects)?;
    let groundings = index
        .groundings
        .as_ref()
        .map(|table| encode_groundings(&document.action_schemata, table, &index.objects))
        .transpose()?;

    let mut written = vec![writer.write_document(&document)?];
    written.extend(writer.write_static_data(&static_data)?);

    let groundings = emit_encoded_groundings(groundings.as_deref(), writer)?;
    if let GroundingsOutcome::Written { path, .. } = &groundings {
        written.push(path.clone());
    }

    let components_generated = requires_compilation(index, classifier);
    if components_generated {
        let components = generate_components(&document, templates, classifier)?;
        written.extend(write_components(&components, writer)?);
    }

    let debug_failures = if debug {
        let axiom_texts: Vec<&str> = index.axioms.iter().map(Schema::describe).collect();
        let (debug_written, failures) = write_debug(&document, &axiom_texts, writer);
        tracing::debug!(files = debug_written.len(), "Wrote debug views");
        failures
    } else {
        Vec::new()
    };

    info!(
        output_root = %writer.layout().root().display(),
        files = written.len(),
        components = components_generated,
        debug_failures = debug_failures.len(),
        "Export complete"
    );

    Ok(ExportReport {
        output_root: writer.layout().root().to_path_buf(),
        written,
        groundings,
        components_generated,
        debug_failures,
    })
}
