//! Export of an indexed planning problem to the solver's on-disk format.
//!
//! This crate turns a [`ProblemIndex`](fsgen_types::ProblemIndex) into the
//! problem document, the static data and groundings files, the component
//! factory sources for externally implemented symbols, and an optional
//! debug explosion. [`generate`] runs the whole export.

#![allow(clippy::missing_errors_doc)]

pub mod codegen;
pub mod debug;
pub mod errors;
mod generate;
pub mod groundings;
pub mod layout;
mod load;
pub mod projector;
pub mod templates;
pub mod writer;

pub use codegen::{FactoryBinding, GeneratedComponents, generate_components};
pub use debug::DebugFailure;
pub use errors::{Artifact, ExportError};
pub use generate::{ExportReport, generate, generate_with};
pub use groundings::GroundingsOutcome;
pub use layout::OutputLayout;
pub use load::{IndexLoadError, load_index};
pub use projector::{generate_document, requires_compilation};
pub use templates::{Template, TemplateError, TemplateSet, TemplateSource};
pub use writer::ArtifactWriter;
