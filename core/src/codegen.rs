//! Component factory glue for externally implemented symbols.

use std::path::PathBuf;

use tracing::debug;

use fsgen_types::{ProblemDocument, SymbolClassifier};

use crate::errors::{Artifact, ExportError};
use crate::templates::{
    COMPONENTS_HEADER_TEMPLATE, COMPONENTS_SOURCE_TEMPLATE, FACTORIES_TEMPLATE,
    FUNCTION_INSTANTIATION_TEMPLATE, TemplateError, TemplateSource,
};
use crate::writer::ArtifactWriter;

/// Joins instantiation fragments inside the generated initializer list.
pub const FUNCTION_SEPARATOR: &str = ",\n\t\t\t";

/// Binds a symbol's display name to the accessor on the external object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactoryBinding {
    pub function_name: String,
    pub accessor: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedComponents {
    pub header: String,
    pub source: String,
}

/// Static, externally implemented symbols in symbol-table order.
#[must_use]
pub fn factory_bindings(
    document: &ProblemDocument,
    classifier: &dyn SymbolClassifier,
) -> Vec<FactoryBinding> {
    document
        .symbols
        .iter()
        .filter(|symbol| symbol.is_static && classifier.is_external(&symbol.name))
        .map(|symbol| FactoryBinding {
            function_name: symbol.name.clone(),
            accessor: classifier.accessor(&symbol.name),
        })
        .collect()
}

pub fn render_factories(
    bindings: &[FactoryBinding],
    templates: &dyn TemplateSource,
) -> Result<String, TemplateError> {
    let functions = bindings
        .iter()
        .map(|binding| {
            templates.render(FUNCTION_INSTANTIATION_TEMPLATE, &[
                ("name", binding.function_name.as_str()),
                ("accessor", binding.accessor.as_str()),
            ])
        })
        .collect::<Result<Vec<_>, _>>()?
        .join(FUNCTION_SEPARATOR);

    templates.render(FACTORIES_TEMPLATE, &[("functions", functions.as_str())])
}

pub fn generate_components(
    document: &ProblemDocument,
    templates: &dyn TemplateSource,
    classifier: &dyn SymbolClassifier,
) -> Result<GeneratedComponents, TemplateError> {
    let bindings = factory_bindings(document, classifier);
    let method_factories = render_factories(&bindings, templates)?;

    let header = templates.render(COMPONENTS_HEADER_TEMPLATE, &[(
        "method_factories",
        method_factories.as_str(),
    )])?;
    let source = templates.render(COMPONENTS_SOURCE_TEMPLATE, &[])?;

    debug!(functions = bindings.len(), "Rendered component factories");
    Ok(GeneratedComponents { header, source })
}

/// Write `components.hxx` and `components.cxx` at the output root.
pub fn write_components(
    components: &GeneratedComponents,
    writer: &ArtifactWriter,
) -> Result<Vec<PathBuf>, ExportError> {
    let layout = writer.layout();
    Ok(vec![
        writer.write_file(
            Artifact::ComponentsHeader,
            &layout.components_header(),
            components.header.as_bytes(),
        )?,
        writer.write_file(
            Artifact::ComponentsSource,
            &layout.components_source(),
            components.source.as_bytes(),
        )?,
    ])
}
