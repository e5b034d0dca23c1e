//! Individual stages driven with explicit collaborators.

use fsgen_core::{
    ArtifactWriter, OutputLayout, TemplateSet, generate_components, generate_document,
    generate_with, requires_compilation,
};
use fsgen_types::MarkerClassifier;
use serde_json::json;

use crate::common::{index_from, minimal_index_json, read, transport_index_json};

#[test]
fn compilation_follows_external_symbols() {
    let classifier = MarkerClassifier::default();
    assert!(!requires_compilation(
        &index_from(minimal_index_json()),
        &classifier
    ));
    assert!(requires_compilation(
        &index_from(transport_index_json()),
        &classifier
    ));
}

#[test]
fn a_fluent_external_symbol_still_requires_compilation() {
    let mut value = transport_index_json();
    value["static_symbols"] = json!(["road"]);
    let index = index_from(value);
    let classifier = MarkerClassifier::default();

    assert!(requires_compilation(&index, &classifier));

    let document = generate_document(&index, &classifier).unwrap();
    let components =
        generate_components(&document, &TemplateSet::builtin(), &classifier).unwrap();
    assert!(!components.header.contains("@distance"));
}

#[test]
fn custom_marker_changes_what_counts_as_external() {
    let mut value = transport_index_json();
    value["symbols"][2]["name"] = json!("#distance");
    value["static_symbols"] = json!(["road", "#distance"]);
    let index = index_from(value);

    let dir = tempfile::tempdir().expect("tempdir");
    let writer = ArtifactWriter::new(OutputLayout::new(dir.path()));
    let mut templates = TemplateSet::builtin();
    templates.insert("function_instantiation", "${name}:${accessor}");

    let report = generate_with(
        &index,
        &writer,
        false,
        &templates,
        &MarkerClassifier::new('#', Vec::<String>::new()),
    )
    .unwrap();

    assert!(report.components_generated);
    assert!(read(dir.path().join("components.hxx")).contains("#distance:distance"));
}

#[test]
fn generation_is_deterministic() {
    let first = tempfile::tempdir().expect("tempdir");
    let second = tempfile::tempdir().expect("tempdir");
    let index = index_from(transport_index_json());

    for dir in [&first, &second] {
        let writer = ArtifactWriter::new(OutputLayout::new(dir.path()));
        generate_with(
            &index,
            &writer,
            true,
            &TemplateSet::builtin(),
            &MarkerClassifier::default(),
        )
        .unwrap();
    }

    for file in [
        "data/problem.json",
        "data/road.data",
        "data/groundings.data",
        "components.hxx",
        "data/debug/symbols.txt",
    ] {
        assert_eq!(
            read(first.path().join(file)),
            read(second.path().join(file)),
            "{file} differs"
        );
    }
}
