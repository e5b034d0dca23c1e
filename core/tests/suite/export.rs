//! End-to-end exports through `generate`.

use std::fs;

use fsgen_config::ExportConfig;
use fsgen_core::{ExportError, GroundingsOutcome, generate, load_index};
use fsgen_types::IndexError;
use serde_json::json;

use crate::common::{index_from, minimal_index_json, read, read_json, transport_index_json};

#[test]
fn minimal_problem_writes_only_the_document() {
    let dir = tempfile::tempdir().expect("tempdir");
    let index = index_from(minimal_index_json());

    let report = generate(&index, &ExportConfig::new(dir.path())).unwrap();

    let problem_path = dir.path().join("data").join("problem.json");
    assert_eq!(report.written, vec![problem_path.clone()]);
    assert_eq!(report.groundings, GroundingsOutcome::Absent {
        removed_stale: false
    });
    assert!(!report.components_generated);
    assert!(report.debug_failures.is_empty());

    let raw = read(&problem_path);
    assert!(raw.ends_with('\n'));
    assert_eq!(raw.trim_end().lines().count(), 1);

    let doc = read_json(&problem_path);
    assert_eq!(
        doc["objects"],
        json!([
            {"id": 0, "name": "a"},
            {"id": 1, "name": "b"},
            {"id": 2, "name": "_false_"},
            {"id": 3, "name": "_true_"},
        ])
    );
    assert_eq!(doc["init"], json!({"variables": 1, "atoms": [[0, 3]]}));
    assert_eq!(
        doc["variables"],
        json!([{"id": 0, "name": "p()", "type": "bool", "data": [0, []]}])
    );
    assert_eq!(
        doc["symbols"],
        json!([[0, "p", "predicate", [], "bool", [[0, "p()"]], false, false]])
    );
    assert_eq!(doc["problem"], json!({"domain": "toy", "instance": "p01"}));

    assert!(!dir.path().join("components.hxx").exists());
    assert!(!dir.path().join("data").join("groundings.data").exists());
    assert!(!dir.path().join("data").join("debug").exists());
}

#[test]
fn document_sections_follow_wire_order() {
    let dir = tempfile::tempdir().expect("tempdir");
    generate(
        &index_from(minimal_index_json()),
        &ExportConfig::new(dir.path()),
    )
    .unwrap();

    let raw = read(dir.path().join("data").join("problem.json"));
    let positions: Vec<usize> = [
        "\"variables\"",
        "\"objects\"",
        "\"types\"",
        "\"action_schemata\"",
        "\"state_constraints\"",
        "\"goal\"",
        "\"axioms\"",
        "\"init\"",
        "\"symbols\"",
        "\"problem\"",
    ]
    .iter()
    .map(|key| raw.find(key).unwrap_or_else(|| panic!("missing {key}")))
    .collect();
    let mut sorted = positions.clone();
    sorted.sort_unstable();
    assert_eq!(positions, sorted);
}

#[test]
fn full_problem_writes_every_artifact() {
    let dir = tempfile::tempdir().expect("tempdir");
    let index = index_from(transport_index_json());

    let report = generate(&index, &ExportConfig::new(dir.path())).unwrap();

    let data = dir.path().join("data");
    assert_eq!(report.written, vec![
        data.join("problem.json"),
        data.join("road.data"),
        data.join("groundings.data"),
        dir.path().join("components.hxx"),
        dir.path().join("components.cxx"),
    ]);
    assert!(report.components_generated);

    let doc = read_json(data.join("problem.json"));
    assert_eq!(
        doc["types"],
        json!([
            [0, "truck", ["2"]],
            [1, "location", ["3", "4"]],
            [2, "fuel", "int", [0, 3]],
        ])
    );
    assert_eq!(doc["init"], json!({"variables": 1, "atoms": [[0, 3]]}));
    assert_eq!(doc["symbols"][1][6], json!(true));
    assert_eq!(doc["symbols"][0][6], json!(false));

    assert_eq!(read(data.join("road.data")), "3,4\n4,3\n");
    assert_eq!(
        read(data.join("groundings.data")),
        "# 0 drive\n2,3,4\n2,4,3\n# 1 wait\n"
    );

    let header = read(dir.path().join("components.hxx"));
    assert!(header.contains("external.distance(args)"));
    assert!(header.contains("\"@distance\""));
}

#[test]
fn rerun_without_groundings_removes_the_stale_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = ExportConfig::new(dir.path());
    let groundings = dir.path().join("data").join("groundings.data");

    generate(&index_from(transport_index_json()), &config).unwrap();
    assert!(groundings.exists());

    let mut without = transport_index_json();
    without.as_object_mut().unwrap().remove("groundings");
    let report = generate(&index_from(without), &config).unwrap();

    assert_eq!(report.groundings, GroundingsOutcome::Absent {
        removed_stale: true
    });
    assert!(!groundings.exists());
}

#[test]
fn index_inconsistency_aborts_before_any_write() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut value = transport_index_json();
    value["groundings"]["drive"] = json!([["t1", "l1", "ghost"]]);

    let err = generate(&index_from(value), &ExportConfig::new(dir.path())).unwrap_err();

    assert!(matches!(
        err,
        ExportError::Index(IndexError::UnknownObject { ref value }) if value == "ghost"
    ));
    assert!(!dir.path().join("data").exists());
    assert!(!dir.path().join("components.hxx").exists());
}

#[test]
fn unresolvable_static_data_aborts_before_any_write() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut value = transport_index_json();
    value["initial_static_data"] = json!([
        {"kind": "set", "name": "road", "entries": [["l1", "nowhere"]]},
    ]);

    let err = generate(&index_from(value), &ExportConfig::new(dir.path())).unwrap_err();
    assert!(matches!(err, ExportError::Index(_)));
    assert!(!dir.path().join("data").join("problem.json").exists());
}

#[test]
fn static_element_cannot_take_the_groundings_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut value = transport_index_json();
    value["initial_static_data"][0]["name"] = json!("groundings");
    value.as_object_mut().unwrap().remove("groundings");

    let err = generate(&index_from(value), &ExportConfig::new(dir.path())).unwrap_err();

    assert!(matches!(
        err,
        ExportError::Index(IndexError::ReservedName { ref name }) if name == "groundings"
    ));
    assert!(!dir.path().join("data").exists());
}

#[test]
fn template_overrides_replace_builtin_fragments() {
    let dir = tempfile::tempdir().expect("tempdir");
    let templates = dir.path().join("templates");
    fs::create_dir_all(&templates).unwrap();
    fs::write(
        templates.join("function_instantiation.tpl"),
        "bind(\"${name}\", &External::${accessor})",
    )
    .unwrap();

    let out = dir.path().join("out");
    let mut config = ExportConfig::new(&out);
    config.templates_dir = Some(templates);
    generate(&index_from(transport_index_json()), &config).unwrap();

    let header = read(out.join("components.hxx"));
    assert!(header.contains("bind(\"@distance\", &External::distance)"));
    assert!(header.contains("class ComponentFactory"));
}

#[test]
fn debug_mode_explodes_the_document() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = ExportConfig::new(dir.path()).with_debug(true);

    let report = generate(&index_from(transport_index_json()), &config).unwrap();
    assert!(report.debug_failures.is_empty());

    let debug = dir.path().join("data").join("debug");
    assert_eq!(read(debug.join("schemas.txt")), "drive\nwait\n");
    assert_eq!(
        read(debug.join("axioms.txt")),
        "(:derived (connected ?x ?y) (road ?x ?y))\n\n\n"
    );
    assert_eq!(
        read(debug.join("types.txt")),
        "0: truck. Objects: [2]\n1: location. Objects: [3, 4]\n2: fuel. Objects: int[0..3]\n"
    );
    assert_eq!(read(debug.join("init.txt")), "Variable 0 has value \"3\"\n");
    assert!(debug.join("action.drive.json").exists());
    assert!(debug.join("axiom.connected.json").exists());
    assert_eq!(
        read_json(debug.join("debug.problem.json")),
        read_json(dir.path().join("data").join("problem.json"))
    );
}

#[test]
fn debug_failures_are_reported_not_fatal() {
    let dir = tempfile::tempdir().expect("tempdir");
    let debug = dir.path().join("data").join("debug");
    // A directory where a debug file should go.
    fs::create_dir_all(debug.join("types.txt")).unwrap();

    let config = ExportConfig::new(dir.path()).with_debug(true);
    let report = generate(&index_from(transport_index_json()), &config).unwrap();

    assert_eq!(report.debug_failures.len(), 1);
    assert_eq!(report.debug_failures[0].file, "types.txt");
    assert!(debug.join("init.txt").exists());
    assert!(dir.path().join("data").join("problem.json").exists());
}

#[test]
fn index_loads_from_disk() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("index.json");
    fs::write(&path, transport_index_json().to_string()).unwrap();

    let index = load_index(&path).unwrap();
    assert_eq!(index.domain_name, "transport");
    assert_eq!(index.objects.len(), 5);
}
