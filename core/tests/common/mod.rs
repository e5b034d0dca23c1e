//! Shared index fixtures.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use fsgen_types::ProblemIndex;
use serde_json::{Value, json};

/// Objects `a`, `b`, one nullary boolean variable `p()` initially true, no
/// external symbols and no groundings.
pub fn minimal_index_json() -> Value {
    json!({
        "domain_name": "toy",
        "instance_name": "p01",
        "objects": ["a", "b", "_false_", "_true_"],
        "symbols": [
            {"name": "p", "kind": "predicate", "arguments": [], "codomain": "bool"},
        ],
        "state_variables": [{"symbol": "p", "args": []}],
        "initial_fluent_atoms": [
            {"variable": {"symbol": "p", "args": []}, "value": true},
        ],
        "goal": {"type": "atom", "symbol": "p"},
    })
}

/// A small transport problem with static data, groundings and an
/// externally implemented distance function.
pub fn transport_index_json() -> Value {
    json!({
        "domain_name": "transport",
        "instance_name": "p02",
        "objects": ["_false_", "_true_", "t1", "l1", "l2"],
        "types": [
            {"id": 0, "name": "truck", "values": ["t1"]},
            {"id": 1, "name": "location", "values": ["l1", "l2"]},
            {"id": 2, "name": "fuel", "values": [0, 1, 2, 3]},
        ],
        "symbols": [
            {"name": "at", "kind": "function", "arguments": ["truck"], "codomain": "location"},
            {"name": "road", "kind": "predicate", "arguments": ["location", "location"], "codomain": "bool"},
            {"name": "@distance", "kind": "function", "arguments": ["location", "location"], "codomain": "int"},
        ],
        "static_symbols": ["road", "@distance"],
        "state_variables": [{"symbol": "at", "args": ["t1"]}],
        "initial_fluent_atoms": [
            {"variable": {"symbol": "at", "args": ["t1"]}, "value": "l1"},
        ],
        "initial_static_data": [
            {"kind": "set", "name": "road", "entries": [["l1", "l2"], ["l2", "l1"]]},
        ],
        "action_schemas": [
            {"name": "drive", "parameters": ["?t", "?from", "?to"]},
            {"name": "wait", "parameters": []},
        ],
        "axioms": [
            {"name": "connected", "source": "(:derived (connected ?x ?y) (road ?x ?y))"},
        ],
        "groundings": {
            "drive": [["t1", "l2", "l1"], ["t1", "l1", "l2"]],
        },
        "goal": {"type": "atom", "symbol": "at"},
    })
}

pub fn index_from(value: Value) -> ProblemIndex {
    ProblemIndex::from_json_value(value).expect("valid index fixture")
}

pub fn read(path: impl AsRef<Path>) -> String {
    let path = path.as_ref();
    fs::read_to_string(path).unwrap_or_else(|err| panic!("read {}: {err}", path.display()))
}

pub fn read_json(path: impl AsRef<Path>) -> Value {
    serde_json::from_str(&read(path)).expect("valid json")
}
