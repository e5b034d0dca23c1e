//! The problem document: the JSON contract read by the native solver.
//!
//! Field order and array layouts here are the wire format. Rows that the
//! solver reads positionally (types, symbols, init atoms) serialize as JSON
//! arrays rather than objects.

use serde::ser::{SerializeSeq, SerializeTuple};
use serde::{Serialize, Serializer};
use serde_json::Value as JsonValue;

use crate::index::SymbolKind;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProblemDocument {
    pub variables: Vec<VariableEntry>,
    pub objects: Vec<ObjectEntry>,
    pub types: Vec<TypeEntry>,
    pub action_schemata: Vec<JsonValue>,
    pub state_constraints: JsonValue,
    pub goal: JsonValue,
    pub axioms: Vec<JsonValue>,
    pub init: InitEntry,
    pub symbols: Vec<SymbolEntry>,
    pub problem: ProblemInfo,
}

impl ProblemDocument {
    /// The top-level sections as `(key, value)` pairs, in wire order.
    pub fn sections(&self) -> serde_json::Result<Vec<(&'static str, JsonValue)>> {
        Ok(vec![
            ("variables", serde_json::to_value(&self.variables)?),
            ("objects", serde_json::to_value(&self.objects)?),
            ("types", serde_json::to_value(&self.types)?),
            ("action_schemata", serde_json::to_value(&self.action_schemata)?),
            ("state_constraints", self.state_constraints.clone()),
            ("goal", self.goal.clone()),
            ("axioms", serde_json::to_value(&self.axioms)?),
            ("init", serde_json::to_value(&self.init)?),
            ("symbols", serde_json::to_value(&self.symbols)?),
            ("problem", serde_json::to_value(&self.problem)?),
        ])
    }

    /// Names of the action schemata, in document order.
    pub fn schema_names(&self) -> impl Iterator<Item = Option<&str>> {
        self.action_schemata.iter().map(record_name)
    }
}

/// The `name` field of a dumped schema or axiom record.
#[must_use]
pub fn record_name(record: &JsonValue) -> Option<&str> {
    record.get("name").and_then(JsonValue::as_str)
}

/// `{id, name, type, data: [symbol-id, [args...]]}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariableEntry {
    pub id: usize,
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub data: (usize, Vec<i64>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObjectEntry {
    pub id: usize,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDomain {
    /// Bounded integer type, both ends inclusive.
    Int { min: i64, max: i64 },
    /// Object indices, rendered as decimal strings on the wire.
    Objects(Vec<usize>),
}

/// `[id, name, "int", [min, max]]` or `[id, name, ["<idx>", ...]]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeEntry {
    pub id: usize,
    pub name: String,
    pub domain: TypeDomain,
}

impl Serialize for TypeEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.domain {
            TypeDomain::Int { min, max } => {
                let mut row = serializer.serialize_tuple(4)?;
                row.serialize_element(&self.id)?;
                row.serialize_element(&self.name)?;
                row.serialize_element("int")?;
                row.serialize_element(&[*min, *max])?;
                row.end()
            }
            TypeDomain::Objects(indices) => {
                let indices: Vec<String> = indices.iter().map(ToString::to_string).collect();
                let mut row = serializer.serialize_tuple(3)?;
                row.serialize_element(&self.id)?;
                row.serialize_element(&self.name)?;
                row.serialize_element(&indices)?;
                row.end()
            }
        }
    }
}

/// `{variables: <count>, atoms: [[variable-id, value-index], ...]}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InitEntry {
    pub variables: usize,
    pub atoms: Vec<(usize, i64)>,
}

/// `[id, name, kind, domain, codomain, [[var-id, var-name], ...], static, unbounded]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolEntry {
    pub id: usize,
    pub name: String,
    pub kind: SymbolKind,
    pub domain: Vec<String>,
    pub codomain: String,
    pub variables: Vec<(usize, String)>,
    pub is_static: bool,
    pub unbounded_arity: bool,
}

impl Serialize for SymbolEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut row = serializer.serialize_seq(Some(8))?;
        row.serialize_element(&self.id)?;
        row.serialize_element(&self.name)?;
        row.serialize_element(&self.kind)?;
        row.serialize_element(&self.domain)?;
        row.serialize_element(&self.codomain)?;
        row.serialize_element(&self.variables)?;
        row.serialize_element(&self.is_static)?;
        row.serialize_element(&self.unbounded_arity)?;
        row.end()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProblemInfo {
    pub domain: String,
    pub instance: String,
}
