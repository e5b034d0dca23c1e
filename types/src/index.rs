//! Read-only model of a fully indexed planning problem.
//!
//! The index is built elsewhere (parsing, type inference, grounding) and handed
//! to the exporter as a finished value. Every enumerable collection exposes its
//! canonical 0-based ordering explicitly; nothing here derives order from the
//! iteration order of an unordered container.

use std::borrow::Borrow;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Serialize, de};
use serde_json::{Map, Value as JsonValue};
use thiserror::Error;

use crate::static_data::{DataElement, StaticExtension};
use crate::value::{Value, bool_token};

/// The index is internally inconsistent: something it references cannot be
/// resolved to a position in one of its own tables.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndexError {
    #[error("value `{value}` is not in the object table")]
    UnknownObject { value: String },
    #[error("state variable `{variable}` is not in the variable table")]
    UnknownVariable { variable: String },
    #[error("symbol `{symbol}` is not in the symbol table")]
    UnknownSymbol { symbol: String },
    #[error("duplicate entry `{entry}` in an indexed table")]
    DuplicateEntry { entry: String },
    #[error("type ids must form a dense 0-based range: expected id {expected}, found {found}")]
    TypeIdGap { expected: usize, found: usize },
    #[error("data element `{name}` collides with a reserved output file")]
    ReservedName { name: String },
    #[error("invalid index document: {0}")]
    Malformed(String),
}

// ============================================================================
// Enumerations
// ============================================================================

/// An ordered table whose entries are addressed by their 0-based position.
#[derive(Debug, Clone)]
pub struct Enumeration<T> {
    items: Vec<T>,
    positions: HashMap<T, usize>,
}

impl<T> Enumeration<T>
where
    T: Eq + Hash + Clone + fmt::Display,
{
    pub fn new(items: Vec<T>) -> Result<Self, IndexError> {
        let mut positions = HashMap::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            if positions.insert(item.clone(), i).is_some() {
                return Err(IndexError::DuplicateEntry {
                    entry: item.to_string(),
                });
            }
        }
        Ok(Self { items, positions })
    }
}

impl<T> Enumeration<T>
where
    T: Eq + Hash,
{
    #[must_use]
    pub fn get_index<Q>(&self, key: &Q) -> Option<usize>
    where
        T: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.positions.get(key).copied()
    }

    #[must_use]
    pub fn dump(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &T> {
        self.items.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> TryFrom<Vec<T>> for Enumeration<T>
where
    T: Eq + Hash + Clone + fmt::Display,
{
    type Error = IndexError;

    fn try_from(items: Vec<T>) -> Result<Self, Self::Error> {
        Self::new(items)
    }
}

impl<'de, T> Deserialize<'de> for Enumeration<T>
where
    T: Deserialize<'de> + Eq + Hash + Clone + fmt::Display,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let items = Vec::<T>::deserialize(deserializer)?;
        Self::new(items).map_err(de::Error::custom)
    }
}

/// Object names in canonical order. Booleans live here under their tokens.
pub type ObjectTable = Enumeration<String>;

/// State variables in the global variable order.
pub type VariableTable = Enumeration<StateVariable>;

impl ObjectTable {
    /// Wire encoding of a value: integers pass through, everything else is
    /// resolved to its object index.
    pub fn get_value_idx(&self, value: &Value) -> Result<i64, IndexError> {
        let name = match value {
            Value::Int(value) => return Ok(*value),
            Value::Bool(value) => bool_token(*value),
            Value::Object(name) => name.as_str(),
        };
        self.object_index(name).map(|i| i as i64)
    }

    pub fn object_index(&self, name: &str) -> Result<usize, IndexError> {
        self.get_index(name).ok_or_else(|| IndexError::UnknownObject {
            value: name.to_string(),
        })
    }
}

// ============================================================================
// Variables, symbols, types
// ============================================================================

/// A symbol applied to concrete arguments, e.g. `at(truck1)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StateVariable {
    pub symbol: String,
    #[serde(default)]
    pub args: Vec<Value>,
}

impl StateVariable {
    pub fn new(symbol: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            symbol: symbol.into(),
            args,
        }
    }
}

impl fmt::Display for StateVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.symbol)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{arg}")?;
        }
        f.write_str(")")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    Predicate,
    Function,
}

impl SymbolKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Predicate => "predicate",
            Self::Function => "function",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    /// Type names of the arguments, in order.
    #[serde(default)]
    pub arguments: Vec<String>,
    /// Type name of the symbol's value (`bool` for predicates).
    pub codomain: String,
}

/// Symbols in canonical order, addressable by name.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
    positions: HashMap<String, usize>,
}

impl SymbolTable {
    pub fn new(symbols: Vec<Symbol>) -> Result<Self, IndexError> {
        let mut positions = HashMap::with_capacity(symbols.len());
        for (i, symbol) in symbols.iter().enumerate() {
            if positions.insert(symbol.name.clone(), i).is_some() {
                return Err(IndexError::DuplicateEntry {
                    entry: symbol.name.clone(),
                });
            }
        }
        Ok(Self { symbols, positions })
    }

    pub fn symbol_index(&self, name: &str) -> Result<usize, IndexError> {
        self.positions
            .get(name)
            .copied()
            .ok_or_else(|| IndexError::UnknownSymbol {
                symbol: name.to_string(),
            })
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.positions.get(name).map(|&i| &self.symbols[i])
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Symbol> {
        self.symbols.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl<'de> Deserialize<'de> for SymbolTable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let symbols = Vec::<Symbol>::deserialize(deserializer)?;
        Self::new(symbols).map_err(de::Error::custom)
    }
}

/// A type with its canonical id and the values it ranges over.
///
/// Bounded integer types list their integers in ascending order; object
/// types list object names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeInfo {
    pub id: usize,
    pub name: String,
    #[serde(default)]
    pub values: Vec<Value>,
}

// ============================================================================
// Schemata and formulae
// ============================================================================

/// An action schema or axiom, already dumped to an opaque record by the
/// index builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    pub name: String,
    /// Human-readable source text, when the builder recorded one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(flatten)]
    pub body: Map<String, JsonValue>,
}

impl Schema {
    /// The record as it appears in the problem document: the body plus `name`.
    #[must_use]
    pub fn dump(&self) -> JsonValue {
        let mut record = self.body.clone();
        record.insert("name".to_string(), JsonValue::String(self.name.clone()));
        JsonValue::Object(record)
    }

    /// Text used for the debug axiom listing.
    #[must_use]
    pub fn describe(&self) -> &str {
        self.source.as_deref().unwrap_or(&self.name)
    }
}

/// A goal or state-constraint formula, opaque to the exporter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Formula(pub JsonValue);

impl Formula {
    #[must_use]
    pub fn dump(&self) -> JsonValue {
        self.0.clone()
    }
}

/// An explicit initial assignment `variable = value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitAtom {
    pub variable: StateVariable,
    pub value: Value,
}

/// Precomputed groundings: schema name to tuples of object names.
pub type Groundings = BTreeMap<String, Vec<Vec<String>>>;

// ============================================================================
// The index
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct ProblemIndex {
    pub domain_name: String,
    pub instance_name: String,
    pub objects: ObjectTable,
    #[serde(default)]
    pub types: Vec<TypeInfo>,
    pub symbols: SymbolTable,
    #[serde(default)]
    pub static_symbols: BTreeSet<String>,
    pub state_variables: VariableTable,
    #[serde(default)]
    pub initial_fluent_atoms: Vec<InitAtom>,
    #[serde(default)]
    pub initial_static_data: Vec<StaticExtension>,
    #[serde(default)]
    pub action_schemas: Vec<Schema>,
    #[serde(default)]
    pub axioms: Vec<Schema>,
    #[serde(default)]
    pub goal: Formula,
    #[serde(default)]
    pub state_constraints: Formula,
    #[serde(default)]
    pub groundings: Option<Groundings>,
}

impl ProblemIndex {
    pub fn from_json_str(raw: &str) -> Result<Self, IndexError> {
        serde_json::from_str(raw).map_err(|err| IndexError::Malformed(err.to_string()))
    }

    pub fn from_json_value(value: JsonValue) -> Result<Self, IndexError> {
        serde_json::from_value(value).map_err(|err| IndexError::Malformed(err.to_string()))
    }

    #[must_use]
    pub fn is_static(&self, symbol: &str) -> bool {
        self.static_symbols.contains(symbol)
    }

    /// Static data elements in declaration order.
    pub fn data_elements(&self) -> impl Iterator<Item = &dyn DataElement> {
        self.initial_static_data
            .iter()
            .map(|elem| elem as &dyn DataElement)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{IndexError, ObjectTable, ProblemIndex, StateVariable};
    use crate::value::Value;

    #[test]
    fn object_table_rejects_duplicates() {
        let err = ObjectTable::new(vec!["a".into(), "b".into(), "a".into()]).unwrap_err();
        assert_eq!(
            err,
            IndexError::DuplicateEntry {
                entry: "a".to_string()
            }
        );
    }

    #[test]
    fn value_idx_passes_integers_through() {
        let objects = ObjectTable::new(vec!["a".into()]).unwrap();
        assert_eq!(objects.get_value_idx(&Value::Int(42)).unwrap(), 42);
        assert_eq!(objects.get_value_idx(&Value::object("a")).unwrap(), 0);
    }

    #[test]
    fn value_idx_resolves_bools_through_tokens() {
        let objects = ObjectTable::new(vec!["_false_".into(), "_true_".into()]).unwrap();
        assert_eq!(objects.get_value_idx(&Value::Bool(true)).unwrap(), 1);
        assert_eq!(objects.get_value_idx(&Value::Bool(false)).unwrap(), 0);
    }

    #[test]
    fn value_idx_fails_loudly_on_unknown_object() {
        let objects = ObjectTable::new(vec!["a".into()]).unwrap();
        let err = objects.get_value_idx(&Value::object("zz")).unwrap_err();
        assert!(matches!(err, IndexError::UnknownObject { value } if value == "zz"));
    }

    #[test]
    fn state_variable_display() {
        let var = StateVariable::new("at", vec![Value::object("t1"), Value::Int(3)]);
        assert_eq!(var.to_string(), "at(t1, 3)");
        assert_eq!(StateVariable::new("p", vec![]).to_string(), "p()");
    }

    #[test]
    fn schema_dump_carries_name() {
        let index = ProblemIndex::from_json_value(json!({
            "domain_name": "d",
            "instance_name": "i",
            "objects": [],
            "symbols": [],
            "state_variables": [],
            "action_schemas": [{"name": "move", "signature": [1, 2], "source": "(move ?a ?b)"}],
        }))
        .unwrap();
        let schema = &index.action_schemas[0];
        assert_eq!(schema.describe(), "(move ?a ?b)");
        assert_eq!(schema.dump(), json!({"name": "move", "signature": [1, 2]}));
    }

    #[test]
    fn malformed_index_reports_error() {
        let err = ProblemIndex::from_json_str("{\"domain_name\": 3}").unwrap_err();
        assert!(matches!(err, IndexError::Malformed(_)));
    }
}
