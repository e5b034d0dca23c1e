//! Extensions of static symbols shipped alongside the problem document.

use serde::{Deserialize, Serialize};

use crate::index::{IndexError, ObjectTable};
use crate::value::Value;

/// A named block of static data that knows how to encode itself.
///
/// The exporter writes each element to `data/<name>.data`, one line per
/// entry returned by [`DataElement::serialize_data`].
pub trait DataElement {
    fn name(&self) -> &str;

    fn serialize_data(&self, objects: &ObjectTable) -> Result<Vec<String>, IndexError>;
}

/// One point of a static function: `symbol(args) = value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapEntry {
    #[serde(default)]
    pub args: Vec<Value>,
    pub value: Value,
}

/// The initial extension of a static symbol as recorded by the index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StaticExtension {
    /// Tuples for which a static predicate holds.
    Set {
        name: String,
        entries: Vec<Vec<Value>>,
    },
    /// Points of a static function.
    Map { name: String, entries: Vec<MapEntry> },
}

fn encode_tuple<'a>(
    objects: &ObjectTable,
    values: impl IntoIterator<Item = &'a Value>,
) -> Result<String, IndexError> {
    let encoded = values
        .into_iter()
        .map(|value| objects.get_value_idx(value).map(|idx| idx.to_string()))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(encoded.join(","))
}

impl DataElement for StaticExtension {
    fn name(&self) -> &str {
        match self {
            Self::Set { name, .. } | Self::Map { name, .. } => name,
        }
    }

    fn serialize_data(&self, objects: &ObjectTable) -> Result<Vec<String>, IndexError> {
        match self {
            Self::Set { entries, .. } => entries
                .iter()
                .map(|tuple| encode_tuple(objects, tuple))
                .collect(),
            Self::Map { entries, .. } => entries
                .iter()
                .map(|entry| encode_tuple(objects, entry.args.iter().chain([&entry.value])))
                .collect(),
        }
    }
}
