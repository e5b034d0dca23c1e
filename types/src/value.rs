//! Values held by state variables, type domains and static extensions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Object name standing in for boolean `true` in the object table.
pub const TRUE_TOKEN: &str = "_true_";
/// Object name standing in for boolean `false` in the object table.
pub const FALSE_TOKEN: &str = "_false_";

/// Canonical object token for a boolean value.
#[must_use]
pub const fn bool_token(value: bool) -> &'static str {
    if value { TRUE_TOKEN } else { FALSE_TOKEN }
}

/// A value as classified by the index builder.
///
/// Integers are encoded as themselves on the wire; booleans and objects are
/// encoded through the object table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Bool(bool),
    Object(String),
}

impl Value {
    #[must_use]
    pub fn object(name: impl Into<String>) -> Self {
        Self::Object(name.into())
    }

    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            Self::Bool(_) | Self::Object(_) => None,
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Object(value.to_string())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Bool(value) => f.write_str(bool_token(*value)),
            Self::Object(name) => f.write_str(name),
        }
    }
}
