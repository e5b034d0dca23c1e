//! Core domain types for fsgen.
//!
//! This crate contains pure data types with no IO: the read-only problem
//! index handed to the exporter, the tagged [`Value`] variant, static data
//! elements, symbol classification, and the problem document that forms the
//! wire contract with the solver.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory
#![allow(clippy::missing_panics_doc)] // Panics are documented in assertions

mod classify;
mod document;
mod index;
mod static_data;
mod value;

pub use classify::{EXTERNAL_MARKER, MarkerClassifier, SymbolClassifier};
pub use document::{
    InitEntry, ObjectEntry, ProblemDocument, ProblemInfo, SymbolEntry, TypeDomain, TypeEntry,
    VariableEntry, record_name,
};
pub use index::{
    Enumeration, Formula, Groundings, IndexError, InitAtom, ObjectTable, ProblemIndex, Schema,
    StateVariable, Symbol, SymbolKind, SymbolTable, TypeInfo, VariableTable,
};
pub use static_data::{DataElement, MapEntry, StaticExtension};
pub use value::{FALSE_TOKEN, TRUE_TOKEN, Value, bool_token};
