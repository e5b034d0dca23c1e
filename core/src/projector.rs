//! Projection of the problem index onto the problem document.
//!
//! Every table in the document mirrors an ordering the index already exposes:
//! variable, object and symbol ids are positions in the index's enumerations,
//! type ids are the index's own type ids. Nothing here invents an order except
//! the sort of the initial atoms, which the solver relies on.

use std::collections::HashMap;

use fsgen_types::{
    IndexError, InitEntry, ObjectEntry, ObjectTable, ProblemDocument, ProblemIndex, ProblemInfo,
    Schema, StateVariable, SymbolClassifier, SymbolEntry, TypeDomain, TypeEntry, Value, VariableEntry,
    bool_token,
};

pub fn generate_document(
    index: &ProblemIndex,
    classifier: &dyn SymbolClassifier,
) -> Result<ProblemDocument, IndexError> {
    Ok(ProblemDocument {
        variables: dump_variable_data(index)?,
        objects: dump_object_data(index),
        types: dump_type_data(index)?,
        action_schemata: index.action_schemas.iter().map(Schema::dump).collect(),
        state_constraints: index.state_constraints.dump(),
        goal: index.goal.dump(),
        axioms: index.axioms.iter().map(Schema::dump).collect(),
        init: dump_init_data(index)?,
        symbols: dump_symbol_data(index, classifier),
        problem: ProblemInfo {
            domain: index.domain_name.clone(),
            instance: index.instance_name.clone(),
        },
    })
}

/// The solver needs generated glue iff any symbol, static or fluent, is
/// implemented externally.
pub fn requires_compilation(index: &ProblemIndex, classifier: &dyn SymbolClassifier) -> bool {
    index
        .symbols
        .iter()
        .any(|symbol| classifier.is_external(&symbol.name))
}

pub fn dump_variable_data(index: &ProblemIndex) -> Result<Vec<VariableEntry>, IndexError> {
    index
        .state_variables
        .iter()
        .enumerate()
        .map(|(id, var)| {
            let symbol =
                index
                    .symbols
                    .get(&var.symbol)
                    .ok_or_else(|| IndexError::UnknownSymbol {
                        symbol: var.symbol.clone(),
                    })?;
            Ok(VariableEntry {
                id,
                name: var.to_string(),
                type_name: symbol.codomain.clone(),
                data: dump_state_variable(index, var)?,
            })
        })
        .collect()
}

/// `[symbol-id, [arg...]]` where integer arguments stay literal and everything
/// else becomes an object index.
pub fn dump_state_variable(
    index: &ProblemIndex,
    var: &StateVariable,
) -> Result<(usize, Vec<i64>), IndexError> {
    let head = index.symbols.symbol_index(&var.symbol)?;
    let constants = var
        .args
        .iter()
        .map(|arg| index.objects.get_value_idx(arg))
        .collect::<Result<Vec<_>, _>>()?;
    Ok((head, constants))
}

#[must_use]
pub fn dump_object_data(index: &ProblemIndex) -> Vec<ObjectEntry> {
    index
        .objects
        .dump()
        .iter()
        .enumerate()
        .map(|(id, name)| ObjectEntry {
            id,
            name: name.clone(),
        })
        .collect()
}

fn object_position(objects: &ObjectTable, value: &Value) -> Result<usize, IndexError> {
    match value {
        Value::Object(name) => objects.object_index(name),
        Value::Bool(flag) => objects.object_index(bool_token(*flag)),
        Value::Int(raw) => Err(IndexError::Malformed(format!(
            "integer {raw} listed among the objects of a non-integer type"
        ))),
    }
}

/// Types sorted by their canonical id. A type whose first value is an integer
/// is a bounded integer type spanning its first to its last value.
pub fn dump_type_data(index: &ProblemIndex) -> Result<Vec<TypeEntry>, IndexError> {
    let mut types: Vec<_> = index.types.iter().collect();
    types.sort_by_key(|t| t.id);

    types
        .into_iter()
        .enumerate()
        .map(|(position, t)| {
            if t.id != position {
                return Err(IndexError::TypeIdGap {
                    expected: position,
                    found: t.id,
                });
            }

            let domain = match t.values.first() {
                Some(Value::Int(min)) => {
                    let max = t.values.last().and_then(Value::as_int).ok_or_else(|| {
                        IndexError::Malformed(format!(
                            "bounded integer type `{}` does not end with an integer",
                            t.name
                        ))
                    })?;
                    TypeDomain::Int { min: *min, max }
                }
                _ => TypeDomain::Objects(
                    t.values
                        .iter()
                        .map(|value| object_position(&index.objects, value))
                        .collect::<Result<_, _>>()?,
                ),
            };

            Ok(TypeEntry {
                id: t.id,
                name: t.name.clone(),
                domain,
            })
        })
        .collect()
}

pub fn dump_init_data(index: &ProblemIndex) -> Result<InitEntry, IndexError> {
    let mut atoms = index
        .initial_fluent_atoms
        .iter()
        .map(|atom| {
            let var = index
                .state_variables
                .get_index(&atom.variable)
                .ok_or_else(|| IndexError::UnknownVariable {
                    variable: atom.variable.to_string(),
                })?;
            Ok((var, index.objects.get_value_idx(&atom.value)?))
        })
        .collect::<Result<Vec<_>, IndexError>>()?;
    atoms.sort_unstable();

    Ok(InitEntry {
        variables: index.state_variables.len(),
        atoms,
    })
}

pub fn dump_symbol_data(
    index: &ProblemIndex,
    classifier: &dyn SymbolClassifier,
) -> Vec<SymbolEntry> {
    let mut variables_by_symbol: HashMap<&str, Vec<(usize, String)>> = HashMap::new();
    for (id, var) in index.state_variables.iter().enumerate() {
        variables_by_symbol
            .entry(var.symbol.as_str())
            .or_default()
            .push((id, var.to_string()));
    }

    index
        .symbols
        .iter()
        .enumerate()
        .map(|(id, symbol)| SymbolEntry {
            id,
            name: symbol.name.clone(),
            kind: symbol.kind,
            domain: symbol.arguments.clone(),
            codomain: symbol.codomain.clone(),
            variables: variables_by_symbol
                .remove(symbol.name.as_str())
                .unwrap_or_default(),
            is_static: index.is_static(&symbol.name),
            unbounded_arity: classifier.has_unbounded_arity(&symbol.name),
        })
        .collect()
}
