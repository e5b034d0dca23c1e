//! Symbol classification: externally implemented symbols and unbounded arity.

use std::collections::BTreeSet;

/// Marker prefix the index builder puts on externally implemented symbols.
pub const EXTERNAL_MARKER: char = '@';

/// Decides which symbols are computed by linked-in code and which ones accept
/// any number of arguments.
pub trait SymbolClassifier {
    fn is_external(&self, symbol: &str) -> bool;

    fn has_unbounded_arity(&self, symbol: &str) -> bool;

    /// Name of the C++ accessor bound to an external symbol.
    fn accessor(&self, symbol: &str) -> String;
}

/// Classifies by a reserved marker character and a fixed set of
/// variadic symbol names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerClassifier {
    marker: char,
    unbounded: BTreeSet<String>,
}

impl MarkerClassifier {
    pub fn new(marker: char, unbounded: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            marker,
            unbounded: unbounded.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub const fn marker(&self) -> char {
        self.marker
    }
}

impl Default for MarkerClassifier {
    fn default() -> Self {
        Self::new(EXTERNAL_MARKER, ["@alldiff", "@sum"])
    }
}

impl SymbolClassifier for MarkerClassifier {
    fn is_external(&self, symbol: &str) -> bool {
        symbol.starts_with(self.marker)
    }

    fn has_unbounded_arity(&self, symbol: &str) -> bool {
        self.unbounded.contains(symbol)
    }

    fn accessor(&self, symbol: &str) -> String {
        symbol.replace(self.marker, "")
    }
}
