use crate::term::{Term, TriplePattern};
use std::collections::HashMap;

// Immutable equivalence map from a constant term's value to the canonical
// label of its equivalence class. Built once, then only read: a lookup miss
// means the constant is its own class and the term passes through unchanged.
#[derive(Debug, Clone, Default)]
pub struct OntologyMap {
    entries: HashMap<String, String>,
}

impl OntologyMap {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// The canonical label registered for a constant value, if any.
    pub fn canonical(&self, value: &str) -> Option<&str> {
        self.entries.get(value).map(String::as_str)
    }

    /// Rewrites a term through the map, preserving its kind. Variables are
    /// never looked up.
    pub fn normalize(&self, term: &Term) -> Term {
        if term.is_variable() {
            return term.clone();
        }
        match self.canonical(term.value()) {
            Some(canonical) => term.with_value(canonical.to_string()),
            None => term.clone(),
        }
    }

    /// Normalizes all three positions of a triple pattern.
    pub fn normalize_triple(&self, triple: &TriplePattern) -> TriplePattern {
        TriplePattern::new(
            self.normalize(&triple.subject),
            self.normalize(&triple.predicate),
            self.normalize(&triple.object),
        )
    }
}
