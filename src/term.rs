use spargebra::term::{NamedNodePattern, TermPattern};
use std::fmt;

// Representing a single RDF term inside a triple pattern.
//
// Variables carry their name without the leading `?`, blank nodes their label
// without `_:`, literals their lexical form only. Equality is exact equality
// of kind and value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Term {
    Variable(String),
    Iri(String),
    Literal(String),
    BlankNode(String),
}

impl Term {
    pub fn is_variable(&self) -> bool {
        matches!(self, Term::Variable(_))
    }

    /// The bare value without any sigil, used as the ontology lookup key.
    pub fn value(&self) -> &str {
        match self {
            Term::Variable(name) => name,
            Term::Iri(iri) => iri,
            Term::Literal(value) => value,
            Term::BlankNode(label) => label,
        }
    }

    /// Rebuilds a term of the same kind around a different value.
    pub fn with_value(&self, value: String) -> Term {
        match self {
            Term::Variable(_) => Term::Variable(value),
            Term::Iri(_) => Term::Iri(value),
            Term::Literal(_) => Term::Literal(value),
            Term::BlankNode(_) => Term::BlankNode(value),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Variable(name) => write!(f, "?{name}"),
            Term::Iri(iri) => write!(f, "{iri}"),
            Term::Literal(value) => write!(f, "{value}"),
            Term::BlankNode(label) => write!(f, "_:{label}"),
        }
    }
}

impl From<&TermPattern> for Term {
    fn from(pattern: &TermPattern) -> Self {
        match pattern {
            TermPattern::NamedNode(node) => Term::Iri(node.as_str().to_string()),
            TermPattern::BlankNode(node) => Term::BlankNode(node.as_str().to_string()),
            TermPattern::Literal(literal) => Term::Literal(literal.value().to_string()),
            TermPattern::Variable(variable) => Term::Variable(variable.as_str().to_string()),
        }
    }
}

impl From<&NamedNodePattern> for Term {
    fn from(pattern: &NamedNodePattern) -> Self {
        match pattern {
            NamedNodePattern::NamedNode(node) => Term::Iri(node.as_str().to_string()),
            NamedNodePattern::Variable(variable) => Term::Variable(variable.as_str().to_string()),
        }
    }
}

// Representing one triple pattern of a basic graph pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TriplePattern {
    pub subject: Term,
    pub predicate: Term,
    pub object: Term,
}

impl TriplePattern {
    pub fn new(subject: Term, predicate: Term, object: Term) -> Self {
        Self {
            subject,
            predicate,
            object,
        }
    }

    /// The three positions in order, for flattened iteration.
    pub fn terms(&self) -> [&Term; 3] {
        [&self.subject, &self.predicate, &self.object]
    }
}
