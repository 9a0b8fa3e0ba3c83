use log::warn;
use spargebra::Query;
use spargebra::algebra::GraphPattern;

use crate::term::{Term, TriplePattern};

/// Extracts the first basic graph pattern of a query as flat triple patterns.
///
/// Any parse irregularity (syntax error, missing WHERE, no triples) yields an
/// empty sequence so classification can degrade instead of failing.
pub fn extract_bgp(query: &str) -> Vec<TriplePattern> {
    let parsed = match Query::parse(query, None) {
        Ok(parsed) => parsed,
        Err(e) => {
            warn!("failed to parse query, treating it as an empty pattern: {e}");
            return Vec::new();
        }
    };

    let pattern = match &parsed {
        Query::Select { pattern, .. }
        | Query::Construct { pattern, .. }
        | Query::Describe { pattern, .. }
        | Query::Ask { pattern, .. } => pattern,
    };

    match first_bgp(pattern) {
        Some(patterns) => patterns.iter().map(to_triple_pattern).collect(),
        None => {
            warn!("query holds no basic graph pattern: {}", query.trim());
            Vec::new()
        }
    }
}

// Descends to the leftmost `Bgp` node: wrapper nodes are stepped through and
// binary nodes contribute their left branch first.
fn first_bgp(pattern: &GraphPattern) -> Option<&[spargebra::term::TriplePattern]> {
    match pattern {
        GraphPattern::Bgp { patterns } => Some(patterns.as_slice()),
        GraphPattern::Project { inner, .. }
        | GraphPattern::Distinct { inner }
        | GraphPattern::Reduced { inner }
        | GraphPattern::Slice { inner, .. }
        | GraphPattern::Filter { inner, .. }
        | GraphPattern::OrderBy { inner, .. }
        | GraphPattern::Group { inner, .. }
        | GraphPattern::Extend { inner, .. }
        | GraphPattern::Graph { inner, .. } => first_bgp(inner),
        GraphPattern::Join { left, right }
        | GraphPattern::LeftJoin { left, right, .. }
        | GraphPattern::Union { left, right }
        | GraphPattern::Minus { left, right } => first_bgp(left).or_else(|| first_bgp(right)),
        // Property paths, VALUES and SERVICE blocks carry no plain triple
        // patterns of their own.
        _ => None,
    }
}

fn to_triple_pattern(pattern: &spargebra::term::TriplePattern) -> TriplePattern {
    TriplePattern::new(
        Term::from(&pattern.subject),
        Term::from(&pattern.predicate),
        Term::from(&pattern.object),
    )
}
