use log::debug;
use std::collections::HashSet;
use std::fmt;

use crate::bgp::extract_bgp;
use crate::ontology::OntologyMap;
use crate::semantics;
use crate::term::{Term, TriplePattern};

/// The algebraic relationship between the basic graph patterns of two queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryRelation {
    Join,
    Union,
    Cartesian,
}

impl fmt::Display for QueryRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryRelation::Join => write!(f, "JOIN"),
            QueryRelation::Union => write!(f, "UNION"),
            QueryRelation::Cartesian => write!(f, "CARTESIAN"),
        }
    }
}

/// Decides whether two queries can be joined, unioned, or only combined as a
/// cartesian product.
pub struct QueryRelationClassifier {
    query_one: String,
    query_two: String,
}

impl QueryRelationClassifier {
    pub fn new(query_one: impl Into<String>, query_two: impl Into<String>) -> Self {
        Self {
            query_one: query_one.into(),
            query_two: query_two.into(),
        }
    }

    /// Classifies the relationship between two queries.
    ///
    /// Shared variable names are JOIN evidence unless the semantic binding
    /// analysis proves they are anchored to different entities. After ontology
    /// normalization, shared subject/object constants are JOIN evidence and
    /// shared predicates are UNION evidence; with no evidence at all the
    /// queries are unrelated and the result is CARTESIAN.
    pub fn decide_relation(
        &self,
        query_a: &str,
        query_b: &str,
        ontology: &OntologyMap,
    ) -> QueryRelation {
        let bgp_a = extract_bgp(query_a);
        let bgp_b = extract_bgp(query_b);

        let shared_vars = shared_variables(&bgp_a, &bgp_b);
        if !shared_vars.is_empty() {
            if semantics::has_divergent_binding(&bgp_a, &bgp_b, &shared_vars, ontology) {
                // Same names, different meanings. The shared name is treated
                // as coincidental and classification falls through to the
                // constant and predicate evidence.
                debug!("shared variables {shared_vars:?} diverge semantically, withholding JOIN");
            } else {
                return QueryRelation::Join;
            }
        }

        let norm_a: Vec<TriplePattern> =
            bgp_a.iter().map(|t| ontology.normalize_triple(t)).collect();
        let norm_b: Vec<TriplePattern> =
            bgp_b.iter().map(|t| ontology.normalize_triple(t)).collect();

        // Predicates are kept out of the constant sets: predicate equality is
        // UNION evidence, not JOIN evidence.
        let constants_a = constant_terms(&norm_a);
        let constants_b = constant_terms(&norm_b);
        if constants_a.intersection(&constants_b).next().is_some() {
            return QueryRelation::Join;
        }

        let predicates_a: HashSet<&Term> = norm_a.iter().map(|t| &t.predicate).collect();
        let predicates_b: HashSet<&Term> = norm_b.iter().map(|t| &t.predicate).collect();
        if predicates_a.intersection(&predicates_b).next().is_some() {
            return QueryRelation::Union;
        }

        QueryRelation::Cartesian
    }

    /// Classifies the two queries bound at construction time.
    pub fn decide_instance_relation(&self, ontology: &OntologyMap) -> QueryRelation {
        self.decide_relation(&self.query_one, &self.query_two, ontology)
    }
}

fn shared_variables(bgp_a: &[TriplePattern], bgp_b: &[TriplePattern]) -> Vec<String> {
    let vars_a = variable_names(bgp_a);
    let vars_b = variable_names(bgp_b);
    vars_a.intersection(&vars_b).cloned().collect()
}

fn variable_names(bgp: &[TriplePattern]) -> HashSet<String> {
    bgp.iter()
        .flat_map(|triple| triple.terms())
        .filter(|term| term.is_variable())
        .map(|term| term.value().to_string())
        .collect()
}

fn constant_terms(bgp: &[TriplePattern]) -> HashSet<&Term> {
    bgp.iter()
        .flat_map(|triple| [&triple.subject, &triple.object])
        .filter(|term| !term.is_variable())
        .collect()
}
