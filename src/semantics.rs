use log::debug;
use std::collections::HashSet;

use crate::ontology::OntologyMap;
use crate::term::{Term, TriplePattern};

// Predicates that anchor a variable to a concrete domain entity. A variable
// whose owning triples are tied to one of these is considered bound to the
// entity on the other side.
const ENTITY_BINDING_PREDICATES: [&str; 4] = [
    "https://saref.etsi.org/core/relatesToProperty",
    "http://www.w3.org/1999/02/22-rdf-syntax-ns#type",
    "https://saref.etsi.org/core/isPropertyOf",
    "https://saref.etsi.org/core/measuresProperty",
];

fn is_entity_binding(term: &Term) -> bool {
    matches!(term, Term::Iri(iri) if ENTITY_BINDING_PREDICATES.contains(&iri.as_str()))
}

fn is_named(term: &Term, variable: &str) -> bool {
    matches!(term, Term::Variable(name) if name == variable)
}

/// Collects the set of normalized entities a variable is anchored to inside
/// one basic graph pattern.
///
/// Triples where the variable sits in the object position also contribute the
/// anchors of their subject: sibling triples that tie the same subject to a
/// concrete entity through an entity-binding predicate.
pub(crate) fn semantic_context(
    bgp: &[TriplePattern],
    variable: &str,
    ontology: &OntologyMap,
) -> HashSet<Term> {
    let mut context = HashSet::new();

    let owning = bgp
        .iter()
        .filter(|triple| triple.terms().iter().any(|term| is_named(term, variable)));

    for triple in owning {
        if is_named(&triple.object, variable) {
            for sibling in bgp.iter().filter(|s| s.subject == triple.subject) {
                if is_entity_binding(&ontology.normalize(&sibling.predicate))
                    && !sibling.object.is_variable()
                {
                    context.insert(ontology.normalize(&sibling.object));
                }
            }
        }

        if is_entity_binding(&ontology.normalize(&triple.predicate)) {
            if is_named(&triple.subject, variable) && !triple.object.is_variable() {
                context.insert(ontology.normalize(&triple.object));
            } else if is_named(&triple.object, variable) && !triple.subject.is_variable() {
                context.insert(ontology.normalize(&triple.subject));
            }
        }
    }

    context
}

/// Two contexts differ only when both carry evidence and that evidence is
/// disjoint. An empty side means there is not enough information to
/// disambiguate, which keeps the shared-variable JOIN.
pub(crate) fn contexts_differ(a: &HashSet<Term>, b: &HashSet<Term>) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    a.is_disjoint(b)
}

/// True when any shared variable name is anchored to provably different
/// entities in the two patterns. Short-circuits on the first divergence.
pub(crate) fn has_divergent_binding(
    bgp_a: &[TriplePattern],
    bgp_b: &[TriplePattern],
    shared_vars: &[String],
    ontology: &OntologyMap,
) -> bool {
    shared_vars.iter().any(|variable| {
        let context_a = semantic_context(bgp_a, variable, ontology);
        let context_b = semantic_context(bgp_b, variable, ontology);
        let diverges = contexts_differ(&context_a, &context_b);
        if diverges {
            debug!("?{variable} is anchored to disjoint entities: {context_a:?} vs {context_b:?}");
        }
        diverges
    })
}
