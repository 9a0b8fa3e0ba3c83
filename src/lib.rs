mod bgp;
mod chunk_rewriter;
mod error;
mod ontology;
mod parsed_query;
mod pattern_tree;
mod query_combiner;
mod relation_classifier;
mod rspql_parser;
mod semantics;
mod term;

pub use bgp::extract_bgp;
pub use chunk_rewriter::ChunkQueryRewriter;
pub use error::CombineError;
pub use ontology::OntologyMap;
pub use parsed_query::{Operator, ParsedQuery, WindowDefinition, R2S};
pub use pattern_tree::{
    first_window, graph_subjects, parse_body, render_body, BlockKeyword, PatternBody, PatternNode,
};
pub use query_combiner::{shorten_iri, QueryCombiner};
pub use relation_classifier::{QueryRelation, QueryRelationClassifier};
pub use rspql_parser::RSPQLParser;
pub use term::{Term, TriplePattern};
