use indexmap::IndexMap;
use std::fmt;

use crate::pattern_tree::PatternBody;

/// The stream-to-relation operators a query can register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Operator {
    #[default]
    RStream,
    IStream,
    DStream,
}

impl Operator {
    /// Recognizes an operator name from a REGISTER clause. Query corpora
    /// write both `RStream` and `RSTREAM`, so the match ignores case.
    pub fn parse(name: &str) -> Option<Operator> {
        match name.to_ascii_lowercase().as_str() {
            "rstream" => Some(Operator::RStream),
            "istream" => Some(Operator::IStream),
            "dstream" => Some(Operator::DStream),
            _ => None,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operator::RStream => write!(f, "RStream"),
            Operator::IStream => write!(f, "IStream"),
            Operator::DStream => write!(f, "DStream"),
        }
    }
}

// Representing the relation-to-stream clause: operator plus output name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct R2S {
    pub operator: Operator,
    pub name: String,
}

impl Default for R2S {
    fn default() -> Self {
        Self {
            operator: Operator::RStream,
            name: "output".to_string(),
        }
    }
}

// Representing one window declaration. Two definitions are the same window
// exactly when all four fields match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WindowDefinition {
    pub window_name: String,
    pub stream_name: String,
    pub width: i64,
    pub slide: i64,
}

/// The structured form of one RSP-QL continuous query.
///
/// `sparql_query` holds the plain-SPARQL rendition of the query (window
/// blocks as `GRAPH` blocks) so a standard SPARQL parser can consume it;
/// `where_body` holds the same WHERE clause as a pattern tree for
/// structural merging.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedQuery {
    pub r2s: R2S,
    pub s2r: Vec<WindowDefinition>,
    pub prefixes: IndexMap<String, String>,
    pub projection_variables: Vec<String>,
    pub aggregation_function: Option<String>,
    pub aggregation_thing_in_context: Vec<String>,
    pub sparql_query: String,
    pub where_body: PatternBody,
}

impl ParsedQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_r2s(&mut self, r2s: R2S) {
        self.r2s = r2s;
    }

    pub fn add_s2r(&mut self, window: WindowDefinition) {
        self.s2r.push(window);
    }
}
