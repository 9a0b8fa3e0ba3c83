use std::collections::HashSet;

use indexmap::IndexMap;
use log::debug;

use crate::error::CombineError;
use crate::parsed_query::ParsedQuery;
use crate::pattern_tree::{self, BlockKeyword, PatternBody, PatternNode};
use crate::rspql_parser::{self, RSPQLParser};

// Representing the query combiner: it accumulates RSP-QL query texts and
// merges them into one continuous query. Metadata comes from the first
// query, windows are deduplicated, and the WHERE bodies are joined as a
// single window, a union within one window, or a union across windows.
pub struct QueryCombiner {
    queries: Vec<String>,
}

impl QueryCombiner {
    pub fn new() -> Self {
        Self {
            queries: Vec::new(),
        }
    }

    /// Adds a query to the combiner.
    pub fn add_query(&mut self, query: impl Into<String>) {
        self.queries.push(query.into());
    }

    /// Clears all queries from the combiner.
    pub fn clear_queries(&mut self) {
        self.queries.clear();
    }

    /// Combines the added queries into a single parsed query.
    ///
    /// With a strict subject match, the inner bodies are joined inside one
    /// window only when every query binds exactly the same set of leading
    /// subject variables. With a loose match, sharing at least one subject
    /// with the first query is enough.
    pub fn combine(&self, strict_subject_match: bool) -> Result<ParsedQuery, CombineError> {
        let parsed: Vec<ParsedQuery> = self
            .queries
            .iter()
            .map(|query| RSPQLParser::new(query.clone()).parse())
            .collect();
        let Some(first_query) = parsed.first() else {
            return Err(CombineError::NoQueries);
        };

        let mut combined = ParsedQuery::new();

        // Metadata comes from the first query; later prefix declarations
        // win over earlier ones for the same label.
        combined.set_r2s(first_query.r2s.clone());
        for query in &parsed {
            for (prefix, iri) in &query.prefixes {
                combined.prefixes.insert(prefix.clone(), iri.clone());
            }
        }

        let mut seen_windows = HashSet::new();
        for query in &parsed {
            for window in &query.s2r {
                if seen_windows.insert(window.clone()) {
                    combined.add_s2r(window.clone());
                }
            }
        }

        for query in &parsed {
            for variable in &query.projection_variables {
                if !combined.projection_variables.contains(variable) {
                    combined.projection_variables.push(variable.clone());
                }
            }
        }

        self.merge_aggregation(&parsed, &mut combined)?;

        // One shared window means every query declares exactly one window
        // and all of them agree on the full definition.
        let shared_window = first_query.s2r.first().filter(|first| {
            parsed
                .iter()
                .all(|query| query.s2r.len() == 1 && query.s2r[0] == **first)
        });

        let base_subjects = pattern_tree::graph_subjects(&first_query.where_body);
        let subjects_compatible = if strict_subject_match {
            parsed
                .iter()
                .all(|query| pattern_tree::graph_subjects(&query.where_body) == base_subjects)
        } else {
            parsed.iter().all(|query| {
                pattern_tree::graph_subjects(&query.where_body)
                    .iter()
                    .any(|subject| base_subjects.contains(subject))
            })
        };

        combined.where_body = match shared_window {
            Some(window) if subjects_compatible => {
                debug!("joining {} queries inside one window", parsed.len());
                let mut body = PatternBody::new();
                for (index, query) in parsed.iter().enumerate() {
                    let (_, window_body) = first_window_of(query, index)?;
                    extend_merged(&mut body, window_body);
                }
                vec![PatternNode::Window {
                    name: shorten_iri(&window.window_name, &combined.prefixes),
                    body,
                }]
            }
            Some(window) => {
                debug!("unioning {} queries inside one window", parsed.len());
                let mut alternatives = Vec::new();
                for (index, query) in parsed.iter().enumerate() {
                    let (_, window_body) = first_window_of(query, index)?;
                    alternatives.push(window_body.clone());
                }
                vec![PatternNode::Window {
                    name: shorten_iri(&window.window_name, &combined.prefixes),
                    body: vec![PatternNode::Union(alternatives)],
                }]
            }
            None => {
                debug!("unioning {} queries across their windows", parsed.len());
                let mut alternatives = Vec::new();
                for (index, query) in parsed.iter().enumerate() {
                    let (name, window_body) = first_window_of(query, index)?;
                    alternatives.push(vec![PatternNode::Window {
                        name: name.to_string(),
                        body: window_body.clone(),
                    }]);
                }
                vec![PatternNode::Union(alternatives)]
            }
        };

        // The stored plain-SPARQL form uses GRAPH blocks, exactly like the
        // parser's output, so the combined query feeds straight back into
        // BGP extraction and classification.
        combined.sparql_query =
            rspql_parser::translate_to_sparql(&combined, &select_clause(&combined)?);
        Ok(combined)
    }

    // A unified aggregation exists only when exactly one distinct non-empty
    // function name occurs across the inputs. Its target variables merge in
    // first-seen order, and missing aliases are synthesized as `agg_i` so
    // targets and aliases always pair up position by position.
    fn merge_aggregation(
        &self,
        parsed: &[ParsedQuery],
        combined: &mut ParsedQuery,
    ) -> Result<(), CombineError> {
        let functions: HashSet<&str> = parsed
            .iter()
            .filter_map(|query| query.aggregation_function.as_deref())
            .filter(|function| !function.is_empty())
            .collect();
        if functions.len() != 1 {
            return Ok(());
        }
        combined.aggregation_function = functions.into_iter().next().map(str::to_string);
        for query in parsed {
            for target in &query.aggregation_thing_in_context {
                if !combined.aggregation_thing_in_context.contains(target) {
                    combined.aggregation_thing_in_context.push(target.clone());
                }
            }
        }

        let targets = combined.aggregation_thing_in_context.len();
        let aliases = combined.projection_variables.len();
        if aliases > targets {
            return Err(CombineError::AggregationProjectionMismatch { targets, aliases });
        }
        for index in aliases..targets {
            combined.projection_variables.push(format!("agg_{index}"));
        }
        Ok(())
    }

    /// Serializes a parsed query back to RSP-QL text.
    ///
    /// Fails when the query claims an aggregation whose targets and aliases
    /// do not pair up, since any SELECT clause written for it would change
    /// the query's meaning.
    pub fn parsed_to_string(&self, parsed: &ParsedQuery) -> Result<String, CombineError> {
        let mut lines = Vec::new();
        for (prefix, iri) in &parsed.prefixes {
            lines.push(format!("PREFIX {prefix}: <{iri}>"));
        }
        lines.push(format!(
            "REGISTER {} <{}> AS",
            parsed.r2s.operator, parsed.r2s.name
        ));
        lines.push(format!("SELECT {}", select_clause(parsed)?));
        for window in &parsed.s2r {
            lines.push(format!(
                "FROM NAMED WINDOW {} ON STREAM {} [RANGE {} STEP {}]",
                shorten_iri(&window.window_name, &parsed.prefixes),
                shorten_iri(&window.stream_name, &parsed.prefixes),
                window.width,
                window.slide
            ));
        }
        lines.push("WHERE {".to_string());
        lines.push(pattern_tree::render_body(
            &parsed.where_body,
            BlockKeyword::Window,
        ));
        lines.push("}".to_string());
        Ok(lines.join("\n"))
    }
}

impl Default for QueryCombiner {
    fn default() -> Self {
        Self::new()
    }
}

// The WHERE body of every input must carry at least one window block; a
// combined query without a pattern body would be semantically wrong, so
// both gaps are reported instead of being papered over.
fn first_window_of(
    query: &ParsedQuery,
    index: usize,
) -> Result<(&str, &PatternBody), CombineError> {
    if query.where_body.is_empty() {
        return Err(CombineError::MissingWhereClause { index });
    }
    pattern_tree::first_window(&query.where_body)
        .ok_or(CombineError::MissingWindowBlock { index })
}

// The JOIN form concatenates raw pattern text, so text runs meeting across
// query boundaries collapse into one node and the merged body is equal to
// the reparse of its own rendering.
fn extend_merged(body: &mut PatternBody, nodes: &[PatternNode]) {
    for node in nodes {
        if let PatternNode::Basic(next) = node {
            if let Some(PatternNode::Basic(run)) = body.last_mut() {
                run.push('\n');
                run.push_str(next);
                continue;
            }
        }
        body.push(node.clone());
    }
}

// Renders the SELECT clause. An aggregation must pair every target with an
// alias position by position; an empty projection falls back to selecting
// everything.
fn select_clause(parsed: &ParsedQuery) -> Result<String, CombineError> {
    let function = parsed
        .aggregation_function
        .as_deref()
        .filter(|function| !function.is_empty());
    if let Some(function) = function {
        let targets = parsed.aggregation_thing_in_context.len();
        let aliases = parsed.projection_variables.len();
        if targets != aliases {
            return Err(CombineError::AggregationProjectionMismatch { targets, aliases });
        }
        if targets > 0 {
            let function = function.to_uppercase();
            return Ok(parsed
                .aggregation_thing_in_context
                .iter()
                .zip(&parsed.projection_variables)
                .map(|(target, alias)| format!("({function}(?{target}) AS ?{alias})"))
                .collect::<Vec<_>>()
                .join(" "));
        }
    }
    if parsed.projection_variables.is_empty() {
        Ok("*".to_string())
    } else {
        Ok(parsed
            .projection_variables
            .iter()
            .map(|variable| format!("?{variable}"))
            .collect::<Vec<_>>()
            .join(" "))
    }
}

/// Shortens an IRI to a prefixed name using the declared prefixes, falling
/// back to the bracketed full IRI when no namespace matches.
pub fn shorten_iri(iri: &str, prefixes: &IndexMap<String, String>) -> String {
    for (prefix, namespace) in prefixes {
        if let Some(local) = iri.strip_prefix(namespace.as_str()) {
            return format!("{prefix}:{local}");
        }
    }
    format!("<{iri}>")
}
