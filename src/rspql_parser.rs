use indexmap::IndexMap;
use log::debug;
use regex::Regex;

use crate::parsed_query::{Operator, ParsedQuery, WindowDefinition, R2S};
use crate::pattern_tree::{self, BlockKeyword};

// Representing the RSP-QL surface parser. The accepted grammar is the
// RSP-QL extension of SPARQL: an optional REGISTER clause naming the
// relation-to-stream operator, FROM NAMED WINDOW declarations carrying
// RANGE and STEP, and WINDOW blocks scoping patterns inside WHERE.
pub struct RSPQLParser {
    query: String,
}

impl RSPQLParser {
    pub fn new(query: String) -> Self {
        Self { query }
    }

    /// Parses the stored query into its structured form.
    ///
    /// Parsing is lenient. A missing REGISTER clause falls back to an
    /// `RStream` named `output`, a missing WHERE clause leaves the pattern
    /// body empty, and names with an undeclared prefix are kept as written,
    /// so degraded input still yields a usable result instead of an error.
    pub fn parse(&self) -> ParsedQuery {
        let mut parsed = ParsedQuery::new();

        let prefix_re = Regex::new(r"(?i)PREFIX\s+([^:\s]*):\s*<([^>]+)>").unwrap();
        for cap in prefix_re.captures_iter(&self.query) {
            parsed.prefixes.insert(cap[1].to_string(), cap[2].to_string());
        }

        let register_re = Regex::new(r"(?i)REGISTER\s+(\w+)\s+<?([^<>\s]+)>?\s+AS").unwrap();
        if let Some(cap) = register_re.captures(&self.query) {
            let operator = Operator::parse(&cap[1]).unwrap_or_else(|| {
                debug!(
                    "unknown stream operator {}; falling back to RStream",
                    &cap[1]
                );
                Operator::default()
            });
            parsed.set_r2s(R2S {
                operator,
                name: cap[2].to_string(),
            });
        }

        let window_re = Regex::new(
            r"(?i)FROM\s+NAMED\s+WINDOW\s+(\S+)\s+ON\s+STREAM\s+(\S+)\s+\[RANGE\s+(\d+)\s+STEP\s+(\d+)\]",
        )
        .unwrap();
        for cap in window_re.captures_iter(&self.query) {
            let window = WindowDefinition {
                window_name: unwrap_iri(&cap[1], &parsed.prefixes),
                stream_name: unwrap_iri(&cap[2], &parsed.prefixes),
                width: cap[3].parse().unwrap_or_default(),
                slide: cap[4].parse().unwrap_or_default(),
            };
            parsed.add_s2r(window);
        }

        let select_terms = self.collect_projection(&mut parsed);

        if let Some(body) = self.where_block() {
            parsed.where_body = pattern_tree::parse_body(body);
        } else {
            debug!("query has no WHERE clause; the pattern body stays empty");
        }

        let select_clause = if select_terms.is_empty() {
            "*".to_string()
        } else {
            select_terms.join(" ")
        };
        parsed.sparql_query = translate_to_sparql(&parsed, &select_clause);
        parsed
    }

    // One pass over the SELECT clause keeps plain variables and aggregate
    // aliases in the order they were written. Returns the SELECT terms
    // re-rendered for the plain-SPARQL translation.
    fn collect_projection(&self, parsed: &mut ParsedQuery) -> Vec<String> {
        let select_re = Regex::new(r"(?is)SELECT\s(.*?)\s(?:WHERE|FROM)\b").unwrap();
        let term_re = Regex::new(
            r"\(?\s*(\w+)\s*\(\s*\?(\w+)\s*\)\s+(?i:AS)\s+\?(\w+)\s*\)?|\?(\w+)",
        )
        .unwrap();

        let mut terms = Vec::new();
        let Some(cap) = select_re.captures(&self.query) else {
            return terms;
        };
        let segment = cap.get(1).map_or("", |m| m.as_str());
        for token in term_re.captures_iter(segment) {
            match token.get(4) {
                Some(plain) => {
                    parsed.projection_variables.push(plain.as_str().to_string());
                    terms.push(format!("?{}", plain.as_str()));
                }
                None => {
                    let function = token[1].to_uppercase();
                    terms.push(format!("({}(?{}) AS ?{})", function, &token[2], &token[3]));
                    // The first aggregate names the function; mixed functions
                    // in one SELECT keep the first and are caught later by
                    // the combiner's single-function rule.
                    parsed.aggregation_function.get_or_insert(function);
                    parsed.aggregation_thing_in_context.push(token[2].to_string());
                    parsed.projection_variables.push(token[3].to_string());
                }
            }
        }
        terms
    }

    fn where_block(&self) -> Option<&str> {
        let where_re = Regex::new(r"(?i)WHERE\s*\{").unwrap();
        let found = where_re.find(&self.query)?;
        let (inner, _) = pattern_tree::matched_braces(&self.query, found.end() - 1)?;
        Some(inner)
    }
}

// The plain-SPARQL rendition keeps every prefix and rewrites WINDOW blocks
// as GRAPH blocks so an off-the-shelf SPARQL parser accepts the result. The
// combiner reuses it for the merged query.
pub(crate) fn translate_to_sparql(parsed: &ParsedQuery, select_clause: &str) -> String {
    let mut out = String::new();
    for (prefix, iri) in &parsed.prefixes {
        out.push_str(&format!("PREFIX {prefix}: <{iri}>\n"));
    }
    out.push_str(&format!("SELECT {select_clause}\n"));
    out.push_str("WHERE {\n");
    out.push_str(&pattern_tree::render_body(
        &parsed.where_body,
        BlockKeyword::Graph,
    ));
    out.push_str("\n}");
    out
}

/// Expands a prefixed name against the declared prefixes. Bracketed IRIs
/// lose their brackets; names with an undeclared prefix stay as written.
fn unwrap_iri(token: &str, prefixes: &IndexMap<String, String>) -> String {
    if let Some(stripped) = token.strip_prefix('<') {
        return stripped.strip_suffix('>').unwrap_or(stripped).to_string();
    }
    if let Some((prefix, local)) = token.split_once(':') {
        if let Some(base) = prefixes.get(prefix) {
            return format!("{base}{local}");
        }
        debug!("no declared prefix for {token}; keeping the name as written");
    }
    token.to_string()
}
