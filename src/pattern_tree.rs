use std::collections::HashSet;

/// One node of a parsed WHERE-clause body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternNode {
    /// A contiguous run of raw triple-pattern text.
    Basic(String),
    /// A `WINDOW`/`GRAPH` block, keeping the surface name it was written with.
    Window { name: String, body: PatternBody },
    /// Alternatives joined by `UNION`.
    Union(Vec<PatternBody>),
}

pub type PatternBody = Vec<PatternNode>;

/// The keyword used for window blocks when rendering a body back to text:
/// `WINDOW` for RSP-QL surface syntax, `GRAPH` for the plain-SPARQL form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKeyword {
    Window,
    Graph,
}

impl BlockKeyword {
    fn as_str(self) -> &'static str {
        match self {
            BlockKeyword::Window => "WINDOW",
            BlockKeyword::Graph => "GRAPH",
        }
    }
}

/// Parses the text between the braces of a WHERE clause into a pattern tree.
///
/// `WINDOW`/`GRAPH` blocks become [`PatternNode::Window`] nodes, `UNION`
/// separators at the current depth split the body into alternatives, and bare
/// grouping braces are flattened into their parent. Everything else is kept
/// as raw pattern text.
pub fn parse_body(text: &str) -> PatternBody {
    let mut nodes: PatternBody = Vec::new();
    let mut alternatives: Vec<PatternBody> = Vec::new();
    let mut segment = String::new();
    let mut i = 0;

    while i < text.len() {
        if let Some(keyword_len) = block_keyword_at(text, i) {
            if let Some((name, inner, next)) = parse_block(text, i + keyword_len) {
                flush_segment(&mut segment, &mut nodes);
                nodes.push(PatternNode::Window {
                    name,
                    body: parse_body(inner),
                });
                i = next;
                continue;
            }
        }

        if keyword_at(text, i, "UNION") {
            flush_segment(&mut segment, &mut nodes);
            alternatives.push(std::mem::take(&mut nodes));
            i += "UNION".len();
            continue;
        }

        if text.as_bytes()[i] == b'{' {
            if let Some((inner, next)) = matched_braces(text, i) {
                flush_segment(&mut segment, &mut nodes);
                nodes.extend(parse_body(inner));
                i = next;
                continue;
            }
        }

        let ch = text[i..].chars().next().unwrap_or(' ');
        segment.push(ch);
        i += ch.len_utf8();
    }

    flush_segment(&mut segment, &mut nodes);

    if alternatives.is_empty() {
        nodes
    } else {
        alternatives.push(nodes);
        vec![PatternNode::Union(alternatives)]
    }
}

/// Renders a body back to query text with the given block keyword.
pub fn render_body(body: &[PatternNode], keyword: BlockKeyword) -> String {
    body.iter()
        .map(|node| render_node(node, keyword))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_node(node: &PatternNode, keyword: BlockKeyword) -> String {
    match node {
        PatternNode::Basic(text) => text.clone(),
        PatternNode::Window { name, body } => format!(
            "{} {} {{\n{}\n}}",
            keyword.as_str(),
            name,
            render_body(body, keyword)
        ),
        PatternNode::Union(alternatives) => alternatives
            .iter()
            .map(|alternative| format!("{{ {} }}", render_body(alternative, keyword)))
            .collect::<Vec<_>>()
            .join("\nUNION\n"),
    }
}

/// The leading subject variables of every window block in the body: the
/// variable that opens each block's first pattern run.
pub fn graph_subjects(body: &[PatternNode]) -> HashSet<String> {
    let mut subjects = HashSet::new();
    collect_subjects(body, &mut subjects);
    subjects
}

fn collect_subjects(body: &[PatternNode], subjects: &mut HashSet<String>) {
    for node in body {
        match node {
            PatternNode::Basic(_) => {}
            PatternNode::Window { body, .. } => {
                if let Some(PatternNode::Basic(text)) = body.first() {
                    if let Some(subject) = leading_variable(text) {
                        subjects.insert(subject);
                    }
                }
                collect_subjects(body, subjects);
            }
            PatternNode::Union(alternatives) => {
                for alternative in alternatives {
                    collect_subjects(alternative, subjects);
                }
            }
        }
    }
}

fn leading_variable(text: &str) -> Option<String> {
    let rest = text.trim_start().strip_prefix('?')?;
    let name: String = rest
        .chars()
        .take_while(|c| c.is_alphanumeric() || *c == '_')
        .collect();
    (!name.is_empty()).then_some(name)
}

/// The first window block of the body in declaration order, descending into
/// alternatives.
pub fn first_window(body: &[PatternNode]) -> Option<(&str, &PatternBody)> {
    for node in body {
        match node {
            PatternNode::Basic(_) => {}
            PatternNode::Window { name, body } => return Some((name, body)),
            PatternNode::Union(alternatives) => {
                for alternative in alternatives {
                    if let Some(found) = first_window(alternative) {
                        return Some(found);
                    }
                }
            }
        }
    }
    None
}

fn flush_segment(segment: &mut String, nodes: &mut PatternBody) {
    let lines: Vec<&str> = segment
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    if !lines.is_empty() {
        nodes.push(PatternNode::Basic(lines.join("\n")));
    }
    segment.clear();
}

fn block_keyword_at(text: &str, i: usize) -> Option<usize> {
    for keyword in ["WINDOW", "GRAPH"] {
        if keyword_at(text, i, keyword) {
            return Some(keyword.len());
        }
    }
    None
}

// Case-insensitive keyword match. A keyword only counts when it stands alone
// between whitespace and braces, so prefixed names or IRIs that merely contain
// the letters never match.
fn keyword_at(text: &str, i: usize, keyword: &str) -> bool {
    let end = i + keyword.len();
    match text.get(i..end) {
        Some(slice) if slice.eq_ignore_ascii_case(keyword) => {
            let bytes = text.as_bytes();
            let before_ok = i == 0 || is_boundary_byte(bytes[i - 1]);
            let after_ok = end == text.len() || is_boundary_byte(bytes[end]);
            before_ok && after_ok
        }
        _ => false,
    }
}

fn is_boundary_byte(b: u8) -> bool {
    b.is_ascii_whitespace() || b == b'{' || b == b'}'
}

// Reads the block name and the brace-delimited body that follow a WINDOW or
// GRAPH keyword. Returns the name, the inner text and the index just past the
// closing brace.
fn parse_block(text: &str, after_keyword: usize) -> Option<(String, &str, usize)> {
    let bytes = text.as_bytes();
    let mut i = after_keyword;
    while i < text.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    let name_start = i;
    while i < text.len() && !bytes[i].is_ascii_whitespace() && bytes[i] != b'{' {
        i += 1;
    }
    let name = text[name_start..i].to_string();
    if name.is_empty() {
        return None;
    }
    while i < text.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    if i >= text.len() || bytes[i] != b'{' {
        return None;
    }
    let (inner, next) = matched_braces(text, i)?;
    Some((name, inner, next))
}

// Finds the brace matching the one at `open`. Returns the inner text and the
// index just past the closing brace.
pub(crate) fn matched_braces(text: &str, open: usize) -> Option<(&str, usize)> {
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    for i in open..text.len() {
        match bytes[i] {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some((&text[open + 1..i], i + 1));
                }
            }
            _ => {}
        }
    }
    None
}
