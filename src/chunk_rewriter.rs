use regex::Regex;

// Representing the chunk rewriter: it rebinds the RANGE and STEP of the
// first window declaration in a query to a new width and slide, leaving
// every other clause untouched.
pub struct ChunkQueryRewriter {
    pub new_slide: i64,
    pub new_width: i64,
}

impl ChunkQueryRewriter {
    pub fn new(new_slide: i64, new_width: i64) -> Self {
        Self {
            new_slide,
            new_width,
        }
    }

    /// Rewrites the first window declaration to the new chunk size.
    pub fn rewrite_with_chunk_size(&self, query: &str) -> String {
        let step_re = Regex::new(r"STEP\s+\d+").unwrap();
        let range_re = Regex::new(r"RANGE\s+\d+").unwrap();
        let rewritten = step_re.replace(query, format!("STEP {}", self.new_slide));
        range_re
            .replace(&rewritten, format!("RANGE {}", self.new_width))
            .into_owned()
    }
}
