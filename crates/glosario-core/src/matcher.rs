#![forbid(unsafe_code)]

//! Literal, case-insensitive query matching.
//!
//! The query is always treated as plain text: it is escaped before it reaches
//! the regex engine, so `.`, `*`, `(`, `$` and friends match themselves. Case
//! folding is Unicode-aware (`"ÉXITO"` matches `"éxito"`).
//!
//! One [`QueryMatcher`] is compiled per query and shared by the filter pass
//! and the highlighter, so a term is listed exactly when something in it can
//! be highlighted.

use std::ops::Range;

use regex::{Regex, RegexBuilder};
use tracing::debug;

/// Compiled-size ceiling for a query pattern. Longer queries are scanned
/// without the regex engine.
const PATTERN_SIZE_LIMIT: usize = 1 << 22;

/// A compiled search query.
#[derive(Debug, Clone, Default)]
pub enum QueryMatcher {
    /// Empty query: everything passes, nothing is marked.
    #[default]
    Empty,
    /// Non-empty query compiled as a literal pattern.
    Literal { query: String, pattern: Regex },
    /// Query too large to compile, matched by a per-char lowercase scan.
    Folded { query: String, folded: Vec<char> },
}

impl QueryMatcher {
    #[must_use]
    pub fn new(query: &str) -> Self {
        if query.is_empty() {
            return Self::Empty;
        }
        let built = RegexBuilder::new(&regex::escape(query))
            .case_insensitive(true)
            .size_limit(PATTERN_SIZE_LIMIT)
            .build();
        match built {
            Ok(pattern) => Self::Literal {
                query: query.to_owned(),
                pattern,
            },
            Err(err) => {
                debug!(query_len = query.len(), error = %err, "query not compiled, using folded scan");
                Self::folded(query)
            }
        }
    }

    fn folded(query: &str) -> Self {
        Self::Folded {
            query: query.to_owned(),
            folded: query.chars().map(fold_char).collect(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// The original query text (empty for [`QueryMatcher::Empty`]).
    #[must_use]
    pub fn query(&self) -> &str {
        match self {
            Self::Empty => "",
            Self::Literal { query, .. } | Self::Folded { query, .. } => query,
        }
    }

    /// Whether `text` passes the query. An empty query accepts everything.
    #[must_use]
    pub fn accepts(&self, text: &str) -> bool {
        match self {
            Self::Empty => true,
            Self::Literal { pattern, .. } => pattern.is_match(text),
            Self::Folded { folded, .. } => !folded_ranges(folded, text, true).is_empty(),
        }
    }

    /// Byte ranges of all non-overlapping matches, left to right.
    ///
    /// Always empty for an empty query.
    #[must_use]
    pub fn find_ranges(&self, text: &str) -> Vec<Range<usize>> {
        match self {
            Self::Empty => Vec::new(),
            Self::Literal { pattern, .. } => pattern.find_iter(text).map(|m| m.range()).collect(),
            Self::Folded { folded, .. } => folded_ranges(folded, text, false),
        }
    }
}

/// Single-char lowercase; chars whose lowercase form is longer stay as they are.
fn fold_char(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}

fn folded_ranges(folded: &[char], text: &str, first_only: bool) -> Vec<Range<usize>> {
    let mut ranges = Vec::new();
    let n = folded.len();
    if n == 0 {
        return ranges;
    }
    let offsets: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
    let keys: Vec<char> = text.chars().map(fold_char).collect();
    let mut start = 0;
    while start + n <= keys.len() {
        if keys[start..start + n] == *folded {
            let end = offsets.get(start + n).copied().unwrap_or(text.len());
            ranges.push(offsets[start]..end);
            if first_only {
                break;
            }
            start += n;
        } else {
            start += 1;
        }
    }
    ranges
}
