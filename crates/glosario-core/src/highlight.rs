#![forbid(unsafe_code)]

//! Match highlighting as structured data.
//!
//! [`HighlightedText`] is a run of [`Segment`]s, each either plain or marked.
//! It carries raw (unescaped) text; turning it into markup is the job of the
//! rendering adapter, which escapes every segment once and wraps marked
//! segments afterwards.
//!
//! # Invariant
//!
//! Concatenating the segment texts always yields the input text, byte for
//! byte. No segment is empty, two plain segments are never adjacent, and each
//! query occurrence gets its own marked segment.

use crate::matcher::QueryMatcher;

/// A contiguous piece of text, marked when it is a query match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub marked: bool,
}

impl Segment {
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            marked: false,
        }
    }

    #[must_use]
    pub fn marked(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            marked: true,
        }
    }
}

/// Text split into plain and marked segments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighlightedText {
    segments: Vec<Segment>,
}

impl HighlightedText {
    /// Unmarked text.
    #[must_use]
    pub fn plain(text: &str) -> Self {
        let mut out = Self::default();
        out.push(text, false);
        out
    }

    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[must_use]
    pub fn has_marks(&self) -> bool {
        self.segments.iter().any(|s| s.marked)
    }

    #[must_use]
    pub fn mark_count(&self) -> usize {
        self.segments.iter().filter(|s| s.marked).count()
    }

    /// The original text with markers removed.
    #[must_use]
    pub fn to_plain_string(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }

    fn push(&mut self, text: &str, marked: bool) {
        if text.is_empty() {
            return;
        }
        match self.segments.last_mut() {
            Some(last) if !last.marked && !marked => last.text.push_str(text),
            _ => self.segments.push(Segment {
                text: text.to_owned(),
                marked,
            }),
        }
    }
}

/// Highlights many texts against one compiled query.
#[derive(Debug, Clone, Default)]
pub struct Highlighter {
    matcher: QueryMatcher,
}

impl Highlighter {
    #[must_use]
    pub fn new(query: &str) -> Self {
        Self::with_matcher(QueryMatcher::new(query))
    }

    #[must_use]
    pub fn with_matcher(matcher: QueryMatcher) -> Self {
        Self { matcher }
    }

    #[must_use]
    pub fn matcher(&self) -> &QueryMatcher {
        &self.matcher
    }

    #[must_use]
    pub fn query(&self) -> &str {
        self.matcher.query()
    }

    /// Mark every non-overlapping, case-insensitive occurrence of the query.
    ///
    /// With an empty query the text comes back as a single plain segment.
    #[must_use]
    pub fn highlight(&self, text: &str) -> HighlightedText {
        let mut out = HighlightedText::default();
        let mut cursor = 0;
        for range in self.matcher.find_ranges(text) {
            out.push(&text[cursor..range.start], false);
            out.push(&text[range.clone()], true);
            cursor = range.end;
        }
        out.push(&text[cursor..], false);
        out
    }
}

/// One-shot highlight; prefer [`Highlighter`] when marking several texts.
#[must_use]
pub fn highlight(text: &str, query: &str) -> HighlightedText {
    Highlighter::new(query).highlight(text)
}
