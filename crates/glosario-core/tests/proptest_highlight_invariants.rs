//! Property-based invariant tests for the highlighter.
//!
//! 1. Empty query returns the text unchanged.
//! 2. Segment texts concatenate back to the input for any literal query,
//!    including regex metacharacters.
//! 3. Every marked segment equals the query under case folding.
//! 4. No plain segment contains a match the highlighter missed.

use glosario_core::{Highlighter, QueryMatcher, highlight};
use proptest::prelude::*;

const ALPHABET: [char; 16] = [
    'a', 'A', 'b', 'ñ', 'Ñ', ' ', '.', '*', '(', ')', '$', '^', '\\', '[', '<', '&',
];

fn text(max: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(ALPHABET.to_vec()), 0..max)
        .prop_map(|chars| chars.into_iter().collect())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn empty_query_is_identity(s in any::<String>()) {
        let h = highlight(&s, "");
        prop_assert!(!h.has_marks());
        prop_assert_eq!(h.to_plain_string(), s);
    }

    #[test]
    fn segments_reassemble_input(s in text(40), q in text(4)) {
        let h = highlight(&s, &q);
        prop_assert_eq!(h.to_plain_string(), s);
        prop_assert!(h.segments().iter().all(|seg| !seg.text.is_empty()));
    }

    #[test]
    fn arbitrary_unicode_reassembles(s in any::<String>(), q in any::<String>()) {
        prop_assert_eq!(highlight(&s, &q).to_plain_string(), s);
    }

    #[test]
    fn marked_segments_equal_query_ignoring_case(s in text(40), q in text(4)) {
        let h = Highlighter::new(&q);
        for seg in h.highlight(&s).segments().iter().filter(|seg| seg.marked) {
            prop_assert_eq!(seg.text.to_lowercase(), q.to_lowercase());
        }
    }

    #[test]
    fn plain_segments_hold_no_match(s in text(40), q in text(4)) {
        prop_assume!(!q.is_empty());
        let matcher = QueryMatcher::new(&q);
        for seg in highlight(&s, &q).segments().iter().filter(|seg| !seg.marked) {
            prop_assert!(!matcher.accepts(&seg.text), "missed match in {:?}", seg.text);
        }
    }
}
