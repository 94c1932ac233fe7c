//! Property tests for the diff-to-change reduction.

use patched_lsp::diff::compute_change;
use proptest::prelude::*;

fn apply(old: &str, start: usize, end: usize, new_text: &str) -> String {
    format!("{}{}{}", &old[..start], new_text, &old[end..])
}

proptest! {
    #[test]
    fn identical_strings_yield_no_change(s in "\\PC*") {
        prop_assert!(compute_change(&s, &s).is_none());
    }

    #[test]
    fn applying_the_change_reproduces_the_new_string(old in "\\PC*", new in "\\PC*") {
        match compute_change(&old, &new) {
            None => prop_assert_eq!(&old, &new),
            Some(change) => {
                prop_assert!(change.start <= change.end);
                prop_assert!(change.end <= old.len());
                prop_assert!(old.is_char_boundary(change.start));
                prop_assert!(old.is_char_boundary(change.end));
                prop_assert_eq!(apply(&old, change.start, change.end, &change.new_text), new);
            }
        }
    }

    // Word-shaped documents: overlapping vocabulary produces diffs with
    // equal runs interleaved between edits, which is where the reduction
    // has to carry interior text through verbatim.
    #[test]
    fn wordy_documents_round_trip(
        old in "(foo|bar|baz|qux|alpha)( (foo|bar|baz|qux|alpha)){0,15}\n?",
        new in "(foo|bar|baz|qux|alpha)( (foo|bar|baz|qux|alpha)){0,15}\n?",
    ) {
        match compute_change(&old, &new) {
            None => prop_assert_eq!(&old, &new),
            Some(change) => {
                prop_assert_eq!(apply(&old, change.start, change.end, &change.new_text), new);
            }
        }
    }
}
