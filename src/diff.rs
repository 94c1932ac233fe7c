//! Reduction of a text diff to a single contiguous replacement.
//!
//! Editors want one minimal edit rather than a full patch, so that applying a
//! fix disturbs cursor position, selection, and undo history as little as
//! possible. This module diffs original against fixed content and collapses
//! all differences into one replacement span in the original's coordinates.

use similar::{ChangeTag, TextDiff};

/// A single contiguous replacement in the original text.
///
/// `start` and `end` are byte offsets into the original string, with
/// `start <= end <= original.len()`, both on `char` boundaries. Replacing
/// `original[start..end]` with `new_text` yields the fixed content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    pub start: usize,
    pub end: usize,
    pub new_text: String,
}

/// Compute the minimal contiguous replacement turning `old` into `new`.
///
/// Returns `None` when the strings are identical. Multiple disjoint edit
/// regions are merged into one span from the first difference to the last;
/// equal text bracketed by edits on both sides is carried verbatim in
/// `new_text`.
///
/// The diff runs at word granularity. The exact chunking only moves where
/// `start`/`end` land between equivalent answers; the contract is that
/// applying the change reproduces `new` exactly.
pub fn compute_change(old: &str, new: &str) -> Option<Change> {
    let diff = TextDiff::from_words(old, new);

    // Cursor into `old` coordinates.
    let mut current = 0usize;
    let mut start: Option<usize> = None;
    let mut end = 0usize;
    let mut new_text = String::new();
    // Equal text seen after the change started. It only becomes part of the
    // replacement if another edit follows it; trailing equal text is dropped.
    let mut remain = String::new();

    for change in diff.iter_all_changes() {
        let value = change.value();
        match change.tag() {
            ChangeTag::Equal => {
                if start.is_some() {
                    remain.push_str(value);
                }
                current += value.len();
            }
            ChangeTag::Delete => {
                if start.is_none() {
                    start = Some(current);
                }
                new_text.push_str(&remain);
                remain.clear();
                current += value.len();
                end = current;
            }
            ChangeTag::Insert => {
                if start.is_none() {
                    start = Some(current);
                }
                new_text.push_str(&remain);
                remain.clear();
                new_text.push_str(value);
                end = current;
            }
        }
    }

    start.map(|start| Change { start, end, new_text })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn apply(old: &str, change: &Change) -> String {
        format!("{}{}{}", &old[..change.start], change.new_text, &old[change.end..])
    }

    #[test]
    fn identical_strings_produce_no_change() {
        assert_eq!(compute_change("", ""), None);
        assert_eq!(compute_change("hello world", "hello world"), None);
        assert_eq!(compute_change("a\nb\nc\n", "a\nb\nc\n"), None);
    }

    #[test]
    fn insertion_between_words() {
        let change = compute_change("hello world", "hello brave world").unwrap();
        assert_eq!(
            change,
            Change {
                start: 6,
                end: 6,
                new_text: "brave ".to_string(),
            }
        );
        assert_eq!(apply("hello world", &change), "hello brave world");
    }

    #[test]
    fn insertion_at_end() {
        let change = compute_change("abc", "abc def").unwrap();
        assert_eq!(apply("abc", &change), "abc def");
    }

    #[test]
    fn deletion_only() {
        let old = "let x = 5;;";
        let new = "let x = 5;";
        let change = compute_change(old, new).unwrap();
        assert_eq!(apply(old, &change), new);
        assert!(change.start <= change.end);
    }

    #[test]
    fn empty_to_content_and_back() {
        let change = compute_change("", "x").unwrap();
        assert_eq!(
            change,
            Change {
                start: 0,
                end: 0,
                new_text: "x".to_string(),
            }
        );

        let change = compute_change("x", "").unwrap();
        assert_eq!(
            change,
            Change {
                start: 0,
                end: 1,
                new_text: String::new(),
            }
        );
    }

    #[test]
    fn disjoint_edits_merge_into_one_span() {
        let old = "one two three four";
        let new = "one TWO three FOUR";
        let change = compute_change(old, new).unwrap();
        // Everything from the first to the last difference is one span, and
        // the untouched "three" in the middle survives verbatim.
        assert_eq!(change.start, 4);
        assert_eq!(change.end, old.len());
        assert_eq!(change.new_text, "TWO three FOUR");
        assert_eq!(apply(old, &change), new);
    }

    #[test]
    fn equal_run_bracketed_by_replacements_round_trips() {
        let old = "aa XX bb YY cc";
        let new = "aa ZZ bb WW cc";
        let change = compute_change(old, new).unwrap();
        assert_eq!(apply(old, &change), new);
        assert!(change.new_text.contains("bb"));
    }

    #[test]
    fn multiline_fix() {
        let old = "fn main() {\n    let x=1;\n}\n";
        let new = "fn main() {\n    let x = 1;\n}\n";
        let change = compute_change(old, new).unwrap();
        assert_eq!(apply(old, &change), new);
    }

    #[test]
    fn offsets_are_byte_offsets_on_char_boundaries() {
        let old = "héllo wörld";
        let new = "héllo brave wörld";
        let change = compute_change(old, new).unwrap();
        assert!(old.is_char_boundary(change.start));
        assert!(old.is_char_boundary(change.end));
        assert_eq!(apply(old, &change), new);
    }

    #[test]
    fn whole_string_replaced() {
        let old = "completely different";
        let new = "nothing in common!";
        let change = compute_change(old, new).unwrap();
        assert_eq!(apply(old, &change), new);
    }
}
