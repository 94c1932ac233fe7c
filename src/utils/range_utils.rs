//! Utilities for offset/position conversions

use tower_lsp::lsp_types::Position;

/// Maps byte offsets in a document to LSP positions.
///
/// LSP positions count lines from zero and columns in UTF-16 code units
/// within the line, which is what editors expect by default.
#[derive(Debug)]
pub struct LineIndex {
    line_starts: Vec<usize>,
    content: String,
}

impl LineIndex {
    pub fn new(content: String) -> Self {
        let mut line_starts = vec![0];
        let mut pos = 0;

        for c in content.chars() {
            pos += c.len_utf8();
            if c == '\n' {
                line_starts.push(pos);
            }
        }

        Self { line_starts, content }
    }

    /// Convert a byte offset into a zero-based LSP position.
    ///
    /// Offsets past the end of the content clamp to the end.
    pub fn offset_to_position(&self, offset: usize) -> Position {
        let offset = offset.min(self.content.len());
        let line = self.line_starts.partition_point(|&start| start <= offset) - 1;
        let line_start = self.line_starts[line];
        let character = self.content[line_start..offset].encode_utf16().count();

        Position {
            line: line as u32,
            character: character as u32,
        }
    }

    /// Get a reference to the content
    pub fn content(&self) -> &str {
        &self.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(line: u32, character: u32) -> Position {
        Position { line, character }
    }

    #[test]
    fn offsets_within_a_single_line() {
        let index = LineIndex::new("hello world".to_string());
        assert_eq!(index.offset_to_position(0), pos(0, 0));
        assert_eq!(index.offset_to_position(6), pos(0, 6));
        assert_eq!(index.offset_to_position(11), pos(0, 11));
    }

    #[test]
    fn offsets_across_lines() {
        let index = LineIndex::new("ab\ncd\nef".to_string());
        assert_eq!(index.offset_to_position(2), pos(0, 2)); // the \n itself
        assert_eq!(index.offset_to_position(3), pos(1, 0));
        assert_eq!(index.offset_to_position(5), pos(1, 2));
        assert_eq!(index.offset_to_position(6), pos(2, 0));
        assert_eq!(index.offset_to_position(8), pos(2, 2));
    }

    #[test]
    fn offset_past_end_clamps() {
        let index = LineIndex::new("abc".to_string());
        assert_eq!(index.offset_to_position(100), pos(0, 3));
    }

    #[test]
    fn columns_count_utf16_code_units() {
        // é is 2 UTF-8 bytes but 1 UTF-16 unit; 😀 is 4 bytes and 2 units.
        let index = LineIndex::new("é😀x".to_string());
        assert_eq!(index.offset_to_position(2), pos(0, 1));
        assert_eq!(index.offset_to_position(6), pos(0, 3));
        assert_eq!(index.offset_to_position(7), pos(0, 4));
    }

    #[test]
    fn empty_content() {
        let index = LineIndex::new(String::new());
        assert_eq!(index.offset_to_position(0), pos(0, 0));
    }
}
