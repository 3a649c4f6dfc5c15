//! Storage behind the editor document.
//!
//! Offsets are chars throughout. The textarea and LanguageTool both count
//! UTF-16 code units, so the buffer also converts between the two.

use smol_str::{SmolStr, ToSmolStr};
use std::ops::Range;

pub trait TextBuffer {
    fn len_chars(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len_chars() == 0
    }

    fn insert(&mut self, char_offset: usize, text: &str);

    fn push(&mut self, text: &str) {
        self.insert(self.len_chars(), text);
    }

    fn delete(&mut self, char_range: Range<usize>);

    fn replace(&mut self, char_range: Range<usize>, text: &str) {
        let start = char_range.start;
        self.delete(char_range);
        self.insert(start, text);
    }

    /// Swap in entirely new content, as on load or a widget sync.
    fn set_text(&mut self, text: &str) {
        self.replace(0..self.len_chars(), text);
    }

    /// `None` when the range is reversed or runs past the end.
    fn slice(&self, char_range: Range<usize>) -> Option<SmolStr>;

    fn to_string(&self) -> String;

    /// Clamps to the end of the buffer.
    fn char_to_utf16(&self, char_offset: usize) -> usize;

    /// Clamps to the end of the buffer.
    fn utf16_to_char(&self, utf16_offset: usize) -> usize;
}

/// The editor's buffer: a ropey rope.
#[derive(Clone, Debug, Default)]
pub struct EditorRope(ropey::Rope);

impl EditorRope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_str(s: &str) -> Self {
        Self(ropey::Rope::from_str(s))
    }
}

impl TextBuffer for EditorRope {
    fn len_chars(&self) -> usize {
        self.0.len_chars()
    }

    fn insert(&mut self, char_offset: usize, text: &str) {
        self.0.insert(char_offset, text);
    }

    fn delete(&mut self, char_range: Range<usize>) {
        self.0.remove(char_range);
    }

    fn set_text(&mut self, text: &str) {
        self.0 = ropey::Rope::from_str(text);
    }

    fn slice(&self, char_range: Range<usize>) -> Option<SmolStr> {
        let valid = char_range.start <= char_range.end && char_range.end <= self.len_chars();
        valid.then(|| self.0.slice(char_range).to_smolstr())
    }

    fn to_string(&self) -> String {
        self.0.to_string()
    }

    fn char_to_utf16(&self, char_offset: usize) -> usize {
        self.0.char_to_utf16_cu(char_offset.min(self.0.len_chars()))
    }

    fn utf16_to_char(&self, utf16_offset: usize) -> usize {
        self.0.utf16_cu_to_char(utf16_offset.min(self.0.len_utf16_cu()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edits_in_chars() {
        let mut rope = EditorRope::from_str("ä draft");
        rope.insert(1, "b");
        assert_eq!(rope.to_string(), "äb draft");
        rope.replace(3..8, "post");
        assert_eq!(rope.to_string(), "äb post");
        rope.delete(0..3);
        rope.push("!");
        assert_eq!(rope.to_string(), "post!");
        rope.set_text("");
        assert!(rope.is_empty());
    }

    #[test]
    fn slice_rejects_bad_ranges() {
        let rope = EditorRope::from_str("hello");
        assert_eq!(rope.slice(1..4).as_deref(), Some("ell"));
        assert_eq!(rope.slice(2..9), None);
        #[allow(clippy::reversed_empty_ranges)]
        let reversed = 4..1;
        assert_eq!(rope.slice(reversed), None);
    }

    #[test]
    fn utf16_offsets_round_trip_through_surrogates() {
        // One char, two UTF-16 code units.
        let rope = EditorRope::from_str("a\u{1F600}b");
        assert_eq!(rope.char_to_utf16(2), 3);
        assert_eq!(rope.utf16_to_char(3), 2);
        assert_eq!(rope.char_to_utf16(3), 4);
        assert_eq!(rope.utf16_to_char(99), 3);
    }
}
