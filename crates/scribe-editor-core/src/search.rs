//! Find and replace over the document. Matches become the selection.

use std::ops::Range;

use crate::document::EditorDocument;
use crate::text::TextBuffer;
use crate::types::Selection;

/// Char ranges of every non-overlapping occurrence of `query`.
pub fn find_all(haystack: &str, query: &str) -> Vec<Range<usize>> {
    if query.is_empty() {
        return Vec::new();
    }
    let query_chars = query.chars().count();
    let mut out = Vec::new();
    let mut chars_before = 0;
    let mut last_byte = 0;
    for (byte, _) in haystack.match_indices(query) {
        chars_before += haystack[last_byte..byte].chars().count();
        out.push(chars_before..chars_before + query_chars);
        chars_before += query_chars;
        last_byte = byte + query.len();
    }
    out
}

impl<T: TextBuffer> EditorDocument<T> {
    /// Select the next match after the selection or cursor, wrapping to the
    /// start of the document.
    pub fn find_next(&mut self, query: &str) -> Option<Range<usize>> {
        let matches = find_all(&self.content(), query);
        let from = self
            .selection()
            .map(|sel| sel.end())
            .unwrap_or(self.cursor().offset);
        let hit = matches
            .iter()
            .find(|m| m.start >= from)
            .or_else(|| matches.first())
            .cloned()?;
        self.set_selection(Selection::from(hit.clone()));
        Some(hit)
    }

    /// Select the previous match before the selection or cursor, wrapping
    /// to the end of the document.
    pub fn find_prev(&mut self, query: &str) -> Option<Range<usize>> {
        let matches = find_all(&self.content(), query);
        let before = self
            .selection()
            .map(|sel| sel.start())
            .unwrap_or(self.cursor().offset);
        let hit = matches
            .iter()
            .rev()
            .find(|m| m.end <= before)
            .or_else(|| matches.last())
            .cloned()?;
        self.set_selection(Selection::from(hit.clone()));
        Some(hit)
    }

    /// Replace every occurrence of `query`. Returns how many were replaced.
    pub fn replace_all(&mut self, query: &str, replacement: &str) -> usize {
        let matches = find_all(&self.content(), query);
        // Back to front so earlier ranges stay valid.
        for range in matches.iter().rev() {
            self.replace(range.clone(), replacement);
        }
        if !matches.is_empty() {
            self.clear_selection();
            tracing::debug!(count = matches.len(), "replaced matches");
        }
        matches.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Affinity;

    fn doc(content: &str) -> EditorDocument {
        let mut doc = EditorDocument::new();
        doc.load(content, None);
        doc
    }

    #[test]
    fn find_all_counts_chars_not_bytes() {
        assert_eq!(find_all("äb äb", "b"), vec![1..2, 4..5]);
        assert!(find_all("abc", "").is_empty());
    }

    #[test]
    fn find_next_wraps() {
        let mut d = doc("cat dog cat");
        assert_eq!(d.find_next("cat"), Some(0..3));
        assert_eq!(d.find_next("cat"), Some(8..11));
        assert_eq!(d.find_next("cat"), Some(0..3));
        assert_eq!(d.selected_text().as_deref(), Some("cat"));
        assert_eq!(d.find_next("bird"), None);
    }

    #[test]
    fn find_prev_wraps() {
        let mut d = doc("cat dog cat");
        d.place_cursor(5, Affinity::Before);
        assert_eq!(d.find_prev("cat"), Some(0..3));
        assert_eq!(d.find_prev("cat"), Some(8..11));
    }

    #[test]
    fn replace_all_marks_dirty() {
        let mut d = doc("a-b-c");
        assert_eq!(d.replace_all("-", "+"), 2);
        assert_eq!(d.content(), "a+b+c");
        assert!(d.is_dirty());
        assert_eq!(d.replace_all("x", "y"), 0);
    }

    #[test]
    fn empty_query_is_a_no_op() {
        let mut d = doc("abc");
        assert_eq!(d.find_next(""), None);
        assert_eq!(d.replace_all("", "x"), 0);
        assert!(!d.is_dirty());
    }
}
