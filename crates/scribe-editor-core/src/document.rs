//! The edited document: buffer, cursor, selection, active file and dirty flag.

use std::ops::Range;

use scribe_common::FileReference;
use smol_str::SmolStr;

use crate::text::{EditorRope, TextBuffer};
use crate::types::{Affinity, CursorState, Selection};

/// Placeholder token in toolbar templates that wraps the current selection.
pub const SELECTION_PLACEHOLDER: &str = "text";

/// Where [`EditorDocument::insert_at_cursor_or_selection`] put its text.
#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub enum InsertPlacement {
    ReplacedSelection,
    AtCursor,
    /// No cursor placement yet: appended after a newline at the end.
    AppendedAtEnd,
}

/// Result of an insertion, for the view to sync caret and scroll.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InsertOutcome {
    /// Char range now occupied by the inserted text.
    pub range: Range<usize>,
    pub placement: InsertPlacement,
}

impl InsertOutcome {
    /// The view should scroll to the end of the document.
    pub fn scroll_to_end(&self) -> bool {
        self.placement == InsertPlacement::AppendedAtEnd
    }
}

/// A loaded (or empty) markdown document.
///
/// Every content mutation sets the dirty flag and bumps `revision`; loading
/// and confirmed saves clear it.
#[derive(Clone, Default)]
pub struct EditorDocument<T: TextBuffer = EditorRope> {
    buffer: T,
    cursor: CursorState,
    selection: Option<Selection>,
    file: Option<FileReference>,
    dirty: bool,
    revision: u64,
}

impl<T: TextBuffer + Default> EditorDocument<T> {
    pub fn new() -> Self {
        Self {
            buffer: T::default(),
            cursor: CursorState::default(),
            selection: None,
            file: None,
            dirty: false,
            revision: 0,
        }
    }
}

impl<T: TextBuffer> EditorDocument<T> {
    pub fn with_buffer(buffer: T) -> Self {
        Self {
            buffer,
            cursor: CursorState::default(),
            selection: None,
            file: None,
            dirty: false,
            revision: 0,
        }
    }

    pub fn buffer(&self) -> &T {
        &self.buffer
    }

    pub fn content(&self) -> String {
        self.buffer.to_string()
    }

    pub fn len_chars(&self) -> usize {
        self.buffer.len_chars()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Monotonic counter bumped on every content change, including loads.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn file(&self) -> Option<&FileReference> {
        self.file.as_ref()
    }

    pub fn cursor(&self) -> CursorState {
        self.cursor
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    /// Text of the current selection, if it is non-empty.
    pub fn selected_text(&self) -> Option<SmolStr> {
        let sel = self.selection.filter(|s| !s.is_collapsed())?;
        self.buffer.slice(sel.range())
    }

    /// Replace the buffer wholesale. The document is clean afterwards and
    /// the cursor loses its placement.
    pub fn load(&mut self, content: &str, file: Option<FileReference>) {
        self.buffer.set_text(content);
        self.file = file;
        self.cursor = CursorState::default();
        self.selection = None;
        self.dirty = false;
        self.revision += 1;
        tracing::debug!(file = ?self.file, chars = self.buffer.len_chars(), "document loaded");
    }

    /// Clear the dirty flag after a save of `revision` succeeded. Returns
    /// false (and stays dirty) if the document changed in the meantime.
    pub fn mark_saved(&mut self, revision: u64) -> bool {
        if revision != self.revision {
            tracing::debug!(saved = revision, current = self.revision, "edited during save");
            return false;
        }
        self.dirty = false;
        true
    }

    /// Record a user cursor placement from the view.
    pub fn place_cursor(&mut self, offset: usize, affinity: Affinity) {
        self.cursor = CursorState::placed(offset.min(self.len_chars()), affinity);
    }

    /// Record the view's selection. A collapsed selection places the cursor.
    pub fn set_selection(&mut self, selection: Selection) {
        let sel = selection.clamp(self.len_chars());
        self.cursor = CursorState::placed(sel.head, Affinity::Before);
        self.selection = if sel.is_collapsed() { None } else { Some(sel) };
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    pub fn insert(&mut self, offset: usize, text: &str) {
        self.buffer.insert(offset.min(self.len_chars()), text);
        self.mark_edited();
    }

    pub fn replace(&mut self, range: Range<usize>, text: &str) {
        let len = self.len_chars();
        let range = range.start.min(len)..range.end.min(len);
        self.buffer.replace(range, text);
        self.mark_edited();
    }

    pub fn delete(&mut self, range: Range<usize>) {
        self.replace(range, "");
    }

    /// Take the full text the widget now shows after a user edit.
    /// Returns true if it differed from the buffer.
    pub fn sync_from_widget(&mut self, text: &str) -> bool {
        if self.buffer.to_string() == text {
            return false;
        }
        self.buffer.set_text(text);
        let len = self.len_chars();
        self.cursor.offset = self.cursor.offset.min(len);
        self.selection = self.selection.map(|s| s.clamp(len));
        self.mark_edited();
        true
    }

    /// The single insertion primitive every inserter goes through.
    ///
    /// A non-empty selection is replaced; without a placed cursor the text
    /// is appended on a new line at the end; otherwise it goes in at the
    /// cursor, which moves past it.
    pub fn insert_at_cursor_or_selection(&mut self, text: &str) -> InsertOutcome {
        let text_len = text.chars().count();

        if let Some(sel) = self.selection.filter(|s| !s.is_collapsed()) {
            let start = sel.start();
            self.buffer.replace(sel.range(), text);
            self.selection = None;
            self.cursor.offset = start + text_len;
            self.mark_edited();
            return InsertOutcome {
                range: start..start + text_len,
                placement: InsertPlacement::ReplacedSelection,
            };
        }

        if !self.cursor.is_placed() {
            self.buffer.push("\n");
            let start = self.len_chars();
            self.buffer.push(text);
            self.mark_edited();
            return InsertOutcome {
                range: start..start + text_len,
                placement: InsertPlacement::AppendedAtEnd,
            };
        }

        let start = self.cursor.offset.min(self.len_chars());
        self.buffer.insert(start, text);
        self.cursor.offset = start + text_len;
        self.mark_edited();
        InsertOutcome {
            range: start..start + text_len,
            placement: InsertPlacement::AtCursor,
        }
    }

    /// Insert a toolbar template, wrapping the selection if there is one:
    /// the first `text` placeholder in `template` becomes the selected text.
    pub fn insert_template(&mut self, template: &str) -> InsertOutcome {
        match self.selected_text() {
            Some(selected) => {
                let wrapped = template.replacen(SELECTION_PLACEHOLDER, &selected, 1);
                self.insert_at_cursor_or_selection(&wrapped)
            }
            None => self.insert_at_cursor_or_selection(template),
        }
    }

    fn mark_edited(&mut self) {
        self.dirty = true;
        self.revision += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(content: &str) -> EditorDocument {
        let mut doc = EditorDocument::new();
        doc.load(content, Some(FileReference::new("en", "post1.md")));
        doc
    }

    #[test]
    fn load_is_clean_and_edits_are_dirty() {
        let mut doc = loaded("# Title\n");
        assert!(!doc.is_dirty());
        doc.insert(0, "x");
        assert!(doc.is_dirty());
        doc.load("fresh", None);
        assert!(!doc.is_dirty());
        assert!(doc.file().is_none());
    }

    #[test]
    fn insert_without_placement_appends_on_new_line() {
        let mut doc = loaded("abc");
        let outcome = doc.insert_at_cursor_or_selection("**bold**");
        assert_eq!(doc.content(), "abc\n**bold**");
        assert_eq!(outcome.range, 4..12);
        assert!(outcome.scroll_to_end());
    }

    #[test]
    fn insert_at_placed_cursor() {
        let mut doc = loaded("abcdef");
        doc.place_cursor(3, Affinity::Before);
        let outcome = doc.insert_at_cursor_or_selection("XY");
        assert_eq!(doc.content(), "abcXYdef");
        assert_eq!(outcome.placement, InsertPlacement::AtCursor);
        assert_eq!(doc.cursor().offset, 5);
        assert!(!outcome.scroll_to_end());
    }

    #[test]
    fn insert_replaces_selection() {
        let mut doc = loaded("hello world");
        doc.set_selection(Selection::new(6, 11));
        let outcome = doc.insert_at_cursor_or_selection("rust");
        assert_eq!(doc.content(), "hello rust");
        assert_eq!(outcome.placement, InsertPlacement::ReplacedSelection);
        assert!(doc.selection().is_none());
    }

    #[test]
    fn template_wraps_selection() {
        let mut doc = loaded("make me bold");
        doc.set_selection(Selection::new(8, 12));
        doc.insert_template("**text**");
        assert_eq!(doc.content(), "make me **bold**");
    }

    #[test]
    fn template_without_selection_is_inserted_verbatim() {
        let mut doc = loaded("");
        doc.place_cursor(0, Affinity::Before);
        doc.insert_template("**text**");
        assert_eq!(doc.content(), "**text**");
    }

    #[test]
    fn collapsed_selection_only_places_cursor() {
        let mut doc = loaded("abc");
        doc.set_selection(Selection::collapsed(1));
        assert!(doc.selection().is_none());
        assert!(doc.cursor().is_placed());
        assert_eq!(doc.cursor().offset, 1);
    }

    #[test]
    fn save_confirmation_respects_later_edits() {
        let mut doc = loaded("abc");
        doc.insert(3, "d");
        let rev = doc.revision();
        assert!(doc.mark_saved(rev));
        assert!(!doc.is_dirty());

        doc.insert(0, "x");
        let rev = doc.revision();
        doc.insert(0, "y");
        assert!(!doc.mark_saved(rev));
        assert!(doc.is_dirty());
    }

    #[test]
    fn widget_sync_only_dirties_on_change() {
        let mut doc = loaded("same");
        assert!(!doc.sync_from_widget("same"));
        assert!(!doc.is_dirty());
        assert!(doc.sync_from_widget("changed"));
        assert!(doc.is_dirty());
    }
}
