//! Bridge between the editor `<textarea>` and the document.
//!
//! The textarea reports selections in UTF-16 code units; the document works
//! in chars. Conversions go through the document's buffer.

use std::ops::Range;

use scribe_editor_core::{EditorDocument, InsertOutcome, Selection, TextBuffer};
use wasm_bindgen::JsValue;
use web_sys::HtmlTextAreaElement;

use crate::dom::{self, ids};

pub fn editor() -> Option<HtmlTextAreaElement> {
    dom::by_id(ids::EDITOR)
}

/// Copy the textarea's selection into the document, placing the cursor.
pub fn read_selection(area: &HtmlTextAreaElement, doc: &mut EditorDocument) {
    let (Ok(Some(start)), Ok(Some(end))) = (area.selection_start(), area.selection_end()) else {
        return;
    };
    let buffer = doc.buffer();
    let start = buffer.utf16_to_char(start as usize);
    let end = buffer.utf16_to_char(end as usize);
    let backward = area
        .selection_direction()
        .ok()
        .flatten()
        .is_some_and(|d| d == "backward");
    let selection = if backward {
        Selection::new(end, start)
    } else {
        Selection::new(start, end)
    };
    doc.set_selection(selection);
}

/// Write the document into the textarea if it shows something else.
/// Returns true if the value was replaced.
pub fn write_content(area: &HtmlTextAreaElement, doc: &EditorDocument) -> bool {
    let content = doc.content();
    if area.value() == content {
        return false;
    }
    area.set_value(&content);
    true
}

/// Select `range` (chars) in the textarea.
pub fn select(area: &HtmlTextAreaElement, doc: &EditorDocument, range: Range<usize>) -> Result<(), JsValue> {
    let buffer = doc.buffer();
    let start = buffer.char_to_utf16(range.start) as u32;
    let end = buffer.char_to_utf16(range.end) as u32;
    area.set_selection_range(start, end)?;
    area.focus()
}

/// Show an insertion: refresh the value, put the caret after the inserted
/// text and scroll to it when it went to the end.
pub fn apply_insert(area: &HtmlTextAreaElement, doc: &EditorDocument, outcome: &InsertOutcome) {
    write_content(area, doc);
    let end = outcome.range.end;
    if let Err(e) = select(area, doc, end..end) {
        tracing::warn!("could not place caret: {:?}", e);
    }
    if outcome.scroll_to_end() {
        area.set_scroll_top(area.scroll_height());
    }
}
