//! Core editor types: cursor, selection, and user-facing notices.

use std::ops::Range;

/// Cursor state including position and placement affinity.
#[derive(Clone, Debug, Copy, PartialEq, Eq, Default)]
pub struct CursorState {
    /// In chars.
    pub offset: usize,

    /// Which side of the offset the user last placed the cursor on.
    ///
    /// `None` means the user has not placed the cursor since the document
    /// was loaded; inserts then go to the end of the document.
    pub affinity: Option<Affinity>,
}

impl CursorState {
    /// A cursor at `offset` with no placement context.
    pub fn new(offset: usize) -> Self {
        Self {
            offset,
            affinity: None,
        }
    }

    /// A cursor the user explicitly placed.
    pub fn placed(offset: usize, affinity: Affinity) -> Self {
        Self {
            offset,
            affinity: Some(affinity),
        }
    }

    pub fn is_placed(&self) -> bool {
        self.affinity.is_some()
    }
}

/// Cursor affinity at a boundary.
#[derive(Clone, Debug, Copy, PartialEq, Eq, Default)]
pub enum Affinity {
    #[default]
    Before,
    After,
}

/// A char range the user selected. `head` is the end the caret sits on
/// and may come before `anchor` for a backward selection.
#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub struct Selection {
    pub anchor: usize,
    pub head: usize,
}

impl Selection {
    pub fn new(anchor: usize, head: usize) -> Self {
        Self { anchor, head }
    }

    pub fn collapsed(offset: usize) -> Self {
        Self {
            anchor: offset,
            head: offset,
        }
    }

    pub fn start(&self) -> usize {
        self.anchor.min(self.head)
    }

    pub fn end(&self) -> usize {
        self.anchor.max(self.head)
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.head
    }

    pub fn len(&self) -> usize {
        self.end() - self.start()
    }

    pub fn is_empty(&self) -> bool {
        self.is_collapsed()
    }

    /// Ordered char range covered by the selection.
    pub fn range(&self) -> Range<usize> {
        self.start()..self.end()
    }

    /// Clamp both ends to `len`.
    pub fn clamp(self, len: usize) -> Self {
        Self {
            anchor: self.anchor.min(len),
            head: self.head.min(len),
        }
    }
}

impl From<Range<usize>> for Selection {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

/// Severity of a [`Notice`].
#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A message for the user, queued by the controller and shown by the UI.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}
