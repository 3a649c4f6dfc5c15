//! Which modal is open, and the state of the selects modals populate from
//! the backend.

/// Modals the admin page knows about. The DOM id is what the page markup
/// uses for the modal element.
#[derive(Clone, Debug, Copy, PartialEq, Eq, Hash)]
pub enum ModalKind {
    MediaSelect,
    Blockquote,
    ColoredCode,
    InternalLink,
    NewPost,
    Search,
}

impl ModalKind {
    pub const ALL: [ModalKind; 6] = [
        ModalKind::MediaSelect,
        ModalKind::Blockquote,
        ModalKind::ColoredCode,
        ModalKind::InternalLink,
        ModalKind::NewPost,
        ModalKind::Search,
    ];

    pub fn dom_id(self) -> &'static str {
        match self {
            ModalKind::MediaSelect => "mediaSelectModal",
            ModalKind::Blockquote => "blockquoteModal",
            ModalKind::ColoredCode => "coloredCodeModal",
            ModalKind::InternalLink => "internalLinksModal",
            ModalKind::NewPost => "newPostModal",
            ModalKind::Search => "searchModal",
        }
    }

    pub fn from_dom_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.dom_id() == id)
    }
}

/// A select whose options come from a request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ListState {
    #[default]
    Empty,
    Loading,
    Ready(Vec<String>),
    /// The fetch failed; the select shows `message` as its only option.
    Failed(String),
}

impl ListState {
    pub fn items(&self) -> &[String] {
        match self {
            ListState::Ready(items) => items,
            _ => &[],
        }
    }

    pub fn contains(&self, item: &str) -> bool {
        self.items().iter().any(|i| i == item)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ListState::Failed(_))
    }
}

/// Tracks the single open modal.
#[derive(Clone, Debug, Default)]
pub struct ModalRegistry {
    open: Option<ModalKind>,
}

impl ModalRegistry {
    pub fn open(&mut self, kind: ModalKind) {
        if let Some(previous) = self.open.replace(kind) {
            if previous != kind {
                tracing::debug!(?previous, ?kind, "replacing open modal");
            }
        }
    }

    /// Close `kind` if it is the open modal. Returns whether it was.
    pub fn close(&mut self, kind: ModalKind) -> bool {
        if self.open == Some(kind) {
            self.open = None;
            true
        } else {
            false
        }
    }

    /// Close whatever is open.
    pub fn close_any(&mut self) -> Option<ModalKind> {
        self.open.take()
    }

    pub fn current(&self) -> Option<ModalKind> {
        self.open
    }

    pub fn is_open(&self, kind: ModalKind) -> bool {
        self.open == Some(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_modal_at_a_time() {
        let mut modals = ModalRegistry::default();
        modals.open(ModalKind::Blockquote);
        modals.open(ModalKind::ColoredCode);
        assert!(modals.is_open(ModalKind::ColoredCode));
        assert!(!modals.close(ModalKind::Blockquote));
        assert_eq!(modals.close_any(), Some(ModalKind::ColoredCode));
        assert_eq!(modals.current(), None);
    }

    #[test]
    fn dom_ids_round_trip() {
        for kind in ModalKind::ALL {
            assert_eq!(ModalKind::from_dom_id(kind.dom_id()), Some(kind));
        }
        assert_eq!(ModalKind::from_dom_id("nope"), None);
    }
}
