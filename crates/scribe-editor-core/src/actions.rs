//! Declarative mapping from page controls to editor actions.
//!
//! The admin page tags its buttons with `data-action="<name>"`. The
//! platform layer attaches one delegated listener and resolves names
//! through [`EditorAction::from_name`]; toolbar buttons carry
//! `data-shortcode` instead and go through the toolbar.

/// All actions a page control can trigger.
///
/// These are semantic operations, decoupled from the element that
/// triggered them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditorAction {
    // === Document ===
    Save,
    SpellCheck,
    Copy,
    Paste,
    ToggleFullscreen,

    // === Modals ===
    OpenSearch,
    OpenNewPost,
    CloseModal,

    // === Inserters ===
    InsertMedia,
    InsertBlockquote,
    InsertColoredCode,
    InsertInternalLink,

    // === Search ===
    FindNext,
    FindPrevious,
    ReplaceAll,

    // === Wizard ===
    WizardNext,
    WizardPrevious,
    WizardSubmit,

    // === Media library ===
    RefreshMedia,
    DeleteMedia,
    UploadMedia,
}

/// `data-action` name for every action.
pub const ACTION_BINDINGS: &[(&str, EditorAction)] = &[
    ("save", EditorAction::Save),
    ("spell-check", EditorAction::SpellCheck),
    ("copy", EditorAction::Copy),
    ("paste", EditorAction::Paste),
    ("fullscreen", EditorAction::ToggleFullscreen),
    ("search", EditorAction::OpenSearch),
    ("new-post", EditorAction::OpenNewPost),
    ("close-modal", EditorAction::CloseModal),
    ("insert-media", EditorAction::InsertMedia),
    ("insert-blockquote", EditorAction::InsertBlockquote),
    ("insert-colored-code", EditorAction::InsertColoredCode),
    ("insert-internal-link", EditorAction::InsertInternalLink),
    ("find-next", EditorAction::FindNext),
    ("find-prev", EditorAction::FindPrevious),
    ("replace-all", EditorAction::ReplaceAll),
    ("wizard-next", EditorAction::WizardNext),
    ("wizard-prev", EditorAction::WizardPrevious),
    ("wizard-submit", EditorAction::WizardSubmit),
    ("media-refresh", EditorAction::RefreshMedia),
    ("media-delete", EditorAction::DeleteMedia),
    ("media-upload", EditorAction::UploadMedia),
];

impl EditorAction {
    pub fn from_name(name: &str) -> Option<Self> {
        ACTION_BINDINGS
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, action)| *action)
    }

    pub fn name(self) -> &'static str {
        ACTION_BINDINGS
            .iter()
            .find(|(_, action)| *action == self)
            .map(|(n, _)| *n)
            .unwrap_or("unknown")
    }

    /// Whether the action changes or inserts text.
    pub fn edits_document(self) -> bool {
        matches!(
            self,
            EditorAction::Paste
                | EditorAction::InsertMedia
                | EditorAction::InsertBlockquote
                | EditorAction::InsertColoredCode
                | EditorAction::InsertInternalLink
                | EditorAction::ReplaceAll
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn names_resolve_both_ways() {
        for (name, action) in ACTION_BINDINGS {
            assert_eq!(EditorAction::from_name(name), Some(*action));
            assert_eq!(action.name(), *name);
        }
        assert_eq!(EditorAction::from_name("explode"), None);
    }

    #[test]
    fn bindings_are_unique() {
        let names: HashSet<_> = ACTION_BINDINGS.iter().map(|(n, _)| n).collect();
        let actions: HashSet<_> = ACTION_BINDINGS.iter().map(|(_, a)| a).collect();
        assert_eq!(names.len(), ACTION_BINDINGS.len());
        assert_eq!(actions.len(), ACTION_BINDINGS.len());
    }
}
