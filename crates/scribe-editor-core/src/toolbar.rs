//! Toolbar buttons built from the backend's shortcode definitions.

use scribe_common::ShortcodeDefinition;

use crate::modal::ModalKind;

/// Shortcode ids whose button opens a modal instead of inserting `code`.
pub const MODAL_SHORTCODES: [(&str, ModalKind); 4] = [
    ("coloredCode", ModalKind::ColoredCode),
    ("blockquoteSelect", ModalKind::Blockquote),
    ("internalLink", ModalKind::InternalLink),
    ("mediaSelect", ModalKind::MediaSelect),
];

/// What clicking a toolbar button does.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ToolbarCommand {
    Insert(String),
    OpenModal(ModalKind),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToolbarButton {
    pub id: String,
    pub icon: String,
    pub tooltip: String,
    pub command: ToolbarCommand,
}

impl ToolbarButton {
    fn from_definition(def: ShortcodeDefinition) -> Self {
        let command = MODAL_SHORTCODES
            .iter()
            .find(|(id, _)| *id == def.id)
            .map(|(_, kind)| ToolbarCommand::OpenModal(*kind))
            .unwrap_or(ToolbarCommand::Insert(def.code));
        Self {
            id: def.id,
            icon: def.icon,
            tooltip: def.tooltip,
            command,
        }
    }

    /// CSS classes for the button's icon element.
    pub fn icon_class(&self) -> String {
        format!("fas fa-{}", self.icon)
    }
}

/// Ordered set of toolbar buttons.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Toolbar {
    buttons: Vec<ToolbarButton>,
}

impl Toolbar {
    /// Buttons in ascending `order`; ties keep the order they arrived in.
    pub fn from_definitions(mut definitions: Vec<ShortcodeDefinition>) -> Self {
        definitions.sort_by_key(|def| def.order);
        Self {
            buttons: definitions
                .into_iter()
                .map(ToolbarButton::from_definition)
                .collect(),
        }
    }

    pub fn buttons(&self) -> &[ToolbarButton] {
        &self.buttons
    }

    pub fn command(&self, id: &str) -> Option<&ToolbarCommand> {
        self.buttons
            .iter()
            .find(|button| button.id == id)
            .map(|button| &button.command)
    }

    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn def(id: &str, order: i32, code: &str) -> ShortcodeDefinition {
        ShortcodeDefinition {
            id: id.into(),
            icon: "star".into(),
            tooltip: id.into(),
            order,
            code: code.into(),
        }
    }

    #[test]
    fn sorted_by_order_and_stable() {
        let toolbar = Toolbar::from_definitions(vec![
            def("c", 2, ""),
            def("a", 1, ""),
            def("b", 2, ""),
            def("z", -1, ""),
        ]);
        let ids: Vec<_> = toolbar.buttons().iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, ["z", "a", "c", "b"]);
    }

    #[test]
    fn special_ids_open_modals() {
        let toolbar = Toolbar::from_definitions(vec![
            def("bold", 1, "**text**"),
            def("mediaSelect", 2, "ignored"),
            def("internalLink", 3, ""),
        ]);
        assert_eq!(
            toolbar.command("bold"),
            Some(&ToolbarCommand::Insert("**text**".into()))
        );
        assert_eq!(
            toolbar.command("mediaSelect"),
            Some(&ToolbarCommand::OpenModal(ModalKind::MediaSelect))
        );
        assert_eq!(
            toolbar.command("internalLink"),
            Some(&ToolbarCommand::OpenModal(ModalKind::InternalLink))
        );
        assert_eq!(toolbar.command("missing"), None);
        assert_eq!(toolbar.buttons()[0].icon_class(), "fas fa-star");
    }
}
