//! Framework-agnostic core of the scribe admin editor.
//!
//! This crate provides:
//! - `TextBuffer` trait and the ropey-backed `EditorRope`
//! - `EditorDocument` with dirty tracking and the single insert primitive
//! - Toolbar, shortcode inserters, file selector, new-post wizard
//! - Search/replace, spell-check annotations, media library state
//! - `EditorState`, the begin/finish controller, and `EditorSession`, its
//!   async driver
//!
//! Nothing here touches the DOM; `scribe-editor-browser` does.

pub mod actions;
pub mod document;
pub mod file_selector;
pub mod inserters;
pub mod media;
pub mod modal;
pub mod search;
pub mod session;
pub mod spellcheck;
pub mod state;
pub mod text;
pub mod ticket;
pub mod toolbar;
pub mod types;
pub mod wizard;

pub use actions::{ACTION_BINDINGS, EditorAction};
pub use document::{EditorDocument, InsertOutcome, InsertPlacement};
pub use file_selector::FileSelector;
pub use inserters::{BlockquoteKind, InternalLink};
pub use media::MediaManager;
pub use modal::{ListState, ModalKind, ModalRegistry};
pub use session::EditorSession;
pub use spellcheck::Annotation;
pub use state::{EditorState, MediaChoice, MediaConfirm, MediaTarget, ModalOpen, ToolbarOutcome};
pub use text::{EditorRope, TextBuffer};
pub use toolbar::{Toolbar, ToolbarButton, ToolbarCommand};
pub use types::{Affinity, CursorState, Notice, NoticeLevel, Selection};
pub use wizard::{NewPostWizard, WizardField, WizardStep};
