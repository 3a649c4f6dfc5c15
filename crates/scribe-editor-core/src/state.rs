//! The editor controller.
//!
//! `EditorState` owns every piece of editor state and is driven by one
//! caller at a time. Each backend interaction is split in two:
//!
//! - a synchronous `begin_*` that updates state and returns a ticket,
//! - the caller's own async request, made without holding the state,
//! - a synchronous `finish_*` that consumes the ticket and the result.
//!
//! Tickets carry a [`Generation`]; a `finish_*` for a request that has since
//! been superseded is ignored.

use std::collections::VecDeque;

use scribe_common::{
    CheckResponse, ClientConfig, CreatePostResponse, EditorConfig, FileListing, FileReference,
    NewPostForm, ProcessMediaRequest, ProcessMediaResponse, Result, TaxonomyEntry,
    UploadMediaResponse,
};

use crate::document::{EditorDocument, InsertOutcome};
use crate::file_selector::{FileSelector, LIST_ERROR_MESSAGE};
use crate::inserters::{
    BlockquoteKind, InternalLink, blockquote_markdown, colored_code_markdown, media_markdown,
};
use crate::media::MediaManager;
use crate::modal::{ListState, ModalKind, ModalRegistry};
use crate::spellcheck::{Annotation, annotate};
use crate::ticket::{Generation, RequestSlot};
use crate::toolbar::{Toolbar, ToolbarCommand};
use crate::types::Notice;
use crate::wizard::{NewPostWizard, now_date};

pub const LOAD_ERROR_PLACEHOLDER: &str = "Error loading file content";
pub const NO_FILE_MESSAGE: &str = "No file selected";
pub const SAVE_SUCCESS_MESSAGE: &str = "File saved successfully";
pub const LINK_TARGET_MESSAGE: &str = "Please select a language and file";
pub const LEAVE_WARNING: &str = "You have unsaved changes. Are you sure you want to leave?";
pub const COPY_SUCCESS_MESSAGE: &str = "Content copied to clipboard";
pub const NO_MEDIA_SELECTED_MESSAGE: &str = "Please select at least one image to delete";
pub const UPLOAD_SUCCESS_MESSAGE: &str = "Image saved successfully!";
pub const UPLOAD_FAILURE_MESSAGE: &str = "Failed to save image. Please try again.";

/// Which media list a fetch fills.
#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub enum MediaTarget {
    /// The select in the media inserter modal.
    Picker,
    /// The media library page.
    Library,
}

#[derive(Debug)]
pub struct ListTicket {
    generation: Generation,
    pub language: String,
}

#[derive(Debug)]
pub struct LoadTicket {
    generation: Generation,
    pub file: FileReference,
}

#[derive(Debug)]
pub struct SaveTicket {
    revision: u64,
    pub file: FileReference,
    pub content: String,
}

#[derive(Debug)]
pub struct MediaListTicket {
    generation: Generation,
    pub target: MediaTarget,
}

#[derive(Debug)]
pub struct ProcessMediaTicket {
    alt: String,
    pub request: ProcessMediaRequest,
}

#[derive(Debug)]
pub struct LinkListTicket {
    generation: Generation,
    pub language: String,
}

#[derive(Debug)]
pub struct TaxonomyTicket {
    generation: Generation,
}

#[derive(Debug)]
pub struct CreatePostTicket {
    pub form: NewPostForm,
}

#[derive(Debug)]
pub struct SpellTicket {
    generation: Generation,
    revision: u64,
    pub text: String,
    pub language: String,
}

#[derive(Debug)]
pub struct DeleteMediaTicket {
    pub files: Vec<String>,
}

#[derive(Debug)]
pub struct UploadMediaTicket {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Follow-up work after a modal opened.
#[derive(Debug)]
pub enum ModalOpen {
    Ready,
    MediaList(MediaListTicket),
    Taxonomy(TaxonomyTicket),
}

#[derive(Debug)]
pub enum ToolbarOutcome {
    Inserted(InsertOutcome),
    Opened(ModalKind, ModalOpen),
    Unknown,
}

/// Values read from the media inserter modal.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MediaChoice {
    pub file: String,
    pub alt: String,
    /// Rename through `/api/process-media` before linking.
    pub new_name: Option<String>,
}

#[derive(Debug)]
pub enum MediaConfirm {
    /// Nothing was chosen; the modal closed.
    Closed,
    Inserted(InsertOutcome),
    Process(ProcessMediaTicket),
}

#[derive(Debug, Default)]
struct Slots {
    list: RequestSlot,
    load: RequestSlot,
    picker: RequestSlot,
    library: RequestSlot,
    link_list: RequestSlot,
    taxonomy: RequestSlot,
    spell: RequestSlot,
}

impl Slots {
    fn media(&mut self, target: MediaTarget) -> &mut RequestSlot {
        match target {
            MediaTarget::Picker => &mut self.picker,
            MediaTarget::Library => &mut self.library,
        }
    }
}

pub struct EditorState {
    config: ClientConfig,
    document: EditorDocument,
    toolbar: Toolbar,
    files: FileSelector,
    modals: ModalRegistry,
    media_choices: ListState,
    link_language: Option<String>,
    link_files: ListState,
    wizard: NewPostWizard,
    annotations: Option<(u64, Vec<Annotation>)>,
    media: MediaManager,
    notices: VecDeque<Notice>,
    slots: Slots,
}

impl EditorState {
    pub fn new(config: ClientConfig) -> Self {
        let files = FileSelector::new(config.default_language.clone());
        Self {
            config,
            document: EditorDocument::new(),
            toolbar: Toolbar::default(),
            files,
            modals: ModalRegistry::default(),
            media_choices: ListState::default(),
            link_language: None,
            link_files: ListState::default(),
            wizard: NewPostWizard::new(now_date()),
            annotations: None,
            media: MediaManager::default(),
            notices: VecDeque::new(),
            slots: Slots::default(),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn document(&self) -> &EditorDocument {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut EditorDocument {
        &mut self.document
    }

    pub fn toolbar(&self) -> &Toolbar {
        &self.toolbar
    }

    pub fn files(&self) -> &FileSelector {
        &self.files
    }

    pub fn modals(&self) -> &ModalRegistry {
        &self.modals
    }

    pub fn media_choices(&self) -> &ListState {
        &self.media_choices
    }

    pub fn link_language(&self) -> Option<&str> {
        self.link_language.as_deref()
    }

    pub fn link_files(&self) -> &ListState {
        &self.link_files
    }

    pub fn wizard(&self) -> &NewPostWizard {
        &self.wizard
    }

    pub fn wizard_mut(&mut self) -> &mut NewPostWizard {
        &mut self.wizard
    }

    pub fn media(&self) -> &MediaManager {
        &self.media
    }

    pub fn media_mut(&mut self) -> &mut MediaManager {
        &mut self.media
    }

    /// Annotations from the last spell check, if the text has not changed
    /// since.
    pub fn annotations(&self) -> &[Annotation] {
        match &self.annotations {
            Some((revision, list)) if *revision == self.document.revision() => list,
            _ => &[],
        }
    }

    pub fn notify(&mut self, notice: Notice) {
        self.notices.push_back(notice);
    }

    /// Drain queued notices, oldest first.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.notices.drain(..).collect()
    }

    /// Message for the navigation-away prompt, when there are unsaved edits.
    pub fn leave_warning(&self) -> Option<&'static str> {
        self.document.is_dirty().then_some(LEAVE_WARNING)
    }

    fn error(&mut self, message: String) {
        tracing::error!("{message}");
        self.notify(Notice::error(message));
    }

    // === Config ===

    pub fn apply_config(&mut self, result: Result<EditorConfig>) {
        match result {
            Ok(config) => {
                tracing::debug!(buttons = config.shortcodes.len(), "toolbar configured");
                self.toolbar = Toolbar::from_definitions(config.shortcodes);
            }
            Err(err) => self.error(format!("Error loading editor config: {err}")),
        }
    }

    // === File selector ===

    /// Switch the file selector to `language`. Any load still in flight is
    /// abandoned.
    pub fn begin_list(&mut self, language: &str) -> ListTicket {
        self.files.set_language(language);
        self.slots.load.cancel();
        ListTicket {
            generation: self.slots.list.issue(),
            language: language.to_owned(),
        }
    }

    /// Populate the file select. Returns the load of the first file, if any.
    pub fn finish_list(
        &mut self,
        ticket: ListTicket,
        result: Result<FileListing>,
    ) -> Option<LoadTicket> {
        if !self.slots.list.is_current(ticket.generation) {
            tracing::warn!(language = %ticket.language, "discarding stale file listing");
            return None;
        }
        match result {
            Ok(listing) => {
                let first = self.files.apply_listing(&listing)?;
                Some(self.begin_load(first))
            }
            Err(err) => {
                tracing::error!(language = %ticket.language, error = %err, "{LIST_ERROR_MESSAGE}");
                self.files.fail();
                None
            }
        }
    }

    pub fn select_file(&mut self, filename: &str) -> Option<LoadTicket> {
        let file = self.files.select(filename)?;
        Some(self.begin_load(file))
    }

    pub fn begin_load(&mut self, file: FileReference) -> LoadTicket {
        tracing::debug!(%file, "loading file");
        LoadTicket {
            generation: self.slots.load.issue(),
            file,
        }
    }

    /// Replace the buffer with the loaded content. Returns false if the
    /// ticket was stale.
    pub fn finish_load(&mut self, ticket: LoadTicket, result: Result<String>) -> bool {
        if !self.slots.load.is_current(ticket.generation) {
            tracing::warn!(file = %ticket.file, "discarding stale load");
            return false;
        }
        match result {
            Ok(content) => self.document.load(&content, Some(ticket.file)),
            Err(err) => {
                tracing::error!(file = %ticket.file, error = %err, "error loading file");
                self.document.load(LOAD_ERROR_PLACEHOLDER, None);
            }
        }
        true
    }

    // === Save ===

    pub fn begin_save(&mut self) -> Option<SaveTicket> {
        let Some(file) = self.document.file().cloned() else {
            self.error(NO_FILE_MESSAGE.to_owned());
            return None;
        };
        Some(SaveTicket {
            revision: self.document.revision(),
            content: self.document.content(),
            file,
        })
    }

    pub fn finish_save(&mut self, ticket: SaveTicket, result: Result<()>) -> bool {
        match result {
            Ok(()) => {
                // Only the file that was saved can be marked clean.
                if self.document.file() == Some(&ticket.file) {
                    self.document.mark_saved(ticket.revision);
                }
                self.notify(Notice::info(SAVE_SUCCESS_MESSAGE));
                true
            }
            Err(err) => {
                self.error(format!("Error saving file: {err}"));
                false
            }
        }
    }

    // === Toolbar & modals ===

    pub fn toolbar_click(&mut self, id: &str) -> ToolbarOutcome {
        match self.toolbar.command(id).cloned() {
            Some(ToolbarCommand::Insert(code)) => {
                ToolbarOutcome::Inserted(self.document.insert_template(&code))
            }
            Some(ToolbarCommand::OpenModal(kind)) => {
                ToolbarOutcome::Opened(kind, self.open_modal(kind))
            }
            None => {
                tracing::warn!(id, "unknown toolbar button");
                ToolbarOutcome::Unknown
            }
        }
    }

    pub fn open_modal(&mut self, kind: ModalKind) -> ModalOpen {
        self.modals.open(kind);
        match kind {
            ModalKind::MediaSelect => {
                self.media_choices = ListState::Loading;
                ModalOpen::MediaList(self.begin_media_list(MediaTarget::Picker))
            }
            ModalKind::InternalLink => {
                self.link_language = None;
                self.link_files = ListState::Empty;
                self.slots.link_list.cancel();
                ModalOpen::Ready
            }
            ModalKind::NewPost => {
                self.wizard.reset(now_date());
                ModalOpen::Taxonomy(TaxonomyTicket {
                    generation: self.slots.taxonomy.issue(),
                })
            }
            ModalKind::Blockquote | ModalKind::ColoredCode | ModalKind::Search => ModalOpen::Ready,
        }
    }

    /// Close the open modal. Cancelling the wizard discards its form.
    pub fn close_modal(&mut self) -> Option<ModalKind> {
        let closed = self.modals.close_any()?;
        if closed == ModalKind::NewPost {
            self.wizard.reset(now_date());
            self.slots.taxonomy.cancel();
        }
        Some(closed)
    }

    fn close(&mut self, kind: ModalKind) {
        if self.modals.close(kind) && kind == ModalKind::NewPost {
            self.wizard.reset(now_date());
        }
    }

    // === Media ===

    fn begin_media_list(&mut self, target: MediaTarget) -> MediaListTicket {
        MediaListTicket {
            generation: self.slots.media(target).issue(),
            target,
        }
    }

    pub fn finish_media_list(&mut self, ticket: MediaListTicket, result: Result<Vec<String>>) {
        if !self.slots.media(ticket.target).is_current(ticket.generation) {
            tracing::warn!(media = ?ticket.target, "discarding stale media list");
            return;
        }
        match (ticket.target, result) {
            (MediaTarget::Picker, Ok(files)) => self.media_choices = ListState::Ready(files),
            (MediaTarget::Picker, Err(err)) => {
                tracing::error!(error = %err, "error loading media list");
                self.media_choices = ListState::Failed(LIST_ERROR_MESSAGE.to_owned());
            }
            (MediaTarget::Library, Ok(files)) => self.media.set_files(files),
            (MediaTarget::Library, Err(err)) => {
                tracing::error!(error = %err, "error loading media library");
                self.media.fail();
            }
        }
    }

    pub fn confirm_media(&mut self, choice: MediaChoice) -> MediaConfirm {
        if choice.file.trim().is_empty() {
            self.close(ModalKind::MediaSelect);
            return MediaConfirm::Closed;
        }
        match choice.new_name.filter(|name| !name.trim().is_empty()) {
            Some(new_name) => MediaConfirm::Process(ProcessMediaTicket {
                alt: choice.alt,
                request: ProcessMediaRequest {
                    file: choice.file,
                    new_name: new_name.trim().to_owned(),
                },
            }),
            None => {
                let outcome = self
                    .document
                    .insert_at_cursor_or_selection(&media_markdown(&choice.file, &choice.alt));
                self.close(ModalKind::MediaSelect);
                MediaConfirm::Inserted(outcome)
            }
        }
    }

    /// Link the processed file. On failure the modal stays open.
    pub fn finish_process_media(
        &mut self,
        ticket: ProcessMediaTicket,
        result: Result<ProcessMediaResponse>,
    ) -> Option<InsertOutcome> {
        match result {
            Ok(processed) => {
                let markdown = media_markdown(&processed.filename, &ticket.alt);
                let outcome = self.document.insert_at_cursor_or_selection(&markdown);
                self.close(ModalKind::MediaSelect);
                Some(outcome)
            }
            Err(err) => {
                self.error(format!("Error processing media: {err}"));
                None
            }
        }
    }

    pub fn refresh_media(&mut self) -> MediaListTicket {
        self.media.set_loading();
        self.begin_media_list(MediaTarget::Library)
    }

    /// Delete the selected library files. Callers confirm with the user
    /// first (see [`MediaManager::delete_prompt`]).
    pub fn begin_delete_media(&mut self) -> Option<DeleteMediaTicket> {
        if self.media.selected().is_empty() {
            self.error(NO_MEDIA_SELECTED_MESSAGE.to_owned());
            return None;
        }
        Some(DeleteMediaTicket {
            files: self.media.selected().to_vec(),
        })
    }

    /// One result per file in the ticket, in order. Always refreshes.
    pub fn finish_delete_media(
        &mut self,
        ticket: DeleteMediaTicket,
        results: Vec<Result<()>>,
    ) -> MediaListTicket {
        let mut failed = false;
        for (file, result) in ticket.files.iter().zip(results) {
            if let Err(err) = result {
                tracing::error!(file = %file, error = %err, "error deleting media");
                failed = true;
            }
        }
        self.media.clear_selection();
        if failed {
            self.error("Failed to delete images".to_owned());
        } else {
            self.notify(Notice::info(format!(
                "Successfully deleted {} image(s)",
                ticket.files.len()
            )));
        }
        self.refresh_media()
    }

    pub fn begin_upload_media(&mut self, file_name: &str, bytes: Vec<u8>) -> UploadMediaTicket {
        UploadMediaTicket {
            file_name: file_name.to_owned(),
            bytes,
        }
    }

    pub fn finish_upload_media(
        &mut self,
        ticket: UploadMediaTicket,
        result: Result<UploadMediaResponse>,
    ) -> Option<MediaListTicket> {
        match result {
            Ok(response) => {
                tracing::debug!(
                    file = %ticket.file_name,
                    stored = ?response.filename,
                    "media uploaded"
                );
                self.notify(Notice::info(UPLOAD_SUCCESS_MESSAGE));
                Some(self.refresh_media())
            }
            Err(err) => {
                tracing::error!(file = %ticket.file_name, error = %err, "error uploading media");
                self.notify(Notice::error(UPLOAD_FAILURE_MESSAGE));
                None
            }
        }
    }

    // === Blockquote & colored code ===

    pub fn confirm_blockquote(&mut self, kind: BlockquoteKind, content: &str) -> InsertOutcome {
        let outcome = self
            .document
            .insert_at_cursor_or_selection(&blockquote_markdown(kind, content));
        self.close(ModalKind::Blockquote);
        outcome
    }

    pub fn confirm_colored_code(&mut self, language: &str, body: &str) -> InsertOutcome {
        let outcome = self
            .document
            .insert_at_cursor_or_selection(&colored_code_markdown(language, body));
        self.close(ModalKind::ColoredCode);
        outcome
    }

    // === Internal link ===

    /// Pick the language in the internal-link modal. `-` or an empty value
    /// clears the file list.
    pub fn select_link_language(&mut self, language: &str) -> Option<LinkListTicket> {
        let language = language.trim();
        if language.is_empty() || language == "-" {
            self.link_language = None;
            self.link_files = ListState::Empty;
            self.slots.link_list.cancel();
            return None;
        }
        self.link_language = Some(language.to_owned());
        self.link_files = ListState::Loading;
        Some(LinkListTicket {
            generation: self.slots.link_list.issue(),
            language: language.to_owned(),
        })
    }

    pub fn finish_link_list(&mut self, ticket: LinkListTicket, result: Result<FileListing>) {
        if !self.slots.link_list.is_current(ticket.generation) {
            tracing::warn!(language = %ticket.language, "discarding stale link listing");
            return;
        }
        self.link_files = match result {
            Ok(listing) => ListState::Ready(listing.files_for(&ticket.language)),
            Err(err) => {
                tracing::error!(language = %ticket.language, error = %err, "{LIST_ERROR_MESSAGE}");
                ListState::Failed(LIST_ERROR_MESSAGE.to_owned())
            }
        };
    }

    pub fn confirm_internal_link(&mut self, link: &InternalLink) -> Option<InsertOutcome> {
        if !link.is_complete() {
            self.error(LINK_TARGET_MESSAGE.to_owned());
            return None;
        }
        let outcome = self
            .document
            .insert_at_cursor_or_selection(&link.to_shortcode());
        self.close(ModalKind::InternalLink);
        Some(outcome)
    }

    // === New post wizard ===

    /// Existing tags and categories for the wizard. A failed fetch leaves
    /// that list empty.
    pub fn finish_taxonomy(
        &mut self,
        ticket: TaxonomyTicket,
        tags: Result<Vec<TaxonomyEntry>>,
        categories: Result<Vec<TaxonomyEntry>>,
    ) {
        if !self.slots.taxonomy.is_current(ticket.generation) {
            return;
        }
        let tags = tags.unwrap_or_else(|err| {
            tracing::error!(error = %err, "error fetching tags");
            Vec::new()
        });
        let categories = categories.unwrap_or_else(|err| {
            tracing::error!(error = %err, "error fetching categories");
            Vec::new()
        });
        self.wizard.set_existing(tags, categories);
    }

    pub fn begin_create_post(&mut self) -> Option<CreatePostTicket> {
        match self.wizard.submission() {
            Ok(form) => Some(CreatePostTicket { form }),
            Err(err) => {
                self.notify(Notice::error(err.to_string()));
                None
            }
        }
    }

    pub fn finish_create_post(
        &mut self,
        ticket: CreatePostTicket,
        result: Result<CreatePostResponse>,
    ) -> bool {
        match result {
            Ok(created) => {
                tracing::info!(filename = %created.filename, title = %ticket.form.title, "post created");
                self.notify(Notice::info(format!(
                    "Post created successfully: {}",
                    created.filename
                )));
                self.wizard.reset(now_date());
                self.close(ModalKind::NewPost);
                true
            }
            Err(err) => {
                self.error(format!("Error creating post: {err}"));
                false
            }
        }
    }

    // === Spell check ===

    pub fn begin_spell_check(&mut self) -> SpellTicket {
        SpellTicket {
            generation: self.slots.spell.issue(),
            revision: self.document.revision(),
            text: self.document.content(),
            language: self.files.language().to_owned(),
        }
    }

    /// Store annotations, unless the text changed since the check began.
    pub fn finish_spell_check(&mut self, ticket: SpellTicket, result: Result<CheckResponse>) -> bool {
        if !self.slots.spell.is_current(ticket.generation)
            || ticket.revision != self.document.revision()
        {
            tracing::warn!("discarding spell check of outdated text");
            return false;
        }
        match result {
            Ok(response) => {
                let annotations = annotate(self.document.buffer(), &response);
                tracing::debug!(issues = annotations.len(), "spell check finished");
                self.annotations = Some((ticket.revision, annotations));
                true
            }
            Err(err) => {
                self.error(format!("Spell check failed: {err}"));
                false
            }
        }
    }

    // === Clipboard ===

    /// Insert clipboard text through the insertion primitive.
    pub fn paste(&mut self, text: &str) -> Option<InsertOutcome> {
        if text.is_empty() {
            return None;
        }
        Some(self.document.insert_at_cursor_or_selection(text))
    }
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{NoticeLevel, Selection};
    use scribe_common::{ScribeError, ShortcodeDefinition};

    fn failure() -> ScribeError {
        ScribeError::Status {
            endpoint: "/api/test".into(),
            status: 500,
            body: "boom".into(),
        }
    }

    fn loaded_state(content: &str) -> EditorState {
        let mut state = EditorState::default();
        let ticket = state.begin_load(FileReference::new("en", "post1.md"));
        assert!(state.finish_load(ticket, Ok(content.to_owned())));
        state
    }

    #[test]
    fn stale_listing_is_discarded() {
        let mut state = EditorState::default();
        let en = state.begin_list("en");
        let de = state.begin_list("de");
        let load = state
            .finish_list(de, Ok(FileListing::Flat(vec!["hallo.md".into()])))
            .unwrap();
        assert_eq!(load.file, FileReference::new("de", "hallo.md"));
        assert!(state.finish_list(en, Ok(FileListing::Flat(vec!["x.md".into()]))).is_none());
        assert_eq!(state.files().files().items(), ["hallo.md"]);
    }

    #[test]
    fn failed_load_blocks_save() {
        let mut state = EditorState::default();
        let ticket = state.begin_load(FileReference::new("en", "gone.md"));
        state.finish_load(ticket, Err(failure()));
        assert_eq!(state.document().content(), LOAD_ERROR_PLACEHOLDER);
        assert!(!state.document().is_dirty());
        assert!(state.begin_save().is_none());
        assert_eq!(state.take_notices(), [Notice::error(NO_FILE_MESSAGE)]);
    }

    #[test]
    fn stale_load_is_discarded() {
        let mut state = EditorState::default();
        let first = state.begin_load(FileReference::new("en", "a.md"));
        let second = state.begin_load(FileReference::new("en", "b.md"));
        assert!(state.finish_load(second, Ok("b".into())));
        assert!(!state.finish_load(first, Ok("a".into())));
        assert_eq!(state.document().content(), "b");
    }

    #[test]
    fn save_during_edit_stays_dirty() {
        let mut state = loaded_state("abc");
        state.document_mut().insert(3, "d");
        let ticket = state.begin_save().unwrap();
        assert_eq!(ticket.content, "abcd");
        state.document_mut().insert(4, "e");
        assert!(state.finish_save(ticket, Ok(())));
        assert!(state.document().is_dirty());
        assert_eq!(state.leave_warning(), Some(LEAVE_WARNING));
    }

    #[test]
    fn failed_save_keeps_dirty_and_reports() {
        let mut state = loaded_state("abc");
        state.document_mut().insert(0, "x");
        let ticket = state.begin_save().unwrap();
        assert!(!state.finish_save(ticket, Err(failure())));
        assert!(state.document().is_dirty());
        let notices = state.take_notices();
        assert_eq!(notices[0].level, NoticeLevel::Error);
        assert!(notices[0].message.starts_with("Error saving file:"));
    }

    #[test]
    fn toolbar_inserts_or_opens() {
        let mut state = loaded_state("hello");
        state.apply_config(Ok(EditorConfig {
            shortcodes: vec![
                ShortcodeDefinition {
                    id: "bold".into(),
                    icon: "bold".into(),
                    tooltip: "Bold".into(),
                    order: 1,
                    code: "**text**".into(),
                },
                ShortcodeDefinition {
                    id: "mediaSelect".into(),
                    icon: "image".into(),
                    tooltip: "Media".into(),
                    order: 2,
                    code: String::new(),
                },
            ],
        }));

        state.document_mut().set_selection(Selection::new(0, 5));
        let ToolbarOutcome::Inserted(outcome) = state.toolbar_click("bold") else {
            panic!("bold should insert");
        };
        assert!(!outcome.scroll_to_end());
        assert_eq!(state.document().content(), "**hello**");

        let ToolbarOutcome::Opened(ModalKind::MediaSelect, ModalOpen::MediaList(ticket)) =
            state.toolbar_click("mediaSelect")
        else {
            panic!("mediaSelect should open its modal");
        };
        assert_eq!(state.media_choices(), &ListState::Loading);
        state.finish_media_list(ticket, Ok(vec!["cat.png".into()]));
        assert_eq!(state.media_choices().items(), ["cat.png"]);

        assert!(matches!(state.toolbar_click("nope"), ToolbarOutcome::Unknown));
    }

    #[test]
    fn media_rename_goes_through_processing() {
        let mut state = loaded_state("");
        state.open_modal(ModalKind::MediaSelect);
        let MediaConfirm::Process(ticket) = state.confirm_media(MediaChoice {
            file: "cat.png".into(),
            alt: "A cat".into(),
            new_name: Some("post1_cat".into()),
        }) else {
            panic!("rename should be processed first");
        };
        assert_eq!(ticket.request.new_name, "post1_cat");
        assert!(state.modals().is_open(ModalKind::MediaSelect));

        state.finish_process_media(
            ticket,
            Ok(ProcessMediaResponse {
                filename: "post1_cat.webp".into(),
            }),
        );
        assert_eq!(state.document().content(), "\n![A cat](/img/blog/post1_cat.webp)");
        assert_eq!(state.modals().current(), None);
    }

    #[test]
    fn empty_media_choice_just_closes() {
        let mut state = loaded_state("abc");
        state.open_modal(ModalKind::MediaSelect);
        assert!(matches!(
            state.confirm_media(MediaChoice::default()),
            MediaConfirm::Closed
        ));
        assert_eq!(state.document().content(), "abc");
        assert!(!state.document().is_dirty());
    }

    #[test]
    fn internal_link_requires_target() {
        let mut state = loaded_state("");
        state.open_modal(ModalKind::InternalLink);
        assert!(state.select_link_language("-").is_none());
        assert!(state.confirm_internal_link(&InternalLink::default()).is_none());
        assert_eq!(state.take_notices(), [Notice::error(LINK_TARGET_MESSAGE)]);
        assert!(state.modals().is_open(ModalKind::InternalLink));

        let ticket = state.select_link_language("de").unwrap();
        state.finish_link_list(ticket, Err(failure()));
        assert!(state.link_files().is_failed());
        assert_eq!(state.close_modal(), Some(ModalKind::InternalLink));
    }

    #[test]
    fn spell_check_discarded_after_edit() {
        let mut state = loaded_state("teh cat");
        let ticket = state.begin_spell_check();
        assert_eq!(ticket.language, "en");
        state.document_mut().insert(0, "x");
        let response = serde_json::from_str(
            r#"{"matches":[{"offset":0,"length":3,"message":"typo","rule":{"category":{"id":"TYPOS"}}}]}"#,
        )
        .unwrap();
        assert!(!state.finish_spell_check(ticket, Ok(response)));
        assert!(state.annotations().is_empty());
    }

    #[test]
    fn annotations_expire_on_edit() {
        let mut state = loaded_state("teh cat");
        let ticket = state.begin_spell_check();
        let response = serde_json::from_str(
            r#"{"matches":[{"offset":0,"length":3,"message":"typo","rule":{"category":{"id":"TYPOS"}}}]}"#,
        )
        .unwrap();
        assert!(state.finish_spell_check(ticket, Ok(response)));
        assert_eq!(state.annotations().len(), 1);
        state.document_mut().insert(0, " ");
        assert!(state.annotations().is_empty());
    }

    #[test]
    fn cancelling_wizard_resets_form() {
        let mut state = EditorState::default();
        state.open_modal(ModalKind::NewPost);
        state
            .wizard_mut()
            .set_field(crate::wizard::WizardField::Title, "Draft");
        state.wizard_mut().next();
        state.close_modal();
        assert!(state.wizard().form().title.is_empty());
        assert_eq!(state.wizard().step().number(), 1);
    }

    #[test]
    fn delete_reports_partial_failure() {
        let mut state = EditorState::default();
        let ticket = state.refresh_media();
        state.finish_media_list(ticket, Ok(vec!["a.png".into(), "b.png".into()]));
        assert!(state.begin_delete_media().is_none());
        state.take_notices();

        state.media_mut().toggle_selected("a.png");
        state.media_mut().toggle_selected("b.png");
        let ticket = state.begin_delete_media().unwrap();
        let refresh = state.finish_delete_media(ticket, vec![Ok(()), Err(failure())]);
        assert_eq!(refresh.target, MediaTarget::Library);
        assert_eq!(state.take_notices(), [Notice::error("Failed to delete images")]);
        assert!(state.media().selected().is_empty());
    }
}
