//! Async driver that runs editor flows end to end against an [`AdminApi`]
//! and a [`SpellCheck`] service.
//!
//! Each method is a `begin_*`, one awaited request and a `finish_*` on the
//! owned [`EditorState`]. The browser layer performs the same sequence
//! itself so it never holds the state across an await.

use scribe_common::{AdminApi, FileReference, SpellCheck};

use crate::document::InsertOutcome;
use crate::inserters::InternalLink;
use crate::modal::ModalKind;
use crate::state::{
    EditorState, LoadTicket, MediaChoice, MediaConfirm, MediaListTicket, ModalOpen,
    TaxonomyTicket, ToolbarOutcome,
};

pub struct EditorSession<A, S> {
    api: A,
    spell: S,
    state: EditorState,
}

impl<A: AdminApi, S: SpellCheck> EditorSession<A, S> {
    pub fn new(api: A, spell: S, state: EditorState) -> Self {
        Self { api, spell, state }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut EditorState {
        &mut self.state
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn into_parts(self) -> (A, S, EditorState) {
        (self.api, self.spell, self.state)
    }

    /// Fetch the toolbar, then list and load the default language.
    pub async fn start(&mut self) {
        let config = self.api.config().await;
        self.state.apply_config(config);
        let language = self.state.config().default_language.clone();
        self.change_language(&language).await;
    }

    pub async fn change_language(&mut self, language: &str) {
        let ticket = self.state.begin_list(language);
        let result = self.api.list_files(&ticket.language).await;
        if let Some(load) = self.state.finish_list(ticket, result) {
            self.run_load(load).await;
        }
    }

    pub async fn select_file(&mut self, filename: &str) {
        if let Some(load) = self.state.select_file(filename) {
            self.run_load(load).await;
        }
    }

    pub async fn load_file(&mut self, file: FileReference) {
        let load = self.state.begin_load(file);
        self.run_load(load).await;
    }

    async fn run_load(&mut self, ticket: LoadTicket) {
        let result = self.api.load_file(&ticket.file).await;
        self.state.finish_load(ticket, result);
    }

    /// Returns whether the save went through.
    pub async fn save(&mut self) -> bool {
        let Some(ticket) = self.state.begin_save() else {
            return false;
        };
        let result = self.api.save_file(&ticket.file, ticket.content.clone()).await;
        self.state.finish_save(ticket, result)
    }

    pub async fn toolbar_click(&mut self, id: &str) -> Option<InsertOutcome> {
        match self.state.toolbar_click(id) {
            ToolbarOutcome::Inserted(outcome) => Some(outcome),
            ToolbarOutcome::Opened(_, follow_up) => {
                self.run_modal_open(follow_up).await;
                None
            }
            ToolbarOutcome::Unknown => None,
        }
    }

    pub async fn open_modal(&mut self, kind: ModalKind) {
        let follow_up = self.state.open_modal(kind);
        self.run_modal_open(follow_up).await;
    }

    async fn run_modal_open(&mut self, follow_up: ModalOpen) {
        match follow_up {
            ModalOpen::Ready => {}
            ModalOpen::MediaList(ticket) => self.run_media_list(ticket).await,
            ModalOpen::Taxonomy(ticket) => self.run_taxonomy(ticket).await,
        }
    }

    async fn run_media_list(&mut self, ticket: MediaListTicket) {
        let result = self.api.media_list().await;
        self.state.finish_media_list(ticket, result);
    }

    async fn run_taxonomy(&mut self, ticket: TaxonomyTicket) {
        let tags = self.api.tags().await;
        let categories = self.api.categories().await;
        self.state.finish_taxonomy(ticket, tags, categories);
    }

    pub async fn confirm_media(&mut self, choice: MediaChoice) -> Option<InsertOutcome> {
        match self.state.confirm_media(choice) {
            MediaConfirm::Closed => None,
            MediaConfirm::Inserted(outcome) => Some(outcome),
            MediaConfirm::Process(ticket) => {
                let result = self.api.process_media(&ticket.request).await;
                self.state.finish_process_media(ticket, result)
            }
        }
    }

    pub async fn select_link_language(&mut self, language: &str) {
        if let Some(ticket) = self.state.select_link_language(language) {
            let result = self.api.list_files(&ticket.language).await;
            self.state.finish_link_list(ticket, result);
        }
    }

    pub fn confirm_internal_link(&mut self, link: &InternalLink) -> Option<InsertOutcome> {
        self.state.confirm_internal_link(link)
    }

    /// Returns whether the post was created.
    pub async fn submit_post(&mut self) -> bool {
        let Some(ticket) = self.state.begin_create_post() else {
            return false;
        };
        let result = self.api.create_post(&ticket.form).await;
        self.state.finish_create_post(ticket, result)
    }

    pub async fn spell_check(&mut self) -> bool {
        let ticket = self.state.begin_spell_check();
        let result = self.spell.check(&ticket.text, &ticket.language).await;
        self.state.finish_spell_check(ticket, result)
    }

    pub async fn refresh_media(&mut self) {
        let ticket = self.state.refresh_media();
        self.run_media_list(ticket).await;
    }

    /// Delete the selected library files one by one, then refresh.
    pub async fn delete_selected_media(&mut self) {
        let Some(ticket) = self.state.begin_delete_media() else {
            return;
        };
        let mut results = Vec::with_capacity(ticket.files.len());
        for file in &ticket.files {
            results.push(self.api.delete_media(file).await);
        }
        let refresh = self.state.finish_delete_media(ticket, results);
        self.run_media_list(refresh).await;
    }

    pub async fn upload_media(&mut self, file_name: &str, bytes: Vec<u8>) {
        let mut ticket = self.state.begin_upload_media(file_name, bytes);
        let bytes = std::mem::take(&mut ticket.bytes);
        let result = self.api.upload_media(&ticket.file_name, bytes).await;
        if let Some(refresh) = self.state.finish_upload_media(ticket, result) {
            self.run_media_list(refresh).await;
        }
    }
}
