//! The mounted editor: state, clients and the flows that connect them.
//!
//! `EditorState` lives in a `RefCell` and is only borrowed between awaits.
//! Every flow is begin, request, finish: the ticket from `begin_*` carries
//! what the request needs, so no borrow is held while it runs.

use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

use gloo_events::EventListener;
use scribe_common::{AdminApi, ClientConfig, HttpAdminApi, LanguageToolClient, SpellCheck};
use scribe_editor_core::state::{LoadTicket, MediaListTicket, TaxonomyTicket};
use scribe_editor_core::{
    BlockquoteKind, EditorAction, EditorState, InsertOutcome, InternalLink, MediaChoice,
    MediaConfirm, ModalKind, ModalOpen, Notice, ToolbarOutcome, WizardField,
};
use wasm_bindgen::JsValue;
use web_sys::HtmlInputElement;

use crate::dom::{self, ids};
use crate::platform;
use crate::render::{self, Renderer};
use crate::textarea;

pub struct App {
    state: RefCell<EditorState>,
    renderer: RefCell<Renderer>,
    api: HttpAdminApi,
    spell: LanguageToolClient,
    listeners: RefCell<Vec<EventListener>>,
}

impl App {
    pub fn new(config: ClientConfig) -> Result<Rc<Self>, JsValue> {
        let api = HttpAdminApi::new(&config.base_url).map_err(to_js)?;
        let spell = LanguageToolClient::new(&config.spellcheck_url).map_err(to_js)?;
        Ok(Rc::new(Self {
            state: RefCell::new(EditorState::new(config)),
            renderer: RefCell::new(Renderer::new()),
            api,
            spell,
            listeners: RefCell::new(Vec::new()),
        }))
    }

    /// Wire the page up and start loading.
    pub fn mount(self: &Rc<Self>) -> Result<(), JsValue> {
        render::populate_static(self.state.borrow().config())?;
        let listeners = crate::events::attach(self);
        self.listeners.borrow_mut().extend(listeners);

        let app = Rc::clone(self);
        if let Some(guard) = crate::guard::install(move || app.leave_warning()) {
            self.listeners.borrow_mut().push(guard);
        }

        self.refresh();
        if textarea::editor().is_some() {
            self.spawn(App::start);
        }
        if dom::document().get_element_by_id(ids::MEDIA_LIBRARY).is_some() {
            self.dispatch(EditorAction::RefreshMedia);
        }
        Ok(())
    }

    fn leave_warning(&self) -> Option<&'static str> {
        self.state.try_borrow().ok()?.leave_warning()
    }

    pub fn spawn<F, Fut>(self: &Rc<Self>, flow: F)
    where
        F: FnOnce(Rc<Self>) -> Fut,
        Fut: Future<Output = ()> + 'static,
    {
        wasm_bindgen_futures::spawn_local(flow(Rc::clone(self)));
    }

    /// Run `f` against the state, then redraw and show queued notices.
    pub fn with_state<R>(&self, f: impl FnOnce(&mut EditorState) -> R) -> R {
        let result = f(&mut self.state.borrow_mut());
        self.refresh();
        result
    }

    pub fn refresh(&self) {
        let notices = {
            let mut state = self.state.borrow_mut();
            self.renderer.borrow_mut().render(&state);
            state.take_notices()
        };
        for notice in notices {
            platform::show_notice(&notice);
        }
    }

    /// Pull the textarea's caret and selection into the document.
    pub fn capture_selection(&self) {
        let Some(area) = textarea::editor() else {
            return;
        };
        textarea::read_selection(&area, self.state.borrow_mut().document_mut());
    }

    /// Sync after the user typed into the textarea.
    pub fn editor_input(&self) {
        let Some(area) = textarea::editor() else {
            return;
        };
        let mut state = self.state.borrow_mut();
        let doc = state.document_mut();
        if doc.sync_from_widget(&area.value()) {
            textarea::read_selection(&area, doc);
        }
        drop(state);
        self.refresh();
    }

    fn show_insert(&self, outcome: &InsertOutcome) {
        let Some(area) = textarea::editor() else {
            return;
        };
        textarea::apply_insert(&area, self.state.borrow().document(), outcome);
    }

    /// Refresh the caret before an insertion, if the user has placed one.
    fn prepare_insert(&self) {
        let placed = self.state.borrow().document().cursor().is_placed();
        if placed {
            self.capture_selection();
        }
    }

    // === Startup, files, save ===

    async fn start(self: Rc<Self>) {
        let config = self.api.config().await;
        self.with_state(|s| s.apply_config(config));
        let language = self.state.borrow().config().default_language.clone();
        self.change_language(language).await;
    }

    pub async fn change_language(self: Rc<Self>, language: String) {
        let ticket = self.with_state(|s| s.begin_list(&language));
        let result = self.api.list_files(&ticket.language).await;
        let load = self.with_state(|s| s.finish_list(ticket, result));
        if let Some(load) = load {
            self.run_load(load).await;
        }
    }

    pub async fn select_file(self: Rc<Self>, filename: String) {
        let load = self.with_state(|s| s.select_file(&filename));
        if let Some(load) = load {
            self.run_load(load).await;
        }
    }

    async fn run_load(&self, ticket: LoadTicket) {
        let result = self.api.load_file(&ticket.file).await;
        let applied = self.with_state(|s| s.finish_load(ticket, result));
        if applied && let Some(area) = textarea::editor() {
            area.set_scroll_top(0);
        }
    }

    async fn save(self: Rc<Self>) {
        let Some(ticket) = self.with_state(EditorState::begin_save) else {
            return;
        };
        let result = self.api.save_file(&ticket.file, ticket.content.clone()).await;
        self.with_state(|s| s.finish_save(ticket, result));
    }

    // === Toolbar and modals ===

    pub async fn toolbar_click(self: Rc<Self>, id: String) {
        self.prepare_insert();
        let outcome = self.with_state(|s| s.toolbar_click(&id));
        match outcome {
            ToolbarOutcome::Inserted(outcome) => self.show_insert(&outcome),
            ToolbarOutcome::Opened(kind, follow_up) => {
                tracing::debug!(modal = kind.dom_id(), "opened from toolbar");
                self.run_modal_open(follow_up).await;
            }
            ToolbarOutcome::Unknown => {}
        }
    }

    async fn open_modal(self: Rc<Self>, kind: ModalKind) {
        let follow_up = self.with_state(|s| s.open_modal(kind));
        if kind == ModalKind::Search {
            dom::focus(ids::SEARCH_QUERY);
        }
        self.run_modal_open(follow_up).await;
    }

    async fn run_modal_open(&self, follow_up: ModalOpen) {
        match follow_up {
            ModalOpen::Ready => {}
            ModalOpen::MediaList(ticket) => self.run_media_list(ticket).await,
            ModalOpen::Taxonomy(ticket) => self.run_taxonomy(ticket).await,
        }
    }

    pub fn close_modal(&self) {
        self.with_state(EditorState::close_modal);
    }

    async fn run_media_list(&self, ticket: MediaListTicket) {
        let result = self.api.media_list().await;
        self.with_state(|s| s.finish_media_list(ticket, result));
    }

    async fn run_taxonomy(&self, ticket: TaxonomyTicket) {
        let tags = self.api.tags().await;
        let categories = self.api.categories().await;
        self.with_state(|s| s.finish_taxonomy(ticket, tags, categories));
    }

    async fn confirm_media(self: Rc<Self>) {
        self.prepare_insert();
        let choice = MediaChoice {
            file: dom::value_of(ids::MEDIA_FILE_SELECT),
            alt: dom::value_of(ids::MEDIA_ALT),
            new_name: Some(dom::value_of(ids::MEDIA_NEW_NAME)),
        };
        let confirmed = self.with_state(|s| s.confirm_media(choice));
        let outcome = match confirmed {
            MediaConfirm::Closed => None,
            MediaConfirm::Inserted(outcome) => Some(outcome),
            MediaConfirm::Process(ticket) => {
                let result = self.api.process_media(&ticket.request).await;
                self.with_state(|s| s.finish_process_media(ticket, result))
            }
        };
        if let Some(outcome) = outcome {
            dom::set_value(ids::MEDIA_ALT, "");
            dom::set_value(ids::MEDIA_NEW_NAME, "");
            self.show_insert(&outcome);
        }
    }

    fn confirm_blockquote(&self) {
        self.prepare_insert();
        let kind = dom::value_of(ids::BLOCKQUOTE_KIND)
            .parse::<BlockquoteKind>()
            .unwrap_or_else(|err| {
                tracing::warn!("{err}");
                BlockquoteKind::default()
            });
        let content = dom::value_of(ids::BLOCKQUOTE_CONTENT);
        let outcome = self.with_state(|s| s.confirm_blockquote(kind, &content));
        dom::set_value(ids::BLOCKQUOTE_CONTENT, "");
        self.show_insert(&outcome);
    }

    fn confirm_colored_code(&self) {
        self.prepare_insert();
        let language = dom::value_of(ids::CODE_LANGUAGE);
        let body = dom::value_of(ids::CODE_CONTENT);
        let outcome = self.with_state(|s| s.confirm_colored_code(&language, &body));
        dom::set_value(ids::CODE_CONTENT, "");
        self.show_insert(&outcome);
    }

    pub async fn select_link_language(self: Rc<Self>, language: String) {
        let ticket = self.with_state(|s| s.select_link_language(&language));
        if let Some(ticket) = ticket {
            let result = self.api.list_files(&ticket.language).await;
            self.with_state(|s| s.finish_link_list(ticket, result));
        }
    }

    fn confirm_internal_link(&self) {
        self.prepare_insert();
        let link = InternalLink {
            language: dom::value_of(ids::LINK_LANGUAGE),
            file: dom::value_of(ids::LINK_FILE),
            text: dom::value_of(ids::LINK_TEXT),
            show_button: dom::is_checked(ids::LINK_AS_BUTTON),
            color: dom::value_of(ids::LINK_COLOR),
        };
        let outcome = self.with_state(|s| s.confirm_internal_link(&link));
        if let Some(outcome) = outcome {
            dom::set_value(ids::LINK_TEXT, "");
            self.show_insert(&outcome);
        }
    }

    /// Show or hide the button color picker with the switch.
    pub fn toggle_link_button(&self) {
        let show = dom::is_checked(ids::LINK_AS_BUTTON);
        dom::toggle_class(ids::LINK_COLOR_GROUP, "hidden", !show);
    }

    // === Search ===

    fn find(&self, forward: bool) {
        let query = dom::value_of(ids::SEARCH_QUERY);
        if query.is_empty() {
            return;
        }
        self.capture_selection();
        let hit = self.with_state(|s| {
            let doc = s.document_mut();
            if forward {
                doc.find_next(&query)
            } else {
                doc.find_prev(&query)
            }
        });
        let Some(range) = hit else {
            tracing::debug!(%query, "no match");
            return;
        };
        if let Some(area) = textarea::editor()
            && let Err(e) = textarea::select(&area, self.state.borrow().document(), range)
        {
            tracing::warn!("could not select match: {:?}", e);
        }
    }

    fn replace_all(&self) {
        let query = dom::value_of(ids::SEARCH_QUERY);
        let Some(replacement) = platform::prompt("Replace with:", "") else {
            return;
        };
        if query.is_empty() {
            return;
        }
        let count = self.with_state(|s| s.document_mut().replace_all(&query, &replacement));
        tracing::debug!(count, "replace all");
    }

    // === Wizard ===

    pub fn wizard_field(&self, field: WizardField, value: String) {
        self.with_state(|s| s.wizard_mut().set_field(field, value));
    }

    pub fn wizard_local_file(&self, input: &HtmlInputElement) {
        let name = input
            .files()
            .and_then(|files| files.get(0))
            .map(|file| file.name())
            .unwrap_or_default();
        self.wizard_field(WizardField::ThumbnailLocalFile, name);
    }

    /// Add the typed tag (or category) from its input and clear it.
    pub fn wizard_add_entry(&self, input_id: &str) {
        let value = dom::value_of(input_id);
        let is_tag = input_id == ids::NEW_TAG;
        self.with_state(|s| {
            let wizard = s.wizard_mut();
            if is_tag {
                wizard.add_tag(&value)
            } else {
                wizard.add_category(&value)
            }
        });
        dom::set_value(input_id, "");
        dom::focus(input_id);
    }

    pub fn wizard_toggle_tag(&self, tag: &str) {
        self.with_state(|s| s.wizard_mut().toggle_tag(tag));
    }

    pub fn wizard_remove_tag(&self, tag: &str) {
        self.with_state(|s| s.wizard_mut().remove_tag(tag));
    }

    pub fn wizard_toggle_category(&self, category: &str) {
        self.with_state(|s| s.wizard_mut().toggle_category(category));
    }

    pub fn wizard_remove_category(&self, category: &str) {
        self.with_state(|s| s.wizard_mut().remove_category(category));
    }

    async fn submit_post(self: Rc<Self>) {
        let Some(ticket) = self.with_state(EditorState::begin_create_post) else {
            return;
        };
        let result = self.api.create_post(&ticket.form).await;
        self.with_state(|s| s.finish_create_post(ticket, result));
    }

    // === Spell check ===

    async fn spell_check(self: Rc<Self>) {
        let ticket = self.with_state(EditorState::begin_spell_check);
        let result = self.spell.check(&ticket.text, &ticket.language).await;
        self.with_state(|s| s.finish_spell_check(ticket, result));
    }

    /// Select the text an annotation points at.
    pub fn focus_annotation(&self, index: usize) {
        let state = self.state.borrow();
        let Some(annotation) = state.annotations().get(index) else {
            return;
        };
        if let Some(area) = textarea::editor()
            && let Err(e) = textarea::select(&area, state.document(), annotation.range.clone())
        {
            tracing::warn!("could not select annotation: {:?}", e);
        }
    }

    // === Clipboard ===

    async fn copy(self: Rc<Self>) {
        let content = self.state.borrow().document().content();
        let notice = match platform::write_clipboard_text(&content).await {
            Ok(()) => Notice::info(scribe_editor_core::state::COPY_SUCCESS_MESSAGE),
            Err(err) => Notice::error(format!("Failed to copy: {}", platform::describe(&err))),
        };
        self.with_state(|s| s.notify(notice));
    }

    async fn paste(self: Rc<Self>) {
        self.prepare_insert();
        match platform::read_clipboard_text().await {
            Ok(text) => {
                let outcome = self.with_state(|s| s.paste(&text));
                if let Some(outcome) = outcome {
                    self.show_insert(&outcome);
                }
            }
            Err(err) => {
                let notice = Notice::error(format!("Failed to paste: {}", platform::describe(&err)));
                self.with_state(|s| s.notify(notice));
            }
        }
    }

    fn toggle_fullscreen(&self) {
        let Some(root) = dom::document().document_element() else {
            return;
        };
        if let Err(e) = platform::toggle_fullscreen(&root) {
            tracing::warn!("fullscreen failed: {:?}", e);
        }
    }

    // === Media library ===

    pub fn set_media_filter(&self, filter: String) {
        self.with_state(|s| s.media_mut().set_filter(filter));
    }

    pub fn toggle_media(&self, name: &str) {
        self.with_state(|s| s.media_mut().toggle_selected(name));
    }

    async fn refresh_media(self: Rc<Self>) {
        let ticket = self.with_state(EditorState::refresh_media);
        self.run_media_list(ticket).await;
    }

    async fn delete_media(self: Rc<Self>) {
        let prompt = self.state.borrow().media().delete_prompt();
        if let Some(prompt) = prompt
            && !platform::confirm(&prompt)
        {
            return;
        }
        let Some(ticket) = self.with_state(EditorState::begin_delete_media) else {
            return;
        };
        let mut results = Vec::with_capacity(ticket.files.len());
        for file in &ticket.files {
            results.push(self.api.delete_media(file).await);
        }
        let refresh = self.with_state(|s| s.finish_delete_media(ticket, results));
        self.run_media_list(refresh).await;
    }

    async fn upload_media(self: Rc<Self>) {
        let Some(input) = dom::by_id::<HtmlInputElement>(ids::MEDIA_UPLOAD) else {
            return;
        };
        let Some(files) = input.files() else {
            return;
        };
        for index in 0..files.length() {
            let Some(file) = files.get(index) else {
                continue;
            };
            let bytes = match platform::read_file(&file).await {
                Ok(bytes) => bytes,
                Err(err) => {
                    tracing::error!("could not read {}: {:?}", file.name(), err);
                    continue;
                }
            };
            let mut ticket = self.with_state(|s| s.begin_upload_media(&file.name(), bytes));
            let bytes = std::mem::take(&mut ticket.bytes);
            let result = self.api.upload_media(&ticket.file_name, bytes).await;
            let refresh = self.with_state(|s| s.finish_upload_media(ticket, result));
            if let Some(refresh) = refresh {
                self.run_media_list(refresh).await;
            }
        }
        input.set_value("");
    }

    // === Dispatch ===

    pub fn dispatch(self: &Rc<Self>, action: EditorAction) {
        tracing::trace!(action = action.name(), "dispatch");
        match action {
            EditorAction::Save => self.spawn(App::save),
            EditorAction::SpellCheck => self.spawn(App::spell_check),
            EditorAction::Copy => self.spawn(App::copy),
            EditorAction::Paste => self.spawn(App::paste),
            EditorAction::ToggleFullscreen => self.toggle_fullscreen(),
            EditorAction::OpenSearch => self.spawn(|app| app.open_modal(ModalKind::Search)),
            EditorAction::OpenNewPost => self.spawn(|app| app.open_modal(ModalKind::NewPost)),
            EditorAction::CloseModal => self.close_modal(),
            EditorAction::InsertMedia => self.spawn(App::confirm_media),
            EditorAction::InsertBlockquote => self.confirm_blockquote(),
            EditorAction::InsertColoredCode => self.confirm_colored_code(),
            EditorAction::InsertInternalLink => self.confirm_internal_link(),
            EditorAction::FindNext => self.find(true),
            EditorAction::FindPrevious => self.find(false),
            EditorAction::ReplaceAll => self.replace_all(),
            EditorAction::WizardNext => {
                self.with_state(|s| s.wizard_mut().next());
            }
            EditorAction::WizardPrevious => {
                self.with_state(|s| s.wizard_mut().previous());
            }
            EditorAction::WizardSubmit => self.spawn(App::submit_post),
            EditorAction::RefreshMedia => self.spawn(App::refresh_media),
            EditorAction::DeleteMedia => self.spawn(App::delete_media),
            EditorAction::UploadMedia => self.spawn(App::upload_media),
        }
    }
}

fn to_js(err: scribe_common::ScribeError) -> JsValue {
    JsValue::from_str(&err.to_string())
}
