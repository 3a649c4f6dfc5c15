//! Mirrors `EditorState` onto the page.
//!
//! Each section remembers what it last drew and is rebuilt only when that
//! changes, so selects keep their focus and the textarea keeps its caret.

use scribe_common::ClientConfig;
use scribe_editor_core::inserters::{BUTTON_COLORS, code_language_options};
use scribe_editor_core::media::MEDIA_FETCH_ERROR;
use scribe_editor_core::{
    Annotation, BlockquoteKind, EditorState, ListState, ModalKind, NewPostWizard, TextBuffer,
    ToolbarButton, WizardField, WizardStep,
};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, HtmlInputElement, HtmlSelectElement};

use crate::dom::{self, MEDIA_PREVIEW_PATH, SelectOption, ids};
use crate::{modals, textarea};

const LOADING_LABEL: &str = "Loading...";

/// Shape of the wizard that needs a rebuild when it changes. Field values
/// are synced separately so typing never rebuilds.
#[derive(Clone, Debug, PartialEq)]
struct WizardShape {
    step: WizardStep,
    tags: Vec<String>,
    categories: Vec<String>,
    existing_tags: Vec<String>,
    existing_categories: Vec<String>,
    local_file: String,
}

impl WizardShape {
    fn of(wizard: &NewPostWizard) -> Self {
        let form = wizard.form();
        Self {
            step: wizard.step(),
            tags: form.tags.clone(),
            categories: form.categories.clone(),
            existing_tags: wizard.existing_tags().iter().map(|t| t.name.clone()).collect(),
            existing_categories: wizard
                .existing_categories()
                .iter()
                .map(|c| c.name.clone())
                .collect(),
            local_file: form.thumbnail.local_file.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
struct LibraryShape {
    files: ListState,
    filter: String,
    selected: Vec<String>,
}

#[derive(Default)]
pub struct Renderer {
    modal: Option<Option<ModalKind>>,
    toolbar: Option<Vec<ToolbarButton>>,
    files: Option<(String, ListState, Option<String>)>,
    media_choices: Option<ListState>,
    link_files: Option<(Option<String>, ListState)>,
    wizard: Option<WizardShape>,
    library: Option<LibraryShape>,
    annotations: Option<(u64, Vec<Annotation>)>,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget everything drawn so the next render rebuilds all sections.
    pub fn invalidate(&mut self) {
        *self = Self::default();
    }

    pub fn render(&mut self, state: &EditorState) {
        if let Some(area) = textarea::editor() {
            textarea::write_content(&area, state.document());
        }
        let sections = [
            self.render_modal(state),
            self.render_toolbar(state),
            self.render_files(state),
            self.render_media_choices(state),
            self.render_link_files(state),
            self.render_wizard(state),
            self.render_library(state),
            self.render_annotations(state),
        ];
        for result in sections {
            if let Err(e) = result {
                tracing::warn!("render failed: {:?}", e);
            }
        }
    }

    fn render_modal(&mut self, state: &EditorState) -> Result<(), JsValue> {
        let open = state.modals().current();
        if self.modal != Some(open) {
            modals::sync(open);
            self.modal = Some(open);
        }
        Ok(())
    }

    fn render_toolbar(&mut self, state: &EditorState) -> Result<(), JsValue> {
        let buttons = state.toolbar().buttons();
        if self.toolbar.as_deref() == Some(buttons) {
            return Ok(());
        }
        if let Some(container) = dom::document().get_element_by_id(ids::TOOLBAR) {
            dom::clear(&container);
            for button in buttons {
                container.append_child(&toolbar_button(button)?.into())?;
            }
        }
        self.toolbar = Some(buttons.to_vec());
        Ok(())
    }

    fn render_files(&mut self, state: &EditorState) -> Result<(), JsValue> {
        let files = state.files();
        let shape = (
            files.language().to_owned(),
            files.files().clone(),
            files.selected().map(str::to_owned),
        );
        if self.files.as_ref() == Some(&shape) {
            return Ok(());
        }
        if let Some(select) = dom::by_id::<HtmlSelectElement>(ids::LANGUAGE_SELECT) {
            select.set_value(&shape.0);
        }
        if let Some(select) = dom::by_id::<HtmlSelectElement>(ids::FILE_SELECT) {
            fill_list(&select, &shape.1, None, shape.2.as_deref())?;
        }
        self.files = Some(shape);
        Ok(())
    }

    fn render_media_choices(&mut self, state: &EditorState) -> Result<(), JsValue> {
        let choices = state.media_choices();
        if self.media_choices.as_ref() == Some(choices) {
            return Ok(());
        }
        if let Some(select) = dom::by_id::<HtmlSelectElement>(ids::MEDIA_FILE_SELECT) {
            fill_list(&select, choices, Some("Select a file"), None)?;
        }
        self.media_choices = Some(choices.clone());
        Ok(())
    }

    fn render_link_files(&mut self, state: &EditorState) -> Result<(), JsValue> {
        let shape = (
            state.link_language().map(str::to_owned),
            state.link_files().clone(),
        );
        if self.link_files.as_ref() == Some(&shape) {
            return Ok(());
        }
        if let Some(select) = dom::by_id::<HtmlSelectElement>(ids::LINK_LANGUAGE) {
            select.set_value(shape.0.as_deref().unwrap_or("-"));
        }
        if let Some(select) = dom::by_id::<HtmlSelectElement>(ids::LINK_FILE) {
            fill_list(&select, &shape.1, Some("-"), None)?;
        }
        self.link_files = Some(shape);
        Ok(())
    }

    fn render_wizard(&mut self, state: &EditorState) -> Result<(), JsValue> {
        let wizard = state.wizard();
        let shape = WizardShape::of(wizard);
        if self.wizard.as_ref() != Some(&shape) {
            if let Some(container) = dom::document().get_element_by_id(ids::WIZARD) {
                draw_wizard(&container, wizard, state.config())?;
            }
            self.wizard = Some(shape);
        }
        sync_wizard_fields(wizard);
        Ok(())
    }

    fn render_library(&mut self, state: &EditorState) -> Result<(), JsValue> {
        let media = state.media();
        let shape = LibraryShape {
            files: media.files().clone(),
            filter: media.filter().to_owned(),
            selected: media.selected().to_vec(),
        };
        if self.library.as_ref() == Some(&shape) {
            return Ok(());
        }
        if let Some(container) = dom::document().get_element_by_id(ids::MEDIA_LIBRARY) {
            dom::clear(&container);
            match media.files() {
                ListState::Loading => {
                    container.append_child(&dom::create_text("p", "text-muted", LOADING_LABEL)?.into())?;
                }
                ListState::Failed(_) => {
                    container.append_child(&dom::create_text("p", "text-danger", MEDIA_FETCH_ERROR)?.into())?;
                }
                ListState::Empty | ListState::Ready(_) => {
                    for name in media.visible() {
                        container.append_child(&media_card(name, media.is_selected(name))?.into())?;
                    }
                }
            }
        }
        self.library = Some(shape);
        Ok(())
    }

    fn render_annotations(&mut self, state: &EditorState) -> Result<(), JsValue> {
        let revision = state.document().revision();
        let annotations = state.annotations();
        if let Some((rev, drawn)) = &self.annotations
            && *rev == revision
            && drawn.as_slice() == annotations
        {
            return Ok(());
        }
        if let Some(list) = dom::document().get_element_by_id(ids::SPELL_RESULTS) {
            dom::clear(&list);
            let buffer = state.document().buffer();
            for (index, annotation) in annotations.iter().enumerate() {
                let snippet = buffer
                    .slice(annotation.range.clone())
                    .unwrap_or_default();
                let item = dom::create_text(
                    "li",
                    &format!("list-group-item spell-issue {}", annotation.css_class()),
                    &format!("\u{201c}{snippet}\u{201d}: {}", annotation.message),
                )?;
                item.set_attribute("data-annotation", &index.to_string())?;
                list.append_child(&item)?;
            }
        }
        self.annotations = Some((revision, annotations.to_vec()));
        Ok(())
    }
}

/// Fill the selects whose options never change.
pub fn populate_static(config: &ClientConfig) -> Result<(), JsValue> {
    let languages: Vec<_> = config
        .languages
        .iter()
        .map(|l| SelectOption::new(&l.code, &l.label))
        .collect();
    if let Some(select) = dom::by_id::<HtmlSelectElement>(ids::LANGUAGE_SELECT) {
        dom::fill_select(&select, &languages, Some(&config.default_language))?;
    }
    if let Some(select) = dom::by_id::<HtmlSelectElement>(ids::LINK_LANGUAGE) {
        let mut options = vec![SelectOption::plain("-")];
        options.extend(config.languages.iter().map(|l| SelectOption::new(&l.code, &l.label)));
        dom::fill_select(&select, &options, Some("-"))?;
    }
    if let Some(select) = dom::by_id::<HtmlSelectElement>(ids::BLOCKQUOTE_KIND) {
        let options: Vec<_> = BlockquoteKind::ALL
            .iter()
            .map(|k| SelectOption::plain(k.as_str()))
            .collect();
        dom::fill_select(&select, &options, None)?;
    }
    if let Some(select) = dom::by_id::<HtmlSelectElement>(ids::CODE_LANGUAGE) {
        let pairs: Vec<_> = code_language_options().collect();
        let options: Vec<_> = pairs
            .iter()
            .map(|(value, label)| SelectOption::new(value, label))
            .collect();
        dom::fill_select(&select, &options, None)?;
    }
    if let Some(select) = dom::by_id::<HtmlSelectElement>(ids::LINK_COLOR) {
        let options: Vec<_> = BUTTON_COLORS.iter().map(|c| SelectOption::plain(c)).collect();
        dom::fill_select(&select, &options, Some("primary"))?;
    }
    Ok(())
}

fn fill_list(
    select: &HtmlSelectElement,
    list: &ListState,
    prompt: Option<&str>,
    selected: Option<&str>,
) -> Result<(), JsValue> {
    let mut options = Vec::new();
    match list {
        ListState::Empty => {}
        ListState::Loading => options.push(SelectOption::placeholder(LOADING_LABEL)),
        ListState::Failed(message) => options.push(SelectOption::placeholder(message)),
        ListState::Ready(items) => {
            if let Some(prompt) = prompt {
                options.push(SelectOption::new("", prompt));
            }
            options.extend(items.iter().map(|item| SelectOption::plain(item)));
        }
    }
    dom::fill_select(select, &options, selected)
}

fn toolbar_button(button: &ToolbarButton) -> Result<Element, JsValue> {
    let element = dom::create("button", "btn btn-light btn-sm me-1")?;
    element.set_attribute("type", "button")?;
    element.set_attribute("title", &button.tooltip)?;
    element.set_attribute("data-shortcode", &button.id)?;
    let icon = dom::create("i", &button.icon_class())?;
    element.append_child(&icon)?;
    Ok(element)
}

fn media_card(name: &str, selected: bool) -> Result<Element, JsValue> {
    let class = if selected {
        "card media-item border-primary"
    } else {
        "card media-item"
    };
    let card = dom::create("div", class)?;
    card.set_attribute("data-media", name)?;
    let image = dom::create("img", "card-img-top")?;
    image.set_attribute("src", &format!("{MEDIA_PREVIEW_PATH}{name}"))?;
    image.set_attribute("alt", name)?;
    image.set_attribute("loading", "lazy")?;
    card.append_child(&image)?;

    let body = dom::create("div", "card-body")?;
    let check = dom::create("input", "form-check-input")?.unchecked_into::<HtmlInputElement>();
    check.set_type("checkbox");
    check.set_checked(selected);
    body.append_child(&check)?;
    body.append_child(&dom::create_text("p", "card-title small", name)?.into())?;
    card.append_child(&body)?;
    Ok(card)
}

// === Wizard ===

fn draw_wizard(
    container: &Element,
    wizard: &NewPostWizard,
    config: &ClientConfig,
) -> Result<(), JsValue> {
    dom::clear(container);

    let steps = dom::create("ul", "nav nav-pills mb-3")?;
    for step in WizardStep::ALL {
        let item = dom::create("li", "nav-item")?;
        let class = if step == wizard.step() {
            "nav-link active"
        } else {
            "nav-link"
        };
        item.append_child(&dom::create_text("span", class, step.label())?.into())?;
        steps.append_child(&item)?;
    }
    container.append_child(&steps)?;

    let body = dom::create("div", "step-content")?;
    match wizard.step() {
        WizardStep::BasicInfo => basic_info_step(&body, config)?,
        WizardStep::Thumbnail => thumbnail_step(&body, wizard)?,
        WizardStep::Taxonomy => taxonomy_step(&body, wizard)?,
    }
    container.append_child(&body)?;

    let nav = dom::create("div", "d-flex justify-content-between mt-4")?;
    if wizard.step().previous().is_some() {
        nav.append_child(&action_button("btn btn-secondary", "wizard-prev", "Previous")?.into())?;
    } else {
        nav.append_child(&dom::create("div", "")?.into())?;
    }
    if wizard.step().is_last() {
        nav.append_child(&action_button("btn btn-success", "wizard-submit", "Create Post")?.into())?;
    } else {
        nav.append_child(&action_button("btn btn-primary", "wizard-next", "Next")?.into())?;
    }
    container.append_child(&nav)?;
    Ok(())
}

fn action_button(class: &str, action: &str, label: &str) -> Result<Element, JsValue> {
    let button = dom::create_text("button", class, label)?;
    button.set_attribute("type", "button")?;
    button.set_attribute("data-action", action)?;
    Ok(button)
}

/// A labelled form control with the field's DOM id.
fn field(parent: &Element, label: &str, tag: &str, id: &str, kind: Option<&str>) -> Result<Element, JsValue> {
    let group = dom::create("div", "mb-3")?;
    let label_el = dom::create_text("label", "form-label", label)?;
    label_el.set_attribute("for", id)?;
    group.append_child(&label_el)?;
    let class = if tag == "select" { "form-select" } else { "form-control" };
    let control = dom::create(tag, class)?;
    control.set_id(id);
    if let Some(kind) = kind {
        control.set_attribute("type", kind)?;
    }
    group.append_child(&control)?;
    parent.append_child(&group)?;
    Ok(control)
}

fn basic_info_step(body: &Element, config: &ClientConfig) -> Result<(), JsValue> {
    let language = field(body, "Language", "select", WizardField::Language.dom_id(), None)?
        .unchecked_into::<HtmlSelectElement>();
    let options: Vec<_> = config
        .languages
        .iter()
        .map(|l| SelectOption::new(&l.code, &l.label))
        .collect();
    dom::fill_select(&language, &options, None)?;

    field(body, "Title", "input", WizardField::Title.dom_id(), Some("text"))?
        .set_attribute("required", "")?;
    field(body, "Slug", "input", WizardField::Slug.dom_id(), Some("text"))?
        .set_attribute("placeholder", "derived from the title when empty")?;
    field(body, "Description", "textarea", WizardField::Description.dom_id(), None)?;
    field(body, "Date", "input", WizardField::Date.dom_id(), Some("datetime-local"))?
        .set_attribute("required", "")?;
    Ok(())
}

fn thumbnail_step(body: &Element, wizard: &NewPostWizard) -> Result<(), JsValue> {
    field(body, "Thumbnail URL", "input", WizardField::ThumbnailUrl.dom_id(), Some("text"))?;
    let local = field(
        body,
        "Thumbnail Local Image (select from the media-folder)",
        "input",
        WizardField::ThumbnailLocalFile.dom_id(),
        Some("file"),
    )?;
    local.set_attribute("accept", "image/*")?;
    let chosen = format!("selected value: {}", wizard.form().thumbnail.local_file);
    body.append_child(&dom::create_text("p", "small text-muted", &chosen)?.into())?;
    field(body, "Author", "input", WizardField::ThumbnailAuthor.dom_id(), Some("text"))?;
    field(body, "Author URL", "input", WizardField::ThumbnailAuthorUrl.dom_id(), Some("url"))?;
    field(body, "Origin", "input", WizardField::ThumbnailOrigin.dom_id(), Some("text"))?;
    Ok(())
}

struct TaxonomySection<'a> {
    label: &'a str,
    /// `tag` or `category`; names the data attribute and classes.
    noun: &'a str,
    input_id: &'a str,
    color: &'a str,
    selected: &'a [String],
    existing: Vec<&'a str>,
}

fn taxonomy_step(body: &Element, wizard: &NewPostWizard) -> Result<(), JsValue> {
    let form = wizard.form();
    let sections = [
        TaxonomySection {
            label: "Tags",
            noun: "tag",
            input_id: ids::NEW_TAG,
            color: "primary",
            selected: &form.tags,
            existing: wizard.existing_tags().iter().map(|t| t.name.as_str()).collect(),
        },
        TaxonomySection {
            label: "Categories",
            noun: "category",
            input_id: ids::NEW_CATEGORY,
            color: "secondary",
            selected: &form.categories,
            existing: wizard
                .existing_categories()
                .iter()
                .map(|c| c.name.as_str())
                .collect(),
        },
    ];
    for section in sections {
        taxonomy_section(body, &section)?;
    }
    Ok(())
}

fn taxonomy_section(body: &Element, section: &TaxonomySection<'_>) -> Result<(), JsValue> {
    let data = format!("data-{}", section.noun);
    let group = dom::create("div", "mb-3")?;
    group.append_child(&dom::create_text("label", "form-label", section.label)?.into())?;

    let chosen = dom::create("div", "mb-2")?;
    for name in section.selected {
        let badge = dom::create_text("span", &format!("badge bg-{} me-1", section.color), name)?;
        let remove = dom::create("i", &format!("fas fa-times ms-1 remove-{}", section.noun))?;
        remove.set_attribute(&data, name)?;
        badge.append_child(&remove)?;
        chosen.append_child(&badge)?;
    }
    group.append_child(&chosen)?;

    let input = dom::create("input", "form-control")?;
    input.set_id(section.input_id);
    input.set_attribute("type", "text")?;
    input.set_attribute("placeholder", &format!("Add new {}", section.noun))?;
    group.append_child(&input)?;

    let existing = dom::create("div", "mt-2")?;
    for name in &section.existing {
        let style = if section.selected.iter().any(|s| s == name) {
            format!("btn-{}", section.color)
        } else {
            format!("btn-outline-{}", section.color)
        };
        let button = dom::create_text(
            "button",
            &format!("btn btn-sm {style} me-1 mb-1 toggle-{}", section.noun),
            name,
        )?;
        button.set_attribute("type", "button")?;
        button.set_attribute(&data, name)?;
        existing.append_child(&button)?;
    }
    group.append_child(&existing)?;
    body.append_child(&group)?;
    Ok(())
}

/// Write form values into the visible inputs that show something else.
fn sync_wizard_fields(wizard: &NewPostWizard) {
    for field in WizardField::ALL {
        // File inputs cannot be assigned a value.
        if field.step() != wizard.step() || field == WizardField::ThumbnailLocalFile {
            continue;
        }
        let value = wizard.field(field);
        if dom::value_of(field.dom_id()) != value {
            dom::set_value(field.dom_id(), value);
        }
    }
}
