//! Element ids the admin page provides, and small DOM helpers.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, HtmlElement, HtmlInputElement, HtmlOptionElement, HtmlSelectElement,
    HtmlTextAreaElement,
};

/// Ids of the elements the editor binds to.
pub mod ids {
    pub const EDITOR: &str = "editor";
    pub const TOOLBAR: &str = "toolbar";
    pub const LANGUAGE_SELECT: &str = "language-select";
    pub const FILE_SELECT: &str = "file-select";
    pub const SPELL_RESULTS: &str = "spellCheckResults";

    pub const MEDIA_FILE_SELECT: &str = "mediaFileSelect";
    pub const MEDIA_ALT: &str = "altText";
    pub const MEDIA_NEW_NAME: &str = "newFileName";

    pub const BLOCKQUOTE_KIND: &str = "blockquote-type";
    pub const BLOCKQUOTE_CONTENT: &str = "blockquote-content";

    pub const CODE_LANGUAGE: &str = "code-language";
    pub const CODE_CONTENT: &str = "code-content";

    pub const LINK_LANGUAGE: &str = "languageSelect";
    pub const LINK_FILE: &str = "internalLinkSelect";
    pub const LINK_TEXT: &str = "internalLinkText";
    pub const LINK_AS_BUTTON: &str = "flexSwitchUseButton";
    pub const LINK_COLOR_GROUP: &str = "buttonColorGroup";
    pub const LINK_COLOR: &str = "buttonColorSelect";

    pub const SEARCH_QUERY: &str = "searchQuery";

    pub const WIZARD: &str = "newPostWizard";
    pub const NEW_TAG: &str = "newTag";
    pub const NEW_CATEGORY: &str = "newCategory";

    pub const MEDIA_LIBRARY: &str = "imageContainer";
    pub const MEDIA_FILTER: &str = "searchInput";
    pub const MEDIA_UPLOAD: &str = "imageUpload";
}

/// Where the media library loads previews from.
pub const MEDIA_PREVIEW_PATH: &str = "/media-data/";

pub fn document() -> Document {
    gloo_utils::document()
}

/// Look up an element by id and cast it.
pub fn by_id<T: JsCast>(id: &str) -> Option<T> {
    document().get_element_by_id(id)?.dyn_into::<T>().ok()
}

/// Current value of an input, textarea or select. Empty if missing.
pub fn value_of(id: &str) -> String {
    let Some(element) = document().get_element_by_id(id) else {
        tracing::debug!(id, "element not found");
        return String::new();
    };
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        input.value()
    } else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
        select.value()
    } else if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
        area.value()
    } else {
        String::new()
    }
}

pub fn set_value(id: &str, value: &str) {
    let Some(element) = document().get_element_by_id(id) else {
        return;
    };
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        input.set_value(value);
    } else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
        select.set_value(value);
    } else if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
        area.set_value(value);
    }
}

pub fn is_checked(id: &str) -> bool {
    by_id::<HtmlInputElement>(id).is_some_and(|input| input.checked())
}

/// Create an element with a class list.
pub fn create(tag: &str, class: &str) -> Result<Element, JsValue> {
    let element = document().create_element(tag)?;
    if !class.is_empty() {
        element.set_class_name(class);
    }
    Ok(element)
}

/// Create an element holding plain text.
pub fn create_text(tag: &str, class: &str, text: &str) -> Result<Element, JsValue> {
    let element = create(tag, class)?;
    element.set_text_content(Some(text));
    Ok(element)
}

pub fn clear(element: &Element) {
    element.set_text_content(None);
}

/// One entry of a select.
pub struct SelectOption<'a> {
    pub value: &'a str,
    pub label: &'a str,
    pub disabled: bool,
}

impl<'a> SelectOption<'a> {
    pub fn new(value: &'a str, label: &'a str) -> Self {
        Self {
            value,
            label,
            disabled: false,
        }
    }

    pub fn plain(value: &'a str) -> Self {
        Self::new(value, value)
    }

    /// A non-selectable option such as a prompt or an error message.
    pub fn placeholder(label: &'a str) -> Self {
        Self {
            value: "",
            label,
            disabled: true,
        }
    }
}

/// Replace a select's options and select `selected` if given.
pub fn fill_select(
    select: &HtmlSelectElement,
    options: &[SelectOption<'_>],
    selected: Option<&str>,
) -> Result<(), JsValue> {
    clear(select);
    for option in options {
        let element = HtmlOptionElement::new_with_text_and_value(option.label, option.value)?;
        element.set_disabled(option.disabled);
        select.append_child(&element)?;
    }
    if let Some(value) = selected {
        select.set_value(value);
    }
    Ok(())
}

/// Toggle a class on an element found by id.
pub fn toggle_class(id: &str, class: &str, on: bool) {
    let Some(element) = document().get_element_by_id(id) else {
        return;
    };
    let result = if on {
        element.class_list().add_1(class)
    } else {
        element.class_list().remove_1(class)
    };
    if let Err(e) = result {
        tracing::warn!("class toggle on #{id} failed: {:?}", e);
    }
}

pub fn focus(id: &str) {
    if let Some(element) = by_id::<HtmlElement>(id) {
        let _ = element.focus();
    }
}
