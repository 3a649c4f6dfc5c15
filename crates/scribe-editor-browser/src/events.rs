//! Delegated DOM event handling.
//!
//! One listener per event type on the document. Handlers look at the
//! target's id or `data-*` attributes and hand off to [`App`].

use std::rc::Rc;

use gloo_events::{EventListener, EventListenerOptions};
use scribe_editor_core::{EditorAction, WizardField};
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlInputElement, KeyboardEvent};

use crate::app::App;
use crate::dom::{self, ids};
use crate::modals;

fn target_element(event: &Event) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}

/// `attribute` of the nearest ancestor (or self) matching `selector`.
fn closest_attr(target: &Element, selector: &str, attribute: &str) -> Option<String> {
    target.closest(selector).ok().flatten()?.get_attribute(attribute)
}

/// Attach every listener. Dropping the returned listeners detaches them.
pub fn attach(app: &Rc<App>) -> Vec<EventListener> {
    let document = dom::document();
    let mut listeners = Vec::new();

    let handler = Rc::clone(app);
    listeners.push(EventListener::new_with_options(
        &document,
        "click",
        EventListenerOptions::enable_prevent_default(),
        move |event| on_click(&handler, event),
    ));

    let handler = Rc::clone(app);
    listeners.push(EventListener::new(&document, "change", move |event| {
        on_change(&handler, event)
    }));

    let handler = Rc::clone(app);
    listeners.push(EventListener::new(&document, "input", move |event| {
        on_input(&handler, event)
    }));

    let handler = Rc::clone(app);
    listeners.push(EventListener::new_with_options(
        &document,
        "keydown",
        EventListenerOptions::enable_prevent_default(),
        move |event| on_keydown(&handler, event),
    ));

    // The caret only counts as placed once the user touched the textarea.
    for kind in ["keyup", "mouseup", "select"] {
        let handler = Rc::clone(app);
        listeners.push(EventListener::new(&document, kind, move |event| {
            if target_element(event).is_some_and(|t| t.id() == ids::EDITOR) {
                handler.capture_selection();
            }
        }));
    }

    listeners
}

fn on_click(app: &Rc<App>, event: &Event) {
    let Some(target) = target_element(event) else {
        return;
    };

    if modals::is_backdrop(&target) {
        app.close_modal();
        return;
    }
    if let Some(id) = closest_attr(&target, "[data-shortcode]", "data-shortcode") {
        event.prevent_default();
        app.spawn(move |app| app.toolbar_click(id));
        return;
    }
    if let Some(name) = closest_attr(&target, "[data-action]", "data-action") {
        event.prevent_default();
        match EditorAction::from_name(&name) {
            Some(action) => app.dispatch(action),
            None => tracing::warn!(action = %name, "unknown action"),
        }
        return;
    }
    if target.closest("[data-bs-dismiss=\"modal\"]").ok().flatten().is_some() {
        app.close_modal();
        return;
    }

    if let Some(tag) = closest_attr(&target, ".toggle-tag", "data-tag") {
        app.wizard_toggle_tag(&tag);
    } else if let Some(tag) = closest_attr(&target, ".remove-tag", "data-tag") {
        app.wizard_remove_tag(&tag);
    } else if let Some(category) = closest_attr(&target, ".toggle-category", "data-category") {
        app.wizard_toggle_category(&category);
    } else if let Some(category) = closest_attr(&target, ".remove-category", "data-category") {
        app.wizard_remove_category(&category);
    } else if let Some(name) = closest_attr(&target, "[data-media]", "data-media") {
        app.toggle_media(&name);
    } else if let Some(index) = closest_attr(&target, "[data-annotation]", "data-annotation")
        .and_then(|i| i.parse::<usize>().ok())
    {
        app.focus_annotation(index);
    }
}

fn on_change(app: &Rc<App>, event: &Event) {
    let Some(target) = target_element(event) else {
        return;
    };
    let id = target.id();
    match id.as_str() {
        ids::LANGUAGE_SELECT => {
            let language = dom::value_of(&id);
            app.spawn(move |app| app.change_language(language));
        }
        ids::FILE_SELECT => {
            let filename = dom::value_of(&id);
            app.spawn(move |app| app.select_file(filename));
        }
        ids::LINK_LANGUAGE => {
            let language = dom::value_of(&id);
            app.spawn(move |app| app.select_link_language(language));
        }
        ids::LINK_AS_BUTTON => app.toggle_link_button(),
        ids::MEDIA_UPLOAD => app.dispatch(EditorAction::UploadMedia),
        _ => match WizardField::from_dom_id(&id) {
            Some(WizardField::ThumbnailLocalFile) => {
                if let Some(input) = target.dyn_ref::<HtmlInputElement>() {
                    app.wizard_local_file(input);
                }
            }
            Some(field) => app.wizard_field(field, dom::value_of(&id)),
            None => {}
        },
    }
}

fn on_input(app: &Rc<App>, event: &Event) {
    let Some(target) = target_element(event) else {
        return;
    };
    let id = target.id();
    match id.as_str() {
        ids::EDITOR => app.editor_input(),
        ids::MEDIA_FILTER => app.set_media_filter(dom::value_of(&id)),
        _ => {
            if let Some(field) = WizardField::from_dom_id(&id)
                && field != WizardField::ThumbnailLocalFile
            {
                app.wizard_field(field, dom::value_of(&id));
            }
        }
    }
}

fn on_keydown(app: &Rc<App>, event: &Event) {
    let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
        return;
    };
    let id = target_element(event).map(|t| t.id()).unwrap_or_default();
    let key = event.key();

    if (event.ctrl_key() || event.meta_key()) && key.eq_ignore_ascii_case("s") {
        event.prevent_default();
        app.dispatch(EditorAction::Save);
        return;
    }
    match (key.as_str(), id.as_str()) {
        ("Escape", _) => app.close_modal(),
        ("Enter", ids::NEW_TAG | ids::NEW_CATEGORY) => {
            event.prevent_default();
            app.wizard_add_entry(&id);
        }
        ("Enter", ids::SEARCH_QUERY) => {
            event.prevent_default();
            let action = if event.shift_key() {
                EditorAction::FindPrevious
            } else {
                EditorAction::FindNext
            };
            app.dispatch(action);
        }
        _ => {}
    }
}
