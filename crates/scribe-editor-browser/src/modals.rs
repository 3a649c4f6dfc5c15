//! Showing and hiding the page's Bootstrap-style modals.
//!
//! The core's `ModalRegistry` decides which modal is open; this module only
//! mirrors that onto the markup.

use scribe_editor_core::ModalKind;
use wasm_bindgen::JsValue;

use crate::dom;

const BACKDROP_ID: &str = "scribe-modal-backdrop";

fn set_visible(kind: ModalKind, visible: bool) -> Result<(), JsValue> {
    let Some(element) = dom::document().get_element_by_id(kind.dom_id()) else {
        tracing::debug!(modal = kind.dom_id(), "modal not on this page");
        return Ok(());
    };
    let classes = element.class_list();
    if visible {
        classes.add_2("show", "d-block")?;
        element.set_attribute("aria-hidden", "false")?;
        element.set_attribute("aria-modal", "true")?;
    } else {
        classes.remove_2("show", "d-block")?;
        element.set_attribute("aria-hidden", "true")?;
        element.remove_attribute("aria-modal")?;
    }
    Ok(())
}

fn set_backdrop(visible: bool) -> Result<(), JsValue> {
    let document = dom::document();
    let Some(body) = document.body() else {
        return Ok(());
    };
    let existing = document.get_element_by_id(BACKDROP_ID);
    match (visible, existing) {
        (true, None) => {
            let backdrop = dom::create("div", "modal-backdrop fade show")?;
            backdrop.set_id(BACKDROP_ID);
            body.append_child(&backdrop)?;
            body.class_list().add_1("modal-open")?;
        }
        (false, Some(backdrop)) => {
            backdrop.remove();
            body.class_list().remove_1("modal-open")?;
        }
        _ => {}
    }
    Ok(())
}

/// Show `open` and hide every other modal.
pub fn sync(open: Option<ModalKind>) {
    let result = ModalKind::ALL
        .into_iter()
        .try_for_each(|kind| set_visible(kind, Some(kind) == open))
        .and_then(|()| set_backdrop(open.is_some()));
    if let Err(e) = result {
        tracing::warn!("modal sync failed: {:?}", e);
    }
}

/// Whether a click landed on the backdrop or on the modal's own overlay.
pub fn is_backdrop(element: &web_sys::Element) -> bool {
    element.id() == BACKDROP_ID
        || (element.class_list().contains("modal") && ModalKind::from_dom_id(&element.id()).is_some())
}
