//! Warns before leaving the page with unsaved changes.

use gloo_events::{EventListener, EventListenerOptions};
use wasm_bindgen::JsCast;
use web_sys::BeforeUnloadEvent;

/// Install a `beforeunload` handler. `warning` is asked on every attempt
/// to leave; `Some` blocks navigation with that message.
pub fn install<F>(warning: F) -> Option<EventListener>
where
    F: Fn() -> Option<&'static str> + 'static,
{
    let window = web_sys::window()?;
    let listener = EventListener::new_with_options(
        &window,
        "beforeunload",
        EventListenerOptions::enable_prevent_default(),
        move |event| {
            let Some(message) = warning() else {
                return;
            };
            event.prevent_default();
            if let Some(event) = event.dyn_ref::<BeforeUnloadEvent>() {
                event.set_return_value(message);
            }
        },
    );
    Some(listener)
}
