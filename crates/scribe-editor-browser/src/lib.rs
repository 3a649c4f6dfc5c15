//! Browser DOM layer for the scribe admin editor.
//!
//! Binds `scribe-editor-core` to the admin page's markup. It assumes a
//! `wasm32-unknown-unknown` target environment.
//!
//! # Architecture
//!
//! - `app`: the mounted editor and its begin/request/finish flows
//! - `events`: delegated click, change, input and keydown handling
//! - `render`: memoised mirroring of `EditorState` onto the page
//! - `textarea`: caret, selection and content sync with the `<textarea>`
//! - `modals`: show/hide of the page's modals
//! - `guard`: the unsaved-changes prompt on navigation
//! - `platform`: dialogs, clipboard, fullscreen and file reading
//!
//! # Re-exports
//!
//! This crate re-exports `scribe-editor-core` for convenience, so consumers
//! only need to depend on `scribe-editor-browser`.

pub use scribe_editor_core;
pub use scribe_editor_core::*;

pub mod app;
pub mod dom;
pub mod events;
pub mod guard;
pub mod modals;
pub mod platform;
pub mod render;
pub mod textarea;

use std::cell::RefCell;
use std::rc::Rc;

use scribe_common::ClientConfig;
use wasm_bindgen::prelude::*;

pub use app::App;

/// Id of an optional `<script type="application/json">` holding a
/// `ClientConfig`.
pub const CONFIG_ELEMENT_ID: &str = "scribe-config";

thread_local! {
    static MOUNTED: RefCell<Option<Rc<App>>> = const { RefCell::new(None) };
}

/// Client config for this page. The admin backend defaults to the page's
/// own origin unless the config names one.
pub fn page_config() -> ClientConfig {
    let embedded = dom::document()
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|element| element.text_content());
    let mut explicit_base = false;
    let mut config = match embedded.as_deref().map(serde_json::from_str::<serde_json::Value>) {
        Some(Ok(value)) => {
            explicit_base = value.get("base_url").is_some();
            serde_json::from_value(value).unwrap_or_else(|err| {
                tracing::error!("invalid editor config: {err}");
                ClientConfig::default()
            })
        }
        Some(Err(err)) => {
            tracing::error!("invalid editor config: {err}");
            ClientConfig::default()
        }
        None => ClientConfig::default(),
    };
    if !explicit_base && let Some(origin) = web_sys::window().and_then(|w| w.location().origin().ok()) {
        config.base_url = origin;
    }
    config
}

/// Mount the editor on the current page. Mounting twice is a no-op.
pub fn mount(config: ClientConfig) -> Result<(), JsValue> {
    if MOUNTED.with(|m| m.borrow().is_some()) {
        return Ok(());
    }
    let app = App::new(config)?;
    app.mount()?;
    MOUNTED.with(|m| *m.borrow_mut() = Some(app));
    Ok(())
}

#[cfg(all(target_family = "wasm", target_os = "unknown"))]
fn init_telemetry() {
    use tracing_subscriber::layer::SubscriberExt;

    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let wasm_layer = tracing_wasm::WASMLayer::new(
        tracing_wasm::WASMLayerConfigBuilder::new()
            .set_max_level(level)
            .build(),
    );
    let subscriber = tracing_subscriber::registry().with(wasm_layer);
    // A second init (tests, hot reload) keeps the first subscriber.
    let _ = tracing::subscriber::set_global_default(subscriber);
}

#[cfg(all(target_family = "wasm", target_os = "unknown"))]
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    init_telemetry();
    let config = page_config();
    tracing::info!(backend = %config.base_url, "mounting editor");
    mount(config)
}
