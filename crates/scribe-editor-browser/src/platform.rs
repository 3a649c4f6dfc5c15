//! Browser dialogs, clipboard and fullscreen.

use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::Window;

use scribe_editor_core::{Notice, NoticeLevel};

fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
}

pub fn alert(message: &str) {
    match window().and_then(|w| w.alert_with_message(message)) {
        Ok(()) => {}
        Err(e) => tracing::warn!("alert failed: {:?}", e),
    }
}

/// Ask a yes/no question. Any failure counts as no.
pub fn confirm(message: &str) -> bool {
    window()
        .and_then(|w| w.confirm_with_message(message))
        .unwrap_or(false)
}

/// Ask for a line of text. `None` if the user cancelled.
pub fn prompt(message: &str, default: &str) -> Option<String> {
    window()
        .and_then(|w| w.prompt_with_message_and_default(message, default))
        .ok()
        .flatten()
}

/// Show a queued notice the way the admin page always has: a blocking alert.
pub fn show_notice(notice: &Notice) {
    match notice.level {
        NoticeLevel::Info => tracing::info!("{}", notice.message),
        NoticeLevel::Error => tracing::warn!("{}", notice.message),
    }
    alert(&notice.message);
}

pub async fn write_clipboard_text(text: &str) -> Result<(), JsValue> {
    let clipboard = window()?.navigator().clipboard();
    JsFuture::from(clipboard.write_text(text)).await?;
    Ok(())
}

pub async fn read_clipboard_text() -> Result<String, JsValue> {
    let clipboard = window()?.navigator().clipboard();
    let result = JsFuture::from(clipboard.read_text()).await?;
    Ok(result.as_string().unwrap_or_default())
}

/// Enter fullscreen on `element`, or leave it if anything is fullscreen.
pub fn toggle_fullscreen(element: &web_sys::Element) -> Result<(), JsValue> {
    let document = crate::dom::document();
    if document.fullscreen_element().is_some() {
        document.exit_fullscreen();
        Ok(())
    } else {
        element.request_fullscreen()
    }
}

/// Read a picked file into memory.
pub async fn read_file(file: &web_sys::File) -> Result<Vec<u8>, JsValue> {
    let buffer = JsFuture::from(file.array_buffer()).await?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}

/// Render a JS error value for a notice.
pub fn describe(err: &JsValue) -> String {
    err.as_string()
        .or_else(|| {
            js_sys::Reflect::get(err, &JsValue::from_str("message"))
                .ok()
                .and_then(|m| m.as_string())
        })
        .unwrap_or_else(|| format!("{err:?}"))
}
