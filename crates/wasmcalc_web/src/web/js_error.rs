use wasm_bindgen::{JsCast, JsValue};

/// `Error.message` for thrown errors, the string itself for thrown strings,
/// empty otherwise.
pub(super) fn js_error_message(v: &JsValue) -> String {
    if let Some(err) = v.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    v.as_string().unwrap_or_default()
}
