use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasmcalc::loader::ScriptInjector;

use super::js_error::js_error_message;

/// Appends an async `<script>` to `document.body` and waits for load/error.
pub(super) struct DomScriptInjector;

impl ScriptInjector for DomScriptInjector {
    async fn inject(&self, path: &str) -> Result<(), String> {
        let promise = script_promise(path)?;
        wasm_bindgen_futures::JsFuture::from(promise)
            .await
            .map(|_| ())
            .map_err(|e| js_error_message(&e))
    }
}

fn script_promise(path: &str) -> Result<js_sys::Promise, String> {
    let w = web_sys::window().ok_or("no window")?;
    let doc = w.document().ok_or("no document")?;
    let body = doc.body().ok_or("document has no body")?;

    let script = doc
        .create_element("script")
        .map_err(|_| "createElement(script) threw".to_string())?
        .dyn_into::<web_sys::HtmlScriptElement>()
        .map_err(|_| "createElement(script) returned unexpected type".to_string())?;
    script.set_src(path);
    script.set_async(true);

    let promise = js_sys::Promise::new(&mut |resolve, reject| {
        let on_load = Closure::wrap(Box::new(move |_ev: web_sys::Event| {
            let _ = resolve.call0(&JsValue::UNDEFINED);
        }) as Box<dyn FnMut(_)>);
        script.set_onload(Some(on_load.as_ref().unchecked_ref()));
        on_load.forget();

        let on_error = Closure::wrap(Box::new(move |_ev: web_sys::Event| {
            let _ = reject.call1(
                &JsValue::UNDEFINED,
                &JsValue::from_str("Failed to load the WASM glue script."),
            );
        }) as Box<dyn FnMut(_)>);
        script.set_onerror(Some(on_error.as_ref().unchecked_ref()));
        on_error.forget();
    });

    // Handlers are attached before the element enters the document.
    body.append_child(&script)
        .map_err(|e| format!("appendChild(script) threw: {}", js_error_message(&e)))?;
    Ok(promise)
}
