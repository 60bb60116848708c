use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;
use wasmcalc::controller::{CalculateOutcome, InputField, ViewController, MISSING_INPUT_PROMPT};
use wasmcalc::loader::{LoaderConfig, ModuleLoader};

use crate::ui_model::{self, PageView};

mod console;
mod emscripten;
mod js_error;
mod script;

use emscripten::WindowRegistry;
use script::DomScriptInjector;

pub fn start() {
    console_error_panic_hook::set_once();
    console::init_logging();
    mount_to_body(|| view! { <App /> });
}

#[component]
fn App() -> impl IntoView {
    // BoundFunction wraps a JS function, so the controller lives in local storage.
    let controller = RwSignal::new_local(ViewController::new());

    // Cleared on teardown; a load that resolves afterwards is dropped.
    let alive = Arc::new(AtomicBool::new(true));
    on_cleanup({
        let alive = Arc::clone(&alive);
        move || alive.store(false, Ordering::Relaxed)
    });

    Effect::new(move |_| {
        if !controller.try_update(ViewController::begin_load).unwrap_or(false) {
            return;
        }
        let alive = Arc::clone(&alive);
        spawn_local(async move {
            let loader =
                ModuleLoader::new(LoaderConfig::default(), DomScriptInjector, WindowRegistry);
            let outcome = loader.initialize().await;
            if !alive.load(Ordering::Relaxed) {
                tracing::debug!("page torn down before the module finished loading; dropping outcome");
                return;
            }
            controller.try_update(|c| c.finish_load(outcome));
        });
    });

    let page = Memo::new(move |_| controller.with(|c| PageView::of(c.state())));

    let on_input = move |field: InputField, ev: &web_sys::Event| {
        let raw = event_target_value(ev);
        let accepted = controller
            .try_update(|c| c.set_input(field, &raw))
            .unwrap_or(false);
        if !accepted {
            // Put the last accepted text back into the element.
            let current = controller.with_untracked(|c| c.input_text(field));
            event_target::<web_sys::HtmlInputElement>(ev).set_value(&current);
        }
    };

    let on_calculate = move |_: leptos::ev::MouseEvent| {
        match controller.try_update(ViewController::calculate) {
            Some(CalculateOutcome::MissingInput) => alert(MISSING_INPUT_PROMPT),
            Some(CalculateOutcome::Computed(sum)) => tracing::debug!(sum, "calculated"),
            Some(CalculateOutcome::NotReady) | None => {}
        }
    };

    view! {
        <div style="display: flex; align-items: center; justify-content: center; min-height: 100vh; font-family: system-ui, -apple-system, Segoe UI, Roboto, sans-serif;">
            <main style="padding: 32px;">
                <h1 style="font-size: 1.9em; font-weight: 700; margin: 0 0 24px 0;">
                    {ui_model::PAGE_TITLE}
                </h1>

                {move || match page.get() {
                    PageView::Loading => {
                        view! { <p style="color: #6b7280;">{ui_model::LOADING_TEXT}</p> }.into_any()
                    }
                    PageView::Failed(msg) => {
                        view! { <p style="color: #ef4444;">{msg}</p> }.into_any()
                    }
                    PageView::Form => {
                        view! {
                            <div style="display: flex; gap: 16px; align-items: center; justify-content: center; flex-wrap: wrap;">
                                <NumberInput
                                    field=InputField::First
                                    value=move || controller.with(|c| c.input_text(InputField::First))
                                    on_input=move |ev: &web_sys::Event| on_input(InputField::First, ev)
                                />
                                <span style="font-size: 1.25em; font-weight: 600;">
                                    {ui_model::OPERATOR_SYMBOL}
                                </span>
                                <NumberInput
                                    field=InputField::Second
                                    value=move || controller.with(|c| c.input_text(InputField::Second))
                                    on_input=move |ev: &web_sys::Event| on_input(InputField::Second, ev)
                                />
                                <button
                                    style=move || calculate_button_style(controller.with(|c| c.can_calculate()))
                                    disabled=move || !controller.with(|c| c.can_calculate())
                                    on:click=on_calculate
                                >
                                    {ui_model::CALCULATE_LABEL}
                                </button>
                            </div>
                        }
                            .into_any()
                    }
                }}

                {move || {
                    controller
                        .with(|c| c.result_text())
                        .map(|text| {
                            view! {
                                <h2 style="margin-top: 24px; font-size: 1.5em; font-weight: 500; text-align: center;">
                                    {ui_model::result_heading(&text)}
                                </h2>
                            }
                        })
                }}
            </main>
        </div>
    }
}

#[component]
fn NumberInput(
    field: InputField,
    value: impl Fn() -> String + Send + Sync + 'static,
    on_input: impl Fn(&web_sys::Event) + Send + Sync + 'static,
) -> impl IntoView {
    view! {
        <input
            type="text"
            inputmode="numeric"
            name=field.name()
            aria-label=ui_model::field_aria_label(field)
            prop:value=value
            on:input=move |ev| on_input(&ev)
            style="width: 6em; padding: 8px 12px; border: 1px solid #d1d5db; border-radius: 6px; text-align: center;"
        />
    }
}

fn calculate_button_style(enabled: bool) -> &'static str {
    if enabled {
        "padding: 8px 16px; border: none; border-radius: 6px; color: #fff; font-weight: 600; background: #2563eb; cursor: pointer;"
    } else {
        "padding: 8px 16px; border: none; border-radius: 6px; color: #fff; font-weight: 600; background: #9ca3af; cursor: not-allowed;"
    }
}

fn alert(message: &str) {
    if let Some(w) = web_sys::window() {
        let _ = w.alert_with_message(message);
    }
}
