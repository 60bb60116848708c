//! Page copy and view selection that should be available on both wasm and
//! native.
//!
//! Keeping these out of the wasm-only `web` module allows us to unit-test them
//! on the host.

use wasmcalc::controller::{InputField, LoadState};

pub const PAGE_TITLE: &str = "C++ WASM Calculator";
pub const LOADING_TEXT: &str = "Loading WebAssembly Module...";
pub const CALCULATE_LABEL: &str = "Calculate";
pub const OPERATOR_SYMBOL: &str = "+";

/// Which main section the page shows for a given load state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageView {
    Loading,
    Failed(String),
    Form,
}

impl PageView {
    pub fn of(state: &LoadState) -> Self {
        match state {
            LoadState::Loading => PageView::Loading,
            LoadState::Error(msg) => PageView::Failed(msg.clone()),
            LoadState::Ready => PageView::Form,
        }
    }
}

pub fn result_heading(value_text: &str) -> String {
    format!("C++ Result: {value_text}")
}

pub fn field_aria_label(field: InputField) -> &'static str {
    match field {
        InputField::First => "First number",
        InputField::Second => "Second number",
    }
}
