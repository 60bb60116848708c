//! The calculator page.
//!
//! [`ui_model`] holds the view decisions (which of loading / error / form to
//! show, headings, labels) and compiles everywhere so it can be tested on the
//! host. The Leptos app that renders them and the DOM/Emscripten glue live in
//! `web`, which only exists for `wasm32` with the `web` feature.

pub mod ui_model;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
mod web;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub use web::start;
