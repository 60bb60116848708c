//! # wasmcalc
//!
//! Host-testable core of the WASM calculator page: the module-loading
//! pipeline and the page state it feeds.
//!
//! ## Quick Start
//!
//! ```
//! use wasmcalc::prelude::*;
//!
//! // An in-process stand-in for the Emscripten glue.
//! let mut registry = StaticRegistry::new();
//! registry.register("createCalculatorModule", || Ok(NativeModule::calculator()));
//! let loader = ModuleLoader::new(LoaderConfig::default(), InProcessScript, registry);
//!
//! let mut page = ViewController::new();
//! if page.begin_load() {
//!     page.finish_load(pollster::block_on(loader.initialize()));
//! }
//!
//! page.set_input(InputField::First, "2");
//! page.set_input(InputField::Second, "3");
//! assert_eq!(page.calculate(), CalculateOutcome::Computed(5.0));
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): `Serialize`/`Deserialize` for [`loader::LoaderConfig`]
//!   and [`signature::Signature`]
//!
//! ## Modules
//!
//! - [`loader`]: script injection, factory lookup, instantiation, symbol binding
//! - [`controller`]: load state, form inputs, calculate
//! - [`registry`]: in-process modules and factories

#[path = "core/bound.rs"]
pub mod bound;

#[path = "core/controller.rs"]
pub mod controller;

#[path = "core/float_fmt.rs"]
pub mod float_fmt;

#[path = "core/input.rs"]
pub mod input;

#[path = "core/loader.rs"]
pub mod loader;

#[path = "core/registry.rs"]
pub mod registry;

#[path = "core/signature.rs"]
pub mod signature;

/// Prelude module for convenient imports.
///
/// ```
/// use wasmcalc::prelude::*;
/// ```
pub mod prelude {
    pub use crate::bound::BoundFunction;
    pub use crate::controller::{CalculateOutcome, InputField, LoadState, ViewController};
    pub use crate::loader::{
        FactoryRegistry, LoadError, LoaderConfig, ModuleFactory, ModuleInstance, ModuleLoader,
        ScriptInjector,
    };
    pub use crate::registry::{InProcessScript, NativeModule, StaticRegistry};
    pub use crate::signature::{Signature, ValueType};
}
