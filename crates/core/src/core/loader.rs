//! Module loading pipeline.
//!
//! Loading a compiled module is a fixed sequence of steps:
//!
//! 1. Inject the glue script at [`LoaderConfig::script_path`] and wait for it to
//!    finish executing (no timeout; a hung fetch suspends the loader forever).
//! 2. Look up the module factory by name in a [`FactoryRegistry`].
//! 3. Invoke the factory and await the module instance.
//! 4. Bind [`LoaderConfig::symbol`] with [`LoaderConfig::signature`].
//!
//! The first failing step short-circuits the rest and is reported as a
//! [`LoadError`]. Nothing is retried.

use std::future::Future;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::bound::BoundFunction;
use crate::signature::Signature;

/// Public path of the Emscripten glue script.
pub const DEFAULT_SCRIPT_PATH: &str = "/wasm/calculator.js";
/// Name the glue script publishes its factory under.
pub const DEFAULT_FACTORY_NAME: &str = "createCalculatorModule";
/// Exported symbol bound by default.
pub const DEFAULT_SYMBOL: &str = "add";

/// Shown when a failure carries no message of its own.
pub const UNKNOWN_LOAD_ERROR: &str = "An unknown error occurred while loading WASM.";

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LoaderConfig {
    pub script_path: String,
    pub factory_name: String,
    pub symbol: String,
    pub signature: Signature,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            script_path: DEFAULT_SCRIPT_PATH.to_string(),
            factory_name: DEFAULT_FACTORY_NAME.to_string(),
            symbol: DEFAULT_SYMBOL.to_string(),
            signature: Signature::binary_numeric(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("Failed to load the WASM glue script ({path}).")]
    ScriptLoadFailed { path: String, reason: String },

    #[error("WASM module factory `{name}` not found.")]
    FactoryMissing { name: String },

    #[error("Failed to instantiate the WASM module: {0}")]
    InstantiationFailed(String),

    #[error("Failed to bind WASM export `{symbol}`: {reason}")]
    SymbolUnavailable { symbol: String, reason: String },
}

impl LoadError {
    /// Message suitable for the page's error notice. Never empty.
    pub fn user_message(&self) -> String {
        let carries_no_reason = match self {
            LoadError::InstantiationFailed(reason) => reason.trim().is_empty(),
            LoadError::SymbolUnavailable { reason, .. } => reason.trim().is_empty(),
            LoadError::ScriptLoadFailed { .. } | LoadError::FactoryMissing { .. } => false,
        };
        if carries_no_reason {
            UNKNOWN_LOAD_ERROR.to_string()
        } else {
            self.to_string()
        }
    }
}

/// Fetches and executes the glue script.
pub trait ScriptInjector {
    /// Resolves once the script has executed; fails on fetch or parse errors.
    fn inject(&self, path: &str) -> impl Future<Output = Result<(), String>>;
}

/// Where module factories are discovered after the glue script ran.
pub trait FactoryRegistry {
    type Factory: ModuleFactory;

    fn lookup(&self, name: &str) -> Option<Self::Factory>;
}

/// Zero-argument asynchronous constructor of a module instance.
pub trait ModuleFactory {
    type Instance: ModuleInstance;

    fn instantiate(&self) -> impl Future<Output = Result<Self::Instance, String>>;
}

/// An instantiated module that can hand out wrapped exports.
pub trait ModuleInstance {
    fn bind(&self, symbol: &str, signature: &Signature) -> Result<BoundFunction, String>;
}

pub struct ModuleLoader<I, R> {
    config: LoaderConfig,
    injector: I,
    registry: R,
}

impl<I, R> ModuleLoader<I, R>
where
    I: ScriptInjector,
    R: FactoryRegistry,
{
    pub fn new(config: LoaderConfig, injector: I, registry: R) -> Self {
        Self {
            config,
            injector,
            registry,
        }
    }

    pub async fn initialize(&self) -> Result<BoundFunction, LoadError> {
        let cfg = &self.config;

        debug!(path = %cfg.script_path, "injecting WASM glue script");
        if let Err(reason) = self.injector.inject(&cfg.script_path).await {
            warn!(path = %cfg.script_path, %reason, "failed to load WASM glue script");
            return Err(LoadError::ScriptLoadFailed {
                path: cfg.script_path.clone(),
                reason,
            });
        }
        info!(path = %cfg.script_path, "WASM glue script loaded");

        let factory =
            self.registry
                .lookup(&cfg.factory_name)
                .ok_or_else(|| LoadError::FactoryMissing {
                    name: cfg.factory_name.clone(),
                })?;

        let instance = factory
            .instantiate()
            .await
            .map_err(LoadError::InstantiationFailed)?;

        let bound = instance
            .bind(&cfg.symbol, &cfg.signature)
            .map_err(|reason| LoadError::SymbolUnavailable {
                symbol: cfg.symbol.clone(),
                reason,
            })?;

        info!(symbol = %cfg.symbol, signature = %cfg.signature, "WASM module initialized and function wrapped");
        Ok(bound)
    }
}
