//! Emscripten `MODULARIZE` glue: the factory published on `window` and the
//! `cwrap` binding convention of the instance it resolves to.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use wasmcalc::bound::BoundFunction;
use wasmcalc::loader::{FactoryRegistry, ModuleFactory, ModuleInstance};
use wasmcalc::signature::Signature;

use super::js_error::js_error_message;

/// Factories are properties of the global `window` object.
pub(super) struct WindowRegistry;

impl FactoryRegistry for WindowRegistry {
    type Factory = EmscriptenFactory;

    fn lookup(&self, name: &str) -> Option<EmscriptenFactory> {
        let w = web_sys::window()?;
        let v = js_sys::Reflect::get(&w, &JsValue::from_str(name)).ok()?;
        v.dyn_into::<js_sys::Function>().ok().map(EmscriptenFactory)
    }
}

pub(super) struct EmscriptenFactory(js_sys::Function);

impl ModuleFactory for EmscriptenFactory {
    type Instance = EmscriptenModule;

    async fn instantiate(&self) -> Result<EmscriptenModule, String> {
        let ret = self
            .0
            .call0(&JsValue::UNDEFINED)
            .map_err(|e| js_error_message(&e))?;
        // The factory returns a promise; `Promise.resolve` also covers a bare
        // instance or a thenable.
        let instance = JsFuture::from(js_sys::Promise::resolve(&ret))
            .await
            .map_err(|e| js_error_message(&e))?;
        if !instance.is_object() {
            return Err("module factory resolved to a non-object".to_string());
        }
        Ok(EmscriptenModule(instance))
    }
}

pub(super) struct EmscriptenModule(JsValue);

impl ModuleInstance for EmscriptenModule {
    fn bind(&self, symbol: &str, signature: &Signature) -> Result<BoundFunction, String> {
        if !signature.is_binary_numeric() {
            return Err(format!(
                "signature {signature} cannot be bound to a numeric callable"
            ));
        }

        let cwrap = js_sys::Reflect::get(&self.0, &JsValue::from_str("cwrap"))
            .map_err(|e| js_error_message(&e))?
            .dyn_into::<js_sys::Function>()
            .map_err(|_| "module does not expose cwrap (missing from EXPORTED_RUNTIME_METHODS?)".to_string())?;

        let arg_types: js_sys::Array = signature
            .arg_tags()
            .into_iter()
            .map(JsValue::from_str)
            .collect();
        let wrapped = cwrap
            .call3(
                &self.0,
                &JsValue::from_str(symbol),
                &JsValue::from_str(signature.ret.tag()),
                &arg_types,
            )
            .map_err(|e| js_error_message(&e))?
            .dyn_into::<js_sys::Function>()
            .map_err(|_| format!("cwrap returned a non-function for `{symbol}`"))?;

        let name = symbol.to_string();
        Ok(BoundFunction::new(symbol, move |a, b| {
            match wrapped.call2(&JsValue::NULL, &JsValue::from_f64(a), &JsValue::from_f64(b)) {
                Ok(v) => v.as_f64().unwrap_or(f64::NAN),
                Err(e) => {
                    tracing::error!(symbol = %name, error = %js_error_message(&e), "bound WASM call threw");
                    f64::NAN
                }
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use wasm_bindgen_test::*;
    use wasmcalc::loader::{LoadError, LoaderConfig, ModuleLoader};
    use wasmcalc::registry::InProcessScript;

    use super::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn publish(name: &str, value: &JsValue) {
        let w = web_sys::window().unwrap();
        js_sys::Reflect::set(&w, &JsValue::from_str(name), value).unwrap();
    }

    fn factory_returning(body: &str) -> js_sys::Function {
        js_sys::Function::new_no_args(body)
    }

    fn loader_for(factory_name: &str) -> ModuleLoader<InProcessScript, WindowRegistry> {
        let cfg = LoaderConfig {
            factory_name: factory_name.to_string(),
            ..LoaderConfig::default()
        };
        ModuleLoader::new(cfg, InProcessScript, WindowRegistry)
    }

    #[wasm_bindgen_test]
    async fn non_callable_window_property_is_a_missing_factory() {
        publish("wasmcalcNotAFactory", &JsValue::from_f64(42.0));
        assert!(WindowRegistry.lookup("wasmcalcNotAFactory").is_none());
        assert!(WindowRegistry.lookup("wasmcalcNeverPublished").is_none());

        let err = loader_for("wasmcalcNotAFactory")
            .initialize()
            .await
            .unwrap_err();
        assert!(matches!(err, LoadError::FactoryMissing { .. }));
    }

    #[wasm_bindgen_test]
    async fn throwing_factory_is_an_instantiation_failure() {
        publish(
            "wasmcalcThrowingFactory",
            &factory_returning("throw new Error('abort(OOM)');"),
        );
        let err = loader_for("wasmcalcThrowingFactory")
            .initialize()
            .await
            .unwrap_err();
        assert_eq!(err, LoadError::InstantiationFailed("abort(OOM)".to_string()));
    }

    #[wasm_bindgen_test]
    async fn rejected_factory_promise_is_an_instantiation_failure() {
        publish(
            "wasmcalcRejectingFactory",
            &factory_returning("return Promise.reject(new Error('bad wasm'));"),
        );
        let err = loader_for("wasmcalcRejectingFactory")
            .initialize()
            .await
            .unwrap_err();
        assert_eq!(err, LoadError::InstantiationFailed("bad wasm".to_string()));
    }

    #[wasm_bindgen_test]
    async fn cwrap_returning_a_non_function_is_symbol_unavailable() {
        publish(
            "wasmcalcBadCwrapFactory",
            &factory_returning("return Promise.resolve({ cwrap: function () { return 42; } });"),
        );
        let err = loader_for("wasmcalcBadCwrapFactory")
            .initialize()
            .await
            .unwrap_err();
        match err {
            LoadError::SymbolUnavailable { symbol, reason } => {
                assert_eq!(symbol, "add");
                assert!(reason.contains("non-function"), "{reason}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[wasm_bindgen_test]
    async fn instance_without_cwrap_is_symbol_unavailable() {
        publish(
            "wasmcalcNoCwrapFactory",
            &factory_returning("return Promise.resolve({});"),
        );
        let err = loader_for("wasmcalcNoCwrapFactory")
            .initialize()
            .await
            .unwrap_err();
        assert!(matches!(err, LoadError::SymbolUnavailable { .. }));
    }

    #[wasm_bindgen_test]
    async fn cwrap_receives_name_and_type_tags() {
        publish(
            "wasmcalcGoodFactory",
            &factory_returning(
                "return Promise.resolve({ cwrap: function (name, ret, args) { \
                   if (name !== 'add' || ret !== 'number' || args.join() !== 'number,number') { return null; } \
                   return function (a, b) { return (a + b) | 0; }; \
                 } });",
            ),
        );
        let add = loader_for("wasmcalcGoodFactory").initialize().await.unwrap();
        assert_eq!(add.symbol(), "add");
        assert_eq!(add.call(2.0, 3.0), 5.0);
        assert_eq!(add.call(2_147_483_647.0, 1.0), -2_147_483_648.0);
    }

    #[wasm_bindgen_test]
    fn throwing_bound_call_yields_nan() {
        let instance = js_sys::Object::new();
        js_sys::Reflect::set(
            &instance,
            &JsValue::from_str("cwrap"),
            &factory_returning("return function () { throw new Error('unreachable'); };"),
        )
        .unwrap();
        let add = EmscriptenModule(instance.into())
            .bind("add", &Signature::binary_numeric())
            .unwrap();
        assert!(add.call(1.0, 1.0).is_nan());
    }
}
