//! In-process modules.
//!
//! A [`StaticRegistry`] stands in for the browser's global factory slot: the
//! factory is registered explicitly under a name and handed to the loader.
//! [`NativeModule`] keeps its exports in a table keyed by symbol name, each with
//! the signature it was exported with.

use std::rc::Rc;

use hashbrown::HashMap;

use crate::bound::BoundFunction;
use crate::loader::{FactoryRegistry, ModuleFactory, ModuleInstance, ScriptInjector};
use crate::signature::Signature;

type NativeFn = Rc<dyn Fn(f64, f64) -> f64>;

/// A module whose exports are plain Rust closures.
#[derive(Clone, Default)]
pub struct NativeModule {
    exports: HashMap<String, (Signature, NativeFn)>,
}

impl NativeModule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn export(
        mut self,
        symbol: &str,
        signature: Signature,
        f: impl Fn(f64, f64) -> f64 + 'static,
    ) -> Self {
        self.exports
            .insert(symbol.to_string(), (signature, Rc::new(f)));
        self
    }

    /// The calculator module: `int add(int, int)`.
    ///
    /// Operands go through JS `ToInt32` on the way in and the sum wraps like a
    /// 32-bit signed add, matching what the compiled module does.
    pub fn calculator() -> Self {
        Self::new().export("add", Signature::binary_numeric(), |a, b| {
            f64::from(to_int32(a).wrapping_add(to_int32(b)))
        })
    }
}

impl ModuleInstance for NativeModule {
    fn bind(&self, symbol: &str, signature: &Signature) -> Result<BoundFunction, String> {
        if !signature.is_binary_numeric() {
            return Err(format!(
                "signature {signature} cannot be bound to a numeric callable"
            ));
        }
        let (exported, f) = self
            .exports
            .get(symbol)
            .ok_or_else(|| format!("module has no export named `{symbol}`"))?;
        if exported != signature {
            return Err(format!(
                "export `{symbol}` has signature {exported}, requested {signature}"
            ));
        }
        let f = Rc::clone(f);
        Ok(BoundFunction::new(symbol, move |a, b| f(a, b)))
    }
}

/// Factory producing a [`NativeModule`] (or a construction error).
#[derive(Clone)]
pub struct NativeFactory {
    build: Rc<dyn Fn() -> Result<NativeModule, String>>,
}

impl NativeFactory {
    pub fn new(build: impl Fn() -> Result<NativeModule, String> + 'static) -> Self {
        Self {
            build: Rc::new(build),
        }
    }
}

impl ModuleFactory for NativeFactory {
    type Instance = NativeModule;

    async fn instantiate(&self) -> Result<NativeModule, String> {
        (self.build)()
    }
}

#[derive(Clone, Default)]
pub struct StaticRegistry {
    factories: HashMap<String, NativeFactory>,
}

impl StaticRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        name: &str,
        build: impl Fn() -> Result<NativeModule, String> + 'static,
    ) {
        self.factories
            .insert(name.to_string(), NativeFactory::new(build));
    }
}

impl FactoryRegistry for StaticRegistry {
    type Factory = NativeFactory;

    fn lookup(&self, name: &str) -> Option<NativeFactory> {
        self.factories.get(name).cloned()
    }
}

/// Injector for modules linked into the host; there is nothing to fetch.
#[derive(Debug, Clone, Copy, Default)]
pub struct InProcessScript;

impl ScriptInjector for InProcessScript {
    async fn inject(&self, _path: &str) -> Result<(), String> {
        Ok(())
    }
}

/// JS `ToInt32`: truncate toward zero, wrap modulo 2^32, non-finite -> 0.
pub fn to_int32(v: f64) -> i32 {
    if !v.is_finite() {
        return 0;
    }
    let t = v.trunc();
    let m = t.rem_euclid(4_294_967_296.0);
    (m as u32) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::ValueType;

    #[test]
    fn calculator_adds_like_a_c_int() {
        let add = NativeModule::calculator()
            .bind("add", &Signature::binary_numeric())
            .unwrap();
        assert_eq!(add.call(2.0, 3.0), 5.0);
        assert_eq!(add.call(0.0, 0.0), 0.0);
        // 2^31 - 1 + 1 wraps.
        assert_eq!(add.call(2_147_483_647.0, 1.0), -2_147_483_648.0);
        // Fractions truncate before the add.
        assert_eq!(add.call(1.9, 1.9), 2.0);
    }

    #[test]
    fn to_int32_matches_js() {
        assert_eq!(to_int32(f64::NAN), 0);
        assert_eq!(to_int32(f64::INFINITY), 0);
        assert_eq!(to_int32(-1.5), -1);
        assert_eq!(to_int32(4_294_967_296.0), 0);
        assert_eq!(to_int32(4_294_967_297.0), 1);
        assert_eq!(to_int32(3_000_000_000.0), -1_294_967_296);
    }

    #[test]
    fn bind_checks_symbol_and_signature() {
        let module = NativeModule::calculator();

        let err = module
            .bind("sub", &Signature::binary_numeric())
            .unwrap_err();
        assert!(err.contains("sub"));

        let unary = Signature::new(ValueType::Number, [ValueType::Number]);
        assert!(module.bind("add", &unary).is_err());

        let module = NativeModule::new().export(
            "concat",
            Signature::new(ValueType::String, [ValueType::Number, ValueType::Number]),
            |a, _| a,
        );
        let err = module
            .bind("concat", &Signature::binary_numeric())
            .unwrap_err();
        assert!(err.contains("string(number, number)"));
    }

    #[test]
    fn registry_lookup_is_by_exact_name() {
        let mut registry = StaticRegistry::new();
        registry.register("createCalculatorModule", || Ok(NativeModule::calculator()));

        assert!(registry.lookup("createCalculatorModule").is_some());
        assert!(registry.lookup("createcalculatormodule").is_none());

        let factory = registry.lookup("createCalculatorModule").unwrap();
        let module = pollster::block_on(factory.instantiate()).unwrap();
        let add = module.bind("add", &Signature::binary_numeric()).unwrap();
        assert_eq!(add.call(20.0, 22.0), 42.0);
    }
}
