use std::fmt;
use std::rc::Rc;

/// Host-callable wrapper around a module export with the `number(number, number)`
/// signature.
///
/// Arguments and the result are JS numbers (`f64`). No range or overflow
/// checks happen here; whatever the module does with out-of-range operands is
/// what the caller gets back. Clones share the same underlying callable.
#[derive(Clone)]
pub struct BoundFunction {
    symbol: Rc<str>,
    call: Rc<dyn Fn(f64, f64) -> f64>,
}

impl BoundFunction {
    pub fn new(symbol: &str, call: impl Fn(f64, f64) -> f64 + 'static) -> Self {
        Self {
            symbol: Rc::from(symbol),
            call: Rc::new(call),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    #[inline]
    pub fn call(&self, a: f64, b: f64) -> f64 {
        (self.call)(a, b)
    }
}

impl fmt::Debug for BoundFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundFunction")
            .field("symbol", &self.symbol)
            .finish_non_exhaustive()
    }
}
