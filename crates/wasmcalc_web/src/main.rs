// Trunk builds this binary; `index.html` turns on the `web` feature.

#[cfg(all(feature = "web", target_arch = "wasm32"))]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn mount_calculator() {
    wasmcalc_web::start();
}

fn main() {}
