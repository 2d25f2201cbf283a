pub mod app;
pub mod audio;
mod diag;
pub mod loader;
pub mod render;
pub mod storage;
pub mod theme;

use wasm_bindgen::prelude::*;

/// WASM entry point.
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(target_family = "wasm")]
    {
        console_error_panic_hook::set_once();
        app::boot();
    }
}
