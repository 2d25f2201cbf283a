//! Level fetch over HTTP. The fetch happens once before play begins; any
//! failure substitutes the built-in level — a one-time substitution, not
//! a retry.

use coinhunter_game::level::Level;

#[cfg(target_family = "wasm")]
pub async fn fetch_level(url: &str) -> Level {
    use crate::diag;

    match try_fetch(url).await {
        Ok(level) => level,
        Err(e) => {
            diag::console_warn!("Level fetch failed ({e:?}), using built-in level");
            Level::default_level()
        },
    }
}

#[cfg(target_family = "wasm")]
async fn try_fetch(url: &str) -> Result<Level, wasm_bindgen::JsValue> {
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let response = JsFuture::from(window.fetch_with_str(url)).await?;
    let response: web_sys::Response = response.dyn_into()?;
    if !response.ok() {
        return Err(JsValue::from_str(&format!("HTTP {}", response.status())));
    }
    let body = JsFuture::from(response.text()?).await?;
    let json = body
        .as_string()
        .ok_or_else(|| JsValue::from_str("non-text body"))?;
    Level::from_json(&json).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Native builds have no fetch; tooling and tests run on the built-in
/// level directly.
#[cfg(not(target_family = "wasm"))]
pub fn builtin_level() -> Level {
    Level::default_level()
}
