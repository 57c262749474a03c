//! Reads the configuration the host page embeds.
//!
//! Sources, first match wins:
//!
//! 1. `<script type="application/toml" id="enhancer-config">` holding TOML.
//! 2. A `window.__ENHANCER_CONFIG__` object with the same kebab-case keys.
//! 3. The defaults.

use crate::error::ConfigLoadError;
use enhancer_config::Config;
use wasm_bindgen::JsValue;
use web_sys::{Document, Window};

pub const CONFIG_SCRIPT_ID: &str = "enhancer-config";
pub const CONFIG_GLOBAL: &str = "__ENHANCER_CONFIG__";

/// Loads the config, falling back to the defaults on any error.
///
/// The error is returned alongside so that it can be reported once logging
/// is set up with the level the config asked for.
pub fn load(window: &Window, document: &Document) -> (Config, Option<ConfigLoadError>) {
    match read(window, document) {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    }
}

fn read(window: &Window, document: &Document) -> Result<Config, ConfigLoadError> {
    if let Some(script) = document.get_element_by_id(CONFIG_SCRIPT_ID) {
        let source = script.text_content().unwrap_or_default();
        return Ok(Config::from_toml(&source)?);
    }

    let global = js_sys::Reflect::get(window, &JsValue::from_str(CONFIG_GLOBAL))
        .unwrap_or(JsValue::UNDEFINED);
    if global.is_undefined() || global.is_null() {
        return Ok(Config::default());
    }

    Ok(serde_wasm_bindgen::from_value(global)?)
}
