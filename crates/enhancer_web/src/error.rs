use wasm_bindgen::JsValue;

/// Why a component or the whole layer could not start.
#[derive(Debug, thiserror::Error)]
pub enum StartError {
    #[error("no global `window`, not running in a browser")]
    NoWindow,
    #[error("no `document` on the window")]
    NoDocument,
    #[error(transparent)]
    Host(#[from] enhancer_core::Error),
    #[error("javascript error: {0}")]
    Js(String),
}

impl From<JsValue> for StartError {
    fn from(value: JsValue) -> Self {
        Self::Js(describe(&value))
    }
}

impl From<StartError> for JsValue {
    fn from(error: StartError) -> Self {
        js_sys::Error::new(&error.to_string()).into()
    }
}

/// A config source that exists but could not be read.
#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("invalid inline config: {0}")]
    Inline(#[from] enhancer_config::ConfigError),
    #[error("invalid global config object: {0}")]
    Global(#[from] serde_wasm_bindgen::Error),
}

/// Best-effort message of a thrown JS value.
pub(crate) fn describe(value: &JsValue) -> String {
    if let Some(message) = value.as_string() {
        return message;
    }
    js_sys::Reflect::get(value, &JsValue::from_str("message"))
        .ok()
        .and_then(|message| message.as_string())
        .unwrap_or_else(|| format!("{value:?}"))
}
