//! Browser entry point of the page enhancement layer.
//!
//! The module starts by itself once loaded: it reads the config embedded in
//! the page, installs the console logger and starts the enabled components
//! when the document is parsed. Every component degrades to a no-op when the
//! host elements it needs never show up.
//!
//! ```html
//! <script type="application/toml" id="enhancer-config">
//! [outline]
//! min-headings = 4
//! </script>
//! <script type="module">
//!   import init from "./enhancer_web.js";
//!   await init();
//! </script>
//! ```

pub mod component;
pub mod components;
pub mod config;
pub mod enhancer;
mod error;
pub mod logging;
pub mod page;

pub use self::enhancer::Enhancer;
pub use self::error::{ConfigLoadError, StartError};
pub use self::page::Page;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let page = Page::new()?;
    let (config, config_err) = config::load(&page.window, &page.document);

    logging::init(&config.log);
    if let Some(e) = config_err {
        tracing::warn!(error = %e, "Falling back to the default config");
    }
    tracing::info!(
        version = get_version(),
        components = ?config.enabled_components(),
        "Loading page enhancements"
    );

    let enhancer = Enhancer::new(page.clone(), &config);
    page::on_ready(&page.document, move || {
        enhancer.start();
    })?;

    Ok(())
}

#[wasm_bindgen(js_name = getVersion)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
