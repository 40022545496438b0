//! WASM bindings for the conversion tool pages
//!
//! State lives in `convert-core` controllers; this crate forwards DOM events
//! to them, renders their views, posts submissions with `fetch` and reads
//! thumbnails with `FileReader`.
//!
//! ## Usage
//!
//! A page marks itself on `<body>` and is mounted automatically when the
//! module starts:
//!
//! ```html
//! <body data-convert-page="image-tools"
//!       data-convert-config='{"api_base": "/api"}'>
//! ```
//!
//! Pages can also be mounted by hand:
//!
//! ```javascript
//! import init, { mountPage } from './pkg/convert_wasm.js';
//!
//! await init();
//! const page = mountPage("merge-pdf");
//! console.log(page.mode, page.view());
//! ```

mod binder;
pub mod dom;
pub mod files;
mod render;
pub mod transport;

use binder::Binding;
use convert_core::{PageKind, SiteConfig};
use std::rc::Rc;
use wasm_bindgen::prelude::*;

const PAGE_ATTR: &str = "data-convert-page";
const CONFIG_ATTR: &str = "data-convert-config";

/// Initialize the WASM module and mount the page named on `<body>`, if any
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();

    let page = dom::document()
        .ok()
        .and_then(|d| d.body())
        .and_then(|body| body.get_attribute(PAGE_ATTR));
    if let Some(page) = page {
        if let Err(e) = mount_page(&page) {
            binder::log_error("Mount failed", &e);
        }
    }
}

/// Get the library version
#[wasm_bindgen]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Human-readable file size, e.g. `1.5 MB`
#[wasm_bindgen]
pub fn format_bytes(bytes: f64) -> String {
    convert_core::format_bytes(bytes.max(0.0) as u64)
}

/// Read the site configuration from `<body data-convert-config>`.
/// A missing attribute gives the defaults.
pub fn site_config() -> Result<SiteConfig, JsValue> {
    let raw = dom::document()?
        .body()
        .and_then(|body| body.get_attribute(CONFIG_ATTR))
        .unwrap_or_default();
    SiteConfig::from_json(&raw).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Mount the page with the given id (`compress-pdf`, `merge-pdf`,
/// `image-to-pdf`, `image-tools`, `pdf-jpg`, `word-pdf`)
#[wasm_bindgen(js_name = mountPage)]
pub fn mount_page(page: &str) -> Result<ConvertPage, JsValue> {
    let kind = PageKind::from_id(page)
        .ok_or_else(|| JsValue::from_str(&format!("Unknown page: {}", page)))?;
    let hash = web_sys::window()
        .and_then(|w| w.location().hash().ok())
        .unwrap_or_default();
    let config = site_config()?;
    let binding = Binding::mount(kind, &hash, &config)?;
    Ok(ConvertPage { binding })
}

/// Handle to a mounted page
///
/// Dropping the handle does not unmount the page; the event listeners keep
/// it alive.
#[wasm_bindgen]
pub struct ConvertPage {
    binding: Rc<Binding>,
}

#[wasm_bindgen]
impl ConvertPage {
    /// Id of the active tool
    #[wasm_bindgen(getter)]
    pub fn mode(&self) -> String {
        self.binding.page.borrow().mode().id().to_string()
    }

    #[wasm_bindgen(getter, js_name = isTabbed)]
    pub fn is_tabbed(&self) -> bool {
        self.binding.page.borrow().is_tabbed()
    }

    /// Current page view as a plain JS object
    pub fn view(&self) -> Result<JsValue, JsValue> {
        let view = self.binding.page.borrow().view();
        serde_wasm_bindgen::to_value(&view)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    #[wasm_bindgen(js_name = switchMode)]
    pub fn switch_mode(&self, mode: &str) -> Result<(), JsValue> {
        let result = self.binding.page.borrow_mut().switch_mode(mode);
        self.binding.refresh();
        result.map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(js_name = startOver)]
    pub fn start_over(&self) {
        self.binding.start_over();
    }
}
