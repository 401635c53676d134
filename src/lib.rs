mod dock_target;
mod dom_geometry;
mod drag;
mod focus;
mod fullscreen;
mod scroll_lock;
mod widget;

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use dockbox_core::DisplayMode;

pub use fullscreen::{FullscreenHooks, RotateToFullscreen};
pub use widget::DockDialog;

/// Attributes a custom-element wrapper should observe and forward.
pub const OBSERVED_ATTRIBUTES: [&str; 10] = [
    "mode",
    "aspect-ratio",
    "dock-aspect-ratio",
    "dock-sticky-aspect-ratio",
    "dock-target",
    "dock-target-inset",
    "dock-mode",
    "dock-sticky-target-top",
    "dock-downscale",
    "rotate-to-fullscreen",
];

/// Binding surface for the custom-element glue on the page: construct on
/// upgrade, forward `connectedCallback` and `attributeChangedCallback`.
#[wasm_bindgen]
pub struct DockDialogElement {
    widget: Rc<DockDialog>,
}

#[wasm_bindgen]
impl DockDialogElement {
    #[wasm_bindgen(constructor)]
    pub fn new(host: HtmlElement) -> Result<DockDialogElement, JsValue> {
        let widget = DockDialog::attach(host)
            .ok_or_else(|| JsValue::from_str("dockbox: host element has no document"))?;
        Ok(Self { widget })
    }

    pub fn connect(&self) {
        self.widget.connect();
    }

    #[wasm_bindgen(js_name = attributeChanged)]
    pub fn attribute_changed(&self, name: &str, value: Option<String>) {
        self.widget.attribute_changed(name, value.as_deref());
    }

    #[wasm_bindgen(js_name = setMode)]
    pub fn set_mode(&self, mode: &str) {
        self.widget.set_mode(DisplayMode::parse(Some(mode)), false);
    }

    pub fn mode(&self) -> String {
        self.widget.mode().as_str().to_string()
    }

    #[wasm_bindgen(js_name = refreshDockTarget)]
    pub fn refresh_dock_target(&self) {
        self.widget.refresh_dock_target();
    }

    #[wasm_bindgen(js_name = observedAttributes)]
    pub fn observed_attributes() -> Vec<String> {
        OBSERVED_ATTRIBUTES
            .iter()
            .map(|name| (*name).to_string())
            .collect()
    }
}
