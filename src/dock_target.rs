use std::cell::{Cell, RefCell};
use std::rc::Rc;

use js_sys::Reflect;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, ResizeObserver};

use crate::dom_geometry::{element_rect, viewport_intersection};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum DockMode {
    /// Corner dock positioned via inset, draggable.
    #[default]
    Corner,
    /// Top-anchored dock, not draggable.
    Sticky,
}

impl DockMode {
    pub(crate) fn parse(value: Option<&str>) -> Self {
        match value {
            Some("sticky") => Self::Sticky,
            _ => Self::Corner,
        }
    }
}

/// Decides whether the widget docks to an externally supplied node or to
/// its internally managed box, and exposes which one is active.
pub(crate) struct DockTargetLocator {
    selector: RefCell<Option<String>>,
    alt_active: Cell<bool>,
    on_alt_change: RefCell<Option<Rc<dyn Fn(bool)>>>,
}

impl DockTargetLocator {
    pub(crate) fn new() -> Self {
        Self {
            selector: RefCell::new(None),
            alt_active: Cell::new(false),
            on_alt_change: RefCell::new(None),
        }
    }

    pub(crate) fn set_selector(&self, selector: Option<String>) {
        *self.selector.borrow_mut() = selector.filter(|value| !value.is_empty());
    }

    pub(crate) fn set_alt_hook(&self, hook: Option<Rc<dyn Fn(bool)>>) {
        *self.on_alt_change.borrow_mut() = hook;
    }

    pub(crate) fn alt_active(&self) -> bool {
        self.alt_active.get()
    }

    /// Last document-order selector match; `None` when the selector is
    /// unset, invalid, unmatched, or the match is outside the viewport.
    pub(crate) fn external(&self, document: &Document) -> Option<Element> {
        let element = self.selector_match(document)?;
        let intersection = viewport_intersection(&element)?;
        intersection.has_area().then_some(element)
    }

    pub(crate) fn locate(&self, document: &Document, fallback: &HtmlElement) -> Element {
        let external = self.external(document);
        let active = external.is_some();
        if self.alt_active.replace(active) != active {
            if let Some(hook) = self.on_alt_change.borrow().as_ref() {
                hook(active);
            }
        }
        external.unwrap_or_else(|| {
            let element: &Element = fallback.as_ref();
            element.clone()
        })
    }

    /// Bottom edge of the sticky anchor, if the selector matches anything.
    pub(crate) fn sticky_anchor_bottom(&self, document: &Document) -> Option<f64> {
        let element = self.selector_match(document)?;
        Some(element_rect(&element).bottom())
    }

    fn selector_match(&self, document: &Document) -> Option<Element> {
        let selector = self.selector.borrow().clone()?;
        let matches = document.query_selector_all(&selector).ok()?;
        let last = matches.length().checked_sub(1)?;
        matches.get(last)?.dyn_into().ok()
    }
}

/// Watches an external dock target for size changes. Absent on platforms
/// without ResizeObserver; resize events still trigger refreshes there.
pub(crate) struct ResizeWatch {
    observer: ResizeObserver,
    _callback: Closure<dyn FnMut(js_sys::Array, ResizeObserver)>,
}

impl ResizeWatch {
    pub(crate) fn observe(element: &Element, on_resize: Rc<dyn Fn()>) -> Option<Self> {
        let window = web_sys::window()?;
        let supported =
            Reflect::has(&window, &JsValue::from_str("ResizeObserver")).unwrap_or(false);
        if !supported {
            return None;
        }
        let callback = Closure::<dyn FnMut(js_sys::Array, ResizeObserver)>::wrap(Box::new(
            move |_entries, _observer| {
                on_resize();
            },
        ));
        let observer = ResizeObserver::new(callback.as_ref().unchecked_ref()).ok()?;
        observer.observe(element);
        Some(Self {
            observer,
            _callback: callback,
        })
    }
}

impl Drop for ResizeWatch {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}
