use wasm_bindgen::JsCast;
use web_sys::{DomRect, Element, Event, HtmlElement, MouseEvent, TouchEvent};

use dockbox_core::{rect_intersection, Rect, Viewport, VisualViewport};

/// Single seam for "what rectangle does this node occupy"; everything else
/// works on plain `Rect` values.
pub(crate) trait HasClientRect {
    fn client_rect(&self) -> DomRect;
}

impl HasClientRect for Element {
    fn client_rect(&self) -> DomRect {
        self.get_bounding_client_rect()
    }
}

impl HasClientRect for HtmlElement {
    fn client_rect(&self) -> DomRect {
        self.get_bounding_client_rect()
    }
}

pub(crate) fn element_rect(element: &impl HasClientRect) -> Rect {
    let rect = element.client_rect();
    Rect::new(rect.left(), rect.top(), rect.width(), rect.height())
}

pub(crate) fn viewport() -> Viewport {
    let Some(window) = web_sys::window() else {
        return Viewport {
            width: 0.0,
            height: 0.0,
        };
    };
    let width = window
        .inner_width()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(0.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(0.0);
    Viewport { width, height }
}

pub(crate) fn viewport_rect() -> Rect {
    viewport().rect()
}

/// Identity on platforms without a visual-viewport API.
pub(crate) fn visual_viewport() -> VisualViewport {
    let Some(window) = web_sys::window() else {
        return VisualViewport::default();
    };
    let Some(visual) = window.visual_viewport() else {
        return VisualViewport::default();
    };
    VisualViewport {
        offset_left: visual.offset_left(),
        offset_top: visual.offset_top(),
        scale: visual.scale(),
    }
}

pub(crate) fn viewport_intersection(element: &impl HasClientRect) -> Option<Rect> {
    rect_intersection([Some(viewport_rect()), Some(element_rect(element))])
}

/// First touch point for touch events, client coordinates otherwise.
pub(crate) fn pointer_coordinates(event: &Event) -> Option<(f64, f64)> {
    if let Some(touch_event) = event.dyn_ref::<TouchEvent>() {
        let touch = touch_event.touches().item(0)?;
        return Some((touch.client_x() as f64, touch.client_y() as f64));
    }
    let mouse_event = event.dyn_ref::<MouseEvent>()?;
    Some((mouse_event.client_x() as f64, mouse_event.client_y() as f64))
}
