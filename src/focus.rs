use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlElement, KeyboardEvent, Node};

/// Keeps keyboard focus inside the widget subtree while the lightbox is up.
pub(crate) struct FocusTrap {
    listeners: RefCell<Vec<EventListener>>,
}

impl FocusTrap {
    pub(crate) fn new() -> Self {
        Self {
            listeners: RefCell::new(Vec::new()),
        }
    }

    pub(crate) fn engage(&self, host: &HtmlElement, content: &HtmlElement, on_escape: Rc<dyn Fn()>) {
        self.release();
        let _ = content.set_attribute("tabindex", "-1");
        let _ = content.focus();
        let Some(window) = web_sys::window() else {
            return;
        };
        let mut listeners = Vec::new();

        let host_for_keys = host.clone();
        let content_for_keys = content.clone();
        let listener = EventListener::new_with_options(
            &window,
            "keydown",
            EventListenerOptions {
                phase: EventListenerPhase::Capture,
                passive: false,
            },
            move |event: &Event| {
                let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                match event.key().as_str() {
                    "Escape" => on_escape(),
                    "Tab" => {
                        let inside = web_sys::window()
                            .and_then(|window| window.document())
                            .and_then(|document| document.active_element())
                            .map(|active| host_for_keys.contains(Some(active.as_ref())))
                            .unwrap_or(false);
                        if !inside {
                            event.prevent_default();
                            let _ = content_for_keys.focus();
                        }
                    }
                    _ => {}
                }
            },
        );
        listeners.push(listener);

        // focus that escaped the subtree gets pulled straight back
        let host_for_focus = host.clone();
        let content_for_focus = content.clone();
        let listener = EventListener::new(&window, "focusin", move |event: &Event| {
            let Some(target) = event
                .target()
                .and_then(|target| target.dyn_into::<Node>().ok())
            else {
                return;
            };
            if !host_for_focus.contains(Some(&target)) {
                let _ = content_for_focus.focus();
            }
        });
        listeners.push(listener);

        *self.listeners.borrow_mut() = listeners;
    }

    pub(crate) fn release(&self) {
        self.listeners.borrow_mut().clear();
    }
}
