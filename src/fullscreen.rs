use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo::events::EventListener;
use web_sys::{Document, Element, OrientationType, ScreenOrientation};

#[derive(Clone)]
pub struct FullscreenHooks {
    pub on_enter: Rc<dyn Fn()>,
    /// Receives the orientation label at the time of the exit.
    pub on_exit: Rc<dyn Fn(String)>,
}

impl FullscreenHooks {
    pub fn empty() -> Self {
        Self {
            on_enter: Rc::new(|| {}),
            on_exit: Rc::new(|_| {}),
        }
    }
}

/// Drives an element into fullscreen while the device is held in landscape
/// and back out again on rotation. Does nothing on platforms without a
/// screen-orientation API.
pub struct RotateToFullscreen {
    element: Element,
    hooks: FullscreenHooks,
    listeners: RefCell<Vec<EventListener>>,
    enabled: Cell<bool>,
}

impl RotateToFullscreen {
    pub fn new(element: Element, hooks: FullscreenHooks) -> Rc<Self> {
        Rc::new(Self {
            element,
            hooks,
            listeners: RefCell::new(Vec::new()),
            enabled: Cell::new(false),
        })
    }

    pub fn enable(self: &Rc<Self>) {
        if self.enabled.replace(true) {
            return;
        }
        let Some(orientation) = screen_orientation() else {
            return;
        };

        let mut listeners = Vec::new();
        let this = Rc::clone(self);
        listeners.push(EventListener::new(&orientation, "change", move |_| {
            this.sync_orientation();
        }));
        let this = Rc::clone(self);
        listeners.push(EventListener::new(
            &self.element,
            "fullscreenchange",
            move |_| {
                this.relay_fullscreen_change();
            },
        ));
        *self.listeners.borrow_mut() = listeners;

        if fullscreen_element().is_none() && is_landscape(&orientation) {
            // rejections (e.g. missing user gesture) are swallowed
            let _ = self.element.request_fullscreen();
        }
    }

    pub fn disable(&self) {
        if !self.enabled.replace(false) {
            return;
        }
        self.listeners.borrow_mut().clear();
        if fullscreen_element().is_some() {
            if let Some(document) = document() {
                document.exit_fullscreen();
            }
            // "fullscreenchange" arrives async; send an early exit so the
            // consumer can update right away
            (self.hooks.on_exit)(orientation_label());
        }
    }

    fn sync_orientation(&self) {
        let Some(orientation) = screen_orientation() else {
            return;
        };
        if fullscreen_element().is_none() && is_landscape(&orientation) {
            let _ = self.element.request_fullscreen();
        } else if let Some(document) = document() {
            document.exit_fullscreen();
        }
    }

    fn relay_fullscreen_change(&self) {
        if fullscreen_element().is_none() {
            (self.hooks.on_exit)(orientation_label());
        } else {
            (self.hooks.on_enter)();
        }
    }
}

fn document() -> Option<Document> {
    web_sys::window().and_then(|window| window.document())
}

fn screen_orientation() -> Option<ScreenOrientation> {
    let window = web_sys::window()?;
    let screen = window.screen().ok()?;
    Some(screen.orientation())
}

fn fullscreen_element() -> Option<Element> {
    document().and_then(|document| document.fullscreen_element())
}

fn is_landscape(orientation: &ScreenOrientation) -> bool {
    matches!(
        orientation.type_(),
        Ok(OrientationType::LandscapePrimary | OrientationType::LandscapeSecondary)
    )
}

fn orientation_label() -> String {
    let kind = screen_orientation().and_then(|orientation| orientation.type_().ok());
    match kind {
        Some(OrientationType::PortraitPrimary) => "portrait-primary",
        Some(OrientationType::PortraitSecondary) => "portrait-secondary",
        Some(OrientationType::LandscapePrimary) => "landscape-primary",
        Some(OrientationType::LandscapeSecondary) => "landscape-secondary",
        _ => "",
    }
    .to_string()
}
