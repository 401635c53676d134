use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use gloo::render::{request_animation_frame, AnimationFrame};
use gloo::timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlElement, TouchEvent};

use dockbox_core::{drag_position, LockOwner, Rect, DRAG_OVERLAY_Z_INDEX};

use crate::dom_geometry::{element_rect, pointer_coordinates, viewport, visual_viewport};
use crate::scroll_lock;

/// Keeps the moving flag observable for the click that can fire right
/// after release.
const RELEASE_TICK_MS: u32 = 1;

#[derive(Clone)]
pub(crate) struct DragHooks {
    /// Whether a drag may start right now.
    pub(crate) can_drag: Rc<dyn Fn() -> bool>,
    /// Called after the target moved so the docked content follows.
    pub(crate) on_moved: Rc<dyn Fn()>,
}

/// Pointer-driven repositioning of the dock target, clamped to the
/// viewport. idle -> dragging -> idle.
pub(crate) struct DragController {
    handle: HtmlElement,
    target: HtmlElement,
    hooks: DragHooks,
    moving: Cell<bool>,
    start_pointer: Cell<(f64, f64)>,
    start_rect: Cell<Rect>,
    start_listeners: RefCell<Vec<EventListener>>,
    move_listeners: RefCell<Vec<EventListener>>,
    overlay: RefCell<Option<HtmlElement>>,
    frame: RefCell<Option<AnimationFrame>>,
    pending: Cell<Option<(f64, f64)>>,
    release_timer: RefCell<Option<Timeout>>,
}

impl DragController {
    pub(crate) fn bind(handle: HtmlElement, target: HtmlElement, hooks: DragHooks) -> Rc<Self> {
        let controller = Rc::new(Self {
            handle,
            target,
            hooks,
            moving: Cell::new(false),
            start_pointer: Cell::new((0.0, 0.0)),
            start_rect: Cell::new(Rect::new(0.0, 0.0, 0.0, 0.0)),
            start_listeners: RefCell::new(Vec::new()),
            move_listeners: RefCell::new(Vec::new()),
            overlay: RefCell::new(None),
            frame: RefCell::new(None),
            pending: Cell::new(None),
            release_timer: RefCell::new(None),
        });
        let mut listeners = Vec::new();
        for event_name in ["mousedown", "touchstart"] {
            let this = Rc::clone(&controller);
            listeners.push(EventListener::new_with_options(
                &controller.handle,
                event_name,
                EventListenerOptions {
                    phase: EventListenerPhase::Bubble,
                    passive: false,
                },
                move |event: &Event| {
                    this.begin(event);
                },
            ));
        }
        *controller.start_listeners.borrow_mut() = listeners;
        controller
    }

    pub(crate) fn is_moving(&self) -> bool {
        self.moving.get()
    }

    /// Drops every binding; used when the dock target or mode changes.
    pub(crate) fn unbind(&self) {
        self.start_listeners.borrow_mut().clear();
        self.teardown();
        self.moving.set(false);
    }

    fn begin(self: &Rc<Self>, event: &Event) {
        if self.moving.get() || !(self.hooks.can_drag)() {
            return;
        }
        let Some((x, y)) = pointer_coordinates(event) else {
            return;
        };
        let visual = visual_viewport();
        self.moving.set(true);
        self.start_pointer
            .set((x + visual.offset_left, y + visual.offset_top));
        self.start_rect.set(element_rect(&self.target));
        scroll_lock::acquire(LockOwner::Drag);
        self.install_overlay();
        self.install_move_listeners();
        if event.cancelable() {
            event.prevent_default();
        }
    }

    /// Full-viewport transparent layer so embedded frames inside the
    /// dragged content cannot swallow the pointer stream.
    fn install_overlay(&self) {
        let Some(document) = web_sys::window().and_then(|window| window.document()) else {
            return;
        };
        let Some(body) = document.body() else {
            return;
        };
        let Ok(node) = document.create_element("div") else {
            return;
        };
        let Ok(overlay) = node.dyn_into::<HtmlElement>() else {
            return;
        };
        let style = overlay.style();
        let _ = style.set_property("position", "fixed");
        let _ = style.set_property("top", "0");
        let _ = style.set_property("right", "0");
        let _ = style.set_property("bottom", "0");
        let _ = style.set_property("left", "0");
        let _ = style.set_property("z-index", &DRAG_OVERLAY_Z_INDEX.to_string());
        let _ = style.set_property("touch-action", "none");
        if body.append_child(&overlay).is_ok() {
            *self.overlay.borrow_mut() = Some(overlay);
        }
    }

    fn install_move_listeners(self: &Rc<Self>) {
        let Some(body) = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.body())
        else {
            return;
        };
        let mut listeners = Vec::new();
        for event_name in ["mousemove", "touchmove"] {
            let this = Rc::clone(self);
            listeners.push(EventListener::new_with_options(
                &body,
                event_name,
                EventListenerOptions {
                    phase: EventListenerPhase::Bubble,
                    passive: false,
                },
                move |event: &Event| {
                    this.track(event);
                },
            ));
        }
        for event_name in ["mouseup", "touchend", "touchcancel"] {
            let this = Rc::clone(self);
            listeners.push(EventListener::new(&body, event_name, move |_: &Event| {
                this.finish();
            }));
        }
        *self.move_listeners.borrow_mut() = listeners;
    }

    fn track(self: &Rc<Self>, event: &Event) {
        if !self.moving.get() {
            return;
        }
        let Some((x, y)) = pointer_coordinates(event) else {
            return;
        };
        // the drag gesture must win over native touch scrolling
        if event.dyn_ref::<TouchEvent>().is_some() && event.cancelable() {
            event.prevent_default();
        }
        let visual = visual_viewport();
        let (start_x, start_y) = self.start_pointer.get();
        let delta_x = x + visual.offset_left - start_x;
        let delta_y = y + visual.offset_top - start_y;
        let (left, top) = drag_position(
            self.start_rect.get(),
            delta_x,
            delta_y,
            viewport(),
            visual,
        );
        self.schedule_apply(left, top);
    }

    fn schedule_apply(self: &Rc<Self>, left: f64, top: f64) {
        self.pending.set(Some((left, top)));
        if self.frame.borrow().is_some() {
            return;
        }
        let this = Rc::clone(self);
        let handle = request_animation_frame(move |_| {
            this.frame.borrow_mut().take();
            let Some((left, top)) = this.pending.take() else {
                return;
            };
            let style = this.target.style();
            let _ = style.set_property("left", &format!("{left}px"));
            let _ = style.set_property("top", &format!("{top}px"));
            let _ = style.set_property("right", "auto");
            let _ = style.set_property("bottom", "auto");
            (this.hooks.on_moved)();
        });
        *self.frame.borrow_mut() = Some(handle);
    }

    fn finish(self: &Rc<Self>) {
        if !self.moving.get() {
            return;
        }
        self.teardown();
        let this = Rc::clone(self);
        *self.release_timer.borrow_mut() = Some(Timeout::new(RELEASE_TICK_MS, move || {
            this.moving.set(false);
        }));
    }

    fn teardown(&self) {
        self.move_listeners.borrow_mut().clear();
        self.frame.borrow_mut().take();
        self.pending.set(None);
        scroll_lock::release(LockOwner::Drag);
        if let Some(overlay) = self.overlay.borrow_mut().take() {
            overlay.remove();
        }
    }
}
