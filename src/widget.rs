use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo::events::EventListener;
use gloo::render::{request_animation_frame, AnimationFrame};
use gloo::timers::callback::Timeout;
use js_sys::Reflect;
use wasm_bindgen::JsValue;
use web_sys::{CustomEvent, CustomEventInit, Document, Event, EventTarget, HtmlElement};

use dockbox_core::{
    compute_transition, dock_width, resolve_aspect_ratio, sticky_top, DisplayMode, Inset,
    LockOwner, ModeChange, ModeMachine, ModePlan, TransitionSpec, TransitionStyle,
    DEFAULT_TRANSITION_DURATION_MS, DOCK_Z_INDEX, LIGHTBOX_Z_INDEX, TRANSITION_TIMING_FUNCTION,
};

use crate::dock_target::{DockMode, DockTargetLocator, ResizeWatch};
use crate::dom_geometry::{element_rect, viewport, visual_viewport};
use crate::drag::{DragController, DragHooks};
use crate::focus::FocusTrap;
use crate::fullscreen::{FullscreenHooks, RotateToFullscreen};
use crate::scroll_lock;

const PLACEHOLDER_CLASS: &str = "dockbox-placeholder";
const DOCK_TARGET_CLASS: &str = "dockbox-dock-target";
const ASPECT_BOX_CLASS: &str = "dockbox-aspect-box";
const CONTENT_CLASS: &str = "dockbox-content";
const CONTENT_INNER_CLASS: &str = "dockbox-content-inner";

const EXTERNAL_TARGET_ATTR: &str = "data-external-dock-target";

const MODE_CHANGE_EVENT: &str = "modechange";
const DOCK_SCALE_EVENT: &str = "dockscale";

#[derive(Clone, Default)]
struct AttrConfig {
    aspect_ratio: Option<String>,
    dock_aspect_ratio: Option<String>,
    dock_sticky_aspect_ratio: Option<String>,
    dock_target_inset: Option<String>,
    dock_mode: DockMode,
    dock_sticky_target_top: f64,
    dock_downscale: bool,
    rotate_to_fullscreen: bool,
}

/// One dialog widget attached to a host element. The host page styles the
/// pieces; this type owns geometry, mode, and the transitions between them.
pub struct DockDialog {
    host: HtmlElement,
    placeholder: HtmlElement,
    dock_box: HtmlElement,
    dock_box_aspect: HtmlElement,
    content: HtmlElement,
    content_inner: HtmlElement,
    machine: RefCell<ModeMachine>,
    config: RefCell<AttrConfig>,
    locator: Rc<DockTargetLocator>,
    drag: RefCell<Option<Rc<DragController>>>,
    focus: FocusTrap,
    fullscreen: RefCell<Option<Rc<RotateToFullscreen>>>,
    listeners: RefCell<Vec<EventListener>>,
    frame: RefCell<Option<AnimationFrame>>,
    pending_style: Cell<Option<TransitionStyle>>,
    clear_timer: RefCell<Option<Timeout>>,
    resize_watch: RefCell<Option<ResizeWatch>>,
    /// Set once the user dragged the dock box; inset updates stop
    /// repositioning it until the inset attribute is written again.
    dragged: Cell<bool>,
}

impl DockDialog {
    /// Builds the structural children inside `host` and wires nothing yet;
    /// call `connect` once the element is in the document.
    pub fn attach(host: HtmlElement) -> Option<Rc<Self>> {
        let document = host.owner_document()?;
        let placeholder = create_div(&document, PLACEHOLDER_CLASS)?;
        let dock_box = create_div(&document, DOCK_TARGET_CLASS)?;
        let dock_box_aspect = create_div(&document, ASPECT_BOX_CLASS)?;
        let content = create_div(&document, CONTENT_CLASS)?;
        let content_inner = create_div(&document, CONTENT_INNER_CLASS)?;

        // existing children become the dialog content
        while let Some(child) = host.first_child() {
            if content_inner.append_child(&child).is_err() {
                break;
            }
        }
        let _ = content.append_child(&content_inner);
        let _ = dock_box.append_child(&dock_box_aspect);
        let _ = host.append_child(&placeholder);
        let _ = host.append_child(&dock_box);
        let _ = host.append_child(&content);

        let placeholder_style = placeholder.style();
        let _ = placeholder_style.set_property("height", "0");
        let _ = placeholder_style.set_property("overflow", "hidden");
        let _ = placeholder_style.set_property("display", "none");
        let aspect_style = dock_box_aspect.style();
        let _ = aspect_style.set_property("height", "0");
        let _ = aspect_style.set_property("overflow", "hidden");
        let dock_box_style = dock_box.style();
        let _ = dock_box_style.set_property("position", "fixed");
        let _ = dock_box_style.set_property("pointer-events", "none");
        let _ = content.style().set_property("display", "none");

        Some(Rc::new(Self {
            host,
            placeholder,
            dock_box,
            dock_box_aspect,
            content,
            content_inner,
            machine: RefCell::new(ModeMachine::new()),
            config: RefCell::new(AttrConfig::default()),
            locator: Rc::new(DockTargetLocator::new()),
            drag: RefCell::new(None),
            focus: FocusTrap::new(),
            fullscreen: RefCell::new(None),
            listeners: RefCell::new(Vec::new()),
            frame: RefCell::new(None),
            pending_style: Cell::new(None),
            clear_timer: RefCell::new(None),
            resize_watch: RefCell::new(None),
            dragged: Cell::new(false),
        }))
    }

    pub fn connect(self: &Rc<Self>) {
        self.update_aspect_boxes();
        self.update_dock_box();
        self.install_listeners();
        self.install_alt_hook();
        self.rebind_drag();
        if self.machine.borrow().raw_mode().is_none() {
            // absent mode attribute defaults to inline
            self.set_mode(DisplayMode::Inline, false);
        }
    }

    pub fn mode(&self) -> DisplayMode {
        self.machine.borrow().mode()
    }

    pub fn set_mode(self: &Rc<Self>, next: DisplayMode, internal: bool) {
        let result = self.machine.borrow_mut().set_mode(next, internal);
        let Some((change, plan)) = result else {
            return;
        };
        self.apply_plan(&change, &plan);
        self.dispatch_mode_change(&change);
    }

    pub fn attribute_changed(self: &Rc<Self>, name: &str, value: Option<&str>) {
        match name {
            "mode" => {
                self.set_mode(DisplayMode::parse(value), false);
                return;
            }
            "aspect-ratio" => {
                self.config.borrow_mut().aspect_ratio = value.map(str::to_string);
                self.update_aspect_boxes();
            }
            "dock-aspect-ratio" => {
                self.config.borrow_mut().dock_aspect_ratio = value.map(str::to_string);
                self.update_aspect_boxes();
            }
            "dock-sticky-aspect-ratio" => {
                self.config.borrow_mut().dock_sticky_aspect_ratio = value.map(str::to_string);
                self.update_aspect_boxes();
            }
            "dock-target" => {
                self.check_selector(value);
                self.locator.set_selector(value.map(str::to_string));
                self.watch_external();
                self.rebind_drag();
            }
            "dock-target-inset" => {
                self.config.borrow_mut().dock_target_inset = value.map(str::to_string);
                self.dragged.set(false);
                self.update_dock_box();
            }
            "dock-mode" => {
                self.config.borrow_mut().dock_mode = DockMode::parse(value);
                self.dragged.set(false);
                self.update_aspect_boxes();
                self.update_dock_box();
                self.rebind_drag();
            }
            "dock-sticky-target-top" => {
                self.config.borrow_mut().dock_sticky_target_top = value
                    .and_then(|value| value.trim().parse().ok())
                    .unwrap_or(0.0);
                self.update_dock_box();
            }
            "dock-downscale" => {
                self.config.borrow_mut().dock_downscale = value.is_some();
            }
            "rotate-to-fullscreen" => {
                self.config.borrow_mut().rotate_to_fullscreen = value.is_some();
                if value.is_none() {
                    self.disable_fullscreen();
                } else if self.mode() == DisplayMode::Lightbox {
                    self.enable_fullscreen();
                }
                return;
            }
            _ => return,
        }
        self.refresh_dock_target();
    }

    /// Recomputes the docked geometry against the current dock target; a
    /// no-op outside dock mode.
    pub fn refresh_dock_target(self: &Rc<Self>) {
        if self.mode() != DisplayMode::Dock {
            return;
        }
        self.run_transition(false);
    }

    fn apply_plan(self: &Rc<Self>, change: &ModeChange, plan: &ModePlan) {
        // pending deferred work belongs to a superseded change
        self.clear_timer.borrow_mut().take();
        self.frame.borrow_mut().take();
        self.pending_style.take();
        if plan.release_scroll_lock {
            scroll_lock::release(LockOwner::Lightbox);
        }
        if plan.release_focus {
            self.focus.release();
            self.disable_fullscreen();
        }
        match change.mode {
            DisplayMode::Dock => self.enter_dock(plan.dock_animate),
            DisplayMode::Inline => self.enter_inline(plan),
            DisplayMode::Lightbox => self.enter_lightbox(),
            DisplayMode::Hidden => self.enter_hidden(),
        }
    }

    fn enter_dock(self: &Rc<Self>, animate: bool) {
        self.set_placeholder_visible(true);
        self.sync_content_display();
        let _ = self
            .content
            .style()
            .set_property("z-index", &DOCK_Z_INDEX.to_string());
        self.update_dock_box();
        self.run_transition(animate);
    }

    fn enter_inline(self: &Rc<Self>, plan: &ModePlan) {
        self.set_placeholder_visible(true);
        self.sync_content_display();
        if plan.resync_dock_first {
            // the stored dock position goes stale while the page scrolls;
            // snap to where the user actually sees the box before animating
            self.run_transition(false);
        }
        if plan.animate_to_inline {
            let this = Rc::clone(self);
            let handle = request_animation_frame(move |_| {
                this.frame.borrow_mut().take();
                if this.mode() != DisplayMode::Inline {
                    return;
                }
                this.apply_inline_styles(true);
                this.schedule_style_clear();
            });
            *self.frame.borrow_mut() = Some(handle);
        } else {
            self.clear_content_styles();
        }
    }

    fn enter_lightbox(self: &Rc<Self>) {
        self.set_placeholder_visible(true);
        // the host stylesheet drives the modal layout
        self.clear_content_styles();
        let _ = self
            .content
            .style()
            .set_property("z-index", &LIGHTBOX_Z_INDEX.to_string());
        if !mobile_landscape() {
            scroll_lock::acquire(LockOwner::Lightbox);
        }
        let this = Rc::clone(self);
        self.focus.engage(
            &self.host,
            &self.content,
            Rc::new(move || {
                let target = this.machine.borrow().restore_target();
                this.set_mode(target, true);
            }),
        );
        if self.config.borrow().rotate_to_fullscreen {
            self.enable_fullscreen();
        }
    }

    fn enter_hidden(&self) {
        self.clear_content_styles();
        self.set_placeholder_visible(false);
    }

    fn run_transition(self: &Rc<Self>, animate: bool) {
        let Some(style) = self.dock_style(animate) else {
            return;
        };
        if animate {
            // defer so the origin state gets painted before the transform
            // starts, otherwise both states collapse into a single frame
            self.pending_style.set(Some(style));
            if self.frame.borrow().is_some() {
                return;
            }
            let this = Rc::clone(self);
            let handle = request_animation_frame(move |_| {
                this.frame.borrow_mut().take();
                if this.mode() != DisplayMode::Dock {
                    this.pending_style.take();
                    return;
                }
                if let Some(style) = this.pending_style.take() {
                    this.commit_style(&style);
                }
            });
            *self.frame.borrow_mut() = Some(handle);
        } else {
            self.commit_style(&style);
        }
    }

    fn dock_style(&self, animate: bool) -> Option<TransitionStyle> {
        let document = self.host.owner_document()?;
        let target = self.locator.locate(&document, &self.dock_box);
        let config = self.config.borrow();
        let spec = TransitionSpec {
            from: element_rect(&self.placeholder),
            to: element_rect(&target),
            aspect_ratio: dock_aspect_ratio(&config),
            initial_aspect_ratio: resolve_aspect_ratio([config.aspect_ratio.as_deref()]),
            viewport_width: viewport().width,
            visual: visual_viewport(),
            animate,
            downscale: config.dock_downscale,
            duration_ms: DEFAULT_TRANSITION_DURATION_MS,
        };
        Some(compute_transition(&spec))
    }

    fn commit_style(&self, style: &TransitionStyle) {
        let css = self.content.style();
        let _ = css.set_property("position", "fixed");
        let _ = css.set_property("width", &px(style.width));
        let _ = css.set_property("height", &px(style.height));
        let _ = css.set_property("top", &px(style.top));
        let _ = css.set_property("left", &px(style.left));
        match style.transform {
            Some(transform) => {
                let _ = css.set_property("transform", &transform.to_css());
            }
            None => {
                let _ = css.remove_property("transform");
            }
        }
        let _ = css.set_property("transform-origin", "top left");
        let _ = css.set_property("transition-property", "transform");
        if style.animate {
            let _ = css.set_property("transition-duration", &format!("{}ms", style.duration_ms));
            let _ = css.set_property("transition-timing-function", TRANSITION_TIMING_FUNCTION);
        } else {
            let _ = css.remove_property("transition-duration");
            let _ = css.remove_property("transition-timing-function");
        }

        let inner = self.content_inner.style();
        match style.content {
            Some(content) => {
                let _ = inner.set_property("width", &px(content.width));
                let _ = inner.set_property("height", &px(content.height));
                let _ = inner.set_property("transform", &content.to_css());
                let _ = inner.set_property("transform-origin", "top left");
            }
            None => {
                let _ = inner.remove_property("width");
                let _ = inner.remove_property("height");
                let _ = inner.remove_property("transform");
            }
        }

        if self.config.borrow().dock_downscale {
            self.dispatch_dock_scale(style.scale);
        }
    }

    fn apply_inline_styles(&self, animate: bool) {
        let css = self.content.style();
        let _ = css.set_property("position", "absolute");
        let _ = css.remove_property("transform");
        let _ = css.remove_property("top");
        let _ = css.remove_property("left");
        let _ = css.remove_property("width");
        let _ = css.remove_property("height");
        if animate {
            let _ = css.set_property(
                "transition-duration",
                &format!("{DEFAULT_TRANSITION_DURATION_MS}ms"),
            );
            let _ = css.set_property("transition-timing-function", TRANSITION_TIMING_FUNCTION);
        } else {
            let _ = css.remove_property("transition-duration");
            let _ = css.remove_property("transition-timing-function");
        }
        let inner = self.content_inner.style();
        let _ = inner.remove_property("width");
        let _ = inner.remove_property("height");
        let _ = inner.remove_property("transform");
    }

    fn schedule_style_clear(self: &Rc<Self>) {
        let this = Rc::clone(self);
        *self.clear_timer.borrow_mut() = Some(Timeout::new(DEFAULT_TRANSITION_DURATION_MS, move || {
            // a rapid later change must not be clobbered by this cleanup
            if this.mode() == DisplayMode::Inline {
                this.clear_content_styles();
            }
        }));
    }

    fn clear_content_styles(&self) {
        let _ = self.content.set_attribute("style", "");
        let _ = self.content_inner.set_attribute("style", "");
        self.sync_content_display();
    }

    fn sync_content_display(&self) {
        let css = self.content.style();
        if self.mode() == DisplayMode::Hidden {
            let _ = css.set_property("display", "none");
        } else {
            let _ = css.set_property("display", "block");
        }
    }

    fn set_placeholder_visible(&self, visible: bool) {
        let css = self.placeholder.style();
        if visible {
            let _ = css.set_property("display", "block");
        } else {
            let _ = css.set_property("display", "none");
        }
    }

    /// Sizes and positions the internal dock box for the current mode.
    fn update_dock_box(&self) {
        let config = self.config.borrow();
        let style = self.dock_box.style();
        match config.dock_mode {
            DockMode::Corner => {
                let width = dock_width(viewport().width);
                let _ = style.set_property("width", &px(width));
                if !self.dragged.get() {
                    let inset = config
                        .dock_target_inset
                        .as_deref()
                        .and_then(Inset::parse)
                        .unwrap_or_else(Inset::default_dock);
                    let _ = style.set_property("top", &inset.top);
                    let _ = style.set_property("right", &inset.right);
                    let _ = style.set_property("bottom", &inset.bottom);
                    let _ = style.set_property("left", &inset.left);
                }
            }
            DockMode::Sticky => {
                let anchor_bottom = self
                    .host
                    .owner_document()
                    .and_then(|document| self.locator.sticky_anchor_bottom(&document));
                let top = sticky_top(anchor_bottom, config.dock_sticky_target_top);
                let _ = style.set_property("width", "100%");
                let _ = style.set_property("top", &px(top));
                let _ = style.set_property("left", "0");
                let _ = style.set_property("right", "auto");
                let _ = style.set_property("bottom", "auto");
            }
        }
    }

    fn update_aspect_boxes(&self) {
        let config = self.config.borrow();
        let inline_ratio = resolve_aspect_ratio([config.aspect_ratio.as_deref()]);
        let _ = self
            .placeholder
            .style()
            .set_property("padding-top", &format!("{}%", 100.0 / inline_ratio));
        let dock_ratio = dock_aspect_ratio(&config);
        let _ = self
            .dock_box_aspect
            .style()
            .set_property("padding-top", &format!("{}%", 100.0 / dock_ratio));
    }

    fn install_listeners(self: &Rc<Self>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let mut listeners = Vec::new();

        let this = Rc::clone(self);
        listeners.push(EventListener::new(&self.host, "click", move |event: &Event| {
            this.handle_click(event);
        }));

        let this = Rc::clone(self);
        listeners.push(EventListener::new(&window, "resize", move |_: &Event| {
            this.update_dock_box();
            this.refresh_dock_target();
        }));

        let this = Rc::clone(self);
        listeners.push(EventListener::new(&window, "scroll", move |_: &Event| {
            this.handle_scroll();
        }));

        if let Some(visual) = window.visual_viewport() {
            for event_name in ["resize", "scroll"] {
                let this = Rc::clone(self);
                listeners.push(EventListener::new(&visual, event_name, move |_: &Event| {
                    this.refresh_dock_target();
                }));
            }
        }

        *self.listeners.borrow_mut() = listeners;
    }

    fn install_alt_hook(&self) {
        let host = self.host.clone();
        self.locator.set_alt_hook(Some(Rc::new(move |active| {
            if active {
                let _ = host.set_attribute(EXTERNAL_TARGET_ATTR, "");
            } else {
                let _ = host.remove_attribute(EXTERNAL_TARGET_ATTR);
            }
        })));
    }

    fn handle_click(self: &Rc<Self>, event: &Event) {
        if let Some(drag) = self.drag.borrow().as_ref() {
            if drag.is_moving() {
                return;
            }
        }
        let Some(target) = event.target() else {
            return;
        };
        let host: &EventTarget = self.host.as_ref();
        let placeholder: &EventTarget = self.placeholder.as_ref();
        if &target != host && &target != placeholder {
            return;
        }
        let next = self.machine.borrow().click_target();
        self.set_mode(next, true);
    }

    fn handle_scroll(self: &Rc<Self>) {
        // only the sticky dock tracks its anchor through scrolling
        if self.config.borrow().dock_mode != DockMode::Sticky {
            return;
        }
        if self.mode() != DisplayMode::Dock {
            return;
        }
        self.update_dock_box();
        self.run_transition(false);
    }

    fn rebind_drag(self: &Rc<Self>) {
        if let Some(drag) = self.drag.borrow_mut().take() {
            drag.unbind();
        }
        if self.config.borrow().dock_mode == DockMode::Sticky {
            return;
        }
        let this = Rc::clone(self);
        let can_drag =
            Rc::new(move || this.mode() == DisplayMode::Dock && !this.locator.alt_active());
        let this = Rc::clone(self);
        let on_moved = Rc::new(move || {
            this.dragged.set(true);
            this.refresh_dock_target();
        });
        let controller = DragController::bind(
            self.content.clone(),
            self.dock_box.clone(),
            DragHooks { can_drag, on_moved },
        );
        *self.drag.borrow_mut() = Some(controller);
    }

    fn watch_external(self: &Rc<Self>) {
        self.resize_watch.borrow_mut().take();
        let Some(document) = self.host.owner_document() else {
            return;
        };
        let Some(element) = self.locator.external(&document) else {
            return;
        };
        let this = Rc::clone(self);
        let watch = ResizeWatch::observe(
            &element,
            Rc::new(move || {
                this.refresh_dock_target();
            }),
        );
        *self.resize_watch.borrow_mut() = watch;
    }

    fn check_selector(&self, selector: Option<&str>) {
        let Some(selector) = selector else {
            return;
        };
        let Some(document) = self.host.owner_document() else {
            return;
        };
        if document.query_selector_all(selector).is_err() {
            gloo::console::log!("dock target: invalid selector, using default", selector);
        }
    }

    fn enable_fullscreen(self: &Rc<Self>) {
        let helper = {
            let mut slot = self.fullscreen.borrow_mut();
            if slot.is_none() {
                let element: &web_sys::Element = self.content.as_ref();
                *slot = Some(RotateToFullscreen::new(
                    element.clone(),
                    FullscreenHooks::empty(),
                ));
            }
            slot.as_ref().map(Rc::clone)
        };
        if let Some(helper) = helper {
            helper.enable();
        }
    }

    fn disable_fullscreen(&self) {
        if let Some(helper) = self.fullscreen.borrow().as_ref() {
            helper.disable();
        }
    }

    fn dispatch_mode_change(&self, change: &ModeChange) {
        let detail = js_sys::Object::new();
        let previous = match change.previous {
            Some(mode) => JsValue::from_str(mode.as_str()),
            None => JsValue::NULL,
        };
        let _ = Reflect::set(&detail, &JsValue::from_str("previousMode"), &previous);
        let _ = Reflect::set(
            &detail,
            &JsValue::from_str("mode"),
            &JsValue::from_str(change.mode.as_str()),
        );
        let _ = Reflect::set(
            &detail,
            &JsValue::from_str("internal"),
            &JsValue::from_bool(change.internal),
        );
        self.dispatch(MODE_CHANGE_EVENT, &detail);
    }

    fn dispatch_dock_scale(&self, scale: f64) {
        let detail = js_sys::Object::new();
        let _ = Reflect::set(
            &detail,
            &JsValue::from_str("scale"),
            &JsValue::from_f64(scale),
        );
        self.dispatch(DOCK_SCALE_EVENT, &detail);
    }

    fn dispatch(&self, name: &str, detail: &js_sys::Object) {
        let init = CustomEventInit::new();
        init.set_detail(detail);
        init.set_bubbles(true);
        init.set_composed(true);
        let Ok(event) = CustomEvent::new_with_event_init_dict(name, &init) else {
            return;
        };
        let _ = self.host.dispatch_event(&event);
    }
}

fn dock_aspect_ratio(config: &AttrConfig) -> f64 {
    match config.dock_mode {
        DockMode::Sticky => resolve_aspect_ratio([
            config.dock_sticky_aspect_ratio.as_deref(),
            config.dock_aspect_ratio.as_deref(),
            config.aspect_ratio.as_deref(),
        ]),
        DockMode::Corner => resolve_aspect_ratio([
            config.dock_aspect_ratio.as_deref(),
            config.aspect_ratio.as_deref(),
        ]),
    }
}

/// Lightbox scrolling stays enabled here so the user can still dismiss the
/// browser's chrome bar.
fn mobile_landscape() -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    window
        .match_media("(orientation: landscape) and (pointer: coarse)")
        .ok()
        .flatten()
        .map(|list| list.matches())
        .unwrap_or(false)
}

fn create_div(document: &Document, class: &str) -> Option<HtmlElement> {
    use wasm_bindgen::JsCast;
    let element = document.create_element("div").ok()?;
    let _ = element.set_attribute("class", class);
    element.dyn_into().ok()
}

fn px(value: f64) -> String {
    format!("{value}px")
}
