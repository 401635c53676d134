pub mod aspect;
pub mod dock;
pub mod geometry;
pub mod inset;
pub mod lock;
pub mod mode;
pub mod transition;

pub use aspect::{parse_aspect_ratio, resolve_aspect_ratio, FALLBACK_ASPECT_RATIO};
pub use dock::{
    clamp_drag_axis, dock_width, drag_position, sticky_top, DOCK_VIEWPORT_FRACTION, DOCK_WIDTH_MAX,
    DOCK_WIDTH_MIN, STICKY_ATTACH_LIMIT,
};
pub use geometry::{rect_intersection, Rect, Viewport, VisualViewport};
pub use inset::{Inset, DEFAULT_DOCK_TARGET_INSET};
pub use lock::{LockOwner, ScrollLock};
pub use mode::{
    plan_transition, DisplayMode, ModeChange, ModeMachine, ModePlan, DOCK_Z_INDEX,
    DRAG_OVERLAY_Z_INDEX, LIGHTBOX_Z_INDEX,
};
pub use transition::{
    compute_transition, fallback_width, ContentCounterScale, Transform, TransitionSpec,
    TransitionStyle, DEFAULT_TRANSITION_DURATION_MS, NARROW_FALLBACK_WIDTH, NARROW_VIEWPORT_LIMIT,
    TRANSITION_TIMING_FUNCTION, WIDE_FALLBACK_WIDTH,
};
