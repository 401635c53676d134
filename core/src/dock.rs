use crate::geometry::{Rect, Viewport, VisualViewport};

pub const DOCK_VIEWPORT_FRACTION: f64 = 0.3;
pub const DOCK_WIDTH_MIN: f64 = 192.0;
pub const DOCK_WIDTH_MAX: f64 = 400.0;

/// A sticky anchor further than this from the viewport top is ignored, so
/// the dock does not follow expandable chrome like collapsing nav bars.
pub const STICKY_ATTACH_LIMIT: f64 = 200.0;

pub fn dock_width(viewport_width: f64) -> f64 {
    (viewport_width * DOCK_VIEWPORT_FRACTION).clamp(DOCK_WIDTH_MIN, DOCK_WIDTH_MAX)
}

/// Top offset for the sticky dock: the anchor's bottom edge while it stays
/// within the attach limit, the configured fallback otherwise.
pub fn sticky_top(anchor_bottom: Option<f64>, fallback_top: f64) -> f64 {
    match anchor_bottom {
        Some(bottom) if bottom >= 0.0 && bottom < STICKY_ATTACH_LIMIT => bottom,
        _ => fallback_top,
    }
}

pub fn clamp_drag_axis(
    value: f64,
    viewport_len: f64,
    target_len: f64,
    visual_offset: f64,
    visual_scale: f64,
) -> f64 {
    let max = ((viewport_len - target_len + visual_offset) * visual_scale).max(0.0);
    value.clamp(0.0, max)
}

/// New top-left of a dragged dock target, clamped so it never leaves the
/// viewport on either axis.
pub fn drag_position(
    start: Rect,
    delta_x: f64,
    delta_y: f64,
    viewport: Viewport,
    visual: VisualViewport,
) -> (f64, f64) {
    let left = clamp_drag_axis(
        start.left + delta_x,
        viewport.width,
        start.width,
        visual.offset_left,
        visual.scale,
    );
    let top = clamp_drag_axis(
        start.top + delta_y,
        viewport.height,
        start.height,
        visual.offset_top,
        visual.scale,
    );
    (left, top)
}
