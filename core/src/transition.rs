use crate::geometry::{Rect, VisualViewport};

pub const DEFAULT_TRANSITION_DURATION_MS: u32 = 300;
pub const TRANSITION_TIMING_FUNCTION: &str = "ease-out";

/// Width substituted when the origin element is not rendered.
pub const NARROW_VIEWPORT_LIMIT: f64 = 720.0;
pub const NARROW_FALLBACK_WIDTH: f64 = 320.0;
pub const WIDE_FALLBACK_WIDTH: f64 = 640.0;

pub fn fallback_width(viewport_width: f64) -> f64 {
    if viewport_width < NARROW_VIEWPORT_LIMIT {
        NARROW_FALLBACK_WIDTH
    } else {
        WIDE_FALLBACK_WIDTH
    }
}

/// Inputs for one transition computation. Built fresh for every mode change
/// or refresh; nothing here is cached between calls.
#[derive(Clone, Copy, Debug)]
pub struct TransitionSpec {
    pub from: Rect,
    pub to: Rect,
    /// Ratio the element moves toward (dock or sticky override).
    pub aspect_ratio: f64,
    /// Ratio the element had before any dock-specific override.
    pub initial_aspect_ratio: f64,
    pub viewport_width: f64,
    pub visual: VisualViewport,
    pub animate: bool,
    pub downscale: bool,
    pub duration_ms: u32,
}

/// Percentage translate plus uniform scale, origin pinned top-left.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translate_x_pct: f64,
    pub translate_y_pct: f64,
    pub scale: f64,
}

impl Transform {
    pub fn to_css(&self) -> String {
        format!(
            "translate({}%, {}%) scale({})",
            self.translate_x_pct, self.translate_y_pct, self.scale
        )
    }
}

/// Counter-scale layer for the embedded content: sized to the destination
/// in pixels and scaled back by the inverse of the outer scale, so the
/// content keeps rendering at destination resolution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContentCounterScale {
    pub width: f64,
    pub height: f64,
    pub scale: f64,
}

impl ContentCounterScale {
    pub fn to_css(&self) -> String {
        format!("scale({})", self.scale)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionStyle {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    pub transform: Option<Transform>,
    pub content: Option<ContentCounterScale>,
    pub animate: bool,
    pub duration_ms: u32,
    /// Scale factor the destination imposes on the moving box; 1.0 when the
    /// computation degenerated to a no-op.
    pub scale: f64,
}

/// Computes the style that makes a box fly from `spec.from` to `spec.to`.
///
/// The box keeps the origin width and reaches the destination via a single
/// translate-then-scale transform, so layout never re-flows mid-move. The
/// translate is expressed in percent of the box's own dimensions, which
/// keeps it correct under ancestor scaling.
pub fn compute_transition(spec: &TransitionSpec) -> TransitionStyle {
    let width = if spec.from.width > 0.0 {
        spec.from.width
    } else {
        fallback_width(spec.viewport_width)
    };
    let from_height = if spec.from.height > 0.0 {
        spec.from.height
    } else {
        width / spec.initial_aspect_ratio
    };
    let height = width / spec.aspect_ratio;

    let delta_x = (spec.to.left + spec.visual.offset_left) - spec.from.left;
    let delta_y = (spec.to.top + spec.visual.offset_top) - spec.from.top;
    let scale = spec.to.width / width * spec.visual.scale;
    let translate_x_pct = delta_x / width * 100.0;
    let translate_y_pct = delta_y / from_height * 100.0;

    // Transient layouts can hand us a zero-width destination; degrade to a
    // no-op transform instead of propagating NaN into styles.
    let usable = scale.is_finite()
        && scale > 0.0
        && translate_x_pct.is_finite()
        && translate_y_pct.is_finite();

    let transform = usable.then_some(Transform {
        translate_x_pct,
        translate_y_pct,
        scale,
    });
    let content = (usable && !spec.downscale).then(|| {
        let content_height = if spec.to.height > 0.0 {
            spec.to.height
        } else {
            spec.to.width / spec.aspect_ratio
        };
        ContentCounterScale {
            width: spec.to.width,
            height: content_height,
            scale: 1.0 / scale,
        }
    });

    TransitionStyle {
        left: spec.from.left,
        top: spec.from.top,
        width,
        height,
        transform,
        content,
        animate: spec.animate,
        duration_ms: spec.duration_ms,
        scale: if usable { scale } else { 1.0 },
    }
}
