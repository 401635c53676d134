use dockbox_core::{
    compute_transition, Rect, TransitionSpec, VisualViewport, DEFAULT_TRANSITION_DURATION_MS,
    NARROW_FALLBACK_WIDTH, WIDE_FALLBACK_WIDTH,
};

fn spec(from: Rect, to: Rect) -> TransitionSpec {
    TransitionSpec {
        from,
        to,
        aspect_ratio: 16.0 / 9.0,
        initial_aspect_ratio: 16.0 / 9.0,
        viewport_width: 1280.0,
        visual: VisualViewport::default(),
        animate: true,
        downscale: false,
        duration_ms: DEFAULT_TRANSITION_DURATION_MS,
    }
}

#[test]
fn inline_to_dock_scale_and_translate() {
    let from = Rect::new(0.0, 0.0, 640.0, 360.0);
    let to = Rect::new(100.0, 100.0, 200.0, 112.5);
    let style = compute_transition(&spec(from, to));

    let transform = style.transform.expect("transform");
    assert_eq!(transform.scale, 200.0 / 640.0);
    assert_eq!(transform.translate_x_pct, 100.0 / 640.0 * 100.0);
    assert_eq!(transform.translate_y_pct, 100.0 / 360.0 * 100.0);
    assert_eq!(style.width, 640.0);
    assert_eq!(style.height, 360.0);
    assert_eq!((style.left, style.top), (0.0, 0.0));
    assert_eq!(style.scale, 0.3125);
}

#[test]
fn transform_css_shape() {
    let from = Rect::new(0.0, 0.0, 640.0, 360.0);
    let to = Rect::new(100.0, 100.0, 200.0, 112.5);
    let style = compute_transition(&spec(from, to));
    let transform = style.transform.expect("transform");
    assert_eq!(
        transform.to_css(),
        "translate(15.625%, 27.77777777777778%) scale(0.3125)"
    );
}

#[test]
fn hidden_origin_uses_fallback_width() {
    let from = Rect::new(0.0, 0.0, 0.0, 0.0);
    let to = Rect::new(100.0, 100.0, 200.0, 112.5);

    let mut wide = spec(from, to);
    wide.viewport_width = 1280.0;
    let style = compute_transition(&wide);
    assert_eq!(style.width, WIDE_FALLBACK_WIDTH);
    assert_eq!(style.transform.expect("transform").scale, 200.0 / 640.0);

    let mut narrow = spec(from, to);
    narrow.viewport_width = 600.0;
    let style = compute_transition(&narrow);
    assert_eq!(style.width, NARROW_FALLBACK_WIDTH);
}

#[test]
fn zero_height_origin_falls_back_via_initial_ratio() {
    let from = Rect::new(0.0, 200.0, 640.0, 0.0);
    let to = Rect::new(0.0, 100.0, 200.0, 112.5);
    let mut s = spec(from, to);
    s.initial_aspect_ratio = 4.0 / 3.0;
    let style = compute_transition(&s);
    // translate denominator is 640 / (4/3) = 480
    let transform = style.transform.expect("transform");
    assert_eq!(transform.translate_y_pct, -100.0 / 480.0 * 100.0);
}

#[test]
fn dock_ratio_overrides_box_height() {
    let from = Rect::new(0.0, 0.0, 640.0, 360.0);
    let to = Rect::new(100.0, 100.0, 200.0, 400.0);
    let mut s = spec(from, to);
    s.aspect_ratio = 1.0 / 2.0;
    let style = compute_transition(&s);
    assert_eq!(style.height, 1280.0);
}

#[test]
fn visual_viewport_shifts_destination() {
    let from = Rect::new(0.0, 0.0, 640.0, 360.0);
    let to = Rect::new(100.0, 100.0, 200.0, 112.5);
    let mut s = spec(from, to);
    s.visual = VisualViewport {
        offset_left: 64.0,
        offset_top: 36.0,
        scale: 0.5,
    };
    let style = compute_transition(&s);
    let transform = style.transform.expect("transform");
    assert_eq!(transform.translate_x_pct, 164.0 / 640.0 * 100.0);
    assert_eq!(transform.translate_y_pct, 136.0 / 360.0 * 100.0);
    assert_eq!(transform.scale, 200.0 / 640.0 * 0.5);
}

#[test]
fn zero_width_destination_degrades_to_noop() {
    let from = Rect::new(0.0, 0.0, 640.0, 360.0);
    let to = Rect::new(100.0, 100.0, 0.0, 0.0);
    let style = compute_transition(&spec(from, to));
    assert_eq!(style.transform, None);
    assert_eq!(style.content, None);
    assert_eq!(style.scale, 1.0);
}

#[test]
fn counter_scale_sizes_content_to_destination() {
    let from = Rect::new(0.0, 0.0, 640.0, 360.0);
    let to = Rect::new(100.0, 100.0, 200.0, 112.5);
    let style = compute_transition(&spec(from, to));
    let content = style.content.expect("content layer");
    assert_eq!(content.width, 200.0);
    assert_eq!(content.height, 112.5);
    assert_eq!(content.scale, 640.0 / 200.0);
}

#[test]
fn downscale_skips_counter_scale_and_reports_factor() {
    let from = Rect::new(0.0, 0.0, 640.0, 360.0);
    let to = Rect::new(100.0, 100.0, 200.0, 112.5);
    let mut s = spec(from, to);
    s.downscale = true;
    let style = compute_transition(&s);
    assert_eq!(style.content, None);
    assert_eq!(style.scale, 0.3125);
}

#[test]
fn recompute_without_state_change_is_stable() {
    let from = Rect::new(12.0, 34.0, 640.0, 360.0);
    let to = Rect::new(900.0, 10.0, 300.0, 168.75);
    let s = spec(from, to);
    assert_eq!(compute_transition(&s), compute_transition(&s));
}
