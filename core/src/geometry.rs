#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn has_area(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}

/// Offset and scale of the visible area relative to the layout viewport.
/// Stays at the identity on platforms without a visual-viewport API.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisualViewport {
    pub offset_left: f64,
    pub offset_top: f64,
    pub scale: f64,
}

impl Default for VisualViewport {
    fn default() -> Self {
        Self {
            offset_left: 0.0,
            offset_top: 0.0,
            scale: 1.0,
        }
    }
}

pub fn rect_intersection<I>(rects: I) -> Option<Rect>
where
    I: IntoIterator<Item = Option<Rect>>,
{
    let mut x0 = f64::NEG_INFINITY;
    let mut x1 = f64::INFINITY;
    let mut y0 = f64::NEG_INFINITY;
    let mut y1 = f64::INFINITY;
    let mut seen = false;
    for rect in rects.into_iter().flatten() {
        seen = true;
        x0 = x0.max(rect.left);
        x1 = x1.min(rect.right());
        y0 = y0.max(rect.top);
        y1 = y1.min(rect.bottom());
        if x1 < x0 || y1 < y0 {
            return None;
        }
    }
    if !seen {
        return None;
    }
    Some(Rect::new(x0, y0, x1 - x0, y1 - y0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intersection_of_rect_with_itself_is_identity() {
        let rect = Rect::new(10.0, 20.0, 300.0, 150.0);
        let result = rect_intersection([Some(rect), Some(rect)]);
        assert_eq!(result, Some(rect));
    }

    #[test]
    fn disjoint_rects_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(200.0, 200.0, 50.0, 50.0);
        assert_eq!(rect_intersection([Some(a), Some(b)]), None);
    }

    #[test]
    fn missing_rects_are_skipped() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(50.0, 50.0, 100.0, 100.0);
        let result = rect_intersection([None, Some(a), None, Some(b)]);
        assert_eq!(result, Some(Rect::new(50.0, 50.0, 50.0, 50.0)));
    }

    #[test]
    fn no_usable_rects_is_none() {
        assert_eq!(rect_intersection([]), None);
        assert_eq!(rect_intersection([None, None]), None);
    }

    #[test]
    fn touching_edges_intersect_with_zero_area() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(100.0, 0.0, 100.0, 100.0);
        let result = rect_intersection([Some(a), Some(b)]);
        assert_eq!(result, Some(Rect::new(100.0, 0.0, 0.0, 100.0)));
        assert!(!result.unwrap().has_area());
    }
}
