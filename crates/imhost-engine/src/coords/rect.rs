use super::Vec2;

/// Axis-aligned rectangle (top-left origin, +Y down).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// Builds a rectangle from its min and max corners. The result may have a
    /// negative size if `max < min`; check [`is_empty`](Self::is_empty).
    #[inline]
    pub fn from_min_max(min: Vec2, max: Vec2) -> Self {
        Self {
            origin: min,
            size: max - min,
        }
    }

    /// Builds a rectangle from `[x1, y1, x2, y2]`, the layout GUI clip rects use.
    #[inline]
    pub fn from_corners(c: [f32; 4]) -> Self {
        Self::from_min_max(Vec2::new(c[0], c[1]), Vec2::new(c[2], c[3]))
    }

    #[inline]
    pub fn min(self) -> Vec2 {
        self.origin
    }

    #[inline]
    pub fn max(self) -> Vec2 {
        Vec2::new(self.origin.x + self.size.x, self.origin.y + self.size.y)
    }

    /// True for zero, negative or NaN extents.
    #[inline]
    pub fn is_empty(self) -> bool {
        !(self.size.x > 0.0 && self.size.y > 0.0)
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.origin.is_finite() && self.size.is_finite()
    }

    /// Clamps both corners into `bounds`. Unlike [`intersect`](Self::intersect) the result
    /// is returned even when empty.
    #[inline]
    pub fn clamped_to(self, bounds: Rect) -> Rect {
        let lo = bounds.min();
        let hi = bounds.max();
        let min = self.min();
        let max = self.max();
        Rect::from_min_max(
            Vec2::new(min.x.clamp(lo.x, hi.x), min.y.clamp(lo.y, hi.y)),
            Vec2::new(max.x.clamp(lo.x, hi.x), max.y.clamp(lo.y, hi.y)),
        )
    }

    /// Overlap of two rectangles, `None` when they share no area.
    #[inline]
    pub fn intersect(self, other: Rect) -> Option<Rect> {
        let r = self.clamped_to(other);
        if r.is_empty() { None } else { Some(r) }
    }
}
