use super::{Rect, Vec2, Viewport};

/// Maps GUI-space coordinates to framebuffer pixels.
///
/// `offset` is the GUI-space position of the framebuffer's top-left corner (non-zero for
/// secondary viewports); `scale` is the framebuffer-pixels-per-GUI-unit factor (HiDPI).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DisplayTransform {
    pub offset: Vec2,
    pub scale: Vec2,
}

impl Default for DisplayTransform {
    fn default() -> Self {
        Self {
            offset: Vec2::zero(),
            scale: Vec2::splat(1.0),
        }
    }
}

impl DisplayTransform {
    #[inline]
    pub const fn new(offset: Vec2, scale: Vec2) -> Self {
        Self { offset, scale }
    }

    /// Framebuffer size in pixels for a display of `display_size` GUI units.
    #[inline]
    pub fn framebuffer_size(self, display_size: Vec2) -> Viewport {
        let fb = display_size.scale(self.scale);
        Viewport::new(fb.x, fb.y)
    }

    /// GUI-space point to framebuffer pixels (top-left origin).
    #[inline]
    pub fn to_framebuffer(self, p: Vec2) -> Vec2 {
        (p - self.offset).scale(self.scale)
    }

    /// GUI-space point to normalized device coordinates: x right, y up, range `[-1, 1]`.
    #[inline]
    pub fn to_ndc(self, p: Vec2, fb: Viewport) -> [f32; 2] {
        let px = self.to_framebuffer(p);
        [
            (px.x / fb.width) * 2.0 - 1.0,
            1.0 - (px.y / fb.height) * 2.0,
        ]
    }

    /// Transforms a GUI clip rect `[x1, y1, x2, y2]` into framebuffer pixels, clamped to
    /// `[0, fb.width] × [0, fb.height]`. Returns `None` if nothing of it remains.
    #[inline]
    pub fn clip_to_framebuffer(self, clip: [f32; 4], fb: Viewport) -> Option<Rect> {
        let min = self.to_framebuffer(Vec2::new(clip[0], clip[1]));
        let max = self.to_framebuffer(Vec2::new(clip[2], clip[3]));
        let bounds = Rect::new(0.0, 0.0, fb.width, fb.height);
        let r = Rect::from_min_max(min, max).clamped_to(bounds);
        if r.is_empty() { None } else { Some(r) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FB: Viewport = Viewport::new(800.0, 600.0);

    #[test]
    fn ndc_corners_identity_transform() {
        let t = DisplayTransform::default();
        assert_eq!(t.to_ndc(Vec2::new(0.0, 0.0), FB), [-1.0, 1.0]);
        assert_eq!(t.to_ndc(Vec2::new(800.0, 600.0), FB), [1.0, -1.0]);
        assert_eq!(t.to_ndc(Vec2::new(400.0, 300.0), FB), [0.0, 0.0]);
    }

    #[test]
    fn ndc_applies_offset_then_scale() {
        // Secondary viewport at (100, 50), 2x HiDPI: GUI (100, 50) is the top-left pixel.
        let t = DisplayTransform::new(Vec2::new(100.0, 50.0), Vec2::splat(2.0));
        let fb = t.framebuffer_size(Vec2::new(400.0, 300.0));
        assert_eq!(fb, FB);
        assert_eq!(t.to_ndc(Vec2::new(100.0, 50.0), fb), [-1.0, 1.0]);
        assert_eq!(t.to_ndc(Vec2::new(500.0, 350.0), fb), [1.0, -1.0]);
    }

    #[test]
    fn clip_full_canvas() {
        let t = DisplayTransform::default();
        let r = t.clip_to_framebuffer([0.0, 0.0, 800.0, 600.0], FB).unwrap();
        assert_eq!(r, Rect::new(0.0, 0.0, 800.0, 600.0));
    }

    #[test]
    fn clip_is_clamped() {
        let t = DisplayTransform::default();
        let r = t.clip_to_framebuffer([-50.0, -50.0, 1000.0, 100.0], FB).unwrap();
        assert_eq!(r, Rect::new(0.0, 0.0, 800.0, 100.0));
    }

    #[test]
    fn clip_outside_is_none() {
        let t = DisplayTransform::default();
        assert!(t.clip_to_framebuffer([900.0, 0.0, 1000.0, 100.0], FB).is_none());
        assert!(t.clip_to_framebuffer([0.0, -200.0, 100.0, -10.0], FB).is_none());
    }

    #[test]
    fn clip_scaled_by_dpi() {
        let t = DisplayTransform::new(Vec2::zero(), Vec2::splat(2.0));
        let r = t.clip_to_framebuffer([10.0, 10.0, 20.0, 30.0], FB).unwrap();
        assert_eq!(r, Rect::new(20.0, 20.0, 20.0, 40.0));
    }
}
