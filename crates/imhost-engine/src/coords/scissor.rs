use super::{Rect, Viewport};

/// Origin convention of the host's scissor API.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum ScissorOrigin {
    /// Y grows downwards from the top edge (wgpu, Vulkan, D3D).
    #[default]
    TopLeft,
    /// Y grows upwards from the bottom edge (OpenGL-style APIs).
    BottomLeft,
}

/// Scissor rectangle in integer framebuffer pixels, in the host's origin convention.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct ScissorRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl ScissorRect {
    #[inline]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Converts a clamped, top-left-relative framebuffer rect into integer scissor
    /// arguments.
    ///
    /// The min corner is floored and the max corner ceiled so partially covered pixels stay
    /// visible; both are clamped to the framebuffer. Returns `None` for a zero-area result.
    pub fn from_framebuffer_rect(r: Rect, fb: Viewport, origin: ScissorOrigin) -> Option<Self> {
        let fb_w = fb.width.max(0.0).ceil() as u32;
        let fb_h = fb.height.max(0.0).ceil() as u32;

        let min = r.min();
        let max = r.max();
        let x0 = (min.x.max(0.0).floor() as u32).min(fb_w);
        let y0 = (min.y.max(0.0).floor() as u32).min(fb_h);
        let x1 = (max.x.max(0.0).ceil() as u32).min(fb_w);
        let y1 = (max.y.max(0.0).ceil() as u32).min(fb_h);

        let width = x1.saturating_sub(x0);
        let height = y1.saturating_sub(y0);
        if width == 0 || height == 0 {
            return None;
        }

        let y = match origin {
            ScissorOrigin::TopLeft => y0,
            ScissorOrigin::BottomLeft => fb_h - y1,
        };

        Some(Self { x: x0, y, width, height })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FB: Viewport = Viewport::new(800.0, 600.0);

    #[test]
    fn full_canvas_top_left() {
        let s = ScissorRect::from_framebuffer_rect(
            Rect::new(0.0, 0.0, 800.0, 600.0),
            FB,
            ScissorOrigin::TopLeft,
        );
        assert_eq!(s, Some(ScissorRect::new(0, 0, 800, 600)));
    }

    #[test]
    fn bottom_left_flips_y() {
        // Top band 100px high sits at y = 500 in a bottom-left convention.
        let s = ScissorRect::from_framebuffer_rect(
            Rect::new(10.0, 0.0, 100.0, 100.0),
            FB,
            ScissorOrigin::BottomLeft,
        );
        assert_eq!(s, Some(ScissorRect::new(10, 500, 100, 100)));
    }

    #[test]
    fn fractional_edges_expand_outwards() {
        let s = ScissorRect::from_framebuffer_rect(
            Rect::new(10.5, 20.25, 10.0, 10.0),
            FB,
            ScissorOrigin::TopLeft,
        );
        // [10.5, 20.5] → [10, 21]; [20.25, 30.25] → [20, 31]
        assert_eq!(s, Some(ScissorRect::new(10, 20, 11, 11)));
    }

    #[test]
    fn zero_area_is_none() {
        let s = ScissorRect::from_framebuffer_rect(
            Rect::new(800.0, 0.0, 0.0, 600.0),
            FB,
            ScissorOrigin::TopLeft,
        );
        assert!(s.is_none());
    }
}
