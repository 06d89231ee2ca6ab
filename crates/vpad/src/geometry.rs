//! Geometry primitives for normalized-space hit testing
//!
//! All coordinates live in normalized screen space [0,1]x[0,1] with y
//! pointing down, matching the touch layer. Pixel-space types exist only at
//! the rendering and query boundary.

use glam::Vec2;

/// Screen dimensions in pixels, used for normalized <-> pixel conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenSize {
    pub width: i32,
    pub height: i32,
}

impl ScreenSize {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle in pixel space
///
/// External query type: callers asking "was there a tap in this region"
/// speak pixels, not normalized space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl PixelRect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }
}

/// Axis-aligned rectangle in normalized screen space
///
/// Doubles as the hit zone of a virtual button. A negative `x` marks a zone
/// that is configured off; such rectangles never match a point and are
/// never drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    /// Sentinel for a button with no on-screen zone
    pub const INACTIVE: Rect = Rect {
        x: -1.0,
        y: -1.0,
        w: -1.0,
        h: -1.0,
    };

    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle of the given size centered on `p`
    pub fn centered(p: Vec2, w: f32, h: f32) -> Self {
        Self {
            x: p.x - w / 2.0,
            y: p.y - h / 2.0,
            w,
            h,
        }
    }

    /// Convert a pixel-space rectangle to normalized space
    pub fn from_pixels(r: PixelRect, screen: ScreenSize) -> Self {
        Self {
            x: r.x as f32 / screen.width as f32,
            y: r.y as f32 / screen.height as f32,
            w: r.w as f32 / screen.width as f32,
            h: r.h as f32 / screen.height as f32,
        }
    }

    /// Whether this rectangle has an on-screen zone at all
    pub fn is_active(&self) -> bool {
        self.x >= 0.0
    }

    /// Inclusive point containment
    pub fn contains(&self, p: Vec2) -> bool {
        !(p.x < self.x || self.x + self.w < p.x || p.y < self.y || self.y + self.h < p.y)
    }

    /// Corners in pixel space as (x1, y1, x2, y2)
    pub fn to_pixels(&self, screen: ScreenSize) -> (i32, i32, i32, i32) {
        (
            (screen.width as f32 * self.x) as i32,
            (screen.height as f32 * self.y) as i32,
            (screen.width as f32 * (self.x + self.w)) as i32,
            (screen.height as f32 * (self.y + self.h)) as i32,
        )
    }
}

/// One 45-degree sector of the directional wheel
///
/// Built from an apex and two rim points at boundary angles given in
/// multiples of pi/8. Containment is angular: a point is inside when it
/// lies on the interior side of both radius edges, regardless of distance
/// from the apex. The edge shared by two adjacent sectors belongs to
/// exactly one of them (strict inequality on one side, inclusive on the
/// other), so the eight sectors partition the disk with no gaps and no
/// double membership.
#[derive(Debug, Clone, Copy)]
pub struct Sector {
    apex: Vec2,
    b: Vec2,
    c: Vec2,
}

impl Sector {
    /// `angle_b` and `angle_c` are boundary angles in multiples of pi/8,
    /// with `angle_c` one 45-degree step counterclockwise of `angle_b`.
    pub fn new(apex: Vec2, radius: f32, angle_b: i32, angle_c: i32) -> Self {
        let rim = |step: i32| {
            let t = step as f32 * std::f32::consts::PI / 8.0;
            apex + Vec2::new(t.cos(), t.sin()) * radius
        };
        Self {
            apex,
            b: rim(angle_b),
            c: rim(angle_c),
        }
    }

    /// Angular containment via the sign of the two radius-edge cross
    /// products. The apex itself is in no sector.
    pub fn contains(&self, p: Vec2) -> bool {
        let v = p - self.apex;
        let eb = self.b - self.apex;
        let ec = self.c - self.apex;
        eb.perp_dot(v) >= 0.0 && ec.perp_dot(v) < 0.0
    }

    pub fn apex(&self) -> Vec2 {
        self.apex
    }

    /// Rim endpoints, in boundary order
    pub fn rim(&self) -> (Vec2, Vec2) {
        (self.b, self.c)
    }
}
