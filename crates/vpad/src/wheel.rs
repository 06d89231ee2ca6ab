//! Directional wheel and floating stick
//!
//! Two philosophies for directional touch input: an 8-sector wheel anchored
//! near the lower-right screen corner, and a free-floating stick whose
//! origin is planted wherever the finger first lands. The active philosophy
//! is chosen by the pad style setting.

use std::f32::consts::PI;

use glam::Vec2;

use crate::geometry::{Rect, ScreenSize, Sector};
use crate::input::{InputFlags, LogicalInput};
use crate::render::{self, Surface, COL_PRESSED, COL_RELEASED};

/// Wheel anchor in normalized screen space
pub const WHEEL_ANCHOR: Vec2 = Vec2::new(0.82, 0.82);
/// Wheel bounding radius
pub const WHEEL_RADIUS: f32 = 0.13;

const SECTOR_COUNT: usize = 8;

/// Boundary angle pairs in pi/8 units, one per sector, tiling the circle
/// in 45-degree steps starting from the rightward sector
const SECTOR_ANGLES: [(i32, i32); SECTOR_COUNT] = [
    (-1, 1),
    (1, 3),
    (3, 5),
    (5, 7),
    (7, -7),
    (-7, -5),
    (-5, -3),
    (-3, -1),
];

// Direction groups: each direction is the union of the three sectors
// covering its 135-degree arc, so a diagonal touch yields two directions.
const LEFT_SECTORS: [usize; 3] = [3, 4, 5];
const RIGHT_SECTORS: [usize; 3] = [7, 0, 1];
const UP_SECTORS: [usize; 3] = [5, 6, 7];
const DOWN_SECTORS: [usize; 3] = [1, 2, 3];

/// The anchored 8-sector directional wheel
#[derive(Debug)]
pub struct SectorWheel {
    anchor: Vec2,
    radius: f32,
    sectors: [Sector; SECTOR_COUNT],
    pressed: [bool; SECTOR_COUNT],
}

impl SectorWheel {
    pub fn new(anchor: Vec2, radius: f32) -> Self {
        let sectors = SECTOR_ANGLES.map(|(b, c)| Sector::new(anchor, radius, b, c));
        Self {
            anchor,
            radius,
            sectors,
            pressed: [false; SECTOR_COUNT],
        }
    }

    /// Reset the per-sector pressed markers; called once per process tick
    pub fn begin_tick(&mut self) {
        self.pressed = [false; SECTOR_COUNT];
    }

    /// Map a touch point to directional flags
    ///
    /// Points beyond the bounding radius leave the flags untouched. Inside
    /// it, sector membership is angular, so direction does not depend on
    /// how far from the anchor the finger sits.
    pub fn update(&mut self, p: Vec2, flags: &mut InputFlags) {
        let v = p - self.anchor;
        if v.length_squared() > self.radius * self.radius {
            return;
        }

        let hit: [bool; SECTOR_COUNT] = std::array::from_fn(|i| self.sectors[i].contains(p));

        if LEFT_SECTORS.iter().any(|&i| hit[i]) {
            flags.set(LogicalInput::Left);
        }
        if RIGHT_SECTORS.iter().any(|&i| hit[i]) {
            flags.set(LogicalInput::Right);
        }
        if UP_SECTORS.iter().any(|&i| hit[i]) {
            flags.set(LogicalInput::Up);
        }
        if DOWN_SECTORS.iter().any(|&i| hit[i]) {
            flags.set(LogicalInput::Down);
        }

        self.pressed = hit;
    }

    /// Draw each sector's radius edge and rim edge in its pressed color
    pub fn draw(&self, surface: &mut dyn Surface, screen: ScreenSize) {
        for (sector, pressed) in self.sectors.iter().zip(self.pressed) {
            let color = if pressed { COL_PRESSED } else { COL_RELEASED };
            let (b, c) = sector.rim();
            render::line(surface, self.anchor, b, screen, color);
            render::line(surface, b, c, screen, color);
        }
    }
}

impl Default for SectorWheel {
    fn default() -> Self {
        Self::new(WHEEL_ANCHOR, WHEEL_RADIUS)
    }
}

/// Dead-zone radius around the stick origin, squared
const STICK_DEADZONE_SQ: f32 = 0.02 * 0.02;

/// A free-floating directional stick
///
/// Binds to the first finger that lands while no stick is active and
/// follows only that finger. Direction comes from the angle of the current
/// point relative to the origin; outside the dead zone, distance is
/// deliberately unbounded.
#[derive(Debug, Default)]
pub struct FloatingStick {
    state: Option<StickState>,
}

#[derive(Debug, Clone, Copy)]
struct StickState {
    finger: u64,
    origin: Vec2,
    current: Vec2,
}

impl FloatingStick {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.state.is_some()
    }

    /// Plant the origin under `finger` if no stick is active
    pub fn begin(&mut self, finger: u64, p: Vec2) {
        if self.state.is_none() {
            self.state = Some(StickState {
                finger,
                origin: p,
                current: p,
            });
        }
    }

    /// Track movement of the bound finger; other fingers are ignored
    pub fn move_to(&mut self, finger: u64, p: Vec2) {
        if let Some(state) = &mut self.state {
            if state.finger == finger {
                state.current = p;
            }
        }
    }

    /// Release if `finger` is the bound finger
    pub fn end(&mut self, finger: u64) {
        if self.state.map_or(false, |s| s.finger == finger) {
            self.state = None;
        }
    }

    /// Release unconditionally; used on mode and screen transitions
    pub fn reset(&mut self) {
        self.state = None;
    }

    /// Derive directional flags from the stick angle
    pub fn process(&self, flags: &mut InputFlags) {
        let Some(state) = self.state else { return };

        let v = state.current - state.origin;
        if v.length_squared() < STICK_DEADZONE_SQ {
            return;
        }

        let t = v.y.atan2(v.x);
        let step = |a: i32| a as f32 * PI / 8.0;
        let range = |a: i32, b: i32| step(a) <= t && t <= step(b);

        if range(-8, -5) || range(5, 8) {
            flags.set(LogicalInput::Left);
        }
        if range(-3, 3) {
            flags.set(LogicalInput::Right);
        }
        if range(-7, -1) {
            flags.set(LogicalInput::Up);
        }
        if range(1, 7) {
            flags.set(LogicalInput::Down);
        }
    }

    /// Draw the origin outline and a filled marker at the current point
    pub fn draw(&self, surface: &mut dyn Surface, screen: ScreenSize) {
        let Some(state) = self.state else { return };

        let origin = Rect::centered(state.origin, 0.06, 0.06);
        let current = Rect::centered(state.current, 0.03, 0.03);
        render::outline_rect(surface, &origin, screen, COL_RELEASED);
        render::fill_rect(surface, &current, screen, COL_PRESSED);
    }
}
