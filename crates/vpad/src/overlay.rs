//! Fixed on-screen button layout
//!
//! A table of hit zones, one per logical input, plus the corner wheel for
//! direction. The directional entries exist in the table but are configured
//! off: the wheel owns direction input in the default layout.

use glam::Vec2;

use crate::geometry::{Rect, ScreenSize};
use crate::input::{InputFlags, LogicalInput, INPUT_COUNT};
use crate::render::{self, Surface, COL_PRESSED, COL_RELEASED};
use crate::wheel::SectorWheel;

fn default_layout() -> [Rect; INPUT_COUNT] {
    let mut keys = [Rect::INACTIVE; INPUT_COUNT];
    keys[LogicalInput::Jump.index()] = Rect::new(0.00, 0.80, 0.14, 0.20);
    keys[LogicalInput::Fire.index()] = Rect::new(0.15, 0.80, 0.14, 0.20);
    keys[LogicalInput::PrevWeapon.index()] = Rect::new(0.00, 0.55, 0.10, 0.10);
    keys[LogicalInput::NextWeapon.index()] = Rect::new(0.15, 0.55, 0.10, 0.10);
    keys[LogicalInput::Inventory.index()] = Rect::new(0.00, 0.00, 0.10, 0.10);
    keys[LogicalInput::MapSystem.index()] = Rect::new(0.15, 0.00, 0.10, 0.10);
    keys[LogicalInput::Escape.index()] = Rect::new(0.40, 0.00, 0.10, 0.10);
    keys[LogicalInput::F1.index()] = Rect::new(0.55, 0.00, 0.10, 0.10);
    keys[LogicalInput::F2.index()] = Rect::new(0.70, 0.00, 0.10, 0.10);
    keys[LogicalInput::F3.index()] = Rect::new(0.85, 0.00, 0.10, 0.10);
    keys
}

/// The overlay button grid plus its corner wheel
#[derive(Debug)]
pub struct OverlayGrid {
    keys: [Rect; INPUT_COUNT],
    wheel: SectorWheel,
}

impl OverlayGrid {
    pub fn new() -> Self {
        Self {
            keys: default_layout(),
            wheel: SectorWheel::default(),
        }
    }

    /// Replace the zone for one logical input
    ///
    /// Passing [`Rect::INACTIVE`] turns the zone off.
    pub fn set_key_zone(&mut self, input: LogicalInput, rect: Rect) {
        self.keys[input.index()] = rect;
    }

    pub fn key_zone(&self, input: LogicalInput) -> Rect {
        self.keys[input.index()]
    }

    /// Reset per-tick wheel state; called once per process tick
    pub fn begin_tick(&mut self) {
        self.wheel.begin_tick();
    }

    /// Set the flag of every active zone containing `p`, then run the wheel
    pub fn update(&mut self, p: Vec2, flags: &mut InputFlags) {
        for input in LogicalInput::ALL {
            let key = &self.keys[input.index()];
            if key.is_active() && key.contains(p) {
                flags.set(input);
            }
        }

        self.wheel.update(p, flags);
    }

    /// Outline every active zone in its pressed/released color, then the wheel
    pub fn draw(&self, surface: &mut dyn Surface, screen: ScreenSize, flags: &InputFlags) {
        for input in LogicalInput::ALL {
            let key = &self.keys[input.index()];
            if !key.is_active() {
                continue;
            }

            let color = if flags.is_set(input) {
                COL_PRESSED
            } else {
                COL_RELEASED
            };
            render::outline_rect(surface, key, screen, color);
        }

        self.wheel.draw(surface, screen);
    }
}

impl Default for OverlayGrid {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jump_zone_hit_and_miss() {
        let mut grid = OverlayGrid::new();

        let mut flags = InputFlags::new();
        grid.update(Vec2::new(0.05, 0.85), &mut flags);
        assert!(flags.is_set(LogicalInput::Jump));

        let mut flags = InputFlags::new();
        grid.update(Vec2::new(0.20, 0.85), &mut flags);
        assert!(!flags.is_set(LogicalInput::Jump));
        // That point sits in the neighboring fire zone instead.
        assert!(flags.is_set(LogicalInput::Fire));
    }

    #[test]
    fn test_inactive_zones_never_match() {
        let mut grid = OverlayGrid::new();
        assert!(!grid.key_zone(LogicalInput::Left).is_active());

        // A point anywhere on screen cannot set a directional flag through
        // the key table; only the wheel can.
        let mut flags = InputFlags::new();
        grid.update(Vec2::new(0.5, 0.5), &mut flags);
        assert!(!flags.any());
    }

    #[test]
    fn test_zone_reconfiguration() {
        let mut grid = OverlayGrid::new();
        grid.set_key_zone(LogicalInput::F4, Rect::new(0.45, 0.45, 0.10, 0.10));

        let mut flags = InputFlags::new();
        grid.update(Vec2::new(0.5, 0.5), &mut flags);
        assert!(flags.is_set(LogicalInput::F4));

        grid.set_key_zone(LogicalInput::F4, Rect::INACTIVE);
        let mut flags = InputFlags::new();
        grid.update(Vec2::new(0.5, 0.5), &mut flags);
        assert!(!flags.is_set(LogicalInput::F4));
    }

    #[test]
    fn test_update_reaches_the_wheel() {
        let mut grid = OverlayGrid::new();
        let mut flags = InputFlags::new();
        grid.update(Vec2::new(0.82, 0.92), &mut flags);
        assert!(flags.is_set(LogicalInput::Down));
    }
}
