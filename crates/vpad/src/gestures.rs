//! Discrete tap buffering
//!
//! Taps arrive from the platform recognizer during event pumping and stay
//! visible for exactly one frame: the buffer is flushed at the start of the
//! next frame's pre-process step.

use glam::Vec2;

use crate::geometry::Rect;

/// One frame's worth of tap locations, in normalized space
#[derive(Debug, Default)]
pub struct TapObserver {
    taps: Vec<Vec2>,
}

impl TapObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a tap location
    pub fn record(&mut self, p: Vec2) {
        self.taps.push(p);
    }

    /// Whether any buffered tap landed inside `rect`
    pub fn was_tap_in(&self, rect: &Rect) -> bool {
        self.taps.iter().any(|p| rect.contains(*p))
    }

    /// Whether any tap was buffered this frame
    pub fn any_tap(&self) -> bool {
        !self.taps.is_empty()
    }

    /// Drop the previous frame's taps
    pub fn flush(&mut self) {
        self.taps.clear();
    }
}
