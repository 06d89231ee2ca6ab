//! Platform backend trait for touch devices and gesture recognition
//!
//! The subsystem talks to the platform through this trait: it toggles the
//! native tap recognizer when the touch mode changes, and it resolves raw
//! device coordinates to a device resolution on the first sample from each
//! device.

use glam::Vec2;

/// Trait for platform touch backends (SDL, an iOS bridge, test fakes)
pub trait PlatformBackend {
    /// Enable or disable the native tap-gesture recognizer
    fn set_tap_recognition(&mut self, enabled: bool);

    /// Resolution of a touch device in device units, if known
    ///
    /// Returning `None` makes the subsystem drop samples from that device
    /// until a resolution becomes available.
    fn touch_resolution(&self, device: u64) -> Option<Vec2>;
}

/// A no-op backend for platforms without native touch support
///
/// Reports no device resolutions, so every raw sample is dropped. Useful as
/// a fallback so code can run without conditional compilation everywhere.
#[derive(Debug, Default)]
pub struct NullBackend;

impl NullBackend {
    pub fn new() -> Self {
        Self
    }
}

impl PlatformBackend for NullBackend {
    fn set_tap_recognition(&mut self, _enabled: bool) {}

    fn touch_resolution(&self, _device: u64) -> Option<Vec2> {
        None
    }
}

/// A backend with one fixed resolution for every device
///
/// Used by offline tools and tests, where samples come from a trace rather
/// than real hardware. Records the last recognizer state it was asked for.
#[derive(Debug, Clone)]
pub struct StaticBackend {
    resolution: Vec2,
    taps_enabled: bool,
}

impl StaticBackend {
    pub fn with_resolution(width: f32, height: f32) -> Self {
        Self {
            resolution: Vec2::new(width, height),
            taps_enabled: false,
        }
    }

    /// Last recognizer state requested through [`PlatformBackend`]
    pub fn taps_enabled(&self) -> bool {
        self.taps_enabled
    }
}

impl PlatformBackend for StaticBackend {
    fn set_tap_recognition(&mut self, enabled: bool) {
        self.taps_enabled = enabled;
    }

    fn touch_resolution(&self, _device: u64) -> Option<Vec2> {
        Some(self.resolution)
    }
}
