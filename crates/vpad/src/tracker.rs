//! Finger tracking with transition suppression
//!
//! The tracker maps live finger ids to their last known normalized position
//! and keeps an ignore set for fingers that were already down when a mode
//! or screen transition happened. Such fingers stay suppressed until they
//! lift, so a thumb held through a transition cannot instantly press a
//! button in the new context.

use std::collections::{HashMap, HashSet};

use glam::Vec2;

use crate::backend::PlatformBackend;

/// Touch event phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    /// A finger touched the screen
    Started,
    /// A finger moved on the screen
    Moved,
    /// A finger was lifted from the screen
    Ended,
}

/// One raw sample from the platform touch layer, in device units
#[derive(Debug, Clone, Copy)]
pub struct RawTouchSample {
    pub finger: u64,
    pub device: u64,
    pub phase: TouchPhase,
    pub x: f32,
    pub y: f32,
}

/// Tracks live fingers by id, with an ignore set for mode transitions
#[derive(Debug, Default)]
pub struct FingerTracker {
    fingers: HashMap<u64, Vec2>,
    ignored: HashSet<u64>,
    resolutions: HashMap<u64, Vec2>,
}

impl FingerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize a device-space sample via the cached device resolution
    ///
    /// The resolution is queried from the backend on first sight of a
    /// device and cached. `None` means the sample must be dropped.
    pub fn normalize(
        &mut self,
        sample: &RawTouchSample,
        backend: &dyn PlatformBackend,
    ) -> Option<Vec2> {
        let res = match self.resolutions.get(&sample.device) {
            Some(res) => *res,
            None => {
                let res = backend.touch_resolution(sample.device)?;
                self.resolutions.insert(sample.device, res);
                res
            }
        };
        Some(Vec2::new(sample.x / res.x, sample.y / res.y))
    }

    /// Upsert a finger position, unless the finger is being suppressed
    pub fn touch_down_or_move(&mut self, finger: u64, p: Vec2) {
        if self.ignored.contains(&finger) {
            return;
        }
        self.fingers.insert(finger, p);
    }

    /// Remove a lifted finger from the registry and the ignore set
    ///
    /// The ignore entry must go too: a later touch reusing the same finger
    /// id is a new contact and must not be suppressed.
    pub fn touch_up(&mut self, finger: u64) {
        self.fingers.remove(&finger);
        self.ignored.remove(&finger);
    }

    /// Suppress every live finger until it lifts, and empty the registry
    pub fn ignore_all_current(&mut self) {
        self.ignored.extend(self.fingers.keys().copied());
        self.fingers.clear();
    }

    /// Drop all tracked fingers without suppressing them
    pub fn clear(&mut self) {
        self.fingers.clear();
    }

    pub fn contains(&self, finger: u64) -> bool {
        self.fingers.contains_key(&finger)
    }

    /// Last known positions of all tracked fingers, in no particular order
    pub fn positions(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.fingers.values().copied()
    }

    pub fn len(&self) -> usize {
        self.fingers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fingers.is_empty()
    }
}
