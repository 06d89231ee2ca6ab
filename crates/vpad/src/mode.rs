//! Tri-state touch-mode control
//!
//! The touch mode decides which of the two touch-event sources are live:
//! continuous finger tracking, discrete tap gestures, or both. Switching
//! modes toggles the platform's native recognizer as a side effect.

use serde::{Deserialize, Serialize};

use crate::backend::PlatformBackend;
use crate::tracker::FingerTracker;

/// Which touch-event sources are live for the current context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TouchMode {
    /// Continuous finger tracking only
    #[default]
    TouchOnly,
    /// Native tap gestures only
    GestureOnly,
    /// Both sources live
    Both,
}

/// UI contexts with a configurable tap preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TapContext {
    Title,
    Movies,
    Inventory,
    MapSystem,
    Pause,
    Options,
    SaveLoad,
    IngameDialog,
}

impl TapContext {
    pub const ALL: [TapContext; 8] = [
        TapContext::Title,
        TapContext::Movies,
        TapContext::Inventory,
        TapContext::MapSystem,
        TapContext::Pause,
        TapContext::Options,
        TapContext::SaveLoad,
        TapContext::IngameDialog,
    ];
}

/// Owns the current touch mode and the recognizer-toggle side effect
#[derive(Debug, Default)]
pub struct TouchModeController {
    mode: TouchMode,
}

impl TouchModeController {
    /// Starts in touch-only, matching a recognizer that starts disabled
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> TouchMode {
        self.mode
    }

    /// Switch modes
    ///
    /// No-op when unchanged. The native recognizer is enabled for every
    /// mode except touch-only. Entering gesture-only drops all tracked
    /// fingers: continuous tracking is meaningless there.
    pub fn set_mode(
        &mut self,
        new_mode: TouchMode,
        backend: &mut dyn PlatformBackend,
        fingers: &mut FingerTracker,
    ) {
        if new_mode == self.mode {
            return;
        }

        self.mode = new_mode;
        tracing::debug!("touch mode -> {:?}", new_mode);

        backend.set_tap_recognition(new_mode != TouchMode::TouchOnly);
        if new_mode == TouchMode::GestureOnly {
            fingers.clear();
        }
    }
}
