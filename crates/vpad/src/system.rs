//! The input subsystem facade and per-frame pipeline
//!
//! One [`TouchInput`] instance owns all shared input state and is driven by
//! the host loop in a strict order each frame: [`TouchInput::pre_process`],
//! event injection, [`TouchInput::process`], [`TouchInput::draw`]. Mode and
//! screen notifications may arrive at any point between process steps and
//! take effect immediately.

use glam::Vec2;

use crate::backend::PlatformBackend;
use crate::geometry::{PixelRect, Rect, ScreenSize};
use crate::gestures::TapObserver;
use crate::input::{InputFlags, LogicalInput};
use crate::mode::{TouchMode, TouchModeController};
use crate::overlay::OverlayGrid;
use crate::pads::{Dispatcher, GameMode, OverlayScreen};
use crate::render::{self, Surface, COL_RELEASED};
use crate::settings::{PadStyle, TouchSettings};
use crate::tracker::{FingerTracker, RawTouchSample, TouchPhase};
use crate::wheel::FloatingStick;

/// Side length of the marker drawn at each tracked finger
const FINGER_MARKER_SIZE: f32 = 0.04;

/// The virtual touch pad subsystem
pub struct TouchInput {
    enabled: bool,
    visible: bool,
    screen: ScreenSize,
    settings: TouchSettings,
    backend: Box<dyn PlatformBackend>,
    fingers: FingerTracker,
    taps: TapObserver,
    controller: TouchModeController,
    dispatcher: Dispatcher,
    stick: FloatingStick,
    flags: InputFlags,
}

impl TouchInput {
    /// Create a disabled subsystem; call [`TouchInput::init`] before
    /// injecting events
    pub fn new(
        settings: TouchSettings,
        backend: Box<dyn PlatformBackend>,
        screen: ScreenSize,
    ) -> Self {
        Self {
            enabled: false,
            visible: true,
            screen,
            settings,
            backend,
            fingers: FingerTracker::new(),
            taps: TapObserver::new(),
            controller: TouchModeController::new(),
            dispatcher: Dispatcher::new(),
            stick: FloatingStick::new(),
            flags: InputFlags::new(),
        }
    }

    /// Start accepting events
    pub fn init(&mut self) {
        self.enabled = true;
    }

    /// Stop accepting events
    pub fn shutdown(&mut self) {
        self.enabled = false;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Show or hide the overlay; affects drawing only
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_screen_size(&mut self, screen: ScreenSize) {
        self.screen = screen;
    }

    pub fn settings(&self) -> &TouchSettings {
        &self.settings
    }

    /// Swap in a new settings table; takes effect on the next context change
    pub fn set_settings(&mut self, settings: TouchSettings) {
        self.settings = settings;
    }

    pub fn touch_mode(&self) -> TouchMode {
        self.controller.mode()
    }

    pub fn game_mode(&self) -> GameMode {
        self.dispatcher.game_mode()
    }

    /// Modal nesting depth of the context stack
    pub fn context_depth(&self) -> usize {
        self.dispatcher.context_depth()
    }

    /// The overlay layout, for host-side zone reconfiguration
    pub fn overlay_mut(&mut self) -> &mut OverlayGrid {
        self.dispatcher.pads_mut().grid_mut()
    }

    /// The logical input flags computed by the last [`TouchInput::process`]
    pub fn flags(&self) -> &InputFlags {
        &self.flags
    }

    pub fn is_pressed(&self, input: LogicalInput) -> bool {
        self.flags.is_set(input)
    }

    /// Flush the previous frame's taps
    pub fn pre_process(&mut self) {
        if !self.enabled {
            return;
        }
        self.taps.flush();
    }

    /// Inject one raw touch sample from the platform
    ///
    /// Lifts always go through so suppressed fingers can un-suppress;
    /// everything else is dropped in gesture-only mode or when the device
    /// resolution is unknown.
    pub fn inject(&mut self, sample: RawTouchSample) {
        if !self.enabled {
            return;
        }

        if sample.phase == TouchPhase::Ended {
            self.fingers.touch_up(sample.finger);
            self.stick.end(sample.finger);
            return;
        }

        if self.controller.mode() == TouchMode::GestureOnly {
            return;
        }

        let Some(p) = self.fingers.normalize(&sample, self.backend.as_ref()) else {
            tracing::warn!(
                "dropping touch sample: unknown resolution for device {}",
                sample.device
            );
            return;
        };

        self.fingers.touch_down_or_move(sample.finger, p);

        // Suppressed fingers (not re-admitted above) must not steer the
        // stick either.
        if self.settings.pad_style == PadStyle::Floating && self.fingers.contains(sample.finger) {
            match sample.phase {
                TouchPhase::Started => self.stick.begin(sample.finger, p),
                TouchPhase::Moved => self.stick.move_to(sample.finger, p),
                TouchPhase::Ended => {}
            }
        }
    }

    /// Record a tap from the native recognizer, in normalized coordinates
    pub fn inject_tap(&mut self, x: f32, y: f32) {
        if !self.enabled {
            return;
        }
        self.taps.record(Vec2::new(x, y));
    }

    /// Recompute all logical flags from the tracked fingers
    pub fn process(&mut self) {
        if !self.enabled {
            return;
        }

        self.flags.clear();
        self.dispatcher.pads_mut().begin_tick();

        // Each finger ORs into the shared array, so iteration order cannot
        // affect the result.
        for p in self.fingers.positions() {
            self.dispatcher.dispatch(p, &mut self.flags);
        }

        if self.settings.pad_style == PadStyle::Floating {
            self.stick.process(&mut self.flags);
        }
    }

    /// Draw the active pad, the stick, and finger markers
    ///
    /// No-op while disabled or hidden.
    pub fn draw(&self, surface: &mut dyn Surface) {
        if !(self.enabled && self.visible) {
            return;
        }

        self.dispatcher
            .draw(self.controller.mode(), surface, self.screen, &self.flags);

        if self.settings.pad_style == PadStyle::Floating {
            self.stick.draw(surface, self.screen);
        }

        for p in self.fingers.positions() {
            let marker = Rect::centered(p, FINGER_MARKER_SIZE, FINGER_MARKER_SIZE);
            render::fill_rect(surface, &marker, self.screen, COL_RELEASED);
        }
    }

    /// True when a tap landed anywhere this frame; never in touch-only mode
    pub fn was_tap(&self) -> bool {
        if self.controller.mode() == TouchMode::TouchOnly {
            return false;
        }
        self.taps.any_tap()
    }

    /// True when a tap landed inside `rect` this frame; never in touch-only
    /// mode
    pub fn was_tap_in(&self, rect: PixelRect) -> bool {
        if self.controller.mode() == TouchMode::TouchOnly {
            return false;
        }
        self.taps.was_tap_in(&Rect::from_pixels(rect, self.screen))
    }

    /// The game switched modes; reconfigure and absorb held fingers
    pub fn game_mode_changed(&mut self, new_mode: GameMode) {
        self.stick.reset();
        self.dispatcher.game_mode_changed(
            new_mode,
            &mut self.controller,
            &self.settings,
            self.backend.as_mut(),
            &mut self.fingers,
        );
    }

    /// A modal overlay opened or closed
    pub fn screen_changed(&mut self, screen: OverlayScreen, entering: bool) {
        self.stick.reset();
        self.dispatcher.screen_changed(
            screen,
            entering,
            &mut self.controller,
            &self.settings,
            self.backend.as_mut(),
            &mut self.fingers,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::StaticBackend;
    use crate::mode::TapContext;
    use crate::settings::TapPreference;

    fn settings_with(context: TapContext, pref: TapPreference) -> TouchSettings {
        let mut settings = TouchSettings::default();
        settings.contexts.insert(context, pref);
        settings
    }

    fn system() -> TouchInput {
        let mut input = TouchInput::new(
            TouchSettings::default(),
            Box::new(StaticBackend::with_resolution(320.0, 240.0)),
            ScreenSize::new(320, 240),
        );
        input.init();
        input.game_mode_changed(GameMode::Normal);
        input
    }

    fn touch(input: &mut TouchInput, finger: u64, phase: TouchPhase, x: f32, y: f32) {
        input.inject(RawTouchSample {
            finger,
            device: 0,
            phase,
            x,
            y,
        });
    }

    #[test]
    fn test_flags_are_union_over_fingers() {
        let mut input = system();
        input.pre_process();
        // One finger on jump, one far from any zone.
        touch(&mut input, 1, TouchPhase::Started, 16.0, 204.0); // (0.05, 0.85)
        touch(&mut input, 2, TouchPhase::Started, 160.0, 120.0); // (0.5, 0.5)
        input.process();

        assert!(input.is_pressed(LogicalInput::Jump));
        // The miss of finger 2 cannot clear finger 1's hit.
        assert_eq!(input.flags().pressed().count(), 1);
    }

    #[test]
    fn test_flags_cleared_each_tick() {
        let mut input = system();
        touch(&mut input, 1, TouchPhase::Started, 16.0, 204.0);
        input.process();
        assert!(input.is_pressed(LogicalInput::Jump));

        touch(&mut input, 1, TouchPhase::Ended, 16.0, 204.0);
        input.process();
        assert!(!input.flags().any());
    }

    #[test]
    fn test_disabled_system_ignores_events() {
        let mut input = system();
        input.shutdown();
        touch(&mut input, 1, TouchPhase::Started, 16.0, 204.0);
        input.process();
        assert!(!input.flags().any());
    }

    #[test]
    fn test_gesture_only_drops_tracking() {
        let mut input = system();
        touch(&mut input, 1, TouchPhase::Started, 16.0, 204.0);
        touch(&mut input, 2, TouchPhase::Started, 100.0, 100.0);

        // Title with taps forced on: entering clears the registry.
        input.set_settings(settings_with(TapContext::Title, TapPreference::Tap));
        input.game_mode_changed(GameMode::Title);
        assert_eq!(input.touch_mode(), TouchMode::GestureOnly);

        input.process();
        assert!(!input.flags().any());

        // And new samples are rejected outright.
        touch(&mut input, 3, TouchPhase::Started, 16.0, 204.0);
        input.process();
        assert!(!input.flags().any());
    }

    #[test]
    fn test_tap_queries_gated_by_touch_only() {
        let mut input = system();
        input.pre_process();
        input.inject_tap(0.5, 0.5);

        // Normal mode is touch-only: taps are invisible.
        assert!(!input.was_tap());
        assert!(!input.was_tap_in(PixelRect::new(0, 0, 320, 240)));

        input.game_mode_changed(GameMode::Title);
        assert_eq!(input.touch_mode(), TouchMode::Both);
        assert!(input.was_tap());
        assert!(input.was_tap_in(PixelRect::new(144, 96, 32, 32)));
        assert!(!input.was_tap_in(PixelRect::new(0, 0, 32, 32)));

        // Pre-process flushes the buffer.
        input.pre_process();
        assert!(!input.was_tap());
    }

    #[test]
    fn test_floating_stick_drives_direction() {
        let mut input = system();
        let mut settings = TouchSettings::default();
        settings.pad_style = PadStyle::Floating;
        input.set_settings(settings);

        input.pre_process();
        touch(&mut input, 1, TouchPhase::Started, 160.0, 120.0);
        touch(&mut input, 1, TouchPhase::Moved, 250.0, 120.0);
        input.process();

        assert!(input.is_pressed(LogicalInput::Right));
        assert!(!input.is_pressed(LogicalInput::Left));
    }

    #[test]
    fn test_stick_released_on_mode_change() {
        let mut input = system();
        let mut settings = TouchSettings::default();
        settings.pad_style = PadStyle::Floating;
        input.set_settings(settings);

        touch(&mut input, 1, TouchPhase::Started, 160.0, 120.0);
        touch(&mut input, 1, TouchPhase::Moved, 250.0, 120.0);
        input.game_mode_changed(GameMode::Inventory);
        input.process();

        assert!(!input.flags().any());
    }
}
