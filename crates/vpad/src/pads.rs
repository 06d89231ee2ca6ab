//! Per-game-mode touch mapping and the modal context stack
//!
//! Exactly one mode pad is active at a time, selected by the current game
//! mode. Behavior is an enum-indexed table rather than a trait-object
//! hierarchy: the set of variants is closed, and two of them (paused and
//! options) are transparent proxies onto the normal-gameplay pad so the
//! same layout stays visible and usable under those overlays.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::backend::PlatformBackend;
use crate::geometry::ScreenSize;
use crate::input::{InputFlags, LogicalInput};
use crate::mode::{TapContext, TouchMode, TouchModeController};
use crate::overlay::OverlayGrid;
use crate::render::Surface;
use crate::settings::TouchSettings;
use crate::tracker::FingerTracker;

/// Game-mode contexts the dispatcher selects between
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(usize)]
pub enum GameMode {
    None = 0,
    Normal,
    Inventory,
    MapSystem,
    Island,
    Credits,
    Intro,
    Title,
    Paused,
    Options,
}

impl GameMode {
    pub const COUNT: usize = 10;

    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Modal overlay screens that push and pop input context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayScreen {
    TextBox,
    SaveLoad,
    YesNo,
    StageSelect1,
    StageSelect2,
}

/// Saved input context for one nested modal overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ContextFrame {
    touch_mode: TouchMode,
    game_mode: GameMode,
    draw_suppressed: bool,
    textbox_mode: bool,
}

/// The full set of mode pads
///
/// Shared layout state (the overlay grid) plus the per-pad flags that
/// survive across mode switches: draw suppression per mode and the
/// normal pad's text-box sub-mode.
#[derive(Debug)]
pub struct PadSet {
    grid: OverlayGrid,
    draw_suppressed: [bool; GameMode::COUNT],
    textbox_mode: bool,
}

impl PadSet {
    pub fn new() -> Self {
        Self {
            grid: OverlayGrid::new(),
            draw_suppressed: [false; GameMode::COUNT],
            textbox_mode: false,
        }
    }

    /// Behavior owner for a mode: paused and options proxy onto normal
    fn effective(mode: GameMode) -> GameMode {
        match mode {
            GameMode::Paused | GameMode::Options => GameMode::Normal,
            other => other,
        }
    }

    pub fn grid(&self) -> &OverlayGrid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut OverlayGrid {
        &mut self.grid
    }

    /// Whether the normal pad is in text-box sub-mode
    pub fn textbox_mode(&self) -> bool {
        self.textbox_mode
    }

    pub fn set_textbox_mode(&mut self, on: bool) {
        self.textbox_mode = on;
    }

    pub fn is_draw_suppressed(&self, mode: GameMode) -> bool {
        self.draw_suppressed[mode.index()]
    }

    pub fn set_draw_suppressed(&mut self, mode: GameMode, on: bool) {
        self.draw_suppressed[mode.index()] = on;
    }

    /// Reset per-tick layout state before dispatching fingers
    pub fn begin_tick(&mut self) {
        self.grid.begin_tick();
    }

    /// Entering `mode`: select the touch mode its context calls for
    ///
    /// None and normal gameplay force touch-only; island and credits have
    /// no configured context and default to both sources.
    pub fn on_enter(
        &mut self,
        mode: GameMode,
        controller: &mut TouchModeController,
        settings: &TouchSettings,
        backend: &mut dyn PlatformBackend,
        fingers: &mut FingerTracker,
    ) {
        let target = match mode {
            GameMode::None | GameMode::Normal => TouchMode::TouchOnly,
            GameMode::Inventory => settings.mode_for(TapContext::Inventory),
            GameMode::MapSystem => settings.mode_for(TapContext::MapSystem),
            GameMode::Island | GameMode::Credits => TouchMode::Both,
            GameMode::Intro => settings.mode_for(TapContext::Movies),
            GameMode::Title => settings.mode_for(TapContext::Title),
            GameMode::Paused => settings.mode_for(TapContext::Pause),
            GameMode::Options => settings.mode_for(TapContext::Options),
        };
        controller.set_mode(target, backend, fingers);
    }

    /// Route one touch point through the pad active for `mode`
    pub fn update_buttons(&mut self, mode: GameMode, p: Vec2, flags: &mut InputFlags) {
        match Self::effective(mode) {
            // Held fire fast-forwards dialog text; hit-testing is bypassed
            // entirely while a text box is up.
            GameMode::Normal if self.textbox_mode => flags.set(LogicalInput::Fire),
            _ => self.grid.update(p, flags),
        }
    }

    /// Draw the pad active for `mode`; gesture-only contexts draw nothing
    ///
    /// Every variant shares the grid layout, so the paused/options proxying
    /// matters only for dispatch, not for drawing.
    pub fn draw(
        &self,
        _mode: GameMode,
        touch_mode: TouchMode,
        surface: &mut dyn Surface,
        screen: ScreenSize,
        flags: &InputFlags,
    ) {
        if touch_mode == TouchMode::GestureOnly {
            return;
        }
        self.grid.draw(surface, screen, flags);
    }
}

impl Default for PadSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Selects the active mode pad and keeps the modal context stack
#[derive(Debug, Default)]
pub struct Dispatcher {
    pads: PadSet,
    game_mode: Option<GameMode>,
    stack: Vec<ContextFrame>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current game mode; [`GameMode::None`] before the first notification
    pub fn game_mode(&self) -> GameMode {
        self.game_mode.unwrap_or(GameMode::None)
    }

    pub fn pads(&self) -> &PadSet {
        &self.pads
    }

    pub fn pads_mut(&mut self) -> &mut PadSet {
        &mut self.pads
    }

    /// Modal nesting depth
    pub fn context_depth(&self) -> usize {
        self.stack.len()
    }

    /// Route one touch point through the active pad
    pub fn dispatch(&mut self, p: Vec2, flags: &mut InputFlags) {
        self.pads.update_buttons(self.game_mode(), p, flags);
    }

    /// Draw the active pad unless its drawing is suppressed
    pub fn draw(
        &self,
        touch_mode: TouchMode,
        surface: &mut dyn Surface,
        screen: ScreenSize,
        flags: &InputFlags,
    ) {
        let mode = self.game_mode();
        if self.pads.is_draw_suppressed(mode) {
            return;
        }
        self.pads.draw(mode, touch_mode, surface, screen, flags);
    }

    /// The game switched modes: reconfigure and absorb held fingers
    pub fn game_mode_changed(
        &mut self,
        new_mode: GameMode,
        controller: &mut TouchModeController,
        settings: &TouchSettings,
        backend: &mut dyn PlatformBackend,
        fingers: &mut FingerTracker,
    ) {
        tracing::debug!("game mode -> {:?}", new_mode);
        self.game_mode = Some(new_mode);
        self.pads
            .on_enter(new_mode, controller, settings, backend, fingers);
        fingers.ignore_all_current();
    }

    /// A modal overlay opened or closed
    ///
    /// Entering pushes the current context and applies the per-screen
    /// configuration; leaving pops and restores it verbatim. An unmatched
    /// leave is ignored. Held fingers are absorbed in both directions.
    pub fn screen_changed(
        &mut self,
        screen: OverlayScreen,
        entering: bool,
        controller: &mut TouchModeController,
        settings: &TouchSettings,
        backend: &mut dyn PlatformBackend,
        fingers: &mut FingerTracker,
    ) {
        fingers.ignore_all_current();

        if !entering {
            let Some(frame) = self.stack.pop() else {
                return;
            };
            tracing::debug!("overlay screen {:?} left", screen);
            controller.set_mode(frame.touch_mode, backend, fingers);
            self.pads
                .set_draw_suppressed(frame.game_mode, frame.draw_suppressed);
            self.pads.set_textbox_mode(frame.textbox_mode);
            return;
        }

        tracing::debug!("overlay screen {:?} entered", screen);
        let mode = self.game_mode();
        self.stack.push(ContextFrame {
            touch_mode: controller.mode(),
            game_mode: mode,
            draw_suppressed: self.pads.is_draw_suppressed(mode),
            textbox_mode: self.pads.textbox_mode(),
        });

        let context = match screen {
            OverlayScreen::SaveLoad => TapContext::SaveLoad,
            _ => TapContext::IngameDialog,
        };
        controller.set_mode(settings.mode_for(context), backend, fingers);

        // Text boxes and the second stage-select screen keep tap-to-advance
        // available whenever taps are live; the other overlays force the
        // text-box sub-mode off.
        let textbox = match screen {
            OverlayScreen::TextBox | OverlayScreen::StageSelect2 => {
                controller.mode() != TouchMode::TouchOnly
            }
            OverlayScreen::SaveLoad | OverlayScreen::YesNo | OverlayScreen::StageSelect1 => false,
        };
        self.pads.set_textbox_mode(textbox);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::StaticBackend;
    use crate::settings::TapPreference;

    struct Fixture {
        dispatcher: Dispatcher,
        controller: TouchModeController,
        settings: TouchSettings,
        backend: StaticBackend,
        fingers: FingerTracker,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                dispatcher: Dispatcher::new(),
                controller: TouchModeController::new(),
                settings: TouchSettings::default(),
                backend: StaticBackend::with_resolution(1.0, 1.0),
                fingers: FingerTracker::new(),
            }
        }

        fn enter_mode(&mut self, mode: GameMode) {
            self.dispatcher.game_mode_changed(
                mode,
                &mut self.controller,
                &self.settings,
                &mut self.backend,
                &mut self.fingers,
            );
        }

        fn screen(&mut self, screen: OverlayScreen, entering: bool) {
            self.dispatcher.screen_changed(
                screen,
                entering,
                &mut self.controller,
                &self.settings,
                &mut self.backend,
                &mut self.fingers,
            );
        }
    }

    #[test]
    fn test_normal_mode_forces_touch_only() {
        let mut fx = Fixture::new();
        fx.enter_mode(GameMode::Title);
        assert_eq!(fx.controller.mode(), TouchMode::Both);

        fx.enter_mode(GameMode::Normal);
        assert_eq!(fx.controller.mode(), TouchMode::TouchOnly);
    }

    #[test]
    fn test_mode_change_absorbs_held_fingers() {
        let mut fx = Fixture::new();
        fx.fingers.touch_down_or_move(1, Vec2::new(0.05, 0.85));

        fx.enter_mode(GameMode::Normal);
        assert!(fx.fingers.is_empty());

        // The held finger stays suppressed until it lifts.
        fx.fingers.touch_down_or_move(1, Vec2::new(0.05, 0.85));
        assert!(fx.fingers.is_empty());
    }

    #[test]
    fn test_paused_proxies_normal_textbox_behavior() {
        let mut fx = Fixture::new();
        fx.enter_mode(GameMode::Normal);
        fx.dispatcher.pads_mut().set_textbox_mode(true);
        fx.enter_mode(GameMode::Paused);

        let mut flags = InputFlags::new();
        fx.dispatcher.dispatch(Vec2::new(0.5, 0.5), &mut flags);
        assert!(flags.is_set(LogicalInput::Fire));
    }

    #[test]
    fn test_textbox_mode_bypasses_hit_testing() {
        let mut fx = Fixture::new();
        fx.enter_mode(GameMode::Normal);
        fx.dispatcher.pads_mut().set_textbox_mode(true);

        // A point over the jump zone produces fire, not jump.
        let mut flags = InputFlags::new();
        fx.dispatcher.dispatch(Vec2::new(0.05, 0.85), &mut flags);
        assert!(flags.is_set(LogicalInput::Fire));
        assert!(!flags.is_set(LogicalInput::Jump));
    }

    #[test]
    fn test_screen_push_pop_round_trip() {
        let mut fx = Fixture::new();
        fx.settings
            .contexts
            .insert(TapContext::IngameDialog, TapPreference::Tap);

        fx.enter_mode(GameMode::Normal);
        fx.dispatcher
            .pads_mut()
            .set_draw_suppressed(GameMode::Normal, true);
        assert_eq!(fx.controller.mode(), TouchMode::TouchOnly);

        fx.screen(OverlayScreen::YesNo, true);
        assert_eq!(fx.dispatcher.context_depth(), 1);
        assert_eq!(fx.controller.mode(), TouchMode::GestureOnly);
        assert!(!fx.dispatcher.pads().textbox_mode());

        fx.screen(OverlayScreen::YesNo, false);
        assert_eq!(fx.dispatcher.context_depth(), 0);
        assert_eq!(fx.controller.mode(), TouchMode::TouchOnly);
        assert!(fx.dispatcher.pads().is_draw_suppressed(GameMode::Normal));
        assert!(!fx.dispatcher.pads().textbox_mode());
    }

    #[test]
    fn test_textbox_screen_derives_sub_mode_from_touch_mode() {
        let mut fx = Fixture::new();
        fx.enter_mode(GameMode::Normal);

        // Dialog context defaults to both: taps are live, so the text box
        // keeps tap-to-advance on.
        fx.screen(OverlayScreen::TextBox, true);
        assert!(fx.dispatcher.pads().textbox_mode());
        fx.screen(OverlayScreen::TextBox, false);
        assert!(!fx.dispatcher.pads().textbox_mode());

        // With the dialog context forced to the pad, the sub-mode stays off.
        fx.settings
            .contexts
            .insert(TapContext::IngameDialog, TapPreference::Pad);
        fx.screen(OverlayScreen::TextBox, true);
        assert!(!fx.dispatcher.pads().textbox_mode());
        fx.screen(OverlayScreen::TextBox, false);

        // Stage select 2 derives the same way; stage select 1 forces off.
        fx.settings
            .contexts
            .insert(TapContext::IngameDialog, TapPreference::Both);
        fx.screen(OverlayScreen::StageSelect2, true);
        assert!(fx.dispatcher.pads().textbox_mode());
        fx.screen(OverlayScreen::StageSelect2, false);

        fx.screen(OverlayScreen::StageSelect1, true);
        assert!(!fx.dispatcher.pads().textbox_mode());
    }

    #[test]
    fn test_nested_screens_restore_in_order() {
        let mut fx = Fixture::new();
        fx.settings
            .contexts
            .insert(TapContext::SaveLoad, TapPreference::Tap);

        fx.enter_mode(GameMode::Normal);
        fx.screen(OverlayScreen::TextBox, true);
        let after_textbox = fx.controller.mode();
        assert!(fx.dispatcher.pads().textbox_mode());

        fx.screen(OverlayScreen::SaveLoad, true);
        assert_eq!(fx.dispatcher.context_depth(), 2);
        assert_eq!(fx.controller.mode(), TouchMode::GestureOnly);
        assert!(!fx.dispatcher.pads().textbox_mode());

        fx.screen(OverlayScreen::SaveLoad, false);
        assert_eq!(fx.controller.mode(), after_textbox);
        assert!(fx.dispatcher.pads().textbox_mode());

        fx.screen(OverlayScreen::TextBox, false);
        assert_eq!(fx.controller.mode(), TouchMode::TouchOnly);
        assert!(!fx.dispatcher.pads().textbox_mode());
    }

    #[test]
    fn test_unmatched_leave_is_a_noop() {
        let mut fx = Fixture::new();
        fx.enter_mode(GameMode::Normal);
        fx.screen(OverlayScreen::YesNo, false);
        assert_eq!(fx.dispatcher.context_depth(), 0);
        assert_eq!(fx.controller.mode(), TouchMode::TouchOnly);
    }
}
