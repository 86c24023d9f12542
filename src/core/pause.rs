//=========================================================================
// Pause Controller
//=========================================================================
//
// Boolean gate over the scene update and draw passes.
//
// Pause sources:
//   focus loss   → always pauses; lifted on refocus only in scenes that
//                  cannot be paused by the player
//   toggle       → release of Space or gamepad Start (pausable scenes)
//   force_pause  → frame faults; only lifted by an explicit unpause
//
// `update` must run every tick, paused or not, so the toggle stays
// detectable while everything else is frozen.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::info;

//=== Internal Dependencies ===============================================

use crate::core::input::{Control, GamepadButton, InputEdgeDetector, KeyCode};

//=== Bindings ============================================================

const TOGGLE: [Control; 2] = [
    Control::Key(KeyCode::Space),
    Control::Gamepad(GamepadButton::Start),
];

//=== PauseController =====================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PauseController {
    paused: bool,
    pausable: bool,
    focus_paused: bool,
    forced: bool,
}

impl PauseController {
    pub fn new() -> Self {
        Self {
            paused: false,
            pausable: true,
            focus_paused: false,
            forced: false,
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Returns `true` if the player may toggle pause in the active scene.
    pub fn is_pausable(&self) -> bool {
        self.pausable
    }

    /// Returns `true` if the pause was forced by a fault.
    pub fn is_forced(&self) -> bool {
        self.forced
    }

    //=====================================================================
    // Commands
    //=====================================================================

    /// Sets the pause capability of the active scene.
    ///
    /// Disabling it lifts any player pause, but never a forced one.
    pub fn set_pausable(&mut self, pausable: bool) {
        self.pausable = pausable;
        if !pausable && !self.forced && self.paused {
            info!(target: "scene", "Scene is not pausable, resuming");
            self.paused = false;
        }
    }

    /// Pauses until explicitly unpaused. Used when a frame faults.
    pub fn force_pause(&mut self) {
        self.paused = true;
        self.forced = true;
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
        if !paused {
            self.forced = false;
            self.focus_paused = false;
        }
    }

    pub fn toggle(&mut self) {
        self.set_paused(!self.paused);
        info!(target: "input", "{}", if self.paused { "Paused" } else { "Resumed" });
    }

    //=====================================================================
    // Update
    //=====================================================================

    /// Applies focus state and the pause toggle for this frame.
    pub fn update(&mut self, input: &InputEdgeDetector, focused: bool) {
        if !focused {
            if !self.paused {
                info!(target: "platform", "Focus lost, pausing");
            }
            self.paused = true;
            self.focus_paused = true;
            return;
        }

        if self.focus_paused {
            self.focus_paused = false;
            if !self.pausable && !self.forced {
                self.paused = false;
            }
        }

        if self.pausable && input.is_released(&TOGGLE) {
            self.toggle();
        }
    }
}

impl Default for PauseController {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::FrameInputState;

    fn released(key: KeyCode) -> InputEdgeDetector {
        let mut down = FrameInputState::default();
        down.keyboard.keys.insert(key);

        let mut input = InputEdgeDetector::new();
        input.capture(down);
        input.capture(FrameInputState::default());
        input
    }

    #[test]
    fn space_release_toggles() {
        let mut pause = PauseController::new();
        let input = released(KeyCode::Space);

        pause.update(&input, true);
        assert!(pause.is_paused());

        pause.update(&input, true);
        assert!(!pause.is_paused());
    }

    #[test]
    fn focus_loss_forces_pause() {
        let mut pause = PauseController::new();
        pause.update(&InputEdgeDetector::new(), false);
        assert!(pause.is_paused());

        // Pausable scenes stay paused after refocus
        pause.update(&InputEdgeDetector::new(), true);
        assert!(pause.is_paused());
    }

    #[test]
    fn non_pausable_scene_ignores_toggle_and_resumes_on_focus() {
        let mut pause = PauseController::new();
        pause.set_pausable(false);

        pause.update(&released(KeyCode::Space), true);
        assert!(!pause.is_paused());

        pause.update(&InputEdgeDetector::new(), false);
        assert!(pause.is_paused());

        pause.update(&InputEdgeDetector::new(), true);
        assert!(!pause.is_paused());
    }

    #[test]
    fn forced_pause_survives_pausable_changes() {
        let mut pause = PauseController::new();
        pause.force_pause();
        pause.set_pausable(false);

        assert!(pause.is_paused());
        assert!(pause.is_forced());

        pause.set_paused(false);
        assert!(!pause.is_forced());
    }

    #[test]
    fn disabling_pausable_lifts_player_pause() {
        let mut pause = PauseController::new();
        pause.toggle();
        pause.set_pausable(false);
        assert!(!pause.is_paused());
    }
}
