//=========================================================================
// State Tracker
//=========================================================================
//
// Live device state accumulated from platform input events.
//
// Architecture:
//   InputEvent → process_events() → persistent device state → snapshot()
//
// Frame lifecycle: clear() → process_events() → snapshot()
//
// Controls that go down during a frame are latched until the next
// clear(), so a press and release delivered in the same batch still
// appears as "down" in that frame's snapshot and "up" in the next one.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

use glam::Vec2;

//=== Internal Dependencies ===============================================

use super::event::{GamepadButton, InputEvent, KeyCode, MouseButton, TouchPhase};
use super::frame_state::{
    FrameInputState, GamepadState, InputSource, KeyboardState, MouseState, TouchPoint,
};

//=== StateTracker ========================================================

/// Folds input events into persistent device state and produces
/// [`FrameInputState`] snapshots.
pub struct StateTracker {
    //--- Persistent State (survives frame boundary) ----------------------
    keys_down: HashSet<KeyCode>,
    mouse_buttons_down: HashSet<MouseButton>,
    gamepad_buttons_down: HashSet<GamepadButton>,
    gamepad_connected: bool,
    mouse_position: Vec2,
    scroll_wheel: i32,
    touches: Vec<TouchPoint>,

    //--- Frame Latches (reset each frame via clear()) --------------------
    keys_pressed_this_frame: HashSet<KeyCode>,
    mouse_buttons_pressed_this_frame: HashSet<MouseButton>,
    gamepad_buttons_pressed_this_frame: HashSet<GamepadButton>,
}

impl StateTracker {
    /// Creates a new state tracker with every device idle.
    pub fn new() -> Self {
        Self {
            keys_down: HashSet::new(),
            mouse_buttons_down: HashSet::new(),
            gamepad_buttons_down: HashSet::new(),
            gamepad_connected: false,
            mouse_position: Vec2::ZERO,
            scroll_wheel: 0,
            touches: Vec::new(),
            keys_pressed_this_frame: HashSet::new(),
            mouse_buttons_pressed_this_frame: HashSet::new(),
            gamepad_buttons_pressed_this_frame: HashSet::new(),
        }
    }

    //--- Frame Processing -------------------------------------------------

    /// Drops frame latches and retires finished touch points.
    pub(crate) fn clear(&mut self) {
        self.keys_pressed_this_frame.clear();
        self.mouse_buttons_pressed_this_frame.clear();
        self.gamepad_buttons_pressed_this_frame.clear();
        self.touches
            .retain(|touch| matches!(touch.phase, TouchPhase::Started | TouchPhase::Moved));
    }

    /// Processes input events, updating internal state.
    pub(crate) fn process_events(&mut self, events: &[InputEvent]) {
        for event in events {
            self.process_event(event);
        }
    }

    /// Forgets every held control (window focus lost).
    ///
    /// Key-up events are not delivered to an unfocused window, so held
    /// state would otherwise stay stuck. Frame latches are dropped too.
    pub(crate) fn release_all(&mut self) {
        self.keys_down.clear();
        self.mouse_buttons_down.clear();
        self.gamepad_buttons_down.clear();
        self.touches.clear();
        self.keys_pressed_this_frame.clear();
        self.mouse_buttons_pressed_this_frame.clear();
        self.gamepad_buttons_pressed_this_frame.clear();
    }

    //--- Internal Helpers -------------------------------------------------
    fn process_event(&mut self, event: &InputEvent) {
        match event {
            InputEvent::KeyDown(key) => {
                // Only latch if it wasn't already down
                if self.keys_down.insert(*key) {
                    self.keys_pressed_this_frame.insert(*key);
                }
            }

            InputEvent::KeyUp(key) => {
                self.keys_down.remove(key);
            }

            InputEvent::MouseButtonDown(button) => {
                if self.mouse_buttons_down.insert(*button) {
                    self.mouse_buttons_pressed_this_frame.insert(*button);
                }
            }

            InputEvent::MouseButtonUp(button) => {
                self.mouse_buttons_down.remove(button);
            }

            InputEvent::MouseMoved { x, y } => {
                self.mouse_position = Vec2::new(*x, *y);
            }

            InputEvent::MouseWheel { delta } => {
                self.scroll_wheel = self.scroll_wheel.wrapping_add(*delta);
            }

            InputEvent::GamepadButtonDown(button) => {
                if self.gamepad_buttons_down.insert(*button) {
                    self.gamepad_buttons_pressed_this_frame.insert(*button);
                }
            }

            InputEvent::GamepadButtonUp(button) => {
                self.gamepad_buttons_down.remove(button);
            }

            InputEvent::GamepadConnection { connected } => {
                self.gamepad_connected = *connected;
                if !connected {
                    self.gamepad_buttons_down.clear();
                }
            }

            InputEvent::Touch { id, phase, x, y } => {
                let point = TouchPoint { id: *id, phase: *phase, position: Vec2::new(*x, *y) };
                match self.touches.iter_mut().find(|touch| touch.id == *id) {
                    Some(existing) => *existing = point,
                    None => self.touches.push(point),
                }
            }

            InputEvent::Unidentified => {
                // Ignore unrecognized events
            }
        }
    }

    //=====================================================================
    // Query API
    //=====================================================================

    /// Returns `true` while key is held.
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// Like [`is_key_down`](Self::is_key_down) but for mouse buttons.
    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.mouse_buttons_down.contains(&button)
    }

    /// Like [`is_key_down`](Self::is_key_down) but for gamepad buttons.
    pub fn is_gamepad_button_down(&self, button: GamepadButton) -> bool {
        self.gamepad_buttons_down.contains(&button)
    }

    /// Returns mouse position in screen coordinates (pixels, top-left origin).
    pub fn mouse_position(&self) -> Vec2 {
        self.mouse_position
    }

    /// Returns the scroll wheel accumulator.
    pub fn scroll_wheel(&self) -> i32 {
        self.scroll_wheel
    }
}

//--- Trait Implementations -----------------------------------------------

impl InputSource for StateTracker {
    fn snapshot(&self) -> FrameInputState {
        FrameInputState {
            gamepad: GamepadState {
                connected: self.gamepad_connected,
                buttons: self
                    .gamepad_buttons_down
                    .union(&self.gamepad_buttons_pressed_this_frame)
                    .copied()
                    .collect(),
            },
            keyboard: KeyboardState {
                keys: self.keys_down.union(&self.keys_pressed_this_frame).copied().collect(),
            },
            mouse: MouseState {
                position: self.mouse_position,
                buttons: self
                    .mouse_buttons_down
                    .union(&self.mouse_buttons_pressed_this_frame)
                    .copied()
                    .collect(),
                scroll_wheel: self.scroll_wheel,
            },
            touches: self.touches.clone(),
        }
    }
}

impl Default for StateTracker {
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

    //--- Test Helpers -----------------------------------------------------

    fn key_down(key: KeyCode) -> InputEvent {
        InputEvent::KeyDown(key)
    }

    fn key_up(key: KeyCode) -> InputEvent {
        InputEvent::KeyUp(key)
    }

    fn touch(id: u64, phase: TouchPhase) -> InputEvent {
        InputEvent::Touch { id, phase, x: 4.0, y: 8.0 }
    }

    //=====================================================================
    // Keyboard Tests
    //=====================================================================

    /// Tests that key_down persists across frames.
    #[test]
    fn key_down_persists_across_frames() {
        let mut tracker = StateTracker::new();

        tracker.process_events(&[key_down(KeyCode::KeyW)]);

        for _ in 0..10 {
            tracker.clear();
            tracker.process_events(&[]);
            assert!(tracker.is_key_down(KeyCode::KeyW), "Key should remain down");
            assert!(tracker.snapshot().keyboard.is_down(KeyCode::KeyW));
        }
    }

    /// Tests fast tap (press + release same frame) is visible for one frame.
    #[test]
    fn fast_tap_latched_for_one_frame() {
        let mut tracker = StateTracker::new();

        tracker.clear();
        tracker.process_events(&[key_down(KeyCode::KeyE), key_up(KeyCode::KeyE)]);
        assert!(!tracker.is_key_down(KeyCode::KeyE), "Should end up not down");
        assert!(tracker.snapshot().keyboard.is_down(KeyCode::KeyE), "Tap should be latched");

        tracker.clear();
        assert!(!tracker.snapshot().keyboard.is_down(KeyCode::KeyE));
    }

    /// Tests spurious KeyUp is harmless.
    #[test]
    fn key_up_without_down_ignored() {
        let mut tracker = StateTracker::new();

        tracker.process_events(&[key_up(KeyCode::KeyZ)]);

        assert!(tracker.snapshot().keyboard.keys.is_empty());
    }

    #[test]
    fn release_all_clears_held_controls() {
        let mut tracker = StateTracker::new();
        tracker.process_events(&[
            key_down(KeyCode::Space),
            InputEvent::MouseButtonDown(MouseButton::Left),
            InputEvent::GamepadButtonDown(GamepadButton::A),
        ]);

        tracker.release_all();
        tracker.clear();

        let snapshot = tracker.snapshot();
        assert!(snapshot.keyboard.keys.is_empty());
        assert!(snapshot.mouse.buttons.is_empty());
        assert!(snapshot.gamepad.buttons.is_empty());
    }

    #[test]
    fn release_all_drops_fast_tap_latches() {
        let mut tracker = StateTracker::new();
        tracker.process_events(&[key_down(KeyCode::KeyE), InputEvent::KeyUp(KeyCode::KeyE)]);

        tracker.release_all();

        assert!(tracker.snapshot().keyboard.keys.is_empty());
    }

    //=====================================================================
    // Mouse Tests
    //=====================================================================

    #[test]
    fn mouse_position_updated() {
        let mut tracker = StateTracker::new();

        tracker.process_events(&[InputEvent::MouseMoved { x: 100.0, y: 200.0 }]);

        assert_eq!(tracker.mouse_position(), Vec2::new(100.0, 200.0));
        assert_eq!(tracker.snapshot().mouse.position, Vec2::new(100.0, 200.0));
    }

    #[test]
    fn scroll_wheel_accumulates() {
        let mut tracker = StateTracker::new();

        tracker.process_events(&[
            InputEvent::MouseWheel { delta: 120 },
            InputEvent::MouseWheel { delta: 120 },
        ]);
        tracker.clear();
        tracker.process_events(&[InputEvent::MouseWheel { delta: -120 }]);

        assert_eq!(tracker.scroll_wheel(), 120);
    }

    //=====================================================================
    // Gamepad Tests
    //=====================================================================

    #[test]
    fn gamepad_disconnect_releases_buttons() {
        let mut tracker = StateTracker::new();

        tracker.process_events(&[
            InputEvent::GamepadConnection { connected: true },
            InputEvent::GamepadButtonDown(GamepadButton::Start),
        ]);
        assert!(tracker.is_gamepad_button_down(GamepadButton::Start));
        assert!(tracker.snapshot().gamepad.connected);

        tracker.clear();
        tracker.process_events(&[InputEvent::GamepadConnection { connected: false }]);

        assert!(!tracker.is_gamepad_button_down(GamepadButton::Start));
        assert!(!tracker.snapshot().gamepad.connected);
    }

    //=====================================================================
    // Touch Tests
    //=====================================================================

    #[test]
    fn touch_points_update_in_place_and_retire_after_end() {
        let mut tracker = StateTracker::new();

        tracker.process_events(&[touch(1, TouchPhase::Started), touch(2, TouchPhase::Started)]);
        tracker.process_events(&[touch(1, TouchPhase::Moved)]);
        assert_eq!(tracker.snapshot().touches.len(), 2);

        tracker.clear();
        tracker.process_events(&[touch(2, TouchPhase::Ended)]);
        let touches = tracker.snapshot().touches;
        assert_eq!(touches.len(), 2, "Ended touch is visible for its final frame");

        tracker.clear();
        let touches = tracker.snapshot().touches;
        assert_eq!(touches.len(), 1);
        assert_eq!(touches[0].id, 1);
    }

    /// Tests that unidentified events are safely ignored.
    #[test]
    fn unidentified_events_ignored() {
        let mut tracker = StateTracker::new();

        tracker.process_events(&[InputEvent::Unidentified]);

        assert_eq!(tracker.snapshot(), FrameInputState::default());
    }
}
