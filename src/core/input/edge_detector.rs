//=========================================================================
// Input Edge Detector
//=========================================================================
//
// Frame-gated classification of device state into pressed / released /
// held transitions.
//
// Architecture:
//   InputSource → capture_frame() → (previous, current) → on_*/is_* queries
//
// Classification over one control:
//
//   previous  current   result
//   --------  -------   --------
//     up       down     pressed
//     down     up       released
//     down     down     held
//
// Every query takes a slice of controls and is satisfied if ANY of them
// qualifies (keys, mouse buttons and gamepad buttons may be mixed).
// Actions run at most once per query regardless of how many controls
// matched.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;

//=== Internal Dependencies ===============================================

use super::event::{GamepadButton, KeyCode, MouseButton};
use super::frame_state::{FrameInputState, InputSource, TouchPoint};

//=== Constants ===========================================================

/// Default multiplier applied to raw scroll wheel deltas.
pub const DEFAULT_SCROLL_WHEEL_SENSITIVITY: f32 = 0.01;

//=== Control =============================================================

/// A single bindable control on any device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Key(KeyCode),
    Mouse(MouseButton),
    Gamepad(GamepadButton),
}

impl From<KeyCode> for Control {
    fn from(key: KeyCode) -> Self {
        Self::Key(key)
    }
}

impl From<MouseButton> for Control {
    fn from(button: MouseButton) -> Self {
        Self::Mouse(button)
    }
}

impl From<GamepadButton> for Control {
    fn from(button: GamepadButton) -> Self {
        Self::Gamepad(button)
    }
}

//=== InputEdgeDetector ===================================================

/// Compares the current and previous frame snapshots.
///
/// `capture_frame` must run exactly once per tick, paused or not; every
/// query in between sees the same frozen pair.
#[derive(Debug, Clone)]
pub struct InputEdgeDetector {
    current: FrameInputState,
    previous: FrameInputState,
    scroll_wheel_sensitivity: f32,
}

impl InputEdgeDetector {
    //--- Construction -----------------------------------------------------

    pub fn new() -> Self {
        Self::with_sensitivity(DEFAULT_SCROLL_WHEEL_SENSITIVITY)
    }

    pub fn with_sensitivity(scroll_wheel_sensitivity: f32) -> Self {
        Self {
            current: FrameInputState::default(),
            previous: FrameInputState::default(),
            scroll_wheel_sensitivity,
        }
    }

    //--- Frame Capture ----------------------------------------------------

    /// Shifts current → previous and takes a fresh snapshot from `source`.
    pub fn capture_frame<I: InputSource + ?Sized>(&mut self, source: &I) {
        self.capture(source.snapshot());
    }

    /// Like [`capture_frame`](Self::capture_frame) with a ready snapshot.
    pub fn capture(&mut self, snapshot: FrameInputState) {
        self.previous = std::mem::replace(&mut self.current, snapshot);
    }

    /// Copies the current snapshot over the previous one, so the frame
    /// reports no pressed, released or scroll edges.
    pub fn discard_edges(&mut self) {
        self.previous = self.current.clone();
    }

    //=====================================================================
    // Predicates
    //=====================================================================

    /// Returns `true` if any control went up → down this frame.
    pub fn is_pressed(&self, controls: &[Control]) -> bool {
        controls
            .iter()
            .any(|c| is_down(&self.current, *c) && !is_down(&self.previous, *c))
    }

    /// Returns `true` if any control went down → up this frame.
    pub fn is_released(&self, controls: &[Control]) -> bool {
        controls
            .iter()
            .any(|c| !is_down(&self.current, *c) && is_down(&self.previous, *c))
    }

    /// Returns `true` if any control is down in both frames.
    ///
    /// The initial press frame does not count as held.
    pub fn is_held(&self, controls: &[Control]) -> bool {
        controls
            .iter()
            .any(|c| is_down(&self.current, *c) && is_down(&self.previous, *c))
    }

    /// Returns `true` if any control is down this frame (pressed or held).
    pub fn is_down(&self, controls: &[Control]) -> bool {
        controls.iter().any(|c| is_down(&self.current, *c))
    }

    //=====================================================================
    // Callbacks
    //=====================================================================

    /// Runs `action` once if any control was pressed this frame.
    ///
    /// Returns whether the action ran.
    pub fn on_pressed(&self, controls: &[Control], action: impl FnOnce()) -> bool {
        fire(self.is_pressed(controls), action)
    }

    /// Runs `action` once if any control was released this frame.
    pub fn on_released(&self, controls: &[Control], action: impl FnOnce()) -> bool {
        fire(self.is_released(controls), action)
    }

    /// Runs `action` once if any control is held this frame.
    pub fn on_held(&self, controls: &[Control], action: impl FnOnce()) -> bool {
        fire(self.is_held(controls), action)
    }

    /// Runs `action(delta * sensitivity)` if the scroll accumulator moved.
    pub fn on_scroll_wheel_changed(&self, action: impl FnOnce(f32)) -> bool {
        match self.scroll_wheel_delta() {
            Some(delta) => {
                action(delta);
                true
            }
            None => false,
        }
    }

    /// Scaled scroll change between frames, `None` when unchanged.
    pub fn scroll_wheel_delta(&self) -> Option<f32> {
        let current = self.current.mouse.scroll_wheel;
        let previous = self.previous.mouse.scroll_wheel;
        (current != previous)
            .then(|| current.wrapping_sub(previous) as f32 * self.scroll_wheel_sensitivity)
    }

    //=====================================================================
    // Accessors
    //=====================================================================

    /// Pointer position this frame (screen space).
    pub fn pointer_position(&self) -> Vec2 {
        self.current.mouse.position
    }

    /// Active touch points this frame.
    pub fn touches(&self) -> &[TouchPoint] {
        &self.current.touches
    }

    pub fn gamepad_connected(&self) -> bool {
        self.current.gamepad.connected
    }

    pub fn current(&self) -> &FrameInputState {
        &self.current
    }

    pub fn previous(&self) -> &FrameInputState {
        &self.previous
    }

    pub fn scroll_wheel_sensitivity(&self) -> f32 {
        self.scroll_wheel_sensitivity
    }

    pub fn set_scroll_wheel_sensitivity(&mut self, sensitivity: f32) {
        self.scroll_wheel_sensitivity = sensitivity;
    }
}

impl Default for InputEdgeDetector {
    fn default() -> Self {
        Self::new()
    }
}

//--- Internal Helpers ----------------------------------------------------

fn is_down(frame: &FrameInputState, control: Control) -> bool {
    match control {
        Control::Key(key) => frame.keyboard.is_down(key),
        Control::Mouse(button) => frame.mouse.is_down(button),
        Control::Gamepad(button) => frame.gamepad.is_down(button),
    }
}

fn fire(condition: bool, action: impl FnOnce()) -> bool {
    if condition {
        action();
    }
    condition
}

//=========================================================================
// Unit Tests
//=========================================================================
