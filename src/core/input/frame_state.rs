//=========================================================================
// Frame Input State
//=========================================================================
//
// Immutable per-frame snapshot of every input device.
//
// Snapshots are produced by an `InputSource` (normally the device
// `StateTracker`) once per tick and compared pairwise by the
// `InputEdgeDetector`. Devices are plain data compared by equality.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

use glam::Vec2;

//=== Internal Dependencies ===============================================

use super::event::{GamepadButton, KeyCode, MouseButton, TouchPhase};

//=== Device Snapshots ====================================================

/// Player-one controller state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GamepadState {
    pub connected: bool,
    pub buttons: HashSet<GamepadButton>,
}

impl GamepadState {
    pub fn is_down(&self, button: GamepadButton) -> bool {
        self.buttons.contains(&button)
    }
}

/// Keyboard state (keys currently held).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyboardState {
    pub keys: HashSet<KeyCode>,
}

impl KeyboardState {
    pub fn is_down(&self, key: KeyCode) -> bool {
        self.keys.contains(&key)
    }
}

/// Pointer state.
///
/// `scroll_wheel` is a running accumulator in wheel units; consumers
/// compare it between frames rather than reading it directly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MouseState {
    pub position: Vec2,
    pub buttons: HashSet<MouseButton>,
    pub scroll_wheel: i32,
}

impl MouseState {
    pub fn is_down(&self, button: MouseButton) -> bool {
        self.buttons.contains(&button)
    }
}

/// One active touch point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub id: u64,
    pub phase: TouchPhase,
    pub position: Vec2,
}

//=== FrameInputState =====================================================

/// All device state captured atomically for one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameInputState {
    pub gamepad: GamepadState,
    pub keyboard: KeyboardState,
    pub mouse: MouseState,
    pub touches: Vec<TouchPoint>,
}

//=== InputSource =========================================================

/// Raw device-state provider queried once per tick.
pub trait InputSource {
    /// Returns a snapshot of every device at this instant.
    fn snapshot(&self) -> FrameInputState;
}

/// A fixed snapshot is a valid source (replays, tests).
impl InputSource for FrameInputState {
    fn snapshot(&self) -> FrameInputState {
        self.clone()
    }
}
