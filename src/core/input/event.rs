//=========================================================================
// Input Event Types
//
// Defines the internal representation of low-level input events.
//
// This module abstracts away platform-specific input (e.g. Winit, a
// gamepad library, a touch panel) into a unified, engine-friendly format
// consumed by the device `StateTracker`.
//
// Responsibilities:
// - Represent keyboard, mouse, gamepad and touch inputs portably
// - Provide equality and hashing semantics for deduplication
// - Enable event coalescing (e.g., multiple MouseMoved → last position)
//
// Event Flow:
// ```text
// Platform Layer (Winit)
//         ↓
//    InputEvent (this module)
//         ↓
//    StateTracker (folds events into device state)
//         ↓
//    FrameInputState snapshot → InputEdgeDetector
// ```
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::hash::{Hash, Hasher};

//=== MouseButton =========================================================

/// Physical mouse button identifier.
///
/// The `Other` variant covers side buttons, macro buttons, and any
/// non-standard inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button (typically left).
    Left,

    /// Secondary button (typically right).
    Right,

    /// Middle button (wheel click).
    Middle,

    /// Any other button (side buttons, thumb buttons, macro keys).
    Other,
}

//=== GamepadButton =======================================================

/// Controller button identifier (player one).
///
/// Named after the common Xbox-style layout. Sticks are included as
/// clickable buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamepadButton {
    A,
    B,
    X,
    Y,
    Start,
    Back,
    LeftShoulder,
    RightShoulder,
    LeftStick,
    RightStick,
    DPadUp,
    DPadDown,
    DPadLeft,
    DPadRight,
}

//=== KeyCode =============================================================

/// Physical keyboard key identifier.
///
/// Represents the physical key location, not the character produced.
/// For example, `KeyA` is always the same physical key regardless of
/// keyboard layout (QWERTY vs AZERTY).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    //--- Numeric Keys -----------------------------------------------------

    /// Number row: 0-9
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    //--- Alphabetic Keys --------------------------------------------------

    /// Letter keys: A-Z (physical location, not character)
    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Arrow Keys -------------------------------------------------------

    /// Directional navigation keys
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,

    //--- Special Keys -----------------------------------------------------

    Space,
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,

    /// `,` / `<` key
    Comma,

    /// `.` / `>` key
    Period,

    /// Fallback for keys not explicitly mapped by the input layer.
    Unidentified,
}

//=== TouchPhase ==========================================================

/// Lifecycle stage of a single touch point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TouchPhase {
    Started,
    Moved,
    Ended,
    Cancelled,
}

//=== InputEvent ==========================================================

/// Low-level input event from the platform layer.
///
/// # Equality & Hashing Semantics
///
/// Events are compared by type + payload (key/button/touch id).
/// Special case: `MouseMoved` events are equal regardless of coordinates,
/// allowing efficient coalescing (last position wins).
///
/// ```text
/// Equality Rules:
/// KeyDown(A)        == KeyDown(A)            ✓
/// KeyDown(A)        == KeyUp(A)              ✗ (different type)
/// MouseMoved{...}   == MouseMoved{...}       ✓ (always equal)
/// MouseWheel{1}     == MouseWheel{3}         ✗ (wheel deltas accumulate)
/// ```
#[derive(Debug, Clone)]
pub enum InputEvent {
    KeyDown(KeyCode),
    KeyUp(KeyCode),
    MouseButtonDown(MouseButton),
    MouseButtonUp(MouseButton),

    /// Mouse cursor moved to new position.
    ///
    /// Coordinates are in screen space (pixels, top-left origin).
    MouseMoved { x: f32, y: f32 },

    /// Scroll wheel moved.
    ///
    /// `delta` is in wheel units (120 per notch), added to the wheel
    /// accumulator of the mouse state.
    MouseWheel { delta: i32 },

    GamepadButtonDown(GamepadButton),
    GamepadButtonUp(GamepadButton),

    /// Gamepad plugged in or removed.
    GamepadConnection { connected: bool },

    /// Touch point update in screen space.
    Touch {
        id: u64,
        phase: TouchPhase,
        x: f32,
        y: f32,
    },

    /// Unrecognized or unsupported event.
    ///
    /// These are silently ignored by the input system.
    Unidentified,
}

//--- Trait Implementations -----------------------------------------------

impl PartialEq for InputEvent {
    fn eq(&self, other: &Self) -> bool {
        use InputEvent::*;
        match (self, other) {
            (KeyDown(a), KeyDown(b)) | (KeyUp(a), KeyUp(b)) => a == b,
            (MouseButtonDown(a), MouseButtonDown(b))
            | (MouseButtonUp(a), MouseButtonUp(b)) => a == b,
            (GamepadButtonDown(a), GamepadButtonDown(b))
            | (GamepadButtonUp(a), GamepadButtonUp(b)) => a == b,
            (GamepadConnection { connected: a }, GamepadConnection { connected: b }) => a == b,
            (MouseWheel { delta: a }, MouseWheel { delta: b }) => a == b,
            (Touch { id: a, phase: pa, .. }, Touch { id: b, phase: pb, .. }) => {
                a == b && pa == pb
            }
            // MouseMoved: coordinates ignored, always equal
            (MouseMoved { .. }, MouseMoved { .. }) => true,
            (Unidentified, Unidentified) => true,
            _ => false,
        }
    }
}

impl Eq for InputEvent {}

/// Hashes discriminant + payload. Coordinates are NOT hashed for
/// `MouseMoved` or `Touch` (consistent with equality).
impl Hash for InputEvent {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);

        match self {
            Self::KeyDown(key) | Self::KeyUp(key) => key.hash(state),
            Self::MouseButtonDown(button) | Self::MouseButtonUp(button) => button.hash(state),
            Self::GamepadButtonDown(button) | Self::GamepadButtonUp(button) => {
                button.hash(state)
            }
            Self::GamepadConnection { connected } => connected.hash(state),
            Self::MouseWheel { delta } => delta.hash(state),
            Self::Touch { id, phase, .. } => {
                id.hash(state);
                phase.hash(state);
            }
            Self::MouseMoved { .. } | Self::Unidentified => {}
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::collections::HashSet;

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn mouse_moved_events_are_equal_regardless_of_coordinates() {
        let a = InputEvent::MouseMoved { x: 10.0, y: 10.0 };
        let b = InputEvent::MouseMoved { x: 200.0, y: 300.0 };
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn key_down_and_key_up_differ() {
        assert_ne!(InputEvent::KeyDown(KeyCode::KeyA), InputEvent::KeyUp(KeyCode::KeyA));
    }

    #[test]
    fn gamepad_events_compare_by_button() {
        assert_eq!(
            InputEvent::GamepadButtonDown(GamepadButton::Start),
            InputEvent::GamepadButtonDown(GamepadButton::Start)
        );
        assert_ne!(
            InputEvent::GamepadButtonDown(GamepadButton::Start),
            InputEvent::GamepadButtonDown(GamepadButton::Back)
        );
    }

    #[test]
    fn touch_events_coalesce_per_id_and_phase() {
        let mut set = HashSet::new();
        set.replace(InputEvent::Touch { id: 1, phase: TouchPhase::Moved, x: 1.0, y: 1.0 });
        set.replace(InputEvent::Touch { id: 1, phase: TouchPhase::Moved, x: 5.0, y: 5.0 });
        set.replace(InputEvent::Touch { id: 2, phase: TouchPhase::Moved, x: 5.0, y: 5.0 });
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn hashset_replaces_continuous_event() {
        let mut set = HashSet::new();
        let a = InputEvent::MouseMoved { x: 10.0, y: 10.0 };
        let b = InputEvent::MouseMoved { x: 20.0, y: 30.0 };

        set.insert(a);
        set.replace(b.clone());

        assert_eq!(set.len(), 1, "HashSet should keep only latest MouseMoved");
        match set.iter().next() {
            Some(InputEvent::MouseMoved { x, y }) => assert_eq!((*x, *y), (20.0, 30.0)),
            other => panic!("Expected MouseMoved, got {:?}", other),
        }
    }
}
