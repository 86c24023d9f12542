//=========================================================================
// Input Processor
//=========================================================================
//
// Converts platform-specific Winit events into engine InputEvents.
//
// Architecture:
//   Winit Events → InputProcessor → InputEvent (engine type) → InputBuffer
//
// Key repeats and unmapped keys (F13-F24, exotic keyboards) are filtered
// (returns None). Scroll deltas are normalized to wheel units.
//
//=========================================================================

//=== External Dependencies ===============================================

use winit::{
    event::{ElementState, KeyEvent, MouseScrollDelta, Touch, TouchPhase as WinitTouchPhase},
    event::MouseButton as WinitMouseButton,
    keyboard::{KeyCode as WinitKeyCode, PhysicalKey},
};

//=== Internal Dependencies ===============================================

use crate::core::input::{InputEvent, KeyCode, MouseButton, TouchPhase};

//=== Constants ===========================================================

/// Wheel units per line (one notch on a classic wheel).
pub(crate) const WHEEL_UNITS_PER_LINE: f32 = 120.0;

//=== InputProcessor ======================================================

/// Converts Winit events to engine InputEvents.
pub(crate) struct InputProcessor;

impl InputProcessor {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new() -> Self {
        Self
    }

    //--- Event Processing -------------------------------------------------

    /// Converts Winit KeyEvent to InputEvent (filters repeats and unmapped keys).
    pub(crate) fn process_key_event(&self, key_event: &KeyEvent) -> Option<InputEvent> {
        if key_event.repeat {
            return None;
        }

        let key_code = match key_event.physical_key {
            PhysicalKey::Code(code) => KeyCode::from(code),
            _ => return None,
        };

        if matches!(key_code, KeyCode::Unidentified) {
            return None;
        }

        Some(self.create_key_input_event(key_code, key_event.state))
    }

    /// Converts Winit mouse button event to InputEvent.
    pub(crate) fn process_mouse_button(
        &self,
        button: WinitMouseButton,
        state: ElementState,
    ) -> InputEvent {
        let mouse_button = MouseButton::from(button);

        match state {
            ElementState::Pressed => InputEvent::MouseButtonDown(mouse_button),
            ElementState::Released => InputEvent::MouseButtonUp(mouse_button),
        }
    }

    /// Creates a mouse move event (screen space).
    pub(crate) fn process_mouse_move(&self, x: f32, y: f32) -> InputEvent {
        InputEvent::MouseMoved { x, y }
    }

    /// Converts a scroll delta to wheel units (positive = away from user).
    ///
    /// Pixel deltas (touchpads) are taken as-is.
    pub(crate) fn process_wheel(&self, delta: MouseScrollDelta) -> i32 {
        match delta {
            MouseScrollDelta::LineDelta(_, y) => (y * WHEEL_UNITS_PER_LINE).round() as i32,
            MouseScrollDelta::PixelDelta(position) => position.y.round() as i32,
        }
    }

    /// Converts a touch update to an InputEvent (screen space).
    pub(crate) fn process_touch(&self, touch: &Touch) -> InputEvent {
        InputEvent::Touch {
            id: touch.id,
            phase: TouchPhase::from(touch.phase),
            x: touch.location.x as f32,
            y: touch.location.y as f32,
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn create_key_input_event(&self, key: KeyCode, state: ElementState) -> InputEvent {
        match state {
            ElementState::Pressed => InputEvent::KeyDown(key),
            ElementState::Released => InputEvent::KeyUp(key),
        }
    }
}

//=== Type Conversions ====================================================

/// Converts Winit physical key codes to engine key codes.
///
/// Maps A-Z, 0-9, arrows, and common special keys (including the comma
/// and period zoom keys). Unmapped keys (F13-F24,
/// numpad, media keys) return `KeyCode::Unidentified`.
impl From<WinitKeyCode> for KeyCode {
    fn from(code: WinitKeyCode) -> Self {
        use WinitKeyCode::*;
        match code {
            //--- Digits -------------------------------------------------------

            Digit0 => KeyCode::Digit0,
            Digit1 => KeyCode::Digit1,
            Digit2 => KeyCode::Digit2,
            Digit3 => KeyCode::Digit3,
            Digit4 => KeyCode::Digit4,
            Digit5 => KeyCode::Digit5,
            Digit6 => KeyCode::Digit6,
            Digit7 => KeyCode::Digit7,
            Digit8 => KeyCode::Digit8,
            Digit9 => KeyCode::Digit9,

            //--- Letters ------------------------------------------------------

            KeyA => KeyCode::KeyA,
            KeyB => KeyCode::KeyB,
            KeyC => KeyCode::KeyC,
            KeyD => KeyCode::KeyD,
            KeyE => KeyCode::KeyE,
            KeyF => KeyCode::KeyF,
            KeyG => KeyCode::KeyG,
            KeyH => KeyCode::KeyH,
            KeyI => KeyCode::KeyI,
            KeyJ => KeyCode::KeyJ,
            KeyK => KeyCode::KeyK,
            KeyL => KeyCode::KeyL,
            KeyM => KeyCode::KeyM,
            KeyN => KeyCode::KeyN,
            KeyO => KeyCode::KeyO,
            KeyP => KeyCode::KeyP,
            KeyQ => KeyCode::KeyQ,
            KeyR => KeyCode::KeyR,
            KeyS => KeyCode::KeyS,
            KeyT => KeyCode::KeyT,
            KeyU => KeyCode::KeyU,
            KeyV => KeyCode::KeyV,
            KeyW => KeyCode::KeyW,
            KeyX => KeyCode::KeyX,
            KeyY => KeyCode::KeyY,
            KeyZ => KeyCode::KeyZ,

            //--- Arrows -------------------------------------------------------

            ArrowUp => KeyCode::ArrowUp,
            ArrowDown => KeyCode::ArrowDown,
            ArrowLeft => KeyCode::ArrowLeft,
            ArrowRight => KeyCode::ArrowRight,

            //--- Special ------------------------------------------------------

            Space => KeyCode::Space,
            Enter => KeyCode::Enter,
            Escape => KeyCode::Escape,
            Tab => KeyCode::Tab,
            Backspace => KeyCode::Backspace,
            Delete => KeyCode::Delete,
            Comma => KeyCode::Comma,
            Period => KeyCode::Period,

            //--- Unmapped (return Unidentified) -------------------------------

            _ => KeyCode::Unidentified,
        }
    }
}

/// Converts Winit mouse buttons to engine buttons.
///
/// Left/Right/Middle mapped directly; Back/Forward/Other → Other.
impl From<WinitMouseButton> for MouseButton {
    fn from(button: WinitMouseButton) -> Self {
        match button {
            WinitMouseButton::Left => MouseButton::Left,
            WinitMouseButton::Right => MouseButton::Right,
            WinitMouseButton::Middle => MouseButton::Middle,
            _ => MouseButton::Other,
        }
    }
}

impl From<WinitTouchPhase> for TouchPhase {
    fn from(phase: WinitTouchPhase) -> Self {
        match phase {
            WinitTouchPhase::Started => TouchPhase::Started,
            WinitTouchPhase::Moved => TouchPhase::Moved,
            WinitTouchPhase::Ended => TouchPhase::Ended,
            WinitTouchPhase::Cancelled => TouchPhase::Cancelled,
        }
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;

    #[test]
    fn create_key_down_event() {
        let processor = InputProcessor::new();
        let event = processor.create_key_input_event(KeyCode::KeyS, ElementState::Pressed);
        assert_eq!(event, InputEvent::KeyDown(KeyCode::KeyS));
    }

    #[test]
    fn create_key_up_event() {
        let processor = InputProcessor::new();
        let event = processor.create_key_input_event(KeyCode::KeyA, ElementState::Released);
        assert_eq!(event, InputEvent::KeyUp(KeyCode::KeyA));
    }

    #[test]
    fn keycode_conversion_filters_unidentified() {
        let unidentified = KeyCode::from(WinitKeyCode::F13);
        assert!(matches!(unidentified, KeyCode::Unidentified));
    }

    #[test]
    fn mouse_button_events() {
        let processor = InputProcessor::new();

        assert_eq!(
            processor.process_mouse_button(WinitMouseButton::Left, ElementState::Pressed),
            InputEvent::MouseButtonDown(MouseButton::Left)
        );
        assert_eq!(
            processor.process_mouse_button(WinitMouseButton::Back, ElementState::Released),
            InputEvent::MouseButtonUp(MouseButton::Other)
        );
    }

    #[test]
    fn mouse_move_correct() {
        let processor = InputProcessor::new();
        let event = processor.process_mouse_move(123.5, 456.7);

        match event {
            InputEvent::MouseMoved { x, y } => {
                assert_eq!(x, 123.5);
                assert_eq!(y, 456.7);
            }
            _ => panic!("Expected MouseMoved"),
        }
    }

    #[test]
    fn wheel_lines_become_wheel_units() {
        let processor = InputProcessor::new();

        assert_eq!(processor.process_wheel(MouseScrollDelta::LineDelta(0.0, 1.0)), 120);
        assert_eq!(processor.process_wheel(MouseScrollDelta::LineDelta(0.0, -2.0)), -240);
        assert_eq!(
            processor.process_wheel(MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, 14.6))),
            15
        );
    }

    #[test]
    fn keycode_conversion_alphabetic() {
        assert_eq!(KeyCode::from(WinitKeyCode::KeyA), KeyCode::KeyA);
        assert_eq!(KeyCode::from(WinitKeyCode::KeyZ), KeyCode::KeyZ);
    }

    #[test]
    fn keycode_conversion_special() {
        assert_eq!(KeyCode::from(WinitKeyCode::Space), KeyCode::Space);
        assert_eq!(KeyCode::from(WinitKeyCode::Enter), KeyCode::Enter);
        assert_eq!(KeyCode::from(WinitKeyCode::Comma), KeyCode::Comma);
        assert_eq!(KeyCode::from(WinitKeyCode::Period), KeyCode::Period);
    }

    #[test]
    fn touch_phase_conversion() {
        assert_eq!(TouchPhase::from(WinitTouchPhase::Started), TouchPhase::Started);
        assert_eq!(TouchPhase::from(WinitTouchPhase::Cancelled), TouchPhase::Cancelled);
    }

    #[test]
    fn mouse_button_conversion() {
        assert_eq!(MouseButton::from(WinitMouseButton::Left), MouseButton::Left);
        assert_eq!(MouseButton::from(WinitMouseButton::Right), MouseButton::Right);
        assert_eq!(MouseButton::from(WinitMouseButton::Middle), MouseButton::Middle);
    }
}
