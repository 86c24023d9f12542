//=========================================================================
// Input System
//=========================================================================
//
// Platform-agnostic input pipeline.
//
// Architecture:
//   InputEvent (platform) → StateTracker (live device state)
//     → FrameInputState (snapshot) → InputEdgeDetector (pressed/released/held)
//
// The simulation captures exactly one snapshot per tick; scene code only
// ever talks to the `InputEdgeDetector` found in the frame context.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod event;
mod edge_detector;
mod frame_state;
mod state_tracker;

//=== Public API ==========================================================

pub use edge_detector::{Control, InputEdgeDetector, DEFAULT_SCROLL_WHEEL_SENSITIVITY};
pub use event::{GamepadButton, InputEvent, KeyCode, MouseButton, TouchPhase};
pub use frame_state::{
    FrameInputState, GamepadState, InputSource, KeyboardState, MouseState, TouchPoint,
};
pub use state_tracker::StateTracker;
