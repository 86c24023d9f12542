//=========================================================================
// Camera Controller
//=========================================================================
//
// Drives a `Camera2d` from frame input.
//
// Bindings (any control in a row triggers it):
//
//   action       keyboard            gamepad          edge
//   ----------   -----------------   --------------   --------
//   reset        R                   right stick      released
//   rotate +     9                   X                held
//   rotate -     0                   Y                held
//   zoom out     ,                   left shoulder    held
//   zoom in      .                   right shoulder   held
//   zoom         scroll wheel                         changed
//   pan up       W / ↑               D-pad up         held
//   pan down     S / ↓               D-pad down       held
//   pan left     A / ←               D-pad left       held
//   pan right    D / →               D-pad right      held
//
// Steps are quantized: rotation to whole degrees, zoom to whole percents
// (at least `zoom_speed`), movement to whole units (at least one).
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;
use log::debug;

//=== Internal Dependencies ===============================================

use super::camera2d::Camera2d;
use super::options::{CameraOptions, Viewport};
use crate::core::input::{Control, GamepadButton, InputEdgeDetector, KeyCode};

//=== Bindings ============================================================

const RESET: [Control; 2] = [
    Control::Key(KeyCode::KeyR),
    Control::Gamepad(GamepadButton::RightStick),
];
const ROTATE_CLOCKWISE: [Control; 2] = [
    Control::Key(KeyCode::Digit9),
    Control::Gamepad(GamepadButton::X),
];
const ROTATE_COUNTER_CLOCKWISE: [Control; 2] = [
    Control::Key(KeyCode::Digit0),
    Control::Gamepad(GamepadButton::Y),
];
const ZOOM_OUT: [Control; 2] = [
    Control::Key(KeyCode::Comma),
    Control::Gamepad(GamepadButton::LeftShoulder),
];
const ZOOM_IN: [Control; 2] = [
    Control::Key(KeyCode::Period),
    Control::Gamepad(GamepadButton::RightShoulder),
];
const PAN_UP: [Control; 3] = [
    Control::Key(KeyCode::KeyW),
    Control::Key(KeyCode::ArrowUp),
    Control::Gamepad(GamepadButton::DPadUp),
];
const PAN_DOWN: [Control; 3] = [
    Control::Key(KeyCode::KeyS),
    Control::Key(KeyCode::ArrowDown),
    Control::Gamepad(GamepadButton::DPadDown),
];
const PAN_LEFT: [Control; 3] = [
    Control::Key(KeyCode::KeyA),
    Control::Key(KeyCode::ArrowLeft),
    Control::Gamepad(GamepadButton::DPadLeft),
];
const PAN_RIGHT: [Control; 3] = [
    Control::Key(KeyCode::KeyD),
    Control::Key(KeyCode::ArrowRight),
    Control::Gamepad(GamepadButton::DPadRight),
];

//=== CameraStartParameters ===============================================

/// Pose applied when a scene takes over the camera. `None` keeps the
/// current value.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CameraStartParameters {
    pub position: Option<Vec2>,
    pub zoom: Option<f32>,
    pub rotation: Option<f32>,
}

//=== CameraController ====================================================

#[derive(Debug, Clone)]
pub struct CameraController {
    camera: Camera2d,
    move_enabled: bool,
    rotation_enabled: bool,
    zoom_enabled: bool,
    reset_enabled: bool,
}

impl CameraController {
    pub fn new(viewport: Viewport, options: CameraOptions) -> Self {
        Self::from_camera(Camera2d::new(viewport, options))
    }

    pub fn from_camera(camera: Camera2d) -> Self {
        Self {
            camera,
            move_enabled: true,
            rotation_enabled: true,
            zoom_enabled: true,
            reset_enabled: true,
        }
    }

    pub fn camera(&self) -> &Camera2d {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera2d {
        &mut self.camera
    }

    //=====================================================================
    // Capabilities
    //=====================================================================

    pub fn move_enabled(&self) -> bool {
        self.move_enabled
    }

    pub fn set_move_enabled(&mut self, enabled: bool) {
        self.move_enabled = enabled;
    }

    pub fn rotation_enabled(&self) -> bool {
        self.rotation_enabled
    }

    pub fn set_rotation_enabled(&mut self, enabled: bool) {
        self.rotation_enabled = enabled;
    }

    pub fn zoom_enabled(&self) -> bool {
        self.zoom_enabled
    }

    pub fn set_zoom_enabled(&mut self, enabled: bool) {
        self.zoom_enabled = enabled;
    }

    pub fn reset_enabled(&self) -> bool {
        self.reset_enabled
    }

    pub fn set_reset_enabled(&mut self, enabled: bool) {
        self.reset_enabled = enabled;
    }

    //=====================================================================
    // Commands
    //=====================================================================

    /// Applies a start pose. Disabled capabilities ignore their field.
    pub fn set_start_parameters(&mut self, parameters: CameraStartParameters) {
        if let (true, Some(position)) = (self.move_enabled, parameters.position) {
            self.camera.set_position(position);
        }
        if let (true, Some(rotation)) = (self.rotation_enabled, parameters.rotation) {
            self.camera.set_rotation(rotation);
        }
        if let (true, Some(zoom)) = (self.zoom_enabled, parameters.zoom) {
            self.camera.set_zoom(zoom);
        }
    }

    /// Resets the camera pose if resetting is enabled.
    pub fn reset(&mut self) {
        if self.reset_enabled {
            self.camera.reset();
        }
    }

    /// Re-enables every capability and restores the camera defaults.
    pub fn full_reset(&mut self) {
        self.move_enabled = true;
        self.rotation_enabled = true;
        self.zoom_enabled = true;
        self.reset_enabled = true;
        self.camera.full_reset();
    }

    //=====================================================================
    // Update
    //=====================================================================

    /// Applies this frame's camera input. `delta` is in seconds.
    pub fn update(&mut self, input: &InputEdgeDetector, delta: f32) {
        let delta_ms = delta * 1000.0;

        if self.reset_enabled && input.is_released(&RESET) {
            debug!(target: "input", "Camera reset");
            self.camera.reset();
        }
        if self.rotation_enabled {
            self.handle_rotation(input, delta_ms);
        }
        if self.zoom_enabled {
            self.handle_zoom(input, delta_ms);
        }
        if self.move_enabled {
            self.handle_movement(input, delta_ms);
        }
    }

    fn handle_rotation(&mut self, input: &InputEdgeDetector, delta_ms: f32) {
        let step = rotation_step(self.camera.options().rotation_speed, delta_ms);
        let camera = &mut self.camera;

        input.on_held(&ROTATE_CLOCKWISE, || camera.rotate_by(step));
        input.on_held(&ROTATE_COUNTER_CLOCKWISE, || camera.rotate_by(-step));
    }

    fn handle_zoom(&mut self, input: &InputEdgeDetector, delta_ms: f32) {
        let speed = self.camera.options().zoom_speed;
        let step = zoom_step(speed, self.camera.zoom(), delta_ms);
        let camera = &mut self.camera;

        input.on_held(&ZOOM_OUT, || camera.zoom_by(-step));
        input.on_held(&ZOOM_IN, || camera.zoom_by(step));
        input.on_scroll_wheel_changed(|diff| camera.zoom_by(step * diff));
    }

    fn handle_movement(&mut self, input: &InputEdgeDetector, delta_ms: f32) {
        let step = movement_step(
            self.camera.options().movement_speed,
            self.camera.zoom(),
            delta_ms,
        );
        let camera = &mut self.camera;

        input.on_held(&PAN_UP, || camera.move_by(0.0, -step));
        input.on_held(&PAN_DOWN, || camera.move_by(0.0, step));
        input.on_held(&PAN_LEFT, || camera.move_by(-step, 0.0));
        input.on_held(&PAN_RIGHT, || camera.move_by(step, 0.0));
    }
}

impl Default for CameraController {
    fn default() -> Self {
        Self::from_camera(Camera2d::default())
    }
}

//--- Step Quantization ---------------------------------------------------

/// Rotation step in radians, rounded to whole degrees.
fn rotation_step(speed: f32, delta_ms: f32) -> f32 {
    (speed * delta_ms).to_degrees().round().to_radians()
}

/// Zoom step rounded to whole percents, never smaller than `speed`.
fn zoom_step(speed: f32, zoom: f32, delta_ms: f32) -> f32 {
    let raw = speed * delta_ms * zoom;
    let percents = (raw * 100.0).round() / 100.0;
    percents.max(speed)
}

/// Movement step in world units, at least one.
fn movement_step(speed: f32, zoom: f32, delta_ms: f32) -> f32 {
    (speed * delta_ms / zoom).round().max(1.0)
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::FrameInputState;

    const FRAME: f32 = 1.0 / 60.0;

    //--- Test Helpers -----------------------------------------------------

    fn held(keys: &[KeyCode]) -> InputEdgeDetector {
        let mut frame = FrameInputState::default();
        frame.keyboard.keys.extend(keys.iter().copied());

        let mut input = InputEdgeDetector::new();
        input.capture(frame.clone());
        input.capture(frame);
        input
    }

    fn uncentered() -> CameraController {
        CameraController::new(
            Viewport::new(800, 600),
            CameraOptions { center_on_initialization: false, ..CameraOptions::default() },
        )
    }

    //=====================================================================
    // Quantization
    //=====================================================================

    #[test]
    fn steps_are_quantized() {
        // 0.001 rad/ms * 16.67 ms ≈ 0.955° → 1°
        assert!((rotation_step(0.001, 16.67) - 1f32.to_radians()).abs() < 1e-6);
        // 0.01 * 16.67 * 1.0 = 0.1667 → 0.17
        assert!((zoom_step(0.01, 1.0, 16.67) - 0.17).abs() < 1e-6);
        // Tiny deltas fall back to the minimum step
        assert_eq!(zoom_step(0.01, 0.01, 1.0), 0.01);
        assert_eq!(movement_step(1.0, 100.0, 16.67), 1.0);
        assert_eq!(movement_step(1.0, 2.0, 16.67), 8.0);
    }

    //=====================================================================
    // Input Handling
    //=====================================================================

    #[test]
    fn held_w_pans_up() {
        let mut controller = uncentered();
        controller.update(&held(&[KeyCode::KeyW]), FRAME);

        assert_eq!(controller.camera().position(), Vec2::new(0.0, -17.0));
    }

    #[test]
    fn opposite_directions_cancel() {
        let mut controller = uncentered();
        controller.update(&held(&[KeyCode::KeyA, KeyCode::KeyD]), FRAME);

        assert_eq!(controller.camera().position(), Vec2::ZERO);
    }

    #[test]
    fn disabled_movement_ignores_input() {
        let mut controller = uncentered();
        controller.set_move_enabled(false);
        controller.update(&held(&[KeyCode::ArrowRight]), FRAME);

        assert_eq!(controller.camera().position(), Vec2::ZERO);
    }

    #[test]
    fn held_period_zooms_in() {
        let mut controller = uncentered();
        controller.update(&held(&[KeyCode::Period]), FRAME);

        assert!((controller.camera().zoom() - 1.17).abs() < 1e-5);
    }

    #[test]
    fn held_nine_rotates_one_degree() {
        let mut controller = uncentered();
        controller.update(&held(&[KeyCode::Digit9]), FRAME);

        assert!((controller.camera().rotation() - 1f32.to_radians()).abs() < 1e-6);
    }

    #[test]
    fn releasing_r_resets() {
        let mut controller = uncentered();
        controller.camera_mut().set_zoom(4.0);

        let mut input = held(&[KeyCode::KeyR]);
        input.capture(FrameInputState::default());
        controller.update(&input, FRAME);

        assert_eq!(controller.camera().zoom(), 1.0);
        assert_eq!(controller.camera().position(), Vec2::new(400.0, 300.0));
    }

    //=====================================================================
    // Commands
    //=====================================================================

    #[test]
    fn start_parameters_keep_unset_fields() {
        let mut controller = uncentered();
        controller.camera_mut().set_zoom(2.0);

        controller.set_start_parameters(CameraStartParameters {
            position: Some(Vec2::new(50.0, 60.0)),
            ..CameraStartParameters::default()
        });

        assert_eq!(controller.camera().position(), Vec2::new(50.0, 60.0));
        assert_eq!(controller.camera().zoom(), 2.0);
    }

    #[test]
    fn full_reset_reenables_capabilities() {
        let mut controller = uncentered();
        controller.set_zoom_enabled(false);
        controller.set_reset_enabled(false);
        controller.camera_mut().set_zoom(3.0);

        controller.reset();
        assert_eq!(controller.camera().zoom(), 3.0, "reset disabled");

        controller.full_reset();
        assert!(controller.zoom_enabled() && controller.reset_enabled());
        assert_eq!(controller.camera().zoom(), 1.0);
    }
}
