//=========================================================================
// Camera
//=========================================================================
//
// Constrained 2D camera and its input-driven controller.
//
// Architecture:
//   CameraOptions ──► Camera2d (pose + transform)
//                        ▲
//   InputEdgeDetector ─► CameraController::update()
//
// The scene graph reads `CameraController::camera().transform()` when
// drawing roots that follow the camera.
//
//=========================================================================

//=== Module Declarations =================================================

mod camera2d;
mod controller;
mod options;

//=== Public API ==========================================================

pub use camera2d::Camera2d;
pub use controller::{CameraController, CameraStartParameters};
pub use options::{CameraOptions, Viewport};
