//=========================================================================
// Frame Context
//=========================================================================
//
// Shared services threaded through every behavior hook.
//
// The context is owned by the `Simulation` and lent to the scene graph
// and the scene state machine for the duration of a tick. Behaviors read
// input and timing from it and post scene change requests into it.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::camera::CameraController;
use crate::core::input::InputEdgeDetector;
use crate::core::pause::PauseController;
use crate::core::scene::{SceneKey, SceneRequests};

//=== FrameContext ========================================================

/// Per-tick services available to node behaviors.
#[derive(Debug, Clone)]
pub struct FrameContext<S: SceneKey> {
    /// Edge-classified input for this tick.
    pub input: InputEdgeDetector,

    pub camera: CameraController,

    pub pause: PauseController,

    /// Pending scene change, applied at the start of the next tick.
    pub scenes: SceneRequests<S>,

    /// Seconds since the previous tick.
    pub delta: f32,

    /// Whether the host window has focus.
    pub focused: bool,
}

impl<S: SceneKey> FrameContext<S> {
    pub fn new(input: InputEdgeDetector, camera: CameraController) -> Self {
        Self {
            input,
            camera,
            pause: PauseController::new(),
            scenes: SceneRequests::new(),
            delta: 0.0,
            focused: true,
        }
    }

    /// Shorthand for `scenes.request_scene_change`.
    pub fn request_scene_change(&mut self, key: S) {
        self.scenes.request_scene_change(key);
    }
}

impl<S: SceneKey> Default for FrameContext<S> {
    fn default() -> Self {
        Self::new(InputEdgeDetector::new(), CameraController::default())
    }
}
