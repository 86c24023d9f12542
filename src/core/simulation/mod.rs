//=========================================================================
// Simulation
//=========================================================================
//
// Fixed-step game loop body and the context it lends to behaviors.
//
// Architecture:
//   PlatformEvent batches ──► Simulation::tick()
//                               ├─ StateTracker → InputEdgeDetector
//                               ├─ PauseController (gate)
//                               ├─ SceneStateMachine (deferred swap)
//                               ├─ CameraController
//                               └─ SceneGraph update + draw ──► Renderer
//
//=========================================================================

//=== Module Declarations =================================================

mod context;
mod simulation;

//=== Public API ==========================================================

pub use context::FrameContext;
pub use simulation::{Simulation, SCENE_TARGET};
