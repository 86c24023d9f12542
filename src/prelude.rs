//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use trellis::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine core
pub use crate::engine::{Engine, EngineBuilder};
pub use crate::core::error::EngineError;
pub use crate::core::simulation::{FrameContext, Simulation, SCENE_TARGET};

// Scene system
pub use crate::core::scene::{
    NodeBehavior, NodeId, NodeKind, SceneDescriptor, SceneGraph, SceneKey, SpriteEffects,
};

// Input system
pub use crate::core::input::{Control, GamepadButton, InputEdgeDetector, KeyCode, MouseButton};

// Camera & pause
pub use crate::core::camera::{Camera2d, CameraController, CameraOptions, Viewport};
pub use crate::core::pause::PauseController;

// Rendering
pub use crate::core::render::{Color, DrawCommand, DrawList, Renderer, RenderTarget};

// Platform bridge
pub use crate::core::platform_bridge::{PlatformEvent, TickControl};

// Persistence
pub use crate::core::save::{JsonTextSerializer, ObfuscatedJsonSerializer, SaveService};
