//=========================================================================
// Engine Errors
//=========================================================================
//
// Error type shared by the scene graph, scene state machine and the
// simulation tick.
//
// Two families:
//   Usage errors  → returned immediately to the caller (never ignored)
//   Frame faults  → collected by the Simulation, force pause, and are
//                   surfaced in aggregate on the next paused tick
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::scene::NodeId;

//=== EngineError =========================================================

/// Errors raised by core engine operations.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    //--- Usage Errors -----------------------------------------------------

    /// Node id does not refer to a live node.
    UnknownNode(NodeId),

    /// `detach_from_tree` called on a node that has no parent.
    AlreadyRoot(NodeId),

    /// Render target operation attempted on a child node.
    RenderTargetOnChild(NodeId),

    /// Reparenting would make a node its own ancestor.
    CyclicParent { node: NodeId, parent: NodeId },

    /// Scene change requested for a key with no registered factory.
    UnregisteredScene(String),

    //--- Frame Faults -----------------------------------------------------

    /// Scene factory failed while building the next scene.
    SceneFactory { scene: String, message: String },

    /// A node behavior hook returned an error.
    Behavior { node: NodeId, message: String },

    /// The rendering collaborator rejected a batch or draw call.
    Render(String),

    /// Faults collected during earlier ticks, surfaced together.
    FrameFaults(Vec<EngineError>),
}

impl EngineError {
    /// Convenience constructor for behavior failures.
    pub fn behavior(node: NodeId, message: impl Into<String>) -> Self {
        Self::Behavior { node, message: message.into() }
    }
}

//--- Trait Implementations -----------------------------------------------

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownNode(id) => write!(f, "Unknown scene node {:?}", id),
            Self::AlreadyRoot(id) => {
                write!(f, "Node {:?} has no parent and is already a root", id)
            }
            Self::RenderTargetOnChild(id) => {
                write!(f, "Node {:?} is a child; only roots hold a render target", id)
            }
            Self::CyclicParent { node, parent } => {
                write!(f, "Cannot parent {:?} under its own descendant {:?}", node, parent)
            }
            Self::UnregisteredScene(key) => write!(f, "Scene {} is not registered", key),
            Self::SceneFactory { scene, message } => {
                write!(f, "Failed to build scene {}: {}", scene, message)
            }
            Self::Behavior { node, message } => {
                write!(f, "Behavior of node {:?} failed: {}", node, message)
            }
            Self::Render(message) => write!(f, "Render error: {}", message),
            Self::FrameFaults(faults) => {
                write!(f, "{} fault(s) raised during previous frames", faults.len())?;
                for fault in faults {
                    write!(f, "\n  - {}", fault)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for EngineError {}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::KeyData;

    fn node(index: u64) -> NodeId {
        NodeId::from(KeyData::from_ffi(index))
    }

    #[test]
    fn engine_error_is_error_trait() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn unregistered_scene_display() {
        let err = EngineError::UnregisteredScene("Credits".into());
        assert_eq!(err.to_string(), "Scene Credits is not registered");
    }

    #[test]
    fn frame_faults_lists_each_fault() {
        let err = EngineError::FrameFaults(vec![
            EngineError::Render("batch lost".into()),
            EngineError::behavior(node(1), "boom"),
        ]);
        let text = err.to_string();

        assert!(text.starts_with("2 fault(s)"));
        assert!(text.contains("batch lost"));
        assert!(text.contains("boom"));
    }
}
