//=========================================================================
// Scene System
//=========================================================================
//
// Scene graph, node lifecycle and deferred scene switching.
//
// Architecture:
//   SceneStateMachine
//     ├─ registry: HashMap<S, SceneDescriptor>
//     └─ active scene root ──► SceneGraph
//                                ├─ nodes (arena)
//                                └─ roots (update/draw registry)
//
// Flow (per tick):
//   SceneStateMachine::tick() → SceneGraph::update() → SceneGraph::draw()
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::error::EngineError;
use crate::core::simulation::FrameContext;

//=== Module Declarations =================================================

mod graph;
mod node;
mod requests;
mod state_machine;

//=== Public API ==========================================================

pub use graph::SceneGraph;
pub use node::{NodeId, NodeKind, NodeLink, RootBinding, SceneNode, SpriteEffects};
pub use requests::SceneRequests;
pub use state_machine::{SceneDescriptor, SceneFactory, SceneKey, SceneStateMachine};

//=== NodeBehavior Trait ==================================================

/// Per-node logic with lifecycle hooks.
///
/// While a hook runs, the behavior is detached from its node, so the hook
/// gets full mutable access to the graph (including its own node).
///
/// # Minimal Implementation
///
/// Only `update()` is required. Lifecycle hooks have default empty implementations:
///
/// ```rust
/// # use trellis::prelude::*;
/// # #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// # enum GameScene { Main }
/// # impl SceneKey for GameScene {}
/// struct Spinner;
///
/// impl NodeBehavior<GameScene> for Spinner {
///     fn update(
///         &mut self,
///         node: NodeId,
///         graph: &mut SceneGraph<GameScene>,
///         ctx: &mut FrameContext<GameScene>,
///     ) -> Result<(), EngineError> {
///         graph.node_mut(node)?.rotation += ctx.delta;
///         Ok(())
///     }
/// }
/// ```
pub trait NodeBehavior<S: SceneKey>: Send {
    /// Called once, the first time the update pass visits the node
    /// (or when the scene state machine activates a scene root).
    fn initialize(
        &mut self,
        _node: NodeId,
        _graph: &mut SceneGraph<S>,
        _ctx: &mut FrameContext<S>,
    ) -> Result<(), EngineError> {
        Ok(())
    }

    /// Called every unpaused tick, before the node's children update.
    fn update(
        &mut self,
        node: NodeId,
        graph: &mut SceneGraph<S>,
        ctx: &mut FrameContext<S>,
    ) -> Result<(), EngineError>;

    /// Called once while the node is torn down, after its children.
    fn unload(&mut self, _node: NodeId, _graph: &mut SceneGraph<S>) {}
}
