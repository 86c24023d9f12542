//=========================================================================
// Scene State Machine
//=========================================================================
//
// Owns the single active scene and performs deferred scene swaps.
//
// Architecture:
//   SceneStateMachine
//     ├─ registry: HashMap<S, SceneDescriptor>   (factories by key)
//     └─ active: Option<(S, NodeId)>             (current scene root)
//
// Swap order on tick() when a request is pending:
//   1. force-unload the old scene root (if any)
//   2. build the new scene through its factory
//   3. clear the pending request
//   4. initialize the new scene root
//
// Requests come from `SceneRequests` in the frame context, so a scene
// asking for a change mid-update finishes its own update and draw first.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use super::{NodeId, SceneGraph};
use crate::core::error::EngineError;
use crate::core::render::RenderTarget;
use crate::core::simulation::FrameContext;

//=== Scene Key Trait =====================================================

/// Marker trait for scene identifiers.
///
/// Scene keys uniquely identify registered scene factories.
/// Typically implemented by game-specific enums.
pub trait SceneKey: Clone + Copy + Eq + Hash + Debug + Send + 'static {}

//=== SceneDescriptor =====================================================

/// Builds a scene root in the graph, bound to the given render target.
pub type SceneFactory<S> =
    Box<dyn Fn(&mut SceneGraph<S>, RenderTarget) -> Result<NodeId, EngineError> + Send>;

/// Registration entry for one scene.
pub struct SceneDescriptor<S: SceneKey> {
    display_name: String,
    pausable: bool,
    factory: SceneFactory<S>,
}

impl<S: SceneKey> SceneDescriptor<S> {
    /// Creates a pausable scene descriptor.
    pub fn new<F>(display_name: impl Into<String>, factory: F) -> Self
    where
        F: Fn(&mut SceneGraph<S>, RenderTarget) -> Result<NodeId, EngineError> + Send + 'static,
    {
        Self {
            display_name: display_name.into(),
            pausable: true,
            factory: Box::new(factory),
        }
    }

    /// Sets whether the pause toggle is honored while this scene is active.
    pub fn pausable(mut self, pausable: bool) -> Self {
        self.pausable = pausable;
        self
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn is_pausable(&self) -> bool {
        self.pausable
    }
}

//=== SceneStateMachine ===================================================

#[derive(Debug, Clone, Copy)]
struct ActiveScene<S> {
    key: S,
    root: NodeId,
}

/// Holds the scene registry and the currently active scene.
pub struct SceneStateMachine<S: SceneKey> {
    registry: HashMap<S, SceneDescriptor<S>>,
    active: Option<ActiveScene<S>>,
    render_target: RenderTarget,
}

impl<S: SceneKey> SceneStateMachine<S> {
    //--- Construction -----------------------------------------------------

    /// Creates an empty state machine building scenes on `render_target`.
    pub fn new(render_target: RenderTarget) -> Self {
        Self {
            registry: HashMap::new(),
            active: None,
            render_target,
        }
    }

    //--- Registration -----------------------------------------------------

    /// Registers a scene factory under `key`.
    ///
    /// Registering the same key twice replaces the earlier descriptor.
    pub fn register_scene(&mut self, key: S, descriptor: SceneDescriptor<S>) {
        debug!(target: "scene", "Registered scene {:?} ({})", key, descriptor.display_name);
        if self.registry.insert(key, descriptor).is_some() {
            warn!(target: "scene", "Scene {:?} was already registered and has been replaced", key);
        }
    }

    pub fn is_registered(&self, key: S) -> bool {
        self.registry.contains_key(&key)
    }

    pub fn descriptor(&self, key: S) -> Option<&SceneDescriptor<S>> {
        self.registry.get(&key)
    }

    //--- Queries ----------------------------------------------------------

    /// Key of the active scene.
    pub fn active_scene(&self) -> Option<S> {
        self.active.map(|active| active.key)
    }

    /// Root node of the active scene.
    pub fn active_root(&self) -> Option<NodeId> {
        self.active.map(|active| active.root)
    }

    /// Display name of the active scene.
    pub fn active_display_name(&self) -> Option<&str> {
        let active = self.active?;
        self.registry.get(&active.key).map(SceneDescriptor::display_name)
    }

    pub fn render_target(&self) -> RenderTarget {
        self.render_target
    }

    //--- Tick -------------------------------------------------------------

    /// Applies a pending scene request, if any.
    ///
    /// Returns `Ok(true)` when a swap happened.
    ///
    /// # Errors
    ///
    /// - [`EngineError::UnregisteredScene`]: the request is dropped and
    ///   the active scene is left untouched.
    /// - [`EngineError::SceneFactory`]: the old scene is already gone and
    ///   no scene is active.
    pub fn tick(
        &mut self,
        graph: &mut SceneGraph<S>,
        ctx: &mut FrameContext<S>,
    ) -> Result<bool, EngineError> {
        let Some(key) = ctx.scenes.pending() else {
            return Ok(false);
        };

        let Some(descriptor) = self.registry.get(&key) else {
            ctx.scenes.clear();
            warn!(target: "scene", "Dropping request for unregistered scene {:?}", key);
            return Err(EngineError::UnregisteredScene(format!("{:?}", key)));
        };

        //--- 1. Tear down the old scene -----------------------------------
        if let Some(old) = self.active.take() {
            debug!(target: "scene", "Unloading scene {:?}", old.key);
            graph.force_unload_content(old.root);
        }

        //--- 2. Build the new scene ---------------------------------------
        let roots_before = graph.roots().to_vec();
        let built = (descriptor.factory)(graph, self.render_target).and_then(|root| {
            match graph.get(root) {
                Some(node) if node.is_root() => Ok(root),
                _ => Err(EngineError::SceneFactory {
                    scene: descriptor.display_name.clone(),
                    message: "factory did not return a root node".into(),
                }),
            }
        });

        //--- 3. Clear the pending request ---------------------------------
        ctx.scenes.clear();

        if built.is_err() {
            let partial: Vec<NodeId> = graph
                .roots()
                .iter()
                .copied()
                .filter(|root| !roots_before.contains(root))
                .collect();
            for root in partial {
                debug!(target: "scene", "Unloading partial scene root {:?}", root);
                graph.force_unload_content(root);
            }
        }

        let root = built.map_err(|err| match err {
            EngineError::SceneFactory { .. } => err,
            other => EngineError::SceneFactory {
                scene: descriptor.display_name.clone(),
                message: other.to_string(),
            },
        })?;

        self.active = Some(ActiveScene { key, root });
        ctx.pause.set_pausable(descriptor.pausable);
        info!(target: "scene", "Entered scene {:?} ({})", key, descriptor.display_name);

        //--- 4. Initialize the new scene ----------------------------------
        graph.initialize_node(root, ctx)?;
        Ok(true)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
