//=========================================================================
// Scene Graph
//=========================================================================
//
// Arena-owned tree of scene nodes plus the registry of root nodes.
//
// Architecture:
//   SceneGraph
//     ├─ nodes: SlotMap<NodeId, SceneNode>
//     └─ roots: Vec<NodeId>       (update/draw registry, insertion order)
//
// Passes:
//   update() → per root: init (lazy) → kind logic → behavior → children
//   draw()   → per root: begin_batch → node + children → end_batch
//
// Child lists are snapshotted before every walk and every teardown, so
// nodes may reparent or unload themselves while the walk is running.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::{Affine2, Vec2};
use log::{debug, trace};
use slotmap::SlotMap;

//=== Internal Dependencies ===============================================

use super::node::{NodeId, NodeKind, NodeLink, RootBinding, SceneNode};
use super::{NodeBehavior, SceneKey};
use crate::core::error::EngineError;
use crate::core::input::{Control, MouseButton};
use crate::core::render::{Color, DrawCommand, RenderTarget, Renderer};
use crate::core::simulation::FrameContext;

//=== SceneGraph ==========================================================

/// Owns every node and the ordered list of root nodes.
pub struct SceneGraph<S: SceneKey> {
    nodes: SlotMap<NodeId, SceneNode<S>>,
    roots: Vec<NodeId>,
    /// Counter of update passes; nodes stamp it when visited.
    pass: u64,
}

impl<S: SceneKey> SceneGraph<S> {
    //--- Construction -----------------------------------------------------

    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            roots: Vec::new(),
            pass: 0,
        }
    }

    //=====================================================================
    // Node Access
    //=====================================================================

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn get(&self, id: NodeId) -> Option<&SceneNode<S>> {
        self.nodes.get(id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut SceneNode<S>> {
        self.nodes.get_mut(id)
    }

    /// Like [`get`](Self::get) but fails with [`EngineError::UnknownNode`].
    pub fn node(&self, id: NodeId) -> Result<&SceneNode<S>, EngineError> {
        self.nodes.get(id).ok_or(EngineError::UnknownNode(id))
    }

    /// Like [`get_mut`](Self::get_mut) but fails with [`EngineError::UnknownNode`].
    pub fn node_mut(&mut self, id: NodeId) -> Result<&mut SceneNode<S>, EngineError> {
        self.nodes.get_mut(id).ok_or(EngineError::UnknownNode(id))
    }

    /// Registered roots in update/draw order.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    //=====================================================================
    // Construction
    //=====================================================================

    /// Creates a root node bound to `target` and registers it.
    ///
    /// Roots follow the camera by default.
    pub fn create_root(&mut self, target: RenderTarget) -> NodeId {
        let binding = RootBinding { target, follows_camera: true };
        let id = self.nodes.insert(SceneNode::new(NodeLink::Root(binding)));
        self.roots.push(id);
        trace!(target: "scene", "Created root {:?} on {:?}", id, target);
        id
    }

    /// Creates a child node appended to `parent`'s children.
    pub fn create_child(&mut self, parent: NodeId) -> Result<NodeId, EngineError> {
        if !self.nodes.contains_key(parent) {
            return Err(EngineError::UnknownNode(parent));
        }

        let id = self.nodes.insert(SceneNode::new(NodeLink::Child(parent)));
        self.node_mut(parent)?.children.push(id);
        trace!(target: "scene", "Created child {:?} under {:?}", id, parent);
        Ok(id)
    }

    /// Attaches per-node logic, replacing any previous behavior.
    pub fn set_behavior<B>(&mut self, id: NodeId, behavior: B) -> Result<(), EngineError>
    where
        B: NodeBehavior<S> + 'static,
    {
        self.node_mut(id)?.behavior = Some(Box::new(behavior));
        Ok(())
    }

    //=====================================================================
    // Tree Mutation
    //=====================================================================

    /// Removes `id` from its parent and makes it a root bound to `target`.
    ///
    /// # Errors
    ///
    /// [`EngineError::AlreadyRoot`] if the node has no parent.
    pub fn detach_from_tree(&mut self, id: NodeId, target: RenderTarget) -> Result<(), EngineError> {
        let parent = match self.node(id)?.link {
            NodeLink::Child(parent) => parent,
            NodeLink::Root(_) => return Err(EngineError::AlreadyRoot(id)),
        };

        self.remove_from_children(parent, id);
        self.node_mut(id)?.link = NodeLink::Root(RootBinding { target, follows_camera: true });
        self.roots.push(id);

        debug!(target: "scene", "Detached {:?} from {:?} as new root", id, parent);
        Ok(())
    }

    /// Moves `id` under `parent`.
    ///
    /// A root is deregistered and loses its render target; a child leaves
    /// its old parent. The node is appended to `parent`'s children.
    ///
    /// # Errors
    ///
    /// [`EngineError::CyclicParent`] if `parent` is `id` or one of its
    /// descendants.
    pub fn set_parent(&mut self, id: NodeId, parent: NodeId) -> Result<(), EngineError> {
        let link = self.node(id)?.link;
        if !self.nodes.contains_key(parent) {
            return Err(EngineError::UnknownNode(parent));
        }
        if self.is_ancestor_or_self(id, parent) {
            return Err(EngineError::CyclicParent { node: id, parent });
        }

        match link {
            NodeLink::Root(_) => self.roots.retain(|root| *root != id),
            NodeLink::Child(old_parent) => self.remove_from_children(old_parent, id),
        }

        self.node_mut(id)?.link = NodeLink::Child(parent);
        self.node_mut(parent)?.children.push(id);

        debug!(target: "scene", "Reparented {:?} under {:?}", id, parent);
        Ok(())
    }

    /// Rebinds a root to a new render target.
    ///
    /// # Errors
    ///
    /// [`EngineError::RenderTargetOnChild`] if the node is a child.
    pub fn set_render_target(&mut self, id: NodeId, target: RenderTarget) -> Result<(), EngineError> {
        match &mut self.node_mut(id)?.link {
            NodeLink::Root(binding) => {
                binding.target = target;
                Ok(())
            }
            NodeLink::Child(_) => Err(EngineError::RenderTargetOnChild(id)),
        }
    }

    /// Chooses whether a root's batch uses the camera view.
    pub fn set_follows_camera(&mut self, id: NodeId, follows: bool) -> Result<(), EngineError> {
        match &mut self.node_mut(id)?.link {
            NodeLink::Root(binding) => {
                binding.follows_camera = follows;
                Ok(())
            }
            NodeLink::Child(_) => Err(EngineError::RenderTargetOnChild(id)),
        }
    }

    //=====================================================================
    // Teardown
    //=====================================================================

    /// Unloads `id` and its whole subtree, removing them from the arena.
    ///
    /// Deregisters the node if it is a root and detaches it from its
    /// parent. Calling it again (or on an already removed id) is a no-op.
    pub fn force_unload_content(&mut self, id: NodeId) {
        let Some(node) = self.nodes.get_mut(id) else { return };
        if node.unloading {
            return;
        }
        node.unloading = true;

        let link = node.link;
        let children = node.children.clone();

        match link {
            NodeLink::Root(_) => self.roots.retain(|root| *root != id),
            NodeLink::Child(parent) => self.remove_from_children(parent, id),
        }

        for child in children {
            self.force_unload_content(child);
        }

        if let Some(mut behavior) = self.nodes.get_mut(id).and_then(|n| n.behavior.take()) {
            behavior.unload(id, self);
        }

        // Children attached by the unload hook itself
        let late_children = self.nodes.get(id).map(|n| n.children.clone()).unwrap_or_default();
        for child in late_children {
            self.force_unload_content(child);
        }

        self.nodes.remove(id);
        trace!(target: "scene", "Unloaded {:?}", id);
    }

    //=====================================================================
    // Transform Queries
    //=====================================================================

    /// Local transform composed with every ancestor's, up to the root.
    pub fn effective_transform(&self, id: NodeId) -> Result<Affine2, EngineError> {
        let node = self.node(id)?;
        let local = node.local_transform();
        match node.link {
            NodeLink::Child(parent) => Ok(self.effective_transform(parent)? * local),
            NodeLink::Root(_) => Ok(local),
        }
    }

    /// Effective transform followed by the view of the node's root batch.
    ///
    /// `camera_view` only applies if the root follows the camera.
    pub fn screen_transform(&self, id: NodeId, camera_view: Affine2) -> Result<Affine2, EngineError> {
        let effective = self.effective_transform(id)?;
        let root = self.root_of(id)?;
        match self.node(root)?.link {
            NodeLink::Root(RootBinding { follows_camera: true, .. }) => Ok(camera_view * effective),
            _ => Ok(effective),
        }
    }

    /// World-space position of the node's local origin point.
    pub fn world_position(&self, id: NodeId) -> Result<Vec2, EngineError> {
        Ok(self.effective_transform(id)?.translation)
    }

    /// Topmost ancestor of `id` (itself if it is a root).
    pub fn root_of(&self, id: NodeId) -> Result<NodeId, EngineError> {
        let mut current = id;
        while let NodeLink::Child(parent) = self.node(current)?.link {
            current = parent;
        }
        Ok(current)
    }

    /// Hit test of a screen point against the node's local bounds.
    ///
    /// Kinds without a size never contain a point. Edges are exclusive.
    pub fn contains_point(
        &self,
        id: NodeId,
        point: Vec2,
        camera_view: Affine2,
    ) -> Result<bool, EngineError> {
        let Some(size) = self.node(id)?.kind.size() else {
            return Ok(false);
        };

        let local = self.screen_transform(id, camera_view)?.inverse().transform_point2(point);
        Ok(local.x > 0.0 && local.y > 0.0 && local.x < size.x && local.y < size.y)
    }

    /// Returns `true` if `ancestor` is `id` or one of its ancestors.
    pub fn is_ancestor_or_self(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node_id) = current {
            if node_id == ancestor {
                return true;
            }
            current = self.nodes.get(node_id).and_then(|n| n.parent());
        }
        false
    }

    //=====================================================================
    // Update Pass
    //=====================================================================

    /// Runs the node's initialize hook once. Later calls are no-ops.
    pub fn initialize_node(
        &mut self,
        id: NodeId,
        ctx: &mut FrameContext<S>,
    ) -> Result<(), EngineError> {
        let node = self.node_mut(id)?;
        if node.initialized || node.unloading {
            return Ok(());
        }
        node.initialized = true;

        trace!(target: "scene", "Initializing {:?}", id);
        self.with_behavior(id, |behavior, graph| behavior.initialize(id, graph, ctx))
    }

    /// Updates every registered root and its subtree, parent first.
    ///
    /// Each node is updated at most once per pass, even if it is
    /// reparented under a node that has not been visited yet.
    pub fn update(&mut self, ctx: &mut FrameContext<S>) -> Result<(), EngineError> {
        self.pass += 1;
        let roots = self.roots.clone();
        for root in roots {
            self.update_node(root, ctx)?;
        }
        Ok(())
    }

    fn update_node(&mut self, id: NodeId, ctx: &mut FrameContext<S>) -> Result<(), EngineError> {
        let pass = self.pass;
        match self.nodes.get_mut(id) {
            Some(node) if node.last_pass != pass => node.last_pass = pass,
            _ => return Ok(()),
        }

        self.initialize_node(id, ctx)?;
        self.update_kind(id, ctx)?;
        self.with_behavior(id, |behavior, graph| behavior.update(id, graph, ctx))?;

        let children = match self.nodes.get(id) {
            Some(node) => node.children.clone(),
            None => return Ok(()),
        };
        for child in children {
            self.update_node(child, ctx)?;
        }
        Ok(())
    }

    /// Built-in per-kind logic (pointer tracking for interactive nodes).
    fn update_kind(&mut self, id: NodeId, ctx: &FrameContext<S>) -> Result<(), EngineError> {
        if !matches!(self.node(id)?.kind, NodeKind::Interactive { .. }) {
            return Ok(());
        }

        let view = ctx.camera.camera().transform();
        let inside = self.contains_point(id, ctx.input.pointer_position(), view)?;
        let left = [Control::Mouse(MouseButton::Left)];
        let went_down = ctx.input.is_pressed(&left);
        let went_up = ctx.input.is_released(&left);

        if let NodeKind::Interactive { hovered, pressed, clicked, .. } = &mut self.node_mut(id)?.kind {
            *hovered = inside;
            *clicked = false;
            if !inside {
                *pressed = false;
            } else if went_down {
                *pressed = true;
            } else if went_up {
                *clicked = *pressed;
                *pressed = false;
            }
        }
        Ok(())
    }

    /// Takes the node's behavior out for the call and puts it back.
    ///
    /// If the call removed the node, the behavior's unload hook runs.
    fn with_behavior<F>(&mut self, id: NodeId, call: F) -> Result<(), EngineError>
    where
        F: FnOnce(&mut Box<dyn NodeBehavior<S>>, &mut Self) -> Result<(), EngineError>,
    {
        let Some(mut behavior) = self.nodes.get_mut(id).and_then(|n| n.behavior.take()) else {
            return Ok(());
        };

        let result = call(&mut behavior, self);

        match self.nodes.get_mut(id) {
            Some(node) if node.behavior.is_none() => node.behavior = Some(behavior),
            Some(_) => {}
            None => behavior.unload(id, self),
        }
        result
    }

    //=====================================================================
    // Draw Pass
    //=====================================================================

    /// Emits one batch per visible root and one command per visible
    /// drawable node, children in insertion order.
    pub fn draw(&self, camera_view: Affine2, renderer: &mut dyn Renderer) -> Result<(), EngineError> {
        for &root in &self.roots {
            let Some(node) = self.nodes.get(root) else { continue };
            let NodeLink::Root(binding) = node.link else { continue };
            if !node.visible {
                continue;
            }

            let view = if binding.follows_camera { camera_view } else { Affine2::IDENTITY };
            renderer.begin_batch(binding.target, view)?;
            let drawn = self.draw_node(root, Affine2::IDENTITY, renderer);
            renderer.end_batch(binding.target)?;
            drawn?;
        }
        Ok(())
    }

    fn draw_node(
        &self,
        id: NodeId,
        parent_transform: Affine2,
        renderer: &mut dyn Renderer,
    ) -> Result<(), EngineError> {
        let Some(node) = self.nodes.get(id) else { return Ok(()) };
        if !node.visible {
            return Ok(());
        }

        let transform = parent_transform * node.local_transform();
        if node.kind.is_drawable() {
            renderer.draw(&DrawCommand {
                node: id,
                transform,
                layer_depth: node.layer_depth,
                tint: node.tint.unwrap_or(Color::WHITE),
                effects: node.effects,
                kind: node.kind.clone(),
            })?;
        }

        for &child in &node.children {
            self.draw_node(child, transform, renderer)?;
        }
        Ok(())
    }

    //--- Internal Helpers -------------------------------------------------

    fn remove_from_children(&mut self, parent: NodeId, id: NodeId) {
        if let Some(parent) = self.nodes.get_mut(parent) {
            parent.children.retain(|child| *child != id);
        }
    }
}

impl<S: SceneKey> Default for SceneGraph<S> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
