//=========================================================================
// Scene Node
//=========================================================================
//
// A single positionable, drawable entity in the scene graph.
//
// Nodes live in the `SceneGraph` arena and refer to each other by
// `NodeId`. Every node is exactly one of:
//
//   Root  → bound to a render target, registered in the graph's root list
//   Child → attached to a parent; inherits the root's render target
//
// Local transform, applied to a point:
//   origin offset → scale → rotate → translate by position
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::{Affine2, Vec2};

//=== Internal Dependencies ===============================================

use super::{NodeBehavior, SceneKey};
use crate::core::render::{Color, FontId, Rect, RenderTarget, TextureId};

//=== NodeId ==============================================================

slotmap::new_key_type! {
    /// Stable handle to a node in a [`SceneGraph`](super::SceneGraph).
    ///
    /// Handles of unloaded nodes are never reused for new nodes.
    pub struct NodeId;
}

//=== SpriteEffects =======================================================

/// Mirroring flags forwarded to the renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SpriteEffects {
    pub flip_horizontally: bool,
    pub flip_vertically: bool,
}

//=== NodeKind ============================================================

/// Visual payload of a node.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Groups children; draws nothing itself.
    Container,

    /// Textured quad. `source` selects a sub-rectangle of the texture.
    Image {
        texture: TextureId,
        size: Vec2,
        source: Option<Rect>,
    },

    /// Text run rendered with a backend font.
    Text { text: String, font: FontId },

    /// Pointer-sensitive surface (buttons).
    ///
    /// State is refreshed by the graph's update pass each tick.
    Interactive {
        size: Vec2,
        hovered: bool,
        pressed: bool,
        clicked: bool,
    },
}

impl NodeKind {
    /// Creates an idle interactive surface of the given size.
    pub fn interactive(size: Vec2) -> Self {
        Self::Interactive { size, hovered: false, pressed: false, clicked: false }
    }

    /// Local bounds size used for hit testing, if the kind has one.
    pub fn size(&self) -> Option<Vec2> {
        match self {
            Self::Image { source: Some(rect), .. } => Some(rect.size()),
            Self::Image { size, .. } | Self::Interactive { size, .. } => Some(*size),
            Self::Container | Self::Text { .. } => None,
        }
    }

    /// Returns `true` if the kind emits a draw command.
    pub fn is_drawable(&self) -> bool {
        !matches!(self, Self::Container)
    }

    /// Returns `true` on the tick an interactive node was clicked.
    pub fn was_clicked(&self) -> bool {
        matches!(self, Self::Interactive { clicked: true, .. })
    }
}

//=== NodeLink ============================================================

/// Root binding: the batch target and whether the camera applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RootBinding {
    pub target: RenderTarget,
    pub follows_camera: bool,
}

/// Position of a node in the tree. Exactly one variant holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeLink {
    Root(RootBinding),
    Child(NodeId),
}

//=== SceneNode ===========================================================

/// Node data stored in the graph arena.
///
/// Transform and appearance fields are public; tree links and lifecycle
/// flags are owned by the graph and only readable.
pub struct SceneNode<S: SceneKey> {
    //--- Local Transform --------------------------------------------------
    pub position: Vec2,
    /// Radians, clockwise in screen space.
    pub rotation: f32,
    pub scale: Vec2,
    pub origin: Vec2,

    //--- Appearance -------------------------------------------------------
    pub layer_depth: f32,
    pub tint: Option<Color>,
    pub effects: SpriteEffects,
    pub visible: bool,
    pub kind: NodeKind,

    //--- Tree & Lifecycle (graph-owned) ------------------------------------
    pub(super) link: NodeLink,
    pub(super) children: Vec<NodeId>,
    pub(super) initialized: bool,
    pub(super) unloading: bool,
    pub(super) last_pass: u64,
    pub(super) behavior: Option<Box<dyn NodeBehavior<S>>>,
}

impl<S: SceneKey> SceneNode<S> {
    pub(super) fn new(link: NodeLink) -> Self {
        Self {
            position: Vec2::ZERO,
            rotation: 0.0,
            scale: Vec2::ONE,
            origin: Vec2::ZERO,
            layer_depth: 0.0,
            tint: None,
            effects: SpriteEffects::default(),
            visible: true,
            kind: NodeKind::Container,
            link,
            children: Vec::new(),
            initialized: false,
            unloading: false,
            last_pass: 0,
            behavior: None,
        }
    }

    //--- Tree Queries -----------------------------------------------------

    pub fn link(&self) -> NodeLink {
        self.link
    }

    pub fn parent(&self) -> Option<NodeId> {
        match self.link {
            NodeLink::Child(parent) => Some(parent),
            NodeLink::Root(_) => None,
        }
    }

    pub fn is_root(&self) -> bool {
        matches!(self.link, NodeLink::Root(_))
    }

    /// Render target, if this node is a root.
    pub fn render_target(&self) -> Option<RenderTarget> {
        match self.link {
            NodeLink::Root(binding) => Some(binding.target),
            NodeLink::Child(_) => None,
        }
    }

    /// Children in insertion order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    //--- Lifecycle Queries ------------------------------------------------

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn is_unloading(&self) -> bool {
        self.unloading
    }

    pub fn has_behavior(&self) -> bool {
        self.behavior.is_some()
    }

    //--- Transform --------------------------------------------------------

    /// Local transform relative to the parent.
    pub fn local_transform(&self) -> Affine2 {
        Affine2::from_scale_angle_translation(self.scale, self.rotation, self.position)
            * Affine2::from_translation(self.origin)
    }
}

impl<S: SceneKey> std::fmt::Debug for SceneNode<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneNode")
            .field("position", &self.position)
            .field("rotation", &self.rotation)
            .field("scale", &self.scale)
            .field("kind", &self.kind)
            .field("link", &self.link)
            .field("children", &self.children.len())
            .field("initialized", &self.initialized)
            .field("unloading", &self.unloading)
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum TestScene {
        Main,
    }

    impl SceneKey for TestScene {}

    fn root() -> SceneNode<TestScene> {
        SceneNode::new(NodeLink::Root(RootBinding {
            target: RenderTarget(0),
            follows_camera: true,
        }))
    }

    #[test]
    fn default_node_is_identity_container() {
        let node = root();

        assert_eq!(node.local_transform(), Affine2::IDENTITY);
        assert_eq!(node.kind, NodeKind::Container);
        assert!(node.visible);
        assert!(node.is_root());
        assert_eq!(node.render_target(), Some(RenderTarget(0)));
        assert_eq!(node.parent(), None);
    }

    #[test]
    fn local_transform_applies_origin_scale_rotation_position() {
        let mut node = root();
        node.origin = Vec2::new(1.0, 0.0);
        node.scale = Vec2::splat(2.0);
        node.rotation = FRAC_PI_2;
        node.position = Vec2::new(10.0, 0.0);

        // (0,0) → origin (1,0) → scale (2,0) → rotate (0,2) → translate (10,2)
        let point = node.local_transform().transform_point2(Vec2::ZERO);

        assert!((point - Vec2::new(10.0, 2.0)).length() < 1e-5, "got {point:?}");
    }

    #[test]
    fn kind_sizes() {
        let image = NodeKind::Image {
            texture: TextureId(1),
            size: Vec2::new(64.0, 32.0),
            source: Some(Rect::new(0.0, 0.0, 16.0, 16.0)),
        };
        assert_eq!(image.size(), Some(Vec2::splat(16.0)));
        assert_eq!(NodeKind::interactive(Vec2::ONE).size(), Some(Vec2::ONE));
        assert_eq!(NodeKind::Container.size(), None);
        assert!(!NodeKind::Container.is_drawable());
    }
}
