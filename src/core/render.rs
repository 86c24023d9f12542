//=========================================================================
// Rendering Interface
//=========================================================================
//
// Boundary between the scene graph and the external rendering backend.
//
// The core never rasterizes anything. Each root node opens a batch on its
// render target, emits one `DrawCommand` per visible drawable node, then
// closes the batch:
//
//   SceneGraph::draw() → Renderer::begin_batch → draw* → end_batch
//
// `DrawList` is a recording renderer for headless hosts and tests.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::{Affine2, Vec2};

//=== Internal Dependencies ===============================================

use crate::core::error::EngineError;
use crate::core::scene::{NodeId, NodeKind, SpriteEffects};

//=== Handles =============================================================

/// Opaque handle to a render batch / canvas owned by the backend.
///
/// Passed through to [`Renderer`] untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderTarget(pub u32);

/// Opaque texture handle resolved by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

/// Opaque font handle resolved by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontId(pub u32);

//=== Rect ================================================================

/// Axis-aligned rectangle in texture pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

//=== Color ===============================================================

/// 8-bit RGBA tint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Self = Self::rgba(255, 255, 255, 255);
    pub const BLACK: Self = Self::rgba(0, 0, 0, 255);
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

//=== DrawCommand =========================================================

/// One draw call for a single node, fully resolved to world space.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    /// Node that produced the command.
    pub node: NodeId,

    /// Node's effective transform (excludes the batch view transform).
    pub transform: Affine2,

    /// Sort key; lower values are drawn first by the backend.
    pub layer_depth: f32,

    pub tint: Color,
    pub effects: SpriteEffects,

    /// Visual payload (image, text, interactive surface).
    pub kind: NodeKind,
}

//=== Renderer ============================================================

/// Backend collaborator receiving batches and draw commands.
///
/// Any error returned is treated as a frame fault by the simulation.
pub trait Renderer {
    /// Opens a batch on `target` using `view` as the batch transform.
    fn begin_batch(&mut self, target: RenderTarget, view: Affine2) -> Result<(), EngineError>;

    /// Submits one node's draw command to the open batch.
    fn draw(&mut self, command: &DrawCommand) -> Result<(), EngineError>;

    /// Closes the batch opened on `target`.
    fn end_batch(&mut self, target: RenderTarget) -> Result<(), EngineError>;
}

//=== DrawList ============================================================

/// Entry recorded by [`DrawList`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawEvent {
    Begin { target: RenderTarget, view: Affine2 },
    Draw(DrawCommand),
    End { target: RenderTarget },
}

/// Renderer that records every call instead of drawing.
#[derive(Debug, Default)]
pub struct DrawList {
    events: Vec<DrawEvent>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns recorded events in submission order.
    pub fn events(&self) -> &[DrawEvent] {
        &self.events
    }

    /// Returns only the draw commands, in submission order.
    pub fn commands(&self) -> impl Iterator<Item = &DrawCommand> {
        self.events.iter().filter_map(|event| match event {
            DrawEvent::Draw(command) => Some(command),
            _ => None,
        })
    }

    /// Number of batches opened since the last clear.
    pub fn batch_count(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, DrawEvent::Begin { .. }))
            .count()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl Renderer for DrawList {
    fn begin_batch(&mut self, target: RenderTarget, view: Affine2) -> Result<(), EngineError> {
        self.events.push(DrawEvent::Begin { target, view });
        Ok(())
    }

    fn draw(&mut self, command: &DrawCommand) -> Result<(), EngineError> {
        self.events.push(DrawEvent::Draw(command.clone()));
        Ok(())
    }

    fn end_batch(&mut self, target: RenderTarget) -> Result<(), EngineError> {
        self.events.push(DrawEvent::End { target });
        Ok(())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_defaults_to_white() {
        assert_eq!(Color::default(), Color::WHITE);
        assert_eq!(Color::rgb(1, 2, 3).a, 255);
    }

    #[test]
    fn draw_list_records_batches_in_order() {
        let mut list = DrawList::new();
        let target = RenderTarget(7);

        list.begin_batch(target, Affine2::IDENTITY).unwrap();
        list.end_batch(target).unwrap();

        assert_eq!(list.batch_count(), 1);
        assert_eq!(list.events().len(), 2);
        assert!(matches!(list.events()[1], DrawEvent::End { target: RenderTarget(7) }));

        list.clear();
        assert!(list.events().is_empty());
    }
}
