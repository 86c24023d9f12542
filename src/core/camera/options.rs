//=========================================================================
// Camera Options
//=========================================================================
//
// Bounds, defaults and speeds for a `Camera2d`.
//
// Speeds are expressed per millisecond of frame time:
//   movement_speed → world units per ms (before zoom scaling)
//   zoom_speed     → zoom factor per ms (also the minimum zoom step)
//   rotation_speed → radians per ms
//
// Deserializable so hosts can ship camera tuning in a config file. Every
// field is optional in the serialized form and falls back to the default.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;
use serde::{Deserialize, Serialize};

//=== Viewport ============================================================

/// Size of the area the camera projects onto, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Screen-space center of the viewport.
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width as f32 * 0.5, self.height as f32 * 0.5)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

//=== CameraOptions =======================================================

/// Constraints and tuning for a 2D camera.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraOptions {
    //--- Position ---------------------------------------------------------
    pub min_x: f32,
    pub max_x: f32,
    pub default_x: f32,
    pub min_y: f32,
    pub max_y: f32,
    pub default_y: f32,
    pub movement_speed: f32,

    //--- Zoom -------------------------------------------------------------
    pub min_zoom: f32,
    pub max_zoom: f32,
    pub default_zoom: f32,
    pub zoom_speed: f32,

    //--- Rotation ---------------------------------------------------------
    /// Radians. Values outside the range snap back to zero.
    pub min_rotation: f32,
    pub max_rotation: f32,
    pub default_rotation: f32,
    pub rotation_speed: f32,

    //--- Direction Flags --------------------------------------------------
    pub invert_vertical_movement: bool,
    pub invert_horizontal_movement: bool,
    pub reverse_rotation: bool,
    pub reverse_zoom: bool,

    /// Start centered on the viewport instead of at the default position.
    pub center_on_initialization: bool,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            min_x: -10_000.0,
            max_x: 10_000.0,
            default_x: 0.0,
            min_y: -10_000.0,
            max_y: 10_000.0,
            default_y: 0.0,
            movement_speed: 1.0,
            min_zoom: 0.01,
            max_zoom: 100.0,
            default_zoom: 1.0,
            zoom_speed: 0.01,
            min_rotation: -6.28319,
            max_rotation: 6.28319,
            default_rotation: 0.0,
            rotation_speed: 0.001,
            invert_vertical_movement: false,
            invert_horizontal_movement: false,
            reverse_rotation: false,
            reverse_zoom: false,
            center_on_initialization: true,
        }
    }
}

impl CameraOptions {
    /// Clamps a position into the configured bounds.
    pub fn clamp_position(&self, position: Vec2) -> Vec2 {
        Vec2::new(
            position.x.clamp(self.min_x, self.max_x),
            position.y.clamp(self.min_y, self.max_y),
        )
    }

    pub fn clamp_zoom(&self, zoom: f32) -> f32 {
        zoom.clamp(self.min_zoom, self.max_zoom)
    }

    /// Returns `rotation` if it lies in range, otherwise zero.
    pub fn wrap_rotation(&self, rotation: f32) -> f32 {
        if rotation < self.min_rotation || rotation > self.max_rotation {
            0.0
        } else {
            rotation
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
