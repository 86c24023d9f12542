//=========================================================================
// Camera2d
//=========================================================================
//
// Constrained 2D camera pose and its screen-space transform.
//
// Transform, applied to a world point:
//   translate by -position → rotate → zoom → translate to viewport center
//
// A camera centered on the viewport with zoom 1 and rotation 0 maps
// world coordinates to identical screen coordinates.
//
// Clamping rules:
//   position → clamped per axis into [min, max]
//   zoom     → clamped into [min_zoom, max_zoom]
//   rotation → outside [min_rotation, max_rotation] resets to 0
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::{Affine2, Vec2};

//=== Internal Dependencies ===============================================

use super::options::{CameraOptions, Viewport};

//=== Camera2d ============================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Camera2d {
    options: CameraOptions,
    viewport: Viewport,
    position: Vec2,
    zoom: f32,
    rotation: f32,
}

impl Camera2d {
    pub fn new(viewport: Viewport, options: CameraOptions) -> Self {
        let mut camera = Self {
            position: Vec2::ZERO,
            zoom: 1.0,
            rotation: 0.0,
            options,
            viewport,
        };
        camera.apply_defaults();
        camera
    }

    //--- Accessors --------------------------------------------------------

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Radians.
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn options(&self) -> &CameraOptions {
        &self.options
    }

    //=====================================================================
    // Position
    //=====================================================================

    /// Offsets the position by a world-space delta.
    ///
    /// Inverted axes negate their component of the delta.
    pub fn move_by(&mut self, dx: f32, dy: f32) {
        let dx = if self.options.invert_horizontal_movement { -dx } else { dx };
        let dy = if self.options.invert_vertical_movement { -dy } else { dy };
        self.set_position(self.position + Vec2::new(dx, dy));
    }

    /// Moves by a screen-space delta, scaled down by the current zoom.
    pub fn pan(&mut self, dx: f32, dy: f32) {
        self.move_by(dx / self.zoom, dy / self.zoom);
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = self.options.clamp_position(position);
    }

    //=====================================================================
    // Zoom
    //=====================================================================

    /// Sets the zoom, negated first when zoom is reversed.
    pub fn set_zoom(&mut self, zoom: f32) {
        let zoom = if self.options.reverse_zoom { -zoom } else { zoom };
        self.zoom = self.options.clamp_zoom(zoom);
    }

    /// Adds `delta` to the zoom, subtracting it when zoom is reversed.
    pub fn zoom_by(&mut self, delta: f32) {
        let delta = if self.options.reverse_zoom { -delta } else { delta };
        self.zoom = self.options.clamp_zoom(self.zoom + delta);
    }

    //=====================================================================
    // Rotation
    //=====================================================================

    /// Sets the rotation, negated first when rotation is reversed.
    ///
    /// Out-of-range results reset to zero instead of clamping.
    pub fn set_rotation(&mut self, rotation: f32) {
        let rotation = if self.options.reverse_rotation { -rotation } else { rotation };
        self.rotation = self.options.wrap_rotation(rotation);
    }

    pub fn rotate_by(&mut self, delta: f32) {
        let delta = if self.options.reverse_rotation { -delta } else { delta };
        self.rotation = self.options.wrap_rotation(self.rotation + delta);
    }

    //=====================================================================
    // Reset & Viewport
    //=====================================================================

    /// Centers on the viewport with zoom 1 and no rotation.
    pub fn reset(&mut self) {
        self.center();
        self.rotation = 0.0;
        self.zoom = self.options.clamp_zoom(1.0);
    }

    /// Restores the configured defaults.
    pub fn full_reset(&mut self) {
        self.apply_defaults();
    }

    /// Updates the projection size. The position is kept.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    //=====================================================================
    // Transform
    //=====================================================================

    /// World → screen transform.
    pub fn transform(&self) -> Affine2 {
        Affine2::from_translation(self.viewport.center())
            * Affine2::from_scale(Vec2::splat(self.zoom))
            * Affine2::from_angle(self.rotation)
            * Affine2::from_translation(-self.position)
    }

    /// Screen → world, for pointer picking.
    pub fn screen_to_world(&self, point: Vec2) -> Vec2 {
        self.transform().inverse().transform_point2(point)
    }

    //--- Internal ---------------------------------------------------------

    fn center(&mut self) {
        self.set_position(self.viewport.center());
    }

    fn apply_defaults(&mut self) {
        let options = &self.options;
        self.position =
            options.clamp_position(Vec2::new(options.default_x, options.default_y));
        self.zoom = options.clamp_zoom(options.default_zoom);
        self.rotation = options.wrap_rotation(options.default_rotation);
        if options.center_on_initialization {
            self.center();
        }
    }
}

impl Default for Camera2d {
    fn default() -> Self {
        Self::new(Viewport::default(), CameraOptions::default())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-3
    }

    fn uncentered(options: CameraOptions) -> Camera2d {
        Camera2d::new(
            Viewport::new(800, 600),
            CameraOptions { center_on_initialization: false, ..options },
        )
    }

    //=====================================================================
    // Construction
    //=====================================================================

    #[test]
    fn centered_camera_is_identity() {
        let camera = Camera2d::new(Viewport::new(800, 600), CameraOptions::default());

        assert_eq!(camera.position(), Vec2::new(400.0, 300.0));
        let p = camera.transform().transform_point2(Vec2::new(12.0, 34.0));
        assert!(approx(p, Vec2::new(12.0, 34.0)), "got {p:?}");
    }

    #[test]
    fn defaults_used_when_not_centering() {
        let camera = uncentered(CameraOptions {
            default_x: 5.0,
            default_y: -5.0,
            default_zoom: 2.0,
            ..CameraOptions::default()
        });

        assert_eq!(camera.position(), Vec2::new(5.0, -5.0));
        assert_eq!(camera.zoom(), 2.0);
    }

    //=====================================================================
    // Clamping
    //=====================================================================

    #[test]
    fn zoom_below_minimum_yields_minimum() {
        let mut camera = Camera2d::default();
        camera.set_zoom(0.0001);
        assert_eq!(camera.zoom(), 0.01);

        camera.set_zoom(1000.0);
        assert_eq!(camera.zoom(), 100.0);
    }

    #[test]
    fn rotation_outside_range_resets_to_zero() {
        let mut camera = Camera2d::default();
        camera.set_rotation(1.0);
        assert_eq!(camera.rotation(), 1.0);

        camera.set_rotation(7.0);
        assert_eq!(camera.rotation(), 0.0, "snaps to zero, not to the boundary");

        camera.set_rotation(6.0);
        camera.rotate_by(0.5);
        assert_eq!(camera.rotation(), 0.0);
    }

    #[test]
    fn position_clamped_per_axis() {
        let mut camera = uncentered(CameraOptions {
            min_x: -10.0,
            max_x: 10.0,
            min_y: -20.0,
            max_y: 20.0,
            ..CameraOptions::default()
        });

        camera.move_by(50.0, -50.0);
        assert_eq!(camera.position(), Vec2::new(10.0, -20.0));
    }

    //=====================================================================
    // Direction Flags
    //=====================================================================

    #[test]
    fn inverted_axes_negate_move_delta() {
        let mut camera = uncentered(CameraOptions {
            invert_horizontal_movement: true,
            ..CameraOptions::default()
        });

        camera.move_by(3.0, 4.0);
        assert_eq!(camera.position(), Vec2::new(-3.0, 4.0));
    }

    #[test]
    fn reverse_zoom_negates_before_clamping() {
        let mut camera = Camera2d::new(
            Viewport::default(),
            CameraOptions { reverse_zoom: true, ..CameraOptions::default() },
        );

        camera.set_zoom(2.0);
        assert_eq!(camera.zoom(), 0.01);

        camera.set_zoom(-2.0);
        assert_eq!(camera.zoom(), 2.0);
    }

    #[test]
    fn reset_ignores_reverse_flags() {
        let mut camera = Camera2d::new(
            Viewport::default(),
            CameraOptions { reverse_zoom: true, reverse_rotation: true, ..CameraOptions::default() },
        );
        camera.set_zoom(-3.0);
        camera.move_by(100.0, 100.0);

        camera.reset();

        assert_eq!(camera.zoom(), 1.0);
        assert_eq!(camera.rotation(), 0.0);
        assert_eq!(camera.position(), Vec2::new(400.0, 300.0));
    }

    //=====================================================================
    // Pan & Transform
    //=====================================================================

    #[test]
    fn pan_scales_by_zoom() {
        let mut camera = uncentered(CameraOptions::default());
        camera.set_zoom(2.0);
        camera.pan(10.0, 0.0);

        assert_eq!(camera.position(), Vec2::new(5.0, 0.0));
    }

    #[test]
    fn camera_position_maps_to_viewport_center() {
        let mut camera = Camera2d::default();
        camera.set_position(Vec2::new(1000.0, 1000.0));
        camera.set_zoom(3.0);
        camera.set_rotation(0.7);

        let p = camera.transform().transform_point2(Vec2::new(1000.0, 1000.0));
        assert!(approx(p, Vec2::new(400.0, 300.0)), "got {p:?}");

        let world = camera.screen_to_world(Vec2::new(400.0, 300.0));
        assert!(approx(world, Vec2::new(1000.0, 1000.0)));
    }

    #[test]
    fn full_reset_restores_defaults() {
        let mut camera = Camera2d::default();
        camera.set_zoom(5.0);
        camera.set_rotation(2.0);
        camera.set_viewport(Viewport::new(1024, 768));

        camera.full_reset();

        assert_eq!(camera.zoom(), 1.0);
        assert_eq!(camera.rotation(), 0.0);
        assert_eq!(camera.position(), Vec2::new(512.0, 384.0));
    }
}
