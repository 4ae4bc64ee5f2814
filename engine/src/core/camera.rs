//! Editor camera
//!
//! A fixed-angle orbit camera looking at a target point. Zooming changes the
//! orbit distance; the position is always derived from target and distance.

use crate::config::CameraConfig;
use glam::{Mat4, Vec3};
use tracing::trace;

/// Fraction of the current distance covered by one wheel notch
const ZOOM_SPEED: f32 = 0.1;

/// Orbit camera used by the scene view
#[derive(Debug, Clone, PartialEq)]
pub struct EditorCamera {
    target: Vec3,
    position: Vec3,
    distance: f32,
    min_distance: f32,
    max_distance: f32,
    /// Unit look direction, from position towards target
    forward: Vec3,
    up: Vec3,
    /// Vertical field of view in degrees
    fov_degrees: f32,
    near_plane: f32,
    far_plane: f32,
}

impl Default for EditorCamera {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default())
    }
}

impl EditorCamera {
    pub fn from_config(config: &CameraConfig) -> Self {
        let min_distance = config.min_distance.min(config.max_distance);
        let max_distance = config.max_distance.max(config.min_distance);
        let mut camera = Self {
            target: config.target,
            position: Vec3::ZERO,
            distance: config.distance.clamp(min_distance, max_distance),
            min_distance,
            max_distance,
            forward: Vec3::new(0.0, 0.5, -1.0).normalize(),
            up: Vec3::Y,
            fov_degrees: config.fov_degrees,
            near_plane: config.near_plane,
            far_plane: config.far_plane,
        };
        camera.update_position();
        camera
    }

    /// Zoom by a wheel delta. Positive moves closer; the step scales with distance.
    pub fn zoom(&mut self, delta: f32) {
        if delta == 0.0 {
            return;
        }
        let step = self.distance * ZOOM_SPEED;
        self.distance = (self.distance - delta * step).clamp(self.min_distance, self.max_distance);
        self.update_position();
        trace!(delta, distance = self.distance, "Camera zoom");
    }

    pub fn set_distance(&mut self, distance: f32) {
        self.distance = distance.clamp(self.min_distance, self.max_distance);
        self.update_position();
    }

    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
        self.update_position();
    }

    fn update_position(&mut self) {
        self.position = self.target - self.forward * self.distance;
    }

    /// Left-handed look-at from position to target
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_lh(self.position, self.target, self.up)
    }

    /// Left-handed perspective with a [0, 1] depth range
    pub fn projection_matrix(&self, aspect_ratio: f32) -> Mat4 {
        Mat4::perspective_lh(
            self.fov_degrees.to_radians(),
            aspect_ratio,
            self.near_plane,
            self.far_plane,
        )
    }

    /// Combined clip-space transform for column vectors
    pub fn view_projection(&self, aspect_ratio: f32) -> Mat4 {
        self.projection_matrix(aspect_ratio) * self.view_matrix()
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn min_distance(&self) -> f32 {
        self.min_distance
    }

    pub fn max_distance(&self) -> f32 {
        self.max_distance
    }

    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn fov_degrees(&self) -> f32 {
        self.fov_degrees
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn assert_position_invariant(camera: &EditorCamera) {
        let expected = camera.target() - camera.forward() * camera.distance();
        assert!((camera.position() - expected).length() < EPSILON);
    }

    #[test]
    fn test_default_camera() {
        let camera = EditorCamera::default();
        assert_eq!(camera.target(), Vec3::new(0.0, 2.7, -4.0));
        assert_eq!(camera.distance(), 1.04);
        assert_eq!(camera.fov_degrees(), 60.0);
        assert!((camera.forward().length() - 1.0).abs() < EPSILON);
        assert_position_invariant(&camera);
    }

    #[test]
    fn test_zoom_in_scales_with_distance() {
        let mut camera = EditorCamera::default();
        camera.zoom(1.0);
        assert!((camera.distance() - 0.936).abs() < EPSILON);
        assert_position_invariant(&camera);

        camera.zoom(-1.0);
        assert!((camera.distance() - 0.936 * 1.1).abs() < EPSILON);
    }

    #[test]
    fn test_zero_zoom_is_noop() {
        let mut camera = EditorCamera::default();
        let before = camera.clone();
        camera.zoom(0.0);
        assert_eq!(camera, before);
    }

    #[test]
    fn test_zoom_clamps_to_range() {
        let mut camera = EditorCamera::default();
        for _ in 0..200 {
            camera.zoom(5.0);
        }
        assert_eq!(camera.distance(), camera.min_distance());

        for _ in 0..200 {
            camera.zoom(-5.0);
        }
        assert_eq!(camera.distance(), camera.max_distance());
        assert_position_invariant(&camera);
    }

    #[test]
    fn test_set_distance_and_target() {
        let mut camera = EditorCamera::default();
        camera.set_distance(1000.0);
        assert_eq!(camera.distance(), 100.0);

        camera.set_target(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(camera.target(), Vec3::new(1.0, 2.0, 3.0));
        assert_position_invariant(&camera);
    }

    #[test]
    fn test_view_matrix_maps_target_ahead() {
        let camera = EditorCamera::default();
        let view = camera.view_matrix();

        let eye = view.transform_point3(camera.position());
        assert!(eye.length() < EPSILON);

        // Left-handed: the target lies on +Z in view space
        let target = view.transform_point3(camera.target());
        assert!(target.x.abs() < EPSILON);
        assert!(target.y.abs() < EPSILON);
        assert!((target.z - camera.distance()).abs() < 1e-4);
    }

    #[test]
    fn test_projection_depth_range() {
        let camera = EditorCamera::default();
        let projection = camera.projection_matrix(16.0 / 9.0);

        let near = projection.project_point3(Vec3::new(0.0, 0.0, 0.1));
        let far = projection.project_point3(Vec3::new(0.0, 0.0, 1000.0));
        assert!(near.z.abs() < 1e-4);
        assert!((far.z - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_from_config_clamps_distance() {
        let config = CameraConfig {
            distance: 500.0,
            ..CameraConfig::default()
        };
        let camera = EditorCamera::from_config(&config);
        assert_eq!(camera.distance(), 100.0);
    }
}
