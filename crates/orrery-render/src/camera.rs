//! Perspective camera with reverse-Z projection and screen ray casting.

use crate::pipeline::CameraUniform;
use glam::{Mat3, Mat4, Quat, Vec2, Vec3};

#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,
    /// Unit quaternion; identity looks down -Z with +Y up.
    pub rotation: Quat,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    /// Width / height.
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    /// Perspective camera at the origin looking down -Z.
    pub fn perspective(fov_y_degrees: f32, aspect_ratio: f32, near: f32, far: f32) -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            fov_y: fov_y_degrees.to_radians(),
            aspect_ratio,
            near,
            far,
        }
    }

    /// Orient the camera toward `target`, keeping +Y as up.
    pub fn look_at(&mut self, target: Vec3) {
        let forward = (target - self.position).normalize_or_zero();
        if forward == Vec3::ZERO {
            return;
        }
        let right = forward.cross(Vec3::Y);
        self.rotation = if right.length_squared() < 1e-8 {
            // Looking straight up or down; any roll is acceptable.
            Quat::from_rotation_arc(Vec3::NEG_Z, forward)
        } else {
            let right = right.normalize();
            let up = right.cross(forward);
            Quat::from_mat3(&Mat3::from_cols(right, up, -forward))
        };
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, self.forward(), self.up())
    }

    /// Reverse-Z: near and far are swapped so the near plane lands on depth 1.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect_ratio, self.far, self.near)
    }

    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// Update the aspect ratio; ignored while either dimension is zero.
    pub fn set_aspect_ratio(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect_ratio = width / height;
        }
    }

    /// Ray from the camera through a point in normalized device coordinates.
    ///
    /// Returns `(origin, direction)` with a unit-length direction.
    pub fn ray_through_ndc(&self, ndc: Vec2) -> (Vec3, Vec3) {
        let inverse = self.view_projection_matrix().inverse();
        let on_near = inverse.project_point3(ndc.extend(1.0));
        let on_far = inverse.project_point3(ndc.extend(0.0));
        (self.position, (on_far - on_near).normalize())
    }

    pub fn to_uniform(&self) -> CameraUniform {
        CameraUniform {
            view_proj: self.view_projection_matrix().to_cols_array_2d(),
        }
    }
}

/// Convert a cursor position in physical pixels to normalized device
/// coordinates: x in [-1, 1] left to right, y in [-1, 1] bottom to top.
pub fn ndc_from_cursor(x: f64, y: f64, width: u32, height: u32) -> Vec2 {
    let width = f64::from(width.max(1));
    let height = f64::from(height.max(1));
    Vec2::new(
        (x / width * 2.0 - 1.0) as f32,
        (-(y / height) * 2.0 + 1.0) as f32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewer_camera() -> Camera {
        let mut camera = Camera::perspective(75.0, 16.0 / 9.0, 0.1, 1000.0);
        camera.position = Vec3::new(0.0, 0.0, 50.0);
        camera.look_at(Vec3::ZERO);
        camera
    }

    fn assert_vec_near(a: Vec3, b: Vec3) {
        assert!((a - b).length() < 1e-4, "{a:?} != {b:?}");
    }

    #[test]
    fn test_default_orientation_looks_down_neg_z() {
        let camera = Camera::perspective(75.0, 1.0, 0.1, 1000.0);
        assert_vec_near(camera.forward(), Vec3::NEG_Z);
        assert_vec_near(camera.up(), Vec3::Y);
    }

    #[test]
    fn test_look_at_origin_from_plus_z() {
        let camera = viewer_camera();
        assert_vec_near(camera.forward(), Vec3::NEG_Z);
        assert_vec_near(camera.right(), Vec3::X);
    }

    #[test]
    fn test_look_at_from_side() {
        let mut camera = Camera::perspective(75.0, 1.0, 0.1, 1000.0);
        camera.position = Vec3::new(30.0, 0.0, 0.0);
        camera.look_at(Vec3::ZERO);
        assert_vec_near(camera.forward(), Vec3::NEG_X);
        assert_vec_near(camera.up(), Vec3::Y);
    }

    #[test]
    fn test_look_at_straight_down_is_finite() {
        let mut camera = Camera::perspective(75.0, 1.0, 0.1, 1000.0);
        camera.position = Vec3::new(0.0, 40.0, 0.0);
        camera.look_at(Vec3::ZERO);
        assert_vec_near(camera.forward(), Vec3::NEG_Y);
        assert!(camera.up().is_finite());
    }

    #[test]
    fn test_fov_stored_in_radians() {
        let camera = Camera::perspective(75.0, 1.0, 0.1, 1000.0);
        assert!((camera.fov_y - 75f32.to_radians()).abs() < 1e-6);
    }

    #[test]
    fn test_reverse_z_depth_range() {
        let camera = viewer_camera();
        let vp = camera.view_projection_matrix();
        // A point on the near plane maps to depth 1, one on the far plane to 0.
        let near = vp.project_point3(Vec3::new(0.0, 0.0, 50.0 - 0.1));
        let far = vp.project_point3(Vec3::new(0.0, 0.0, 50.0 - 1000.0));
        assert!((near.z - 1.0).abs() < 1e-3, "near depth {}", near.z);
        assert!(far.z.abs() < 1e-3, "far depth {}", far.z);
    }

    #[test]
    fn test_aspect_ratio_update() {
        let mut camera = viewer_camera();
        camera.set_aspect_ratio(800.0, 600.0);
        assert!((camera.aspect_ratio - 4.0 / 3.0).abs() < 1e-6);
        camera.set_aspect_ratio(800.0, 0.0);
        assert!((camera.aspect_ratio - 4.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_center_ray_points_at_origin() {
        let camera = viewer_camera();
        let (origin, direction) = camera.ray_through_ndc(Vec2::ZERO);
        assert_vec_near(origin, Vec3::new(0.0, 0.0, 50.0));
        assert_vec_near(direction, Vec3::NEG_Z);
    }

    #[test]
    fn test_ray_hits_projected_point() {
        let camera = viewer_camera();
        let target = Vec3::new(15.0, 0.0, 0.0);
        let projected = camera.view_projection_matrix().project_point3(target);
        let (origin, direction) = camera.ray_through_ndc(projected.truncate());
        let expected = (target - origin).normalize();
        assert_vec_near(direction, expected);
    }

    #[test]
    fn test_ndc_from_cursor_corners() {
        assert_eq!(ndc_from_cursor(0.0, 0.0, 800, 600), Vec2::new(-1.0, 1.0));
        assert_eq!(ndc_from_cursor(800.0, 600.0, 800, 600), Vec2::new(1.0, -1.0));
        assert_eq!(ndc_from_cursor(400.0, 300.0, 800, 600), Vec2::ZERO);
    }

    #[test]
    fn test_ndc_from_cursor_zero_size_is_finite() {
        assert!(ndc_from_cursor(10.0, 10.0, 0, 0).is_finite());
    }

    #[test]
    fn test_uniform_matches_view_projection() {
        let camera = viewer_camera();
        let uniform = camera.to_uniform();
        assert_eq!(
            uniform.view_proj,
            camera.view_projection_matrix().to_cols_array_2d()
        );
    }
}
