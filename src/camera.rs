//! Damped orbit camera around the projected scene, steered by mouse drag.

use glam::{Mat4, Vec3};

use crate::params::{OrbitCamera, RenderConfig};

/// Orbit camera with eased yaw/pitch
pub struct CameraSystem {
    params: OrbitCamera,
    yaw: f32,
    pitch: f32,
    target_yaw: f32,
    target_pitch: f32,
    dragging: bool,
    last_cursor: Option<(f64, f64)>,
}

impl CameraSystem {
    pub fn new(params: OrbitCamera) -> Self {
        let pitch = params.pitch_rad.clamp(-params.max_pitch_rad, params.max_pitch_rad);
        Self {
            yaw: params.yaw_rad,
            pitch,
            target_yaw: params.yaw_rad,
            target_pitch: pitch,
            dragging: false,
            last_cursor: None,
            params,
        }
    }

    pub fn set_dragging(&mut self, dragging: bool) {
        self.dragging = dragging;
        if !dragging {
            self.last_cursor = None;
        }
    }

    /// Feed a cursor position (pixels); rotates the target orientation while dragging
    pub fn cursor_moved(&mut self, x: f64, y: f64) {
        if self.dragging {
            if let Some((last_x, last_y)) = self.last_cursor {
                let dx = (x - last_x) as f32;
                let dy = (y - last_y) as f32;
                self.target_yaw -= dx * self.params.drag_sensitivity;
                self.target_pitch = (self.target_pitch + dy * self.params.drag_sensitivity)
                    .clamp(-self.params.max_pitch_rad, self.params.max_pitch_rad);
            }
        }
        self.last_cursor = Some((x, y));
    }

    /// Ease the orientation toward its target (call once per frame)
    pub fn update(&mut self) {
        let k = self.params.damping.clamp(0.0, 1.0);
        self.yaw += (self.target_yaw - self.yaw) * k;
        self.pitch += (self.target_pitch - self.pitch) * k;
    }

    pub fn eye(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        self.params.distance * Vec3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), Vec3::ZERO, Vec3::Y)
    }

    /// Camera right and up vectors in world space, for billboarded points
    pub fn billboard_axes(&self) -> (Vec3, Vec3) {
        let view = self.view_matrix();
        let right = view.row(0).truncate();
        let up = view.row(1).truncate();
        (right, up)
    }

    /// Create view-projection matrix for rendering
    ///
    /// # Returns
    /// Tuple of (view_proj_matrix, camera_position)
    pub fn create_view_proj_matrix(&self, render_config: &RenderConfig) -> (Mat4, Vec3) {
        let proj = Mat4::perspective_rh(
            render_config.fov_degrees.to_radians(),
            render_config.aspect_ratio(),
            render_config.near_plane,
            render_config.far_plane,
        );

        (proj * self.view_matrix(), self.eye())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_default_eye_on_positive_z() {
        let camera = CameraSystem::new(OrbitCamera::default());
        let eye = camera.eye();
        assert_abs_diff_eq!(eye.x, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(eye.y, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(eye.z, 6.0, epsilon = 1e-6);
    }

    #[test]
    fn test_drag_only_while_pressed() {
        let mut camera = CameraSystem::new(OrbitCamera::default());
        camera.cursor_moved(0.0, 0.0);
        camera.cursor_moved(100.0, 0.0);
        for _ in 0..200 {
            camera.update();
        }
        assert_abs_diff_eq!(camera.eye().z, 6.0, epsilon = 1e-6);

        camera.set_dragging(true);
        camera.cursor_moved(100.0, 0.0);
        camera.cursor_moved(200.0, 0.0);
        camera.update();
        // Damped: first frame covers only a fraction of the 0.5 rad target
        assert!(camera.yaw < 0.0 && camera.yaw > -0.5);
        for _ in 0..500 {
            camera.update();
        }
        assert_abs_diff_eq!(camera.yaw, -0.5, epsilon = 1e-4);
    }

    #[test]
    fn test_pitch_is_clamped() {
        let mut camera = CameraSystem::new(OrbitCamera::default());
        camera.set_dragging(true);
        camera.cursor_moved(0.0, 0.0);
        camera.cursor_moved(0.0, 100_000.0);
        assert_eq!(camera.target_pitch, 1.5);
    }

    #[test]
    fn test_distance_is_preserved() {
        let mut camera = CameraSystem::new(OrbitCamera::default());
        camera.set_dragging(true);
        camera.cursor_moved(0.0, 0.0);
        camera.cursor_moved(321.0, -123.0);
        for _ in 0..50 {
            camera.update();
            assert_abs_diff_eq!(camera.eye().length(), 6.0, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_billboard_axes_are_orthonormal() {
        let mut camera = CameraSystem::new(OrbitCamera::default());
        camera.set_dragging(true);
        camera.cursor_moved(0.0, 0.0);
        camera.cursor_moved(50.0, 40.0);
        camera.update();

        let (right, up) = camera.billboard_axes();
        assert_abs_diff_eq!(right.length(), 1.0, epsilon = 1e-5);
        assert_abs_diff_eq!(up.length(), 1.0, epsilon = 1e-5);
        assert_abs_diff_eq!(right.dot(up), 0.0, epsilon = 1e-5);
        assert_abs_diff_eq!(right.dot(camera.eye()), 0.0, epsilon = 1e-4);
    }

    #[test]
    fn test_view_proj_matrix_generation() {
        let camera = CameraSystem::new(OrbitCamera::default());
        let (view_proj, eye) = camera.create_view_proj_matrix(&RenderConfig::default());

        assert_ne!(view_proj, Mat4::IDENTITY);
        assert!(eye.is_finite());

        // The origin lands in the middle of clip space
        let clip = view_proj * glam::Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert_abs_diff_eq!(clip.x / clip.w, 0.0, epsilon = 1e-5);
        assert_abs_diff_eq!(clip.y / clip.w, 0.0, epsilon = 1e-5);
    }
}
