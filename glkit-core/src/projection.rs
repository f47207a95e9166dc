/// Orbit camera and projection utilities
use nalgebra::{Matrix4, Point3, Vector3};

use crate::control::CameraHooks;

/// Keeps the orbit away from the poles where `look_at` degenerates
const MAX_PITCH: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

/// Convert degrees to radians
pub fn to_radians(angle: f64) -> f64 {
    angle / 180.0 * std::f64::consts::PI
}

/// Projection mode for rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectionMode {
    Orthographic,
    Perspective,
}

/// Camera orbiting a target point, driven through [`CameraHooks`]
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    pub target: Point3<f32>,
    pub distance: f32,
    /// Rotation around the up axis, in radians
    pub yaw: f32,
    /// Elevation above the target's horizontal plane, in radians
    pub pitch: f32,
    pub up: Vector3<f32>,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub mode: ProjectionMode,
}

impl OrbitCamera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            target: Point3::origin(),
            distance: 5.0,
            yaw: 0.0,
            pitch: 0.0,
            up: Vector3::y(),
            fov: std::f32::consts::PI / 4.0, // 45 degrees
            aspect: width as f32 / height.max(1) as f32,
            near: 0.1,
            far: 100.0,
            mode: ProjectionMode::Perspective,
        }
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }

    /// World-space eye position
    pub fn position(&self) -> Point3<f32> {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        let offset = Vector3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw);
        self.target + offset * self.distance
    }

    /// Camera-space right and up axes expressed in world space
    fn view_axes(&self) -> (Vector3<f32>, Vector3<f32>) {
        let forward = (self.target - self.position()).normalize();
        let right = forward.cross(&self.up).normalize();
        let up = right.cross(&forward);
        (right, up)
    }

    /// Create the view matrix (camera transformation)
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position(), &self.target, &self.up)
    }

    /// Create the projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        match self.mode {
            ProjectionMode::Perspective => {
                Matrix4::new_perspective(self.aspect, self.fov, self.near, self.far)
            }
            ProjectionMode::Orthographic => {
                let height = self.distance;
                let width = height * self.aspect;
                Matrix4::new_orthographic(
                    -width / 2.0,
                    width / 2.0,
                    -height / 2.0,
                    height / 2.0,
                    self.near,
                    self.far,
                )
            }
        }
    }

    /// Project a 3D point to 2D screen space, returning `(x, y, depth)`.
    ///
    /// Points behind the camera or outside the view volume yield `None`.
    pub fn project_to_screen(
        &self,
        point: &Point3<f32>,
        model_matrix: &Matrix4<f32>,
        width: u32,
        height: u32,
    ) -> Option<(f32, f32, f32)> {
        let mvp = self.projection_matrix() * self.view_matrix() * model_matrix;
        let clip = mvp * point.to_homogeneous();

        if clip.w <= 1e-6 {
            return None;
        }

        let ndc = clip.xyz() / clip.w;
        if ndc.x.abs() > 1.0 || ndc.y.abs() > 1.0 || ndc.z.abs() > 1.0 {
            return None;
        }

        let screen_x = (ndc.x + 1.0) * 0.5 * width as f32;
        let screen_y = (1.0 - ndc.y) * 0.5 * height as f32;

        Some((screen_x, screen_y, ndc.z))
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

impl CameraHooks for OrbitCamera {
    fn on_pan(&mut self, dx: f64, dy: f64) {
        let (right, up) = self.view_axes();
        self.target += up * dy as f32 - right * dx as f32;
    }

    fn on_rotate(&mut self, dx: f64, dy: f64) {
        self.yaw -= dx as f32;
        self.pitch = (self.pitch + dy as f32).clamp(-MAX_PITCH, MAX_PITCH);
    }

    fn on_zoom(&mut self, factor: f64) {
        self.distance = (self.distance * factor as f32).clamp(self.near * 2.0, self.far / 2.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_creation() {
        let camera = OrbitCamera::new(800, 600);
        assert_eq!(camera.mode, ProjectionMode::Perspective);
        assert!((camera.aspect - 800.0 / 600.0).abs() < 1e-6);
        assert!((camera.position() - Point3::new(0.0, 0.0, 5.0)).norm() < 1e-6);
    }

    #[test]
    fn test_view_matrix() {
        let camera = OrbitCamera::new(800, 600);
        let view = camera.view_matrix();
        let eye = view.transform_point(&camera.position());
        assert!(eye.coords.norm() < 1e-5);
    }

    #[test]
    fn test_to_radians() {
        assert!((to_radians(180.0) - std::f64::consts::PI).abs() < 1e-12);
        assert!((to_radians(90.0) - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn test_rotate_orbits_at_constant_distance() {
        let mut camera = OrbitCamera::default();
        camera.on_rotate(0.5, 0.25);
        assert!((camera.yaw + 0.5).abs() < 1e-6);
        assert!((camera.pitch - 0.25).abs() < 1e-6);
        let distance = (camera.position() - camera.target).norm();
        assert!((distance - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_pitch_is_clamped() {
        let mut camera = OrbitCamera::default();
        camera.on_rotate(0.0, 10.0);
        assert_eq!(camera.pitch, MAX_PITCH);
        camera.on_rotate(0.0, -20.0);
        assert_eq!(camera.pitch, -MAX_PITCH);
    }

    #[test]
    fn test_zoom_scales_distance() {
        let mut camera = OrbitCamera::default();
        camera.on_zoom(2.0);
        assert!((camera.distance - 10.0).abs() < 1e-6);
        camera.on_zoom(0.5);
        assert!((camera.distance - 5.0).abs() < 1e-6);
        camera.on_zoom(1000.0);
        assert_eq!(camera.distance, camera.far / 2.0);
    }

    #[test]
    fn test_pan_moves_target_in_view_plane() {
        let mut camera = OrbitCamera::default();
        camera.on_pan(1.0, 0.0);
        // Looking down -Z, dragging right slides the target toward -X
        assert!((camera.target.x + 1.0).abs() < 1e-5);
        assert!(camera.target.y.abs() < 1e-5);
        assert!(camera.target.z.abs() < 1e-5);
    }

    #[test]
    fn test_target_projects_to_screen_center() {
        let camera = OrbitCamera::new(80, 40);
        let (x, y, _) = camera
            .project_to_screen(&camera.target, &Matrix4::identity(), 80, 40)
            .unwrap();
        assert!((x - 40.0).abs() < 1e-3);
        assert!((y - 20.0).abs() < 1e-3);
    }

    #[test]
    fn test_point_behind_camera_is_clipped() {
        let camera = OrbitCamera::default();
        let behind = Point3::new(0.0, 0.0, 10.0);
        assert!(camera
            .project_to_screen(&behind, &Matrix4::identity(), 800, 600)
            .is_none());
    }
}
