//! Perspective camera

use crate::core::types::{Vec3, Mat4, Quat};

/// Narrowest field of view reachable by zooming in, in degrees
pub const MIN_FOV_DEGREES: f32 = 1.0;
/// Widest field of view, also the default, in degrees
pub const MAX_FOV_DEGREES: f32 = 45.0;

/// Camera with position, rotation, and projection parameters
pub struct Camera {
    /// World position
    pub position: Vec3,
    /// Rotation as quaternion
    pub rotation: Quat,
    /// Vertical field of view in degrees
    pub fov_y_degrees: f32,
    /// Aspect ratio (width / height)
    pub aspect: f32,
    /// Near clip plane
    pub near: f32,
    /// Far clip plane
    pub far: f32,
}

impl Camera {
    /// Create a new camera looking down -Z
    pub fn new(position: Vec3, fov_y_degrees: f32, aspect: f32) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
            fov_y_degrees,
            aspect,
            near: 0.1,
            far: 100.0,
        }
    }

    /// Create camera looking at a target
    pub fn look_at(position: Vec3, target: Vec3, up: Vec3) -> Self {
        let mut camera = Self::new(position, MAX_FOV_DEGREES, 16.0 / 9.0);
        camera.face(target, up);
        camera
    }

    /// Rotate in place so the camera faces `target`
    pub fn face(&mut self, target: Vec3, up: Vec3) {
        let forward = (target - self.position).normalize();
        let right = forward.cross(up).normalize();
        let up = right.cross(forward);
        self.rotation = Quat::from_mat3(&glam::Mat3::from_cols(right, up, -forward));
    }

    /// Get view matrix (world to camera space)
    pub fn view_matrix(&self) -> Mat4 {
        let rotation_matrix = Mat4::from_quat(self.rotation.conjugate());
        let translation_matrix = Mat4::from_translation(-self.position);
        rotation_matrix * translation_matrix
    }

    /// Get projection matrix (camera to clip space)
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    /// Get combined view-projection matrix
    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Get forward direction (negative Z in camera space)
    pub fn forward(&self) -> Vec3 {
        self.rotation * -Vec3::Z
    }

    /// Get right direction (positive X in camera space)
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// Get up direction (positive Y in camera space)
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    /// Set rotation from euler angles (yaw, pitch in radians)
    pub fn set_rotation_euler(&mut self, yaw: f32, pitch: f32) {
        self.rotation = Quat::from_euler(glam::EulerRot::YXZ, yaw, pitch, 0.0);
    }

    /// Yaw and pitch (radians) such that `set_rotation_euler(yaw, pitch)`
    /// reproduces the current forward direction
    pub fn yaw_pitch(&self) -> (f32, f32) {
        let f = self.forward();
        let yaw = (-f.x).atan2(-f.z);
        let pitch = f.y.clamp(-1.0, 1.0).asin();
        (yaw, pitch)
    }

    /// Narrow or widen the field of view, clamped to the zoom range
    pub fn zoom(&mut self, delta_degrees: f32) {
        self.fov_y_degrees = (self.fov_y_degrees - delta_degrees)
            .clamp(MIN_FOV_DEGREES, MAX_FOV_DEGREES);
    }

    /// Update aspect ratio (call on window resize)
    pub fn set_aspect(&mut self, width: f32, height: f32) {
        if height > 0.0 {
            self.aspect = width / height;
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.0, 5.0), MAX_FOV_DEGREES, 16.0 / 9.0)
    }
}
