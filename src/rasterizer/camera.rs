//! Orbit camera for the model viewport
//!
//! The camera always looks at the origin from `distance` away. Pitch and yaw
//! rotate it around the model; roll is not supported.

use super::math::{rotate_xyz, Vec3};

/// Camera state for 3D rendering
#[derive(Clone, Debug)]
pub struct Camera {
    pub position: Vec3,
    pub rotation_x: f32, // Pitch
    pub rotation_y: f32, // Yaw
    pub distance: f32,

    // Computed basis vectors (right, up, forward)
    pub basis_x: Vec3,
    pub basis_y: Vec3,
    pub basis_z: Vec3,
}

impl Camera {
    pub fn new(distance: f32) -> Self {
        let mut cam = Self {
            position: Vec3::new(0.0, 0.0, distance),
            rotation_x: 0.0,
            rotation_y: 0.0,
            distance,
            basis_x: Vec3::X,
            basis_y: Vec3::Y,
            basis_z: Vec3::new(0.0, 0.0, -1.0),
        };
        cam.update_basis();
        cam
    }

    /// Set pitch/yaw in radians and recompute the basis
    pub fn orbit(&mut self, rotation_x: f32, rotation_y: f32) {
        self.rotation_x = rotation_x;
        self.rotation_y = rotation_y;
        self.update_basis();
    }

    pub fn update_basis(&mut self) {
        let (rx, ry) = (self.rotation_x, self.rotation_y);
        self.basis_x = rotate_xyz(Vec3::X, rx, ry, 0.0);
        self.basis_y = rotate_xyz(Vec3::Y, rx, ry, 0.0);
        // Forward points from the camera toward the origin
        self.basis_z = rotate_xyz(Vec3::new(0.0, 0.0, -1.0), rx, ry, 0.0);
        self.position = self.basis_z.scale(-self.distance);
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(5.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_camera_looks_down_negative_z() {
        let cam = Camera::new(4.0);
        assert!((cam.position - Vec3::new(0.0, 0.0, 4.0)).len() < 1e-5);
        assert!((cam.basis_z - Vec3::new(0.0, 0.0, -1.0)).len() < 1e-5);
    }

    #[test]
    fn test_orbit_keeps_distance_and_target() {
        let mut cam = Camera::new(4.0);
        cam.orbit(0.4, -1.1);
        assert!((cam.position.len() - 4.0).abs() < 1e-4);
        // Origin stays straight ahead
        let to_origin = (Vec3::ZERO - cam.position).normalize();
        assert!((to_origin - cam.basis_z).len() < 1e-4);
        assert!(cam.basis_x.dot(cam.basis_y).abs() < 1e-5);
    }
}
