// Perspective projection and the camera uniform handed to the renderer

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

/// Perspective projection parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Vertical field of view in degrees
    pub fov_y_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Projection {
    pub fn new(fov_y_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            fov_y_degrees,
            aspect,
            near,
            far,
        }
    }

    /// Update the aspect ratio after a window resize
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fov_y_degrees.to_radians(),
            self.aspect,
            self.near,
            self.far,
        )
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self::new(70.0, 16.0 / 9.0, 0.1, 1000.0)
    }
}

/// Camera uniform for GPU
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    /// Eye position; w is padding
    pub eye: [f32; 4],
}

impl CameraUniform {
    /// Build from an eye position, a look-at target and a projection
    pub fn look_at(eye: Vec3, target: Vec3, projection: &Projection) -> Self {
        let view = Mat4::look_at_rh(eye, target, Vec3::Y);
        Self {
            view_proj: (projection.matrix() * view).to_cols_array_2d(),
            eye: [eye.x, eye.y, eye.z, 1.0],
        }
    }
}
