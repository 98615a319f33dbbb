// Render hand-off
//
// Drawing is owned by an external renderer. Each frame the game produces a
// `RenderFrame`: the camera uniform plus one instance per solid box in the
// scene, laid out for direct upload into GPU buffers.

mod camera;

pub use camera::{CameraUniform, Projection};

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Quat, Vec3};

/// Per-instance data for a box mesh
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct InstanceRaw {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
}

impl InstanceRaw {
    /// Unit cube scaled to `size`, rotated and translated
    pub fn cuboid(position: Vec3, rotation: Quat, size: Vec3, color: [f32; 4]) -> Self {
        Self {
            model: Mat4::from_scale_rotation_translation(size, rotation, position)
                .to_cols_array_2d(),
            color,
        }
    }
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone)]
pub struct RenderFrame {
    pub camera: CameraUniform,
    pub instances: Vec<InstanceRaw>,
}

impl RenderFrame {
    pub fn camera_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(&self.camera)
    }

    pub fn instance_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }
}
