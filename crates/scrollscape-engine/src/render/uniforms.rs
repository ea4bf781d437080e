use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3, Vec4};

/// Group 0 uniform. Matches `CameraUniforms` in the prelude.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn new(view_proj: Mat4) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
        }
    }
}

/// Group 1 uniform. Matches `ObjectUniforms` in the prelude.
///
/// WGSL aligns `vec3<f32>` to 16 bytes, hence the explicit padding.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct ObjectUniform {
    pub model: [[f32; 4]; 4],
    pub time: f32,
    pub _pad0: [f32; 3],
    pub resolution: [f32; 3],
    pub _pad1: f32,
    pub mouse: [f32; 4],
}

impl ObjectUniform {
    pub fn new(model: Mat4, time: f32, resolution: Vec3, mouse: Vec4) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            time,
            _pad0: [0.0; 3],
            resolution: resolution.to_array(),
            _pad1: 0.0,
            mouse: mouse.to_array(),
        }
    }
}
