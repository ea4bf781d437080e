//! CPU mesh generation.
//!
//! Generators follow the usual parametric layouts (ring-major grids with a
//! duplicated seam column) so UVs run continuously over `[0, 1]`.

mod cuboid;
mod torus;
mod torus_knot;

use bytemuck::{Pod, Zeroable};

pub use cuboid::cuboid;
pub use torus::torus;
pub use torus_knot::torus_knot;

/// Vertex layout shared by every generated mesh.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

impl MeshVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Float32x2  // uv
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Indexed triangle list.
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    pub label: String,
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Appends the two triangles of grid cell `(a, b, c, d)`.
    ///
    /// `a`/`d` sit on the current row, `b`/`c` on the previous one.
    fn push_quad(&mut self, a: u32, b: u32, c: u32, d: u32) {
        self.indices.extend_from_slice(&[a, b, d, b, c, d]);
    }
}

#[cfg(test)]
pub(crate) fn assert_well_formed(mesh: &MeshData) {
    assert_eq!(mesh.indices.len() % 3, 0, "{}: partial triangle", mesh.label);

    let count = mesh.vertices.len() as u32;
    assert!(
        mesh.indices.iter().all(|&i| i < count),
        "{}: index out of range",
        mesh.label
    );

    for v in &mesh.vertices {
        assert!(v.position.iter().all(|c| c.is_finite()), "{}: non-finite position", mesh.label);
        assert!(
            v.uv.iter().all(|c| (0.0..=1.0).contains(c)),
            "{}: uv {:?} outside the unit square",
            mesh.label,
            v.uv
        );
    }
}
