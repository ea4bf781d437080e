use std::f32::consts::TAU;

use super::{MeshData, MeshVertex};

/// Ring torus around the Z axis.
///
/// `radius` is the distance from the center to the middle of the tube.
/// Segment counts are floored at 3.
pub fn torus(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> MeshData {
    let radial = radial_segments.max(3);
    let tubular = tubular_segments.max(3);

    let mut mesh = MeshData {
        label: "torus".to_string(),
        vertices: Vec::with_capacity(((radial + 1) * (tubular + 1)) as usize),
        indices: Vec::with_capacity((radial * tubular * 6) as usize),
    };

    for j in 0..=radial {
        let v = j as f32 / radial as f32 * TAU;
        for i in 0..=tubular {
            let u = i as f32 / tubular as f32 * TAU;
            let ring = radius + tube * v.cos();

            mesh.vertices.push(MeshVertex {
                position: [ring * u.cos(), ring * u.sin(), tube * v.sin()],
                uv: [i as f32 / tubular as f32, j as f32 / radial as f32],
            });
        }
    }

    let row = tubular + 1;
    for j in 1..=radial {
        for i in 1..=tubular {
            let a = row * j + i - 1;
            let b = row * (j - 1) + i - 1;
            let c = row * (j - 1) + i;
            let d = row * j + i;
            mesh.push_quad(a, b, c, d);
        }
    }

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::assert_well_formed;

    #[test]
    fn section_one_torus_counts() {
        let mesh = torus(1.2, 0.4, 32, 100);
        assert_eq!(mesh.vertices.len(), 33 * 101);
        assert_eq!(mesh.indices.len(), 32 * 100 * 6);
        assert_well_formed(&mesh);
    }

    #[test]
    fn vertices_stay_on_the_tube_surface() {
        let (radius, tube) = (1.2, 0.4);
        let mesh = torus(radius, tube, 16, 24);

        for v in &mesh.vertices {
            let [x, y, z] = v.position;
            let ring = (x * x + y * y).sqrt() - radius;
            let dist = (ring * ring + z * z).sqrt();
            assert!((dist - tube).abs() < 1e-4, "{dist}");
        }
    }

    #[test]
    fn degenerate_segment_counts_are_floored() {
        let mesh = torus(1.0, 0.25, 0, 1);
        assert_eq!(mesh.vertices.len(), 16);
        assert_well_formed(&mesh);
    }
}
