use std::f32::consts::TAU;

use glam::Vec3;

use super::{MeshData, MeshVertex};

/// `(p, q)` torus knot swept by a circular tube.
///
/// The curve winds `p` times around the axis of rotational symmetry and `q`
/// times around the interior circle. The tube frame is built from the curve
/// tangent and a finite-difference second point.
pub fn torus_knot(
    radius: f32,
    tube: f32,
    tubular_segments: u32,
    radial_segments: u32,
    p: u32,
    q: u32,
) -> MeshData {
    let tubular = tubular_segments.max(3);
    let radial = radial_segments.max(3);
    let p = p.max(1) as f32;
    let q = q as f32;

    let mut mesh = MeshData {
        label: "torus_knot".to_string(),
        vertices: Vec::with_capacity(((tubular + 1) * (radial + 1)) as usize),
        indices: Vec::with_capacity((tubular * radial * 6) as usize),
    };

    for i in 0..=tubular {
        let u = i as f32 / tubular as f32 * p * TAU;

        let p1 = curve_point(u, p, q, radius);
        let p2 = curve_point(u + 0.01, p, q, radius);

        let tangent = p2 - p1;
        let binormal = tangent.cross(p2 + p1).normalize_or_zero();
        let normal = binormal.cross(tangent).normalize_or_zero();

        for j in 0..=radial {
            let v = j as f32 / radial as f32 * TAU;
            let cx = -tube * v.cos();
            let cy = tube * v.sin();

            let position = p1 + normal * cx + binormal * cy;

            mesh.vertices.push(MeshVertex {
                position: position.to_array(),
                uv: [i as f32 / tubular as f32, j as f32 / radial as f32],
            });
        }
    }

    let row = radial + 1;
    for j in 1..=tubular {
        for i in 1..=radial {
            let a = row * (j - 1) + (i - 1);
            let b = row * j + (i - 1);
            let c = row * j + i;
            let d = row * (j - 1) + i;
            mesh.push_quad(a, b, c, d);
        }
    }

    mesh
}

fn curve_point(u: f32, p: f32, q: f32, radius: f32) -> Vec3 {
    let q_over_p = q / p * u;
    let cs = q_over_p.cos();

    Vec3::new(
        radius * (2.0 + cs) * 0.5 * u.cos(),
        radius * (2.0 + cs) * 0.5 * u.sin(),
        radius * q_over_p.sin() * 0.5,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::assert_well_formed;

    #[test]
    fn trefoil_counts() {
        let mesh = torus_knot(1.0, 0.3, 200, 32, 2, 3);
        assert_eq!(mesh.vertices.len(), 201 * 33);
        assert_eq!(mesh.indices.len(), 200 * 32 * 6);
        assert_well_formed(&mesh);
    }

    #[test]
    fn curve_closes_after_p_turns() {
        let (p, q) = (2.0, 3.0);
        let start = curve_point(0.0, p, q, 1.0);
        let end = curve_point(p * TAU, p, q, 1.0);
        assert!(start.distance(end) < 1e-4);
    }

    #[test]
    fn vertices_stay_within_the_tube_reach() {
        let (radius, tube) = (1.0, 0.3);
        let mesh = torus_knot(radius, tube, 64, 8, 2, 3);

        // The curve reaches at most 1.5 * radius from the origin.
        let limit = 1.5 * radius + tube + 1e-3;
        for v in &mesh.vertices {
            assert!(Vec3::from_array(v.position).length() <= limit);
        }
    }
}
