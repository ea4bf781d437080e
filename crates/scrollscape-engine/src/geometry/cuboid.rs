use super::{MeshData, MeshVertex};

/// One face: `(u axis, v axis, normal axis, u dir, v dir, face width, face height, depth)`.
type Face = (usize, usize, usize, f32, f32, f32, f32, f32);

/// Axis-aligned box centered on the origin, four vertices per face so each
/// face carries its own `[0, 1]` UV square.
pub fn cuboid(width: f32, height: f32, depth: f32) -> MeshData {
    const X: usize = 0;
    const Y: usize = 1;
    const Z: usize = 2;

    // +x, -x, +y, -y, +z, -z
    let faces: [Face; 6] = [
        (Z, Y, X, -1.0, -1.0, depth, height, width),
        (Z, Y, X, 1.0, -1.0, depth, height, -width),
        (X, Z, Y, 1.0, 1.0, width, depth, height),
        (X, Z, Y, 1.0, -1.0, width, depth, -height),
        (X, Y, Z, 1.0, -1.0, width, height, depth),
        (X, Y, Z, -1.0, -1.0, width, height, -depth),
    ];

    let mut mesh = MeshData {
        label: "cuboid".to_string(),
        vertices: Vec::with_capacity(24),
        indices: Vec::with_capacity(36),
    };

    for (u, v, w, udir, vdir, face_w, face_h, face_d) in faces {
        let base = mesh.vertices.len() as u32;

        for iy in 0..2u32 {
            let y = iy as f32 * face_h - face_h * 0.5;
            for ix in 0..2u32 {
                let x = ix as f32 * face_w - face_w * 0.5;

                let mut position = [0.0; 3];
                position[u] = x * udir;
                position[v] = y * vdir;
                position[w] = face_d * 0.5;

                mesh.vertices.push(MeshVertex {
                    position,
                    uv: [ix as f32, 1.0 - iy as f32],
                });
            }
        }

        // 2x2 grid: a = (0,0), b = (0,1), c = (1,1), d = (1,0)
        mesh.push_quad(base, base + 2, base + 3, base + 1);
    }

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::assert_well_formed;

    #[test]
    fn cube_has_four_vertices_per_face() {
        let mesh = cuboid(1.8, 1.8, 1.8);
        assert_eq!(mesh.vertices.len(), 24);
        assert_eq!(mesh.indices.len(), 36);
        assert_eq!(mesh.triangle_count(), 12);
        assert_well_formed(&mesh);
    }

    #[test]
    fn corners_lie_on_the_half_extents() {
        let mesh = cuboid(2.0, 4.0, 6.0);
        for v in &mesh.vertices {
            let [x, y, z] = v.position;
            assert!((x.abs() - 1.0).abs() < 1e-6);
            assert!((y.abs() - 2.0).abs() < 1e-6);
            assert!((z.abs() - 3.0).abs() < 1e-6);
        }
    }

    #[test]
    fn each_face_covers_every_corner_once() {
        let mesh = cuboid(1.0, 1.0, 1.0);
        for face in mesh.vertices.chunks(4) {
            let mut uvs: Vec<_> = face.iter().map(|v| v.uv).collect();
            uvs.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
            assert_eq!(uvs, vec![[0.0, 0.0], [0.0, 1.0], [1.0, 0.0], [1.0, 1.0]]);
        }
    }
}
