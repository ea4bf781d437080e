//! The three landing-page sections.

use std::f32::consts::FRAC_PI_4;

use anyhow::{Context, Result};
use glam::Vec3;

use scrollscape_engine::geometry::{self, MeshData};
use scrollscape_engine::render::{CameraUniform, ObjectUniform, SceneRenderer, ShaderSource};
use scrollscape_motion::{CameraRig, SceneObject, ShaderUniforms, Stage, Viewport};

const SURFACE_VERTEX: &str = include_str!("shaders/surface.vert.wgsl");
const NEBULA_FRAGMENT: &str = include_str!("shaders/nebula.frag.wgsl");
const LATTICE_FRAGMENT: &str = include_str!("shaders/lattice.frag.wgsl");
const TUNNEL_FRAGMENT: &str = include_str!("shaders/tunnel.frag.wgsl");

/// Horizontal offset of every section object from the page center.
const SIDE_OFFSET: f32 = 2.5;

struct Section {
    label: &'static str,
    /// `-1.0` places the object left of center, `1.0` right.
    side: f32,
    initial_rotation: Vec3,
    fragment: &'static str,
    uses_pointer: bool,
    mesh: fn() -> MeshData,
}

const SECTIONS: [Section; 3] = [
    Section {
        label: "nebula torus",
        side: 1.0,
        initial_rotation: Vec3::new(FRAC_PI_4, 0.0, 0.0),
        fragment: NEBULA_FRAGMENT,
        uses_pointer: false,
        mesh: torus_mesh,
    },
    Section {
        label: "lattice cube",
        side: -1.0,
        initial_rotation: Vec3::new(0.0, FRAC_PI_4, 0.0),
        fragment: LATTICE_FRAGMENT,
        uses_pointer: false,
        mesh: cube_mesh,
    },
    Section {
        label: "tunnel knot",
        side: 1.0,
        initial_rotation: Vec3::new(0.0, 0.0, FRAC_PI_4),
        fragment: TUNNEL_FRAGMENT,
        uses_pointer: true,
        mesh: knot_mesh,
    },
];

fn torus_mesh() -> MeshData {
    geometry::torus(1.2, 0.4, 32, 100)
}

fn cube_mesh() -> MeshData {
    geometry::cuboid(1.8, 1.8, 1.8)
}

fn knot_mesh() -> MeshData {
    geometry::torus_knot(1.0, 0.3, 200, 32, 2, 3)
}

pub fn section_count() -> usize {
    SECTIONS.len()
}

/// Scene values for the motion update, one object per section stacked
/// `spacing` world units apart.
pub fn build_stage(viewport: Viewport, spacing: f32) -> Stage {
    let objects = SECTIONS
        .iter()
        .enumerate()
        .map(|(index, section)| {
            let position = Vec3::new(section.side * SIDE_OFFSET, -spacing * index as f32, 0.0);

            let mut uniforms = ShaderUniforms::new(viewport);
            if section.uses_pointer {
                uniforms = uniforms.with_pointer();
            }

            SceneObject::new(section.label, position, uniforms).with_rotation(section.initial_rotation)
        })
        .collect();

    Stage::new(CameraRig::new(viewport), objects)
}

/// Validates every section's shaders and registers mesh, material and object
/// with `renderer`, in section order.
pub fn register(renderer: &mut SceneRenderer) -> Result<()> {
    for section in &SECTIONS {
        let source = ShaderSource::new(section.label, SURFACE_VERTEX, section.fragment)
            .with_context(|| format!("section `{}` has an unusable shader", section.label))?;

        let mesh = renderer.add_mesh((section.mesh)());
        let material = renderer.add_material(source);
        renderer.add_object(mesh, material)?;
    }
    Ok(())
}

/// GPU uniforms for the current stage, one per object in section order.
pub fn uniforms(stage: &Stage, out: &mut Vec<ObjectUniform>) -> CameraUniform {
    out.clear();
    out.extend(stage.objects.iter().map(|object| {
        let u = &object.uniforms;
        ObjectUniform::new(
            object.model_matrix(),
            u.time,
            u.resolution,
            u.pointer.unwrap_or_default(),
        )
    }));

    CameraUniform::new(stage.camera.view_projection())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_shaders_pass_validation() {
        for section in &SECTIONS {
            if let Err(err) = ShaderSource::new(section.label, SURFACE_VERTEX, section.fragment) {
                panic!("{err}");
            }
        }
    }

    #[test]
    fn stage_matches_the_page_layout() {
        let stage = build_stage(Viewport::new(1000.0, 800.0), 5.0);

        let positions: Vec<Vec3> = stage.objects.iter().map(|o| o.position).collect();
        assert_eq!(
            positions,
            vec![
                Vec3::new(2.5, 0.0, 0.0),
                Vec3::new(-2.5, -5.0, 0.0),
                Vec3::new(2.5, -10.0, 0.0),
            ]
        );

        assert_eq!(stage.objects[0].rotation, Vec3::new(FRAC_PI_4, 0.0, 0.0));
        assert_eq!(stage.objects[1].rotation, Vec3::new(0.0, FRAC_PI_4, 0.0));
        assert_eq!(stage.objects[2].rotation, Vec3::new(0.0, 0.0, FRAC_PI_4));
        assert_eq!(stage.camera.position, Vec3::new(0.0, 0.0, 5.0));
    }

    #[test]
    fn only_the_tunnel_reads_the_pointer() {
        let stage = build_stage(Viewport::new(800.0, 600.0), 5.0);
        let flags: Vec<bool> = stage.objects.iter().map(|o| o.uniforms.accepts_pointer()).collect();
        assert_eq!(flags, vec![false, false, true]);
    }

    #[test]
    fn registration_creates_one_object_per_section() {
        let mut renderer = SceneRenderer::new();
        register(&mut renderer).unwrap();
        assert_eq!(renderer.object_count(), section_count());
    }

    #[test]
    fn uniforms_follow_section_order() {
        let viewport = Viewport::new(800.0, 600.0);
        let stage = build_stage(viewport, 5.0);
        let mut out = Vec::new();

        let camera = uniforms(&stage, &mut out);

        assert_eq!(out.len(), 3);
        assert_eq!(out[0].resolution, [800.0, 600.0, 1.0]);
        assert_eq!(out[2].mouse, [0.0; 4]);
        assert_eq!(camera, CameraUniform::new(stage.camera.view_projection()));
    }
}
