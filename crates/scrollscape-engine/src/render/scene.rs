use std::num::NonZeroU64;

use wgpu::util::DeviceExt;

use crate::geometry::{MeshData, MeshVertex};
use crate::render::{RenderCtx, RenderTarget};

use super::material::ShaderSource;
use super::uniforms::{CameraUniform, ObjectUniform};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct MeshId(usize);

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct MaterialId(usize);

/// Position of an object in draw order; also indexes the per-frame uniform slice.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ObjectId(usize);

struct MeshSlot {
    data: MeshData,
    gpu: Option<GpuMesh>,
}

struct GpuMesh {
    vbo: wgpu::Buffer,
    ibo: wgpu::Buffer,
    index_count: u32,
}

struct MaterialSlot {
    source: ShaderSource,
    pipeline: Option<wgpu::RenderPipeline>,
}

struct ObjectSlot {
    mesh: MeshId,
    material: MaterialId,
    ubo: Option<wgpu::Buffer>,
    bind_group: Option<wgpu::BindGroup>,
}

/// Draws meshed objects with per-object shader materials.
///
/// Registration is CPU-only; GPU resources are created on the first `render`
/// and pipelines are rebuilt when the surface or depth format changes.
/// Every object gets its own uniform buffer (group 1); the camera buffer
/// (group 0) is shared.
#[derive(Default)]
pub struct SceneRenderer {
    meshes: Vec<MeshSlot>,
    materials: Vec<MaterialSlot>,
    objects: Vec<ObjectSlot>,

    pipeline_formats: Option<(wgpu::TextureFormat, wgpu::TextureFormat)>,

    camera_layout: Option<wgpu::BindGroupLayout>,
    object_layout: Option<wgpu::BindGroupLayout>,
    pipeline_layout: Option<wgpu::PipelineLayout>,

    camera_ubo: Option<wgpu::Buffer>,
    camera_bind_group: Option<wgpu::BindGroup>,

    warned_uniform_mismatch: bool,
}

impl SceneRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_mesh(&mut self, data: MeshData) -> MeshId {
        log::debug!(
            "mesh `{}`: {} vertices, {} triangles",
            data.label,
            data.vertices.len(),
            data.triangle_count()
        );
        self.meshes.push(MeshSlot { data, gpu: None });
        MeshId(self.meshes.len() - 1)
    }

    pub fn add_material(&mut self, source: ShaderSource) -> MaterialId {
        self.materials.push(MaterialSlot {
            source,
            pipeline: None,
        });
        MaterialId(self.materials.len() - 1)
    }

    /// Registers an object drawn with `mesh` and `material`.
    ///
    /// Objects draw in registration order.
    pub fn add_object(&mut self, mesh: MeshId, material: MaterialId) -> anyhow::Result<ObjectId> {
        anyhow::ensure!(mesh.0 < self.meshes.len(), "unknown mesh {mesh:?}");
        anyhow::ensure!(material.0 < self.materials.len(), "unknown material {material:?}");

        self.objects.push(ObjectSlot {
            mesh,
            material,
            ubo: None,
            bind_group: None,
        });
        Ok(ObjectId(self.objects.len() - 1))
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Uploads the frame's uniforms and draws every object into `target`.
    ///
    /// `objects[i]` feeds the object registered as `ObjectId(i)`. Surplus
    /// objects on either side are skipped (one-time debug message).
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        camera: &CameraUniform,
        objects: &[ObjectUniform],
    ) {
        if self.objects.is_empty() {
            return;
        }

        if objects.len() != self.objects.len() && !self.warned_uniform_mismatch {
            log::debug!(
                "SceneRenderer: {} objects registered, {} uniforms supplied",
                self.objects.len(),
                objects.len()
            );
            self.warned_uniform_mismatch = true;
        }

        self.ensure_layouts(ctx);
        self.ensure_meshes(ctx);
        self.ensure_pipelines(ctx);
        self.ensure_bindings(ctx);

        let Some(camera_ubo) = self.camera_ubo.as_ref() else { return };
        ctx.queue.write_buffer(camera_ubo, 0, bytemuck::bytes_of(camera));

        for (slot, uniform) in self.objects.iter().zip(objects) {
            if let Some(ubo) = slot.ubo.as_ref() {
                ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(uniform));
            }
        }

        let Some(camera_bind_group) = self.camera_bind_group.as_ref() else { return };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("scrollscape scene pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: target.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_bind_group(0, camera_bind_group, &[]);

        for slot in self.objects.iter().take(objects.len()) {
            let Some(mesh) = self.meshes[slot.mesh.0].gpu.as_ref() else { continue };
            let Some(pipeline) = self.materials[slot.material.0].pipeline.as_ref() else { continue };
            let Some(bind_group) = slot.bind_group.as_ref() else { continue };

            rpass.set_pipeline(pipeline);
            rpass.set_bind_group(1, bind_group, &[]);
            rpass.set_vertex_buffer(0, mesh.vbo.slice(..));
            rpass.set_index_buffer(mesh.ibo.slice(..), wgpu::IndexFormat::Uint32);
            rpass.draw_indexed(0..mesh.index_count, 0, 0..1);
        }
    }

    fn ensure_layouts(&mut self, ctx: &RenderCtx<'_>) {
        let formats = (ctx.surface_format, ctx.depth_format);
        if self.pipeline_formats == Some(formats) && self.pipeline_layout.is_some() {
            return;
        }

        let camera_layout = uniform_layout(ctx, "scrollscape camera bgl", camera_binding_size());
        let object_layout = uniform_layout(ctx, "scrollscape object bgl", object_binding_size());

        let pipeline_layout = ctx
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("scrollscape scene pipeline layout"),
                bind_group_layouts: &[&camera_layout, &object_layout],
                immediate_size: 0,
            });

        self.pipeline_formats = Some(formats);
        self.camera_layout = Some(camera_layout);
        self.object_layout = Some(object_layout);
        self.pipeline_layout = Some(pipeline_layout);

        // Everything below was built against the previous layouts.
        for material in &mut self.materials {
            material.pipeline = None;
        }
        for object in &mut self.objects {
            object.ubo = None;
            object.bind_group = None;
        }
        self.camera_ubo = None;
        self.camera_bind_group = None;
    }

    fn ensure_meshes(&mut self, ctx: &RenderCtx<'_>) {
        for slot in self.meshes.iter_mut().filter(|s| s.gpu.is_none()) {
            let label = slot.data.label.as_str();

            let vbo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: bytemuck::cast_slice(&slot.data.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });

            let ibo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: bytemuck::cast_slice(&slot.data.indices),
                usage: wgpu::BufferUsages::INDEX,
            });

            slot.gpu = Some(GpuMesh {
                vbo,
                ibo,
                index_count: slot.data.indices.len() as u32,
            });
        }
    }

    fn ensure_pipelines(&mut self, ctx: &RenderCtx<'_>) {
        let Some(layout) = self.pipeline_layout.as_ref() else { return };

        for material in self.materials.iter_mut().filter(|m| m.pipeline.is_none()) {
            material.pipeline = Some(create_pipeline(ctx, layout, &material.source));
        }
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        let (Some(camera_layout), Some(object_layout)) =
            (self.camera_layout.as_ref(), self.object_layout.as_ref())
        else {
            return;
        };

        if self.camera_bind_group.is_none() {
            let (ubo, bind_group) = uniform_binding(
                ctx,
                camera_layout,
                "scrollscape camera ubo",
                std::mem::size_of::<CameraUniform>(),
            );
            self.camera_ubo = Some(ubo);
            self.camera_bind_group = Some(bind_group);
        }

        for object in self.objects.iter_mut().filter(|o| o.bind_group.is_none()) {
            let (ubo, bind_group) = uniform_binding(
                ctx,
                object_layout,
                "scrollscape object ubo",
                std::mem::size_of::<ObjectUniform>(),
            );
            object.ubo = Some(ubo);
            object.bind_group = Some(bind_group);
        }
    }
}

fn camera_binding_size() -> Option<NonZeroU64> {
    NonZeroU64::new(std::mem::size_of::<CameraUniform>() as u64)
}

fn object_binding_size() -> Option<NonZeroU64> {
    NonZeroU64::new(std::mem::size_of::<ObjectUniform>() as u64)
}

fn uniform_layout(
    ctx: &RenderCtx<'_>,
    label: &str,
    min_binding_size: Option<NonZeroU64>,
) -> wgpu::BindGroupLayout {
    ctx.device
        .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some(label),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size,
                },
                count: None,
            }],
        })
}

fn uniform_binding(
    ctx: &RenderCtx<'_>,
    layout: &wgpu::BindGroupLayout,
    label: &str,
    size: usize,
) -> (wgpu::Buffer, wgpu::BindGroup) {
    let ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: size as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });

    let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: ubo.as_entire_binding(),
        }],
    });

    (ubo, bind_group)
}

fn alpha_blend() -> wgpu::BlendState {
    wgpu::BlendState {
        color: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::SrcAlpha,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
        alpha: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
    }
}

fn create_pipeline(
    ctx: &RenderCtx<'_>,
    layout: &wgpu::PipelineLayout,
    source: &ShaderSource,
) -> wgpu::RenderPipeline {
    let label = source.label();

    let vertex = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(source.vertex().into()),
    });
    let fragment = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(source.fragment().into()),
    });

    log::debug!("building pipeline for `{label}` ({:?})", ctx.surface_format);

    ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),

        vertex: wgpu::VertexState {
            module: &vertex,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers: &[MeshVertex::layout()],
        },

        fragment: Some(wgpu::FragmentState {
            module: &fragment,
            entry_point: Some("fs_main"),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: ctx.surface_format,
                blend: Some(alpha_blend()),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),

        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            // Materials are double sided.
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },

        depth_stencil: Some(wgpu::DepthStencilState {
            format: ctx.depth_format,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),

        multiview_mask: None,
        cache: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::cuboid;

    const VERTEX: &str = r#"
@vertex
fn vs_main(in: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    out.uv = in.uv;
    out.clip_position = camera.view_proj * uniforms.model * vec4<f32>(in.position, 1.0);
    return out;
}
"#;

    const FRAGMENT: &str = r#"
@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return vec4<f32>(in.uv, 0.0, 1.0);
}
"#;

    #[test]
    fn registration_hands_out_sequential_ids() {
        let mut renderer = SceneRenderer::new();
        let mesh = renderer.add_mesh(cuboid(1.0, 1.0, 1.0));
        let material = renderer.add_material(ShaderSource::new("flat", VERTEX, FRAGMENT).unwrap());

        let first = renderer.add_object(mesh, material).unwrap();
        let second = renderer.add_object(mesh, material).unwrap();

        assert_eq!(first, ObjectId(0));
        assert_eq!(second, ObjectId(1));
        assert_eq!(renderer.object_count(), 2);
    }

    #[test]
    fn foreign_handles_are_rejected() {
        let mut renderer = SceneRenderer::new();
        let mesh = renderer.add_mesh(cuboid(1.0, 1.0, 1.0));

        assert!(renderer.add_object(mesh, MaterialId(0)).is_err());
        assert!(renderer.add_object(MeshId(3), MaterialId(0)).is_err());
        assert_eq!(renderer.object_count(), 0);
    }
}
