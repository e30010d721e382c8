use std::ops::Range;

use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use wgpu::util::DeviceExt;

use duet_engine::render::{RenderCtx, RenderTarget};

use super::geometry::{Vertex, TRIANGLE_A, TRIANGLE_B, VERTICES};

/// Per-object draw record: shader source, label, and vertex sub-range.
///
/// The records are iterated in order every frame; each one binds its own
/// pipeline and uniform, and all of them receive the same transform payload.
pub struct DrawSpec {
    pub label: &'static str,
    pub shader: &'static str,
    pub vertices: Range<u32>,
}

pub const DRAW_SPECS: [DrawSpec; 2] = [
    DrawSpec {
        label: "triangle a",
        shader: include_str!("shaders/triangle_a.wgsl"),
        vertices: TRIANGLE_A,
    },
    DrawSpec {
        label: "triangle b",
        shader: include_str!("shaders/triangle_b.wgsl"),
        vertices: TRIANGLE_B,
    },
];

/// Two-triangle renderer over a single shared vertex buffer.
///
/// GPU resources are created lazily on first render and rebuilt if the surface
/// format or sample count changes. The vertex buffer is uploaded once and
/// never written again.
#[derive(Default)]
pub struct TriangleRenderer {
    pipeline_key: Option<(wgpu::TextureFormat, u32)>,
    objects: Vec<ObjectResources>,
    vertex_buffer: Option<wgpu::Buffer>,
}

struct ObjectResources {
    pipeline: wgpu::RenderPipeline,
    transform_ubo: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    vertices: Range<u32>,
}

impl TriangleRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draws both triangles with `transform` into `target`.
    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, transform: Mat4) {
        self.ensure_objects(ctx);
        self.ensure_vertex_buffer(ctx);

        // One payload per frame; every object receives the same bytes.
        let payload = TransformUniform::new(transform);
        for obj in &self.objects {
            ctx.queue
                .write_buffer(&obj.transform_ubo, 0, bytemuck::bytes_of(&payload));
        }

        let Some(vertex_buffer) = self.vertex_buffer.as_ref() else { return };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("duet triangle pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: target.resolve_target,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        // The shared buffer is bound once; objects differ only in pipeline,
        // bind group, and sub-range.
        rpass.set_vertex_buffer(0, vertex_buffer.slice(..));

        for obj in &self.objects {
            rpass.set_pipeline(&obj.pipeline);
            rpass.set_bind_group(0, &obj.bind_group, &[]);
            rpass.draw(obj.vertices.clone(), 0..1);
        }
    }

    fn ensure_objects(&mut self, ctx: &RenderCtx<'_>) {
        let key = (ctx.surface_format, ctx.sample_count);
        if self.pipeline_key == Some(key) && !self.objects.is_empty() {
            return;
        }

        let bind_group_layout =
            ctx.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("duet transform bgl"),
                    entries: &[wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: Some(transform_ubo_min_binding_size()),
                        },
                        count: None,
                    }],
                });

        let pipeline_layout =
            ctx.device
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("duet triangle pipeline layout"),
                    bind_group_layouts: &[&bind_group_layout],
                    immediate_size: 0,
                });

        self.objects = DRAW_SPECS
            .iter()
            .map(|spec| build_object(ctx, &bind_group_layout, &pipeline_layout, spec))
            .collect();

        self.pipeline_key = Some(key);
    }

    fn ensure_vertex_buffer(&mut self, ctx: &RenderCtx<'_>) {
        if self.vertex_buffer.is_some() {
            return;
        }

        self.vertex_buffer = Some(ctx.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("duet triangle vbo"),
                contents: bytemuck::cast_slice(&VERTICES),
                usage: wgpu::BufferUsages::VERTEX,
            },
        ));
    }
}

fn build_object(
    ctx: &RenderCtx<'_>,
    bind_group_layout: &wgpu::BindGroupLayout,
    pipeline_layout: &wgpu::PipelineLayout,
    spec: &DrawSpec,
) -> ObjectResources {
    debug_assert!(spec.vertices.end as usize <= VERTICES.len());

    let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(spec.label),
        source: wgpu::ShaderSource::Wgsl(spec.shader.into()),
    });

    let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(spec.label),
        layout: Some(pipeline_layout),

        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers: &[Vertex::layout()],
        },

        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: ctx.surface_format,
                blend: Some(source_alpha_blend()),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),

        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },

        depth_stencil: None,
        multisample: wgpu::MultisampleState {
            count: ctx.sample_count,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },

        multiview_mask: None,
        cache: None,
    });

    let transform_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(spec.label),
        size: std::mem::size_of::<TransformUniform>() as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });

    let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(spec.label),
        layout: bind_group_layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: transform_ubo.as_entire_binding(),
        }],
    });

    ObjectResources {
        pipeline,
        transform_ubo,
        bind_group,
        vertices: spec.vertices.clone(),
    }
}

/// Straight source-alpha blending. The fragment colors carry partial alpha so
/// the region where the triangles overlap blends instead of overwriting.
fn source_alpha_blend() -> wgpu::BlendState {
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

/// Per-object uniform payload holding the combined transform.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct TransformUniform {
    mvp: [[f32; 4]; 4],
}

impl TransformUniform {
    fn new(transform: Mat4) -> Self {
        Self {
            mvp: transform.to_cols_array_2d(),
        }
    }
}

/// `TransformUniform` is a mat4 (64 bytes) so its size is always non-zero.
/// Centralising this avoids `.unwrap()` at the pipeline-creation site.
fn transform_ubo_min_binding_size() -> std::num::NonZeroU64 {
    std::num::NonZeroU64::new(std::mem::size_of::<TransformUniform>() as u64)
        .expect("TransformUniform has non-zero size by construction")
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    // ── draw records ──────────────────────────────────────────────────────

    #[test]
    fn draw_specs_preserve_object_order() {
        assert_eq!(DRAW_SPECS[0].vertices, TRIANGLE_A);
        assert_eq!(DRAW_SPECS[1].vertices, TRIANGLE_B);
    }

    #[test]
    fn draw_specs_stay_inside_vertex_buffer() {
        for spec in &DRAW_SPECS {
            assert!(spec.vertices.start <= spec.vertices.end);
            assert!(
                spec.vertices.end as usize <= VERTICES.len(),
                "{} overruns the vertex buffer",
                spec.label
            );
        }
    }

    #[test]
    fn draw_specs_use_distinct_shaders() {
        assert_ne!(DRAW_SPECS[0].shader, DRAW_SPECS[1].shader);
    }

    // ── uniform payload ───────────────────────────────────────────────────

    #[test]
    fn transform_payload_is_shared_bit_identically() {
        let transform =
            Mat4::perspective_rh(1.0, 1.5, 0.1, 100.0) * Mat4::from_rotation_z(0.3);
        let a = TransformUniform::new(transform);
        let b = TransformUniform::new(transform);
        assert_eq!(bytemuck::bytes_of(&a), bytemuck::bytes_of(&b));
    }

    #[test]
    fn transform_payload_matches_column_major_layout() {
        let transform = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        let payload = TransformUniform::new(transform);
        assert_eq!(payload.mvp, transform.to_cols_array_2d());
    }

    #[test]
    fn transform_ubo_size_matches_payload() {
        assert_eq!(transform_ubo_min_binding_size().get(), 64);
    }

    // ── blend state ───────────────────────────────────────────────────────

    #[test]
    fn blend_uses_source_alpha_factors() {
        let blend = source_alpha_blend();
        assert_eq!(blend.color.src_factor, wgpu::BlendFactor::SrcAlpha);
        assert_eq!(blend.color.dst_factor, wgpu::BlendFactor::OneMinusSrcAlpha);
        assert_eq!(blend.color.operation, wgpu::BlendOperation::Add);
    }
}
