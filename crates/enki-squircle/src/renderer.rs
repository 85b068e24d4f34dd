use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use enki_engine::render::{RenderCtx, RenderTarget};
use enki_scene::prelude::Underlay;

/// GPU half of the squircle item.
///
/// Owns the pipelines and buffers for the squircle background and the two
/// fixed triangles. Construction needs no device; every GPU object is
/// created lazily on the first render and rebuilt if the surface format
/// changes. Nothing beyond wgpu's own validation is checked here, so a bad
/// frame renders blank or corrupted rather than reporting an error.
#[derive(Default)]
pub struct SquircleRenderer {
    viewport: (u32, u32),
    t: f32,

    pipeline_format: Option<wgpu::TextureFormat>,
    squircle_pipeline: Option<wgpu::RenderPipeline>,
    triangle_pipeline: Option<wgpu::RenderPipeline>,

    squircle_bgl: Option<wgpu::BindGroupLayout>,
    triangle_bgl: Option<wgpu::BindGroupLayout>,

    squircle_ubo: Option<wgpu::Buffer>,
    squircle_bind_group: Option<wgpu::BindGroup>,
    orange_bind_group: Option<wgpu::BindGroup>,
    yellow_bind_group: Option<wgpu::BindGroup>,

    quad_vbo: Option<wgpu::Buffer>,
    triangle_vbo: Option<wgpu::Buffer>,
}

impl SquircleRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Viewport in physical pixels, captured by the item during sync.
    pub fn set_viewport(&mut self, size: (u32, u32)) {
        self.viewport = size;
    }

    pub fn set_t(&mut self, t: f32) {
        self.t = t;
    }

    fn ensure_pipelines(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.squircle_pipeline.is_some() {
            return;
        }

        let squircle_shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("squircle shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/squircle.wgsl").into()),
        });
        let triangle_shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("triangle shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/triangle.wgsl").into()),
        });

        let squircle_bgl = ctx
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("squircle bgl"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: uniform_binding_size::<SquircleUniform>(),
                    },
                    count: None,
                }],
            });
        let triangle_bgl = ctx
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("triangle bgl"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: uniform_binding_size::<TriangleColor>(),
                    },
                    count: None,
                }],
            });

        let squircle_layout = ctx
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("squircle pipeline layout"),
                bind_group_layouts: &[&squircle_bgl],
                immediate_size: 0,
            });
        let triangle_layout = ctx
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("triangle pipeline layout"),
                bind_group_layouts: &[&triangle_bgl],
                immediate_size: 0,
            });

        let squircle_pipeline =
            ctx.device
                .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                    label: Some("squircle pipeline"),
                    layout: Some(&squircle_layout),

                    vertex: wgpu::VertexState {
                        module: &squircle_shader,
                        entry_point: Some("vs_main"),
                        compilation_options: Default::default(),
                        buffers: &[Vertex::layout()],
                    },

                    fragment: Some(wgpu::FragmentState {
                        module: &squircle_shader,
                        entry_point: Some("fs_main"),
                        compilation_options: Default::default(),
                        targets: &[Some(wgpu::ColorTargetState {
                            format: ctx.surface_format,
                            // Additive over the pass clear color.
                            blend: Some(wgpu::BlendState {
                                color: wgpu::BlendComponent {
                                    src_factor: wgpu::BlendFactor::SrcAlpha,
                                    dst_factor: wgpu::BlendFactor::One,
                                    operation: wgpu::BlendOperation::Add,
                                },
                                alpha: wgpu::BlendComponent {
                                    src_factor: wgpu::BlendFactor::SrcAlpha,
                                    dst_factor: wgpu::BlendFactor::One,
                                    operation: wgpu::BlendOperation::Add,
                                },
                            }),
                            write_mask: wgpu::ColorWrites::ALL,
                        })],
                    }),

                    primitive: wgpu::PrimitiveState {
                        topology: wgpu::PrimitiveTopology::TriangleStrip,
                        strip_index_format: None,
                        front_face: wgpu::FrontFace::Ccw,
                        cull_mode: None,
                        polygon_mode: wgpu::PolygonMode::Fill,
                        unclipped_depth: false,
                        conservative: false,
                    },

                    depth_stencil: None,
                    multisample: wgpu::MultisampleState::default(),

                    multiview_mask: None,
                    cache: None,
                });

        let triangle_pipeline =
            ctx.device
                .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                    label: Some("triangle pipeline"),
                    layout: Some(&triangle_layout),

                    vertex: wgpu::VertexState {
                        module: &triangle_shader,
                        entry_point: Some("vs_main"),
                        compilation_options: Default::default(),
                        buffers: &[Vertex::layout()],
                    },

                    fragment: Some(wgpu::FragmentState {
                        module: &triangle_shader,
                        entry_point: Some("fs_main"),
                        compilation_options: Default::default(),
                        targets: &[Some(wgpu::ColorTargetState {
                            format: ctx.surface_format,
                            blend: None,
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
                    multisample: wgpu::MultisampleState::default(),

                    multiview_mask: None,
                    cache: None,
                });

        self.pipeline_format = Some(ctx.surface_format);
        self.squircle_pipeline = Some(squircle_pipeline);
        self.triangle_pipeline = Some(triangle_pipeline);
        self.squircle_bgl = Some(squircle_bgl);
        self.triangle_bgl = Some(triangle_bgl);

        self.squircle_ubo = None;
        self.squircle_bind_group = None;
        self.orange_bind_group = None;
        self.yellow_bind_group = None;
    }

    fn ensure_buffers(&mut self, ctx: &RenderCtx<'_>) {
        if self.quad_vbo.is_some() && self.triangle_vbo.is_some() {
            return;
        }

        self.quad_vbo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("squircle quad vbo"),
            contents: bytemuck::cast_slice(&QUAD),
            usage: wgpu::BufferUsages::VERTEX,
        }));

        self.triangle_vbo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("triangle vbo"),
            contents: bytemuck::cast_slice(&TRIANGLES),
            usage: wgpu::BufferUsages::VERTEX,
        }));
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.squircle_bind_group.is_some()
            && self.orange_bind_group.is_some()
            && self.yellow_bind_group.is_some()
        {
            return;
        }
        let Some(squircle_bgl) = self.squircle_bgl.as_ref() else { return };
        let Some(triangle_bgl) = self.triangle_bgl.as_ref() else { return };

        let squircle_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("squircle t ubo"),
            size: std::mem::size_of::<SquircleUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        self.squircle_bind_group = Some(ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("squircle bind group"),
            layout: squircle_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: squircle_ubo.as_entire_binding(),
            }],
        }));
        self.squircle_ubo = Some(squircle_ubo);

        // The triangle colors never change; the buffers are immutable and
        // kept alive by their bind groups.
        self.orange_bind_group =
            Some(color_bind_group(ctx, triangle_bgl, "triangle orange", ORANGE));
        self.yellow_bind_group =
            Some(color_bind_group(ctx, triangle_bgl, "triangle yellow", YELLOW));
    }
}

impl Underlay for SquircleRenderer {
    /// One pass: clear, squircle quad, then the two triangles.
    fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>) {
        self.ensure_pipelines(ctx);
        self.ensure_buffers(ctx);
        self.ensure_bindings(ctx);

        if let Some(ubo) = self.squircle_ubo.as_ref() {
            let u = SquircleUniform { t: self.t, _pad: [0.0; 3] };
            ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&u));
        }

        let Some(squircle_pipeline) = self.squircle_pipeline.as_ref() else { return };
        let Some(triangle_pipeline) = self.triangle_pipeline.as_ref() else { return };
        let Some(squircle_bind_group) = self.squircle_bind_group.as_ref() else { return };
        let Some(orange_bind_group) = self.orange_bind_group.as_ref() else { return };
        let Some(yellow_bind_group) = self.yellow_bind_group.as_ref() else { return };
        let Some(quad_vbo) = self.quad_vbo.as_ref() else { return };
        let Some(triangle_vbo) = self.triangle_vbo.as_ref() else { return };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("squircle pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        // Viewport size is the one captured at sync, not the live window size.
        let (w, h) = self.viewport;
        if w > 0 && h > 0 {
            rpass.set_viewport(0.0, 0.0, w as f32, h as f32, 0.0, 1.0);
        }

        rpass.set_pipeline(squircle_pipeline);
        rpass.set_bind_group(0, squircle_bind_group, &[]);
        rpass.set_vertex_buffer(0, quad_vbo.slice(..));
        rpass.draw(0..4, 0..1);

        rpass.set_pipeline(triangle_pipeline);
        rpass.set_vertex_buffer(0, triangle_vbo.slice(..));
        rpass.set_bind_group(0, orange_bind_group, &[]);
        rpass.draw(0..3, 0..1);
        rpass.set_bind_group(0, yellow_bind_group, &[]);
        rpass.draw(3..6, 0..1);
    }
}

fn color_bind_group(
    ctx: &RenderCtx<'_>,
    layout: &wgpu::BindGroupLayout,
    label: &str,
    color: [f32; 4],
) -> wgpu::BindGroup {
    let ubo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents: bytemuck::bytes_of(&TriangleColor { color }),
        usage: wgpu::BufferUsages::UNIFORM,
    });
    ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: ubo.as_entire_binding(),
        }],
    })
}

const CLEAR_COLOR: wgpu::Color = wgpu::Color { r: 0.2, g: 0.3, b: 0.3, a: 1.0 };

const ORANGE: [f32; 4] = [1.0, 0.5, 0.2, 1.0];
const YELLOW: [f32; 4] = [1.0, 1.0, 0.0, 1.0];

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct Vertex {
    pos: [f32; 2], // clip space
}

impl Vertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Full-surface strip for the squircle shader.
const QUAD: [Vertex; 4] = [
    Vertex { pos: [-1.0, -1.0] },
    Vertex { pos: [1.0, -1.0] },
    Vertex { pos: [-1.0, 1.0] },
    Vertex { pos: [1.0, 1.0] },
];

/// Both triangles in one buffer, drawn as 0..3 and 3..6.
const TRIANGLES: [Vertex; 6] = [
    Vertex { pos: [-0.9, -0.5] },
    Vertex { pos: [0.0, -0.5] },
    Vertex { pos: [-0.45, 0.5] },
    Vertex { pos: [0.0, -0.5] },
    Vertex { pos: [0.9, -0.5] },
    Vertex { pos: [0.45, 0.5] },
];

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct SquircleUniform {
    t: f32,
    _pad: [f32; 3], // 16-byte alignment
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct TriangleColor {
    color: [f32; 4],
}

/// `wgpu` minimum binding size for a uniform struct.
fn uniform_binding_size<T>() -> Option<wgpu::BufferSize> {
    wgpu::BufferSize::new(std::mem::size_of::<T>() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_renderer_holds_no_gpu_objects() {
        let r = SquircleRenderer::new();
        assert!(r.pipeline_format.is_none());
        assert!(r.squircle_pipeline.is_none());
        assert!(r.triangle_pipeline.is_none());
        assert!(r.quad_vbo.is_none());
        assert!(r.squircle_ubo.is_none());
    }

    #[test]
    fn sync_state_is_stored_for_the_next_pass() {
        let mut r = SquircleRenderer::new();
        r.set_viewport((800, 600));
        r.set_t(0.25);
        assert_eq!(r.viewport, (800, 600));
        assert_eq!(r.t, 0.25);
    }

    #[test]
    fn uniform_structs_match_the_declared_binding_sizes() {
        assert_eq!(std::mem::size_of::<SquircleUniform>(), 16);
        assert_eq!(std::mem::size_of::<TriangleColor>(), 16);
        assert_eq!(uniform_binding_size::<SquircleUniform>(), wgpu::BufferSize::new(16));
    }
}
