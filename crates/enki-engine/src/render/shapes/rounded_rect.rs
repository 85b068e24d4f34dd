use bytemuck::{Pod, Zeroable};

use crate::render::{RenderCtx, RenderTarget};
use crate::scene::shapes::RoundedRectCmd;
use crate::scene::{DrawCmd, DrawList};

use super::common::{
    begin_load_pass, create_screen_ubo, premul_blend, screen_ubo_layout_entry, strip_primitive,
    InstanceBuffer, QuadVertex, ScreenUniform,
};

/// Draws every `DrawCmd::RoundedRect` in a list as one instanced strip
/// draw.
///
/// Corners are cut per fragment with a signed-distance function, with a
/// one-pixel antialiasing band on the outline. A border, when present,
/// is a ring on the inside of the outline.
pub struct RoundedRectRenderer {
    resources: Option<Resources>,
    instances: InstanceBuffer,
}

impl RoundedRectRenderer {
    pub fn new() -> Self {
        RoundedRectRenderer {
            resources: None,
            instances: InstanceBuffer::new("rounded rect instances"),
        }
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &mut DrawList,
    ) {
        let batch: Vec<RoundedRectInstance> = draw_list
            .iter_in_paint_order()
            .filter_map(|item| match &item.cmd {
                DrawCmd::RoundedRect(cmd) => RoundedRectInstance::from_cmd(cmd),
                _ => None,
            })
            .collect();

        let Some(instance_buf) = self.instances.upload(ctx.device, ctx.queue, &batch) else {
            return;
        };

        let res = match &mut self.resources {
            Some(r) if r.format == ctx.surface_format => r,
            slot => slot.insert(Resources::build(ctx)),
        };

        ctx.queue.write_buffer(
            &res.screen_ubo,
            0,
            bytemuck::bytes_of(&ScreenUniform::from_viewport(ctx.viewport)),
        );

        let mut pass = begin_load_pass(target.encoder, target.color_view, "rounded rect pass");
        pass.set_pipeline(&res.pipeline);
        pass.set_bind_group(0, &res.bind_group, &[]);
        pass.set_vertex_buffer(0, res.quad.slice(..));
        pass.set_vertex_buffer(1, instance_buf.slice(..));
        pass.draw(0..4, 0..batch.len() as u32);
    }
}

impl Default for RoundedRectRenderer {
    fn default() -> Self {
        Self::new()
    }
}

struct Resources {
    format: wgpu::TextureFormat,
    pipeline: wgpu::RenderPipeline,
    screen_ubo: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    quad: wgpu::Buffer,
}

impl Resources {
    fn build(ctx: &RenderCtx<'_>) -> Self {
        let device = ctx.device;

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("rounded rect shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/rounded_rect.wgsl").into()),
        });

        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("rounded rect bind group layout"),
            entries: &[screen_ubo_layout_entry(0)],
        });

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("rounded rect pipeline layout"),
            bind_group_layouts: &[&bgl],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("rounded rect pipeline"),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[QuadVertex::layout(), RoundedRectInstance::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(premul_blend()),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: strip_primitive(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let screen_ubo = create_screen_ubo(device, "rounded rect screen ubo");
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("rounded rect bind group"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: screen_ubo.as_entire_binding(),
            }],
        });

        Resources {
            format: ctx.surface_format,
            pipeline,
            screen_ubo,
            bind_group,
            quad: QuadVertex::strip_buffer(device, "rounded rect quad"),
        }
    }
}

/// 56 bytes per instance. `shape` packs the corner radius in `.x` and
/// the border width in `.y`; a zero width means no border.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
struct RoundedRectInstance {
    origin: [f32; 2],
    extent: [f32; 2],
    shape: [f32; 2],
    fill: [f32; 4],
    border: [f32; 4],
}

impl RoundedRectInstance {
    const ATTRS: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        1 => Float32x2,
        2 => Float32x2,
        3 => Float32x2,
        4 => Float32x4,
        5 => Float32x4
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<RoundedRectInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }

    /// `None` for rects that normalize to an empty area.
    fn from_cmd(cmd: &RoundedRectCmd) -> Option<Self> {
        let rect = cmd.rect.normalized();
        if rect.is_empty() {
            return None;
        }
        let (border_width, border) = match &cmd.border {
            Some(b) => (b.width.max(0.0), b.color.to_array()),
            None => (0.0, [0.0; 4]),
        };
        Some(RoundedRectInstance {
            origin: [rect.origin.x, rect.origin.y],
            extent: [rect.size.x, rect.size.y],
            shape: [cmd.radius.max(0.0), border_width],
            fill: cmd.color.to_array(),
            border,
        })
    }
}
