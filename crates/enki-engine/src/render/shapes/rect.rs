use bytemuck::{Pod, Zeroable};

use crate::render::{RenderCtx, RenderTarget};
use crate::scene::shapes::RectCmd;
use crate::scene::{DrawCmd, DrawList};

use super::common::{
    begin_load_pass, create_screen_ubo, premul_blend, screen_ubo_layout_entry, strip_primitive,
    InstanceBuffer, QuadVertex, ScreenUniform,
};

/// Draws every `DrawCmd::Rect` in a list as one instanced strip draw.
///
/// GPU state is created on first use, so the renderer can be constructed
/// before a device exists, and is rebuilt if the surface format changes.
pub struct RectRenderer {
    resources: Option<Resources>,
    instances: InstanceBuffer,
}

impl RectRenderer {
    pub fn new() -> Self {
        RectRenderer {
            resources: None,
            instances: InstanceBuffer::new("rect instances"),
        }
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &mut DrawList,
    ) {
        let batch: Vec<RectInstance> = draw_list
            .iter_in_paint_order()
            .filter_map(|item| match &item.cmd {
                DrawCmd::Rect(cmd) => RectInstance::from_cmd(cmd),
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

        let mut pass = begin_load_pass(target.encoder, target.color_view, "rect pass");
        pass.set_pipeline(&res.pipeline);
        pass.set_bind_group(0, &res.bind_group, &[]);
        pass.set_vertex_buffer(0, res.quad.slice(..));
        pass.set_vertex_buffer(1, instance_buf.slice(..));
        pass.draw(0..4, 0..batch.len() as u32);
    }
}

impl Default for RectRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything tied to the device, built in one shot for a surface format.
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
            label: Some("rect shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/rect.wgsl").into()),
        });

        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("rect bind group layout"),
            entries: &[screen_ubo_layout_entry(0)],
        });

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("rect pipeline layout"),
            bind_group_layouts: &[&bgl],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("rect pipeline"),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[QuadVertex::layout(), RectInstance::layout()],
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

        let screen_ubo = create_screen_ubo(device, "rect screen ubo");
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("rect bind group"),
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
            quad: QuadVertex::strip_buffer(device, "rect quad"),
        }
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
struct RectInstance {
    origin: [f32; 2],
    extent: [f32; 2],
    fill: [f32; 4],
}

impl RectInstance {
    const ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        1 => Float32x2,
        2 => Float32x2,
        3 => Float32x4
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<RectInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }

    /// `None` for rects that normalize to an empty area.
    fn from_cmd(cmd: &RectCmd) -> Option<Self> {
        let rect = cmd.rect.normalized();
        if rect.is_empty() {
            return None;
        }
        Some(RectInstance {
            origin: [rect.origin.x, rect.origin.y],
            extent: [rect.size.x, rect.size.y],
            fill: cmd.color.to_array(),
        })
    }
}
