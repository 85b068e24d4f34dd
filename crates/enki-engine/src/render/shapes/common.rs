//! Plumbing shared by the shape renderers: the unit quad, the screen
//! uniform, pass setup, and a grow-only instance buffer.

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::coords::Viewport;

/// Uniform block carrying the target extent in logical pixels.
///
/// Padded to 16 bytes to satisfy uniform buffer layout rules.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub(super) struct ScreenUniform {
    pub size: [f32; 2],
    pub _pad: [f32; 2],
}

impl ScreenUniform {
    /// Extents are floored at one pixel so the shader's NDC division can
    /// never produce NaN or infinity.
    pub(super) fn from_viewport(vp: Viewport) -> Self {
        ScreenUniform {
            size: [vp.width.max(1.0), vp.height.max(1.0)],
            _pad: [0.0; 2],
        }
    }

    pub(super) fn binding_size() -> Option<wgpu::BufferSize> {
        wgpu::BufferSize::new(std::mem::size_of::<Self>() as u64)
    }
}

/// Creates the one-slot uniform buffer a renderer writes its
/// [`ScreenUniform`] into each frame.
pub(super) fn create_screen_ubo(device: &wgpu::Device, label: &str) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: std::mem::size_of::<ScreenUniform>() as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

/// Bind group layout entry for the screen uniform at `binding`.
pub(super) fn screen_ubo_layout_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::VERTEX,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: ScreenUniform::binding_size(),
        },
        count: None,
    }
}

/// Corner of the unit quad every shape instances, traversed as a
/// four-vertex triangle strip. No index buffer is involved.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub(super) struct QuadVertex {
    pub corner: [f32; 2],
}

pub(super) const UNIT_QUAD_STRIP: [QuadVertex; 4] = [
    QuadVertex { corner: [0.0, 0.0] },
    QuadVertex { corner: [1.0, 0.0] },
    QuadVertex { corner: [0.0, 1.0] },
    QuadVertex { corner: [1.0, 1.0] },
];

impl QuadVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    pub(super) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }

    pub(super) fn strip_buffer(device: &wgpu::Device, label: &str) -> wgpu::Buffer {
        device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&UNIT_QUAD_STRIP),
            usage: wgpu::BufferUsages::VERTEX,
        })
    }
}

/// Blend state for premultiplied-alpha sources over the existing target.
pub(super) fn premul_blend() -> wgpu::BlendState {
    let over = wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
        operation: wgpu::BlendOperation::Add,
    };
    wgpu::BlendState { color: over, alpha: over }
}

/// Primitive state matching [`UNIT_QUAD_STRIP`]: triangle strip, no
/// culling, filled polygons.
pub(super) fn strip_primitive() -> wgpu::PrimitiveState {
    wgpu::PrimitiveState {
        topology: wgpu::PrimitiveTopology::TriangleStrip,
        ..Default::default()
    }
}

/// Begins a color pass onto `view` that loads the existing contents, so
/// renderer passes stack over the clear and over each other.
pub(super) fn begin_load_pass<'e>(
    encoder: &'e mut wgpu::CommandEncoder,
    view: &wgpu::TextureView,
    label: &str,
) -> wgpu::RenderPass<'e> {
    encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some(label),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view,
            resolve_target: None,
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
    })
}

/// Vertex buffer for per-instance data, regrown in power-of-two steps and
/// reused across frames.
pub(super) struct InstanceBuffer {
    label: &'static str,
    buffer: Option<wgpu::Buffer>,
    capacity: usize,
}

impl InstanceBuffer {
    pub(super) const fn new(label: &'static str) -> Self {
        InstanceBuffer { label, buffer: None, capacity: 0 }
    }

    /// Uploads `items`, reallocating first if the batch outgrew the
    /// buffer. Returns the buffer to bind, or `None` for an empty batch.
    pub(super) fn upload<T: Pod>(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        items: &[T],
    ) -> Option<&wgpu::Buffer> {
        if items.is_empty() {
            return None;
        }
        if self.buffer.is_none() || items.len() > self.capacity {
            let capacity = items.len().next_power_of_two().max(64);
            self.buffer = Some(device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(self.label),
                size: (capacity * std::mem::size_of::<T>()) as u64,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
            self.capacity = capacity;
        }
        let buffer = self.buffer.as_ref()?;
        queue.write_buffer(buffer, 0, bytemuck::cast_slice(items));
        Some(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::ScreenUniform;
    use crate::coords::Viewport;

    #[test]
    fn screen_uniform_floors_degenerate_extents() {
        let u = ScreenUniform::from_viewport(Viewport::new(0.0, -3.0));
        assert_eq!(u.size, [1.0, 1.0]);

        let u = ScreenUniform::from_viewport(Viewport::new(800.0, 600.0));
        assert_eq!(u.size, [800.0, 600.0]);
    }

    #[test]
    fn screen_uniform_has_a_nonzero_binding_size() {
        assert_eq!(ScreenUniform::binding_size().map(|s| s.get()), Some(16));
    }
}
