/// One acquired swapchain image plus the encoder recording into it.
///
/// Frames are transient: acquire, record, submit, all within a single
/// redraw. Holding the texture past present blocks further acquisitions.
pub struct GpuFrame {
    pub texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}
