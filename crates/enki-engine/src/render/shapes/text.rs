use std::collections::HashMap;

use bytemuck::{Pod, Zeroable};
use fontdue::layout::{CoordinateSystem, GlyphRasterConfig, Layout, LayoutSettings, TextStyle};

use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{DrawCmd, DrawList};
use crate::text::FontSystem;

use super::common::{
    begin_load_pass, create_screen_ubo, premul_blend, screen_ubo_layout_entry, strip_primitive,
    InstanceBuffer, QuadVertex, ScreenUniform,
};

const ATLAS_EXTENT: u32 = 2048;
const ATLAS_PADDING: u32 = 1;

/// Draws every `DrawCmd::Text` in a list by instancing one quad per
/// glyph over a shared coverage atlas.
///
/// Runs are laid out and rasterized at physical pixel size
/// (`size * scale_factor`) and the resulting positions divided back to
/// logical pixels, so text stays crisp on hidpi surfaces. The atlas
/// cache key is fontdue's `GlyphRasterConfig`, which encodes font,
/// glyph, and pixel size, so each distinct rendering of a glyph is
/// rasterized once for the renderer's lifetime.
pub struct TextRenderer {
    resources: Option<Resources>,
    atlas: Option<GlyphAtlas>,
    instances: InstanceBuffer,
    layout: Layout<()>,
}

impl TextRenderer {
    pub fn new() -> Self {
        TextRenderer {
            resources: None,
            atlas: None,
            instances: InstanceBuffer::new("glyph instances"),
            layout: Layout::new(CoordinateSystem::PositiveYDown),
        }
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &mut DrawList,
        fonts: &FontSystem,
    ) {
        let scale = ctx.scale_factor.max(0.01);
        let atlas = self.atlas.get_or_insert_with(|| GlyphAtlas::new(ctx.device));

        let mut batch: Vec<GlyphInstance> = Vec::new();
        for item in draw_list.iter_in_paint_order() {
            let DrawCmd::Text(run) = &item.cmd else { continue };
            let Some(font) = fonts.get(run.font) else {
                log::warn!("text run references unknown font {:?}", run.font);
                continue;
            };
            let tint = run.color.to_array();

            self.layout.reset(&LayoutSettings {
                x: run.origin.x * scale,
                y: run.origin.y * scale,
                max_width: run.max_width.map(|w| w * scale),
                ..LayoutSettings::default()
            });
            self.layout
                .append(&[font], &TextStyle::new(&run.text, run.size * scale, 0));

            for glyph in self.layout.glyphs() {
                if !glyph.char_data.rasterize() || glyph.width == 0 || glyph.height == 0 {
                    continue;
                }
                let Some(entry) = atlas.entry(ctx.queue, font, glyph.key) else {
                    continue;
                };
                batch.push(GlyphInstance {
                    rect_min: [glyph.x / scale, glyph.y / scale],
                    rect_max: [
                        (glyph.x + glyph.width as f32) / scale,
                        (glyph.y + glyph.height as f32) / scale,
                    ],
                    uv_min: entry.uv_min,
                    uv_max: entry.uv_max,
                    tint,
                });
            }
        }

        let Some(instance_buf) = self.instances.upload(ctx.device, ctx.queue, &batch) else {
            return;
        };

        let res = match &mut self.resources {
            Some(r) if r.format == ctx.surface_format => r,
            slot => slot.insert(Resources::build(ctx, &atlas.view)),
        };

        ctx.queue.write_buffer(
            &res.screen_ubo,
            0,
            bytemuck::bytes_of(&ScreenUniform::from_viewport(ctx.viewport)),
        );

        let mut pass = begin_load_pass(target.encoder, target.color_view, "text pass");
        pass.set_pipeline(&res.pipeline);
        pass.set_bind_group(0, &res.bind_group, &[]);
        pass.set_vertex_buffer(0, res.quad.slice(..));
        pass.set_vertex_buffer(1, instance_buf.slice(..));
        pass.draw(0..4, 0..batch.len() as u32);
    }
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// R8 texture of rasterized glyph coverage plus the uv cache over it.
///
/// Created once per renderer and never replaced, so bind groups built
/// against its view stay valid.
struct GlyphAtlas {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    packer: ShelfPacker,
    entries: HashMap<GlyphRasterConfig, AtlasEntry>,
    warned_full: bool,
}

#[derive(Debug, Clone, Copy)]
struct AtlasEntry {
    uv_min: [f32; 2],
    uv_max: [f32; 2],
}

impl GlyphAtlas {
    fn new(device: &wgpu::Device) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("glyph atlas"),
            size: wgpu::Extent3d {
                width: ATLAS_EXTENT,
                height: ATLAS_EXTENT,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::R8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        GlyphAtlas {
            texture,
            view,
            packer: ShelfPacker::new(ATLAS_EXTENT, ATLAS_PADDING),
            entries: HashMap::new(),
            warned_full: false,
        }
    }

    /// Returns the uv rect for `key`, rasterizing and uploading the
    /// glyph on first sight. `None` when the glyph cannot be placed.
    fn entry(
        &mut self,
        queue: &wgpu::Queue,
        font: &fontdue::Font,
        key: GlyphRasterConfig,
    ) -> Option<AtlasEntry> {
        if let Some(hit) = self.entries.get(&key) {
            return Some(*hit);
        }

        let (metrics, coverage) = font.rasterize_config(key);
        let (w, h) = (metrics.width as u32, metrics.height as u32);
        if w == 0 || h == 0 {
            return None;
        }

        let Some((x, y)) = self.packer.place(w, h) else {
            if !self.warned_full {
                log::warn!(
                    "glyph atlas is full ({ATLAS_EXTENT}x{ATLAS_EXTENT}); \
                     new glyphs will be dropped"
                );
                self.warned_full = true;
            }
            return None;
        };

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d { x, y, z: 0 },
                aspect: wgpu::TextureAspect::All,
            },
            &coverage,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(w),
                rows_per_image: Some(h),
            },
            wgpu::Extent3d { width: w, height: h, depth_or_array_layers: 1 },
        );

        let texel = 1.0 / ATLAS_EXTENT as f32;
        let entry = AtlasEntry {
            uv_min: [x as f32 * texel, y as f32 * texel],
            uv_max: [(x + w) as f32 * texel, (y + h) as f32 * texel],
        };
        self.entries.insert(key, entry);
        Some(entry)
    }
}

/// Row packer for the atlas. Regions go left to right along a shelf;
/// when one fills up, the cursor drops below the tallest region placed
/// on it. Pure bookkeeping, no GPU side.
struct ShelfPacker {
    extent: u32,
    pad: u32,
    cursor: (u32, u32),
    shelf_height: u32,
}

impl ShelfPacker {
    fn new(extent: u32, pad: u32) -> Self {
        ShelfPacker { extent, pad, cursor: (pad, pad), shelf_height: 0 }
    }

    /// Reserves a `w` by `h` region and returns its top-left corner, or
    /// `None` when no remaining space fits it.
    fn place(&mut self, w: u32, h: u32) -> Option<(u32, u32)> {
        if w == 0 || h == 0 || w + 2 * self.pad > self.extent {
            return None;
        }
        if self.cursor.0 + w + self.pad > self.extent {
            self.cursor = (self.pad, self.cursor.1 + self.shelf_height + self.pad);
            self.shelf_height = 0;
        }
        if self.cursor.1 + h + self.pad > self.extent {
            return None;
        }
        let at = self.cursor;
        self.cursor.0 += w + self.pad;
        self.shelf_height = self.shelf_height.max(h);
        Some(at)
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
    fn build(ctx: &RenderCtx<'_>, atlas_view: &wgpu::TextureView) -> Self {
        let device = ctx.device;

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("text shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/text.wgsl").into()),
        });

        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("text bind group layout"),
            entries: &[
                screen_ubo_layout_entry(0),
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("text pipeline layout"),
            bind_group_layouts: &[&bgl],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("text pipeline"),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[QuadVertex::layout(), GlyphInstance::layout()],
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

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("glyph sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });

        let screen_ubo = create_screen_ubo(device, "text screen ubo");
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("text bind group"),
            layout: &bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: screen_ubo.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(atlas_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        Resources {
            format: ctx.surface_format,
            pipeline,
            screen_ubo,
            bind_group,
            quad: QuadVertex::strip_buffer(device, "text quad"),
        }
    }
}

/// 48 bytes per instance: the glyph rect in logical pixels plus its
/// atlas uv rect and run tint.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
struct GlyphInstance {
    rect_min: [f32; 2],
    rect_max: [f32; 2],
    uv_min: [f32; 2],
    uv_max: [f32; 2],
    tint: [f32; 4],
}

impl GlyphInstance {
    const ATTRS: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        1 => Float32x2,
        2 => Float32x2,
        3 => Float32x2,
        4 => Float32x2,
        5 => Float32x4
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<GlyphInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ShelfPacker;

    #[test]
    fn places_left_to_right_with_padding() {
        let mut p = ShelfPacker::new(64, 1);
        assert_eq!(p.place(10, 10), Some((1, 1)));
        assert_eq!(p.place(10, 10), Some((12, 1)));
    }

    #[test]
    fn wraps_to_a_new_shelf_when_the_row_fills() {
        let mut p = ShelfPacker::new(32, 1);
        assert_eq!(p.place(20, 8), Some((1, 1)));
        assert_eq!(p.place(20, 8), Some((1, 10)));
    }

    #[test]
    fn shelf_height_tracks_the_tallest_region() {
        let mut p = ShelfPacker::new(64, 1);
        assert_eq!(p.place(10, 4), Some((1, 1)));
        assert_eq!(p.place(10, 12), Some((12, 1)));
        // Wide enough to force a wrap below the 12-high region.
        assert_eq!(p.place(60, 5), Some((1, 14)));
    }

    #[test]
    fn rejects_regions_that_cannot_fit() {
        let mut p = ShelfPacker::new(16, 1);
        assert_eq!(p.place(20, 4), None);
        assert_eq!(p.place(4, 0), None);
        assert_eq!(p.place(8, 8), Some((1, 1)));
        // Wraps to y = 10, where 12 rows of height no longer fit.
        assert_eq!(p.place(8, 12), None);
    }
}
