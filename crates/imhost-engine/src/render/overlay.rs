use std::collections::HashMap;

use anyhow::Result;

use crate::gui::FontAtlasPixels;
use crate::host::HostRenderer;
use crate::render::{GpuTexture, RenderCtx, RenderTarget};
use crate::translate::TranslatedFrame;

/// Bytes per element of each vertex stream.
const POS_STRIDE: u64 = std::mem::size_of::<[f32; 2]>() as u64;
const UV_STRIDE: u64 = std::mem::size_of::<[f32; 2]>() as u64;
const COLOR_STRIDE: u64 = std::mem::size_of::<[f32; 4]>() as u64;
const INDEX_STRIDE: u64 = std::mem::size_of::<u32>() as u64;

/// Draws translated GUI frames with wgpu.
///
/// Positions are already in NDC; the pipeline has no transform uniform. One bind group per
/// texture is cached and dropped once nothing else holds the texture.
#[derive(Default)]
pub struct OverlayRenderer {
    // pipeline
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
    bind_group_layout: Option<wgpu::BindGroupLayout>,
    sampler: Option<wgpu::Sampler>,
    bind_groups: HashMap<GpuTexture, wgpu::BindGroup>,

    // geometry
    pos_vbo: Option<wgpu::Buffer>,
    uv_vbo: Option<wgpu::Buffer>,
    color_vbo: Option<wgpu::Buffer>,
    vertex_capacity: usize,
    ibo: Option<wgpu::Buffer>,
    index_capacity: usize,
}

impl OverlayRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Texture format matching the target's color encoding.
    pub fn texture_format(surface_format: wgpu::TextureFormat) -> wgpu::TextureFormat {
        if surface_format.is_srgb() {
            wgpu::TextureFormat::Rgba8UnormSrgb
        } else {
            wgpu::TextureFormat::Rgba8Unorm
        }
    }

    /// Records one overlay pass on top of the target's current contents.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        frame: &TranslatedFrame<'_, GpuTexture>,
    ) {
        if frame.is_empty() {
            return;
        }

        self.ensure_pipeline(ctx);
        self.ensure_sampler(ctx);
        self.ensure_geometry_capacity(ctx, frame.mesh().vertex_count(), frame.mesh().indices().len());

        // Bind groups for textures first seen this frame; stale ones go.
        self.bind_groups.retain(|tex, _| tex.handle_count() > 1);
        for batch in frame.batches() {
            if !self.bind_groups.contains_key(&batch.texture) {
                if let Some(bg) = self.create_bind_group(ctx, &batch.texture) {
                    self.bind_groups.insert(batch.texture.clone(), bg);
                }
            }
        }

        self.upload(ctx, frame);

        let Some(pipeline) = self.pipeline.as_ref() else { return; };
        let Some(pos_vbo) = self.pos_vbo.as_ref() else { return; };
        let Some(uv_vbo) = self.uv_vbo.as_ref() else { return; };
        let Some(color_vbo) = self.color_vbo.as_ref() else { return; };
        let Some(ibo) = self.ibo.as_ref() else { return; };

        let (target_w, target_h) = ctx.physical_size();

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("imhost overlay pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
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
        });

        rpass.set_pipeline(pipeline);
        rpass.set_viewport(0.0, 0.0, target_w as f32, target_h as f32, 0.0, 1.0);
        rpass.set_vertex_buffer(0, pos_vbo.slice(..));
        rpass.set_vertex_buffer(1, uv_vbo.slice(..));
        rpass.set_vertex_buffer(2, color_vbo.slice(..));
        rpass.set_index_buffer(ibo.slice(..), wgpu::IndexFormat::Uint32);

        for batch in frame.batches() {
            let Some(bind_group) = self.bind_groups.get(&batch.texture) else {
                continue;
            };

            // The translator clamps to its framebuffer; the surface may be a pixel smaller.
            let s = batch.scissor;
            let x = s.x.min(target_w);
            let y = s.y.min(target_h);
            let w = s.width.min(target_w - x);
            let h = s.height.min(target_h - y);
            if w == 0 || h == 0 {
                continue;
            }

            rpass.set_scissor_rect(x, y, w, h);
            rpass.set_bind_group(0, bind_group, &[]);
            rpass.draw_indexed(
                batch.index_offset..batch.index_offset + batch.index_count,
                batch.base_vertex,
                0..1,
            );
        }
    }

    fn upload(&self, ctx: &RenderCtx<'_>, frame: &TranslatedFrame<'_, GpuTexture>) {
        let mesh = frame.mesh();
        let streams = [
            (self.pos_vbo.as_ref(), bytemuck::cast_slice::<[f32; 2], u8>(mesh.positions())),
            (self.uv_vbo.as_ref(), bytemuck::cast_slice::<[f32; 2], u8>(mesh.uvs())),
            (self.color_vbo.as_ref(), bytemuck::cast_slice::<[f32; 4], u8>(mesh.colors())),
            (self.ibo.as_ref(), bytemuck::cast_slice::<u32, u8>(mesh.indices())),
        ];
        for (buffer, bytes) in streams {
            if let Some(buffer) = buffer {
                if !bytes.is_empty() {
                    ctx.queue.write_buffer(buffer, 0, bytes);
                }
            }
        }
    }

    // ── lazy-init helpers ──────────────────────────────────────────────────

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("imhost overlay shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/overlay.wgsl").into()),
        });

        let bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("imhost overlay bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("imhost overlay pipeline layout"),
            bind_group_layouts: &[&bgl],
            immediate_size: 0,
        });

        let pos_attrs = wgpu::vertex_attr_array![0 => Float32x2];
        let uv_attrs = wgpu::vertex_attr_array![1 => Float32x2];
        let color_attrs = wgpu::vertex_attr_array![2 => Float32x4];
        let buffers = [
            wgpu::VertexBufferLayout {
                array_stride: POS_STRIDE,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &pos_attrs,
            },
            wgpu::VertexBufferLayout {
                array_stride: UV_STRIDE,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &uv_attrs,
            },
            wgpu::VertexBufferLayout {
                array_stride: COLOR_STRIDE,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &color_attrs,
            },
        ];

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("imhost overlay pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &buffers,
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    // GUI colors are straight (non-premultiplied) alpha.
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
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
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bgl);
        // Bind groups belong to the old layout.
        self.bind_groups.clear();
    }

    fn ensure_sampler(&mut self, ctx: &RenderCtx<'_>) {
        if self.sampler.is_some() {
            return;
        }
        self.sampler = Some(ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("imhost overlay sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        }));
    }

    fn create_bind_group(&self, ctx: &RenderCtx<'_>, texture: &GpuTexture) -> Option<wgpu::BindGroup> {
        let bgl = self.bind_group_layout.as_ref()?;
        let sampler = self.sampler.as_ref()?;
        Some(ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("imhost overlay texture bind group"),
            layout: bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(texture.view()),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        }))
    }

    /// Grows the vertex/index buffers to fit; never shrinks them.
    fn ensure_geometry_capacity(&mut self, ctx: &RenderCtx<'_>, vertices: usize, indices: usize) {
        if vertices > self.vertex_capacity || self.pos_vbo.is_none() {
            let cap = vertices.next_power_of_two().max(1024);
            let make = |label: &str, stride: u64| {
                ctx.device.create_buffer(&wgpu::BufferDescriptor {
                    label: Some(label),
                    size: cap as u64 * stride,
                    usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                    mapped_at_creation: false,
                })
            };
            self.pos_vbo = Some(make("imhost overlay positions", POS_STRIDE));
            self.uv_vbo = Some(make("imhost overlay uvs", UV_STRIDE));
            self.color_vbo = Some(make("imhost overlay colors", COLOR_STRIDE));
            self.vertex_capacity = cap;
            log::debug!("overlay renderer: vertex capacity {cap}");
        }

        if indices > self.index_capacity || self.ibo.is_none() {
            let cap = indices.next_power_of_two().max(2048);
            self.ibo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("imhost overlay indices"),
                size: cap as u64 * INDEX_STRIDE,
                usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
            self.index_capacity = cap;
            log::debug!("overlay renderer: index capacity {cap}");
        }
    }
}

/// `HostRenderer` over one wgpu render target for the duration of a frame.
///
/// `'c` is the device borrow inside the `RenderCtx`, `'t` the encoder borrow inside the
/// `RenderTarget`; they come from different owners and are kept apart.
pub struct WgpuHost<'a, 'c, 't> {
    renderer: &'a mut OverlayRenderer,
    ctx: &'a RenderCtx<'c>,
    target: &'a mut RenderTarget<'t>,
}

impl<'a, 'c, 't> WgpuHost<'a, 'c, 't> {
    pub fn new(
        renderer: &'a mut OverlayRenderer,
        ctx: &'a RenderCtx<'c>,
        target: &'a mut RenderTarget<'t>,
    ) -> Self {
        Self {
            renderer,
            ctx,
            target,
        }
    }
}

impl HostRenderer for WgpuHost<'_, '_, '_> {
    type Texture = GpuTexture;

    fn create_texture(&mut self, pixels: &FontAtlasPixels) -> Result<GpuTexture> {
        GpuTexture::from_rgba8(
            self.ctx,
            "imhost font atlas",
            pixels.width,
            pixels.height,
            &pixels.rgba,
            OverlayRenderer::texture_format(self.ctx.surface_format),
        )
    }

    fn submit(&mut self, frame: &TranslatedFrame<'_, GpuTexture>) -> Result<()> {
        self.renderer.render(self.ctx, self.target, frame);
        Ok(())
    }
}
