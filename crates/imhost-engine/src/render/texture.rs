use std::hash::{Hash, Hasher};
use std::sync::Arc;

use anyhow::{Result, ensure};

use crate::render::RenderCtx;

struct Inner {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
}

/// Shared handle to a sampled GPU texture.
///
/// Identity is the allocation: two handles are equal only if one is a clone of the other.
/// This is what the texture registry keys on.
#[derive(Clone)]
pub struct GpuTexture(Arc<Inner>);

impl GpuTexture {
    /// Wraps an existing texture. The view must be a 2D float-sampled view.
    pub fn from_parts(texture: wgpu::Texture, view: wgpu::TextureView) -> Self {
        Self(Arc::new(Inner { texture, view }))
    }

    /// Creates a texture from tightly packed RGBA8 pixels.
    pub fn from_rgba8(
        ctx: &RenderCtx<'_>,
        label: &str,
        width: u32,
        height: u32,
        rgba: &[u8],
        format: wgpu::TextureFormat,
    ) -> Result<Self> {
        ensure!(width > 0 && height > 0, "texture {label} has zero size");
        ensure!(
            rgba.len() == width as usize * height as usize * 4,
            "texture {label}: expected {} bytes, got {}",
            width as usize * height as usize * 4,
            rgba.len()
        );

        let limit = ctx.device.limits().max_texture_dimension_2d;
        ensure!(
            width <= limit && height <= limit,
            "texture {label} is {width}x{height}, device limit is {limit}"
        );

        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };

        let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        ctx.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            rgba,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(width * 4),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Ok(Self::from_parts(texture, view))
    }

    pub fn texture(&self) -> &wgpu::Texture {
        &self.0.texture
    }

    pub fn view(&self) -> &wgpu::TextureView {
        &self.0.view
    }

    /// Number of live handles, including this one.
    pub(crate) fn handle_count(&self) -> usize {
        Arc::strong_count(&self.0)
    }
}

impl PartialEq for GpuTexture {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for GpuTexture {}

impl Hash for GpuTexture {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (Arc::as_ptr(&self.0) as usize).hash(state);
    }
}

impl std::fmt::Debug for GpuTexture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let size = self.0.texture.size();
        f.debug_struct("GpuTexture")
            .field("ptr", &Arc::as_ptr(&self.0))
            .field("size", &(size.width, size.height))
            .finish()
    }
}
