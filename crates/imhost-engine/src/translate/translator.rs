use std::hash::Hash;

use super::config::{ColorPolicy, TranslatorConfig};
use super::mesh::HostMesh;
use crate::coords::{ColorRgba, DisplayTransform, ScissorRect, Vec2, Viewport};
use crate::gui::{DrawCmd, DrawData, DrawList};
use crate::texture::{TextureId, TextureRegistry};

/// One host draw call: an index range of the mesh with its scissor and texture.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawBatch<T> {
    /// First index in `HostMesh::indices()`.
    pub index_offset: u32,
    pub index_count: u32,
    /// Added to every index of the range (list-local indices).
    pub base_vertex: i32,
    pub texture: T,
    pub scissor: ScissorRect,
}

/// Result of one `Translator::translate` call, borrowing the translator's buffers.
#[derive(Debug)]
pub struct TranslatedFrame<'a, T> {
    mesh: &'a HostMesh,
    batches: &'a [DrawBatch<T>],
    framebuffer: Viewport,
}

impl<'a, T> TranslatedFrame<'a, T> {
    pub fn mesh(&self) -> &'a HostMesh {
        self.mesh
    }

    pub fn batches(&self) -> &'a [DrawBatch<T>] {
        self.batches
    }

    /// Framebuffer size in pixels the scissors are expressed in.
    pub fn framebuffer_size(&self) -> Viewport {
        self.framebuffer
    }

    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }
}

/// Converts GUI draw data into a `HostMesh` and `DrawBatch`es.
///
/// Owns its buffers and reuses them across frames.
#[derive(Debug)]
pub struct Translator<T> {
    config: TranslatorConfig,
    mesh: HostMesh,
    batches: Vec<DrawBatch<T>>,
    framebuffer: Viewport,
}

impl<T> Translator<T>
where
    T: Clone + Eq + Hash,
{
    pub fn new(config: TranslatorConfig) -> Self {
        Self {
            config,
            mesh: HostMesh::new(),
            batches: Vec::new(),
            framebuffer: Viewport::default(),
        }
    }

    pub fn config(&self) -> TranslatorConfig {
        self.config
    }

    /// Translates one frame.
    ///
    /// Texture ids resolve through `registry`; unknown ids fall back to `fallback`
    /// (the font atlas). Malformed or degenerate input yields an empty frame, never an error.
    pub fn translate(
        &mut self,
        draw_data: &DrawData,
        registry: &TextureRegistry<T>,
        fallback: TextureId,
    ) -> TranslatedFrame<'_, T> {
        self.batches.clear();
        self.framebuffer = Viewport::default();

        let total_vtx = draw_data.total_vtx_count();
        let total_idx = draw_data.total_idx_count();

        if draw_data.lists().is_empty() || total_vtx == 0 || total_idx == 0 {
            self.mesh.reset(0, 0);
            return self.frame();
        }

        let offset = Vec2::from(draw_data.display_pos);
        let scale = Vec2::from(draw_data.framebuffer_scale);
        let transform = DisplayTransform::new(offset, scale);
        let fb = transform.framebuffer_size(Vec2::from(draw_data.display_size));

        if !offset.is_finite() || !scale.is_finite() || !fb.is_valid() {
            log::debug!(
                "translate: unusable display metrics (pos {:?}, size {:?}, scale {:?})",
                draw_data.display_pos,
                draw_data.display_size,
                draw_data.framebuffer_scale
            );
            self.mesh.reset(0, 0);
            return self.frame();
        }

        self.mesh.reset(total_vtx, total_idx);
        self.framebuffer = fb;

        let linear = self.config.color == ColorPolicy::Linear;

        let mut vtx_base = 0usize;
        let mut idx_base = 0usize;

        for list in draw_data.lists() {
            for v in &list.vtx {
                let pos = transform.to_ndc(Vec2::from(v.pos), fb);
                let mut color = ColorRgba::from_packed(v.col);
                if linear {
                    color = color.to_linear();
                }
                self.mesh.push_vertex(pos, v.uv, color);
            }
            self.mesh.indices.extend_from_slice(&list.idx);

            for cmd in &list.cmds {
                if let Some(batch) =
                    self.batch_for(list, cmd, vtx_base, idx_base, transform, fb, registry, fallback)
                {
                    self.batches.push(batch);
                }
            }

            vtx_base += list.vtx.len();
            idx_base += list.idx.len();
        }

        log::trace!(
            "translate: {} vertices, {} indices, {} batches",
            total_vtx,
            total_idx,
            self.batches.len()
        );

        self.frame()
    }

    #[allow(clippy::too_many_arguments)]
    fn batch_for(
        &self,
        list: &DrawList,
        cmd: &DrawCmd,
        vtx_base: usize,
        idx_base: usize,
        transform: DisplayTransform,
        fb: Viewport,
        registry: &TextureRegistry<T>,
        fallback: TextureId,
    ) -> Option<DrawBatch<T>> {
        if cmd.elem_count == 0 {
            return None;
        }

        let start = cmd.idx_offset as usize;
        let end = start + cmd.elem_count as usize;
        let vtx_offset = cmd.vtx_offset as usize;

        let Some(range) = list.idx.get(start..end) else {
            log::debug!(
                "translate: dropping batch, indices {}..{} exceed list of {}",
                start,
                end,
                list.idx.len()
            );
            return None;
        };
        let available = list.vtx.len().saturating_sub(vtx_offset);
        if range.iter().any(|&i| i as usize >= available) {
            log::debug!(
                "translate: dropping batch, index past {} vertices (vtx_offset {})",
                list.vtx.len(),
                vtx_offset
            );
            return None;
        }

        let clip = transform.clip_to_framebuffer(cmd.clip_rect, fb)?;
        let scissor = ScissorRect::from_framebuffer_rect(clip, fb, self.config.scissor_origin)?;

        let Some(texture) = registry
            .resolve(cmd.texture_id)
            .or_else(|| registry.resolve(fallback))
        else {
            log::debug!(
                "translate: dropping batch, {:?} unresolved and no fallback texture",
                cmd.texture_id
            );
            return None;
        };

        let base_vertex = i32::try_from(vtx_base + vtx_offset).ok()?;
        let index_offset = u32::try_from(idx_base + start).ok()?;

        Some(DrawBatch {
            index_offset,
            index_count: cmd.elem_count,
            base_vertex,
            texture: texture.clone(),
            scissor,
        })
    }

    fn frame(&self) -> TranslatedFrame<'_, T> {
        TranslatedFrame {
            mesh: &self.mesh,
            batches: &self.batches,
            framebuffer: self.framebuffer,
        }
    }
}
