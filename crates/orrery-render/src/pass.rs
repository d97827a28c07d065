//! Render pass configuration and per-frame command encoding.
//!
//! [`RenderPassBuilder`] describes a pass declaratively; [`FrameEncoder`]
//! owns the acquired surface texture and command encoder for one frame and
//! presents it on [`submit`](FrameEncoder::submit).

use crate::depth::DepthBuffer;

/// Background of the scene.
pub const SPACE_BLACK: wgpu::Color = wgpu::Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 1.0,
};

/// How the color attachment starts a pass.
#[derive(Debug, Clone, Copy, PartialEq)]
enum ColorLoad {
    Clear(wgpu::Color),
    /// Keep what earlier passes drew this frame.
    Keep,
}

#[derive(Debug)]
pub struct RenderPassBuilder<'a> {
    color_load: ColorLoad,
    depth_view: Option<&'a wgpu::TextureView>,
    label: Option<&'static str>,
}

impl Default for RenderPassBuilder<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> RenderPassBuilder<'a> {
    /// A pass that clears to [`SPACE_BLACK`] with no depth attachment.
    pub fn new() -> Self {
        Self {
            color_load: ColorLoad::Clear(SPACE_BLACK),
            depth_view: None,
            label: None,
        }
    }

    pub fn clear_color(mut self, color: wgpu::Color) -> Self {
        self.color_load = ColorLoad::Clear(color);
        self
    }

    /// Draw on top of the existing color contents instead of clearing.
    pub fn load_existing(mut self) -> Self {
        self.color_load = ColorLoad::Keep;
        self
    }

    /// Attach a reverse-Z depth buffer, cleared to [`DepthBuffer::CLEAR_VALUE`].
    pub fn depth(mut self, view: &'a wgpu::TextureView) -> Self {
        self.depth_view = Some(view);
        self
    }

    pub fn label(mut self, label: &'static str) -> Self {
        self.label = Some(label);
        self
    }

    fn begin<'encoder>(
        &self,
        encoder: &'encoder mut wgpu::CommandEncoder,
        color_view: &'encoder wgpu::TextureView,
    ) -> wgpu::RenderPass<'encoder> {
        let load = match self.color_load {
            ColorLoad::Clear(color) => wgpu::LoadOp::Clear(color),
            ColorLoad::Keep => wgpu::LoadOp::Load,
        };
        let color_attachment = wgpu::RenderPassColorAttachment {
            view: color_view,
            resolve_target: None,
            ops: wgpu::Operations {
                load,
                store: wgpu::StoreOp::Store,
            },
            depth_slice: None,
        };

        let depth_stencil_attachment =
            self.depth_view
                .map(|view| wgpu::RenderPassDepthStencilAttachment {
                    view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(DepthBuffer::CLEAR_VALUE),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                });

        encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: self.label,
            color_attachments: &[Some(color_attachment)],
            depth_stencil_attachment,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        })
    }
}

/// One frame's command encoder and surface texture.
pub struct FrameEncoder {
    encoder: wgpu::CommandEncoder,
    surface_texture: wgpu::SurfaceTexture,
    surface_view: wgpu::TextureView,
}

impl FrameEncoder {
    pub fn new(device: &wgpu::Device, surface_texture: wgpu::SurfaceTexture) -> Self {
        let encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("frame-encoder"),
        });
        let surface_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        Self {
            encoder,
            surface_texture,
            surface_view,
        }
    }

    /// Begin a pass targeting the frame's surface texture.
    pub fn begin_render_pass(&mut self, builder: &RenderPassBuilder) -> wgpu::RenderPass<'_> {
        builder.begin(&mut self.encoder, &self.surface_view)
    }

    /// Submit the recorded commands and present. Consumes the frame.
    pub fn submit(self, queue: &wgpu::Queue) {
        queue.submit([self.encoder.finish()]);
        self.surface_texture.present();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_clears_to_black() {
        let builder = RenderPassBuilder::new();
        assert_eq!(builder.color_load, ColorLoad::Clear(SPACE_BLACK));
        assert_eq!(SPACE_BLACK.r + SPACE_BLACK.g + SPACE_BLACK.b, 0.0);
        assert_eq!(SPACE_BLACK.a, 1.0);
    }

    #[test]
    fn test_clear_color_overrides_default() {
        let builder = RenderPassBuilder::new().clear_color(wgpu::Color::RED);
        assert_eq!(builder.color_load, ColorLoad::Clear(wgpu::Color::RED));
    }

    #[test]
    fn test_load_existing_keeps_color() {
        let builder = RenderPassBuilder::new().load_existing();
        assert_eq!(builder.color_load, ColorLoad::Keep);
    }

    #[test]
    fn test_depth_is_optional() {
        assert!(RenderPassBuilder::new().depth_view.is_none());
    }

    #[test]
    fn test_label_is_stored() {
        let builder = RenderPassBuilder::new().label("scene-pass");
        assert_eq!(builder.label, Some("scene-pass"));
    }
}
