//! Overlay text drawn with glyphon.
//!
//! Labels are shaped once and reshaped only when they change; glyphs are
//! uploaded in [`TextLayer::prepare`] and drawn inside the overlay pass.

use glyphon::{
    Attrs, Buffer, Cache, Color, Family, FontSystem, Metrics, Resolution, Shaping, SwashCache,
    TextArea, TextAtlas, TextBounds, TextRenderer, Viewport,
};
use tracing::{debug, warn};

use crate::overlay::TextLabel;

const LINE_SPACING: f32 = 1.25;

pub struct TextLayer {
    font_system: FontSystem,
    swash_cache: SwashCache,
    viewport: Viewport,
    atlas: TextAtlas,
    renderer: TextRenderer,
    labels: Vec<TextLabel>,
    buffers: Vec<Buffer>,
}

impl TextLayer {
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue, format: wgpu::TextureFormat) -> Self {
        let font_system = FontSystem::new();
        debug!("Loaded {} font faces", font_system.db().len());

        let cache = Cache::new(device);
        let viewport = Viewport::new(device, &cache);
        let mut atlas = TextAtlas::new(device, queue, &cache, format);
        let renderer =
            TextRenderer::new(&mut atlas, device, wgpu::MultisampleState::default(), None);

        Self {
            font_system,
            swash_cache: SwashCache::new(),
            viewport,
            atlas,
            renderer,
            labels: Vec::new(),
            buffers: Vec::new(),
        }
    }

    fn set_labels(&mut self, labels: &[TextLabel]) {
        if self.labels == labels {
            return;
        }
        let font_system = &mut self.font_system;
        self.buffers = labels
            .iter()
            .map(|label| {
                let metrics = Metrics::new(label.size, label.size * LINE_SPACING);
                let mut buffer = Buffer::new(font_system, metrics);
                buffer.set_size(font_system, Some(label.max_width), None);
                buffer.set_text(
                    font_system,
                    &label.text,
                    &Attrs::new().family(Family::SansSerif),
                    Shaping::Advanced,
                    None,
                );
                buffer.shape_until_scroll(font_system, false);
                buffer
            })
            .collect();
        self.labels = labels.to_vec();
    }

    /// Shape `labels` if they changed and upload their glyphs.
    pub fn prepare(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        (width, height): (u32, u32),
        labels: &[TextLabel],
    ) {
        self.set_labels(labels);
        self.viewport.update(queue, Resolution { width, height });

        let bounds = TextBounds {
            left: 0,
            top: 0,
            right: width as i32,
            bottom: height as i32,
        };
        let areas = self
            .buffers
            .iter()
            .zip(&self.labels)
            .map(|(buffer, label)| {
                let [r, g, b] = label.color;
                TextArea {
                    buffer,
                    left: label.position.x,
                    top: label.position.y,
                    scale: 1.0,
                    bounds,
                    default_color: Color::rgb(r, g, b),
                    custom_glyphs: &[],
                }
            });

        if let Err(e) = self.renderer.prepare(
            device,
            queue,
            &mut self.font_system,
            &mut self.atlas,
            &self.viewport,
            areas,
            &mut self.swash_cache,
        ) {
            warn!("Overlay text not prepared: {e}");
        }
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Draw the prepared labels into `pass`.
    pub fn render(&self, pass: &mut wgpu::RenderPass<'_>) {
        if self.is_empty() {
            return;
        }
        if let Err(e) = self.renderer.render(&self.atlas, &self.viewport, pass) {
            warn!("Overlay text not drawn: {e}");
        }
    }

    /// Evict glyphs unused since the last prepare.
    pub fn trim(&mut self) {
        self.atlas.trim();
    }
}
