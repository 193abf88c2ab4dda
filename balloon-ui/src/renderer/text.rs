//! Text rendering using glyphon

use glyphon::{
    Buffer, Color as GlyphonColor, FontSystem, Metrics, Resolution, Shaping, SwashCache, TextArea,
    TextAtlas, TextBounds, TextRenderer as GlyphonTextRenderer,
};
use wgpu::{Device, MultisampleState, Queue, RenderPass, TextureFormat};

use super::RenderError;
use crate::geometry::{Color, Point, Rect};
use crate::text::Font;
use crate::transform::Affine;

/// Horizontal alignment of a text run inside its frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
}

/// A block of text laid out in some view's local coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub font: Font,
    pub color: Color,
    pub frame: Rect,
    pub align: TextAlign,
}

/// Text renderer using glyphon
pub struct TextRenderer {
    font_system: FontSystem,
    swash_cache: SwashCache,
    atlas: TextAtlas,
    renderer: GlyphonTextRenderer,
    buffers: Vec<Buffer>,
}

impl TextRenderer {
    /// Create a new text renderer
    pub fn new(device: &Device, queue: &Queue, format: TextureFormat) -> Self {
        let font_system = FontSystem::new();
        let swash_cache = SwashCache::new();
        let mut atlas = TextAtlas::new(device, queue, format);
        let renderer =
            GlyphonTextRenderer::new(&mut atlas, device, MultisampleState::default(), None);

        Self {
            font_system,
            swash_cache,
            atlas,
            renderer,
            buffers: Vec::new(),
        }
    }

    /// Lay out `runs` and upload glyphs. `affine` maps the runs' local
    /// coordinates to pixels; glyphs follow its translation and uniform scale.
    pub fn prepare(
        &mut self,
        device: &Device,
        queue: &Queue,
        runs: &[TextRun],
        affine: &Affine,
        opacity: f32,
        viewport: [u32; 2],
    ) -> Result<(), RenderError> {
        let Self {
            font_system,
            swash_cache,
            atlas,
            renderer,
            buffers,
        } = self;

        buffers.truncate(runs.len());
        while buffers.len() < runs.len() {
            buffers.push(Buffer::new(font_system, Metrics::new(14.0, 16.8)));
        }

        let mut placements = Vec::with_capacity(runs.len());
        for (run, buffer) in runs.iter().zip(buffers.iter_mut()) {
            buffer.set_metrics(font_system, Metrics::new(run.font.size, run.font.line_height()));
            buffer.set_size(font_system, run.frame.width(), f32::MAX);
            buffer.set_text(font_system, &run.text, run.font.attrs(), Shaping::Advanced);

            let line_width = buffer
                .layout_runs()
                .map(|r| r.line_w)
                .fold(0.0_f32, f32::max);
            let inset = match run.align {
                TextAlign::Left => 0.0,
                TextAlign::Center => ((run.frame.width() - line_width) / 2.0).max(0.0),
            };
            placements.push(affine.apply(Point::new(run.frame.x() + inset, run.frame.y())));
        }

        let scale = affine.scale_factor();
        let text_areas = runs
            .iter()
            .zip(buffers.iter())
            .zip(placements)
            .map(|((run, buffer), position)| TextArea {
                buffer,
                left: position.x,
                top: position.y,
                scale,
                bounds: TextBounds {
                    left: 0,
                    top: 0,
                    right: viewport[0] as i32,
                    bottom: viewport[1] as i32,
                },
                default_color: to_glyphon_color(run.color, opacity),
            });

        renderer.prepare(
            device,
            queue,
            font_system,
            atlas,
            Resolution {
                width: viewport[0],
                height: viewport[1],
            },
            text_areas,
            swash_cache,
        )?;
        Ok(())
    }

    /// Render the prepared text
    pub fn render<'a>(&'a self, render_pass: &mut RenderPass<'a>) -> Result<(), RenderError> {
        self.renderer.render(&self.atlas, render_pass)?;
        Ok(())
    }
}

fn to_glyphon_color(color: Color, opacity: f32) -> GlyphonColor {
    let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0) as u8;
    GlyphonColor::rgba(
        channel(color[0]),
        channel(color[1]),
        channel(color[2]),
        channel(color[3] * opacity),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_conversion_applies_opacity() {
        let color = to_glyphon_color([1.0, 0.0, 0.5, 1.0], 0.5);
        assert_eq!(color, GlyphonColor::rgba(255, 0, 127, 127));
    }
}
