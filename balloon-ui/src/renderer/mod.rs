//! wgpu renderers for balloon shapes and text

mod shape;
mod text;

pub use shape::ShapeRenderer;
pub use text::{TextAlign, TextRenderer, TextRun};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to prepare text: {0}")]
    TextPrepare(#[from] glyphon::PrepareError),
    #[error("Failed to render text: {0}")]
    TextRender(#[from] glyphon::RenderError),
}
