//! Drawing a balloon from its view tree state

use balloon_ui::{Affine, RenderError, Shape, ShapeRenderer, TextRenderer, ViewTree};
use wgpu::{Device, Queue, RenderPass, TextureFormat};

use crate::container::BalloonContainer;
use crate::content::BalloonContent;

/// Renders the frame, the pin and the content text of one balloon.
///
/// View tree coordinates are taken as pixels of the target surface.
pub struct BalloonRenderer {
    frame: ShapeRenderer,
    pin: ShapeRenderer,
    text: TextRenderer,
}

impl BalloonRenderer {
    pub fn new(device: &Device, queue: &Queue, format: TextureFormat) -> Self {
        Self {
            frame: ShapeRenderer::new(device, format),
            pin: ShapeRenderer::new(device, format),
            text: TextRenderer::new(device, queue, format),
        }
    }

    /// Upload the balloon as it currently stands. Nothing is drawn while
    /// the balloon is detached or hidden.
    pub fn prepare<C: BalloonContent>(
        &mut self,
        device: &Device,
        queue: &Queue,
        tree: &ViewTree,
        balloon: &BalloonContainer<C>,
        viewport: [u32; 2],
    ) -> Result<(), RenderError> {
        let (Some(views), Some(placement)) = (balloon.views(), balloon.placement()) else {
            return self.clear(device, queue, viewport);
        };
        if tree.parent(views.root).is_none() || !tree.is_visible(views.root) {
            return self.clear(device, queue, viewport);
        }

        let style = &balloon.config().style;
        let size = [viewport[0] as f32, viewport[1] as f32];

        let frame_shape = Shape::rounded_rect(placement.frame.size, style.corner_radius, style.color);
        self.frame.prepare(
            device,
            queue,
            &frame_shape,
            &tree.to_root_affine(views.frame),
            tree.effective_alpha(views.frame),
            size,
        );

        match placement.direction {
            Some(direction) if tree.is_visible(views.pin) => {
                let pin_shape = Shape::pin(direction, placement.pin_frame.size, style.color);
                self.pin.prepare(
                    device,
                    queue,
                    &pin_shape,
                    &tree.to_root_affine(views.pin),
                    tree.effective_alpha(views.pin),
                    size,
                );
            }
            _ => self.pin.clear(),
        }

        let runs = balloon.content().text_runs();
        self.text.prepare(
            device,
            queue,
            &runs,
            &tree.to_root_affine(views.content),
            tree.effective_alpha(views.content),
            viewport,
        )
    }

    fn clear(&mut self, device: &Device, queue: &Queue, viewport: [u32; 2]) -> Result<(), RenderError> {
        self.frame.clear();
        self.pin.clear();
        self.text.prepare(
            device,
            queue,
            &[],
            &Affine::IDENTITY,
            1.0,
            viewport,
        )
    }

    /// Draw the prepared balloon: frame first, pin over it, text on top
    pub fn render<'a>(&'a self, render_pass: &mut RenderPass<'a>) -> Result<(), RenderError> {
        self.frame.render(render_pass);
        self.pin.render(render_pass);
        self.text.render(render_pass)
    }
}
