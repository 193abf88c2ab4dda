//! Content slot of a balloon

use balloon_ui::{Point, Size, TextMeasurer, TextRun, ViewId};

use crate::error::BalloonError;

/// Default content size when nothing else is given
pub const DEFAULT_CONTENT_SIZE: Size = Size {
    width: 100.0,
    height: 60.0,
};

/// Behaviour of a label button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonKind {
    /// Only runs its callback
    #[default]
    Normal,
    /// Hides the balloon, then runs its callback
    Close,
}

/// Button found under a tap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonHit {
    pub index: usize,
    pub kind: ButtonKind,
}

/// Something that fills the balloon's content area.
///
/// The container calls [`BalloonContent::layout`] right before every
/// entrance, with the width budget derived from the host.
pub trait BalloonContent {
    /// Lay out and return the content size
    fn layout(&mut self, max_width: f32, measurer: &mut dyn TextMeasurer) -> Size;

    /// Check the content can be shown
    fn validate(&self) -> Result<(), BalloonError> {
        Ok(())
    }

    /// Button under `point`, given in content coordinates
    fn hit_button(&self, _point: Point) -> Option<ButtonHit> {
        None
    }

    /// Run the action of button `index`
    fn activate(&mut self, _index: usize) {}

    /// Caller-owned view placed inside the content area
    fn view(&self) -> Option<ViewId> {
        None
    }

    /// Text to draw, in content coordinates
    fn text_runs(&self) -> Vec<TextRun> {
        Vec::new()
    }
}

/// Content made of a caller-supplied view with a fixed size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewContent {
    view: Option<ViewId>,
    size: Size,
}

impl Default for ViewContent {
    fn default() -> Self {
        Self {
            view: None,
            size: DEFAULT_CONTENT_SIZE,
        }
    }
}

impl ViewContent {
    pub fn new(view: ViewId, size: Size) -> Self {
        Self {
            view: Some(view),
            size,
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }
}

impl BalloonContent for ViewContent {
    fn layout(&mut self, _max_width: f32, _measurer: &mut dyn TextMeasurer) -> Size {
        self.size
    }

    fn view(&self) -> Option<ViewId> {
        self.view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use balloon_ui::{MonospaceMeasurer, Rect, ViewTree};

    #[test]
    fn test_default_view_content_size() {
        let mut content = ViewContent::default();
        let mut measurer = MonospaceMeasurer;
        assert_eq!(content.layout(10.0, &mut measurer), Size::new(100.0, 60.0));
        assert_eq!(content.view(), None);
        assert!(content.validate().is_ok());
        assert_eq!(content.hit_button(Point::new(1.0, 1.0)), None);
    }

    #[test]
    fn test_view_content_ignores_budget() {
        let mut tree = ViewTree::new();
        let view = tree.add_view("custom", Rect::new(0.0, 0.0, 40.0, 40.0));
        let mut content = ViewContent::new(view, Size::new(240.0, 30.0));
        let mut measurer = MonospaceMeasurer;
        assert_eq!(content.layout(100.0, &mut measurer), Size::new(240.0, 30.0));
        assert_eq!(content.view(), Some(view));
        assert!(content.text_runs().is_empty());
    }
}
