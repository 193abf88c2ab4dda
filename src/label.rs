//! Balloon content with a title, a body and a row of buttons

use std::fmt;

use balloon_ui::{Color, Font, Point, Rect, Size, TextAlign, TextMeasurer, TextRun};

use crate::content::{BalloonContent, ButtonHit, ButtonKind, DEFAULT_CONTENT_SIZE};
use crate::error::BalloonError;

/// Pale green used for every label text by default
pub const DEFAULT_TEXT_COLOR: Color = [232.0 / 255.0, 245.0 / 255.0, 233.0 / 255.0, 1.0];
/// Vertical gap between title, body and buttons
pub const LABEL_SPACING: f32 = 4.0;

/// Callback run when a button is tapped
pub type ButtonHandler = Box<dyn FnMut()>;

struct LabelButton {
    title: String,
    kind: ButtonKind,
    handler: Option<ButtonHandler>,
}

impl fmt::Debug for LabelButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LabelButton")
            .field("title", &self.title)
            .field("kind", &self.kind)
            .field("handler", &self.handler.is_some())
            .finish()
    }
}

/// Frames of a laid-out label, in content coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct LabelLayout {
    pub size: Size,
    pub title: Option<Rect>,
    pub body: Option<Rect>,
    pub button_row: Option<Rect>,
    pub buttons: Vec<Rect>,
}

/// Title, body text and buttons stacked vertically.
///
/// The width is the widest of the title, the body and the minimum width,
/// never wider than the max width. The title is centered, the body wraps.
#[derive(Debug)]
pub struct BalloonLabelContent {
    title: Option<String>,
    title_font: Font,
    title_color: Color,
    text: Option<String>,
    text_font: Font,
    text_color: Color,
    button_font: Font,
    button_text_color: Color,
    button_height: f32,
    max_width: Option<f32>,
    min_width: f32,
    buttons: Vec<LabelButton>,
    layout: Option<LabelLayout>,
}

impl Default for BalloonLabelContent {
    fn default() -> Self {
        Self {
            title: None,
            title_font: Font::bold(16.0),
            title_color: DEFAULT_TEXT_COLOR,
            text: None,
            text_font: Font::regular(14.0),
            text_color: DEFAULT_TEXT_COLOR,
            button_font: Font::bold(16.0),
            button_text_color: DEFAULT_TEXT_COLOR,
            button_height: 24.0,
            max_width: None,
            min_width: DEFAULT_CONTENT_SIZE.width,
            buttons: Vec::new(),
            layout: None,
        }
    }
}

impl BalloonLabelContent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title; the title area is left out when unset
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_title_font(mut self, font: Font) -> Self {
        self.title_font = font;
        self
    }

    pub fn with_title_color(mut self, color: Color) -> Self {
        self.title_color = color;
        self
    }

    /// Set the body text, wrapped at word boundaries
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_text_font(mut self, font: Font) -> Self {
        self.text_font = font;
        self
    }

    pub fn with_text_color(mut self, color: Color) -> Self {
        self.text_color = color;
        self
    }

    pub fn with_button_font(mut self, font: Font) -> Self {
        self.button_font = font;
        self
    }

    pub fn with_button_text_color(mut self, color: Color) -> Self {
        self.button_text_color = color;
        self
    }

    pub fn with_button_height(mut self, height: f32) -> Self {
        self.button_height = height;
        self
    }

    /// Cap the label width. Without it the container's budget
    /// (80% of the host width) applies.
    pub fn with_max_width(mut self, width: f32) -> Self {
        self.max_width = Some(width);
        self
    }

    pub fn with_min_width(mut self, width: f32) -> Self {
        self.min_width = width;
        self
    }

    /// Append a button. Buttons share the row width equally, in insertion order.
    pub fn add_button(
        mut self,
        title: impl Into<String>,
        kind: ButtonKind,
        handler: Option<ButtonHandler>,
    ) -> Self {
        self.buttons.push(LabelButton {
            title: title.into(),
            kind,
            handler,
        });
        self
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    /// Measure and place title, body and buttons.
    /// `budget` is used when no max width was configured.
    pub fn compute_layout(&self, budget: f32, measurer: &mut dyn TextMeasurer) -> LabelLayout {
        let max_width = self.max_width.unwrap_or(budget);

        let mut width = self.min_width;
        if let Some(title) = &self.title {
            width = width.max(measurer.measure(title, &self.title_font, max_width).width);
        }
        if let Some(text) = &self.text {
            width = width.max(measurer.measure(text, &self.text_font, max_width).width);
        }
        let width = width.min(max_width);

        let title = self.title.as_ref().map(|title| {
            let height = measurer.measure(title, &self.title_font, width).height;
            Rect::new(0.0, 0.0, width, height)
        });
        let title_height = title.map(|r| r.height()).unwrap_or(0.0);

        let body = self.text.as_ref().map(|text| {
            let height = measurer.measure(text, &self.text_font, width).height;
            let y = if title_height == 0.0 {
                0.0
            } else {
                title_height + LABEL_SPACING
            };
            Rect::new(0.0, y, width, height)
        });

        let upper_bottom = title
            .iter()
            .chain(body.iter())
            .map(|r| r.max_y())
            .fold(0.0_f32, f32::max);

        let (button_row, buttons) = if self.buttons.is_empty() {
            (None, Vec::new())
        } else {
            let row = Rect::new(0.0, upper_bottom + LABEL_SPACING, width, self.button_height);
            let button_width = width / self.buttons.len() as f32;
            let frames = (0..self.buttons.len())
                .map(|i| {
                    Rect::new(
                        row.x() + button_width * i as f32,
                        row.y(),
                        button_width,
                        self.button_height,
                    )
                })
                .collect();
            (Some(row), frames)
        };

        let height = button_row
            .map(|r| r.max_y())
            .unwrap_or(0.0)
            .max(upper_bottom);

        LabelLayout {
            size: Size::new(width, height),
            title,
            body,
            button_row,
            buttons,
        }
    }
}

impl BalloonContent for BalloonLabelContent {
    fn layout(&mut self, max_width: f32, measurer: &mut dyn TextMeasurer) -> Size {
        let layout = self.compute_layout(max_width, measurer);
        let size = layout.size;
        log::debug!(
            "label layout: {}x{} with {} buttons",
            size.width,
            size.height,
            layout.buttons.len()
        );
        self.layout = Some(layout);
        size
    }

    fn validate(&self) -> Result<(), BalloonError> {
        if self.title.is_none() && self.text.is_none() && self.buttons.is_empty() {
            return Err(BalloonError::Configuration(
                "label needs a title, a text or a button".to_string(),
            ));
        }
        if let Some(width) = self.max_width {
            if !(width.is_finite() && width > 0.0) {
                return Err(BalloonError::Configuration(format!(
                    "label max width must be positive, got {}",
                    width
                )));
            }
        }
        if !self.buttons.is_empty() && !(self.button_height.is_finite() && self.button_height >= 0.0) {
            return Err(BalloonError::Configuration(format!(
                "button height must be non-negative, got {}",
                self.button_height
            )));
        }
        Ok(())
    }

    fn hit_button(&self, point: Point) -> Option<ButtonHit> {
        let layout = self.layout.as_ref()?;
        let index = layout.buttons.iter().position(|frame| frame.contains(point))?;
        let button = self.buttons.get(index)?;
        Some(ButtonHit {
            index,
            kind: button.kind,
        })
    }

    fn activate(&mut self, index: usize) {
        let Some(button) = self.buttons.get_mut(index) else {
            log::warn!("no label button at index {}", index);
            return;
        };
        log::debug!("label button {:?} tapped", button.title);
        if let Some(handler) = button.handler.as_mut() {
            handler();
        }
    }

    fn text_runs(&self) -> Vec<TextRun> {
        let Some(layout) = &self.layout else {
            return Vec::new();
        };

        let mut runs = Vec::new();
        if let (Some(title), Some(frame)) = (&self.title, layout.title) {
            runs.push(TextRun {
                text: title.clone(),
                font: self.title_font,
                color: self.title_color,
                frame,
                align: TextAlign::Center,
            });
        }
        if let (Some(text), Some(frame)) = (&self.text, layout.body) {
            runs.push(TextRun {
                text: text.clone(),
                font: self.text_font,
                color: self.text_color,
                frame,
                align: TextAlign::Left,
            });
        }
        for (button, frame) in self.buttons.iter().zip(&layout.buttons) {
            // one line, centered vertically in the button
            let line = self.button_font.line_height();
            runs.push(TextRun {
                text: button.title.clone(),
                font: self.button_font,
                color: self.button_text_color,
                frame: Rect::new(frame.x(), frame.y() + (frame.height() - line) / 2.0, frame.width(), line),
                align: TextAlign::Center,
            });
        }
        runs
    }
}
