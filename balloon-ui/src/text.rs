//! Fonts and text measurement
//!
//! Layout code only needs to know how big a piece of text is once wrapped to
//! a width, so it talks to a [`TextMeasurer`]. [`CosmicMeasurer`] shapes
//! real fonts with glyphon's cosmic-text; [`MonospaceMeasurer`] uses fixed metrics and
//! is handy for headless layout.

use glyphon::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping, Weight};

use crate::geometry::Size;

/// Font weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontWeight {
    #[default]
    Regular,
    Bold,
}

/// Font description used for measuring and rendering text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Font {
    /// Font size in pixels
    pub size: f32,
    pub weight: FontWeight,
}

impl Font {
    pub fn regular(size: f32) -> Self {
        Self {
            size,
            weight: FontWeight::Regular,
        }
    }

    pub fn bold(size: f32) -> Self {
        Self {
            size,
            weight: FontWeight::Bold,
        }
    }

    /// Line height used for layout
    pub fn line_height(&self) -> f32 {
        self.size * 1.2
    }

    /// Shaping attributes for this font, shared by measuring and rendering
    pub fn attrs(&self) -> Attrs<'static> {
        let attrs = Attrs::new().family(Family::SansSerif);
        match self.weight {
            FontWeight::Regular => attrs,
            FontWeight::Bold => attrs.weight(Weight::BOLD),
        }
    }
}

/// Measures wrapped text
pub trait TextMeasurer {
    /// Size of `text` word-wrapped to `max_width`.
    /// Empty text measures as zero.
    fn measure(&mut self, text: &str, font: &Font, max_width: f32) -> Size;
}

/// Measurer backed by cosmic-text font shaping
pub struct CosmicMeasurer {
    font_system: FontSystem,
}

impl CosmicMeasurer {
    /// Create a measurer using the system fonts
    pub fn new() -> Self {
        Self {
            font_system: FontSystem::new(),
        }
    }
}

impl Default for CosmicMeasurer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextMeasurer for CosmicMeasurer {
    fn measure(&mut self, text: &str, font: &Font, max_width: f32) -> Size {
        if text.is_empty() {
            return Size::ZERO;
        }

        let line_height = font.line_height();
        let mut buffer = Buffer::new(&mut self.font_system, Metrics::new(font.size, line_height));
        buffer.set_size(&mut self.font_system, max_width, f32::MAX);
        buffer.set_text(&mut self.font_system, text, font.attrs(), Shaping::Advanced);

        let mut width: f32 = 0.0;
        let mut line_count = 0;
        for run in buffer.layout_runs() {
            width = width.max(run.line_w);
            line_count += 1;
        }

        Size::new(width.ceil().min(max_width), line_count as f32 * line_height)
    }
}

/// Measurer with fixed glyph metrics.
/// Every character advances `size * 0.5` (`size * 0.6` when bold) and lines are `size * 1.2` tall.
#[derive(Debug, Clone, Copy, Default)]
pub struct MonospaceMeasurer;

impl MonospaceMeasurer {
    /// Horizontal advance of one character
    pub fn advance(font: &Font) -> f32 {
        match font.weight {
            FontWeight::Regular => font.size * 0.5,
            FontWeight::Bold => font.size * 0.6,
        }
    }

    /// Greedy word wrap; words longer than a line are broken between characters
    pub fn wrap(text: &str, font: &Font, max_width: f32) -> Vec<String> {
        let advance = Self::advance(font);
        let fits = |chars: usize| chars as f32 * advance <= max_width + f32::EPSILON;
        let mut lines = Vec::new();

        for paragraph in text.split('\n') {
            let mut line = String::new();
            let mut line_chars = 0usize;

            for word in paragraph.split_whitespace() {
                let word_chars = word.chars().count();
                if line_chars > 0 && fits(line_chars + 1 + word_chars) {
                    line.push(' ');
                    line.push_str(word);
                    line_chars += 1 + word_chars;
                    continue;
                }
                if line_chars > 0 {
                    lines.push(std::mem::take(&mut line));
                    line_chars = 0;
                }
                for c in word.chars() {
                    if line_chars > 0 && !fits(line_chars + 1) {
                        lines.push(std::mem::take(&mut line));
                        line_chars = 0;
                    }
                    line.push(c);
                    line_chars += 1;
                }
            }
            lines.push(line);
        }

        lines
    }
}

impl TextMeasurer for MonospaceMeasurer {
    fn measure(&mut self, text: &str, font: &Font, max_width: f32) -> Size {
        if text.is_empty() {
            return Size::ZERO;
        }
        let lines = Self::wrap(text, font, max_width);
        let widest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        Size::new(
            widest as f32 * Self::advance(font),
            lines.len() as f32 * font.line_height(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_size(actual: Size, expected: Size) {
        assert!(
            (actual.width - expected.width).abs() < 1e-4
                && (actual.height - expected.height).abs() < 1e-4,
            "{:?} != {:?}",
            actual,
            expected
        );
    }

    #[test]
    fn test_monospace_single_line() {
        let size = MonospaceMeasurer.measure("Hello", &Font::regular(10.0), 200.0);
        assert_size(size, Size::new(25.0, 12.0));
    }

    #[test]
    fn test_monospace_bold_is_wider() {
        let regular = MonospaceMeasurer.measure("A", &Font::regular(16.0), 200.0);
        let bold = MonospaceMeasurer.measure("A", &Font::bold(16.0), 200.0);
        assert!(bold.width > regular.width);
        assert_eq!(bold.height, regular.height);
    }

    #[test]
    fn test_monospace_wraps_words() {
        // 5 px per char, 40 px lines hold 8 chars
        let font = Font::regular(10.0);
        let lines = MonospaceMeasurer::wrap("one two three four", &font, 40.0);
        assert_eq!(lines, vec!["one two", "three", "four"]);

        let size = MonospaceMeasurer.measure("one two three four", &font, 40.0);
        assert_size(size, Size::new(35.0, 36.0));
    }

    #[test]
    fn test_monospace_breaks_long_words() {
        let font = Font::regular(10.0);
        let lines = MonospaceMeasurer::wrap("abcdefghij", &font, 20.0);
        assert_eq!(lines, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_monospace_keeps_explicit_newlines() {
        let font = Font::regular(10.0);
        let size = MonospaceMeasurer.measure("a\nbb", &font, 100.0);
        assert_size(size, Size::new(10.0, 24.0));
    }

    #[test]
    fn test_font_attrs_feed_the_render_buffer() {
        let mut font_system = FontSystem::new();
        let font = Font::bold(16.0);
        let mut buffer = Buffer::new(&mut font_system, Metrics::new(font.size, font.line_height()));
        buffer.set_text(&mut font_system, "Saved\nagain", font.attrs(), Shaping::Advanced);
        assert_eq!(buffer.lines.len(), 2);
    }

    #[test]
    fn test_empty_text_is_zero() {
        assert_eq!(
            MonospaceMeasurer.measure("", &Font::regular(14.0), 100.0),
            Size::ZERO
        );
    }
}
