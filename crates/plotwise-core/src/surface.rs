//! Capabilities the host supplies for measuring and drawing.

use crate::draw::{StrokeStyle, TextStyle};
use crate::{Color, Point, Rect};

/// Measures rendered text width.
pub trait TextMeasurer {
    /// Width in pixels of `text` at `font_size_px`.
    fn measure_width(&self, text: &str, font_size_px: f32) -> f32;
}

/// Measures text as a fixed fraction of the font size per character.
///
/// Useful for hosts without font metrics and for deterministic tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMeasurer {
    /// Character advance as a fraction of the font size
    pub advance: f32,
}

impl Default for MonospaceMeasurer {
    fn default() -> Self {
        Self { advance: 0.6 }
    }
}

impl TextMeasurer for MonospaceMeasurer {
    fn measure_width(&self, text: &str, font_size_px: f32) -> f32 {
        text.chars().count() as f32 * font_size_px * self.advance
    }
}

/// Raster drawing surface a chart renders onto.
pub trait DrawingSurface: TextMeasurer {
    /// Clear `rect` to transparent.
    fn clear(&mut self, rect: Rect);

    /// Fill a rectangle.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Outline a rectangle.
    fn stroke_rect(&mut self, rect: Rect, style: &StrokeStyle);

    /// Draw a single segment.
    fn draw_line(&mut self, from: Point, to: Point, style: &StrokeStyle);

    /// Stroke a polyline.
    fn draw_path(&mut self, points: &[Point], style: &StrokeStyle);

    /// Fill a closed polygon.
    fn fill_polygon(&mut self, points: &[Point], color: Color);

    /// Fill a circle.
    fn fill_circle(&mut self, center: Point, radius: f32, color: Color);

    /// Draw text anchored at `position`.
    fn draw_text(&mut self, text: &str, position: Point, style: &TextStyle);

    /// Restrict drawing to `rect` until the matching `pop_clip`.
    fn push_clip(&mut self, rect: Rect);

    /// Remove the innermost clip.
    fn pop_clip(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monospace_width() {
        let m = MonospaceMeasurer::default();
        assert!((m.measure_width("01234", 10.0) - 30.0).abs() < 1e-4);
        assert_eq!(m.measure_width("", 10.0), 0.0);
    }

    #[test]
    fn test_monospace_counts_chars_not_bytes() {
        let m = MonospaceMeasurer { advance: 1.0 };
        assert_eq!(m.measure_width("µs", 10.0), 20.0);
    }
}
