//! Draw commands and stroke/text styles.
//!
//! All chart rendering reduces to these primitives.

use crate::{Color, Point, Rect};
use serde::{Deserialize, Serialize};

/// Line dash style.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineDash {
    /// Continuous line
    #[default]
    Solid,
    /// Long dashes
    Dash,
    /// Dots
    Dot,
    /// Alternating dash and dot
    DashDot,
    /// Explicit on/off lengths in pixels
    Custom(Vec<f32>),
}

impl LineDash {
    /// On/off segment lengths in pixels; empty means solid.
    pub fn pattern(&self) -> Vec<f32> {
        match self {
            Self::Solid => Vec::new(),
            Self::Dash => vec![10.0, 10.0],
            Self::Dot => vec![2.0, 4.0],
            Self::DashDot => vec![10.0, 10.0, 2.0, 10.0],
            Self::Custom(lengths) => lengths.clone(),
        }
    }
}

/// Stroke style for lines and outlines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    /// Stroke color
    pub color: Color,
    /// Stroke width in pixels
    pub width: f32,
    /// Dash pattern
    pub dash: LineDash,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: 1.0,
            dash: LineDash::Solid,
        }
    }
}

impl StrokeStyle {
    /// Solid stroke.
    pub const fn solid(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            dash: LineDash::Solid,
        }
    }

    /// Same stroke with a dash style.
    pub fn dashed(mut self, dash: LineDash) -> Self {
        self.dash = dash;
        self
    }
}

/// Horizontal text anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextAlign {
    /// Text starts at the anchor
    #[default]
    Left,
    /// Text is centered on the anchor
    Center,
    /// Text ends at the anchor
    Right,
}

/// Vertical text anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextBaseline {
    /// Anchor is the top of the text box
    #[default]
    Top,
    /// Anchor is the vertical middle
    Middle,
    /// Anchor is the bottom of the text box
    Bottom,
}

/// Text style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Font size in pixels
    pub size_px: f32,
    /// Text color
    pub color: Color,
    /// Horizontal anchor
    pub align: TextAlign,
    /// Vertical anchor
    pub baseline: TextBaseline,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            size_px: 11.0,
            color: Color::BLACK,
            align: TextAlign::Left,
            baseline: TextBaseline::Top,
        }
    }
}

impl TextStyle {
    /// Style with the given size and color, top-left anchored.
    pub fn new(size_px: f32, color: Color) -> Self {
        Self {
            size_px,
            color,
            ..Self::default()
        }
    }

    /// Same style with different anchors.
    pub const fn anchored(mut self, align: TextAlign, baseline: TextBaseline) -> Self {
        self.align = align;
        self.baseline = baseline;
        self
    }
}

/// A recorded drawing primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    /// Clear a rectangle to transparent
    Clear {
        /// Area cleared
        rect: Rect,
    },
    /// Filled rectangle
    FillRect {
        /// Rectangle bounds
        rect: Rect,
        /// Fill color
        color: Color,
    },
    /// Outlined rectangle
    StrokeRect {
        /// Rectangle bounds
        rect: Rect,
        /// Outline style
        style: StrokeStyle,
    },
    /// Single line segment
    Line {
        /// Start point
        from: Point,
        /// End point
        to: Point,
        /// Stroke style
        style: StrokeStyle,
    },
    /// Stroked polyline
    Path {
        /// Vertices in order
        points: Vec<Point>,
        /// Stroke style
        style: StrokeStyle,
    },
    /// Filled polygon
    Polygon {
        /// Vertices in order
        points: Vec<Point>,
        /// Fill color
        color: Color,
    },
    /// Filled circle
    Circle {
        /// Center point
        center: Point,
        /// Radius
        radius: f32,
        /// Fill color
        color: Color,
    },
    /// Text run
    Text {
        /// The text
        content: String,
        /// Anchor point
        position: Point,
        /// Text style
        style: TextStyle,
    },
    /// Push a clip rectangle
    PushClip {
        /// Clip bounds
        rect: Rect,
    },
    /// Pop the innermost clip rectangle
    PopClip,
}

impl DrawCommand {
    /// Text content, if this is a text command.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text { content, .. } => Some(content),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dash_patterns() {
        assert!(LineDash::Solid.pattern().is_empty());
        assert_eq!(LineDash::Dash.pattern(), vec![10.0, 10.0]);
        assert_eq!(LineDash::DashDot.pattern(), vec![10.0, 10.0, 2.0, 10.0]);
        assert_eq!(LineDash::Custom(vec![3.0]).pattern(), vec![3.0]);
    }

    #[test]
    fn test_dash_deserializes_lowercase() {
        let dash: LineDash = serde_json::from_str("\"dashdot\"").unwrap();
        assert_eq!(dash, LineDash::DashDot);
    }

    #[test]
    fn test_stroke_builders() {
        let s = StrokeStyle::solid(Color::WHITE, 2.0).dashed(LineDash::Dot);
        assert_eq!(s.width, 2.0);
        assert_eq!(s.dash, LineDash::Dot);
    }

    #[test]
    fn test_text_accessor() {
        let cmd = DrawCommand::Text {
            content: "10k".into(),
            position: Point::ORIGIN,
            style: TextStyle::default(),
        };
        assert_eq!(cmd.text(), Some("10k"));
        assert_eq!(DrawCommand::PopClip.text(), None);
    }
}
