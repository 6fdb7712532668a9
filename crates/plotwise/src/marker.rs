//! Marker shapes.

use plotwise_core::{Color, DrawingSurface, Point};
use serde::{Deserialize, Serialize};

/// sin(60°), half-width of an equilateral triangle per unit height.
const SIN_60: f32 = 0.866_025_4;

/// Shape drawn at each data point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerShape {
    /// Filled circle
    #[default]
    Circle,
    /// Axis-aligned square
    Square,
    /// Square rotated 45°
    Diamond,
    /// Triangle pointing up
    Triangle,
    /// Triangle pointing down
    TriangleDown,
    /// Thick `+`
    Plus,
    /// Thick `x`
    Cross,
}

impl MarkerShape {
    /// Every shape, in index order.
    pub const ALL: [Self; 7] = [
        Self::Circle,
        Self::Square,
        Self::Diamond,
        Self::Triangle,
        Self::TriangleDown,
        Self::Plus,
        Self::Cross,
    ];

    /// Shape for a per-point symbol value; indices wrap around.
    pub fn from_value(value: f64) -> Self {
        if !value.is_finite() {
            return Self::Circle;
        }
        let index = (value.round() as i64).rem_euclid(Self::ALL.len() as i64);
        Self::ALL[index as usize]
    }

    /// Polygon outline of a marker of `size` pixels centered on `center`.
    ///
    /// Circles have no polygon and return `None`.
    pub fn outline(self, center: Point, size: f32) -> Option<Vec<Point>> {
        let s2 = size * 0.5;
        let at = |dx: f32, dy: f32| Point::new(center.x + dx, center.y + dy);
        let points = match self {
            Self::Circle => return None,
            Self::Square => vec![at(-s2, -s2), at(s2, -s2), at(s2, s2), at(-s2, s2)],
            Self::Diamond => vec![at(-s2, 0.0), at(0.0, -s2), at(s2, 0.0), at(0.0, s2)],
            Self::Triangle => {
                let (s3, s4) = (s2 * SIN_60, s2 * 0.5);
                vec![at(-s3, s4), at(0.0, -s2), at(s3, s4)]
            }
            Self::TriangleDown => {
                let (s3, s4) = (s2 * SIN_60, s2 * 0.5);
                vec![at(-s3, -s4), at(s3, -s4), at(0.0, s2)]
            }
            Self::Plus => {
                let s6 = size / 6.0;
                vec![
                    at(-s6, -s2),
                    at(s6, -s2),
                    at(s6, -s6),
                    at(s2, -s6),
                    at(s2, s6),
                    at(s6, s6),
                    at(s6, s2),
                    at(-s6, s2),
                    at(-s6, s6),
                    at(-s2, s6),
                    at(-s2, -s6),
                    at(-s6, -s6),
                ]
            }
            Self::Cross => {
                let w = s2 * 0.5;
                vec![
                    at(0.0, -w),
                    at(w, -2.0 * w),
                    at(2.0 * w, -w),
                    at(w, 0.0),
                    at(2.0 * w, w),
                    at(w, 2.0 * w),
                    at(0.0, w),
                    at(-w, 2.0 * w),
                    at(-2.0 * w, w),
                    at(-w, 0.0),
                    at(-2.0 * w, -w),
                    at(-w, -2.0 * w),
                ]
            }
        };
        Some(points)
    }

    /// Fill one marker.
    pub fn draw(self, surface: &mut dyn DrawingSurface, center: Point, size: f32, color: Color) {
        if size <= 0.0 {
            return;
        }
        match self.outline(center, size) {
            Some(points) => surface.fill_polygon(&points, color),
            None => surface.fill_circle(center, size * 0.5, color),
        }
    }
}
