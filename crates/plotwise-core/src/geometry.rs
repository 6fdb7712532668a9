//! Pixel-space primitives: Point, Size, Rect and box carving.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// A pixel position on the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X offset from the left edge
    pub x: f32,
    /// Y offset from the top edge
    pub y: f32,
}

impl Point {
    /// Origin point (0, 0)
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Squared distance to another point.
    #[must_use]
    pub fn distance_squared(&self, other: &Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Canvas dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Size {
    /// Zero size
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    /// Create a new size.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Calculate area.
    #[must_use]
    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// True when either dimension is zero, negative or not finite.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
    }
}

/// Edge of a rectangle a region is carved from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Top edge
    Top,
    /// Bottom edge
    Bottom,
    /// Left edge
    Left,
    /// Right edge
    Right,
}

impl Side {
    /// Whether a slice carved from this side spans the full width.
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }
}

/// A pixel rectangle `{x, y, w, h}`, the unit of chart layout.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// X position of top-left corner
    pub x: f32,
    /// Y position of top-left corner
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Rect {
    /// The all-zero rectangle.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Create a new rectangle.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle at the origin with the given size.
    #[must_use]
    pub const fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    /// Create the normalized rectangle spanning two corner points.
    #[must_use]
    pub fn from_corners(a: Point, b: Point) -> Self {
        let x = a.x.min(b.x);
        let y = a.y.min(b.y);
        Self::new(x, y, span_covering(x, a.x.max(b.x)), span_covering(y, a.y.max(b.y)))
    }

    /// Right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Get the size of the rectangle.
    #[must_use]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Center point.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Calculate area.
    #[must_use]
    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// True when the rectangle encloses no pixels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size().is_degenerate()
    }

    /// Check if the rectangle contains a point (edges inclusive).
    #[must_use]
    pub fn contains_point(&self, point: &Point) -> bool {
        point.x >= self.x
            && point.x <= self.right()
            && point.y >= self.y
            && point.y <= self.bottom()
    }

    /// Check whether two rectangles share any interior area.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Shrink by `amount` on every side, never below zero size.
    #[must_use]
    pub fn inset(&self, amount: f32) -> Self {
        let width = (self.width - 2.0 * amount).max(0.0);
        let height = (self.height - 2.0 * amount).max(0.0);
        Self::new(self.x + amount, self.y + amount, width, height)
    }

    /// Split off a slice of `thickness` pixels from `side`.
    ///
    /// Returns `(slice, remainder)`. The thickness is clamped to the extent
    /// available on that axis so neither half ever has a negative size.
    #[must_use]
    pub fn carve(&self, side: Side, thickness: f32) -> (Self, Self) {
        let extent = if side.is_horizontal() {
            self.height
        } else {
            self.width
        };
        let t = thickness.clamp(0.0, extent.max(0.0));
        match side {
            Side::Top => {
                let edge = (self.y + t).min(self.bottom());
                (
                    Self::new(self.x, self.y, self.width, span_within(self.y, edge)),
                    Self::new(self.x, edge, self.width, span_within(edge, self.bottom())),
                )
            }
            Side::Bottom => {
                let edge = (self.bottom() - t).max(self.y);
                (
                    Self::new(self.x, edge, self.width, span_within(edge, self.bottom())),
                    Self::new(self.x, self.y, self.width, span_within(self.y, edge)),
                )
            }
            Side::Left => {
                let edge = (self.x + t).min(self.right());
                (
                    Self::new(self.x, self.y, span_within(self.x, edge), self.height),
                    Self::new(edge, self.y, span_within(edge, self.right()), self.height),
                )
            }
            Side::Right => {
                let edge = (self.right() - t).max(self.x);
                (
                    Self::new(edge, self.y, span_within(edge, self.right()), self.height),
                    Self::new(self.x, self.y, span_within(self.x, edge), self.height),
                )
            }
        }
    }

    /// Restrict the horizontal span to `[left, right]`.
    #[must_use]
    pub fn clip_horizontal(&self, left: f32, right: f32) -> Self {
        let x = self.x.max(left);
        let r = self.right().min(right).max(x);
        Self::new(x, self.y, span_within(x, r), self.height)
    }

    /// Restrict the vertical span to `[top, bottom]`.
    #[must_use]
    pub fn clip_vertical(&self, top: f32, bottom: f32) -> Self {
        let y = self.y.max(top);
        let b = self.bottom().min(bottom).max(y);
        Self::new(self.x, y, self.width, span_within(y, b))
    }
}

/// Width from `from` whose far edge never passes `to`.
///
/// `from + (to - from)` can round past `to` in f32, which would make
/// neighbouring regions overlap by a sliver.
fn span_within(from: f32, to: f32) -> f32 {
    let mut w = (to - from).max(0.0);
    while w > 0.0 && from + w > to {
        w = f32::from_bits(w.to_bits() - 1);
    }
    w
}

/// Width from `from` whose far edge reaches at least `to`.
fn span_covering(from: f32, to: f32) -> f32 {
    let mut w = (to - from).max(0.0);
    while w.is_finite() && from + w < to {
        w = f32::from_bits(w.to_bits() + 1);
    }
    w
}
