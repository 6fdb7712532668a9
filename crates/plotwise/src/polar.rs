//! 2D polar projection: x is the angle, y the radius.

use crate::viewport::AxisRange;
use plotwise_core::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Unit of the angle series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleUnit {
    /// Radians
    #[default]
    Radians,
    /// Degrees
    Degrees,
    /// Angular mils, 3600 to the half turn
    Mils,
}

impl AngleUnit {
    /// Radians per unit.
    pub fn to_radians(self) -> f64 {
        match self {
            Self::Radians => 1.0,
            Self::Degrees => PI / 180.0,
            Self::Mils => PI / 1800.0,
        }
    }
}

/// Where radius zero sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RadialOrigin {
    /// Zero at the center, scaled by the largest magnitude
    #[default]
    ZeroCentered,
    /// The minimum value at the center
    FromMinimum,
}

/// Largest square centered in `rect`.
pub fn squared(rect: Rect) -> Rect {
    let side = rect.width.min(rect.height).max(0.0);
    Rect::new(
        rect.x + (rect.width - side) * 0.5,
        rect.y + (rect.height - side) * 0.5,
        side,
        side,
    )
}

/// Maps (angle, radius) data to pixels around the plot center.
///
/// Angle zero points up and increases clockwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarProjection {
    center: Point,
    angle_gain: f64,
    radius_gain: f64,
    radius_offset: f64,
}

impl PolarProjection {
    /// Projection of radii in `radius` onto the square inside `plot`.
    ///
    /// Returns `None` for an empty plot or a radius range with no extent.
    pub fn new(plot: Rect, radius: AxisRange, unit: AngleUnit, origin: RadialOrigin) -> Option<Self> {
        let square = squared(plot);
        if square.width <= 0.0 {
            return None;
        }
        let half = f64::from(square.width) * 0.5;
        let (radius_gain, radius_offset) = match origin {
            RadialOrigin::ZeroCentered => {
                let extent = radius.min.abs().max(radius.max.abs());
                (half / extent, 0.0)
            }
            RadialOrigin::FromMinimum => {
                let gain = half / radius.span();
                (gain, -radius.min * gain)
            }
        };
        if !radius_gain.is_finite() {
            return None;
        }
        Some(Self {
            center: square.center(),
            angle_gain: unit.to_radians(),
            radius_gain,
            radius_offset,
        })
    }

    /// Plot center.
    pub const fn center(&self) -> Point {
        self.center
    }

    /// Pixel position of an (angle, radius) pair.
    pub fn to_pixel(&self, angle: f64, radius: f64) -> Point {
        let a = angle * self.angle_gain;
        let r = radius * self.radius_gain + self.radius_offset;
        Point::new(
            (f64::from(self.center.x) + r * a.sin()) as f32,
            (f64::from(self.center.y) - r * a.cos()) as f32,
        )
    }
}
