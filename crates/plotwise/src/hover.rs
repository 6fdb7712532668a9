//! Nearest-point search under the pointer.

use crate::viewport::Projection;
use plotwise_core::{Point, SeriesStore};

/// Search radius around the pointer, in pixels.
pub const HOVER_RADIUS_PX: f32 = 20.0;

/// Pointer position expressed in data space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverProbe {
    /// Pointer position in pixels
    pub pixel: Point,
    /// Data x under the pointer
    pub x: f64,
    /// Data y under the pointer
    pub y: f64,
    /// Data units per horizontal pixel
    pub scale_x: f64,
    /// Data units per vertical pixel
    pub scale_y: f64,
    /// Search radius in pixels
    pub radius_px: f32,
}

impl HoverProbe {
    /// Probe at `pixel` through `projection` with the default radius.
    pub fn new(projection: &Projection, pixel: Point) -> Self {
        let (x, y) = projection.to_data(pixel);
        Self {
            pixel,
            x,
            y,
            scale_x: projection.scale_x(),
            scale_y: projection.scale_y(),
            radius_px: HOVER_RADIUS_PX,
        }
    }

    /// Search radius converted to data units on x and y.
    pub fn data_radius(&self) -> (f64, f64) {
        let r = f64::from(self.radius_px);
        (r * self.scale_x, r * self.scale_y)
    }

    /// Squared pixel distance from the probe to a data point.
    pub fn distance_sq(&self, x: f64, y: f64) -> f64 {
        let dx = (x - self.x) / self.scale_x;
        let dy = (y - self.y) / self.scale_y;
        dx * dx + dy * dy
    }

    fn radius_sq(&self) -> f64 {
        let r = f64::from(self.radius_px);
        r * r
    }
}

/// Closest data point found under the pointer.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverHit {
    /// Index of the series in draw order
    pub series_index: usize,
    /// Chunk holding the point
    pub chunk: usize,
    /// Offset within the chunk
    pub offset: usize,
    /// Global index of the point
    pub global: usize,
    /// Data x
    pub x: f64,
    /// Data y
    pub y: f64,
    /// Where the point is drawn
    pub pixel: Point,
    /// Squared pixel distance from the pointer
    pub distance_sq: f64,
}

/// Closest point of a paired x/y series within the probe radius.
///
/// Chunks whose extents miss the search box are skipped. Earlier points win
/// ties.
pub fn nearest_point(
    x: &SeriesStore,
    y: &SeriesStore,
    probe: &HoverProbe,
    projection: &Projection,
) -> Option<HoverHit> {
    let (rx, ry) = probe.data_radius();
    let mut best: Option<HoverHit> = None;
    let mut best_d = probe.radius_sq();
    let mut global = 0;

    for chunk in 0..x.chunk_count().min(y.chunk_count()) {
        let (Some(xs), Some(ys)) = (x.chunk(chunk), y.chunk(chunk)) else {
            break;
        };
        let visible = match (x.chunk_bounds(chunk), y.chunk_bounds(chunk)) {
            (Some((xl, xh)), Some((yl, yh))) => {
                xl <= probe.x + rx && xh >= probe.x - rx && yl <= probe.y + ry && yh >= probe.y - ry
            }
            _ => false,
        };
        if visible {
            for (offset, (&vx, &vy)) in xs.iter().zip(ys).enumerate() {
                let d = probe.distance_sq(vx, vy);
                let better = best.as_ref().map_or(d <= best_d, |_| d < best_d);
                if better {
                    best_d = d;
                    best = Some(HoverHit {
                        series_index: 0,
                        chunk,
                        offset,
                        global: global + offset,
                        x: vx,
                        y: vy,
                        pixel: projection.to_pixel(vx, vy),
                        distance_sq: d,
                    });
                }
            }
        }
        global += xs.len();
    }
    best
}

/// Keep the closer of two hits; `current` wins ties.
pub fn closer(current: Option<HoverHit>, candidate: Option<HoverHit>) -> Option<HoverHit> {
    match (current, candidate) {
        (Some(a), Some(b)) => Some(if b.distance_sq < a.distance_sq { b } else { a }),
        (a, b) => a.or(b),
    }
}
