//! Legend row/column packing.

use plotwise_core::{Point, Rect, TextMeasurer};
use serde::{Deserialize, Serialize};

/// How legend entries are packed into a region.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LegendGrid {
    /// Entry rows, excluding any heading row
    pub rows: usize,
    /// Entries per row
    pub columns: usize,
    /// Widest entry: name plus swatch allowance
    pub column_width: f32,
    /// Measured name width of each entry
    pub label_widths: Vec<f32>,
}

/// Where one legend entry is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegendSlot {
    /// Top-left of the swatch
    pub swatch: Point,
    /// Top-left of the name text
    pub label: Point,
}

impl LegendGrid {
    /// Pack `names` in rows across `available_width`.
    pub fn horizontal(
        names: &[&str],
        available_width: f32,
        text_size_px: f32,
        margin_px: f32,
        measurer: &dyn TextMeasurer,
    ) -> Self {
        let label_widths = measure_all(names, text_size_px, measurer);
        let widest = label_widths.iter().copied().fold(0.0f32, f32::max);
        let column_width = widest + 2.0 * (margin_px + text_size_px);
        let count = names.len();
        if count == 0 {
            return Self {
                column_width,
                ..Self::default()
            };
        }

        let fit = if column_width > 0.0 {
            (available_width / column_width).floor()
        } else {
            count as f32
        };
        let columns = (fit.max(1.0) as usize).min(count);
        Self {
            rows: count.div_ceil(columns),
            columns,
            column_width,
            label_widths,
        }
    }

    /// One entry per row, for legends on the left or right edge.
    pub fn vertical(
        names: &[&str],
        text_size_px: f32,
        margin_px: f32,
        measurer: &dyn TextMeasurer,
    ) -> Self {
        let label_widths = measure_all(names, text_size_px, measurer);
        let widest = label_widths.iter().copied().fold(0.0f32, f32::max);
        Self {
            rows: names.len(),
            columns: usize::from(!names.is_empty()),
            column_width: widest + 2.0 * (margin_px + text_size_px),
            label_widths,
        }
    }

    /// Widest measured name.
    pub fn widest_label(&self) -> f32 {
        self.label_widths.iter().copied().fold(0.0, f32::max)
    }

    /// Row pitch and top offset of the first row inside `region`.
    ///
    /// Rows are centered vertically; when the region is too short the
    /// spacing between rows shrinks, never below one pixel.
    pub fn row_metrics(
        &self,
        region: Rect,
        heading: bool,
        text_size_px: f32,
        margin_px: f32,
    ) -> (f32, f32) {
        let rows = (self.rows + usize::from(heading)) as f32;
        let mut gap = margin_px;
        let mut ideal = (gap + text_size_px) * rows + gap;
        if region.height < ideal {
            gap = ((region.height - text_size_px * rows) / (rows + 1.0)).max(1.0);
            ideal = (gap + text_size_px) * rows + gap;
        }
        (text_size_px + gap, region.y + 0.5 * (region.height - ideal) + gap)
    }

    /// Placement of every entry inside `region`, in entry order.
    pub fn slots(
        &self,
        region: Rect,
        heading: bool,
        text_size_px: f32,
        margin_px: f32,
    ) -> Vec<LegendSlot> {
        if self.columns == 0 {
            return Vec::new();
        }
        let (pitch, mut top) = self.row_metrics(region, heading, text_size_px, margin_px);
        if heading {
            top += pitch;
        }
        let cell = region.width / self.columns as f32;
        let align = ((cell - self.column_width) * 0.5).max(0.0);
        let swatch_w = 2.0 * text_size_px;

        (0..self.label_widths.len())
            .map(|i| {
                let col = (i % self.columns) as f32;
                let row = (i / self.columns) as f32;
                let x = region.x + margin_px + col * cell + align;
                let y = top + row * pitch;
                LegendSlot {
                    swatch: Point::new(x, y),
                    label: Point::new(x + swatch_w + margin_px, y),
                }
            })
            .collect()
    }
}

fn measure_all(names: &[&str], text_size_px: f32, measurer: &dyn TextMeasurer) -> Vec<f32> {
    names
        .iter()
        .map(|n| measurer.measure_width(n.trim(), text_size_px))
        .collect()
}
