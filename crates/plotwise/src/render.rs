//! Chart chrome: text boxes, legend, axes, grid and interaction overlays.
//!
//! Every function draws into an already-computed region and never decides
//! layout on its own.

use crate::hover::HoverHit;
use crate::series::LegendEntry;
use crate::ticks::{format_tick_label, AxisBounds, Orientation};
use crate::viewport::{Bounds, Projection};
use plotwise_core::{
    Color, DrawingSurface, Point, Rect, Side, StrokeStyle, TextAlign, TextBaseline, TextStyle,
};
use plotwise_layout::{AxisOptions, LegendGrid, TextBoxOptions, ZoomOptions};

/// Narrowest viewport outline drawn on the summary strip.
pub const MIN_SUMMARY_WINDOW_PX: f32 = 8.0;

/// Smallest hover ring, in pixels.
const MIN_HOVER_RING_PX: f32 = 4.0;

/// Background, border and centered text of a banner or title.
pub fn draw_text_box(surface: &mut dyn DrawingSurface, region: Rect, opts: &TextBoxOptions) {
    fill_and_outline(
        surface,
        region,
        opts.background_color,
        opts.edge_color,
        opts.border_size_px,
    );
    let text = opts.text.trim();
    if text.is_empty() {
        return;
    }
    let style = TextStyle::new(opts.text_size_px, opts.text_color)
        .anchored(TextAlign::Center, TextBaseline::Middle);
    surface.draw_text(text, region.center(), &style);
}

fn fill_and_outline(
    surface: &mut dyn DrawingSurface,
    region: Rect,
    background: Option<Color>,
    edge: Option<Color>,
    border_px: f32,
) {
    if let Some(color) = background {
        surface.fill_rect(region, color);
    }
    if let Some(color) = edge {
        if border_px > 0.0 {
            let inner = region.inset(border_px * 0.5);
            surface.stroke_rect(inner, &StrokeStyle::solid(color, border_px));
        }
    }
}

/// Legend box: optional heading, then a swatch and name per entry.
pub fn draw_legend(
    surface: &mut dyn DrawingSurface,
    region: Rect,
    grid: &LegendGrid,
    opts: &TextBoxOptions,
    entries: &[LegendEntry],
    margin_px: f32,
) {
    fill_and_outline(
        surface,
        region,
        opts.background_color,
        opts.edge_color,
        opts.border_size_px,
    );
    let ts = opts.text_size_px;
    let heading = opts.text.trim();
    let slots = grid.slots(region, !heading.is_empty(), ts, margin_px);

    if !heading.is_empty() {
        let (_, top) = grid.row_metrics(region, true, ts, margin_px);
        let style =
            TextStyle::new(ts, opts.text_color).anchored(TextAlign::Center, TextBaseline::Top);
        surface.draw_text(heading, Point::new(region.center().x, top), &style);
    }

    let label_style =
        TextStyle::new(ts, opts.text_color).anchored(TextAlign::Left, TextBaseline::Top);
    for (slot, entry) in slots.iter().zip(entries) {
        let mid = Point::new(slot.swatch.x + ts, slot.swatch.y + ts * 0.5);
        if let Some(line) = &entry.line {
            surface.draw_line(
                Point::new(slot.swatch.x, mid.y),
                Point::new(slot.swatch.x + 2.0 * ts, mid.y),
                line,
            );
        }
        if let Some((shape, size, color)) = entry.marker {
            shape.draw(surface, mid, size.min(ts), color);
        }
        surface.draw_text(&entry.name, slot.label, &label_style);
    }
}

/// Tick markers, tick labels and the axis label of one axis.
///
/// Tick positions are normalized over `plot`. Labels of vertical axes are
/// right-aligned against the plot on the left and left-aligned on the right.
pub fn draw_axis(
    surface: &mut dyn DrawingSurface,
    region: Rect,
    plot: Rect,
    opts: &AxisOptions,
    ticks: &AxisBounds,
    margin_px: f32,
) {
    fill_and_outline(
        surface,
        region,
        opts.background_color,
        None,
        opts.border_size_px,
    );
    let marker_len = opts.marker_size_px.max(0.0);
    let marker = opts.marker_color.map(|c| StrokeStyle::solid(c, 1.0));
    let ts = opts.text_size_px;

    for tick in &ticks.ticks {
        let (from, to, anchor, align, baseline) = match opts.loc {
            Side::Bottom => {
                let x = plot.x + tick.position as f32 * plot.width;
                (
                    Point::new(x, region.y),
                    Point::new(x, region.y + marker_len),
                    Point::new(x, region.y + marker_len + margin_px),
                    TextAlign::Center,
                    TextBaseline::Top,
                )
            }
            Side::Top => {
                let x = plot.x + tick.position as f32 * plot.width;
                let base = region.bottom();
                (
                    Point::new(x, base),
                    Point::new(x, base - marker_len),
                    Point::new(x, base - marker_len - margin_px),
                    TextAlign::Center,
                    TextBaseline::Bottom,
                )
            }
            Side::Left => {
                let y = plot.y + tick.position as f32 * plot.height;
                let edge = region.right();
                (
                    Point::new(edge, y),
                    Point::new(edge - marker_len, y),
                    Point::new(edge - marker_len - margin_px, y),
                    TextAlign::Right,
                    TextBaseline::Middle,
                )
            }
            Side::Right => {
                let y = plot.y + tick.position as f32 * plot.height;
                (
                    Point::new(region.x, y),
                    Point::new(region.x + marker_len, y),
                    Point::new(region.x + marker_len + margin_px, y),
                    TextAlign::Left,
                    TextBaseline::Middle,
                )
            }
        };
        if let Some(style) = &marker {
            if marker_len > 0.0 {
                surface.draw_line(from, to, style);
            }
        }
        let style = TextStyle::new(ts, opts.text_color).anchored(align, baseline);
        surface.draw_text(&tick.label, anchor, &style);
    }

    // Rotated text is not available, so only horizontal axes carry a label.
    let label = opts.label.trim();
    if label.is_empty() || !opts.loc.is_horizontal() {
        return;
    }
    let (y, baseline) = match opts.loc {
        Side::Top => (region.y + margin_px, TextBaseline::Top),
        _ => (region.bottom() - margin_px, TextBaseline::Bottom),
    };
    let style = TextStyle::new(ts, opts.text_color).anchored(TextAlign::Center, baseline);
    surface.draw_text(label, Point::new(plot.center().x, y), &style);
}

/// Grid lines across `plot`, one per tick.
pub fn draw_grid(
    surface: &mut dyn DrawingSurface,
    plot: Rect,
    orientation: Orientation,
    ticks: &AxisBounds,
    opts: &AxisOptions,
) {
    let Some(color) = opts.grid_line_color else {
        return;
    };
    let style = StrokeStyle::solid(color, 1.0).dashed(opts.grid_line_dash.clone());
    for tick in &ticks.ticks {
        let t = tick.position as f32;
        let (from, to) = match orientation {
            Orientation::Horizontal => {
                let x = plot.x + t * plot.width;
                (Point::new(x, plot.y), Point::new(x, plot.bottom()))
            }
            Orientation::Vertical => {
                let y = plot.y + t * plot.height;
                (Point::new(plot.x, y), Point::new(plot.right(), y))
            }
        };
        surface.draw_line(from, to, &style);
    }
}

/// Pixel outline of `window` on the summary strip, widened to stay visible.
pub fn summary_window(summary: &Projection, window: &Bounds) -> Rect {
    let a = summary.to_pixel(window.x.min, window.y.max);
    let b = summary.to_pixel(window.x.max, window.y.min);
    let mut rect = Rect::from_corners(a, b);
    for (pos, len) in [(&mut rect.x, &mut rect.width), (&mut rect.y, &mut rect.height)] {
        if *len < MIN_SUMMARY_WINDOW_PX {
            *pos -= (MIN_SUMMARY_WINDOW_PX - *len) * 0.5;
            *len = MIN_SUMMARY_WINDOW_PX;
        }
    }
    rect
}

/// Outline the visible window on the summary strip.
pub fn draw_summary_window(
    surface: &mut dyn DrawingSurface,
    summary: &Projection,
    window: &Bounds,
    color: Color,
) {
    let rect = summary_window(summary, window);
    surface.fill_rect(rect, color.with_alpha(color.a * 0.25));
    surface.stroke_rect(rect, &StrokeStyle::solid(color, 1.0));
}

/// The zoom box being swept.
pub fn draw_zoom_preview(surface: &mut dyn DrawingSurface, rect: Rect, opts: &ZoomOptions) {
    surface.fill_rect(rect, opts.fill_color);
    surface.stroke_rect(rect, &StrokeStyle::solid(opts.stroke_color, 1.0));
}

/// Everything the hover readout needs besides the hit.
#[derive(Debug, Clone)]
pub struct ReadoutStyle {
    /// Series name shown on the first line
    pub name: String,
    /// Ring color
    pub color: Color,
    /// Marker size of the series
    pub marker_size_px: f32,
    /// Readout text size
    pub text_size_px: f32,
    /// Readout text color
    pub text_color: Color,
    /// Spacing inside the readout
    pub margin_px: f32,
    /// Formatting magnitude of x and y
    pub magnitudes: (f64, f64),
}

/// Ring around the hovered point and a boxed name/x/y readout beside it.
///
/// The box flips to the other side of the point when it would leave `plot`.
pub fn draw_hover_readout(
    surface: &mut dyn DrawingSurface,
    plot: Rect,
    hit: &HoverHit,
    style: &ReadoutStyle,
) {
    let ring = style.marker_size_px.max(MIN_HOVER_RING_PX) + 2.0;
    let p = hit.pixel;
    surface.stroke_rect(
        Rect::new(p.x - ring * 0.5, p.y - ring * 0.5, ring, ring),
        &StrokeStyle::solid(style.color, 1.0),
    );

    let lines = [
        style.name.trim().to_string(),
        format!("x: {}", format_tick_label(hit.x, style.magnitudes.0)),
        format!("y: {}", format_tick_label(hit.y, style.magnitudes.1)),
    ];
    let (ts, m) = (style.text_size_px, style.margin_px);
    let widest = lines
        .iter()
        .map(|l| surface.measure_width(l, ts))
        .fold(0.0f32, f32::max);
    let width = widest + 2.0 * m;
    let height = lines.len() as f32 * (ts + m) + m;

    let offset = ring * 0.5 + m;
    let x = if p.x + offset + width > plot.right() {
        p.x - offset - width
    } else {
        p.x + offset
    };
    let y = if p.y + offset + height > plot.bottom() {
        p.y - offset - height
    } else {
        p.y + offset
    };
    let bg = Rect::new(x, y, width, height);
    surface.fill_rect(bg, Color::WHITE);
    surface.stroke_rect(bg, &StrokeStyle::solid(style.color, 1.0));

    let text = TextStyle::new(ts, style.text_color).anchored(TextAlign::Left, TextBaseline::Top);
    for (i, line) in lines.iter().enumerate() {
        let ly = y + m + i as f32 * (ts + m);
        surface.draw_text(line, Point::new(x + m, ly), &text);
    }
}
