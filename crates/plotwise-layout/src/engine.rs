//! Box-carving layout of chart regions.

use plotwise_core::{Rect, Side, Size, TextMeasurer};
use serde::{Deserialize, Serialize};

use crate::legend::LegendGrid;
use crate::options::{AxisOptions, GraphOptions, GraphType, SummaryAlignment, TextBoxOptions};

/// Sample used to size vertical regions when nothing wider is present.
const DIGITS_SAMPLE: &str = "01234";

/// Named chart regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    /// Outermost text strip
    Banner,
    /// Title strip
    Title,
    /// Series legend
    Legend,
    /// Horizontal axis
    XAxis,
    /// Primary vertical axis
    YAxis,
    /// Secondary vertical axis
    YAxis2,
    /// Main plot area
    Graph,
    /// Summary strip plot area
    Summary,
    /// Horizontal axis of the summary strip
    XAxisSummary,
    /// Vertical axis of the summary strip
    YAxisSummary,
}

/// Pixel regions of one chart. Disabled regions are `None`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartLayout {
    /// Whole canvas
    pub canvas: Rect,
    /// Banner strip
    pub banner: Option<Rect>,
    /// Title strip
    pub title: Option<Rect>,
    /// Legend region
    pub legend: Option<Rect>,
    /// Legend packing, present with the legend
    pub legend_grid: Option<LegendGrid>,
    /// Horizontal axis
    pub x_axis: Option<Rect>,
    /// Primary vertical axis
    pub y_axis: Option<Rect>,
    /// Secondary vertical axis
    pub y_axis2: Option<Rect>,
    /// Main plot area
    pub graph: Rect,
    /// Summary strip plot area
    pub summary: Option<Rect>,
    /// Summary strip horizontal axis
    pub x_axis_summary: Option<Rect>,
    /// Summary strip vertical axis
    pub y_axis_summary: Option<Rect>,
}

impl ChartLayout {
    /// The all-zero layout returned for an empty canvas.
    pub fn degenerate() -> Self {
        Self::default()
    }

    /// Every allocated region, including the plot area.
    pub fn regions(&self) -> Vec<(Region, Rect)> {
        let named = [
            (Region::Banner, self.banner),
            (Region::Title, self.title),
            (Region::Legend, self.legend),
            (Region::XAxis, self.x_axis),
            (Region::YAxis, self.y_axis),
            (Region::YAxis2, self.y_axis2),
            (Region::Graph, Some(self.graph)),
            (Region::Summary, self.summary),
            (Region::XAxisSummary, self.x_axis_summary),
            (Region::YAxisSummary, self.y_axis_summary),
        ];
        named
            .into_iter()
            .filter_map(|(region, rect)| rect.map(|r| (region, r)))
            .collect()
    }

    /// Look up one region.
    pub fn get(&self, region: Region) -> Option<Rect> {
        self.regions()
            .into_iter()
            .find(|(r, _)| *r == region)
            .map(|(_, rect)| rect)
    }
}

/// Carves a canvas into chart regions.
///
/// Regions are placed in a fixed order (banner, title, legend, x axis,
/// y axis, secondary y axis), each taking a slice off the remaining
/// rectangle from the side it is configured for. What is left is the plot
/// area, from which an optional summary strip is carved last.
pub struct LayoutEngine<'a> {
    options: &'a GraphOptions,
    measurer: &'a dyn TextMeasurer,
}

impl<'a> LayoutEngine<'a> {
    /// Create an engine for one set of options.
    pub fn new(options: &'a GraphOptions, measurer: &'a dyn TextMeasurer) -> Self {
        Self { options, measurer }
    }

    /// Lay out a `canvas` for series named `legend_names`.
    ///
    /// `zoom_active` decides whether an on-zoom summary strip is shown.
    pub fn compute(&self, canvas: Size, legend_names: &[&str], zoom_active: bool) -> ChartLayout {
        if canvas.is_degenerate() {
            log::debug!(
                "layout requested on empty canvas {}x{}",
                canvas.width,
                canvas.height
            );
            return ChartLayout::degenerate();
        }

        let opts = self.options;
        let mut layout = ChartLayout {
            canvas: Rect::from_size(canvas),
            ..ChartLayout::default()
        };
        let mut rest = layout.canvas;

        (layout.banner, rest) = self.place_text_box(rest, &opts.banner);
        (layout.title, rest) = self.place_text_box(rest, &opts.title);
        (layout.legend, layout.legend_grid, rest) = self.place_legend(rest, legend_names);

        let polar = opts.main.graph_type == GraphType::Polar;
        if !polar {
            (layout.x_axis, rest) = self.place_axis(rest, &opts.x_axis);
            (layout.y_axis, rest) = self.place_axis(rest, &opts.y_axis);
            (layout.y_axis2, rest) = self.place_axis(rest, &opts.y_axis2);
            layout.x_axis = layout.x_axis.map(|x| {
                let verticals = [
                    (layout.y_axis, opts.y_axis.loc),
                    (layout.y_axis2, opts.y_axis2.loc),
                ];
                trim_between_verticals(x, &verticals)
            });
        }
        layout.graph = rest;

        if let Some(summary) = &opts.main.summary {
            if !polar && summary.visible(zoom_active) {
                let strip = summary.strip_height(layout.graph.height);
                self.place_summary(&mut layout, strip);
            }
        }

        log::trace!("computed layout {layout:?}");
        layout
    }

    fn margin(&self) -> f32 {
        self.options.main.margin_px.max(0.0)
    }

    /// Thickness of a strip with `rows` lines of text.
    fn strip_thickness(&self, rows: usize, text_size_px: f32, border_px: f32) -> f32 {
        let m = self.margin();
        m + rows as f32 * (text_size_px + m) + 2.0 * border_px.max(0.0)
    }

    /// Width of a vertical region whose widest text is `text_width`.
    fn column_thickness(&self, text_width: f32, text_size_px: f32, border_px: f32) -> f32 {
        let m = self.margin();
        let digits = self.measurer.measure_width(DIGITS_SAMPLE, text_size_px);
        let tw = text_width.max(digits);
        let body = if tw > 0.0 { tw + m } else { 0.0 };
        m + body + 2.0 * border_px.max(0.0)
    }

    fn place_text_box(&self, rest: Rect, opt: &TextBoxOptions) -> (Option<Rect>, Rect) {
        if !opt.show {
            return (None, rest);
        }
        let text = opt.text.trim();
        let thickness = if opt.loc.is_horizontal() {
            let rows = usize::from(!text.is_empty());
            self.strip_thickness(rows, opt.text_size_px, opt.border_size_px)
        } else {
            let tw = self.measurer.measure_width(text, opt.text_size_px);
            self.column_thickness(tw, opt.text_size_px, opt.border_size_px)
        };
        carve(rest, opt.loc, thickness, opt.min_size)
    }

    fn place_legend(
        &self,
        rest: Rect,
        names: &[&str],
    ) -> (Option<Rect>, Option<LegendGrid>, Rect) {
        let opt = &self.options.legend;
        if !opt.show {
            return (None, None, rest);
        }
        let m = self.margin();
        let heading = opt.text.trim();
        let (grid, thickness) = if opt.loc.is_horizontal() {
            let grid = LegendGrid::horizontal(names, rest.width, opt.text_size_px, m, self.measurer);
            let rows = grid.rows + usize::from(!heading.is_empty());
            let t = self.strip_thickness(rows, opt.text_size_px, opt.border_size_px);
            (grid, t)
        } else {
            let grid = LegendGrid::vertical(names, opt.text_size_px, m, self.measurer);
            let heading_w = self.measurer.measure_width(heading, opt.text_size_px);
            let tw = grid.widest_label().max(heading_w);
            let t = self.column_thickness(tw + 2.0 * (m + opt.text_size_px), opt.text_size_px, opt.border_size_px);
            (grid, t)
        };
        let (region, rest) = carve(rest, opt.loc, thickness, opt.min_size);
        (region, region.map(|_| grid), rest)
    }

    fn place_axis(&self, rest: Rect, opt: &AxisOptions) -> (Option<Rect>, Rect) {
        if !opt.show {
            return (None, rest);
        }
        let label = opt.label.trim();
        let marker = opt.marker_size_px.max(0.0);
        let thickness = if opt.loc.is_horizontal() {
            let rows = 1 + usize::from(!label.is_empty());
            self.strip_thickness(rows, opt.text_size_px, opt.border_size_px) + marker
        } else {
            let tw = self.measurer.measure_width(label, opt.text_size_px);
            self.column_thickness(tw, opt.text_size_px, opt.border_size_px) + marker
        };
        carve(rest, opt.loc, thickness, opt.min_size)
    }

    /// Carve the summary strip of height `strip` out of the plot area and
    /// give it its own axes.
    fn place_summary(&self, layout: &mut ChartLayout, strip: f32) {
        let Some(summary) = &self.options.main.summary else {
            return;
        };
        let axis_h = layout.x_axis.map_or(0.0, |r| r.height);
        let x_axis_at_bottom = self.options.x_axis.loc == Side::Bottom;

        let (mut plot, graph) = match summary.alignment {
            SummaryAlignment::Top => layout.graph.carve(Side::Top, strip),
            SummaryAlignment::Bottom => layout.graph.carve(Side::Bottom, strip),
        };
        layout.graph = graph;
        let axis_h = axis_h.min(plot.height);

        match (summary.alignment, layout.x_axis) {
            (SummaryAlignment::Bottom, Some(x_axis)) if x_axis_at_bottom => {
                // Main axis moves up under the main plot; the strip's axis
                // takes the old spot below it.
                let (moved, below) = plot.carve(Side::Top, axis_h);
                layout.x_axis = Some(Rect::new(x_axis.x, moved.y, x_axis.width, moved.height));
                layout.x_axis_summary = Some(x_axis);
                plot = below;
            }
            (_, Some(x_axis)) => {
                let (axis, above) = plot.carve(Side::Bottom, axis_h);
                layout.x_axis_summary = Some(Rect::new(x_axis.x, axis.y, x_axis.width, axis.height));
                plot = above;
            }
            (_, None) => {}
        }

        let rows = layout.graph;
        layout.y_axis = layout.y_axis.map(|r| r.clip_vertical(rows.y, rows.bottom()));
        layout.y_axis2 = layout.y_axis2.map(|r| r.clip_vertical(rows.y, rows.bottom()));
        layout.y_axis_summary = layout
            .y_axis
            .map(|r| Rect::new(r.x, plot.y, r.width, plot.height));
        layout.summary = Some(plot);
    }
}

/// Slice `thickness` (floored by `min_size`) off `rest` from `side`.
fn carve(rest: Rect, side: Side, thickness: f32, min_size: Option<f32>) -> (Option<Rect>, Rect) {
    let t = min_size.map_or(thickness, |min| thickness.max(min));
    let (slice, rest) = rest.carve(side, t);
    (Some(slice), rest)
}

/// Keep a horizontal axis out of the corners claimed by vertical axes.
fn trim_between_verticals(x_axis: Rect, verticals: &[(Option<Rect>, Side)]) -> Rect {
    let mut left = x_axis.x;
    let mut right = x_axis.right();
    for (axis, side) in verticals {
        match (axis, side) {
            (Some(axis), Side::Left) => left = left.max(axis.right()),
            (Some(axis), Side::Right) => right = right.min(axis.x),
            _ => {}
        }
    }
    x_axis.clip_horizontal(left, right)
}
