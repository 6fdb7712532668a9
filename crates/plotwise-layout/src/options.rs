//! Chart configuration as immutable value objects.
//!
//! Every record has a `Default` carrying the stock look, plus consuming
//! `with_*` builders. Changing a chart's look means building a new
//! [`GraphOptions`] and handing it over; nothing is edited in place.

use plotwise_core::{Color, LineDash, Side};
use serde::{Deserialize, Serialize};

/// Default spacing between chart elements, in pixels.
pub const DEFAULT_MARGIN_PX: f32 = 4.0;
/// Default font size, in pixels.
pub const DEFAULT_TEXT_SIZE_PX: f32 = 11.0;
/// Default tick marker length, in pixels.
pub const DEFAULT_MARKER_SIZE_PX: f32 = 6.0;

/// Plot geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GraphType {
    /// Cartesian x/y plot
    #[default]
    #[serde(rename = "2D")]
    Cartesian,
    /// Polar plot: x is the angle, y the radius
    #[serde(rename = "2DPolar")]
    Polar,
}

/// How a zoom-box drag maps to axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoomMode {
    /// Box zoom, collapsing to one axis for long thin drags
    #[default]
    Auto,
    /// Zoom the x axis only
    X,
    /// Zoom the y axis only
    Y,
    /// Box zoom on both axes, never collapsed
    Xy,
}

/// When the summary strip is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryBehavior {
    /// Only while zoomed in
    #[default]
    OnZoom,
    /// Always
    Always,
    /// Never
    None,
}

/// Where the summary strip sits relative to the main plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryAlignment {
    /// Above the main plot
    #[default]
    Top,
    /// Below the main plot
    Bottom,
}

/// A framed text region: banner, title or legend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextBoxOptions {
    /// Whether the region is laid out and drawn
    pub show: bool,
    /// Text content (legend: optional heading)
    pub text: String,
    /// Edge the region is carved from
    pub loc: Side,
    /// Font size
    pub text_size_px: f32,
    /// Frame width
    pub border_size_px: f32,
    /// Thickness floor
    pub min_size: Option<f32>,
    /// Fill behind the region
    pub background_color: Option<Color>,
    /// Frame color; no frame when absent
    pub edge_color: Option<Color>,
    /// Text color
    pub text_color: Color,
}

impl Default for TextBoxOptions {
    fn default() -> Self {
        Self {
            show: false,
            text: String::new(),
            loc: Side::Top,
            text_size_px: DEFAULT_TEXT_SIZE_PX,
            border_size_px: 1.0,
            min_size: None,
            background_color: None,
            edge_color: None,
            text_color: Color::BLACK,
        }
    }
}

impl TextBoxOptions {
    /// A visible box showing `text` at the top.
    pub fn titled(text: impl Into<String>) -> Self {
        Self {
            show: true,
            text: text.into(),
            ..Self::default()
        }
    }

    /// A visible legend at the bottom with no heading.
    pub fn legend() -> Self {
        Self {
            show: true,
            loc: Side::Bottom,
            ..Self::default()
        }
    }

    /// Move to another edge.
    pub fn at(mut self, loc: Side) -> Self {
        self.loc = loc;
        self
    }

    /// Set the font size.
    pub fn with_text_size(mut self, px: f32) -> Self {
        self.text_size_px = px;
        self
    }

    /// Set the frame width.
    pub fn with_border(mut self, px: f32) -> Self {
        self.border_size_px = px;
        self
    }

    /// Set the thickness floor.
    pub fn with_min_size(mut self, px: f32) -> Self {
        self.min_size = Some(px);
        self
    }

    /// Set the background fill.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = Some(color);
        self
    }

    /// Set the frame color.
    pub fn with_edge_color(mut self, color: Color) -> Self {
        self.edge_color = Some(color);
        self
    }

    /// Hide or show.
    pub fn shown(mut self, show: bool) -> Self {
        self.show = show;
        self
    }
}

/// An axis region with tick markers, labels and grid lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisOptions {
    /// Whether the axis is laid out and drawn
    pub show: bool,
    /// Axis caption; empty for none
    pub label: String,
    /// Edge the axis is carved from
    pub loc: Side,
    /// Font size for tick labels and caption
    pub text_size_px: f32,
    /// Tick marker length
    pub marker_size_px: f32,
    /// Frame width
    pub border_size_px: f32,
    /// Thickness floor
    pub min_size: Option<f32>,
    /// Fill behind the axis
    pub background_color: Option<Color>,
    /// Axis line and tick color; no markers when absent
    pub marker_color: Option<Color>,
    /// Tick label color
    pub text_color: Color,
    /// Grid line color across the plot; no grid when absent
    pub grid_line_color: Option<Color>,
    /// Grid line dash
    pub grid_line_dash: LineDash,
}

impl Default for AxisOptions {
    fn default() -> Self {
        Self {
            show: true,
            label: String::new(),
            loc: Side::Bottom,
            text_size_px: DEFAULT_TEXT_SIZE_PX,
            marker_size_px: DEFAULT_MARKER_SIZE_PX,
            border_size_px: 0.0,
            min_size: None,
            background_color: None,
            marker_color: Some(Color::BLACK),
            text_color: Color::BLACK,
            grid_line_color: Some(Color::GRID),
            grid_line_dash: LineDash::Dash,
        }
    }
}

impl AxisOptions {
    /// Shown x axis at the bottom.
    pub fn x_axis() -> Self {
        Self::default()
    }

    /// Shown y axis on the left.
    pub fn y_axis() -> Self {
        Self {
            loc: Side::Left,
            ..Self::default()
        }
    }

    /// Hidden secondary y axis on the right.
    pub fn y_axis2() -> Self {
        Self {
            show: false,
            loc: Side::Right,
            ..Self::default()
        }
    }

    /// Set the caption.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Move to another edge.
    pub fn at(mut self, loc: Side) -> Self {
        self.loc = loc;
        self
    }

    /// Set the tick marker length.
    pub fn with_marker_size(mut self, px: f32) -> Self {
        self.marker_size_px = px;
        self
    }

    /// Set the font size.
    pub fn with_text_size(mut self, px: f32) -> Self {
        self.text_size_px = px;
        self
    }

    /// Set the thickness floor.
    pub fn with_min_size(mut self, px: f32) -> Self {
        self.min_size = Some(px);
        self
    }

    /// Set grid line color and dash; `None` disables the grid.
    pub fn with_grid(mut self, color: Option<Color>, dash: LineDash) -> Self {
        self.grid_line_color = color;
        self.grid_line_dash = dash;
        self
    }

    /// Hide or show.
    pub fn shown(mut self, show: bool) -> Self {
        self.show = show;
        self
    }
}

/// The auxiliary zoomed-out strip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryOptions {
    /// When to show the strip
    pub behavior: SummaryBehavior,
    /// Strip height as a percentage of the plot area, clamped to 1..=100
    pub size_percent: f32,
    /// Placement relative to the main plot
    pub alignment: SummaryAlignment,
    /// Lower bound on the strip height
    pub min_size_px: f32,
    /// Upper bound on the strip height
    pub max_size_px: Option<f32>,
    /// Color of the viewport outline drawn on the strip
    pub marker_color: Color,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            behavior: SummaryBehavior::OnZoom,
            size_percent: 25.0,
            alignment: SummaryAlignment::Top,
            min_size_px: 0.0,
            max_size_px: None,
            marker_color: Color::rgb(0.5, 0.5, 0.5),
        }
    }
}

impl SummaryOptions {
    /// Set when the strip shows.
    pub fn with_behavior(mut self, behavior: SummaryBehavior) -> Self {
        self.behavior = behavior;
        self
    }

    /// Set the placement.
    pub fn aligned(mut self, alignment: SummaryAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Set the height percentage.
    pub fn with_size_percent(mut self, percent: f32) -> Self {
        self.size_percent = percent;
        self
    }

    /// Set pixel bounds on the height.
    pub fn with_size_bounds(mut self, min_px: f32, max_px: Option<f32>) -> Self {
        self.min_size_px = min_px;
        self.max_size_px = max_px;
        self
    }

    /// Whether the strip is visible for the given zoom state.
    pub fn visible(&self, zoom_active: bool) -> bool {
        match self.behavior {
            SummaryBehavior::Always => true,
            SummaryBehavior::OnZoom => zoom_active,
            SummaryBehavior::None => false,
        }
    }

    /// Strip height for a plot area of `available` pixels.
    pub fn strip_height(&self, available: f32) -> f32 {
        let percent = if self.size_percent.is_nan() {
            25.0
        } else {
            self.size_percent.clamp(1.0, 100.0)
        };
        let mut h = (available * percent / 100.0).max(self.min_size_px);
        if let Some(max) = self.max_size_px {
            h = h.min(max);
        }
        h.clamp(0.0, available.max(0.0))
    }
}

/// Zoom-box appearance and behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomOptions {
    /// Axis mapping of zoom drags
    pub mode: ZoomMode,
    /// Preview fill
    pub fill_color: Color,
    /// Preview outline
    pub stroke_color: Color,
}

impl Default for ZoomOptions {
    fn default() -> Self {
        Self {
            mode: ZoomMode::Auto,
            fill_color: Color::GRID.with_alpha(0.25),
            stroke_color: Color::GRID,
        }
    }
}

/// Whole-chart settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MainOptions {
    /// Plot geometry
    pub graph_type: GraphType,
    /// Spacing between elements
    pub margin_px: f32,
    /// Fallback font size
    pub text_size_px: f32,
    /// Canvas background
    pub background_color: Color,
    /// Plot frame color; no frame when absent
    pub box_edge_color: Option<Color>,
    /// Plot frame width
    pub box_edge_size_px: f32,
    /// Hover readout color
    pub text_color: Color,
    /// Summary strip, if configured
    pub summary: Option<SummaryOptions>,
    /// Zoom behavior
    pub zoom: ZoomOptions,
}

impl Default for MainOptions {
    fn default() -> Self {
        Self {
            graph_type: GraphType::Cartesian,
            margin_px: DEFAULT_MARGIN_PX,
            text_size_px: DEFAULT_TEXT_SIZE_PX,
            background_color: Color::WHITE,
            box_edge_color: Some(Color::BLACK),
            box_edge_size_px: 1.0,
            text_color: Color::BLACK,
            summary: None,
            zoom: ZoomOptions::default(),
        }
    }
}

/// Every region descriptor of a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphOptions {
    /// Whole-chart settings
    pub main: MainOptions,
    /// Outermost text strip
    pub banner: TextBoxOptions,
    /// Title strip
    pub title: TextBoxOptions,
    /// Series legend
    pub legend: TextBoxOptions,
    /// Horizontal axis
    pub x_axis: AxisOptions,
    /// Primary vertical axis
    pub y_axis: AxisOptions,
    /// Secondary vertical axis
    pub y_axis2: AxisOptions,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            main: MainOptions::default(),
            banner: TextBoxOptions::default(),
            title: TextBoxOptions::default(),
            legend: TextBoxOptions::default().at(Side::Bottom),
            x_axis: AxisOptions::x_axis(),
            y_axis: AxisOptions::y_axis(),
            y_axis2: AxisOptions::y_axis2(),
        }
    }
}

impl GraphOptions {
    /// Replace the banner.
    pub fn with_banner(mut self, banner: TextBoxOptions) -> Self {
        self.banner = banner;
        self
    }

    /// Replace the title.
    pub fn with_title(mut self, title: TextBoxOptions) -> Self {
        self.title = title;
        self
    }

    /// Replace the legend.
    pub fn with_legend(mut self, legend: TextBoxOptions) -> Self {
        self.legend = legend;
        self
    }

    /// Replace the x axis.
    pub fn with_x_axis(mut self, axis: AxisOptions) -> Self {
        self.x_axis = axis;
        self
    }

    /// Replace the y axis.
    pub fn with_y_axis(mut self, axis: AxisOptions) -> Self {
        self.y_axis = axis;
        self
    }

    /// Replace the secondary y axis.
    pub fn with_y_axis2(mut self, axis: AxisOptions) -> Self {
        self.y_axis2 = axis;
        self
    }

    /// Configure the summary strip.
    pub fn with_summary(mut self, summary: SummaryOptions) -> Self {
        self.main.summary = Some(summary);
        self
    }

    /// Set the zoom mode.
    pub fn with_zoom_mode(mut self, mode: ZoomMode) -> Self {
        self.main.zoom.mode = mode;
        self
    }

    /// Set the plot geometry.
    pub fn with_graph_type(mut self, graph_type: GraphType) -> Self {
        self.main.graph_type = graph_type;
        self
    }

    /// Set the element spacing.
    pub fn with_margin(mut self, px: f32) -> Self {
        self.main.margin_px = px;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = GraphOptions::default();
        assert_eq!(opts.main.margin_px, 4.0);
        assert!(!opts.title.show);
        assert_eq!(opts.legend.loc, Side::Bottom);
        assert_eq!(opts.x_axis.loc, Side::Bottom);
        assert_eq!(opts.y_axis.loc, Side::Left);
        assert_eq!(opts.y_axis2.loc, Side::Right);
        assert!(!opts.y_axis2.show);
        assert_eq!(opts.x_axis.marker_size_px, 6.0);
        assert_eq!(opts.x_axis.grid_line_dash, LineDash::Dash);
    }

    #[test]
    fn test_builders_produce_new_values() {
        let base = GraphOptions::default();
        let titled = base.clone().with_title(TextBoxOptions::titled("Load"));
        assert!(!base.title.show);
        assert!(titled.title.show);
        assert_eq!(titled.title.text, "Load");
    }

    #[test]
    fn test_summary_visibility() {
        let s = SummaryOptions::default();
        assert!(!s.visible(false));
        assert!(s.visible(true));
        let s = s.with_behavior(SummaryBehavior::Always);
        assert!(s.visible(false));
        let s = s.with_behavior(SummaryBehavior::None);
        assert!(!s.visible(true));
    }

    #[test]
    fn test_strip_height_clamps() {
        let s = SummaryOptions::default();
        assert_eq!(s.strip_height(200.0), 50.0);
        assert_eq!(s.clone().with_size_percent(500.0).strip_height(200.0), 200.0);
        assert_eq!(s.clone().with_size_percent(0.0).strip_height(200.0), 2.0);
        let bounded = s.with_size_bounds(60.0, Some(80.0));
        assert_eq!(bounded.strip_height(200.0), 60.0);
        assert_eq!(bounded.strip_height(1000.0), 80.0);
        assert_eq!(bounded.strip_height(30.0), 30.0);
    }

    #[test]
    fn test_options_deserialize_with_defaults() {
        let json = r#"{
            "main": { "graph_type": "2DPolar", "zoom": { "mode": "xy" } },
            "title": { "show": true, "text": "Wind", "text_size_px": 14 }
        }"#;
        let opts: GraphOptions = serde_json::from_str(json).unwrap();
        assert_eq!(opts.main.graph_type, GraphType::Polar);
        assert_eq!(opts.main.zoom.mode, ZoomMode::Xy);
        assert_eq!(opts.title.text_size_px, 14.0);
        assert_eq!(opts.title.border_size_px, 1.0);
        assert_eq!(opts.main.margin_px, 4.0);
    }
}
