//! Drawable series.
//!
//! [`Drawable2D`] is the capability a chart needs from anything it plots.
//! [`LineSeries`] implements it for a pair of registry keys, with optional
//! per-point size, color, symbol and label series sharing the same chunk
//! layout.

use crate::hover::{nearest_point, HoverHit, HoverProbe};
use crate::marker::MarkerShape;
use crate::polar::{AngleUnit, PolarProjection, RadialOrigin};
use crate::ticks::{expand_span, format_tick_label};
use crate::viewport::{AxisRange, Bounds, Projection};
use plotwise_core::{
    ChartError, Color, DrawingSurface, LineDash, Point, Result, SeriesRegistry, SeriesStore,
    StrokeStyle, TextAlign, TextBaseline, TextStyle,
};
use serde::{Deserialize, Serialize};

/// Smallest per-point marker size in pixels.
pub const PER_POINT_MIN_SIZE_PX: f32 = 2.0;

/// Largest per-point marker size in pixels.
pub const PER_POINT_MAX_SIZE_PX: f32 = 40.0;

/// Everything a series needs to draw itself.
pub struct DrawContext<'a> {
    /// Target surface
    pub surface: &'a mut dyn DrawingSurface,
    /// Data source
    pub registry: &'a SeriesRegistry,
    /// Plot rectangle and the data window shown in it
    pub projection: Projection,
    /// Size of per-point label text
    pub text_size_px: f32,
}

/// What the legend shows for a series.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    /// Display name
    pub name: String,
    /// Line sample, if the series draws lines
    pub line: Option<StrokeStyle>,
    /// Marker sample, if the series draws markers
    pub marker: Option<(MarkerShape, f32, Color)>,
}

/// Capability of anything a chart can plot.
pub trait Drawable2D {
    /// Display name, also used by the legend.
    fn name(&self) -> &str;

    /// Extent of the series' data, or `None` when it has none.
    fn data_bounds(&self, registry: &SeriesRegistry) -> Option<Bounds>;

    /// Draw on cartesian axes.
    fn draw(&self, ctx: &mut DrawContext<'_>) -> Result<()>;

    /// Draw on polar axes: x is the angle, y the radius.
    fn draw_polar(&self, ctx: &mut DrawContext<'_>) -> Result<()>;

    /// Closest point to `probe`, if any lies within its radius.
    fn mouse_over_hit_test(
        &self,
        registry: &SeriesRegistry,
        probe: &HoverProbe,
        projection: &Projection,
        polar: bool,
    ) -> Option<HoverHit>;

    /// Legend swatch and name.
    fn legend_entry(&self) -> LegendEntry;

    /// Color of the hover ring.
    fn highlight_color(&self) -> Color {
        let entry = self.legend_entry();
        entry
            .marker
            .map(|(_, _, c)| c)
            .or_else(|| entry.line.map(|l| l.color))
            .unwrap_or(Color::BLACK)
    }
}

/// Fastest drawing path a series qualifies for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccelerationType {
    /// One polyline, no markers
    LineOnly,
    /// Uniform markers, no line
    MarkerOnly,
    /// Polyline plus uniform markers
    LineAndMarker,
    /// Markers styled point by point
    PerPoint,
}

/// Appearance of a line series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeriesOptions {
    /// Display name
    pub name: String,
    /// Line color; `None` draws no line
    pub line_color: Option<Color>,
    /// Line width
    pub line_size_px: f32,
    /// Line dash
    pub line_dash: LineDash,
    /// Marker color; `None` draws no uniform markers
    pub marker_color: Option<Color>,
    /// Marker shape; `None` draws no uniform markers
    pub marker_shape: Option<MarkerShape>,
    /// Uniform marker size
    pub marker_size_px: f32,
    /// Per-point color at the smallest color value
    pub color_low: Color,
    /// Per-point color at the largest color value
    pub color_high: Color,
    /// Per-point label color
    pub label_color: Color,
    /// Unit of x in polar mode
    pub polar_angle: AngleUnit,
    /// Radius origin in polar mode
    pub polar_range: RadialOrigin,
}

impl Default for SeriesOptions {
    fn default() -> Self {
        Self {
            name: String::new(),
            line_color: Some(Color::palette(0)),
            line_size_px: 1.0,
            line_dash: LineDash::Solid,
            marker_color: None,
            marker_shape: None,
            marker_size_px: 4.0,
            color_low: Color::rgb(0.0, 0.0, 1.0),
            color_high: Color::rgb(1.0, 0.0, 0.0),
            label_color: Color::BLACK,
            polar_angle: AngleUnit::Radians,
            polar_range: RadialOrigin::ZeroCentered,
        }
    }
}

impl SeriesOptions {
    /// Line-only options in `color`.
    pub fn line(name: impl Into<String>, color: Color) -> Self {
        Self {
            name: name.into(),
            line_color: Some(color),
            ..Self::default()
        }
    }

    /// Marker-only options.
    pub fn markers(name: impl Into<String>, shape: MarkerShape, color: Color) -> Self {
        Self {
            name: name.into(),
            line_color: None,
            marker_color: Some(color),
            marker_shape: Some(shape),
            ..Self::default()
        }
    }

    /// Add uniform markers.
    pub fn with_markers(mut self, shape: MarkerShape, size_px: f32, color: Color) -> Self {
        self.marker_shape = Some(shape);
        self.marker_size_px = size_px;
        self.marker_color = Some(color);
        self
    }

    /// Change the line dash.
    pub fn with_dash(mut self, dash: LineDash) -> Self {
        self.line_dash = dash;
        self
    }

    /// Change the polar interpretation of x and y.
    pub fn with_polar(mut self, angle: AngleUnit, range: RadialOrigin) -> Self {
        self.polar_angle = angle;
        self.polar_range = range;
        self
    }

    fn stroke(&self) -> Option<StrokeStyle> {
        self.line_color.map(|color| {
            StrokeStyle::solid(color, self.line_size_px.max(0.0)).dashed(self.line_dash.clone())
        })
    }

    fn uniform_marker(&self) -> Option<(MarkerShape, f32, Color)> {
        match (self.marker_shape, self.marker_color) {
            (Some(shape), Some(color)) if self.marker_size_px > 0.0 => {
                Some((shape, self.marker_size_px, color))
            }
            _ => None,
        }
    }
}

/// An x/y series drawn as a polyline and/or markers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSeries {
    /// Appearance
    pub options: SeriesOptions,
    /// Registry key of the x values
    pub x_key: String,
    /// Registry key of the y values
    pub y_key: String,
    /// Per-point marker sizes
    pub values_key: Option<String>,
    /// Per-point marker colors
    pub colors_key: Option<String>,
    /// Per-point marker shapes
    pub symbols_key: Option<String>,
    /// Per-point text labels
    pub labels_key: Option<String>,
}

/// Resolved per-point stores with their normalization.
struct PerPoint<'r> {
    values: Option<(&'r SeriesStore, AxisRange)>,
    colors: Option<(&'r SeriesStore, AxisRange)>,
    symbols: Option<&'r SeriesStore>,
    labels: Option<&'r SeriesStore>,
}

impl LineSeries {
    /// Series plotting `y_key` against `x_key` with default options.
    pub fn new(x_key: impl Into<String>, y_key: impl Into<String>) -> Self {
        Self {
            options: SeriesOptions::default(),
            x_key: x_key.into(),
            y_key: y_key.into(),
            values_key: None,
            colors_key: None,
            symbols_key: None,
            labels_key: None,
        }
    }

    /// Replace the appearance.
    pub fn with_options(mut self, options: SeriesOptions) -> Self {
        self.options = options;
        self
    }

    /// Size markers by the values in `key`.
    pub fn with_values(mut self, key: impl Into<String>) -> Self {
        self.values_key = Some(key.into());
        self
    }

    /// Color markers by the values in `key`.
    pub fn with_colors(mut self, key: impl Into<String>) -> Self {
        self.colors_key = Some(key.into());
        self
    }

    /// Pick marker shapes by the values in `key`.
    pub fn with_symbols(mut self, key: impl Into<String>) -> Self {
        self.symbols_key = Some(key.into());
        self
    }

    /// Label markers with the values in `key`.
    pub fn with_labels(mut self, key: impl Into<String>) -> Self {
        self.labels_key = Some(key.into());
        self
    }

    /// Drawing path for the current options.
    pub fn acceleration(&self) -> AccelerationType {
        let per_point = self.values_key.is_some()
            || self.colors_key.is_some()
            || self.symbols_key.is_some()
            || self.labels_key.is_some();
        if per_point {
            return AccelerationType::PerPoint;
        }
        match (self.options.line_color, self.options.uniform_marker()) {
            (_, None) => AccelerationType::LineOnly,
            (None, Some(_)) => AccelerationType::MarkerOnly,
            (Some(_), Some(_)) => AccelerationType::LineAndMarker,
        }
    }

    fn stores<'r>(&self, registry: &'r SeriesRegistry) -> Result<(&'r SeriesStore, &'r SeriesStore)> {
        let x = registry.require(&self.x_key)?;
        let y = registry.require(&self.y_key)?;
        if x.chunk_count() != y.chunk_count() {
            return Err(ChartError::MisalignedSeries {
                x: self.x_key.clone(),
                y: self.y_key.clone(),
            });
        }
        Ok((x, y))
    }

    fn per_point<'r>(&self, registry: &'r SeriesRegistry) -> PerPoint<'r> {
        let lookup = |key: &Option<String>| key.as_deref().and_then(|k| registry.get(k));
        let normalized = |store: &'r SeriesStore| {
            let (lo, hi) = expand_span(store.min().unwrap_or(0.0), store.max().unwrap_or(1.0));
            (store, AxisRange { min: lo, max: hi })
        };
        PerPoint {
            values: lookup(&self.values_key).map(normalized),
            colors: lookup(&self.colors_key).map(normalized),
            symbols: lookup(&self.symbols_key),
            labels: lookup(&self.labels_key),
        }
    }

    /// Chunks whose extents overlap the visible window.
    fn visible_chunks(x: &SeriesStore, y: &SeriesStore, window: &Bounds) -> Vec<usize> {
        let xs = x.chunks_in_range(window.x.min, window.x.max, None);
        y.chunks_in_range(window.y.min, window.y.max, Some(&xs))
    }

    fn render(
        &self,
        ctx: &mut DrawContext<'_>,
        window: &Bounds,
        place: &dyn Fn(f64, f64) -> Point,
    ) -> Result<()> {
        let (x, y) = self.stores(ctx.registry)?;
        let chunks = Self::visible_chunks(x, y, window);
        let accel = self.acceleration();
        log::trace!("drawing '{}' via {accel:?}, {} chunks", self.options.name, chunks.len());

        if let Some(stroke) = self.options.stroke() {
            if accel != AccelerationType::MarkerOnly {
                let mut path = Vec::new();
                for &chunk in &chunks {
                    if let (Some(xs), Some(ys)) = (x.chunk(chunk), y.chunk(chunk)) {
                        path.extend(xs.iter().zip(ys).map(|(&vx, &vy)| place(vx, vy)));
                    }
                }
                if !path.is_empty() {
                    ctx.surface.draw_path(&path, &stroke);
                }
            }
        }

        match accel {
            AccelerationType::LineOnly => {}
            AccelerationType::MarkerOnly | AccelerationType::LineAndMarker => {
                if let Some((shape, size, color)) = self.options.uniform_marker() {
                    for &chunk in &chunks {
                        if let (Some(xs), Some(ys)) = (x.chunk(chunk), y.chunk(chunk)) {
                            for (&vx, &vy) in xs.iter().zip(ys) {
                                shape.draw(ctx.surface, place(vx, vy), size, color);
                            }
                        }
                    }
                }
            }
            AccelerationType::PerPoint => {
                let extra = self.per_point(ctx.registry);
                for &chunk in &chunks {
                    if let (Some(xs), Some(ys)) = (x.chunk(chunk), y.chunk(chunk)) {
                        for (offset, (&vx, &vy)) in xs.iter().zip(ys).enumerate() {
                            self.draw_point(ctx, &extra, chunk, offset, place(vx, vy));
                        }
                    }
                }
            }
        }
        Ok(())
    }

    fn draw_point(
        &self,
        ctx: &mut DrawContext<'_>,
        extra: &PerPoint<'_>,
        chunk: usize,
        offset: usize,
        at: Point,
    ) {
        let sample = |store: &SeriesStore| store.chunk(chunk).and_then(|c| c.get(offset)).copied();
        let opts = &self.options;

        let shape = extra
            .symbols
            .and_then(sample)
            .map(MarkerShape::from_value)
            .or(opts.marker_shape)
            .unwrap_or_default();
        let size = extra
            .values
            .and_then(|(store, range)| {
                let v = sample(store)?;
                let t = ((v - range.min) / range.span()) as f32;
                Some(PER_POINT_MIN_SIZE_PX + t * (PER_POINT_MAX_SIZE_PX - PER_POINT_MIN_SIZE_PX))
            })
            .unwrap_or(opts.marker_size_px);
        let color = extra
            .colors
            .and_then(|(store, range)| {
                let v = sample(store)?;
                let t = ((v - range.min) / range.span()) as f32;
                Some(opts.color_low.lerp(&opts.color_high, t))
            })
            .or(opts.marker_color)
            .unwrap_or(Color::BLACK);

        shape.draw(ctx.surface, at, size, color);

        if let Some(label) = extra.labels.and_then(sample) {
            let style = TextStyle::new(ctx.text_size_px, opts.label_color)
                .anchored(TextAlign::Left, TextBaseline::Middle);
            let text = format_tick_label(label, 1.0);
            ctx.surface
                .draw_text(&text, Point::new(at.x + size * 0.5 + 2.0, at.y), &style);
        }
    }

    fn polar_projection(&self, ctx: &DrawContext<'_>) -> Option<PolarProjection> {
        PolarProjection::new(
            ctx.projection.rect,
            ctx.projection.bounds.y,
            self.options.polar_angle,
            self.options.polar_range,
        )
    }
}

impl Drawable2D for LineSeries {
    fn name(&self) -> &str {
        &self.options.name
    }

    fn data_bounds(&self, registry: &SeriesRegistry) -> Option<Bounds> {
        let x = registry.get(&self.x_key)?;
        let y = registry.get(&self.y_key)?;
        Some(Bounds::new(
            AxisRange::new(x.min()?, x.max()?),
            AxisRange::new(y.min()?, y.max()?),
        ))
    }

    fn draw(&self, ctx: &mut DrawContext<'_>) -> Result<()> {
        let projection = ctx.projection;
        self.render(ctx, &projection.bounds, &|x, y| projection.to_pixel(x, y))
    }

    fn draw_polar(&self, ctx: &mut DrawContext<'_>) -> Result<()> {
        let Some(polar) = self.polar_projection(ctx) else {
            log::debug!("polar plot for '{}' has no extent, skipped", self.options.name);
            return Ok(());
        };
        let window = ctx.projection.bounds;
        self.render(ctx, &window, &|angle, radius| polar.to_pixel(angle, radius))
    }

    fn mouse_over_hit_test(
        &self,
        registry: &SeriesRegistry,
        probe: &HoverProbe,
        projection: &Projection,
        polar: bool,
    ) -> Option<HoverHit> {
        let (x, y) = self.stores(registry).ok()?;
        if !polar {
            return nearest_point(x, y, probe, projection);
        }

        let mapping = PolarProjection::new(
            projection.rect,
            projection.bounds.y,
            self.options.polar_angle,
            self.options.polar_range,
        )?;
        let limit = f64::from(probe.radius_px).powi(2);
        let mut best: Option<HoverHit> = None;
        let mut global = 0;
        for chunk in 0..x.chunk_count() {
            let (Some(xs), Some(ys)) = (x.chunk(chunk), y.chunk(chunk)) else {
                break;
            };
            for (offset, (&vx, &vy)) in xs.iter().zip(ys).enumerate() {
                let pixel = mapping.to_pixel(vx, vy);
                let d = f64::from(pixel.distance_squared(&probe.pixel));
                let bound = best.as_ref().map_or(limit, |b| b.distance_sq);
                let better = if best.is_some() { d < bound } else { d <= bound };
                if better {
                    best = Some(HoverHit {
                        series_index: 0,
                        chunk,
                        offset,
                        global: global + offset,
                        x: vx,
                        y: vy,
                        pixel,
                        distance_sq: d,
                    });
                }
            }
            global += xs.len();
        }
        best
    }

    fn legend_entry(&self) -> LegendEntry {
        let accel = self.acceleration();
        LegendEntry {
            name: self.options.name.trim().to_string(),
            line: self.options.stroke().filter(|_| accel != AccelerationType::MarkerOnly),
            marker: self.options.uniform_marker(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plotwise_core::{DrawCommand, Rect, RecordingSurface};

    fn registry() -> SeriesRegistry {
        let mut reg = SeriesRegistry::new();
        let mut x = SeriesStore::new("x");
        x.push(vec![0.0, 1.0, 2.0]).expect("non-empty");
        x.push(vec![10.0, 11.0]).expect("non-empty");
        let mut y = SeriesStore::new("y").with_index_key("x");
        y.push(vec![0.0, 5.0, 10.0]).expect("non-empty");
        y.push(vec![5.0, 6.0]).expect("non-empty");
        let mut v = SeriesStore::new("v");
        v.push(vec![0.0, 1.0, 2.0]).expect("non-empty");
        v.push(vec![3.0, 4.0]).expect("non-empty");
        reg.add(x);
        reg.add(y);
        reg.add(v);
        reg
    }

    fn projection(x: (f64, f64)) -> Projection {
        let bounds = Bounds::new(AxisRange::new(x.0, x.1), AxisRange::new(0.0, 10.0));
        Projection::new(Rect::new(0.0, 0.0, 100.0, 100.0), bounds).expect("non-empty")
    }

    fn draw(series: &LineSeries, reg: &SeriesRegistry, x: (f64, f64)) -> RecordingSurface {
        let mut surface = RecordingSurface::new();
        let mut ctx = DrawContext {
            surface: &mut surface,
            registry: reg,
            projection: projection(x),
            text_size_px: 11.0,
        };
        series.draw(&mut ctx).expect("drawable");
        surface
    }

    #[test]
    fn test_acceleration_classification() {
        let line = LineSeries::new("x", "y");
        assert_eq!(line.acceleration(), AccelerationType::LineOnly);
        let markers = LineSeries::new("x", "y")
            .with_options(SeriesOptions::markers("m", MarkerShape::Square, Color::BLACK));
        assert_eq!(markers.acceleration(), AccelerationType::MarkerOnly);
        let both = LineSeries::new("x", "y").with_options(
            SeriesOptions::default().with_markers(MarkerShape::Diamond, 5.0, Color::WHITE),
        );
        assert_eq!(both.acceleration(), AccelerationType::LineAndMarker);
        assert_eq!(
            LineSeries::new("x", "y").with_labels("v").acceleration(),
            AccelerationType::PerPoint
        );
    }

    #[test]
    fn test_line_is_one_continuous_path() {
        let reg = registry();
        let surface = draw(&LineSeries::new("x", "y"), &reg, (0.0, 20.0));
        let paths: Vec<usize> = surface
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Path { points, .. } => Some(points.len()),
                _ => None,
            })
            .collect();
        assert_eq!(paths, vec![5]);
    }

    #[test]
    fn test_chunks_outside_window_are_skipped() {
        let reg = registry();
        let series = LineSeries::new("x", "y")
            .with_options(SeriesOptions::markers("m", MarkerShape::Square, Color::BLACK));
        let surface = draw(&series, &reg, (0.0, 5.0));
        assert_eq!(surface.count_where(|c| matches!(c, DrawCommand::Polygon { .. })), 3);
    }

    #[test]
    fn test_per_point_sizes_span_min_to_cap() {
        let reg = registry();
        let series = LineSeries::new("x", "y")
            .with_options(SeriesOptions::markers("p", MarkerShape::Circle, Color::BLACK))
            .with_values("v");
        let surface = draw(&series, &reg, (0.0, 20.0));
        let radii: Vec<f32> = surface
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Circle { radius, .. } => Some(*radius),
                _ => None,
            })
            .collect();
        assert_eq!(radii.len(), 5);
        assert_eq!(radii[0], PER_POINT_MIN_SIZE_PX * 0.5);
        assert_eq!(radii[4], PER_POINT_MAX_SIZE_PX * 0.5);
    }

    #[test]
    fn test_per_point_labels_and_symbols() {
        let reg = registry();
        let series = LineSeries::new("x", "y")
            .with_options(SeriesOptions::markers("p", MarkerShape::Circle, Color::BLACK))
            .with_symbols("v")
            .with_labels("v");
        let surface = draw(&series, &reg, (0.0, 20.0));
        assert_eq!(surface.texts(), vec!["0", "1", "2", "3", "4"]);
        // Symbol 0 is a circle, the rest are polygons.
        assert_eq!(surface.count_where(|c| matches!(c, DrawCommand::Circle { .. })), 1);
        assert_eq!(surface.count_where(|c| matches!(c, DrawCommand::Polygon { .. })), 4);
    }

    #[test]
    fn test_missing_key_is_an_error() {
        let reg = registry();
        let mut surface = RecordingSurface::new();
        let mut ctx = DrawContext {
            surface: &mut surface,
            registry: &reg,
            projection: projection((0.0, 1.0)),
            text_size_px: 11.0,
        };
        let err = LineSeries::new("x", "nope").draw(&mut ctx);
        assert!(matches!(err, Err(ChartError::SeriesNotFound { .. })));
    }

    #[test]
    fn test_misaligned_chunks_are_rejected() {
        let mut reg = registry();
        let mut short = SeriesStore::new("short");
        short.push(vec![1.0]).expect("non-empty");
        reg.add(short);
        let mut surface = RecordingSurface::new();
        let mut ctx = DrawContext {
            surface: &mut surface,
            registry: &reg,
            projection: projection((0.0, 1.0)),
            text_size_px: 11.0,
        };
        let err = LineSeries::new("x", "short").draw(&mut ctx);
        assert!(matches!(err, Err(ChartError::MisalignedSeries { .. })));
    }

    #[test]
    fn test_data_bounds_and_legend() {
        let reg = registry();
        let series = LineSeries::new("x", "y").with_options(SeriesOptions::line(" cpu ", Color::BLACK));
        let b = series.data_bounds(&reg).expect("bounds");
        assert_eq!(b.x, AxisRange::new(0.0, 11.0));
        assert_eq!(b.y, AxisRange::new(0.0, 10.0));
        let entry = series.legend_entry();
        assert_eq!(entry.name, "cpu");
        assert!(entry.line.is_some());
        assert!(entry.marker.is_none());
    }

    #[test]
    fn test_polar_draw_places_points_around_center() {
        let reg = registry();
        let series = LineSeries::new("x", "y")
            .with_options(SeriesOptions::markers("p", MarkerShape::Square, Color::BLACK));
        let mut surface = RecordingSurface::new();
        let mut ctx = DrawContext {
            surface: &mut surface,
            registry: &reg,
            projection: projection((0.0, 20.0)),
            text_size_px: 11.0,
        };
        series.draw_polar(&mut ctx).expect("drawable");
        assert_eq!(surface.count_where(|c| matches!(c, DrawCommand::Polygon { .. })), 5);
    }
}
