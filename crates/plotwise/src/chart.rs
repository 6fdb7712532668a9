//! The chart orchestrator.
//!
//! A [`Chart`] ties the pieces together: it lays out the canvas, picks
//! ticks, draws chrome and series through a [`DrawingSurface`] and routes
//! pointer events to the viewport and hover search.

use crate::hover::{closer, HoverHit, HoverProbe};
use crate::render::{self, ReadoutStyle};
use crate::series::{DrawContext, Drawable2D, LegendEntry};
use crate::ticks::{AxisBounds, Orientation, TickSelector};
use crate::viewport::{AxisRange, Bounds, Projection, ViewportController, ViewportOutcome};
use plotwise_core::{
    DrawingSurface, Point, PointerEvent, PointerKind, Rect, SeriesRegistry, SharedRegistry, Size,
    StrokeStyle, TextMeasurer,
};
use plotwise_layout::{ChartLayout, GraphOptions, GraphType, LayoutEngine};
use std::rc::Rc;

/// Readout marker size for series without markers.
const DEFAULT_READOUT_MARKER_PX: f32 = 4.0;

/// Measures through the surface a chart draws on.
struct SurfaceMeasurer<'a>(&'a dyn DrawingSurface);

impl TextMeasurer for SurfaceMeasurer<'_> {
    fn measure_width(&self, text: &str, font_size_px: f32) -> f32 {
        self.0.measure_width(text, font_size_px)
    }
}

/// Ticks chosen for one drawn region.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisTicks {
    /// Horizontal axis
    pub x: AxisBounds,
    /// Vertical axis
    pub y: AxisBounds,
}

impl AxisTicks {
    /// Bounds the ticks were chosen for, after span expansion.
    pub fn bounds(&self) -> Bounds {
        Bounds::new(
            AxisRange::new(self.x.min, self.x.max),
            AxisRange::new(self.y.min, self.y.max),
        )
    }
}

/// An interactive chart over a shared series registry.
pub struct Chart {
    options: GraphOptions,
    registry: SharedRegistry,
    series: Vec<Box<dyn Drawable2D>>,
    viewport: ViewportController,
    hover: Option<HoverHit>,
    preview: Option<Rect>,
    size: Size,
    layout: ChartLayout,
    ticks: Option<AxisTicks>,
}

impl std::fmt::Debug for Chart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.series.iter().map(|s| s.name()).collect();
        f.debug_struct("Chart")
            .field("series", &names)
            .field("viewport", &self.viewport)
            .field("size", &self.size)
            .field("layout", &self.layout)
            .finish_non_exhaustive()
    }
}

impl Chart {
    /// Chart with `options` reading data from `registry`.
    pub fn new(options: GraphOptions, registry: SharedRegistry) -> Self {
        let viewport = ViewportController::new(options.main.zoom.mode);
        Self {
            options,
            registry,
            series: Vec::new(),
            viewport,
            hover: None,
            preview: None,
            size: Size::ZERO,
            layout: ChartLayout::degenerate(),
            ticks: None,
        }
    }

    /// Current options.
    pub const fn options(&self) -> &GraphOptions {
        &self.options
    }

    /// Replace the options; takes effect on the next draw.
    pub fn set_options(&mut self, options: GraphOptions) {
        self.viewport.set_mode(options.main.zoom.mode);
        if options.main.graph_type != self.options.main.graph_type {
            self.viewport.zoom_reset();
            self.hover = None;
        }
        self.options = options;
    }

    /// Shared data source.
    pub fn registry(&self) -> SharedRegistry {
        Rc::clone(&self.registry)
    }

    /// Append a series; it is drawn above those added earlier.
    pub fn add_series(&mut self, series: impl Drawable2D + 'static) {
        self.series.push(Box::new(series));
        self.viewport.clear_max_bounds();
    }

    /// Remove the first series named `name`.
    pub fn remove_series(&mut self, name: &str) -> Option<Box<dyn Drawable2D>> {
        let index = self.series.iter().position(|s| s.name() == name)?;
        self.hover = None;
        self.viewport.clear_max_bounds();
        Some(self.series.remove(index))
    }

    /// Series in draw order.
    pub fn series(&self) -> &[Box<dyn Drawable2D>] {
        &self.series
    }

    /// Pan/zoom state.
    pub const fn viewport(&self) -> &ViewportController {
        &self.viewport
    }

    /// Pan/zoom state, for registering hooks or setting bounds.
    pub fn viewport_mut(&mut self) -> &mut ViewportController {
        &mut self.viewport
    }

    /// Layout of the last draw.
    pub const fn layout(&self) -> &ChartLayout {
        &self.layout
    }

    /// Ticks of the last draw, if the plot was drawn.
    pub const fn ticks(&self) -> Option<&AxisTicks> {
        self.ticks.as_ref()
    }

    /// Point under the pointer, if any.
    pub const fn hover(&self) -> Option<&HoverHit> {
        self.hover.as_ref()
    }

    /// Veto or approve each pan step.
    pub fn on_pan_start(&mut self, hook: impl FnMut(Option<&Bounds>, &Bounds) -> bool + 'static) {
        self.viewport.on_pan_start(hook);
    }

    /// Observe each applied pan step.
    pub fn on_pan_end(&mut self, hook: impl FnMut(&Bounds) + 'static) {
        self.viewport.on_pan_end(hook);
    }

    /// Veto or approve a zoom commit.
    pub fn on_zoom_start(&mut self, hook: impl FnMut(Option<&Bounds>, &Bounds) -> bool + 'static) {
        self.viewport.on_zoom_start(hook);
    }

    /// Observe committed zooms.
    pub fn on_zoom_end(&mut self, hook: impl FnMut(&Bounds) + 'static) {
        self.viewport.on_zoom_end(hook);
    }

    /// Step back one zoom level. Call [`Chart::draw`] to show it.
    pub fn zoom_out(&mut self) -> Option<Bounds> {
        self.hover = None;
        self.viewport.zoom_out()
    }

    /// Return to showing all data. Call [`Chart::draw`] to show it.
    pub fn zoom_reset(&mut self) {
        self.hover = None;
        self.viewport.zoom_reset();
    }

    fn is_polar(&self) -> bool {
        self.options.main.graph_type == GraphType::Polar
    }

    /// Union of every series' data extent.
    pub fn data_bounds(&self) -> Option<Bounds> {
        let registry = self.registry.borrow();
        Self::extent_of(&self.series, &registry)
    }

    fn extent_of(series: &[Box<dyn Drawable2D>], registry: &SeriesRegistry) -> Option<Bounds> {
        series
            .iter()
            .filter_map(|s| s.data_bounds(registry))
            .reduce(|a, b| a.union(&b))
    }

    /// Bounds a draw shows: `explicit`, else the viewport window, else all data.
    pub fn resolve_bounds(&self, explicit: Option<Bounds>) -> Bounds {
        explicit
            .or_else(|| self.viewport.current_bounds())
            .or_else(|| self.data_bounds())
            .unwrap_or_else(|| Bounds::new(AxisRange::new(0.0, 1.0), AxisRange::new(0.0, 1.0)))
            .expanded()
    }

    fn select_ticks(&self, measurer: &dyn TextMeasurer, bounds: &Bounds, rect: Rect) -> AxisTicks {
        let margin = self.options.main.margin_px;
        let x = TickSelector::new(measurer)
            .with_text_size(self.options.x_axis.text_size_px)
            .with_margin(margin)
            .select(Orientation::Horizontal, bounds.x.min, bounds.x.max, rect.width);
        let y = TickSelector::new(measurer)
            .with_text_size(self.options.y_axis.text_size_px)
            .with_margin(margin)
            .select(Orientation::Vertical, bounds.y.min, bounds.y.max, rect.height);
        AxisTicks { x, y }
    }

    /// Draw the whole chart at `size`.
    pub fn draw(&mut self, surface: &mut dyn DrawingSurface, size: Size) {
        self.draw_with_bounds(surface, size, None);
    }

    /// Draw the whole chart showing `bounds` instead of the viewport window.
    pub fn draw_with_bounds(
        &mut self,
        surface: &mut dyn DrawingSurface,
        size: Size,
        bounds: Option<Bounds>,
    ) {
        self.size = size;
        let shared = Rc::clone(&self.registry);
        let registry = shared.borrow();
        let entries: Vec<LegendEntry> = self.series.iter().map(|s| s.legend_entry()).collect();
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        let layout = LayoutEngine::new(&self.options, &SurfaceMeasurer(&*surface)).compute(
            size,
            &names,
            self.viewport.zoom_active(),
        );

        surface.clear(layout.canvas);
        surface.fill_rect(layout.canvas, self.options.main.background_color);

        let polar = self.is_polar();
        let margin = self.options.main.margin_px;
        let extent = Self::extent_of(&self.series, &registry);
        let window = self.resolve_bounds(bounds);
        let ticks = self.select_ticks(&SurfaceMeasurer(&*surface), &window, layout.graph);
        let drawn = ticks.bounds();
        let projection = Projection::new(layout.graph, drawn);
        if projection.is_none() {
            log::debug!("plot area {:?} is empty, chrome only", layout.graph);
        }
        // An empty plot clears the pointer projections so input stops mapping
        // through the last drawn rectangle.
        self.viewport.observe_draw(drawn, extent, layout.graph, layout.summary);

        if let Some(r) = layout.banner {
            render::draw_text_box(surface, r, &self.options.banner);
        }
        if let Some(r) = layout.title {
            render::draw_text_box(surface, r, &self.options.title);
        }

        if let (false, Some(_)) = (polar, projection) {
            if layout.x_axis.is_some() {
                render::draw_grid(
                    surface,
                    layout.graph,
                    Orientation::Horizontal,
                    &ticks.x,
                    &self.options.x_axis,
                );
            }
            if layout.y_axis.is_some() {
                render::draw_grid(
                    surface,
                    layout.graph,
                    Orientation::Vertical,
                    &ticks.y,
                    &self.options.y_axis,
                );
            }
        }

        if let Some(projection) = projection {
            surface.push_clip(layout.graph);
            self.draw_series(surface, &registry, projection, polar);
            surface.pop_clip();
        }

        if !polar {
            let axes = [
                (layout.x_axis, &self.options.x_axis, &ticks.x),
                (layout.y_axis, &self.options.y_axis, &ticks.y),
                (layout.y_axis2, &self.options.y_axis2, &ticks.y),
            ];
            for (region, opts, axis) in axes {
                if let Some(r) = region {
                    render::draw_axis(surface, r, layout.graph, opts, axis, margin);
                }
            }
        }

        let main = &self.options.main;
        if let (Some(color), Some(_)) = (main.box_edge_color, projection) {
            if main.box_edge_size_px > 0.0 {
                surface.stroke_rect(layout.graph, &StrokeStyle::solid(color, main.box_edge_size_px));
            }
        }

        self.draw_summary(surface, &registry, &layout, &drawn);

        if let (Some(r), Some(grid)) = (layout.legend, &layout.legend_grid) {
            render::draw_legend(surface, r, grid, &self.options.legend, &entries, margin);
        }

        let Some(projection) = projection else {
            self.layout = layout;
            self.ticks = None;
            return;
        };

        if let Some(rect) = self.preview {
            render::draw_zoom_preview(surface, rect, &self.options.main.zoom);
        }

        if let Some(hit) = &self.hover {
            if let Some(series) = self.series.get(hit.series_index) {
                let hit = if polar {
                    hit.clone()
                } else {
                    HoverHit {
                        pixel: projection.to_pixel(hit.x, hit.y),
                        ..hit.clone()
                    }
                };
                let style = ReadoutStyle {
                    name: series.name().to_string(),
                    color: series.highlight_color(),
                    marker_size_px: series
                        .legend_entry()
                        .marker
                        .map_or(DEFAULT_READOUT_MARKER_PX, |(_, size, _)| size),
                    text_size_px: main.text_size_px,
                    text_color: main.text_color,
                    margin_px: margin,
                    magnitudes: (readout_magnitude(&ticks.x), readout_magnitude(&ticks.y)),
                };
                render::draw_hover_readout(surface, layout.graph, &hit, &style);
            }
        }

        log::trace!("drew {} series into {:?}", self.series.len(), layout.graph);
        self.layout = layout;
        self.ticks = Some(ticks);
    }

    fn draw_series(
        &self,
        surface: &mut dyn DrawingSurface,
        registry: &SeriesRegistry,
        projection: Projection,
        polar: bool,
    ) {
        let mut ctx = DrawContext {
            surface,
            registry,
            projection,
            text_size_px: self.options.main.text_size_px,
        };
        for series in &self.series {
            let result = if polar {
                series.draw_polar(&mut ctx)
            } else {
                series.draw(&mut ctx)
            };
            if let Err(err) = result {
                log::warn!("series '{}' not drawn: {err}", series.name());
            }
        }
    }

    /// Series at the full extent, the window outline and the strip's axes.
    fn draw_summary(
        &self,
        surface: &mut dyn DrawingSurface,
        registry: &SeriesRegistry,
        layout: &ChartLayout,
        window: &Bounds,
    ) {
        let (Some(rect), Some(projection), Some(opts)) = (
            layout.summary,
            self.viewport.summary_projection(),
            self.options.main.summary.as_ref(),
        ) else {
            return;
        };
        surface.push_clip(rect);
        self.draw_series(surface, registry, projection, false);
        surface.pop_clip();
        render::draw_summary_window(surface, &projection, window, opts.marker_color);

        let ticks = self.select_ticks(&SurfaceMeasurer(&*surface), &projection.bounds, rect);
        let margin = self.options.main.margin_px;
        if let Some(r) = layout.x_axis_summary {
            render::draw_axis(surface, r, rect, &self.options.x_axis, &ticks.x, margin);
        }
        if let Some(r) = layout.y_axis_summary {
            render::draw_axis(surface, r, rect, &self.options.y_axis, &ticks.y, margin);
        }
    }

    /// Route one pointer event and redraw when anything visible changed.
    pub fn handle_pointer(
        &mut self,
        surface: &mut dyn DrawingSurface,
        event: &PointerEvent,
    ) -> ViewportOutcome {
        let outcome = if self.is_polar() {
            match event.kind {
                PointerKind::Move if !event.buttons.primary() => {
                    ViewportOutcome::Hover(event.position)
                }
                _ => ViewportOutcome::None,
            }
        } else {
            self.viewport.handle_event(event)
        };

        let mut redraw = match outcome {
            ViewportOutcome::None => false,
            ViewportOutcome::Hover(position) => self.update_hover(position),
            ViewportOutcome::Preview(rect) => {
                self.preview = Some(rect);
                self.hover = None;
                true
            }
            ViewportOutcome::Panned(_) | ViewportOutcome::Zoomed(_) | ViewportOutcome::Cancelled => {
                self.preview = None;
                self.hover = None;
                true
            }
        };
        if matches!(event.kind, PointerKind::Up | PointerKind::Leave) {
            redraw |= self.preview.take().is_some();
        }
        if event.kind == PointerKind::Leave {
            redraw |= self.hover.take().is_some();
        }

        if redraw {
            self.draw(surface, self.size);
        }
        outcome
    }

    fn update_hover(&mut self, position: Point) -> bool {
        let hit = self
            .viewport
            .plot_projection()
            .filter(|p| p.rect.contains_point(&position))
            .and_then(|p| self.hit_test(&p, position));
        let changed = hit != self.hover;
        self.hover = hit;
        changed
    }

    fn hit_test(&self, projection: &Projection, pixel: Point) -> Option<HoverHit> {
        let probe = HoverProbe::new(projection, pixel);
        let registry = self.registry.borrow();
        let polar = self.is_polar();
        self.series
            .iter()
            .enumerate()
            .fold(None, |best, (index, series)| {
                let hit = series
                    .mouse_over_hit_test(&registry, &probe, projection, polar)
                    .map(|h| HoverHit {
                        series_index: index,
                        ..h
                    });
                closer(best, hit)
            })
    }
}

/// Readouts show two more decimals than the axis labels.
fn readout_magnitude(axis: &AxisBounds) -> f64 {
    axis.step.map_or(1.0, |step| {
        let magnitude = 10f64.powf(step.log10().floor());
        magnitude / 100.0
    })
}
