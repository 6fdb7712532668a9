//! End-to-end chart behavior through a recording surface.

use plotwise::{
    AngleUnit, AxisRange, Bounds, Chart, Color, DrawCommand, GraphOptions, GraphType, LineSeries,
    MarkerShape, MonospaceMeasurer, Orientation, PointerEvent, RadialOrigin, RecordingSurface,
    Rect, SeriesOptions, SeriesRegistry, SeriesStore, SharedRegistry, Size, SummaryOptions,
    TextBoxOptions, TickSelector, ViewportController, ViewportOutcome, ZoomMode,
};
use proptest::prelude::*;

const CANVAS: Size = Size::new(640.0, 480.0);

fn registry() -> SharedRegistry {
    let registry = SeriesRegistry::shared();
    {
        let mut reg = registry.borrow_mut();
        let mut t = SeriesStore::new("t");
        t.push((0..50).map(f64::from).collect::<Vec<_>>()).unwrap();
        t.push((50..100).map(f64::from).collect::<Vec<_>>()).unwrap();
        let mut v = SeriesStore::new("v").with_index_key("t");
        v.push((0..50).map(|i| f64::from(i % 10)).collect::<Vec<_>>()).unwrap();
        v.push((50..100).map(|i| f64::from(i % 10)).collect::<Vec<_>>()).unwrap();
        reg.add(t);
        reg.add(v);
    }
    registry
}

fn line_chart(options: GraphOptions) -> Chart {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut chart = Chart::new(options, registry());
    chart.add_series(
        LineSeries::new("t", "v").with_options(
            SeriesOptions::line("load", Color::BLACK).with_markers(
                MarkerShape::Circle,
                4.0,
                Color::BLACK,
            ),
        ),
    );
    chart
}

fn paths(surface: &RecordingSurface) -> usize {
    surface.count_where(|c| matches!(c, DrawCommand::Path { .. }))
}

fn drag(chart: &mut Chart, surface: &mut RecordingSurface, from: (f32, f32), to: (f32, f32)) {
    chart.handle_pointer(surface, &PointerEvent::down(from.0, from.1));
    chart.handle_pointer(surface, &PointerEvent::drag(to.0, to.1));
    chart.handle_pointer(surface, &PointerEvent::up(to.0, to.1));
}

#[test]
fn test_tick_selection_fits_the_pixel_span() {
    let measurer = MonospaceMeasurer::default();
    let selector = TickSelector::new(&measurer).with_margin(4.0);
    let axis = selector.select(Orientation::Horizontal, 0.0, 100.0, 200.0);
    let used: f32 = axis
        .ticks
        .iter()
        .map(|t| selector.label_extent(Orientation::Horizontal, &t.label))
        .sum();
    assert!(used <= 200.0 - 4.0);
    assert!(axis.ticks.len() >= 2);
    assert!(axis.step.is_some());
    assert!(axis
        .ticks
        .windows(2)
        .all(|w| w[0].position < w[1].position && w[0].value < w[1].value));
}

#[test]
fn test_pan_clamps_to_the_far_edge() {
    let full = Bounds::new(AxisRange::new(0.0, 100.0), AxisRange::new(0.0, 100.0));
    let rect = Rect::new(0.0, 0.0, 100.0, 100.0);

    let mut vp = ViewportController::new(ZoomMode::Auto);
    vp.observe_draw(full, Some(full), rect, None);
    vp.set_current_bounds(Some(full));
    vp.handle_event(&PointerEvent::down(100.0, 50.0).with_modifier());
    // Pinned at the far edge: the window keeps its width and nothing moves.
    let outcome = vp.handle_event(&PointerEvent::drag(10.0, 50.0).with_modifier());
    assert_eq!(outcome, ViewportOutcome::None);
    assert_eq!(vp.current_bounds(), Some(full));
    vp.handle_event(&PointerEvent::up(10.0, 50.0).with_modifier());
    assert!(vp.zoom_stack().is_empty());

    let half = Bounds::new(AxisRange::new(50.0, 100.0), AxisRange::new(0.0, 100.0));
    let mut vp = ViewportController::new(ZoomMode::Auto);
    vp.observe_draw(half, Some(full), rect, None);
    vp.set_current_bounds(Some(half));
    vp.handle_event(&PointerEvent::down(100.0, 50.0).with_modifier());
    vp.handle_event(&PointerEvent::drag(20.0, 50.0).with_modifier());
    let b = vp.current_bounds().unwrap();
    assert_eq!(b.x.max, 100.0);
    assert!((b.x.span() - 50.0).abs() < 1e-9);
}

#[test]
fn test_two_zooms_then_two_zoom_outs_restore_all_data() {
    let mut chart = line_chart(GraphOptions::default());
    let mut surface = RecordingSurface::new();
    chart.draw(&mut surface, CANVAS);
    let g = chart.layout().graph;

    drag(&mut chart, &mut surface, (g.x + 10.0, g.y + 10.0), (g.x + 200.0, g.bottom() - 10.0));
    let first = chart.viewport().current_bounds().unwrap();
    let g = chart.layout().graph;
    drag(&mut chart, &mut surface, (g.x + 20.0, g.y + 20.0), (g.x + 120.0, g.y + 120.0));
    let second = chart.viewport().current_bounds().unwrap();
    assert!(second.within(&first));
    assert_eq!(chart.viewport().zoom_stack().len(), 2);

    assert_eq!(chart.zoom_out(), Some(first));
    assert_eq!(chart.zoom_out(), None);
    assert!(chart.viewport().zoom_stack().is_empty());
    assert_eq!(chart.viewport().current_bounds(), None);
}

#[test]
fn test_zoom_shows_summary_strip_with_window_outline() {
    let options = GraphOptions::default()
        .with_summary(SummaryOptions::default())
        .with_title(TextBoxOptions::titled("Load"));
    let mut chart = line_chart(options);
    let mut surface = RecordingSurface::new();
    chart.draw(&mut surface, CANVAS);
    assert!(chart.layout().summary.is_none());

    let g = chart.layout().graph;
    drag(&mut chart, &mut surface, (g.x + 10.0, g.y + 10.0), (g.x + 150.0, g.bottom() - 5.0));
    assert!(chart.viewport().zoom_active());
    assert!(chart.layout().summary.is_some());
    assert!(chart.viewport().summary_projection().is_some());

    let mut redraw = RecordingSurface::new();
    chart.draw(&mut redraw, CANVAS);
    // Main plot and summary strip each draw the series line.
    assert_eq!(paths(&redraw), 2);
    assert!(redraw.texts().contains(&"Load"));
    assert_eq!(redraw.clip_depth(), 0);
}

#[test]
fn test_empty_registry_still_draws_axes() {
    let mut chart = Chart::new(GraphOptions::default(), SeriesRegistry::shared());
    let mut surface = RecordingSurface::new();
    chart.draw(&mut surface, CANVAS);
    assert_eq!(paths(&surface), 0);
    assert!(!surface.texts().is_empty());
    let ticks = chart.ticks().unwrap();
    assert_eq!(ticks.x.min, 0.0);
    assert_eq!(ticks.x.max, 1.0);
}

#[test]
fn test_hovering_a_point_shows_the_readout() {
    let mut chart = line_chart(GraphOptions::default());
    let mut surface = RecordingSurface::new();
    chart.draw(&mut surface, CANVAS);
    let projection = chart.viewport().plot_projection().unwrap();
    let p = projection.to_pixel(42.0, 2.0);

    chart.handle_pointer(&mut surface, &PointerEvent::hover(p.x + 1.0, p.y));
    let hit = chart.hover().unwrap();
    assert_eq!(hit.x, 42.0);
    assert_eq!(hit.chunk, 0);
    assert_eq!(hit.global, 42);
    assert!(surface.texts().contains(&"x: 42"));
    assert!(surface.texts().contains(&"load"));

    chart.handle_pointer(&mut surface, &PointerEvent::leave());
    assert!(chart.hover().is_none());
}

#[test]
fn test_legend_lists_every_series() {
    let options = GraphOptions::default().with_legend(TextBoxOptions::legend());
    let mut chart = line_chart(options);
    chart.add_series(
        LineSeries::new("t", "t").with_options(SeriesOptions::line("ramp", Color::palette(1))),
    );
    let mut surface = RecordingSurface::new();
    chart.draw(&mut surface, CANVAS);
    let texts = surface.texts();
    assert!(texts.contains(&"load"));
    assert!(texts.contains(&"ramp"));
    assert!(chart.layout().legend.is_some());
}

#[test]
fn test_polar_chart_has_no_axes() {
    let options = GraphOptions::default().with_graph_type(GraphType::Polar);
    let mut chart = Chart::new(options, registry());
    chart.add_series(
        LineSeries::new("t", "v").with_options(
            SeriesOptions::markers("spiral", MarkerShape::Square, Color::BLACK)
                .with_polar(AngleUnit::Degrees, RadialOrigin::FromMinimum),
        ),
    );
    let mut surface = RecordingSurface::new();
    chart.draw(&mut surface, CANVAS);
    assert!(chart.layout().x_axis.is_none());
    assert!(surface.texts().is_empty());
    assert_eq!(surface.count_where(|c| matches!(c, DrawCommand::Polygon { .. })), 100);

    // Polar charts ignore drags.
    let g = chart.layout().graph;
    drag(&mut chart, &mut surface, (g.x + 10.0, g.y + 10.0), (g.x + 90.0, g.y + 90.0));
    assert!(!chart.viewport().zoom_active());
}

#[test]
fn test_vetoed_zoom_leaves_bounds_alone() {
    let mut chart = line_chart(GraphOptions::default());
    chart.on_zoom_start(|_, _| false);
    let mut surface = RecordingSurface::new();
    chart.draw(&mut surface, CANVAS);
    let g = chart.layout().graph;
    drag(&mut chart, &mut surface, (g.x + 10.0, g.y + 10.0), (g.x + 100.0, g.y + 100.0));
    assert_eq!(chart.viewport().current_bounds(), None);
    // The preview box is gone after release.
    let mut redraw = RecordingSurface::new();
    chart.draw(&mut redraw, CANVAS);
    let fills = redraw.count_where(|c| matches!(c, DrawCommand::FillRect { .. }));
    assert_eq!(fills, 1);
}

fn zoom_box() -> impl Strategy<Value = ((f32, f32), (f32, f32))> {
    (5.0f32..45.0, 5.0f32..45.0, 55.0f32..95.0, 55.0f32..95.0)
        .prop_map(|(x0, y0, x1, y1)| ((x0, y0), (x1, y1)))
}

proptest! {
    #[test]
    fn prop_pan_and_zoom_stay_within_extent(
        steps in prop::collection::vec((any::<bool>(), -150.0f32..150.0, -150.0f32..150.0), 1..12)
    ) {
        let full = Bounds::new(AxisRange::new(0.0, 100.0), AxisRange::new(-50.0, 50.0));
        let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
        let mut vp = ViewportController::new(ZoomMode::Xy);
        vp.observe_draw(full, Some(full), rect, None);
        let max = vp.max_bounds().unwrap();

        for (pan, dx, dy) in steps {
            let to = (50.0 + dx * 0.3, 50.0 + dy * 0.3);
            if pan {
                vp.handle_event(&PointerEvent::down(50.0, 50.0).with_modifier());
                vp.handle_event(&PointerEvent::drag(50.0 + dx, 50.0 + dy).with_modifier());
                vp.handle_event(&PointerEvent::up(50.0 + dx, 50.0 + dy).with_modifier());
            } else {
                vp.handle_event(&PointerEvent::down(50.0, 50.0));
                vp.handle_event(&PointerEvent::drag(to.0, to.1));
                vp.handle_event(&PointerEvent::up(to.0, to.1));
            }
            if let Some(current) = vp.current_bounds() {
                prop_assert!(current.within(&max), "{current:?} escaped {max:?}");
            }
            vp.observe_draw(vp.current_bounds().unwrap_or(full), None, rect, None);
        }
    }

    #[test]
    fn prop_zoom_out_walks_history_backwards(boxes in prop::collection::vec(zoom_box(), 1..8)) {
        let full = Bounds::new(AxisRange::new(0.0, 100.0), AxisRange::new(0.0, 100.0));
        let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
        let mut vp = ViewportController::new(ZoomMode::Xy);
        vp.observe_draw(full, Some(full), rect, None);

        let mut before = Vec::new();
        for (from, to) in &boxes {
            before.push(vp.current_bounds());
            vp.handle_event(&PointerEvent::down(from.0, from.1));
            let outcome = vp.handle_event(&PointerEvent::up(to.0, to.1));
            prop_assert!(matches!(outcome, ViewportOutcome::Zoomed(_)));
            vp.observe_draw(vp.current_bounds().unwrap_or(full), None, rect, None);
        }

        while let Some(expected) = before.pop() {
            prop_assert_eq!(vp.zoom_out(), expected);
        }
        prop_assert!(vp.zoom_stack().is_empty());
        prop_assert_eq!(vp.current_bounds(), None);
    }
}
