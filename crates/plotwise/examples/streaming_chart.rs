//! Streams a noisy signal into a chart, zooms in and prints what was drawn.
//!
//! Run with: `RUST_LOG=debug cargo run --example streaming_chart`

#![allow(clippy::unwrap_used)]

use plotwise::{
    Chart, Color, DrawCommand, GraphOptions, LineSeries, MarkerShape, PointerEvent,
    RecordingSurface, SeriesOptions, SeriesRegistry, SeriesStore, Size, SummaryOptions,
    TextBoxOptions,
};

fn main() {
    env_logger::init();

    let registry = SeriesRegistry::shared();
    registry.borrow_mut().add(SeriesStore::new("t"));
    registry
        .borrow_mut()
        .add(SeriesStore::new("signal").with_index_key("t"));

    for batch in 0..20 {
        let base = batch * 50;
        let t: Vec<f64> = (base..base + 50).map(f64::from).collect();
        let signal: Vec<f64> = t.iter().map(|x| (x * 0.05).sin() * 10.0 + x * 0.01).collect();
        let mut reg = registry.borrow_mut();
        reg.require_mut("t").unwrap().stream(t, 600).unwrap();
        reg.require_mut("signal").unwrap().stream(signal, 600).unwrap();
    }

    let options = GraphOptions::default()
        .with_title(TextBoxOptions::titled("Streaming signal"))
        .with_legend(TextBoxOptions::legend())
        .with_summary(SummaryOptions::default());
    let mut chart = Chart::new(options, registry);
    chart.add_series(LineSeries::new("t", "signal").with_options(
        SeriesOptions::line("signal", Color::palette(0)).with_markers(
            MarkerShape::Diamond,
            5.0,
            Color::palette(1),
        ),
    ));

    let mut surface = RecordingSurface::new();
    let size = Size::new(800.0, 600.0);
    chart.draw(&mut surface, size);
    summarize("initial draw", &surface);

    let g = chart.layout().graph;
    chart.handle_pointer(&mut surface, &PointerEvent::down(g.x + 50.0, g.y + 20.0));
    chart.handle_pointer(&mut surface, &PointerEvent::drag(g.x + 250.0, g.bottom() - 20.0));
    chart.handle_pointer(&mut surface, &PointerEvent::up(g.x + 250.0, g.bottom() - 20.0));
    println!("zoomed to {:?}", chart.viewport().current_bounds());

    let mut zoomed = RecordingSurface::new();
    chart.draw(&mut zoomed, size);
    summarize("after zoom", &zoomed);

    chart.zoom_out();
    println!("zoomed out to {:?}", chart.viewport().current_bounds());
}

fn summarize(title: &str, surface: &RecordingSurface) {
    let paths = surface.count_where(|c| matches!(c, DrawCommand::Path { .. }));
    let markers = surface.count_where(|c| matches!(c, DrawCommand::Polygon { .. }));
    println!("=== {title} ===");
    println!("  commands: {}", surface.command_count());
    println!("  polylines: {paths}, markers: {markers}");
    println!("  text: {:?}", surface.texts());
}
