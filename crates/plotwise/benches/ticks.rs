//! Benchmarks for tick selection and full chart draws.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use plotwise::{
    format_tick_label, Chart, Color, GraphOptions, LineSeries, MonospaceMeasurer, Orientation,
    RecordingSurface, SeriesOptions, SeriesRegistry, SeriesStore, Size, TickSelector,
};

fn bench_select(c: &mut Criterion) {
    let measurer = MonospaceMeasurer::default();
    let selector = TickSelector::new(&measurer);
    let mut group = c.benchmark_group("tick_select");

    for span in [120.0f32, 480.0, 1920.0] {
        group.bench_with_input(BenchmarkId::from_parameter(span), &span, |b, &span| {
            b.iter(|| {
                selector.select(
                    Orientation::Horizontal,
                    black_box(-3.7e4),
                    black_box(9.1e5),
                    span,
                )
            });
        });
    }

    group.finish();
}

fn bench_format(c: &mut Criterion) {
    c.bench_function("format_tick_label", |b| {
        b.iter(|| format_tick_label(black_box(1_250_000.0), black_box(250_000.0)));
    });
}

fn bench_chart_draw(c: &mut Criterion) {
    let registry = SeriesRegistry::shared();
    {
        let mut reg = registry.borrow_mut();
        let mut t = SeriesStore::new("t");
        let mut v = SeriesStore::new("v").with_index_key("t");
        for chunk in 0..64 {
            let base = chunk * 256;
            t.push((base..base + 256).map(f64::from).collect::<Vec<_>>())
                .unwrap();
            v.push(
                (base..base + 256)
                    .map(|i| (f64::from(i) * 0.01).sin())
                    .collect::<Vec<_>>(),
            )
            .unwrap();
        }
        reg.add(t);
        reg.add(v);
    }
    let mut chart = Chart::new(GraphOptions::default(), registry);
    chart.add_series(LineSeries::new("t", "v").with_options(SeriesOptions::line("sin", Color::BLACK)));

    c.bench_function("chart_draw_16k_points", |b| {
        b.iter(|| {
            let mut surface = RecordingSurface::new();
            chart.draw(&mut surface, black_box(Size::new(1280.0, 720.0)));
            surface.command_count()
        });
    });
}

criterion_group!(benches, bench_select, bench_format, bench_chart_draw);
criterion_main!(benches);
