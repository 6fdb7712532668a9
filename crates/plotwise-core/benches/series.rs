//! Benchmarks for series append, streaming and range search.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use plotwise_core::SeriesStore;

fn filled_store(chunks: usize, chunk_len: usize) -> SeriesStore {
    let mut store = SeriesStore::new("bench");
    for c in 0..chunks {
        let base = (c * chunk_len) as f64;
        let values: Vec<f64> = (0..chunk_len).map(|i| base + i as f64).collect();
        store.push(values).unwrap();
    }
    store
}

fn bench_push(c: &mut Criterion) {
    let chunk: Vec<f64> = (0..1024).map(f64::from).collect();
    c.bench_function("series_push_1k", |b| {
        b.iter(|| {
            let mut store = SeriesStore::new("bench");
            store.push(black_box(chunk.clone())).unwrap();
            store
        })
    });
}

fn bench_stream(c: &mut Criterion) {
    let chunk: Vec<f64> = (0..100).map(f64::from).collect();
    c.bench_function("series_stream_retain_10k", |b| {
        let mut store = filled_store(100, 100);
        b.iter(|| store.stream(black_box(chunk.clone()), 10_000).unwrap())
    });
}

fn bench_chunks_in_range(c: &mut Criterion) {
    let store = filled_store(1000, 256);
    c.bench_function("series_chunks_in_range", |b| {
        b.iter(|| store.chunks_in_range(black_box(50_000.0), black_box(60_000.0), None))
    });
}

fn bench_value_at(c: &mut Criterion) {
    let store = filled_store(1000, 256);
    c.bench_function("series_value_at_linear", |b| {
        b.iter(|| store.value_at(black_box(200_000)))
    });
    c.bench_function("series_value_at_bisect", |b| {
        b.iter(|| store.value_at_bisect(black_box(200_000)))
    });
}

criterion_group!(
    benches,
    bench_push,
    bench_stream,
    bench_chunks_in_range,
    bench_value_at,
);
criterion_main!(benches);
