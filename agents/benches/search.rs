use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use tactician_agents::{search, SearchConfig};
use tactician_core::{positions, GameState};

fn search_benchmark(c: &mut Criterion) {
    let opening = GameState::new();
    let after_e4_e5 = GameState::from_fen(positions::AFTER_E4_E5).unwrap();

    for depth in [2, 3] {
        c.bench_function(&format!("opening search depth {depth}"), |b| {
            b.iter(|| black_box(search(black_box(&opening), SearchConfig::with_depth(depth))));
        });
    }

    c.bench_function("after 1.e4 e5 search depth 4", |b| {
        b.iter(|| black_box(search(black_box(&after_e4_e5), SearchConfig::default())));
    });
}

fn move_generation_benchmark(c: &mut Criterion) {
    let opening = GameState::new();
    c.bench_function("opening moves", |b| {
        b.iter(|| black_box(black_box(&opening).moves()));
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(20).measurement_time(Duration::from_secs(20));
    targets = search_benchmark, move_generation_benchmark
}
criterion_main!(benches);
