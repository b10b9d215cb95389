use criterion::{black_box, criterion_group, criterion_main, Criterion};
use flockwise_core::{find_neighbors, NeighborIndex, Vec2};

fn grid_positions(n: usize) -> Vec<Vec2> {
    (0..n)
        .map(|i| Vec2::new((i % 40) as f64 * 25.0, (i / 40) as f64 * 25.0))
        .collect()
}

fn bench_neighbor_query(c: &mut Criterion) {
    let positions = grid_positions(1000);
    let mut index = NeighborIndex::new();

    c.bench_function("neighbor_query_1000_r80_k6", |b| {
        let mut out = Vec::new();
        b.iter(|| {
            index.neighbors_into(500, &positions, 80.0, 6, &mut out);
            black_box(out.len())
        })
    });
}

fn bench_neighbor_full_pass(c: &mut Criterion) {
    let positions = grid_positions(500);
    let mut index = NeighborIndex::new();

    c.bench_function("neighbor_full_pass_500", |b| {
        let mut out = Vec::new();
        b.iter(|| {
            let mut total = 0;
            for i in 0..positions.len() {
                index.neighbors_into(i, &positions, 80.0, 6, &mut out);
                total += out.len();
            }
            black_box(total)
        })
    });
}

fn bench_find_neighbors_allocating(c: &mut Criterion) {
    let positions = grid_positions(1000);

    c.bench_function("find_neighbors_alloc_1000", |b| {
        b.iter(|| black_box(find_neighbors(500, &positions, 80.0, 6)))
    });
}

criterion_group!(
    benches,
    bench_neighbor_query,
    bench_neighbor_full_pass,
    bench_find_neighbors_allocating
);
criterion_main!(benches);
