use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use glam::vec2;
use plat::{PlanarMap, VertexId};
use std::hint::black_box;

// Helper building an n by n grid of vertices joined into twinned pairs
// along rows and columns.
fn grid_map(n: usize) -> (PlanarMap, Vec<VertexId>) {
    let mut map = PlanarMap::new();
    let vs: Vec<VertexId> = (0..n * n)
        .map(|k| map.create_vertex(vec2((k % n) as f32, (k / n) as f32)))
        .collect();
    for j in 0..n {
        for i in 0..n {
            if i + 1 < n {
                map.add_edge_pair(vs[j * n + i], vs[j * n + i + 1]).unwrap();
            }
            if j + 1 < n {
                map.add_edge_pair(vs[j * n + i], vs[(j + 1) * n + i]).unwrap();
            }
        }
    }
    (map, vs)
}

fn linked_grid(n: usize) -> (PlanarMap, Vec<VertexId>) {
    let (mut map, vs) = grid_map(n);
    map.populate_links().unwrap();
    (map, vs)
}

// Construction benchmarks
fn bench_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("construction");

    group.bench_function("grid_16", |b| {
        b.iter(|| {
            let (map, _) = grid_map(black_box(16));
            black_box(map);
        });
    });

    group.bench_function("populate_links_grid_16", |b| {
        b.iter_batched(
            || grid_map(16).0,
            |mut map| {
                map.populate_links().unwrap();
                black_box(map);
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function("populate_links_grid_32", |b| {
        b.iter_batched(
            || grid_map(32).0,
            |mut map| {
                map.populate_links().unwrap();
                black_box(map);
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

// Editing benchmarks
fn bench_editing(c: &mut Criterion) {
    let mut group = c.benchmark_group("editing");

    group.bench_function("split_edge_grid_16", |b| {
        b.iter_batched(
            || {
                let (map, vs) = linked_grid(16);
                let h = map.find_edge(vs[8 * 16 + 7], vs[8 * 16 + 8]).unwrap();
                (map, h)
            },
            |(mut map, h)| {
                map.split_edge(h, black_box(vec2(7.5, 8.0))).unwrap();
                black_box(map);
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function("link_pair_into_grid_16", |b| {
        b.iter_batched(
            || {
                let (mut map, vs) = linked_grid(16);
                let x = map.create_vertex(vec2(7.3, 8.6));
                let (ox, xo) = map.add_edge_pair(vs[8 * 16 + 7], x).unwrap();
                (map, ox, xo)
            },
            |(mut map, ox, xo)| {
                map.link_pair(ox, xo).unwrap();
                black_box(map);
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

// Query benchmarks
fn bench_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("queries");

    let (map, vs) = linked_grid(16);
    let h = map.find_edge(vs[0], vs[1]).unwrap();

    group.bench_function("loop_edges", |b| {
        b.iter(|| {
            let edges = map.loop_edges(black_box(h)).unwrap();
            black_box(edges);
        });
    });

    let ids: Vec<_> = map.edge_ids().collect();
    group.bench_function("edge_topology_scan", |b| {
        b.iter(|| {
            let mut sound = 0usize;
            for &id in &ids {
                if map.edge_topology(id).is_ok() {
                    sound += 1;
                }
            }
            black_box(sound);
        });
    });

    group.bench_function("check", |b| {
        b.iter(|| {
            map.check().unwrap();
        });
    });

    group.finish();
}

// Persistence benchmarks
fn bench_persistence(c: &mut Criterion) {
    let mut group = c.benchmark_group("persistence");

    let (map, _) = linked_grid(16);
    let snap = map.snapshot();

    group.bench_function("snapshot", |b| {
        b.iter(|| {
            let snap = map.snapshot();
            black_box(snap);
        });
    });

    group.bench_function("rehydrate", |b| {
        b.iter(|| {
            let restored = PlanarMap::rehydrate(black_box(&snap));
            black_box(restored);
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_construction,
    bench_editing,
    bench_queries,
    bench_persistence
);
criterion_main!(benches);
