use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hexlogic::{GraphMatrix, HexCoords, SearchOptions, Tile};

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("pathfinding");
    group.sample_size(10);

    let tiles = Tile::disk(HexCoords::ORIGIN, 50).unwrap();
    group.bench_function("graph construction", |b| {
        b.iter(|| GraphMatrix::new(black_box(&tiles)))
    });

    let graph = GraphMatrix::new(&tiles).unwrap();
    let start = (0, 50, -50);
    let goal = (0, -50, 50);
    let options = SearchOptions::default();
    group.bench_function("breadth-first search", |b| {
        b.iter(|| graph.breadth_first_search(&start, black_box(&goal), options))
    });
    group.bench_function("dijkstra", |b| {
        b.iter(|| graph.dijkstras_algorithm(&start, black_box(&goal), options))
    });
    group.bench_function("a*", |b| {
        b.iter(|| graph.a_star_algorithm(&start, black_box(&goal), options))
    });
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
