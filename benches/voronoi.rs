//! Benchmarks for Voronoi diagram construction and per-site queries.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use vorocell::{Point2, Voronator};

/// Generates random sites in a 100x100 square.
fn generate_random_sites(count: usize, seed: u64) -> Vec<Point2<f64>> {
    let mut sites = Vec::with_capacity(count);
    let mut state = seed;

    for _ in 0..count {
        // xorshift for deterministic random
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        let x = (state as f64 / u64::MAX as f64) * 100.0;

        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        let y = (state as f64 / u64::MAX as f64) * 100.0;

        sites.push(Point2::new(x, y));
    }

    sites
}

fn bench_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("voronoi_construction");

    for count in [100, 1000, 10000] {
        let sites = generate_random_sites(count, 12345);
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("sites", count), &sites, |b, sites| {
            b.iter(|| Voronator::new(black_box(sites)).unwrap())
        });
    }

    group.finish();
}

fn bench_clipped_polygons(c: &mut Criterion) {
    let mut group = c.benchmark_group("voronoi_clipped_polygons");

    for count in [100, 1000, 10000] {
        let sites = generate_random_sites(count, 12345);
        let diagram = Voronator::new(&sites).unwrap();
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(
            BenchmarkId::new("all_cells", count),
            &diagram,
            |b, diagram| {
                b.iter(|| {
                    for i in 0..diagram.len() {
                        let _ = diagram.clipped_polygon(black_box(i));
                    }
                })
            },
        );
    }

    group.finish();
}

fn bench_neighbors(c: &mut Criterion) {
    let mut group = c.benchmark_group("voronoi_neighbors");

    let count = 10000;
    let sites = generate_random_sites(count, 12345);
    let diagram = Voronator::new(&sites).unwrap();
    group.throughput(Throughput::Elements(count as u64));

    group.bench_function("all_sites", |b| {
        b.iter(|| {
            for i in 0..diagram.len() {
                let _ = diagram.neighbors(black_box(i));
            }
        })
    });

    group.bench_function("all_sites_clipped", |b| {
        b.iter(|| {
            for i in 0..diagram.len() {
                let _ = diagram.clipped_neighbors(black_box(i));
            }
        })
    });

    group.finish();
}

fn bench_relaxation(c: &mut Criterion) {
    let mut group = c.benchmark_group("voronoi_relaxation");

    for count in [100, 1000, 10000] {
        let sites = generate_random_sites(count, 12345);
        let diagram = Voronator::new(&sites).unwrap();
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(
            BenchmarkId::new("lloyd_step", count),
            &diagram,
            |b, diagram| b.iter(|| diagram.relaxed_points()),
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_construction,
    bench_clipped_polygons,
    bench_neighbors,
    bench_relaxation
);
criterion_main!(benches);
