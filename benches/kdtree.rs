use criterion::{criterion_group, criterion_main, Criterion};
use point_index::kdtree::{KdTreeBuilder, LongestMedian, SlidingMidpoint};
use point_index::metric::{Metric, SquaredEuclidean};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn generate_points(n: usize) -> Vec<[f64; 2]> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..n)
        .map(|_| [rng.gen_range(0.0..100.0), rng.gen_range(0.0..100.0)])
        .collect()
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let points = generate_points(100_000);

    c.bench_function("build (sliding midpoint)", |b| {
        b.iter(|| {
            KdTreeBuilder::new(&points)
                .leaf_size(8)
                .finish::<SlidingMidpoint>()
                .unwrap()
        })
    });

    c.bench_function("build (longest median)", |b| {
        b.iter(|| {
            KdTreeBuilder::new(&points)
                .leaf_size(8)
                .finish::<LongestMedian>()
                .unwrap()
        })
    });

    let tree = KdTreeBuilder::new(&points)
        .leaf_size(8)
        .finish::<SlidingMidpoint>()
        .unwrap();

    c.bench_function("box search", |b| {
        b.iter(|| tree.search_box(&[15.1, 15.1], &[34.9, 34.9]).unwrap())
    });

    c.bench_function("radius search", |b| {
        let radius = SquaredEuclidean.norm(2.5);
        b.iter(|| tree.search_radius(&[50.0, 50.0], radius).unwrap())
    });

    c.bench_function("knn search (k = 10)", |b| {
        b.iter(|| tree.search_knn(&[50.0, 50.0], 10).unwrap())
    });

    c.bench_function("approx knn search (k = 10)", |b| {
        let ratio = SquaredEuclidean.norm(1.25);
        b.iter(|| tree.search_approx_knn(&[50.0, 50.0], 10, ratio).unwrap())
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
