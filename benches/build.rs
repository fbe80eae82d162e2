use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use kdthree::{BoundingBox, KdTree};

const SIZES: [usize; 4] = [1000, 10_000, 100_000, 1_000_000];
const LEAF_SIZES: [usize; 5] = [1, 4, 16, 64, 100];

fn benchmark_build_scaling(c: &mut Criterion) {
    let bounds = BoundingBox::from_coords(0.0, 0.0, 0.0, 100.0, 100.0, 100.0);

    let mut group = c.benchmark_group("build_scaling");
    group.sample_size(10);

    for &size in &SIZES {
        let mut tree = KdTree::with_limits(16, 25);
        tree.add_random_points(size, &bounds);

        group.bench_with_input(BenchmarkId::new("random", size), &size, |b, _| {
            b.iter(|| {
                tree.build().unwrap();
            })
        });
    }
    group.finish();
}

fn benchmark_build_leaf_size(c: &mut Criterion) {
    let bounds = BoundingBox::from_coords(0.0, 0.0, 0.0, 100.0, 100.0, 100.0);

    let mut group = c.benchmark_group("build_leaf_size_100k");
    group.sample_size(10);

    for &leaf_size in &LEAF_SIZES {
        let mut tree = KdTree::with_limits(leaf_size, 25);
        tree.add_random_points(100_000, &bounds);

        group.bench_with_input(BenchmarkId::new("random", leaf_size), &leaf_size, |b, _| {
            b.iter(|| {
                tree.build().unwrap();
            })
        });
    }
    group.finish();
}

criterion_group!(benches, benchmark_build_scaling, benchmark_build_leaf_size);
criterion_main!(benches);
