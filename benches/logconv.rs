use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use logconv::{Convolver, GrayImage, Kernel, ParallelConvolver, ScalarConvolver};
use std::hint::black_box;

fn make_image(width: usize, height: usize) -> GrayImage {
    GrayImage::from_fn(width, height, |x, y| (((x * 13) ^ (y * 7) ^ (x * y)) & 0xFF) as f64)
        .unwrap()
}

fn bench_engines(c: &mut Criterion) {
    let image = make_image(512, 512);
    let kernel = Kernel::laplacian_of_gaussian(17, 2.0).unwrap();

    let mut group = c.benchmark_group("log17_512x512");
    group.sample_size(10);
    group.bench_function("scalar", |b| {
        b.iter(|| black_box(ScalarConvolver.apply(image.view(), &kernel).unwrap()));
    });
    for tile_size in [8usize, 32, 128] {
        let engine = ParallelConvolver::new(tile_size);
        group.bench_with_input(
            BenchmarkId::new("parallel", tile_size),
            &engine,
            |b, engine| {
                b.iter(|| black_box(engine.apply(image.view(), &kernel).unwrap()));
            },
        );
    }
    group.finish();
}

fn bench_kernel(c: &mut Criterion) {
    c.bench_function("log_kernel_17", |b| {
        b.iter(|| black_box(Kernel::laplacian_of_gaussian(black_box(17), black_box(2.0)).unwrap()));
    });
}

criterion_group!(benches, bench_engines, bench_kernel);
criterion_main!(benches);
