use binmorph_image::{BinaryImage, ImageSize};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

fn sample_image() -> BinaryImage {
    BinaryImage::from_fn(
        ImageSize {
            width: 1920,
            height: 1080,
        },
        |row, col| (row / 8 + col / 8) % 2 == 0,
    )
    .unwrap()
}

fn bench_image(c: &mut Criterion) {
    let mut group = c.benchmark_group("BinaryImage");

    group.bench_function("complement", |b| {
        let image = sample_image();
        b.iter(|| black_box(&image).complement())
    });

    group.bench_function("union", |b| {
        let image = sample_image();
        let other = image.complement();
        b.iter(|| black_box(&image).union(black_box(&other)).unwrap())
    });

    group.bench_function("count_foreground", |b| {
        let image = sample_image();
        b.iter(|| black_box(&image).count_foreground())
    });

    group.finish();
}

criterion_group!(benches, bench_image);
criterion_main!(benches);
