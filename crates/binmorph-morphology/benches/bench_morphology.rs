use binmorph_image::{BinaryImage, ImageSize};
use binmorph_morphology::{
    convex_hull, dilate_with, erode, fill_holes, reconstruct_with, skeletonize, BorderMode,
    Connectivity, ExecutionStrategy, ReconstructionMethod, ReconstructionMode,
    ReconstructionParams, StructuringElement,
};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn create_test_image(width: usize, height: usize, density: f64) -> BinaryImage {
    let mut rng = StdRng::seed_from_u64(42);
    let data: Vec<bool> = (0..(width * height))
        .map(|_| rng.random_bool(density))
        .collect();
    BinaryImage::new(ImageSize { width, height }, data).unwrap()
}

fn bench_erode_dilate(c: &mut Criterion) {
    let mut group = c.benchmark_group("ErodeDilate");

    let (w, h) = (1920, 1080);
    let src = create_test_image(w, h, 0.7);

    for radius in [1, 3] {
        let element = StructuringElement::disk(radius);

        group.bench_with_input(
            BenchmarkId::new(format!("erode_disk{}", radius), format!("{}x{}", w, h)),
            &src,
            |b, src| b.iter(|| erode(src, &element).unwrap()),
        );

        group.bench_with_input(
            BenchmarkId::new(
                format!("dilate_serial_disk{}", radius),
                format!("{}x{}", w, h),
            ),
            &src,
            |b, src| {
                b.iter(|| {
                    dilate_with(
                        src,
                        &element,
                        BorderMode::Background,
                        ExecutionStrategy::Serial,
                    )
                    .unwrap()
                })
            },
        );
    }

    group.finish();
}

fn bench_reconstruct(c: &mut Criterion) {
    let mut group = c.benchmark_group("Reconstruct");
    group.sample_size(20);

    let (w, h) = (512, 512);
    let mask = create_test_image(w, h, 0.6);
    let mut marker = BinaryImage::from_size_val(mask.size(), false).unwrap();
    for [row, col] in mask.foreground().step_by(97) {
        marker[[row, col]] = true;
    }

    for method in [ReconstructionMethod::Iterative, ReconstructionMethod::Queue] {
        let params = ReconstructionParams {
            method,
            ..Default::default()
        };
        group.bench_with_input(
            BenchmarkId::new(format!("{:?}", method), format!("{}x{}", w, h)),
            &(&marker, &mask),
            |b, (marker, mask)| {
                b.iter(|| {
                    reconstruct_with(marker, mask, ReconstructionMode::Dilation, &params).unwrap()
                })
            },
        );
    }

    group.finish();
}

fn bench_shape(c: &mut Criterion) {
    let mut group = c.benchmark_group("Shape");
    group.sample_size(20);

    let (w, h) = (256, 256);
    let src = create_test_image(w, h, 0.8);

    group.bench_with_input(
        BenchmarkId::new("fill_holes", format!("{}x{}", w, h)),
        &src,
        |b, src| b.iter(|| fill_holes(src, Connectivity::Eight)),
    );

    group.bench_with_input(
        BenchmarkId::new("convex_hull", format!("{}x{}", w, h)),
        &src,
        |b, src| b.iter(|| convex_hull(src)),
    );

    group.bench_with_input(
        BenchmarkId::new("skeletonize", format!("{}x{}", w, h)),
        &src,
        |b, src| b.iter(|| skeletonize(src)),
    );

    group.finish();
}

criterion_group!(benches, bench_erode_dilate, bench_reconstruct, bench_shape);
criterion_main!(benches);
