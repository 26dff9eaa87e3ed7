use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use graymorph_image::Image;
use graymorph_imgproc::morphology::{dilate, erode, Kernel, MorphConfig, ReducerVariant};
use graymorph_imgproc::parallel::ExecutionStrategy;

fn bench_morphology(c: &mut Criterion) {
    let mut group = c.benchmark_group("Morphology");

    for (width, height) in [(256, 224), (512, 448), (1024, 896)].iter() {
        for kernel_size in [3, 5, 9].iter() {
            group.throughput(criterion::Throughput::Elements(
                (*width * *height * *kernel_size * *kernel_size) as u64,
            ));

            let parameter_string = format!("{}x{}x{}", width, height, kernel_size);

            // input image
            let image_size = [*width, *height].into();
            let image_data = (0..width * height).map(|i| (i % 251) as u8).collect();
            let image = Image::<u8, 1>::new(image_size, image_data).unwrap();

            // output image
            let output = Image::<u8, 1>::from_size_val(image_size, 0).unwrap();

            let kernel = Kernel::ones(*kernel_size, *kernel_size).unwrap();

            for (name, variant) in [
                ("windowed", ReducerVariant::Windowed),
                ("bounded_scan", ReducerVariant::BoundedScan),
            ] {
                let config = MorphConfig::default().with_variant(variant);

                group.bench_with_input(
                    BenchmarkId::new(format!("erode_{name}"), &parameter_string),
                    &(&image, &output),
                    |b, i| {
                        let (src, mut dst) = (i.0, i.1.clone());
                        b.iter(|| black_box(erode(src, &mut dst, &kernel, config)))
                    },
                );

                group.bench_with_input(
                    BenchmarkId::new(format!("dilate_{name}_serial"), &parameter_string),
                    &(&image, &output),
                    |b, i| {
                        let (src, mut dst) = (i.0, i.1.clone());
                        let config = config.with_execution(ExecutionStrategy::Serial);
                        b.iter(|| black_box(dilate(src, &mut dst, &kernel, config)))
                    },
                );
            }
        }
    }
    group.finish();
}

criterion_group!(benches, bench_morphology);
criterion_main!(benches);
