// benches/cv_benchmarks.rs
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use cube_detect::core::detector::CubeDetector;
use cube_detect::core::params::ExtractorParams;
use cube_detect::cv::scalar::ScalarCV;
use cube_detect::cv::ComputerVision;
use cube_detect::{ColorBuffer, ImageBuffer};

#[cfg(all(target_arch = "x86_64", feature = "simd"))]
use cube_detect::simd::native::NativeCV;

const SIZES: [(usize, usize); 2] = [(320, 240), (640, 480)];

/// Three vertical bands of decreasing brightness, replicated over 3 channels.
fn banded_rgb(width: usize, height: usize) -> Vec<u8> {
    let mut data = vec![0u8; width * height * 3];
    for y in 0..height {
        for x in 0..width {
            let val = match x * 3 / width {
                0 => 255,
                1 => 170,
                _ => 120,
            };
            let idx = (y * width + x) * 3;
            data[idx..idx + 3].fill(val);
        }
    }
    data
}

fn bench_median_blur(c: &mut Criterion) {
    let mut group = c.benchmark_group("MedianBlur");
    for &(width, height) in SIZES.iter() {
        let data: Vec<u8> = (0..width * height * 3).map(|i| (i % 251) as u8).collect();
        let buffer = ColorBuffer {
            data: &data,
            width: width as u32,
            height: height as u32,
            channels: 3,
        };
        let mut out = vec![0u8; data.len()];
        let size_str = format!("{}x{}", width, height);

        group.bench_with_input(BenchmarkId::new("scalar", &size_str), &size_str, |b, _| {
            b.iter(|| ScalarCV::median_blur(black_box(&buffer), black_box(&mut out), black_box(9)))
        });
    }
    group.finish();
}

fn bench_threshold_at(c: &mut Criterion) {
    let mut group = c.benchmark_group("ThresholdAt");
    for &(width, height) in SIZES.iter() {
        let size = width * height;
        let data: Vec<u8> = (0..size).map(|i| (i % 256) as u8).collect();
        let mut out = vec![0u8; size];
        let size_str = format!("{}x{}", width, height);

        group.bench_with_input(BenchmarkId::new("scalar", &size_str), &size_str, |b, _| {
            b.iter(|| ScalarCV::threshold_at(black_box(&data), black_box(&mut out), black_box(153)))
        });

        #[cfg(all(target_arch = "x86_64", feature = "simd"))]
        group.bench_with_input(
            BenchmarkId::new("simd_native", &size_str),
            &size_str,
            |b, _| {
                b.iter(|| {
                    NativeCV::threshold_at(black_box(&data), black_box(&mut out), black_box(153))
                })
            },
        );
    }
    group.finish();
}

fn bench_canny(c: &mut Criterion) {
    let mut group = c.benchmark_group("CannyDilate");
    for &(width, height) in SIZES.iter() {
        let size = width * height;
        let data: Vec<u8> = (0..size)
            .map(|i| if (i % width) / 40 % 2 == 0 { 40 } else { 210 })
            .collect();
        let buffer = ImageBuffer {
            data: &data,
            width: width as u32,
            height: height as u32,
        };
        let mut edges = vec![0u8; size];
        let mut out = vec![0u8; size];
        let size_str = format!("{}x{}", width, height);

        group.bench_with_input(BenchmarkId::new("scalar", &size_str), &size_str, |b, _| {
            b.iter(|| {
                ScalarCV::canny(black_box(&buffer), &mut edges, 5.0, 50.0, 5);
                let edge_img = ImageBuffer {
                    data: &edges,
                    width: width as u32,
                    height: height as u32,
                };
                ScalarCV::dilate(&edge_img, black_box(&mut out));
            })
        });
    }
    group.finish();
}

fn bench_trace_contours(c: &mut Criterion) {
    let mut group = c.benchmark_group("TraceContours");
    for &(width, height) in SIZES.iter() {
        let size = width * height;
        // 10x10 blobs on a checker spacing give many small contours
        let mut data = vec![0u8; size];
        for y in 0..height {
            for x in 0..width {
                if (x / 10) % 2 == 0 && (y / 10) % 2 == 0 {
                    data[y * width + x] = 255;
                }
            }
        }
        let buffer = ImageBuffer {
            data: &data,
            width: width as u32,
            height: height as u32,
        };
        let size_str = format!("{}x{}", width, height);

        group.bench_with_input(BenchmarkId::new("scalar", &size_str), &size_str, |b, _| {
            b.iter(|| ScalarCV::trace_contours(black_box(&buffer)))
        });
    }
    group.finish();
}

fn bench_analyze(c: &mut Criterion) {
    let mut group = c.benchmark_group("CubeDetector_Analyze");
    group.sample_size(10);

    for &(width, height) in SIZES.iter() {
        let data = banded_rgb(width, height);
        let buffer = ColorBuffer {
            data: &data,
            width: width as u32,
            height: height as u32,
            channels: 3,
        };
        let size_str = format!("{}x{}", width, height);

        let detector_scalar =
            CubeDetector::new(ScalarCV, ExtractorParams::default()).expect("default params");
        group.bench_with_input(BenchmarkId::new("scalar", &size_str), &size_str, |b, _| {
            b.iter(|| detector_scalar.analyze(black_box(&buffer)))
        });

        #[cfg(all(target_arch = "x86_64", feature = "simd"))]
        {
            let detector_simd =
                CubeDetector::new(NativeCV, ExtractorParams::default()).expect("default params");
            group.bench_with_input(
                BenchmarkId::new("simd_native", &size_str),
                &size_str,
                |b, _| b.iter(|| detector_simd.analyze(black_box(&buffer))),
            );
        }
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_median_blur,
    bench_threshold_at,
    bench_canny,
    bench_trace_contours,
    bench_analyze
);
criterion_main!(benches);
