//! Benchmarks for the screenshot post-processing pipeline.
//!
//! Run with: `cargo bench --bench postprocess_bench`

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::{Rgb, RgbImage};
use scopegrab::postprocess::{declutter, AnnotationSpec, PostProcessor, RenderOptions};

/// A busy-looking 800x480 capture: checkerboard standing in for a trace.
fn synthetic_capture() -> RgbImage {
    RgbImage::from_fn(800, 480, |x, y| {
        if (x / 8 + y / 8) % 2 == 0 {
            Rgb([20, 20, 20])
        } else {
            Rgb([0xF7, 0xFA, 0x52])
        }
    })
}

fn full_spec() -> AnnotationSpec {
    let timestamp = NaiveDate::from_ymd_opt(2021, 4, 14)
        .unwrap()
        .and_hms_opt(9, 53, 13)
        .unwrap();
    AnnotationSpec::at(timestamp)
        .with_note("benchmark capture")
        .with_label(1, "clk")
        .with_label(2, "data")
        .with_label(3, "cs")
        .with_label(4, "irq")
}

fn bench_declutter(c: &mut Criterion) {
    let processor = PostProcessor::ds1000z();
    let capture = synthetic_capture();

    c.bench_function("declutter_800x480", |b| {
        b.iter(|| {
            let mut image = capture.clone();
            declutter(&mut image, processor.catalog()).unwrap();
            black_box(image)
        });
    });
}

fn bench_full_pipeline(c: &mut Criterion) {
    let processor = PostProcessor::ds1000z();
    let capture = synthetic_capture();
    let spec = full_spec();

    c.bench_function("process_full_800x480", |b| {
        b.iter(|| {
            processor
                .process(black_box(capture.clone()), &spec, &RenderOptions::default())
                .unwrap()
        });
    });

    c.bench_function("process_raw_800x480", |b| {
        b.iter(|| {
            processor
                .process(black_box(capture.clone()), &spec, &RenderOptions::raw())
                .unwrap()
        });
    });
}

criterion_group!(benches, bench_declutter, bench_full_pipeline);
criterion_main!(benches);
