// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for capture preprocessing in klartext-document.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use image::{DynamicImage, Rgb, RgbImage};

use klartext_document::OcrPreprocessor;

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// Full preprocessing of a 120x40 synthetic capture: light background with
/// dark horizontal "text" strokes every fourth row.
fn bench_preprocess(c: &mut Criterion) {
    let capture = RgbImage::from_fn(120, 40, |x, y| {
        if y % 4 == 1 && x % 7 != 0 {
            Rgb([25, 25, 30])
        } else {
            Rgb([235, 235, 240])
        }
    });
    let dynamic = DynamicImage::ImageRgb8(capture);
    let preprocessor = OcrPreprocessor::default();

    c.bench_function("preprocess (120x40, x3)", |b| {
        b.iter(|| {
            let out = preprocessor.preprocess(black_box(&dynamic));
            black_box(out.ok());
        });
    });
}

criterion_group!(benches, bench_preprocess);
criterion_main!(benches);
