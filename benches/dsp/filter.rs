//! Benchmarks for the tone filters.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use tapeworks::dsp::filter::{FilterType, ToneFilter};

use crate::{test_signal, BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/filter");

    let kinds = [
        ("band_pass", FilterType::BandPass),
        ("high_pass", FilterType::HighPass),
        ("high_shelf", FilterType::HighShelf { gain_db: -6.0 }),
    ];

    for &size in BLOCK_SIZES {
        let input = test_signal(size);

        for (name, filter_type) in kinds {
            let mut filter = ToneFilter::new(filter_type, 0.707, [-10.0, 10.0]);
            filter.prepare(SAMPLE_RATE);
            let mut buffer = input.clone();

            // Fixed cutoff: coefficients are designed once
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| {
                    for (x, &s) in buffer.iter_mut().zip(&input) {
                        *x = filter.process(0, black_box(s), black_box(1_000.0));
                    }
                })
            });
        }

        // Cutoff moving every block forces a redesign
        let mut filter = ToneFilter::new(FilterType::BandPass, 0.707, [-10.0, 10.0]);
        filter.prepare(SAMPLE_RATE);
        let mut buffer = input.clone();
        let mut cutoff = 500.0f32;
        group.bench_with_input(BenchmarkId::new("band_pass_sweep", size), &size, |b, _| {
            b.iter(|| {
                cutoff = if cutoff > 5_000.0 { 500.0 } else { cutoff * 1.01 };
                for (x, &s) in buffer.iter_mut().zip(&input) {
                    *x = filter.process(0, black_box(s), cutoff);
                }
            })
        });
    }

    group.finish();
}
