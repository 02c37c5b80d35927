//! Benchmarks for dry/wet mixing.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use tapeworks::dsp::mix::{self, DryWetMixer};
use tapeworks::AudioBuffer;

use crate::BLOCK_SIZES;

pub fn bench_mix(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/mix");

    for &size in BLOCK_SIZES {
        let dry: Vec<f32> = (0..size).map(|i| (i as f32 * 0.1).sin()).collect();
        let signal_b: Vec<f32> = (0..size).map(|i| (i as f32 * 0.15).cos()).collect();

        // Slice crossfade
        let mut wet = signal_b.clone();
        group.bench_with_input(BenchmarkId::new("dry_wet", size), &size, |b, _| {
            b.iter(|| {
                wet.copy_from_slice(&signal_b);
                mix::apply_dry_wet(black_box(&dry), black_box(&mut wet), black_box(0.3));
            })
        });

        // Stereo capture + mix, as the effects run it
        let source = AudioBuffer::from_channels(vec![dry.clone(), signal_b.clone()]);
        let mut block = source.clone();
        let mut mixer = DryWetMixer::new();
        mixer.prepare(2, size);
        group.bench_with_input(BenchmarkId::new("capture_mix_stereo", size), &size, |b, _| {
            b.iter(|| {
                block.copy_from(&source);
                mixer.capture(&block);
                mixer.mix(black_box(&mut block), black_box(0.25));
            })
        });
    }

    group.finish();
}
