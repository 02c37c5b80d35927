//! Benchmarks for whole effects on stereo blocks.
//!
//! Each effect is prepared for the largest block size and then fed blocks of
//! every size, the way a host with a variable buffer would drive it.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use tapeworks::{AtomicParams, AudioBuffer, EffectKind, ProcessSpec};

use crate::{test_signal, BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_effects(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/effects");
    let max_block = BLOCK_SIZES.iter().copied().max().unwrap_or(512);

    for kind in EffectKind::ALL {
        let params = AtomicParams::new(kind.params());
        let mut effect = kind.create(ProcessSpec::new(SAMPLE_RATE, max_block, 2));

        for &size in BLOCK_SIZES {
            let tone = test_signal(size);
            let source = AudioBuffer::from_channels(vec![tone.clone(), tone]);
            let mut block = source.clone();

            group.bench_with_input(BenchmarkId::new(kind.name(), size), &size, |b, _| {
                b.iter(|| {
                    block.copy_from(&source);
                    effect.process(black_box(&mut block), &params);
                })
            });
        }
    }

    group.finish();
}
