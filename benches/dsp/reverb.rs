//! Benchmarks for reverb processing.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use tapeworks::dsp::reverb::{Reverb, ReverbParameters};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_reverb(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/reverb");

    for &size in BLOCK_SIZES {
        // Impulse followed by a quiet tail
        let input: Vec<f32> = (0..size)
            .map(|i| {
                if i < 10 {
                    1.0 - (i as f32 / 10.0)
                } else {
                    (i as f32 * 0.05).sin() * 0.1
                }
            })
            .collect();

        let rooms = [
            ("small_room", 0.3, 0.5),
            ("large_room", 0.9, 0.3),
            ("high_damping", 0.5, 0.9),
        ];

        for (name, room_size, damping) in rooms {
            let mut reverb = Reverb::new(SAMPLE_RATE);
            reverb.set_parameters(ReverbParameters {
                room_size,
                damping,
                ..ReverbParameters::default()
            });
            let mut left = input.clone();
            let mut right = input.clone();
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| {
                    left.copy_from_slice(&input);
                    right.copy_from_slice(&input);
                    reverb.process_stereo(black_box(&mut left), black_box(&mut right));
                })
            });
        }

        let mut reverb = Reverb::new(SAMPLE_RATE);
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("mono", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                reverb.process_mono(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
