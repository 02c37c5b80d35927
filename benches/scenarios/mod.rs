//! Benchmarks for complete effects.

mod effects;

pub use effects::bench_effects;
