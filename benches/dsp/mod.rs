//! Benchmarks for low-level DSP primitives.

mod chorus;
mod filter;
mod fold;
mod grain;
mod mix;
mod reverb;

pub use chorus::bench_chorus;
pub use filter::bench_filter;
pub use fold::bench_fold;
pub use grain::bench_grain;
pub use mix::bench_mix;
pub use reverb::bench_reverb;
