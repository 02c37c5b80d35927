//! Host-facing parameters.
//!
//! The DSP code never owns its controls. Each effect publishes a static table
//! of [`ParamSpec`]s and polls current values through a [`ParameterSource`]
//! while it renders, as often as once per sample.

/*
Polling vs Events
=================

A plugin host (or our terminal UI) moves knobs on its own thread. Two ways to
get those values into the audio thread:

  events    The UI pushes "param X changed to Y" messages into a queue that
            the audio thread drains once per block.

  polling   The UI writes the latest value into a shared slot; the audio
            thread reads the slot whenever it needs the value.

We poll. A slot is an `AtomicU32` holding the f32 bit pattern, written and
read with relaxed ordering. There is no ordering guarantee between a UI write
and the first sample that sees it beyond "eventually visible" - which is why
the effects put a SmoothedValue between a raw parameter and anything that
would click if it jumped.
*/

use std::sync::atomic::{AtomicU32, Ordering};

/// Declaration of one named, bounded float parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSpec {
    /// Stable identifier used by `ParameterSource::get`.
    pub id: &'static str,
    /// Human-readable label.
    pub name: &'static str,
    pub min: f32,
    pub max: f32,
    pub default: f32,
}

impl ParamSpec {
    pub const fn new(id: &'static str, name: &'static str, min: f32, max: f32, default: f32) -> Self {
        Self {
            id,
            name,
            min,
            max,
            default,
        }
    }

    /// Clamp a value into the declared range.
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }

    /// Map a value to 0.0..=1.0 across the declared range.
    pub fn normalize(&self, value: f32) -> f32 {
        let span = self.max - self.min;
        if span <= 0.0 {
            return 0.0;
        }
        ((value - self.min) / span).clamp(0.0, 1.0)
    }

    /// Inverse of [`normalize`](Self::normalize).
    pub fn denormalize(&self, normalized: f32) -> f32 {
        self.min + normalized.clamp(0.0, 1.0) * (self.max - self.min)
    }
}

/// Read-only view of live parameter values.
///
/// Implementations must be cheap and lock-free; effects may call `get` for
/// every sample.
pub trait ParameterSource {
    /// Current value of the parameter `id`.
    ///
    /// Unknown ids read as 0.0.
    fn get(&self, id: &str) -> f32;
}

impl<T: ParameterSource + ?Sized> ParameterSource for &T {
    fn get(&self, id: &str) -> f32 {
        (**self).get(id)
    }
}

impl<T: ParameterSource + ?Sized> ParameterSource for std::sync::Arc<T> {
    fn get(&self, id: &str) -> f32 {
        (**self).get(id)
    }
}

/// Lock-free parameter store backed by one `AtomicU32` per declared parameter.
///
/// Share it between threads with an `Arc`: the UI thread calls
/// [`set`](Self::set), the audio thread reads through [`ParameterSource`].
#[derive(Debug)]
pub struct AtomicParams {
    specs: &'static [ParamSpec],
    values: Box<[AtomicU32]>,
}

impl AtomicParams {
    /// Create a store with every parameter at its default.
    pub fn new(specs: &'static [ParamSpec]) -> Self {
        let values = specs
            .iter()
            .map(|spec| AtomicU32::new(spec.default.to_bits()))
            .collect();
        Self { specs, values }
    }

    pub fn specs(&self) -> &'static [ParamSpec] {
        self.specs
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.specs.iter().position(|spec| spec.id == id)
    }

    /// Store a new value, clamped to the parameter's range.
    ///
    /// Returns the stored value, or `None` when `id` is not declared or
    /// `value` is NaN or infinite (the previous value is kept).
    pub fn set(&self, id: &str, value: f32) -> Option<f32> {
        if !value.is_finite() {
            return None;
        }
        let index = self.index_of(id)?;
        let clamped = self.specs[index].clamp(value);
        self.values[index].store(clamped.to_bits(), Ordering::Relaxed);
        Some(clamped)
    }

    /// Read by table position (UI convenience).
    pub fn get_index(&self, index: usize) -> f32 {
        self.values
            .get(index)
            .map(|v| f32::from_bits(v.load(Ordering::Relaxed)))
            .unwrap_or(0.0)
    }

    /// Move a parameter by a fraction of its range.
    ///
    /// A non-finite `fraction` leaves the value alone and returns `None`.
    pub fn nudge(&self, index: usize, fraction: f32) -> Option<f32> {
        let spec = self.specs.get(index)?;
        if !fraction.is_finite() {
            return None;
        }
        let current = self.get_index(index);
        let next = spec.clamp(current + fraction * (spec.max - spec.min));
        self.values[index].store(next.to_bits(), Ordering::Relaxed);
        Some(next)
    }

    /// Put every parameter back to its default.
    pub fn reset_to_defaults(&self) {
        for (spec, value) in self.specs.iter().zip(self.values.iter()) {
            value.store(spec.default.to_bits(), Ordering::Relaxed);
        }
    }

}

impl ParameterSource for AtomicParams {
    #[inline]
    fn get(&self, id: &str) -> f32 {
        self.index_of(id).map(|i| self.get_index(i)).unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    static SPECS: [ParamSpec; 2] = [
        ParamSpec::new("GAIN", "Gain", 0.0, 2.0, 0.5),
        ParamSpec::new("BIAS", "Bias", -0.5, 0.5, 0.0),
    ];

    #[test]
    fn test_defaults_are_loaded() {
        let params = AtomicParams::new(&SPECS);
        assert_eq!(params.get("GAIN"), 0.5);
        assert_eq!(params.get("BIAS"), 0.0);
    }

    #[test]
    fn test_set_clamps_to_range() {
        let params = AtomicParams::new(&SPECS);
        assert_eq!(params.set("GAIN", 5.0), Some(2.0));
        assert_eq!(params.get("GAIN"), 2.0);
        assert_eq!(params.set("BIAS", -3.0), Some(-0.5));
    }

    #[test]
    fn test_non_finite_writes_are_rejected() {
        let params = AtomicParams::new(&SPECS);
        params.set("GAIN", 1.5);
        assert_eq!(params.set("GAIN", f32::NAN), None);
        assert_eq!(params.set("GAIN", f32::INFINITY), None);
        assert_eq!(params.set("BIAS", f32::NEG_INFINITY), None);
        assert_eq!(params.get("GAIN"), 1.5);
        assert_eq!(params.get("BIAS"), 0.0);

        assert_eq!(params.nudge(0, f32::NAN), None);
        assert_eq!(params.get("GAIN"), 1.5);
    }

    #[test]
    fn test_unknown_ids() {
        let params = AtomicParams::new(&SPECS);
        assert_eq!(params.set("NOPE", 1.0), None);
        assert_eq!(params.get("NOPE"), 0.0);
    }

    #[test]
    fn test_nudge_moves_by_fraction_of_range() {
        let params = AtomicParams::new(&SPECS);
        let value = params.nudge(0, 0.25).unwrap();
        assert!((value - 1.0).abs() < 1e-6);
        let value = params.nudge(0, 10.0).unwrap();
        assert_eq!(value, 2.0);
    }

    #[test]
    fn test_writes_visible_across_threads() {
        let params = Arc::new(AtomicParams::new(&SPECS));
        let writer = Arc::clone(&params);
        std::thread::spawn(move || {
            writer.set("BIAS", 0.25);
        })
        .join()
        .unwrap();
        assert_eq!(params.get("BIAS"), 0.25);
    }

    #[test]
    fn test_normalize_roundtrip() {
        let spec = SPECS[1];
        assert_eq!(spec.normalize(-0.5), 0.0);
        assert_eq!(spec.normalize(0.5), 1.0);
        assert!((spec.denormalize(spec.normalize(0.1)) - 0.1).abs() < 1e-6);
    }
}
