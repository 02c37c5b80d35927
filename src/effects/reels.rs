//! Reels: every channel overdubs itself onto a short tape loop and hears the
//! loop half a grain later.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::buffer::AudioBuffer;
use crate::dsp::grain::{GrainConfig, GrainEngine};
use crate::effects::{Effect, ProcessSpec};
use crate::params::{ParamSpec, ParameterSource};

pub const GRAIN_SIZE: &str = "GRAIN_SIZE";

pub static PARAMS: &[ParamSpec] = &[ParamSpec::new(GRAIN_SIZE, "Grain Size", 100.0, 30000.0, 20000.0)];

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReelsConfig {
    pub grain: GrainConfig,
    /// Longest grain in samples; storage is allocated for this up front.
    pub max_grain_size: usize,
    pub min_grain_size: usize,
}

impl Default for ReelsConfig {
    fn default() -> Self {
        Self {
            grain: GrainConfig::default(),
            max_grain_size: 30_000,
            min_grain_size: 100,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Reels {
    config: ReelsConfig,
    engine: GrainEngine,
}

impl Reels {
    pub fn new() -> Self {
        Self::with_config(ReelsConfig::default())
    }

    pub fn with_config(config: ReelsConfig) -> Self {
        let mut effect = Self {
            config,
            engine: GrainEngine::new(config.grain),
        };
        effect.prepare(ProcessSpec::default());
        effect
    }

    pub fn config(&self) -> &ReelsConfig {
        &self.config
    }

    /// Current grain length in samples.
    pub fn grain_length(&self) -> usize {
        self.engine.length()
    }

    pub fn engine(&self) -> &GrainEngine {
        &self.engine
    }

    fn grain_size(&self, value: f32) -> usize {
        let value = if value.is_finite() { value.round() } else { 0.0 };
        (value.max(0.0) as usize).clamp(self.config.min_grain_size, self.config.max_grain_size)
    }
}

impl Default for Reels {
    fn default() -> Self {
        Self::new()
    }
}

impl Effect for Reels {
    fn name(&self) -> &'static str {
        "Reels"
    }

    fn params(&self) -> &'static [ParamSpec] {
        PARAMS
    }

    fn prepare(&mut self, spec: ProcessSpec) {
        let length = self.grain_size(PARAMS[0].default);
        tracing::debug!(
            sample_rate = spec.sample_rate,
            channels = spec.num_channels,
            capacity = self.config.max_grain_size,
            length,
            "preparing Reels"
        );
        self.engine
            .prepare(spec.processed_channels(), self.config.max_grain_size, length);
    }

    fn process(&mut self, buffer: &mut AudioBuffer, params: &dyn ParameterSource) {
        let length = self.grain_size(params.get(GRAIN_SIZE));
        self.engine.set_length(length);
        self.engine.process(buffer);
    }

    fn reset(&mut self) {
        self.engine.reset();
    }
}
