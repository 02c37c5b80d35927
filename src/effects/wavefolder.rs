//! WaveFolder: gain, bias and threshold each swept by their own LFO, then a
//! single-pass fold.
//!
//! ```text
//!   x ──(×gain)──(+bias)──┬── |y| < gate ──▶ x (untouched)
//!         ▲        ▲      │
//!        LFO      LFO     └──▶ fold(y, threshold) ──(×volume)──▶ out
//!                                        ▲
//!                                       LFO
//! ```
//!
//! All three LFOs advance once per sample frame and are shared by both
//! channels, so left and right see the same modulation.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::buffer::AudioBuffer;
use crate::dsp::fold::{drive, fold};
use crate::dsp::modulate::ModulatedParam;
use crate::dsp::LfoWaveform;
use crate::effects::{Effect, ProcessSpec};
use crate::params::{ParamSpec, ParameterSource};

pub const GAIN: &str = "GAIN";
pub const BIAS: &str = "BIAS";
pub const THRESHOLD: &str = "THRESHOLD";
pub const VOLUME: &str = "VOLUME";
pub const THR_LFO_RATE: &str = "THR_LFO_RATE";
pub const THR_LFO_DEPTH: &str = "THR_LFO_DEPTH";
pub const GAIN_LFO_RATE: &str = "GAIN_LFO_RATE";
pub const GAIN_LFO_DEPTH: &str = "GAIN_LFO_DEPTH";
pub const BIAS_LFO_RATE: &str = "BIAS_LFO_RATE";
pub const BIAS_LFO_DEPTH: &str = "BIAS_LFO_DEPTH";

pub static PARAMS: &[ParamSpec] = &[
    ParamSpec::new(GAIN, "Gain", 0.0, 2.0, 0.5),
    ParamSpec::new(BIAS, "Bias", -0.5, 0.5, 0.0),
    ParamSpec::new(THRESHOLD, "Threshold", 0.0, 0.5, 0.1),
    ParamSpec::new(VOLUME, "Volume", 0.0, 2.0, 0.5),
    ParamSpec::new(THR_LFO_RATE, "Threshold LFO Rate", 0.01, 20.0, 1.0),
    ParamSpec::new(THR_LFO_DEPTH, "Threshold LFO Depth", 0.0, 0.2, 0.01),
    ParamSpec::new(GAIN_LFO_RATE, "Gain LFO Rate", 0.01, 20.0, 1.0),
    ParamSpec::new(GAIN_LFO_DEPTH, "Gain LFO Depth", 0.0, 0.5, 0.0),
    ParamSpec::new(BIAS_LFO_RATE, "Bias LFO Rate", 0.01, 20.0, 1.0),
    ParamSpec::new(BIAS_LFO_DEPTH, "Bias LFO Depth", 0.0, 0.2, 0.0),
];

/// Tuned constants of the folder.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveFolderConfig {
    /// Post-bias magnitude below which a sample passes through untouched.
    pub gate_threshold: f32,
    /// Ramp time of every LFO depth.
    pub depth_ramp_seconds: f32,
    pub lfo_waveform: LfoWaveform,
}

impl Default for WaveFolderConfig {
    fn default() -> Self {
        Self {
            gate_threshold: 0.005,
            depth_ramp_seconds: 0.05,
            lfo_waveform: LfoWaveform::Sine,
        }
    }
}

/// Parameter values read once per block.
#[derive(Debug, Clone, Copy)]
struct Controls {
    gain: f32,
    bias: f32,
    threshold: f32,
    volume: f32,
    thr_rate: f32,
    thr_depth: f32,
    gain_rate: f32,
    gain_depth: f32,
    bias_rate: f32,
    bias_depth: f32,
}

impl Controls {
    fn read(params: &dyn ParameterSource) -> Self {
        Self {
            gain: params.get(GAIN),
            bias: params.get(BIAS),
            threshold: params.get(THRESHOLD),
            volume: params.get(VOLUME),
            thr_rate: params.get(THR_LFO_RATE),
            thr_depth: params.get(THR_LFO_DEPTH),
            gain_rate: params.get(GAIN_LFO_RATE),
            gain_depth: params.get(GAIN_LFO_DEPTH),
            bias_rate: params.get(BIAS_LFO_RATE),
            bias_depth: params.get(BIAS_LFO_DEPTH),
        }
    }
}

#[derive(Debug, Clone)]
pub struct WaveFolder {
    config: WaveFolderConfig,
    spec: ProcessSpec,
    threshold: ModulatedParam,
    gain: ModulatedParam,
    bias: ModulatedParam,
}

impl WaveFolder {
    pub fn new() -> Self {
        Self::with_config(WaveFolderConfig::default())
    }

    pub fn with_config(config: WaveFolderConfig) -> Self {
        let spec = ProcessSpec::default();
        let path = || ModulatedParam::new(config.lfo_waveform, spec.sample_rate, config.depth_ramp_seconds);
        Self {
            config,
            spec,
            threshold: path(),
            gain: path(),
            bias: path(),
        }
    }

    pub fn config(&self) -> &WaveFolderConfig {
        &self.config
    }

    fn paths_mut(&mut self) -> [&mut ModulatedParam; 3] {
        [&mut self.threshold, &mut self.gain, &mut self.bias]
    }
}

impl Default for WaveFolder {
    fn default() -> Self {
        Self::new()
    }
}

impl Effect for WaveFolder {
    fn name(&self) -> &'static str {
        "WaveFolder"
    }

    fn params(&self) -> &'static [ParamSpec] {
        PARAMS
    }

    fn prepare(&mut self, spec: ProcessSpec) {
        tracing::debug!(
            sample_rate = spec.sample_rate,
            max_block_size = spec.max_block_size,
            channels = spec.num_channels,
            "preparing WaveFolder"
        );
        self.spec = spec;
        let ramp = self.config.depth_ramp_seconds;
        for path in self.paths_mut() {
            path.prepare(spec.sample_rate, ramp);
        }
        // depths start where the defaults put them, no ramp in from zero
        let depth = |id: &str| PARAMS.iter().find(|p| p.id == id).map_or(0.0, |p| p.default);
        self.threshold.set_depth_immediate(depth(THR_LFO_DEPTH));
        self.gain.set_depth_immediate(depth(GAIN_LFO_DEPTH));
        self.bias.set_depth_immediate(depth(BIAS_LFO_DEPTH));
    }

    fn process(&mut self, buffer: &mut AudioBuffer, params: &dyn ParameterSource) {
        let c = Controls::read(params);
        self.threshold.set_rate(c.thr_rate);
        self.gain.set_rate(c.gain_rate);
        self.bias.set_rate(c.bias_rate);

        let channels = buffer.num_channels().min(self.spec.processed_channels());
        let gate = self.config.gate_threshold;

        for i in 0..buffer.num_samples() {
            let threshold = self.threshold.next(c.threshold, c.thr_depth);
            let gain = self.gain.next(c.gain, c.gain_depth);
            let bias = self.bias.next(c.bias, c.bias_depth);

            for ch in 0..channels {
                let x = buffer.sample(ch, i);
                let y = drive(x, gain, bias);
                if y.abs() < gate {
                    continue;
                }
                buffer.set_sample(ch, i, fold(y, threshold) * c.volume);
            }
        }
    }

    fn reset(&mut self) {
        for path in self.paths_mut() {
            path.reset();
        }
    }
}
