//! Gramophony: squash, narrow band-pass and a slow vibrato, like a record
//! played on an old horn.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::buffer::AudioBuffer;
use crate::dsp::chorus::Chorus;
use crate::dsp::compressor::{Compressor, CompressorConfig};
use crate::dsp::filter::{FilterType, ToneFilter};
use crate::dsp::mix::DryWetMixer;
use crate::effects::{Effect, ProcessSpec};
use crate::params::{ParamSpec, ParameterSource};
use crate::MAX_CHANNELS;

pub const COMPRESS: &str = "COMPRESS";
pub const VIBRATO: &str = "VIBRATO";
pub const VIBRATO_RATE: &str = "VIBRATO_RATE";
pub const TONE: &str = "TONE";
pub const MIX: &str = "MIX";

pub static PARAMS: &[ParamSpec] = &[
    ParamSpec::new(COMPRESS, "Compress", 0.04, 0.3, 0.1),
    ParamSpec::new(VIBRATO, "Vibrato", 0.0, 0.1, 0.01),
    ParamSpec::new(VIBRATO_RATE, "Vibrato Rate", 0.5, 4.0, 2.0),
    ParamSpec::new(TONE, "Tone", 320.1, 4700.0, 2000.0),
    ParamSpec::new(MIX, "Mix", 0.0, 1.0, 1.0),
];

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GramophonyConfig {
    pub compressor: CompressorConfig,
    pub tone_q: f32,
    /// Added to `TONE` per channel (left, right).
    pub tone_offsets_hz: [f32; MAX_CHANNELS],
    pub chorus_centre_delay_ms: f32,
    pub chorus_feedback: f32,
    pub chorus_mix: f32,
}

impl Default for GramophonyConfig {
    fn default() -> Self {
        Self {
            compressor: CompressorConfig::default(),
            tone_q: 0.707,
            tone_offsets_hz: [-10.0, 10.0],
            chorus_centre_delay_ms: 10.0,
            chorus_feedback: 0.0,
            chorus_mix: 1.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Gramophony {
    config: GramophonyConfig,
    spec: ProcessSpec,
    compressor: Compressor,
    tone: ToneFilter,
    chorus: Chorus,
    mixer: DryWetMixer,
}

impl Gramophony {
    pub fn new() -> Self {
        Self::with_config(GramophonyConfig::default())
    }

    pub fn with_config(config: GramophonyConfig) -> Self {
        let mut chorus = Chorus::new();
        chorus.set_centre_delay(config.chorus_centre_delay_ms);
        chorus.set_feedback(config.chorus_feedback);
        chorus.set_mix(config.chorus_mix);

        let mut effect = Self {
            config,
            spec: ProcessSpec::default(),
            compressor: Compressor::new(config.compressor),
            tone: ToneFilter::new(FilterType::BandPass, config.tone_q, config.tone_offsets_hz),
            chorus,
            mixer: DryWetMixer::new(),
        };
        effect.prepare(ProcessSpec::default());
        effect
    }

    pub fn config(&self) -> &GramophonyConfig {
        &self.config
    }
}

impl Default for Gramophony {
    fn default() -> Self {
        Self::new()
    }
}

impl Effect for Gramophony {
    fn name(&self) -> &'static str {
        "Gramophony"
    }

    fn params(&self) -> &'static [ParamSpec] {
        PARAMS
    }

    fn prepare(&mut self, spec: ProcessSpec) {
        tracing::debug!(
            sample_rate = spec.sample_rate,
            max_block_size = spec.max_block_size,
            channels = spec.num_channels,
            "preparing Gramophony"
        );
        self.spec = spec;
        let channels = spec.processed_channels();
        self.tone.prepare(spec.sample_rate);
        self.chorus.prepare(spec.sample_rate, channels);
        self.mixer.prepare(channels, spec.max_block_size);
    }

    fn process(&mut self, buffer: &mut AudioBuffer, params: &dyn ParameterSource) {
        let threshold = params.get(COMPRESS);
        let tone = params.get(TONE);
        self.chorus.set_rate(params.get(VIBRATO_RATE));
        self.chorus.set_depth(params.get(VIBRATO));

        self.mixer.capture(buffer);

        let channels = buffer.num_channels().min(self.spec.processed_channels());
        for (ch, samples) in buffer.channels_mut().take(channels).enumerate() {
            for sample in samples.iter_mut() {
                let squashed = self.compressor.process(*sample, threshold);
                *sample = self.tone.process(ch, squashed, tone);
            }
            self.chorus.process_channel(ch, samples);
        }

        self.mixer.mix(buffer, params.get(MIX));
    }

    fn reset(&mut self) {
        self.tone.reset();
        self.chorus.reset();
        self.mixer.reset();
    }
}
