//! Easyverb: a Freeverb tank with a low cut and a gentle high shelf in front.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::buffer::AudioBuffer;
use crate::dsp::filter::{FilterType, ToneFilter};
use crate::dsp::mix::DryWetMixer;
use crate::dsp::reverb::{Reverb, ReverbParameters};
use crate::effects::{Effect, ProcessSpec};
use crate::params::{ParamSpec, ParameterSource};
use crate::MAX_CHANNELS;

pub const ROOM_SIZE: &str = "ROOM_SIZE";
pub const DAMPING: &str = "DAMPING";
pub const WIDTH: &str = "WIDTH";
pub const FREEZE: &str = "FREEZE";
pub const LOW_CUT: &str = "LOW_CUT";
pub const TONE: &str = "TONE";
pub const MIX: &str = "MIX";

pub static PARAMS: &[ParamSpec] = &[
    ParamSpec::new(ROOM_SIZE, "Room Size", 0.0, 1.0, 0.5),
    ParamSpec::new(DAMPING, "Damping", 0.0, 1.0, 0.5),
    ParamSpec::new(WIDTH, "Width", 0.0, 1.0, 1.0),
    ParamSpec::new(FREEZE, "Freeze", 0.0, 1.0, 0.0),
    ParamSpec::new(LOW_CUT, "Low Cut", 20.0, 1000.0, 20.0),
    ParamSpec::new(TONE, "Tone", 1000.0, 16000.0, 8000.0),
    ParamSpec::new(MIX, "Mix", 0.0, 1.0, 0.2),
];

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EasyverbConfig {
    pub filter_q: f32,
    pub shelf_gain_db: f32,
    /// Added to both filter frequencies per channel (left, right).
    pub filter_offsets_hz: [f32; MAX_CHANNELS],
    /// Output gains inside the reverb itself, before the dry/wet mix.
    pub reverb_wet_level: f32,
    pub reverb_dry_level: f32,
}

impl Default for EasyverbConfig {
    fn default() -> Self {
        Self {
            filter_q: 0.707,
            shelf_gain_db: -6.0,
            filter_offsets_hz: [-10.0, 10.0],
            reverb_wet_level: 0.33,
            reverb_dry_level: 0.4,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Easyverb {
    config: EasyverbConfig,
    spec: ProcessSpec,
    low_cut: ToneFilter,
    shelf: ToneFilter,
    reverb: Reverb,
    mixer: DryWetMixer,
}

impl Easyverb {
    pub fn new() -> Self {
        Self::with_config(EasyverbConfig::default())
    }

    pub fn with_config(config: EasyverbConfig) -> Self {
        let spec = ProcessSpec::default();
        let mut effect = Self {
            config,
            spec,
            low_cut: ToneFilter::new(FilterType::HighPass, config.filter_q, config.filter_offsets_hz),
            shelf: ToneFilter::new(
                FilterType::HighShelf {
                    gain_db: config.shelf_gain_db,
                },
                config.filter_q,
                config.filter_offsets_hz,
            ),
            reverb: Reverb::new(spec.sample_rate),
            mixer: DryWetMixer::new(),
        };
        effect.prepare(spec);
        effect
    }

    pub fn config(&self) -> &EasyverbConfig {
        &self.config
    }

    fn reverb_parameters(&self, params: &dyn ParameterSource) -> ReverbParameters {
        ReverbParameters {
            room_size: params.get(ROOM_SIZE),
            damping: params.get(DAMPING),
            wet_level: self.config.reverb_wet_level,
            dry_level: self.config.reverb_dry_level,
            width: params.get(WIDTH),
            freeze: params.get(FREEZE),
        }
    }
}

impl Default for Easyverb {
    fn default() -> Self {
        Self::new()
    }
}

impl Effect for Easyverb {
    fn name(&self) -> &'static str {
        "Easyverb"
    }

    fn params(&self) -> &'static [ParamSpec] {
        PARAMS
    }

    fn prepare(&mut self, spec: ProcessSpec) {
        tracing::debug!(
            sample_rate = spec.sample_rate,
            max_block_size = spec.max_block_size,
            channels = spec.num_channels,
            "preparing Easyverb"
        );
        self.spec = spec;
        self.low_cut.prepare(spec.sample_rate);
        self.shelf.prepare(spec.sample_rate);
        self.reverb.prepare(spec.sample_rate);
        self.mixer.prepare(spec.processed_channels(), spec.max_block_size);
    }

    fn process(&mut self, buffer: &mut AudioBuffer, params: &dyn ParameterSource) {
        let low_cut = params.get(LOW_CUT);
        let tone = params.get(TONE);
        let reverb_parameters = self.reverb_parameters(params);
        self.reverb.set_parameters(reverb_parameters);

        self.mixer.capture(buffer);

        let channels = buffer.num_channels().min(self.spec.processed_channels());
        for (ch, samples) in buffer.channels_mut().take(channels).enumerate() {
            for sample in samples.iter_mut() {
                let cut = self.low_cut.process(ch, *sample, low_cut);
                *sample = self.shelf.process(ch, cut, tone);
            }
        }

        match channels {
            0 => {}
            1 => self.reverb.process_mono(buffer.channel_mut(0)),
            _ => self.reverb.process(buffer),
        }

        self.mixer.mix(buffer, params.get(MIX));
    }

    fn reset(&mut self) {
        self.low_cut.reset();
        self.shelf.reset();
        self.reverb.reset();
        self.mixer.reset();
    }
}
