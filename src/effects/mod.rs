//! Complete effect processors.
//!
//! Each effect wires a handful of [`dsp`](crate::dsp) primitives together and
//! exposes them through the [`Effect`] trait:
//!
//! | effect       | chain                                                    |
//! | ------------ | -------------------------------------------------------- |
//! | `WaveFolder` | LFO-modulated gain/bias/threshold → gate → fold → volume |
//! | `Gramophony` | dry capture → compressor → band-pass → chorus → mix      |
//! | `Easyverb`   | dry capture → low cut → high shelf → reverb → mix        |
//! | `Reels`      | block gate → grain overdub → lagged playback             |

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::buffer::AudioBuffer;
use crate::layout::is_layout_supported;
use crate::params::{ParamSpec, ParameterSource};
use crate::{MAX_BLOCK_SIZE, MAX_CHANNELS};

pub mod easyverb;
pub mod gramophony;
pub mod reels;
pub mod wavefolder;

pub use easyverb::{Easyverb, EasyverbConfig};
pub use gramophony::{Gramophony, GramophonyConfig};
pub use reels::{Reels, ReelsConfig};
pub use wavefolder::{WaveFolder, WaveFolderConfig};

/// What the host promises before processing starts.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcessSpec {
    pub sample_rate: f32,
    /// Largest block `process` will be handed.
    pub max_block_size: usize,
    pub num_channels: usize,
}

impl ProcessSpec {
    pub fn new(sample_rate: f32, max_block_size: usize, num_channels: usize) -> Self {
        Self {
            sample_rate,
            max_block_size,
            num_channels,
        }
    }

    /// Channels the effect actually processes; anything above passes through.
    pub fn processed_channels(&self) -> usize {
        self.num_channels.min(MAX_CHANNELS)
    }
}

impl Default for ProcessSpec {
    fn default() -> Self {
        Self::new(48_000.0, MAX_BLOCK_SIZE, MAX_CHANNELS)
    }
}

/// A block-processing audio effect.
///
/// Call [`prepare`](Effect::prepare) whenever the sample rate, block size or
/// channel count changes; it is the only place that allocates.
/// [`process`](Effect::process) then runs once per block on the audio thread.
pub trait Effect: Send {
    fn name(&self) -> &'static str;

    /// The effect's parameter table.
    fn params(&self) -> &'static [ParamSpec];

    /// Allocate buffers and recompute everything that depends on `spec`.
    fn prepare(&mut self, spec: ProcessSpec);

    /// Process `buffer` in place, polling parameter values from `params`.
    fn process(&mut self, buffer: &mut AudioBuffer, params: &dyn ParameterSource);

    /// Clear all history (delay lines, grains, filter state).
    fn reset(&mut self);

    /// Whether the effect can run with this bus layout.
    fn is_layout_supported(&self, input_channels: usize, output_channels: usize) -> bool {
        is_layout_supported(input_channels, output_channels)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown effect '{0}' (expected one of: easyverb, gramophony, wavefolder, reels)")]
pub struct UnknownEffect(pub String);

/// The effects this crate ships.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectKind {
    Easyverb,
    Gramophony,
    WaveFolder,
    Reels,
}

impl EffectKind {
    pub const ALL: [EffectKind; 4] = [
        EffectKind::Easyverb,
        EffectKind::Gramophony,
        EffectKind::WaveFolder,
        EffectKind::Reels,
    ];

    pub fn name(self) -> &'static str {
        match self {
            EffectKind::Easyverb => "Easyverb",
            EffectKind::Gramophony => "Gramophony",
            EffectKind::WaveFolder => "WaveFolder",
            EffectKind::Reels => "Reels",
        }
    }

    pub fn params(self) -> &'static [ParamSpec] {
        match self {
            EffectKind::Easyverb => easyverb::PARAMS,
            EffectKind::Gramophony => gramophony::PARAMS,
            EffectKind::WaveFolder => wavefolder::PARAMS,
            EffectKind::Reels => reels::PARAMS,
        }
    }

    /// Build the effect with its default calibration, prepared for `spec`.
    pub fn create(self, spec: ProcessSpec) -> Box<dyn Effect> {
        let mut effect: Box<dyn Effect> = match self {
            EffectKind::Easyverb => Box::new(Easyverb::new()),
            EffectKind::Gramophony => Box::new(Gramophony::new()),
            EffectKind::WaveFolder => Box::new(WaveFolder::new()),
            EffectKind::Reels => Box::new(Reels::new()),
        };
        effect.prepare(spec);
        effect
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EffectKind {
    type Err = UnknownEffect;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EffectKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownEffect(s.to_string()))
    }
}
