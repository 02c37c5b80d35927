//! Dry/wet capture and crossfading.

/*
Dry/Wet Mixing
==============

An effect that colours the whole signal usually lets the user dial how much
of it is heard. The unprocessed input (dry) is kept aside while the block is
processed (wet), then the two are crossfaded:

    output = wet × proportion + dry × (1 - proportion)

  proportion = 0.0  →  dry only, bit-exact
  proportion = 1.0  →  wet only, bit-exact
  proportion = 0.25 →  a quarter effect

Example: dry 0.4, wet -0.2, proportion 0.25
    -0.2 × 0.25 + 0.4 × 0.75 = -0.05 + 0.3 = 0.25


Capture, then mix
-----------------

Effects process in place, so the dry copy has to be taken before the first
wet stage touches the block:

    ┌────────┐  capture   ┌──────────┐
    │ block  │──────────▶ │ dry copy │
    └───┬────┘            └────┬─────┘
        │ wet stages           │
        ▼                      │
    ┌────────┐    mix          │
    │ block  │◀────────────────┘
    └────────┘

The dry buffer is sized in prepare() for the largest block the host
promised. A bigger block still gets mixed: the buffer grows to fit and a
warning is logged, since that growth allocates on the audio thread.


No clamping
-----------

The mixer takes the proportion as given. The host's parameter range keeps
it within 0..1; anything outside extrapolates past the endpoints instead of
crossfading:

    proportion = 1.5, dry 0.0, wet 1.0  →  1.5
    proportion = -0.5, dry 1.0, wet 0.0 →  1.5
*/

use crate::buffer::AudioBuffer;

/// Blend one dry and one wet sample: `wet × proportion + dry × (1 - proportion)`.
#[inline]
pub fn blend_dry_wet(dry: f32, wet: f32, proportion: f32) -> f32 {
    wet * proportion + dry * (1.0 - proportion)
}

/// Blend `dry` into `wet` in place.
#[inline]
pub fn apply_dry_wet(dry: &[f32], wet: &mut [f32], proportion: f32) {
    debug_assert_eq!(dry.len(), wet.len());

    for (wet_sample, &dry_sample) in wet.iter_mut().zip(dry.iter()) {
        *wet_sample = blend_dry_wet(dry_sample, *wet_sample, proportion);
    }
}

/// Holds the dry copy of the current block.
#[derive(Debug, Clone, Default)]
pub struct DryWetMixer {
    dry: AudioBuffer,
    max_block_size: usize,
}

impl DryWetMixer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the dry buffer for `num_channels` × `max_block_size`.
    ///
    /// Only the first `num_channels` channels of a block are ever captured or mixed.
    pub fn prepare(&mut self, num_channels: usize, max_block_size: usize) {
        self.dry = AudioBuffer::new(num_channels, max_block_size);
        self.max_block_size = max_block_size;
    }

    /// Copy `block` as the dry signal.
    pub fn capture(&mut self, block: &AudioBuffer) {
        let samples = block.num_samples();
        if samples > self.max_block_size {
            tracing::warn!(
                samples,
                prepared = self.max_block_size,
                "block larger than prepared; growing dry buffer"
            );
            self.dry.resize(self.dry.num_channels(), samples);
            self.max_block_size = samples;
        } else {
            self.dry.set_num_samples(samples);
        }
        self.dry.copy_from(block);
    }

    /// The most recently captured dry block.
    pub fn dry(&self) -> &AudioBuffer {
        &self.dry
    }

    /// Crossfade `block` (wet) against the captured dry copy.
    ///
    /// Only the overlap of the two buffers is mixed; channels past the
    /// prepared count are left as they are.
    pub fn mix(&self, block: &mut AudioBuffer, proportion: f32) {
        let samples = block.num_samples().min(self.dry.num_samples());
        for (wet, dry) in block.channels_mut().zip(self.dry.channels()) {
            apply_dry_wet(&dry[..samples], &mut wet[..samples], proportion);
        }
    }

    pub fn reset(&mut self) {
        self.dry.clear();
    }
}
