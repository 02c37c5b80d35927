//! Grain buffers: a lossy tape loop per channel.

/*
Grain Buffer
============

Each channel owns a circular buffer ("grain") and two heads that walk it
independently:

    record head  ──▶ writes only while the input is loud enough
    play head    ──▶ always moving, reads `offset` samples behind itself

        0                                         length
        ├─────────────────────────────────────────┤
        │        ▲ play - offset       ▲ play      │
        │        └──── read ───────────┘           │
        │                  ▲ record                │
        └──────────────────┴───────────────────────┘

Recording is an overdub, not an overwrite. Old content fades by 0.60 on
each pass while new input comes in at 0.25:

    buf[record] = input × 0.25 + buf[record] × 0.60

    slot 0.5, input 1.0  →  0.25 + 0.30 = 0.55

Playback sums the delayed loop onto the dry signal:

    out = input + buf[(play - offset) mod length]

The offset is half the grain length, so the loop plays back half a grain
behind the play head.


Block gate
----------

Whether a channel records at all is decided once per block, from the
peak of the *whole* dry block:

    peak(block) > 0.075  →  record every sample of the block
    otherwise            →  leave the grain untouched

A block holding a loud transient followed by silence records the silence
too. For each channel the record pass runs over the whole block before the
play pass, so playback can already hear what was just recorded.


Length changes
--------------

Storage is allocated once at the largest grain length. Changing the length
clears the history and clamps both heads into the new range; nothing is
reallocated, so a length change is safe on the audio thread.
*/

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::buffer::{peak, AudioBuffer};

/// Gate and overdub weights of the grain recorder.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrainConfig {
    /// Block peak a channel must exceed to record.
    pub record_threshold: f32,
    /// Weight of the incoming sample.
    pub input_weight: f32,
    /// Weight of the existing buffer content.
    pub history_weight: f32,
}

impl Default for GrainConfig {
    fn default() -> Self {
        Self {
            record_threshold: 0.075,
            input_weight: 0.25,
            history_weight: 0.60,
        }
    }
}

/// One channel's circular grain with its record and play heads.
#[derive(Debug, Clone)]
pub struct GrainBuffer {
    data: Vec<f32>,
    length: usize,
    record_pos: usize,
    play_pos: usize,
}

impl GrainBuffer {
    /// Allocate `capacity` samples and use the first `length` of them.
    pub fn new(capacity: usize, length: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            data: vec![0.0; capacity],
            length: length.clamp(1, capacity),
            record_pos: 0,
            play_pos: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Playback lag behind the play head.
    pub fn offset(&self) -> usize {
        self.length / 2
    }

    pub fn record_position(&self) -> usize {
        self.record_pos
    }

    pub fn play_position(&self) -> usize {
        self.play_pos
    }

    /// The active part of the grain.
    pub fn contents(&self) -> &[f32] {
        &self.data[..self.length]
    }

    /// Change the grain length, clearing history. Returns the length actually applied.
    ///
    /// Lengths are clamped to `1..=capacity`. Setting the current length is a no-op.
    pub fn set_length(&mut self, length: usize) -> usize {
        let length = length.clamp(1, self.capacity());
        if length != self.length {
            self.length = length;
            self.data.fill(0.0);
            self.record_pos %= length;
            self.play_pos %= length;
        }
        self.length
    }

    /// Overdub `input` at the record head.
    pub fn record(&mut self, input: &[f32], config: &GrainConfig) {
        for &sample in input {
            let slot = &mut self.data[self.record_pos];
            *slot = sample * config.input_weight + *slot * config.history_weight;
            self.record_pos += 1;
            if self.record_pos >= self.length {
                self.record_pos = 0;
            }
        }
    }

    /// Add the lagged loop to `samples` in place.
    pub fn play(&mut self, samples: &mut [f32]) {
        let length = self.length;
        let offset = self.offset();
        for sample in samples.iter_mut() {
            let read = (self.play_pos + length - offset) % length;
            *sample += self.data[read];
            self.play_pos += 1;
            if self.play_pos >= length {
                self.play_pos = 0;
            }
        }
    }

    /// Gate on the block peak, record if open, then play. Returns whether it recorded.
    pub fn process(&mut self, samples: &mut [f32], config: &GrainConfig) -> bool {
        let recording = peak(samples) > config.record_threshold;
        if recording {
            self.record(samples, config);
        }
        self.play(samples);
        recording
    }

    pub fn reset(&mut self) {
        self.data.fill(0.0);
        self.record_pos = 0;
        self.play_pos = 0;
    }
}

/// Grain buffers for every prepared channel.
#[derive(Debug, Clone, Default)]
pub struct GrainEngine {
    config: GrainConfig,
    buffers: Vec<GrainBuffer>,
}

impl GrainEngine {
    pub fn new(config: GrainConfig) -> Self {
        Self {
            config,
            buffers: Vec::new(),
        }
    }

    pub fn config(&self) -> &GrainConfig {
        &self.config
    }

    /// Allocate one buffer of `capacity` per channel. Allocates.
    pub fn prepare(&mut self, num_channels: usize, capacity: usize, length: usize) {
        self.buffers = (0..num_channels)
            .map(|_| GrainBuffer::new(capacity, length))
            .collect();
    }

    /// Apply a new grain length to every channel.
    pub fn set_length(&mut self, length: usize) {
        let Some(current) = self.buffers.first().map(GrainBuffer::length) else {
            return;
        };
        if current == length {
            return;
        }
        for buffer in &mut self.buffers {
            buffer.set_length(length);
        }
        tracing::debug!(from = current, to = self.length(), "grain length changed, history cleared");
    }

    /// Current grain length (0 before `prepare`).
    pub fn length(&self) -> usize {
        self.buffers.first().map_or(0, GrainBuffer::length)
    }

    pub fn buffer(&self, channel: usize) -> Option<&GrainBuffer> {
        self.buffers.get(channel)
    }

    /// Run every prepared channel of `block`; other channels pass through.
    pub fn process(&mut self, block: &mut AudioBuffer) {
        let config = self.config;
        for (samples, grain) in block.channels_mut().zip(self.buffers.iter_mut()) {
            grain.process(samples, &config);
        }
    }

    pub fn reset(&mut self) {
        for buffer in &mut self.buffers {
            buffer.reset();
        }
    }
}
