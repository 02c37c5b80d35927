//! Multichannel sample storage handed to every effect.

/// A channels × samples block of audio, mutated in place by effects.
///
/// Every channel always holds the same number of samples. Samples are not
/// clamped; effects are free to push them outside [-1.0, 1.0].
#[derive(Debug, Default, Clone, PartialEq)]
pub struct AudioBuffer {
    channels: Vec<Vec<f32>>,
    num_samples: usize,
}

impl AudioBuffer {
    /// Allocate a silent buffer.
    pub fn new(num_channels: usize, num_samples: usize) -> Self {
        Self {
            channels: vec![vec![0.0; num_samples]; num_channels],
            num_samples,
        }
    }

    /// Build a buffer from per-channel sample vectors.
    ///
    /// Shorter channels are zero-padded to the longest one.
    pub fn from_channels(mut channels: Vec<Vec<f32>>) -> Self {
        let num_samples = channels.iter().map(Vec::len).max().unwrap_or(0);
        for channel in &mut channels {
            channel.resize(num_samples, 0.0);
        }
        Self {
            channels,
            num_samples,
        }
    }

    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    pub fn num_samples(&self) -> usize {
        self.num_samples
    }

    pub fn channel(&self, index: usize) -> &[f32] {
        &self.channels[index]
    }

    pub fn channel_mut(&mut self, index: usize) -> &mut [f32] {
        &mut self.channels[index]
    }

    pub fn channels(&self) -> impl Iterator<Item = &[f32]> {
        self.channels.iter().map(Vec::as_slice)
    }

    pub fn channels_mut(&mut self) -> impl Iterator<Item = &mut [f32]> {
        self.channels.iter_mut().map(Vec::as_mut_slice)
    }

    /// Read one sample.
    #[inline]
    pub fn sample(&self, channel: usize, index: usize) -> f32 {
        self.channels[channel][index]
    }

    /// Overwrite one sample.
    #[inline]
    pub fn set_sample(&mut self, channel: usize, index: usize, value: f32) {
        self.channels[channel][index] = value;
    }

    /// Change the shape of the buffer, zeroing any newly exposed samples.
    ///
    /// Allocates when growing; keep this off the audio thread.
    pub fn resize(&mut self, num_channels: usize, num_samples: usize) {
        self.channels.resize_with(num_channels, Vec::new);
        for channel in &mut self.channels {
            channel.resize(num_samples, 0.0);
        }
        self.num_samples = num_samples;
    }

    /// Change the logical length without giving capacity back.
    ///
    /// Shrinking and regrowing up to the previously allocated length does not allocate.
    pub fn set_num_samples(&mut self, num_samples: usize) {
        for channel in &mut self.channels {
            channel.resize(num_samples, 0.0);
        }
        self.num_samples = num_samples;
    }

    /// Peak absolute sample value of one channel.
    pub fn magnitude(&self, channel: usize) -> f32 {
        peak(&self.channels[channel])
    }

    /// Copy another buffer's samples into this one.
    ///
    /// Only the overlapping channels and samples are copied.
    pub fn copy_from(&mut self, other: &AudioBuffer) {
        let samples = self.num_samples.min(other.num_samples);
        for (dst, src) in self.channels.iter_mut().zip(other.channels.iter()) {
            dst[..samples].copy_from_slice(&src[..samples]);
        }
    }

    pub fn clear(&mut self) {
        for channel in &mut self.channels {
            channel.fill(0.0);
        }
    }

    /// Interleave into a frame-ordered slice (`out.len()` must be channels × samples).
    pub fn write_interleaved(&self, out: &mut [f32]) {
        let channels = self.num_channels();
        debug_assert_eq!(out.len(), channels * self.num_samples);
        for (frame_index, frame) in out.chunks_mut(channels.max(1)).enumerate() {
            for (ch, slot) in frame.iter_mut().enumerate() {
                *slot = self.channels[ch][frame_index];
            }
        }
    }

    /// Fill from a frame-ordered slice, resizing to fit.
    pub fn read_interleaved(&mut self, data: &[f32], num_channels: usize) {
        let num_channels = num_channels.max(1);
        let frames = data.len() / num_channels;
        if self.num_channels() != num_channels || self.num_samples != frames {
            self.resize(num_channels, frames);
        }
        for (frame_index, frame) in data.chunks_exact(num_channels).enumerate() {
            for (ch, &sample) in frame.iter().enumerate() {
                self.channels[ch][frame_index] = sample;
            }
        }
    }
}

/// Peak absolute value of a slice, 0.0 when empty.
#[inline]
pub fn peak(samples: &[f32]) -> f32 {
    samples.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()))
}
