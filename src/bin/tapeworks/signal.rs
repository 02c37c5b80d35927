//! Input sources for live playback.

use tapeworks::AudioBuffer;

/// Seconds between plucks.
const PLUCK_INTERVAL: f32 = 0.75;
/// Pitches cycled by the plucks (A minor pentatonic).
const PLUCK_NOTES: [f32; 5] = [220.0, 261.63, 293.66, 329.63, 392.0];

/// What feeds the effect in `play`.
pub enum Source {
    /// Interleaved WAV frames played in a loop.
    Looped {
        samples: Vec<f32>,
        channels: usize,
        position: usize,
    },
    /// Decaying plucked tones with a short noise burst on each attack.
    Pluck(Pluck),
}

impl Source {
    pub fn looped(samples: Vec<f32>, channels: usize) -> Self {
        Source::Looped {
            samples,
            channels: channels.max(1),
            position: 0,
        }
    }

    pub fn pluck(sample_rate: f32) -> Self {
        Source::Pluck(Pluck::new(sample_rate))
    }

    /// Overwrite every channel of `buffer` with the next block of input.
    pub fn fill(&mut self, buffer: &mut AudioBuffer) {
        match self {
            Source::Looped {
                samples,
                channels,
                position,
            } => {
                let frames = samples.len() / *channels;
                if frames == 0 {
                    buffer.clear();
                    return;
                }
                for i in 0..buffer.num_samples() {
                    let frame = &samples[*position * *channels..(*position + 1) * *channels];
                    for ch in 0..buffer.num_channels() {
                        // mono files feed every output channel
                        buffer.set_sample(ch, i, frame[ch.min(*channels - 1)]);
                    }
                    *position = (*position + 1) % frames;
                }
            }
            Source::Pluck(pluck) => {
                for i in 0..buffer.num_samples() {
                    let s = pluck.next_sample();
                    for ch in 0..buffer.num_channels() {
                        buffer.set_sample(ch, i, s);
                    }
                }
            }
        }
    }
}

pub struct Pluck {
    sample_rate: f32,
    phase: f32,
    frequency: f32,
    envelope: f32,
    decay: f32,
    countdown: usize,
    note: usize,
    noise_state: u32,
}

impl Pluck {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            sample_rate,
            phase: 0.0,
            frequency: PLUCK_NOTES[0],
            envelope: 0.0,
            // -60 dB in about half a second
            decay: (-6.9 / (0.5 * sample_rate)).exp(),
            countdown: 0,
            note: 0,
            noise_state: 0x1234_5678,
        }
    }

    fn noise(&mut self) -> f32 {
        // xorshift32
        let mut x = self.noise_state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.noise_state = x;
        (x as f32 / u32::MAX as f32) * 2.0 - 1.0
    }

    pub fn next_sample(&mut self) -> f32 {
        if self.countdown == 0 {
            self.countdown = (PLUCK_INTERVAL * self.sample_rate) as usize;
            self.frequency = PLUCK_NOTES[self.note % PLUCK_NOTES.len()];
            self.note += 1;
            self.envelope = 0.8;
            self.phase = 0.0;
        }
        self.countdown -= 1;

        let tone = (self.phase * std::f32::consts::TAU).sin();
        self.phase = (self.phase + self.frequency / self.sample_rate).fract();
        let attack_noise = self.noise() * (self.envelope - 0.6).max(0.0);

        let out = tone * self.envelope + attack_noise;
        self.envelope *= self.decay;
        out
    }
}
