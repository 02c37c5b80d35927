/// Circular delay line with fractional (linear-interpolated) reads.
///
/// Storage is allocated once by [`DelayLine::new`]; reads and writes never
/// allocate.
#[derive(Debug, Clone)]
pub struct DelayLine {
    buffer: Vec<f32>,
    write_pos: usize,
}

impl DelayLine {
    /// Create a delay line able to delay by up to `max_delay_samples`.
    pub fn new(max_delay_samples: usize) -> Self {
        Self {
            buffer: vec![0.0; max_delay_samples.max(1) + 2],
            write_pos: 0,
        }
    }

    /// Longest delay a read can reach.
    pub fn max_delay(&self) -> usize {
        self.buffer.len() - 2
    }

    /// Push one sample.
    #[inline]
    pub fn write(&mut self, sample: f32) {
        self.buffer[self.write_pos] = sample;
        self.write_pos = (self.write_pos + 1) % self.buffer.len();
    }

    /// Read the sample written `delay_samples` writes ago (1.0 = last written).
    ///
    /// The delay is clamped to `1.0..=max_delay()`.
    #[inline]
    pub fn read_interpolated(&self, delay_samples: f32) -> f32 {
        let len = self.buffer.len();
        let delay = delay_samples.clamp(1.0, self.max_delay() as f32);
        let whole = delay.floor();
        let frac = delay - whole;
        let whole = whole as usize;

        let newer = (self.write_pos + len - whole) % len;
        let older = (self.write_pos + len - whole - 1) % len;
        let a = self.buffer[newer];
        let b = self.buffer[older];
        a + (b - a) * frac
    }

    pub fn reset(&mut self) {
        self.buffer.fill(0.0);
        self.write_pos = 0;
    }
}
