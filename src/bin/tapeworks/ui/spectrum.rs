//! Spectrum analyzer
//!
//! Hann-windowed FFT of the visualisation buffer, sampled at log-spaced
//! frequencies and drawn on a log-frequency axis.

use ratatui::{layout::Rect, style::Color, Frame};
use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::sync::Arc;

use super::chart::{trace, Scale};

/// Number of frequency points to display
const SPECTRUM_BINS: usize = 48;
const MIN_FREQ: f32 = 20.0;
const FLOOR_DB: f64 = -100.0;
/// Per-frame falloff of the displayed level, dB
const DECAY_DB: f64 = 3.0;

pub struct SpectrumAnalyzer {
    window: Vec<f32>,
    /// FFT bin for each display point
    bin_indices: Vec<usize>,
    fft: Arc<dyn Fft<f32>>,
    scratch: Vec<Complex<f32>>,
    /// (log10 frequency, magnitude dB)
    spectrum: Vec<(f64, f64)>,
}

impl SpectrumAnalyzer {
    pub fn new(buffer_len: usize, sample_rate: f32) -> Self {
        let buffer_len = buffer_len.max(2);
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(buffer_len);

        let denom = (buffer_len - 1) as f32;
        let window = (0..buffer_len)
            .map(|i| 0.5 * (1.0 - (std::f32::consts::TAU * i as f32 / denom).cos()))
            .collect();

        let max_freq = (sample_rate / 2.0).min(20_000.0).max(MIN_FREQ * 2.0);
        let ratio = (max_freq / MIN_FREQ) as f64;
        let last_bin = buffer_len / 2 - 1;

        let mut bin_indices = Vec::with_capacity(SPECTRUM_BINS);
        let mut spectrum = Vec::with_capacity(SPECTRUM_BINS);
        for i in 0..SPECTRUM_BINS {
            let t = i as f64 / (SPECTRUM_BINS - 1) as f64;
            let freq = MIN_FREQ as f64 * ratio.powf(t);
            let index = (freq * buffer_len as f64 / sample_rate as f64).round() as usize;
            bin_indices.push(index.min(last_bin));
            spectrum.push((freq.log10(), FLOOR_DB));
        }

        Self {
            window,
            bin_indices,
            fft,
            scratch: vec![Complex::new(0.0, 0.0); buffer_len],
            spectrum,
        }
    }

    /// Recompute from `buffer`; ignored unless it matches the FFT size.
    pub fn update(&mut self, buffer: &[f32]) {
        if buffer.len() != self.window.len() {
            return;
        }

        for ((slot, &sample), &w) in self.scratch.iter_mut().zip(buffer).zip(&self.window) {
            *slot = Complex::new(sample * w, 0.0);
        }
        self.fft.process(&mut self.scratch);

        for ((_, level), &index) in self.spectrum.iter_mut().zip(&self.bin_indices) {
            let bin = self.scratch[index];
            let power = (bin.re * bin.re + bin.im * bin.im).max(1e-12) as f64;
            let db = (10.0 * power.log10()).max(FLOOR_DB);
            // rise instantly, fall slowly
            *level = db.max(*level - DECAY_DB);
        }
    }

    pub fn data(&self) -> &[(f64, f64)] {
        &self.spectrum
    }
}

pub fn render_spectrum(frame: &mut Frame, area: Rect, spectrum: &[(f64, f64)]) {
    let (min_x, max_x) = match (spectrum.first(), spectrum.last()) {
        (Some(first), Some(last)) => (first.0, last.0),
        _ => (1.0, 4.0),
    };
    let max_db = spectrum.iter().map(|(_, db)| *db).fold(FLOOR_DB, f64::max);

    let chart = trace(
        " Spectrum ".to_string(),
        spectrum,
        Color::Green,
        Scale {
            bounds: [min_x, max_x],
            labels: &["20", "200", "2k", "20k"],
        },
        Scale {
            bounds: [FLOOR_DB, max_db.max(0.0) + 10.0],
            labels: &["-100", "-60", "-20", "0"],
        },
    );
    frame.render_widget(chart, area);
}
