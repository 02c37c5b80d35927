//! Output oscilloscope

use ratatui::{layout::Rect, style::Color, Frame};
use tapeworks::buffer::peak;

use super::chart::{fit_symmetric, trace, Scale};

/// Render the last block of output; the y range grows when the effect pushes past ±1.
pub fn render_waveform(frame: &mut Frame, area: Rect, audio_buffer: &[f32]) {
    let range = fit_symmetric(peak(audio_buffer));
    let len = audio_buffer.len().max(1) as f64;
    let data: Vec<(f64, f64)> = audio_buffer
        .iter()
        .enumerate()
        .map(|(i, &sample)| (i as f64 / len, sample as f64))
        .collect();

    let color = if range > 1.0 { Color::LightRed } else { Color::Cyan };
    let chart = trace(
        format!(" Output (±{:.1}) ", range),
        &data,
        color,
        Scale::unlabelled(0.0, 1.0),
        Scale::unlabelled(-range, range),
    );
    frame.render_widget(chart, area);
}
