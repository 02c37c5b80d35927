//! Transport bar widget - effect, source, device format and output level

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tapeworks::buffer::peak;

use super::UiInit;

/// Audio statistics for display
pub struct AudioStats {
    pub peak: f32,
    pub rms: f32,
}

impl AudioStats {
    pub fn from_buffer(buffer: &[f32]) -> Self {
        if buffer.is_empty() {
            return Self { peak: 0.0, rms: 0.0 };
        }
        let rms = (buffer.iter().map(|&x| x * x).sum::<f32>() / buffer.len() as f32).sqrt();
        Self {
            peak: peak(buffer),
            rms,
        }
    }
}

pub fn render_transport(frame: &mut Frame, area: Rect, init: &UiInit, stats: &AudioStats) {
    let block = Block::default().title(" tapeworks ").borders(Borders::ALL);

    let line = Line::from(vec![
        Span::styled(
            format!(" {}  ", init.effect_name),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("▶ {}  ", init.source),
            Style::default().fg(Color::Green),
        ),
        Span::styled(
            format!(
                "{:.1}kHz {}  ",
                init.sample_rate / 1000.0,
                if init.channels == 1 { "mono" } else { "stereo" }
            ),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("Peak: {:.2}  RMS: {:.2}", stats.peak, stats.rms),
            Style::default().fg(if stats.peak > 1.0 {
                Color::LightRed
            } else {
                Color::Magenta
            }),
        ),
    ]);

    frame.render_widget(Paragraph::new(line).block(block), area);
}
