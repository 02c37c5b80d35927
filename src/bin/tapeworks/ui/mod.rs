//! TUI for live playback
//!
//! Shows the processed output and lets the parameters be nudged while the
//! audio thread keeps polling them.

mod chart;
mod params;
mod spectrum;
mod transport;
mod waveform;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use rtrb::Consumer;
use std::sync::Arc;
use std::time::Duration;
use tapeworks::AtomicParams;

use params::render_params;
use spectrum::{render_spectrum, SpectrumAnalyzer};
use transport::{render_transport, AudioStats};
use waveform::render_waveform;

/// Audio visualization buffer size
pub const VIS_BUFFER_SIZE: usize = 1024;

/// Fraction of a parameter's range moved per arrow key press
const NUDGE_STEP: f32 = 0.01;
/// With shift held
const NUDGE_STEP_COARSE: f32 = 0.1;

/// Facts about the session that never change while it runs
pub struct UiInit {
    pub effect_name: &'static str,
    pub sample_rate: f32,
    pub channels: usize,
    pub source: String,
}

pub struct UiApp {
    /// Ring buffer receiver for audio samples
    audio_rx: Consumer<f32>,
    params: Arc<AtomicParams>,
    init: UiInit,
    /// Audio sample buffer for visualization
    audio_buffer: Vec<f32>,
    spectrum: SpectrumAnalyzer,
    selected: usize,
    should_quit: bool,
}

impl UiApp {
    pub fn new(audio_rx: Consumer<f32>, params: Arc<AtomicParams>, init: UiInit) -> Self {
        let spectrum = SpectrumAnalyzer::new(VIS_BUFFER_SIZE, init.sample_rate);
        Self {
            audio_rx,
            params,
            init,
            audio_buffer: vec![0.0; VIS_BUFFER_SIZE],
            spectrum,
            selected: 0,
            should_quit: false,
        }
    }

    /// Run the UI event loop
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.poll_audio();
            self.spectrum.update(&self.audio_buffer);

            terminal.draw(|frame| self.render(frame))?;

            // Handle keyboard input (non-blocking, ~60fps)
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code, key.modifiers);
                    }
                }
            }
        }

        Ok(())
    }

    /// Read everything available, keeping the last VIS_BUFFER_SIZE samples
    fn poll_audio(&mut self) {
        let mut received = false;
        while let Ok(sample) = self.audio_rx.pop() {
            self.audio_buffer.push(sample);
            received = true;
        }
        if received && self.audio_buffer.len() > VIS_BUFFER_SIZE {
            let excess = self.audio_buffer.len() - VIS_BUFFER_SIZE;
            self.audio_buffer.drain(0..excess);
        }
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        let count = self.params.specs().len();
        let step = if modifiers.contains(KeyModifiers::SHIFT) {
            NUDGE_STEP_COARSE
        } else {
            NUDGE_STEP
        };
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Up if count > 0 => {
                self.selected = (self.selected + count - 1) % count;
            }
            KeyCode::Down if count > 0 => {
                self.selected = (self.selected + 1) % count;
            }
            KeyCode::Right => {
                self.params.nudge(self.selected, step);
            }
            KeyCode::Left => {
                self.params.nudge(self.selected, -step);
            }
            KeyCode::Char('d') => {
                self.params.reset_to_defaults();
            }
            _ => {}
        }
    }

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Transport bar
                Constraint::Min(8),    // Scope + params
                Constraint::Length(10), // Spectrum
                Constraint::Length(1), // Help bar
            ])
            .split(area);

        let middle = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(rows[1]);

        let stats = AudioStats::from_buffer(&self.audio_buffer);
        render_transport(frame, rows[0], &self.init, &stats);
        render_waveform(frame, middle[0], &self.audio_buffer);
        render_params(frame, middle[1], &self.params, self.selected);
        render_spectrum(frame, rows[2], self.spectrum.data());

        let help = Paragraph::new(" [↑↓] Select  [←→] Adjust (Shift: coarse)  [D] Defaults  [Q] Quit")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, rows[3]);
    }
}
