//! Single-trace braille line chart shared by the scope and the spectrum

use ratatui::{
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
};

/// One axis: its bounds and the tick labels spread evenly across them.
pub struct Scale {
    pub bounds: [f64; 2],
    pub labels: &'static [&'static str],
}

impl Scale {
    pub const fn unlabelled(min: f64, max: f64) -> Self {
        Self {
            bounds: [min, max],
            labels: &[],
        }
    }

    fn axis(&self) -> Axis<'static> {
        Axis::default()
            .bounds(self.bounds)
            .labels(self.labels.iter().copied())
            .style(Style::default().fg(Color::DarkGray))
    }
}

pub fn trace<'a>(title: String, data: &'a [(f64, f64)], color: Color, x: Scale, y: Scale) -> Chart<'a> {
    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(color))
        .data(data);

    Chart::new(vec![dataset])
        .block(Block::default().title(title).borders(Borders::ALL))
        .x_axis(x.axis())
        .y_axis(y.axis())
}

/// Symmetric y range that fits `peak`, never narrower than ±1.
pub fn fit_symmetric(peak: f32) -> f64 {
    if peak.is_finite() {
        peak.max(1.0) as f64
    } else {
        1.0
    }
}
