//! Parameter list with a bar per value

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};
use tapeworks::AtomicParams;

const BAR_WIDTH: usize = 12;

fn bar(normalized: f32) -> String {
    let filled = (normalized.clamp(0.0, 1.0) * BAR_WIDTH as f32).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

pub fn render_params(frame: &mut Frame, area: Rect, params: &AtomicParams, selected: usize) {
    let items: Vec<ListItem> = params
        .specs()
        .iter()
        .enumerate()
        .map(|(i, spec)| {
            let value = params.get_index(i);
            let style = if i == selected {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<20}", spec.name), style),
                Span::styled(bar(spec.normalize(value)), Style::default().fg(Color::Blue)),
                Span::styled(format!(" {:>9.3}", value), style),
            ]))
        })
        .collect();

    let list = List::new(items).block(Block::default().title(" Parameters ").borders(Borders::ALL));
    frame.render_widget(list, area);
}
