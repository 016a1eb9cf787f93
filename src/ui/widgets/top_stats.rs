//! APY / CDR / TVL strip.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::api::analytics::{format_percent, format_usd_compact};
use crate::state::Store;

pub struct TopStats;

impl TopStats {
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let metrics = &store.metrics;
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 3); 3])
            .split(inner);

        let stats = [
            (format_percent(metrics.apy), "APY", Color::Blue),
            (format_percent(metrics.cdr), "CDR", Color::Green),
            (format_usd_compact(metrics.tvl), "TVL", Color::Magenta),
        ];

        for ((value, label, color), cell) in stats.into_iter().zip(cells.iter()) {
            let line = Line::from(vec![
                Span::styled(
                    value,
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!(" {label}"), Style::default().fg(Color::Gray)),
            ]);
            frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), *cell);
        }
    }
}
