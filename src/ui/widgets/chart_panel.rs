//! BTC price and CDR history.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Sparkline, Table},
};

use crate::api::analytics::{format_percent, format_usd};
use crate::state::{CDR_SERIES, ChartKind, PRICE_SERIES, Store};

pub struct ChartPanel;

impl ChartPanel {
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let charts = &store.charts;
        let block = Block::default()
            .title(format!(" {} ", charts.active.title()))
            .title_bottom(Line::from(" t switches chart ").right_aligned())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Min(4),
                Constraint::Length(4),
            ])
            .split(inner);

        match charts.active {
            ChartKind::Price => {
                let change = charts.price_change_percent();
                let headline = Line::from(vec![
                    Span::styled(
                        format_usd(charts.latest_price()),
                        Style::default()
                            .fg(Color::Green)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!("  {}{}", if change.is_sign_positive() { "+" } else { "" }, format_percent(change)),
                        Style::default().fg(Color::Gray),
                    ),
                ]);
                frame.render_widget(Paragraph::new(headline), chunks[0]);

                let data = charts.price_sparkline();
                let sparkline = Sparkline::default()
                    .data(&data)
                    .style(Style::default().fg(Color::Green));
                frame.render_widget(sparkline, chunks[1]);

                let recent = &PRICE_SERIES[PRICE_SERIES.len() - 4..];
                let table = Table::new(
                    [
                        Row::new(recent.iter().map(|p| Cell::from(p.label)))
                            .style(Style::default().fg(Color::DarkGray)),
                        Row::new(recent.iter().map(|p| Cell::from(format_usd(p.price)))),
                        Row::new(recent.iter().map(|p| {
                            Cell::from(format!("Vol: {}B", p.volume.normalize()))
                        }))
                        .style(Style::default().fg(Color::DarkGray)),
                    ],
                    [Constraint::Ratio(1, 4); 4],
                );
                frame.render_widget(table, chunks[2]);
            }
            ChartKind::Cdr => {
                let latest = &CDR_SERIES[CDR_SERIES.len() - 1];
                let headline = Line::from(vec![
                    Span::styled(
                        format!("Dynamic {}", format_percent(latest.dynamic)),
                        Style::default()
                            .fg(Color::Blue)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!("  vs fixed {}", format_percent(latest.fixed)),
                        Style::default().fg(Color::Red),
                    ),
                    Span::styled(
                        format!("  · 7d avg {}", format_percent(charts.cdr_average())),
                        Style::default().fg(Color::Gray),
                    ),
                ]);
                frame.render_widget(Paragraph::new(headline), chunks[0]);

                let data = charts.cdr_sparkline();
                let sparkline = Sparkline::default()
                    .block(Block::default().title(Span::styled(
                        "headroom over the fixed floor",
                        Style::default().fg(Color::DarkGray),
                    )))
                    .data(&data)
                    .style(Style::default().fg(Color::Blue));
                frame.render_widget(sparkline, chunks[1]);

                let notes = Paragraph::new(vec![
                    Line::from("Dynamic CDR tracks volatility instead of a fixed 150% floor,"),
                    Line::from("lowering the ratio in calm markets and raising it ahead of swings."),
                ])
                .style(Style::default().fg(Color::Gray));
                frame.render_widget(notes, chunks[2]);
            }
        }
    }
}
