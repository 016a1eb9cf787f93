//! Vault view: market data, position, yield strategy and the BTC pairs.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
};
use rust_decimal::Decimal;

use crate::api::analytics::{format_percent, format_usd, format_usd_compact};
use crate::state::{ActionKind, Store};

/// Vault overview widget.
pub struct VaultOverview;

impl VaultOverview {
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        if !store.app.wallet.is_connected() {
            let prompt = Paragraph::new(vec![
                Line::from(""),
                Line::from("Connect your wallet to access the vault"),
                Line::from(Span::styled(
                    "press c to connect",
                    Style::default().fg(Color::DarkGray),
                )),
            ])
            .alignment(Alignment::Center)
            .block(Block::default().title(" Vault ").borders(Borders::ALL));
            frame.render_widget(prompt, area);
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(6),
                Constraint::Min(5),
                Constraint::Length(1),
            ])
            .split(area);

        let cards = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 3); 3])
            .split(chunks[0]);

        let vault = &store.vault;
        Self::render_card(
            frame,
            cards[0],
            "Market Data",
            None,
            &[
                ("BTC Price", format_usd(vault.btc_price), Color::Green),
                ("Share Price", vault.share_price.normalize().to_string(), Color::Yellow),
                ("Dynamic CDR", format_percent(store.metrics.cdr), Color::Blue),
            ],
        );
        Self::render_card(
            frame,
            cards[1],
            "Vault Position",
            Some(("Healthy", Color::Green)),
            &[
                ("Total Assets", format!("{} wBTC", vault.total_assets.normalize()), Color::LightRed),
                ("Total Shares", vault.total_shares.normalize().to_string(), Color::Magenta),
                (
                    "Assets (USD)",
                    format_usd_compact(vault.total_assets * vault.btc_price),
                    Color::Green,
                ),
            ],
        );
        Self::render_card(
            frame,
            cards[2],
            "Yield Strategy",
            Some(("Active", Color::Blue)),
            &[
                ("Strategy", "Ekubo LP".to_string(), Color::White),
                ("Current APY", format_percent(vault.apy), Color::Green),
                ("Weighted APY", format_percent(vault.weighted_apy), Color::Green),
            ],
        );

        Self::render_pairs(frame, chunks[1], store);
        Self::render_actions(frame, chunks[2]);
    }

    fn render_card(
        frame: &mut Frame,
        area: Rect,
        title: &str,
        badge: Option<(&str, Color)>,
        rows: &[(&str, String, Color)],
    ) {
        let mut block = Block::default()
            .title(format!(" {title} "))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        if let Some((badge, color)) = badge {
            block = block.title(
                Line::from(Span::styled(format!(" {badge} "), Style::default().fg(color)))
                    .right_aligned(),
            );
        }

        let lines: Vec<Line> = rows
            .iter()
            .map(|(label, value, color)| {
                Line::from(vec![
                    Span::styled(format!("{label:<14}"), Style::default().fg(Color::Gray)),
                    Span::styled(
                        value.clone(),
                        Style::default().fg(*color).add_modifier(Modifier::BOLD),
                    ),
                ])
            })
            .collect();

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_pairs(frame: &mut Frame, area: Rect, store: &Store) {
        let pairs = &store.vault.btc_pairs;
        let title = match &store.vault.error {
            Some(error) => format!(" BTC Pairs · {error} "),
            None => format!(" BTC Pairs ({}) ", pairs.len()),
        };

        let header = Row::new(["Pair", "APR", "TVL", "Allocation"])
            .style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .bottom_margin(1);

        let rows: Vec<Row> = pairs
            .iter()
            .map(|pair| {
                let allocation = &pair.last_allocation;
                Row::new(vec![
                    Cell::from(pair.label()),
                    Cell::from(format!("{:.3}%", pair.apr_percent())).style(apr_style(pair.apr_percent())),
                    Cell::from(format_usd_compact(pair.considered_tvl)),
                    Cell::from(format!(
                        "{} / {}",
                        allocation.token0_amount.normalize(),
                        allocation.token1_amount.normalize()
                    )),
                ])
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Percentage(30),
                Constraint::Percentage(15),
                Constraint::Percentage(20),
                Constraint::Percentage(35),
            ],
        )
        .header(header)
        .block(Block::default().title(title).borders(Borders::ALL))
        .row_highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("▶ ");

        let mut state = TableState::default();
        if !pairs.is_empty() {
            state.select(Some(store.app.selected_pair));
        }
        frame.render_stateful_widget(table, area, &mut state);
    }

    fn render_actions(frame: &mut Frame, area: Rect) {
        let keys = ['d', 'w', 'b', 'p'];
        let mut spans = vec![Span::raw(" ")];
        for (kind, key) in ActionKind::ALL.into_iter().zip(keys) {
            spans.push(Span::styled(format!("[{key}] "), Style::default().fg(Color::Cyan)));
            spans.push(Span::raw(kind.label()));
            spans.push(Span::styled(
                format!(" ({})   ", kind.hint()),
                Style::default().fg(Color::DarkGray),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

fn apr_style(apr: Decimal) -> Style {
    if apr >= Decimal::TEN {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::White)
    }
}
