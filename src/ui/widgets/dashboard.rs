//! Landing view: hero banner and the "How It Works" tour.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use crate::state::{GUIDE_STEPS, Store};

pub struct Dashboard;

impl Dashboard {
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(9), Constraint::Min(8)])
            .split(area);

        Self::render_hero(frame, chunks[0], store);
        Self::render_tour(frame, chunks[1], store);
    }

    fn render_hero(frame: &mut Frame, area: Rect, store: &Store) {
        let mut lines = vec![
            Line::from(Span::styled(
                "Built on Starknet • Powered by Pragma + Vesu",
                Style::default().fg(Color::Blue),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Stack Sats Smarter",
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(vec![
                Span::raw("Earn yield on your Bitcoin and borrow USDC with "),
                Span::styled(
                    "dynamic risk protection",
                    Style::default()
                        .fg(Color::Blue)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
        ];

        lines.push(if store.app.wallet.is_connected() {
            Line::from(Span::styled(
                "● Wallet Connected - Access Your Vault in tab [2]",
                Style::default().fg(Color::Green),
            ))
        } else {
            Line::from(Span::styled(
                "Connect your wallet to access the vault  [c]",
                Style::default().fg(Color::Gray),
            ))
        });

        let hero = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::NONE));
        frame.render_widget(hero, area);
    }

    fn render_tour(frame: &mut Frame, area: Rect, store: &Store) {
        let block = Block::default()
            .title(" How It Works ")
            .title_bottom(Line::from(" g opens the highlighted guide ").right_aligned())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Ratio(1, 2); 2])
            .split(inner);

        for (row_index, row) in rows.iter().enumerate() {
            let cells = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Ratio(1, 2); 2])
                .split(*row);

            for (col_index, cell) in cells.iter().enumerate() {
                let index = row_index * 2 + col_index;
                let step = &GUIDE_STEPS[index];
                let active = index == store.app.guide_step % GUIDE_STEPS.len();

                let border = if active {
                    Style::default().fg(Color::Cyan)
                } else {
                    Style::default().fg(Color::DarkGray)
                };

                let mut lines = vec![Line::from(Span::styled(
                    step.description,
                    Style::default().fg(Color::Gray),
                ))];
                if let Some(kind) = step.action {
                    lines.push(Line::from(Span::styled(
                        format!("→ {}", kind.hint()),
                        Style::default().fg(Color::DarkGray),
                    )));
                }

                let card = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
                    Block::default()
                        .title(format!(" {}. {} ", index + 1, step.title))
                        .borders(Borders::ALL)
                        .border_type(if active {
                            BorderType::Thick
                        } else {
                            BorderType::Rounded
                        })
                        .border_style(border),
                );
                frame.render_widget(card, *cell);
            }
        }
    }
}
