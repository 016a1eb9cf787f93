use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

const PILLARS: [(&str, &str); 3] = [
    (
        "Dynamic Risk Protection",
        "Smart contracts adjust collateral ratios to market volatility, protecting you from unexpected liquidations.",
    ),
    (
        "Automated Yield",
        "Deposited BTC earns yield through selected DeFi strategies while you keep the option to borrow against it.",
    ),
    (
        "Starknet Powered",
        "Fast, low-fee transactions with price feeds from Pragma and lending markets from Vesu.",
    ),
];

pub struct AboutPanel;

impl AboutPanel {
    pub fn render(frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(6)])
            .split(area);

        let intro = Paragraph::new(vec![
            Line::from(Span::styled(
                "The Future of DeFi Vaults",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "A vault manager combining dynamic risk protection with automated yield strategies.",
                Style::default().fg(Color::Gray),
            )),
        ])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
        frame.render_widget(intro, chunks[0]);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 3); 3])
            .split(chunks[1]);

        for ((title, body), column) in PILLARS.iter().zip(columns.iter()) {
            let card = Paragraph::new(*body)
                .style(Style::default().fg(Color::Gray))
                .wrap(Wrap { trim: true })
                .block(
                    Block::default()
                        .title(format!(" {title} "))
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::DarkGray)),
                );
            frame.render_widget(card, *column);
        }
    }
}
