//! Help panel widget.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::super::layout::centered_rect;
use crate::config::KeyBindings;

/// Help panel listing the configured keys.
pub struct HelpPanel;

impl HelpPanel {
    pub fn render(frame: &mut Frame, area: Rect, keys: &KeyBindings) {
        let popup_area = centered_rect(60, 80, area);
        frame.render_widget(Clear, popup_area);

        let views = format!("{}-{}", keys.dashboard, keys.about);
        let sections: [(&str, Vec<(&str, &str)>); 4] = [
            (
                "Navigation",
                vec![
                    (views.as_str(), "Dashboard / Vault / Charts / About"),
                    ("Tab", "Next view (Shift+Tab previous)"),
                    ("↑/↓", "Select BTC pair"),
                    (keys.toggle_chart.as_str(), "Switch price / CDR chart"),
                    (keys.back.as_str(), "Close popup"),
                ],
            ),
            (
                "Wallet",
                vec![
                    (keys.connect.as_str(), "Connect wallet"),
                    (keys.disconnect.as_str(), "Disconnect wallet"),
                ],
            ),
            (
                "Vault",
                vec![
                    (keys.deposit.as_str(), "Deposit BTC"),
                    (keys.withdraw.as_str(), "Withdraw BTC"),
                    (keys.borrow.as_str(), "Borrow USDC"),
                    (keys.repay.as_str(), "Repay USDC"),
                    (keys.guide.as_str(), "Guide for the highlighted step"),
                ],
            ),
            (
                "General",
                vec![
                    (keys.refresh.as_str(), "Refresh live data"),
                    (keys.help.as_str(), "Toggle help"),
                    (keys.quit.as_str(), "Quit"),
                ],
            ),
        ];

        let mut lines = Vec::new();
        for (title, entries) in sections {
            if !lines.is_empty() {
                lines.push(Line::from(""));
            }
            lines.push(Line::from(Span::styled(
                title,
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )));
            for (key, description) in entries {
                lines.push(Line::from(vec![
                    Span::styled(format!("  {key:<6}"), Style::default().fg(Color::Cyan)),
                    Span::raw(description.to_string()),
                ]));
            }
        }

        let help = Paragraph::new(lines)
            .block(
                Block::default()
                    .title(" Help ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            )
            .style(Style::default().fg(Color::White));

        frame.render_widget(help, popup_area);
    }
}
