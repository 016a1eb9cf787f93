//! Navbar: brand, feed activity and wallet state.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::state::{Store, WalletStatus};

/// Status bar widget.
pub struct StatusBar;

impl StatusBar {
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let wallet = match &store.app.wallet {
            WalletStatus::Connected(account) => Span::styled(
                format!("● {} · {}", account.short_address(), account.network()),
                Style::default().fg(Color::Green),
            ),
            WalletStatus::Connecting => Span::styled(
                format!("{} Connecting...", store.app.spinner()),
                Style::default().fg(Color::Gray),
            ),
            WalletStatus::Disconnected => Span::styled(
                "○ Connect Wallet [c]",
                Style::default().fg(Color::Magenta),
            ),
        };

        let activity = if store.is_loading() {
            Span::styled(
                format!(" {} syncing ", store.app.spinner()),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            )
        } else if store.feed_error().is_some() {
            Span::styled(" ⚠ live data unavailable ", Style::default().fg(Color::Red))
        } else {
            Span::styled(" live ", Style::default().fg(Color::Green))
        };

        let left = vec![
            Span::styled(
                " ₿ Stack Sats ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("|"),
            activity,
        ];
        let right = vec![
            wallet,
            Span::styled("  ? help ", Style::default().fg(Color::DarkGray)),
        ];

        let width = |spans: &[Span]| -> u16 {
            spans.iter().map(|s| s.width() as u16).sum()
        };
        let padding = area.width.saturating_sub(width(&left) + width(&right));

        let mut spans = left;
        spans.push(Span::raw(" ".repeat(padding as usize)));
        spans.extend(right);

        let paragraph =
            Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
        frame.render_widget(paragraph, area);
    }
}
