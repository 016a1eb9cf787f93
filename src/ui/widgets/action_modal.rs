//! Deposit / withdraw / borrow / repay popup, in transaction or guide mode.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use super::super::layout::centered_rect;
use crate::api::analytics::format_percent;
use crate::state::{ActionKind, ActionModal, BORROW_APR, ModalMode, REQUIRED_CDR, Store};

pub struct ActionModalView;

impl ActionModalView {
    pub fn render(frame: &mut Frame, area: Rect, modal: &ActionModal, store: &Store) {
        let popup = match modal.mode {
            ModalMode::Transaction => centered_rect(50, 55, area),
            ModalMode::Guide => centered_rect(70, 80, area),
        };
        frame.render_widget(Clear, popup);

        let accent = accent(modal.kind);
        let mut lines = vec![
            Line::from(Span::styled(
                modal.subheading(),
                Style::default().fg(Color::Gray),
            )),
            Line::from(""),
        ];

        match modal.mode {
            ModalMode::Transaction => transaction_lines(&mut lines, modal, store),
            ModalMode::Guide => guide_lines(&mut lines, modal.kind),
        }

        let footer = match modal.mode {
            ModalMode::Transaction => format!(" Enter {} · Esc close ", modal.kind.label()),
            ModalMode::Guide => " Enter/Esc: Got it! Close Guide ".to_string(),
        };

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
            Block::default()
                .title(Span::styled(
                    format!(" {} ", modal.heading()),
                    Style::default().fg(accent).add_modifier(Modifier::BOLD),
                ))
                .title_bottom(Line::from(footer).right_aligned())
                .borders(Borders::ALL)
                .border_style(Style::default().fg(accent)),
        );
        frame.render_widget(paragraph, popup);
    }
}

fn accent(kind: ActionKind) -> Color {
    match kind {
        ActionKind::Deposit => Color::Blue,
        ActionKind::Withdraw => Color::Green,
        ActionKind::Borrow => Color::Magenta,
        ActionKind::Repay => Color::Red,
    }
}

fn detail(label: &str, value: String, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:<16}"), Style::default().fg(Color::Gray)),
        Span::styled(value, Style::default().fg(color)),
    ])
}

fn transaction_lines(lines: &mut Vec<Line<'static>>, modal: &ActionModal, store: &Store) {
    let amount = if modal.amount.is_empty() {
        Span::styled("0.00", Style::default().fg(Color::DarkGray))
    } else {
        Span::styled(modal.amount.clone(), Style::default().fg(Color::White))
    };
    lines.push(Line::from(format!("Amount ({})", modal.kind.unit())));
    lines.push(Line::from(vec![
        Span::styled("> ", Style::default().fg(Color::Cyan)),
        amount,
        Span::styled("█", Style::default().fg(Color::Cyan)),
    ]));
    lines.push(Line::from(""));

    lines.push(detail("Network Fee:", "~$2.50".to_string(), Color::White));
    match modal.kind {
        ActionKind::Deposit => lines.push(detail(
            "Expected APY:",
            format_percent(store.vault.apy),
            Color::Green,
        )),
        ActionKind::Borrow => {
            lines.push(detail(
                "Interest Rate:",
                format!("{} APR", format_percent(BORROW_APR)),
                Color::White,
            ));
            lines.push(detail(
                "Required CDR:",
                format_percent(REQUIRED_CDR),
                Color::Magenta,
            ));
        }
        ActionKind::Withdraw | ActionKind::Repay => {}
    }

    if !store.app.wallet.is_connected() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Wallet not connected: press Esc then c to connect",
            Style::default().fg(Color::Yellow),
        )));
    }
}

fn guide_lines(lines: &mut Vec<Line<'static>>, kind: ActionKind) {
    let heading = |text: String, color: Color| {
        Line::from(Span::styled(
            text,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
    };

    lines.push(heading(format!("How to {}", kind.title()), Color::Blue));
    for (i, step) in kind.steps().iter().enumerate() {
        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", i + 1), Style::default().fg(Color::Black).bg(Color::Blue)),
            Span::raw(format!(" {step}")),
        ]));
    }
    lines.push(Line::from(""));

    lines.push(heading("Benefits".to_string(), Color::Green));
    for benefit in kind.benefits() {
        lines.push(Line::from(format!(" ✓ {benefit}")));
    }
    lines.push(Line::from(""));

    lines.push(heading("Important Notes".to_string(), Color::Yellow));
    for note in kind.notes() {
        lines.push(Line::from(format!(" • {note}")));
    }
}
