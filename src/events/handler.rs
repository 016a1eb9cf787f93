//! Maps terminal events to store actions.

use super::input::{InputEvent, Key, KeyBinding};
use super::Event;
use crate::config::KeyBindings;
use crate::error::Result;
use crate::state::{Action, ActionKind, InputMode, Store, View};
use crossterm::event::{KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};

/// Parsed form of [`KeyBindings`].
#[derive(Debug, Clone)]
struct Keymap {
    quit: KeyBinding,
    help: KeyBinding,
    refresh: KeyBinding,
    connect: KeyBinding,
    disconnect: KeyBinding,
    guide: KeyBinding,
    toggle_chart: KeyBinding,
    select: KeyBinding,
    back: KeyBinding,
    actions: [(KeyBinding, ActionKind); 4],
    views: [(KeyBinding, View); 4],
}

impl Keymap {
    fn parse(bindings: &KeyBindings) -> Result<Self> {
        Ok(Self {
            quit: bindings.quit.parse()?,
            help: bindings.help.parse()?,
            refresh: bindings.refresh.parse()?,
            connect: bindings.connect.parse()?,
            disconnect: bindings.disconnect.parse()?,
            guide: bindings.guide.parse()?,
            toggle_chart: bindings.toggle_chart.parse()?,
            select: bindings.select.parse()?,
            back: bindings.back.parse()?,
            actions: [
                (bindings.deposit.parse()?, ActionKind::Deposit),
                (bindings.withdraw.parse()?, ActionKind::Withdraw),
                (bindings.borrow.parse()?, ActionKind::Borrow),
                (bindings.repay.parse()?, ActionKind::Repay),
            ],
            views: [
                (bindings.dashboard.parse()?, View::Dashboard),
                (bindings.vault.parse()?, View::Vault),
                (bindings.charts.parse()?, View::Charts),
                (bindings.about.parse()?, View::About),
            ],
        })
    }
}

/// Handles input events and produces actions.
pub struct EventHandler {
    keymap: Keymap,
    input_mode: InputMode,
}

impl EventHandler {
    /// Fails when a configured binding cannot be parsed.
    pub fn new(bindings: &KeyBindings) -> Result<Self> {
        Ok(Self {
            keymap: Keymap::parse(bindings)?,
            input_mode: InputMode::Normal,
        })
    }

    /// Track the store's input mode so keys are routed to the right handler.
    pub fn update_store_snapshot(&mut self, store: &Store) {
        self.input_mode = store.app.input_mode;
    }

    pub fn handle_event(&self, event: &Event) -> Option<Action> {
        match event {
            Event::Tick => Some(Action::Tick),
            Event::Key(key) => self.handle_key(*key),
            Event::Mouse(mouse) => self.handle_mouse(*mouse),
            Event::Resize(_, _) => None,
        }
    }

    fn handle_key(&self, key: KeyEvent) -> Option<Action> {
        if key.kind != KeyEventKind::Press {
            return None;
        }

        let input = InputEvent::from(key);
        if input.ctrl() && input.key == Key::Char('c') {
            return Some(Action::Quit);
        }

        match self.input_mode {
            InputMode::Normal => self.handle_normal_mode(input),
            InputMode::Amount => self.handle_amount_mode(input),
            InputMode::Guide => self.handle_guide_mode(input),
        }
    }

    fn handle_mouse(&self, mouse: MouseEvent) -> Option<Action> {
        if self.input_mode != InputMode::Normal {
            return None;
        }
        match mouse.kind {
            MouseEventKind::ScrollUp => Some(Action::ScrollUp),
            MouseEventKind::ScrollDown => Some(Action::ScrollDown),
            _ => None,
        }
    }

    fn handle_normal_mode(&self, input: InputEvent) -> Option<Action> {
        let keys = &self.keymap;

        if input.matches(&keys.quit) {
            return Some(Action::Quit);
        }
        if input.matches(&keys.help) {
            return Some(Action::ToggleHelp);
        }
        if input.matches(&keys.back) {
            return Some(Action::Back);
        }
        if input.matches(&keys.refresh) {
            return Some(Action::Refresh);
        }
        if input.matches(&keys.connect) {
            return Some(Action::ConnectWallet);
        }
        if input.matches(&keys.disconnect) {
            return Some(Action::DisconnectWallet);
        }
        if input.matches(&keys.guide) {
            return Some(Action::OpenTourGuide);
        }
        if input.matches(&keys.toggle_chart) {
            return Some(Action::ToggleChart);
        }

        if let Some((_, kind)) = keys.actions.iter().find(|(b, _)| input.matches(b)) {
            return Some(Action::OpenModal(*kind));
        }
        if let Some((_, view)) = keys.views.iter().find(|(b, _)| input.matches(b)) {
            return Some(Action::SetView(*view));
        }

        match input.key {
            Key::Tab => Some(Action::NextView),
            Key::BackTab => Some(Action::PrevView),
            Key::Up | Key::Char('k') => Some(Action::ScrollUp),
            Key::Down | Key::Char('j') => Some(Action::ScrollDown),
            _ => None,
        }
    }

    fn handle_amount_mode(&self, input: InputEvent) -> Option<Action> {
        if input.matches(&self.keymap.select) {
            return Some(Action::SubmitModal);
        }
        if input.matches(&self.keymap.back) {
            return Some(Action::CloseModal);
        }
        match input.key {
            Key::Backspace => Some(Action::InputBackspace),
            _ => input
                .char()
                .filter(|c| c.is_ascii_digit() || *c == '.')
                .map(Action::InputChar),
        }
    }

    fn handle_guide_mode(&self, input: InputEvent) -> Option<Action> {
        if input.matches(&self.keymap.select) {
            Some(Action::SubmitModal)
        } else if input.matches(&self.keymap.back) {
            Some(Action::CloseModal)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventKind, KeyEventState, KeyModifiers};
    use tokio::sync::mpsc;

    fn handler() -> EventHandler {
        EventHandler::new(&KeyBindings::default()).unwrap()
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn in_mode(mode: InputMode) -> EventHandler {
        let mut handler = handler();
        handler.input_mode = mode;
        handler
    }

    #[test]
    fn test_normal_mode_bindings() {
        let h = handler();
        assert!(matches!(h.handle_event(&key(KeyCode::Char('q'))), Some(Action::Quit)));
        assert!(matches!(h.handle_event(&key(KeyCode::Char('r'))), Some(Action::Refresh)));
        assert!(matches!(
            h.handle_event(&key(KeyCode::Char('c'))),
            Some(Action::ConnectWallet)
        ));
        assert!(matches!(
            h.handle_event(&key(KeyCode::Char('x'))),
            Some(Action::DisconnectWallet)
        ));
        assert!(matches!(
            h.handle_event(&key(KeyCode::Char('g'))),
            Some(Action::OpenTourGuide)
        ));
        assert!(matches!(h.handle_event(&key(KeyCode::Esc)), Some(Action::Back)));
        assert!(matches!(h.handle_event(&key(KeyCode::Tab)), Some(Action::NextView)));
        assert!(matches!(h.handle_event(&key(KeyCode::BackTab)), Some(Action::PrevView)));
    }

    #[test]
    fn test_action_and_view_keys() {
        let h = handler();
        let cases = [
            ('d', ActionKind::Deposit),
            ('w', ActionKind::Withdraw),
            ('b', ActionKind::Borrow),
            ('p', ActionKind::Repay),
        ];
        for (c, expected) in cases {
            match h.handle_event(&key(KeyCode::Char(c))) {
                Some(Action::OpenModal(kind)) => assert_eq!(kind, expected),
                other => panic!("{c} produced {other:?}"),
            }
        }

        match h.handle_event(&key(KeyCode::Char('3'))) {
            Some(Action::SetView(view)) => assert_eq!(view, View::Charts),
            other => panic!("3 produced {other:?}"),
        }
    }

    #[test]
    fn test_ctrl_c_quits_in_every_mode() {
        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        for mode in [InputMode::Normal, InputMode::Amount, InputMode::Guide] {
            assert!(matches!(in_mode(mode).handle_event(&ctrl_c), Some(Action::Quit)));
        }
    }

    #[test]
    fn test_amount_mode_routes_text() {
        let h = in_mode(InputMode::Amount);
        assert!(matches!(
            h.handle_event(&key(KeyCode::Char('7'))),
            Some(Action::InputChar('7'))
        ));
        assert!(matches!(
            h.handle_event(&key(KeyCode::Char('.'))),
            Some(Action::InputChar('.'))
        ));
        // Action keys are plain text while typing.
        assert!(h.handle_event(&key(KeyCode::Char('q'))).is_none());
        assert!(h.handle_event(&key(KeyCode::Char('d'))).is_none());
        assert!(matches!(
            h.handle_event(&key(KeyCode::Backspace)),
            Some(Action::InputBackspace)
        ));
        assert!(matches!(h.handle_event(&key(KeyCode::Enter)), Some(Action::SubmitModal)));
        assert!(matches!(h.handle_event(&key(KeyCode::Esc)), Some(Action::CloseModal)));
    }

    #[test]
    fn test_guide_mode_only_closes() {
        let h = in_mode(InputMode::Guide);
        assert!(matches!(h.handle_event(&key(KeyCode::Enter)), Some(Action::SubmitModal)));
        assert!(matches!(h.handle_event(&key(KeyCode::Esc)), Some(Action::CloseModal)));
        assert!(h.handle_event(&key(KeyCode::Char('d'))).is_none());
    }

    #[test]
    fn test_release_events_ignored() {
        let release = Event::Key(KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });
        assert!(handler().handle_event(&release).is_none());
    }

    #[test]
    fn test_tick_and_resize() {
        let h = handler();
        assert!(matches!(h.handle_event(&Event::Tick), Some(Action::Tick)));
        assert!(h.handle_event(&Event::Resize(80, 24)).is_none());
    }

    #[test]
    fn test_snapshot_follows_store() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut store = Store::new(tx);
        let mut h = handler();

        store.reduce(Action::OpenModal(ActionKind::Deposit));
        h.update_store_snapshot(&store);
        assert!(matches!(
            h.handle_event(&key(KeyCode::Char('1'))),
            Some(Action::InputChar('1'))
        ));

        store.reduce(Action::CloseModal);
        h.update_store_snapshot(&store);
        assert!(matches!(
            h.handle_event(&key(KeyCode::Char('1'))),
            Some(Action::SetView(View::Dashboard))
        ));
    }

    #[test]
    fn test_invalid_binding_is_config_error() {
        let bindings = KeyBindings {
            quit: "Hyper+q".to_string(),
            ..KeyBindings::default()
        };
        assert!(EventHandler::new(&bindings).is_err());
    }
}
