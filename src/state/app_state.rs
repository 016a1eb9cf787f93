//! Application-level state.

use super::modal_state::{ActionModal, GUIDE_STEPS, GuideStep};
use super::Notification;
use crate::wallet::WalletAccount;
use std::time::Instant;

/// Ticks between guided-tour steps.
pub const GUIDE_STEP_TICKS: u64 = 12;

/// The current view/screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Dashboard,
    Vault,
    Charts,
    About,
}

impl View {
    pub const ALL: [View; 4] = [View::Dashboard, View::Vault, View::Charts, View::About];

    pub fn title(self) -> &'static str {
        match self {
            View::Dashboard => "Dashboard",
            View::Vault => "Vault",
            View::Charts => "Charts",
            View::About => "About",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|v| *v == self).unwrap_or_default()
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Input mode for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typing an amount into a transaction modal.
    Amount,
    /// Reading a guide modal.
    Guide,
}

/// What the navbar shows for the wallet.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum WalletStatus {
    #[default]
    Disconnected,
    Connecting,
    Connected(WalletAccount),
}

impl WalletStatus {
    pub fn is_connected(&self) -> bool {
        matches!(self, WalletStatus::Connected(_))
    }

    pub fn account(&self) -> Option<&WalletAccount> {
        match self {
            WalletStatus::Connected(account) => Some(account),
            _ => None,
        }
    }
}

/// Global application state.
#[derive(Debug, Default)]
pub struct AppState {
    /// Current view.
    pub current_view: View,
    /// Current input mode.
    pub input_mode: InputMode,
    /// Whether to show help overlay.
    pub show_help: bool,
    /// Open action modal.
    pub modal: Option<ActionModal>,
    pub wallet: WalletStatus,
    /// Current notification.
    pub notification: Option<Notification>,
    pub notification_shown_at: Option<Instant>,
    /// Current error message.
    pub error: Option<String>,
    /// Highlighted step of the guided tour.
    pub guide_step: usize,
    /// Highlighted row of the BTC pairs table.
    pub selected_pair: usize,
    pub ticks: u64,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if keys go to a modal rather than the global bindings.
    pub fn is_editing(&self) -> bool {
        self.input_mode != InputMode::Normal
    }

    pub fn current_guide_step(&self) -> &GuideStep {
        &GUIDE_STEPS[self.guide_step % GUIDE_STEPS.len()]
    }

    pub fn open_modal(&mut self, modal: ActionModal) {
        self.input_mode = if modal.is_guide() {
            InputMode::Guide
        } else {
            InputMode::Amount
        };
        self.show_help = false;
        self.modal = Some(modal);
    }

    pub fn close_modal(&mut self) {
        self.modal = None;
        self.input_mode = InputMode::Normal;
    }

    /// Advance animations by one tick.
    pub fn tick(&mut self, now: Instant) {
        self.ticks = self.ticks.wrapping_add(1);
        if self.ticks % GUIDE_STEP_TICKS == 0 {
            self.guide_step = (self.guide_step + 1) % GUIDE_STEPS.len();
        }

        let expired = match (&self.notification, self.notification_shown_at) {
            (Some(notification), Some(shown_at)) => {
                now.duration_since(shown_at).as_secs() >= notification.duration_secs
            }
            _ => false,
        };
        if expired {
            self.notification = None;
            self.notification_shown_at = None;
        }
    }

    /// Spinner frame for loading indicators.
    pub fn spinner(&self) -> char {
        const FRAMES: [char; 4] = ['|', '/', '-', '\\'];
        FRAMES[(self.ticks % FRAMES.len() as u64) as usize]
    }
}
