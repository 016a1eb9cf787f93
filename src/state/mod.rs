//! State management for the Sats dashboard.
//!
//! A single [`Store`] owns everything the UI renders. Input handlers and
//! feeds never touch it directly; they emit [`Action`]s that
//! [`Store::reduce`] applies one at a time.

mod app_state;
mod chart_state;
mod modal_state;

pub use app_state::{AppState, GUIDE_STEP_TICKS, InputMode, View, WalletStatus};
pub use chart_state::{CDR_SERIES, CdrPoint, ChartKind, ChartState, PRICE_SERIES, PricePoint};
pub use modal_state::{
    ActionKind, ActionModal, BORROW_APR, GUIDE_STEPS, GuideStep, MIN_DEPOSIT_BTC, ModalMode,
    REQUIRED_CDR,
};

use crate::error::Result;
use crate::feeds::{MetricsSnapshot, VaultSnapshot};
use crate::wallet::WalletAccount;
use std::time::Instant;
use tokio::sync::mpsc;

/// Actions that can be dispatched to modify state.
#[derive(Debug, Clone)]
pub enum Action {
    // Navigation
    SetView(View),
    NextView,
    PrevView,
    ScrollUp,
    ScrollDown,
    ToggleHelp,
    /// Close whatever sits on top: modal, help, notification, error.
    Back,

    // Modals
    OpenModal(ActionKind),
    OpenGuide(ActionKind),
    /// Open the guide for the highlighted tour step.
    OpenTourGuide,
    CloseModal,
    InputChar(char),
    InputBackspace,
    SubmitModal,

    // Wallet
    ConnectWallet,
    WalletConnected(WalletAccount),
    WalletConnectFailed(String),
    DisconnectWallet,
    WalletDisconnected,

    // Feeds
    Refresh,
    MetricsUpdated(MetricsSnapshot),
    VaultUpdated(VaultSnapshot),

    // Charts
    ToggleChart,

    Tick,
    ShowNotification(Notification),
    DismissNotification,
    SetError(String),
    ClearError,
    Quit,
}

/// A notification to display to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
    pub duration_secs: u64,
}

/// Notification severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl Notification {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Info,
            duration_secs: 3,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Success,
            duration_secs: 3,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Warning,
            duration_secs: 5,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Error,
            duration_secs: 10,
        }
    }
}

/// The global state store.
#[derive(Debug)]
pub struct Store {
    pub app: AppState,
    /// Latest protocol stats snapshot.
    pub metrics: MetricsSnapshot,
    /// Latest vault snapshot.
    pub vault: VaultSnapshot,
    pub charts: ChartState,
    action_tx: mpsc::UnboundedSender<Action>,
}

impl Store {
    pub fn new(action_tx: mpsc::UnboundedSender<Action>) -> Self {
        Self {
            app: AppState::new(),
            metrics: MetricsSnapshot::default(),
            vault: VaultSnapshot::default(),
            charts: ChartState::default(),
            action_tx,
        }
    }

    /// Dispatch an action to the store.
    pub fn dispatch(&self, action: Action) -> Result<()> {
        self.action_tx
            .send(action)
            .map_err(|e| crate::Error::channel(e.to_string()))
    }

    /// Whether either feed has a fetch outstanding.
    pub fn is_loading(&self) -> bool {
        self.metrics.is_loading || self.vault.is_loading
    }

    /// First feed error, if any.
    pub fn feed_error(&self) -> Option<&str> {
        self.metrics
            .error
            .as_deref()
            .or(self.vault.error.as_deref())
    }

    /// Apply an action to update state.
    pub fn reduce(&mut self, action: Action) {
        match action {
            Action::SetView(view) => self.app.current_view = view,
            Action::NextView => self.app.current_view = self.app.current_view.next(),
            Action::PrevView => self.app.current_view = self.app.current_view.prev(),
            Action::ScrollUp => self.app.selected_pair = self.app.selected_pair.saturating_sub(1),
            Action::ScrollDown => {
                let max = self.vault.btc_pairs.len().saturating_sub(1);
                self.app.selected_pair = (self.app.selected_pair + 1).min(max);
            }
            Action::ToggleHelp => self.app.show_help = !self.app.show_help,
            Action::Back => self.back(),

            Action::OpenModal(kind) => self.app.open_modal(ActionModal::transaction(kind)),
            Action::OpenGuide(kind) => self.app.open_modal(ActionModal::guide(kind)),
            Action::OpenTourGuide => {
                let kind = self
                    .app
                    .current_guide_step()
                    .action
                    .unwrap_or(ActionKind::Deposit);
                self.app.open_modal(ActionModal::guide(kind));
            }
            Action::CloseModal => self.app.close_modal(),
            Action::InputChar(c) => {
                if let Some(modal) = self.app.modal.as_mut() {
                    modal.push_char(c);
                }
            }
            Action::InputBackspace => {
                if let Some(modal) = self.app.modal.as_mut() {
                    modal.pop_char();
                }
            }
            Action::SubmitModal => self.submit_modal(),

            Action::ConnectWallet => {
                if !self.app.wallet.is_connected() {
                    self.app.wallet = WalletStatus::Connecting;
                }
            }
            Action::WalletConnected(account) => {
                let message = format!(
                    "Wallet connected: {} ({})",
                    account.short_address(),
                    account.network()
                );
                self.app.wallet = WalletStatus::Connected(account);
                self.notify(Notification::success(message));
            }
            Action::WalletConnectFailed(reason) => {
                self.app.wallet = WalletStatus::Disconnected;
                self.notify(Notification::error(format!(
                    "Wallet connection failed: {reason}. Press c to retry"
                )));
            }
            Action::DisconnectWallet => {}
            Action::WalletDisconnected => {
                let was_connected = self.app.wallet.is_connected();
                self.app.wallet = WalletStatus::Disconnected;
                if was_connected {
                    self.notify(Notification::info("Wallet disconnected"));
                }
            }

            Action::Refresh => self.notify(Notification::info("Refreshing live data")),
            Action::MetricsUpdated(snapshot) => self.metrics = snapshot,
            Action::VaultUpdated(snapshot) => {
                self.vault = snapshot;
                let max = self.vault.btc_pairs.len().saturating_sub(1);
                self.app.selected_pair = self.app.selected_pair.min(max);
            }

            Action::ToggleChart => self.charts.toggle(),

            Action::Tick => self.app.tick(Instant::now()),
            Action::ShowNotification(notification) => self.notify(notification),
            Action::DismissNotification => {
                self.app.notification = None;
                self.app.notification_shown_at = None;
            }
            Action::SetError(error) => self.app.error = Some(error),
            Action::ClearError => self.app.error = None,
            Action::Quit => self.app.should_quit = true,
        }
    }

    fn notify(&mut self, notification: Notification) {
        self.app.notification = Some(notification);
        self.app.notification_shown_at = Some(Instant::now());
    }

    fn back(&mut self) {
        if self.app.modal.is_some() {
            self.app.close_modal();
        } else if self.app.show_help {
            self.app.show_help = false;
        } else if self.app.notification.is_some() {
            self.app.notification = None;
            self.app.notification_shown_at = None;
        } else {
            self.app.error = None;
        }
    }

    /// Guides just close. Transactions are validated and recorded as pending;
    /// signing and submission belong to the wallet.
    fn submit_modal(&mut self) {
        let Some(modal) = self.app.modal.clone() else {
            return;
        };

        if modal.is_guide() {
            self.app.close_modal();
            return;
        }

        if !self.app.wallet.is_connected() {
            self.notify(Notification::warning(format!(
                "Connect your wallet to {}",
                modal.kind.label().to_lowercase()
            )));
            return;
        }

        match modal.parsed_amount() {
            Ok(amount) => {
                self.notify(Notification::info(format!(
                    "{} of {} {} pending wallet approval",
                    modal.kind.label(),
                    amount.normalize(),
                    modal.kind.unit()
                )));
                self.app.close_modal();
            }
            Err(reason) => self.notify(Notification::warning(reason)),
        }
    }
}
