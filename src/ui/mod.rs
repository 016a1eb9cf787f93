//! UI rendering using ratatui.
//!
//! Rendering is a pure function of the [`Store`]; nothing here mutates state.

mod layout;
mod widgets;

pub use layout::Layout;
pub use widgets::{
    AboutPanel, ActionModalView, ChartPanel, Dashboard, HelpPanel, StatusBar, TabBar, TopStats,
    VaultOverview,
};

use crate::config::KeyBindings;
use crate::state::{Store, View};
use ratatui::Frame;

/// Main UI renderer.
pub struct Ui;

impl Ui {
    /// Render the entire UI.
    pub fn render(frame: &mut Frame, store: &Store, keys: &KeyBindings) {
        let layout = Layout::new(frame.area());

        StatusBar::render(frame, layout.status_area, store);
        TabBar::render(frame, layout.tab_area, store);
        TopStats::render(frame, layout.stats_area, store);

        match store.app.current_view {
            View::Dashboard => Dashboard::render(frame, layout.main_area, store),
            View::Vault => VaultOverview::render(frame, layout.main_area, store),
            View::Charts => ChartPanel::render(frame, layout.main_area, store),
            View::About => AboutPanel::render(frame, layout.main_area),
        }

        // Overlays, bottom to top.
        if let Some(error) = &store.app.error {
            widgets::render_error(frame, layout.main_area, error);
        }

        if let Some(modal) = &store.app.modal {
            ActionModalView::render(frame, frame.area(), modal, store);
        }

        if store.app.show_help {
            HelpPanel::render(frame, frame.area(), keys);
        }

        if let Some(notification) = &store.app.notification {
            widgets::render_notification(frame, layout.notification_area, notification);
        }
    }
}
