//! TUI widgets.

mod about;
mod action_modal;
mod chart_panel;
mod dashboard;
mod help;
mod notifications;
mod status_bar;
mod tab_bar;
mod top_stats;
mod vault_overview;

pub use about::AboutPanel;
pub use action_modal::ActionModalView;
pub use chart_panel::ChartPanel;
pub use dashboard::Dashboard;
pub use help::HelpPanel;
pub use notifications::{render_error, render_notification};
pub use status_bar::StatusBar;
pub use tab_bar::TabBar;
pub use top_stats::TopStats;
pub use vault_overview::VaultOverview;
