//! Terminal input and the tick clock.
//!
//! [`EventLoop`] merges crossterm's event stream with a fixed-rate tick into
//! one channel; [`EventHandler`] turns those events into store actions.

mod handler;
mod input;

pub use handler::EventHandler;
pub use input::{InputEvent, Key, KeyBinding, Modifiers};

use crate::config::UiConfig;
use crossterm::event::{Event as CrosstermEvent, EventStream, KeyEvent, MouseEvent};
use futures::StreamExt;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::warn;

/// Terminal event types.
#[derive(Debug, Clone)]
pub enum Event {
    /// Animation clock.
    Tick,
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
}

/// Configuration for the event loop.
#[derive(Debug, Clone)]
pub struct EventConfig {
    pub tick_rate: Duration,
    pub mouse_capture: bool,
}

impl Default for EventConfig {
    fn default() -> Self {
        Self {
            tick_rate: Duration::from_millis(250),
            mouse_capture: true,
        }
    }
}

impl From<&UiConfig> for EventConfig {
    fn from(ui: &UiConfig) -> Self {
        Self {
            tick_rate: Duration::from_millis(ui.tick_rate_ms.max(1)),
            mouse_capture: ui.mouse_support,
        }
    }
}

/// Background reader feeding terminal events into a channel.
pub struct EventLoop {
    config: EventConfig,
}

impl EventLoop {
    pub fn new(config: EventConfig) -> Self {
        Self { config }
    }

    /// Spawn the reader. It stops when the receiver is dropped or the
    /// terminal stream ends.
    pub fn start(self) -> (mpsc::UnboundedReceiver<Event>, JoinHandle<()>) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let tick_rate = self.config.tick_rate;
        let mouse_capture = self.config.mouse_capture;

        let handle = tokio::spawn(async move {
            let mut reader = EventStream::new();
            let mut ticks = tokio::time::interval(tick_rate);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                let event = tokio::select! {
                    _ = ticks.tick() => Event::Tick,
                    next = reader.next() => match next {
                        Some(Ok(event)) => match translate(event, mouse_capture) {
                            Some(event) => event,
                            None => continue,
                        },
                        Some(Err(e)) => {
                            warn!("Terminal read failed: {}", e);
                            continue;
                        }
                        None => break,
                    },
                };

                if event_tx.send(event).is_err() {
                    break;
                }
            }
        });

        (event_rx, handle)
    }
}

fn translate(event: CrosstermEvent, mouse_capture: bool) -> Option<Event> {
    match event {
        CrosstermEvent::Key(key) => Some(Event::Key(key)),
        CrosstermEvent::Mouse(mouse) if mouse_capture => Some(Event::Mouse(mouse)),
        CrosstermEvent::Resize(w, h) => Some(Event::Resize(w, h)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers, MouseEventKind};

    fn scroll() -> CrosstermEvent {
        CrosstermEvent::Mouse(MouseEvent {
            kind: MouseEventKind::ScrollDown,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_translate_drops_mouse_without_capture() {
        assert!(matches!(translate(scroll(), true), Some(Event::Mouse(_))));
        assert!(translate(scroll(), false).is_none());
    }

    #[test]
    fn test_translate_keeps_keys_and_resize() {
        let key = CrosstermEvent::Key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE));
        assert!(matches!(translate(key, false), Some(Event::Key(_))));
        assert!(matches!(
            translate(CrosstermEvent::Resize(80, 24), false),
            Some(Event::Resize(80, 24))
        ));
        assert!(translate(CrosstermEvent::FocusLost, true).is_none());
    }

    #[test]
    fn test_config_from_ui_settings() {
        let ui = UiConfig {
            tick_rate_ms: 100,
            mouse_support: false,
            show_guide_on_start: false,
        };
        let config = EventConfig::from(&ui);
        assert_eq!(config.tick_rate, Duration::from_millis(100));
        assert!(!config.mouse_capture);
    }
}
