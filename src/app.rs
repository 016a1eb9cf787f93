//! Main application module.
//!
//! `App` owns the terminal, the store and the background feeds, and runs
//! the draw / wait / reduce loop until the store asks to quit.

use crate::api::{ApiClient, MarketData};
use crate::config::{Config, WalletConfig};
use crate::error::{Error, Result};
use crate::events::{Event, EventConfig, EventHandler, EventLoop};
use crate::feeds::{self, Poller, ProtocolStatsFeed, VaultDataFeed};
use crate::state::{Action, Store};
use crate::ui::Ui;
use crate::wallet::{LazyConnector, RpcWatchConnector, WalletAdapter, WalletConnector};

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::pin::Pin;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::WatchStream;
use tokio_stream::{Stream, StreamExt};
use tracing::{debug, info};

type ActionStream = Pin<Box<dyn Stream<Item = Action> + Send>>;

/// The main application.
pub struct App {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    store: Store,
    event_handler: EventHandler,
    event_rx: mpsc::UnboundedReceiver<Event>,
    event_task: JoinHandle<()>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    /// Snapshot changes from both feeds, already wrapped as actions.
    feed_updates: ActionStream,
    protocol: Poller<ProtocolStatsFeed>,
    vault: Poller<VaultDataFeed>,
    wallet: WalletAdapter,
    config: Config,
}

impl App {
    /// Create a new application and start the feeds.
    pub async fn new(config: Config) -> Result<Self> {
        // Fail on bad bindings before touching the terminal.
        let event_handler = EventHandler::new(&config.keybindings)?;

        let source: Arc<dyn MarketData> = Arc::new(ApiClient::new(config.api.clone())?);
        let protocol = feeds::protocol_stats(Arc::clone(&source), &config.polling);
        let vault = feeds::vault_data(source, &config.polling);
        let feed_updates = feed_actions(&protocol, &vault);

        let wallet = WalletAdapter::new(
            wallet_connector(&config.wallet),
            config.wallet.default_chain_id.clone(),
        );

        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let mut store = Store::new(action_tx);
        store.metrics = protocol.snapshot();
        store.vault = vault.snapshot();
        if config.ui.show_guide_on_start {
            store.dispatch(Action::OpenTourGuide)?;
        }

        let event_config = EventConfig::from(&config.ui);

        enable_raw_mode().map_err(|e| Error::terminal(format!("raw mode unavailable: {e}")))?;
        let mut stdout = io::stdout();
        if event_config.mouse_capture {
            execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        } else {
            execute!(stdout, EnterAlternateScreen)?;
        }
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;

        let (event_rx, event_task) = EventLoop::new(event_config).start();

        info!(
            api = %config.api.base_url,
            polling = config.polling.enabled,
            "Dashboard started"
        );

        Ok(Self {
            terminal,
            store,
            event_handler,
            event_rx,
            event_task,
            action_rx,
            feed_updates,
            protocol,
            vault,
            wallet,
            config,
        })
    }

    /// Run the application event loop.
    pub async fn run(&mut self) -> Result<()> {
        loop {
            self.event_handler.update_store_snapshot(&self.store);
            self.draw()?;

            tokio::select! {
                Some(event) = self.event_rx.recv() => {
                    if let Some(action) = self.event_handler.handle_event(&event) {
                        self.handle_action(action).await?;
                    }
                }
                Some(action) = self.action_rx.recv() => {
                    self.handle_action(action).await?;
                }
                Some(action) = self.feed_updates.next() => {
                    self.store.reduce(action);
                }
                else => break,
            }

            if self.store.app.should_quit {
                break;
            }
        }

        self.protocol.shutdown();
        self.vault.shutdown();
        info!("Dashboard stopped");
        Ok(())
    }

    fn draw(&mut self) -> Result<()> {
        let store = &self.store;
        let keys = &self.config.keybindings;
        self.terminal
            .draw(|frame| Ui::render(frame, store, keys))?;
        Ok(())
    }

    /// Actions with side effects run here; everything else goes straight to the reducer.
    async fn handle_action(&mut self, action: Action) -> Result<()> {
        match action {
            Action::Refresh => {
                self.store.reduce(Action::Refresh);
                self.protocol.refresh();
                self.vault.refresh();
            }
            Action::ConnectWallet => {
                if self.wallet.is_connected() {
                    return Ok(());
                }
                self.store.reduce(Action::ConnectWallet);
                // Show "connecting" while the node answers.
                self.draw()?;
                match self.wallet.connect().await {
                    Ok(account) => self.store.reduce(Action::WalletConnected(account)),
                    Err(e) => self.store.reduce(Action::WalletConnectFailed(e.to_string())),
                }
            }
            Action::DisconnectWallet => {
                self.wallet.disconnect().await;
                self.store.reduce(Action::WalletDisconnected);
            }
            other => self.store.reduce(other),
        }
        Ok(())
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.event_task.abort();
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        );
        let _ = self.terminal.show_cursor();
    }
}

/// Merge both feeds' watch channels into one stream of store actions.
fn feed_actions(protocol: &Poller<ProtocolStatsFeed>, vault: &Poller<VaultDataFeed>) -> ActionStream {
    let metrics = WatchStream::from_changes(protocol.subscribe()).map(Action::MetricsUpdated);
    let vault = WatchStream::from_changes(vault.subscribe()).map(Action::VaultUpdated);
    Box::pin(metrics.merge(vault))
}

/// Lazily built watch connector for the configured account.
fn wallet_connector(config: &WalletConfig) -> LazyConnector {
    let rpc_url = config.rpc_url.clone();
    let address = config.account_address.clone();
    LazyConnector::new(move || {
        let address = address.as_deref().ok_or_else(|| {
            Error::wallet("no account configured; set wallet.account_address in config.toml")
        })?;
        debug!(%rpc_url, "Building RPC watch connector");
        let connector = RpcWatchConnector::new(rpc_url.clone(), address)?;
        Ok(Box::new(connector) as Box<dyn WalletConnector>)
    })
}
