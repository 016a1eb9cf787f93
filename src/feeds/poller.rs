//! Interval-driven snapshot refresher.

use crate::error::Result;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

/// A snapshot a [`Poller`] keeps current.
pub trait PollSnapshot: Clone + Send + Sync + 'static {
    /// Values produced by one successful fetch.
    type Update: Send + 'static;

    fn set_loading(&mut self, loading: bool);

    fn set_error(&mut self, error: Option<String>);

    /// Replace the numeric fields with a freshly fetched update.
    fn apply(&mut self, update: Self::Update);
}

/// Something that can compute a snapshot update from the network.
#[async_trait]
pub trait Feed: Send + Sync + 'static {
    type Update: Send + 'static;
    type Snapshot: PollSnapshot<Update = Self::Update>;

    /// Short name used in logs.
    fn name(&self) -> &'static str;

    async fn fetch(&self) -> Result<Self::Update>;
}

/// Scheduling options for a [`Poller`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollOptions {
    /// Time between scheduled fetches; zero fetches once on start.
    pub refresh_interval: Duration,
    /// When false nothing is ever scheduled or fetched.
    pub enabled: bool,
}

impl PollOptions {
    /// Enabled, refreshing every `interval`.
    pub fn every(interval: Duration) -> Self {
        Self {
            refresh_interval: interval,
            enabled: true,
        }
    }

    /// Enabled, refreshing every `ms` milliseconds.
    pub fn every_ms(ms: u64) -> Self {
        Self::every(Duration::from_millis(ms))
    }

    /// Set whether polling is enabled.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// Bookkeeping for overlapping fetches.
#[derive(Debug, Default)]
struct Tracker {
    /// Sequence number handed to the most recently started fetch.
    next_seq: u64,
    /// Sequence number of the newest successful fetch applied so far.
    last_applied: u64,
    in_flight: usize,
}

struct Shared<F: Feed> {
    feed: F,
    tx: watch::Sender<F::Snapshot>,
    tracker: Mutex<Tracker>,
}

impl<F: Feed> Shared<F> {
    fn spawn_fetch(self: &Arc<Self>) {
        let seq = self.begin();
        let shared = Arc::clone(self);
        tokio::spawn(async move {
            let result = shared.feed.fetch().await;
            shared.complete(seq, result);
        });
    }

    fn begin(&self) -> u64 {
        let mut tracker = self.tracker.lock();
        tracker.next_seq += 1;
        tracker.in_flight += 1;
        let seq = tracker.next_seq;

        self.tx.send_modify(|snapshot| {
            snapshot.set_loading(true);
            snapshot.set_error(None);
        });
        seq
    }

    fn complete(&self, seq: u64, result: Result<F::Update>) {
        let mut tracker = self.tracker.lock();
        tracker.in_flight = tracker.in_flight.saturating_sub(1);
        let still_loading = tracker.in_flight > 0;
        let stale = seq < tracker.last_applied;
        let feed = self.feed.name();

        self.tx.send_modify(|snapshot| {
            match result {
                _ if stale => {
                    debug!(feed, seq, last_applied = tracker.last_applied, "Dropping stale response");
                }
                Ok(update) => {
                    tracker.last_applied = seq;
                    snapshot.apply(update);
                    snapshot.set_error(None);
                }
                Err(e) => {
                    warn!(feed, seq, error = %e, "Refresh failed, keeping previous values");
                    snapshot.set_error(Some(e.to_string()));
                }
            }
            snapshot.set_loading(still_loading);
        });
    }
}

/// Keeps a snapshot fresh by fetching on an interval and on demand.
///
/// Every fetch is tagged with a sequence number; a response older than the
/// newest one already applied is discarded, so out-of-order completions can
/// never roll the snapshot back. Dropping the poller stops the interval.
pub struct Poller<F: Feed> {
    shared: Arc<Shared<F>>,
    options: PollOptions,
    ticker: Option<JoinHandle<()>>,
}

impl<F: Feed> Poller<F> {
    /// Create a poller without scheduling anything.
    pub fn new(feed: F, seed: F::Snapshot, options: PollOptions) -> Self {
        let (tx, _rx) = watch::channel(seed);
        Self {
            shared: Arc::new(Shared {
                feed,
                tx,
                tracker: Mutex::new(Tracker::default()),
            }),
            options,
            ticker: None,
        }
    }

    /// Create a poller and start its interval; the first fetch runs immediately.
    pub fn start(feed: F, seed: F::Snapshot, options: PollOptions) -> Self {
        let mut poller = Self::new(feed, seed, options);
        poller.schedule();
        poller
    }

    fn schedule(&mut self) {
        if !self.options.enabled || self.ticker.is_some() {
            return;
        }

        let shared = Arc::clone(&self.shared);
        let period = self.options.refresh_interval;
        debug!(feed = shared.feed.name(), ?period, "Starting poller");

        self.ticker = Some(tokio::spawn(async move {
            if period.is_zero() {
                shared.spawn_fetch();
                return;
            }

            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                shared.spawn_fetch();
            }
        }));
    }

    /// Fetch now without waiting for the next tick. No-op when disabled.
    pub fn refresh(&self) {
        if self.options.enabled {
            self.shared.spawn_fetch();
        }
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> F::Snapshot {
        self.shared.tx.borrow().clone()
    }

    /// Receiver notified on every snapshot change.
    pub fn subscribe(&self) -> watch::Receiver<F::Snapshot> {
        self.shared.tx.subscribe()
    }

    pub fn options(&self) -> PollOptions {
        self.options
    }

    /// Stop the interval. Fetches already in flight still complete.
    pub fn shutdown(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
            debug!(feed = self.shared.feed.name(), "Poller stopped");
        }
    }
}

impl<F: Feed> Drop for Poller<F> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
