//! Scoped periodic quote polling.
//!
//! A board view owns exactly one `QuoteTicker` for its lifetime. The ticker
//! is an explicitly owned task handle: `stop()` (or dropping the handle)
//! aborts the polling task deterministically, so a torn-down view cannot
//! leave a timer firing against defunct state.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, warn};

use crate::data912::{Board, Data912Client};
use crate::types::Quote;
use crate::QUOTE_REFRESH_INTERVAL;

/// Handle to a board's polling task.
///
/// The task publishes each cycle's outcome on a watch channel:
/// `Some(quotes)` after a successful poll (fully replacing prior state),
/// `None` before the first result and after a failed cycle. A failed cycle
/// therefore blanks the board instead of showing an error.
pub struct QuoteTicker {
    board: Board,
    rx: watch::Receiver<Option<Vec<Quote>>>,
    task: JoinHandle<()>,
}

impl QuoteTicker {
    /// Spawn a ticker on the standard 30 second refresh. The first fetch
    /// happens immediately, not one period in.
    pub fn spawn(client: Data912Client, board: Board) -> Self {
        Self::with_refresh(client, board, QUOTE_REFRESH_INTERVAL)
    }

    /// Spawn a ticker with a custom refresh period.
    pub fn with_refresh(client: Data912Client, board: Board, refresh: Duration) -> Self {
        let (tx, rx) = watch::channel(None);
        let task = tokio::spawn(async move {
            let mut ticker = interval(refresh);
            // A poll slower than the period delays the next tick; polls
            // never overlap and never burst to catch up.
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let update = match client.get_board(board).await {
                    Ok(quotes) => {
                        debug!("{} quotes for {}", quotes.len(), board.title());
                        Some(quotes)
                    }
                    Err(err) => {
                        warn!("quote poll failed for {}: {}", board.title(), err);
                        None
                    }
                };
                if tx.send(update).is_err() {
                    // Every receiver is gone; stop polling.
                    break;
                }
            }
        });
        Self { board, rx, task }
    }

    /// Board this ticker polls.
    pub fn board(&self) -> Board {
        self.board
    }

    /// A receiver of the latest published cycle.
    pub fn subscribe(&self) -> watch::Receiver<Option<Vec<Quote>>> {
        self.rx.clone()
    }

    /// Snapshot of the latest published cycle.
    pub fn latest(&self) -> Option<Vec<Quote>> {
        self.rx.borrow().clone()
    }

    /// Stop polling now.
    pub fn stop(self) {
        self.task.abort();
    }
}

impl Drop for QuoteTicker {
    fn drop(&mut self) {
        self.task.abort();
    }
}
