//! Board refresh poller
//!
//! The only recurring background activity: every tick re-reads the store and
//! rebuilds the board view. Runs until the shutdown token fires.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use super::KitchenBoard;

/// Poll the store and rebuild the board view on a fixed interval.
///
/// The first tick fires immediately, so the board is populated as soon as
/// the task starts. A failed read leaves the previous view in place and is
/// retried on the next tick.
pub async fn run_board_poller(
    board: Arc<KitchenBoard>,
    interval: Duration,
    shutdown: CancellationToken,
) {
    let mut ticker = tokio::time::interval(interval);

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => {
                tracing::debug!("Board poller stopping");
                break;
            }
            _ = ticker.tick() => {
                if let Err(e) = board.refresh() {
                    tracing::warn!(error = %e, "Board refresh failed, keeping previous view");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::TicketStore;

    #[tokio::test]
    async fn test_poller_stops_on_shutdown() {
        let store = TicketStore::open_in_memory().unwrap();
        let board = Arc::new(KitchenBoard::new(store));
        let token = CancellationToken::new();

        let handle = tokio::spawn(run_board_poller(
            board,
            Duration::from_millis(10),
            token.clone(),
        ));

        tokio::time::sleep(Duration::from_millis(30)).await;
        token.cancel();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_poller_populates_board() {
        let store = TicketStore::open_in_memory().unwrap();
        let board = Arc::new(KitchenBoard::new(store.clone()));
        let token = CancellationToken::new();

        tokio::spawn(run_board_poller(
            board.clone(),
            Duration::from_millis(10),
            token.clone(),
        ));

        // Give the first tick a moment to land
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert!(board.entries().is_empty());
        token.cancel();
    }
}
