//! Bounded polling for asynchronously generated card assets (notes, audio).
//!
//! Triggered after card creation or regeneration while assets are missing.
//! Every response replaces the card in the pool so partial completion shows
//! up progressively. Stops when both assets are present, when attempts run
//! out, or on the first fetch failure (silent, already-merged data stays).

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::debug;

use crate::api::CardStore;
use crate::pool::CardPool;

#[derive(Debug, Clone, Copy)]
pub struct PollSettings {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(2),
            max_attempts: 15,
        }
    }
}

/// Handle to a running poll. Dropping it aborts the task, so a poll cannot
/// outlive its owner and write into a torn-down pool.
pub struct PollHandle {
    handle: Option<JoinHandle<()>>,
}

impl PollHandle {
    pub fn cancel(mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    /// Wait for the poll to finish on its own. Test hook, mostly.
    pub async fn wait(mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

pub fn spawn_asset_poll<F>(
    store: Arc<F>,
    pool: CardPool,
    card_id: i64,
    settings: PollSettings,
) -> PollHandle
where
    F: CardStore + 'static,
{
    let handle = tokio::spawn(async move {
        for attempt in 1..=settings.max_attempts {
            tokio::time::sleep(settings.interval).await;

            match store.fetch_card(card_id).await {
                Ok(card) => {
                    let ready = !card.assets_pending();
                    pool.replace(card);
                    if ready {
                        debug!(card_id, attempt, "card assets ready");
                        return;
                    }
                }
                Err(err) => {
                    // Fatal stop, no retry and no user-visible error.
                    debug!(card_id, attempt, %err, "asset poll fetch failed, stopping");
                    return;
                }
            }
        }
        debug!(
            card_id,
            attempts = settings.max_attempts,
            "asset poll attempts exhausted"
        );
    });

    PollHandle {
        handle: Some(handle),
    }
}
