//! Pool-facing card operations outside of a review session: refresh the
//! list, create, delete, toggle membership, regenerate assets.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::warn;

use crate::api::CardStore;
use crate::error::{ApiError, EngineError};
use crate::models::{CardPatch, Flashcard, NewCard};
use crate::pool::CardPool;

pub struct CardManager<F> {
    store: Arc<F>,
    pool: CardPool,
    // Dismissible session-level error; clearing it resets nothing else.
    last_error: Mutex<Option<String>>,
}

impl<F: CardStore> CardManager<F> {
    pub fn new(store: Arc<F>, pool: CardPool) -> Self {
        Self {
            store,
            pool,
            last_error: Mutex::new(None),
        }
    }

    pub fn pool(&self) -> &CardPool {
        &self.pool
    }

    pub fn last_error(&self) -> Option<String> {
        self.last_error.lock().clone()
    }

    pub fn clear_error(&self) {
        *self.last_error.lock() = None;
    }

    fn record_error(&self, err: &ApiError) {
        *self.last_error.lock() = Some(err.to_string());
    }

    /// Reload the full card list into the pool. Failure is surfaced via
    /// `last_error` and leaves the current pool contents alone.
    pub async fn refresh(&self) -> Result<(), ApiError> {
        match self.store.list_cards(None).await {
            Ok(cards) => {
                self.pool.set_all(cards);
                Ok(())
            }
            Err(err) => {
                warn!(%err, "card list refresh failed");
                self.record_error(&err);
                Err(err)
            }
        }
    }

    /// Create a card and add it to the pool. The returned card may still be
    /// missing notes/audio; callers decide whether to start an asset poll
    /// (see `Flashcard::assets_pending`).
    pub async fn create_card(&self, card: &NewCard) -> Result<Flashcard, ApiError> {
        match self.store.create_card(card).await {
            Ok(created) => {
                self.pool.insert(created.clone());
                Ok(created)
            }
            Err(err) => {
                self.record_error(&err);
                Err(err)
            }
        }
    }

    /// Cards are only deletable once inactive.
    pub async fn delete_card(&self, id: i64) -> Result<(), EngineError> {
        match self.pool.get(id) {
            Some(card) if card.active => return Err(EngineError::CardStillActive(id)),
            Some(_) => {}
            None => return Err(EngineError::CardNotFound(id)),
        }
        self.store.delete_card(id).await.inspect_err(|err| {
            self.record_error(err);
        })?;
        self.pool.remove(id);
        Ok(())
    }

    pub async fn toggle_active(&self, id: i64, active: bool) -> Result<Flashcard, ApiError> {
        let patch = CardPatch::set_active(active);
        match self.store.update_card(id, &patch).await {
            Ok(updated) => {
                self.pool.replace(updated.clone());
                Ok(updated)
            }
            Err(err) => {
                self.record_error(&err);
                Err(err)
            }
        }
    }

    /// Kick off server-side asset regeneration. The returned card usually
    /// has assets pending; hand it to the asset poller.
    pub async fn regenerate_assets(&self, id: i64) -> Result<Flashcard, ApiError> {
        match self.store.regenerate_card(id).await {
            Ok(card) => {
                self.pool.replace(card.clone());
                Ok(card)
            }
            Err(err) => {
                self.record_error(&err);
                Err(err)
            }
        }
    }
}
