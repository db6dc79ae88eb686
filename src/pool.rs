//! The shared flashcard pool. The review controller, the card manager and
//! the asset poller all write through here; nothing else mutates it.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::models::Flashcard;

#[derive(Clone, Default)]
pub struct CardPool {
    inner: Arc<RwLock<Vec<Flashcard>>>,
}

impl CardPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_all(&self, cards: Vec<Flashcard>) {
        *self.inner.write() = cards;
    }

    pub fn all(&self) -> Vec<Flashcard> {
        self.inner.read().clone()
    }

    pub fn get(&self, id: i64) -> Option<Flashcard> {
        self.inner.read().iter().find(|c| c.id == id).cloned()
    }

    pub fn insert(&self, card: Flashcard) {
        self.inner.write().push(card);
    }

    /// Replace the card with the same id, or append if it is new. The asset
    /// poller calls this on every response so partial updates show up.
    pub fn replace(&self, card: Flashcard) {
        let mut cards = self.inner.write();
        match cards.iter_mut().find(|c| c.id == card.id) {
            Some(slot) => *slot = card,
            None => cards.push(card),
        }
    }

    pub fn remove(&self, id: i64) -> bool {
        let mut cards = self.inner.write();
        let before = cards.len();
        cards.retain(|c| c.id != id);
        cards.len() != before
    }

    /// Flip pool membership. Returns false when the card is unknown.
    pub fn set_active(&self, id: i64, active: bool) -> bool {
        let mut cards = self.inner.write();
        match cards.iter_mut().find(|c| c.id == id) {
            Some(card) => {
                card.active = active;
                true
            }
            None => false,
        }
    }

    pub fn active_count(&self) -> usize {
        self.inner.read().iter().filter(|c| c.active).count()
    }
}
