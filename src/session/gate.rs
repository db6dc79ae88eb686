//! Feature gates over the game catalog, computed from two server-reported
//! counters: qualifying sentences at the active level, and audio-equipped
//! cards. Refetched on level change or lobby return, never mid-session.

use tracing::warn;

use crate::api::RoundFetcher;
use crate::models::GameType;

pub const SCRAMBLER_MIN_SENTENCES: u32 = 10;
pub const DEDEDE_MIN_SENTENCES: u32 = 10;
pub const SCRAMBLE_HARDER_MIN_SENTENCES: u32 = 20;
pub const TUNE_IN_MIN_AUDIO_CARDS: u32 = 10;

/// Unlock progress for a locked type, for display ("9/10 sentences").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateProgress {
    pub have: u32,
    pub need: u32,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GameCatalogGate {
    sentence_count: u32,
    audio_card_count: u32,
}

impl GameCatalogGate {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub(crate) fn with_counts(sentence_count: u32, audio_card_count: u32) -> Self {
        Self {
            sentence_count,
            audio_card_count,
        }
    }

    pub fn sentence_count(&self) -> u32 {
        self.sentence_count
    }

    pub fn audio_card_count(&self) -> u32 {
        self.audio_card_count
    }

    /// Refetch both counters. A failed fetch zeroes the counter so gated
    /// types stay locked; this is logged, not surfaced as a session error.
    pub async fn refresh<F: RoundFetcher>(&mut self, fetcher: &F, level: u8) {
        self.sentence_count = match fetcher.sentence_count(level).await {
            Ok(count) => count,
            Err(err) => {
                warn!(%err, level, "sentence count fetch failed, keeping gates locked");
                0
            }
        };
        self.audio_card_count = match fetcher.audio_card_count().await {
            Ok(count) => count,
            Err(err) => {
                warn!(%err, "audio card count fetch failed, keeping gates locked");
                0
            }
        };
    }

    /// Thresholds are inclusive: count >= minimum unlocks.
    pub fn is_locked(&self, game_type: GameType) -> bool {
        match game_type {
            GameType::Matching | GameType::MadLibs => false,
            GameType::Scrambler => self.sentence_count < SCRAMBLER_MIN_SENTENCES,
            GameType::Dedede => self.sentence_count < DEDEDE_MIN_SENTENCES,
            GameType::ScrambleHarder => self.sentence_count < SCRAMBLE_HARDER_MIN_SENTENCES,
            GameType::TuneIn => self.audio_card_count < TUNE_IN_MIN_AUDIO_CARDS,
        }
    }

    /// Currently locked types, for exclusion from random sampling.
    pub fn locked_types(&self) -> Vec<GameType> {
        GameType::ALL
            .into_iter()
            .filter(|&t| self.is_locked(t))
            .collect()
    }

    pub fn progress(&self, game_type: GameType) -> Option<GateProgress> {
        let (have, need) = match game_type {
            GameType::Matching | GameType::MadLibs => return None,
            GameType::Scrambler => (self.sentence_count, SCRAMBLER_MIN_SENTENCES),
            GameType::Dedede => (self.sentence_count, DEDEDE_MIN_SENTENCES),
            GameType::ScrambleHarder => (self.sentence_count, SCRAMBLE_HARDER_MIN_SENTENCES),
            GameType::TuneIn => (self.audio_card_count, TUNE_IN_MIN_AUDIO_CARDS),
        };
        Some(GateProgress { have, need })
    }
}
