//! Multi-round game sessions.
//!
//! The round-type sequence is drawn once at start and never changes, even
//! if gate state moves later. Rounds themselves are checked client-side by
//! the `play` machines; `complete_round` only does the accounting.

use std::sync::Arc;

use parking_lot::Mutex;
use rand::Rng;
use tracing::{debug, info, warn};

use crate::api::RoundFetcher;
use crate::error::EngineError;
use crate::models::{GameRound, GameSelector, GameType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Idle,
    LoadingRound,
    InRound,
    /// Round fetch failed; the error is surfaced inline and the user may
    /// retry. The session does not auto-advance.
    RoundFailed,
    Complete,
}

impl GamePhase {
    pub const fn name(self) -> &'static str {
        match self {
            GamePhase::Idle => "Idle",
            GamePhase::LoadingRound => "LoadingRound",
            GamePhase::InRound => "InRound",
            GamePhase::RoundFailed => "RoundFailed",
            GamePhase::Complete => "Complete",
        }
    }
}

#[derive(Debug, Clone)]
pub struct GameSession {
    pub hsk_level: u8,
    pub total_rounds: u32,
    pub selector: GameSelector,
    pub current_round: u32,
    pub score: u32,
    /// Concrete type per slot, fixed at creation.
    pub sequence: Vec<GameType>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSummary {
    pub score: u32,
    pub total_rounds: u32,
    pub percent: u32,
}

/// What `complete_round` hands back.
#[derive(Debug, Clone, PartialEq)]
pub enum RoundAdvance {
    /// Next round fetched and ready.
    Next(GameRound),
    /// That was the last round.
    Complete(GameSummary),
    /// The session was superseded (ended/restarted) mid-fetch; nothing to do.
    Superseded,
}

struct Inner {
    epoch: u64,
    phase: GamePhase,
    session: Option<GameSession>,
    current: Option<GameRound>,
    last_round_error: Option<String>,
}

pub struct GameSessionController<F> {
    fetcher: Arc<F>,
    inner: Mutex<Inner>,
}

impl<F: RoundFetcher> GameSessionController<F> {
    pub fn new(fetcher: Arc<F>) -> Self {
        Self {
            fetcher,
            inner: Mutex::new(Inner {
                epoch: 0,
                phase: GamePhase::Idle,
                session: None,
                current: None,
                last_round_error: None,
            }),
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.inner.lock().phase
    }

    pub fn session(&self) -> Option<GameSession> {
        self.inner.lock().session.clone()
    }

    pub fn current_round_data(&self) -> Option<GameRound> {
        self.inner.lock().current.clone()
    }

    pub fn last_round_error(&self) -> Option<String> {
        self.inner.lock().last_round_error.clone()
    }

    pub fn summary(&self) -> Option<GameSummary> {
        let inner = self.inner.lock();
        if inner.phase != GamePhase::Complete {
            return None;
        }
        inner.session.as_ref().map(summarize)
    }

    /// Start a session and fetch round 0. `excluded` is the locked set from
    /// the gate at start time: it is removed from random sampling and
    /// rejected for direct selection.
    pub async fn start(
        &self,
        selector: GameSelector,
        excluded: &[GameType],
        hsk_level: u8,
        total_rounds: u32,
    ) -> Result<Option<GameRound>, EngineError> {
        if total_rounds == 0 {
            return Err(EngineError::InvalidMove("total_rounds must be positive"));
        }
        let sequence = build_sequence(selector, excluded, total_rounds)?;

        let epoch = {
            let mut inner = self.inner.lock();
            inner.epoch += 1;
            inner.session = Some(GameSession {
                hsk_level,
                total_rounds,
                selector,
                current_round: 0,
                score: 0,
                sequence,
            });
            inner.current = None;
            inner.last_round_error = None;
            inner.phase = GamePhase::LoadingRound;
            inner.epoch
        };
        debug!(?selector, hsk_level, total_rounds, "game session started");
        self.load_round(epoch).await
    }

    /// Fetch the round for the current slot. `Ok(None)` means the response
    /// landed after the session was superseded and was discarded.
    async fn load_round(&self, epoch: u64) -> Result<Option<GameRound>, EngineError> {
        let (game_type, level) = {
            let inner = self.inner.lock();
            if inner.epoch != epoch {
                return Ok(None);
            }
            let session = inner.session.as_ref().ok_or(EngineError::Phase {
                phase: inner.phase.name(),
            })?;
            let slot = session.current_round as usize;
            let game_type = *session.sequence.get(slot).ok_or(EngineError::Phase {
                phase: inner.phase.name(),
            })?;
            (game_type, session.hsk_level)
        };

        let result = self.fetcher.fetch_round(game_type, level).await;

        let mut inner = self.inner.lock();
        if inner.epoch != epoch {
            debug!("discarding stale round response");
            return Ok(None);
        }
        match result {
            Ok(round) => {
                if round.rate_limited() {
                    // Degraded generated content; a notice, never an error.
                    info!("round content rate-limited upstream, using cached material");
                }
                inner.current = Some(round.clone());
                inner.last_round_error = None;
                inner.phase = GamePhase::InRound;
                Ok(Some(round))
            }
            Err(err) => {
                warn!(%err, ?game_type, "round fetch failed");
                inner.current = None;
                inner.last_round_error = Some(err.to_string());
                inner.phase = GamePhase::RoundFailed;
                Err(EngineError::Api(err))
            }
        }
    }

    /// Refetch the current slot after a failed load.
    pub async fn retry_round(&self) -> Result<Option<GameRound>, EngineError> {
        let epoch = {
            let mut inner = self.inner.lock();
            if inner.phase != GamePhase::RoundFailed {
                return Err(EngineError::Phase {
                    phase: inner.phase.name(),
                });
            }
            inner.phase = GamePhase::LoadingRound;
            inner.epoch += 1;
            inner.epoch
        };
        self.load_round(epoch).await
    }

    /// Record the round outcome and advance. Score moves only on `correct`;
    /// the round index always moves. Fetches the next round unless this was
    /// the last slot.
    pub async fn complete_round(&self, correct: bool) -> Result<RoundAdvance, EngineError> {
        let epoch = {
            let mut inner = self.inner.lock();
            if inner.phase != GamePhase::InRound {
                return Err(EngineError::Phase {
                    phase: inner.phase.name(),
                });
            }
            let Some(session) = inner.session.as_mut() else {
                return Err(EngineError::Phase {
                    phase: inner.phase.name(),
                });
            };
            session.current_round += 1;
            if correct {
                session.score += 1;
            }
            let finished = session.current_round == session.total_rounds;
            let summary = finished.then(|| summarize(session));

            inner.current = None;
            if let Some(summary) = summary {
                inner.phase = GamePhase::Complete;
                debug!(?summary, "game session complete");
                return Ok(RoundAdvance::Complete(summary));
            }
            inner.phase = GamePhase::LoadingRound;
            inner.epoch += 1;
            inner.epoch
        };

        match self.load_round(epoch).await? {
            Some(round) => Ok(RoundAdvance::Next(round)),
            None => Ok(RoundAdvance::Superseded),
        }
    }

    /// Discard the session. In-flight fetches land stale and are dropped.
    pub fn end(&self) {
        let mut inner = self.inner.lock();
        inner.epoch += 1;
        inner.session = None;
        inner.current = None;
        inner.last_round_error = None;
        inner.phase = GamePhase::Idle;
        debug!("game session ended");
    }
}

fn summarize(session: &GameSession) -> GameSummary {
    GameSummary {
        score: session.score,
        total_rounds: session.total_rounds,
        percent: if session.total_rounds > 0 {
            (session.score * 100 + session.total_rounds / 2) / session.total_rounds
        } else {
            0
        },
    }
}

/// Draw the full round-type sequence up front. For `Random`, every slot is
/// an independent uniform draw from the catalog minus the locked set.
fn build_sequence(
    selector: GameSelector,
    excluded: &[GameType],
    total_rounds: u32,
) -> Result<Vec<GameType>, EngineError> {
    match selector {
        GameSelector::Fixed(game_type) => {
            if excluded.contains(&game_type) {
                return Err(EngineError::InvalidMove("game type is locked"));
            }
            Ok(vec![game_type; total_rounds as usize])
        }
        GameSelector::Random => {
            let catalog: Vec<GameType> = GameType::ALL
                .into_iter()
                .filter(|t| !excluded.contains(t))
                .collect();
            if catalog.is_empty() {
                return Err(EngineError::EmptyCatalog);
            }
            let mut rng = rand::rng();
            Ok((0..total_rounds)
                .map(|_| catalog[rng.random_range(0..catalog.len())])
                .collect())
        }
    }
}
