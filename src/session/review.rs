//! Flashcard quiz review sessions.
//!
//! Scoring is server-authoritative and single-shot: the controller never
//! judges an answer itself, and a submitted choice is final. A fetch that
//! yields no question is the "pool exhausted" sentinel and finishes the
//! session; it is never an error.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::api::{CardStore, RoundFetcher};
use crate::audio::{play_quiet, NullSink, SharedSink};
use crate::error::EngineError;
use crate::models::{CardPatch, QuizAnswer, QuizQuestion, QuizType, ReviewMode};
use crate::pool::CardPool;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewPhase {
    Idle,
    Loading,
    AwaitingAnswer,
    ShowingResult,
    Finished,
}

impl ReviewPhase {
    pub const fn name(self) -> &'static str {
        match self {
            ReviewPhase::Idle => "Idle",
            ReviewPhase::Loading => "Loading",
            ReviewPhase::AwaitingAnswer => "AwaitingAnswer",
            ReviewPhase::ShowingResult => "ShowingResult",
            ReviewPhase::Finished => "Finished",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReviewSession {
    pub mode: ReviewMode,
    /// Requested quiz direction; `None` lets the service pick per question.
    pub quiz_type: Option<QuizType>,
    pub answered: u32,
    pub correct: u32,
    /// Card ids answered so far, in order. Unique within a Fixed session;
    /// Endless permits repeats by design.
    pub seen: Vec<i64>,
    pub current: Option<QuizQuestion>,
    pub last_result: Option<QuizAnswer>,
}

impl ReviewSession {
    fn new(mode: ReviewMode, quiz_type: Option<QuizType>) -> Self {
        Self {
            mode,
            quiz_type,
            answered: 0,
            correct: 0,
            seen: Vec::new(),
            current: None,
            last_result: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewSummary {
    pub answered: u32,
    pub correct: u32,
    pub percent: u32,
}

struct Inner {
    epoch: u64,
    phase: ReviewPhase,
    session: Option<ReviewSession>,
}

pub struct ReviewSessionController<F> {
    fetcher: Arc<F>,
    pool: CardPool,
    audio: SharedSink,
    inner: Mutex<Inner>,
}

impl<F: RoundFetcher + CardStore> ReviewSessionController<F> {
    pub fn new(fetcher: Arc<F>, pool: CardPool) -> Self {
        Self {
            fetcher,
            pool,
            audio: Arc::new(NullSink),
            inner: Mutex::new(Inner {
                epoch: 0,
                phase: ReviewPhase::Idle,
                session: None,
            }),
        }
    }

    pub fn with_audio(mut self, sink: SharedSink) -> Self {
        self.audio = sink;
        self
    }

    pub fn phase(&self) -> ReviewPhase {
        self.inner.lock().phase
    }

    pub fn session(&self) -> Option<ReviewSession> {
        self.inner.lock().session.clone()
    }

    pub fn summary(&self) -> Option<ReviewSummary> {
        let inner = self.inner.lock();
        if inner.phase != ReviewPhase::Finished {
            return None;
        }
        inner.session.as_ref().map(|s| ReviewSummary {
            answered: s.answered,
            correct: s.correct,
            percent: if s.answered > 0 {
                (s.correct * 100 + s.answered / 2) / s.answered
            } else {
                0
            },
        })
    }

    /// Start a fresh session and load its first question. Supersedes any
    /// session already running. `quiz_type` pins the question direction for
    /// the whole session; `None` lets the service alternate.
    pub async fn start(&self, mode: ReviewMode, quiz_type: Option<QuizType>) {
        let epoch = {
            let mut inner = self.inner.lock();
            inner.epoch += 1;
            inner.session = Some(ReviewSession::new(mode, quiz_type));
            inner.phase = ReviewPhase::Loading;
            inner.epoch
        };
        debug!(?mode, ?quiz_type, "review session started");
        self.load_next(epoch).await;
    }

    /// Fetch the next question, or finish: a Fixed session that has reached
    /// its count, an exhausted pool, and a fetch failure all finish the
    /// session rather than erroring.
    async fn load_next(&self, epoch: u64) {
        let (quiz_type, exclude) = {
            let mut inner = self.inner.lock();
            if inner.epoch != epoch {
                return;
            }
            let Some(session) = inner.session.as_mut() else {
                return;
            };
            let exclude = if let ReviewMode::Fixed(n) = session.mode {
                if session.answered >= n {
                    session.current = None;
                    inner.phase = ReviewPhase::Finished;
                    debug!("review finished: fixed count reached");
                    return;
                }
                session.seen.clone()
            } else {
                // Endless drills with repeats: no exclusion on purpose.
                Vec::new()
            };
            (session.quiz_type, exclude)
        };

        let result = self.fetcher.fetch_quiz(quiz_type, &exclude).await;

        let mut inner = self.inner.lock();
        if inner.epoch != epoch {
            debug!("discarding stale quiz response");
            return;
        }
        let Some(session) = inner.session.as_mut() else {
            return;
        };
        match result {
            Ok(Some(question)) => {
                session.current = Some(question);
                session.last_result = None;
                inner.phase = ReviewPhase::AwaitingAnswer;
            }
            Ok(None) => {
                session.current = None;
                inner.phase = ReviewPhase::Finished;
                debug!("review finished: pool exhausted under exclusion");
            }
            Err(err) => {
                warn!(%err, "quiz fetch failed, finishing review");
                session.current = None;
                inner.phase = ReviewPhase::Finished;
            }
        }
    }

    /// Submit the chosen option. Server-checked and single-shot: the verdict
    /// is final whatever it says. A transport failure leaves the question
    /// answerable so the user may resubmit. Returns `None` when the session
    /// was superseded while the request was in flight.
    pub async fn submit_answer(&self, answer: &str) -> Result<Option<QuizAnswer>, EngineError> {
        let (epoch, question) = {
            let inner = self.inner.lock();
            if inner.phase != ReviewPhase::AwaitingAnswer {
                return Err(EngineError::Phase {
                    phase: inner.phase.name(),
                });
            }
            let question = inner
                .session
                .as_ref()
                .and_then(|s| s.current.clone())
                .ok_or(EngineError::Phase {
                    phase: inner.phase.name(),
                })?;
            (inner.epoch, question)
        };

        let verdict = self
            .fetcher
            .submit_quiz_answer(question.card_id, answer, question.quiz_type)
            .await?;

        let play_path = {
            let mut inner = self.inner.lock();
            if inner.epoch != epoch {
                debug!("discarding stale answer verdict");
                return Ok(None);
            }
            let Some(session) = inner.session.as_mut() else {
                return Ok(None);
            };
            session.answered += 1;
            if verdict.correct {
                session.correct += 1;
            }
            session.seen.push(question.card_id);
            session.last_result = Some(verdict.clone());
            inner.phase = ReviewPhase::ShowingResult;

            (verdict.correct && question.quiz_type == QuizType::ZhToEn)
                .then(|| question.audio_path.clone())
                .flatten()
        };

        if let Some(path) = play_path {
            play_quiet(self.audio.as_ref(), &path);
        }
        Ok(Some(verdict))
    }

    /// Clear the displayed verdict and move on.
    pub async fn next_question(&self) -> Result<(), EngineError> {
        let epoch = {
            let mut inner = self.inner.lock();
            if inner.phase != ReviewPhase::ShowingResult {
                return Err(EngineError::Phase {
                    phase: inner.phase.name(),
                });
            }
            if let Some(session) = inner.session.as_mut() {
                session.last_result = None;
                session.current = None;
            }
            inner.phase = ReviewPhase::Loading;
            inner.epoch += 1;
            inner.epoch
        };
        self.load_next(epoch).await;
        Ok(())
    }

    /// "I know this, shelve it": drop the card from the active pool and
    /// advance immediately. Allowed while a question or its result is
    /// showing. A failed deactivation leaves the session untouched.
    pub async fn deactivate_during_review(&self, card_id: i64) -> Result<(), EngineError> {
        let epoch = {
            let inner = self.inner.lock();
            match inner.phase {
                ReviewPhase::AwaitingAnswer | ReviewPhase::ShowingResult => {}
                other => {
                    return Err(EngineError::Phase { phase: other.name() });
                }
            }
            inner.epoch
        };

        self.fetcher
            .update_card(card_id, &CardPatch::set_active(false))
            .await
            .map_err(EngineError::Api)?;
        self.pool.set_active(card_id, false);
        debug!(card_id, "card shelved during review");

        let next_epoch = {
            let mut inner = self.inner.lock();
            if inner.epoch != epoch {
                return Ok(());
            }
            if let Some(session) = inner.session.as_mut() {
                session.current = None;
                session.last_result = None;
            }
            inner.phase = ReviewPhase::Loading;
            inner.epoch += 1;
            inner.epoch
        };
        self.load_next(next_epoch).await;
        Ok(())
    }

    /// Discard the session. Any in-flight fetch lands stale and is dropped.
    pub fn end(&self) {
        let mut inner = self.inner.lock();
        inner.epoch += 1;
        inner.session = None;
        inner.phase = ReviewPhase::Idle;
        debug!("review session ended");
    }
}
