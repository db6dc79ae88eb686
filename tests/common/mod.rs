#![allow(dead_code)]

//! Scripted stand-in for the backing service, plus fixtures.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::Utc;
use parking_lot::Mutex;
use tokio::sync::Notify;

use lianxi_engine::api::{CardStore, RoundFetcher};
use lianxi_engine::error::ApiError;
use lianxi_engine::models::{
    CardPatch, Flashcard, GameRound, GameType, MadLibsRound, MatchingPair, MatchingRound, NewCard,
    QuizAnswer, QuizQuestion, QuizType,
};

/// Responses are consumed front-to-back from per-endpoint queues. Optional
/// gates let a test hold a request in flight to provoke staleness.
#[derive(Default)]
pub struct MockApi {
    pub quiz_queue: Mutex<VecDeque<Result<Option<QuizQuestion>, ApiError>>>,
    pub answer_queue: Mutex<VecDeque<Result<QuizAnswer, ApiError>>>,
    pub round_queue: Mutex<VecDeque<Result<GameRound, ApiError>>>,
    pub card_queue: Mutex<VecDeque<Result<Flashcard, ApiError>>>,
    pub list_queue: Mutex<VecDeque<Result<Vec<Flashcard>, ApiError>>>,
    pub sentence_queue: Mutex<VecDeque<Result<u32, ApiError>>>,
    pub audio_queue: Mutex<VecDeque<Result<u32, ApiError>>>,

    /// When set, `fetch_card` serves this after the queue runs dry.
    pub fallback_card: Mutex<Option<Flashcard>>,

    pub quiz_excludes: Mutex<Vec<Vec<i64>>>,
    pub quiz_types: Mutex<Vec<Option<QuizType>>>,
    pub patches: Mutex<Vec<(i64, CardPatch)>>,
    pub fetch_card_calls: AtomicUsize,
    pub round_fetches: AtomicUsize,

    pub quiz_gate: Mutex<Option<Arc<Notify>>>,
    pub round_gate: Mutex<Option<Arc<Notify>>>,
}

impl MockApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push_quiz(&self, response: Result<Option<QuizQuestion>, ApiError>) {
        self.quiz_queue.lock().push_back(response);
    }

    pub fn push_answer(&self, response: Result<QuizAnswer, ApiError>) {
        self.answer_queue.lock().push_back(response);
    }

    pub fn push_round(&self, response: Result<GameRound, ApiError>) {
        self.round_queue.lock().push_back(response);
    }

    pub fn push_card(&self, response: Result<Flashcard, ApiError>) {
        self.card_queue.lock().push_back(response);
    }

    pub fn fetch_card_count(&self) -> usize {
        self.fetch_card_calls.load(Ordering::SeqCst)
    }

    pub fn quiz_fetch_count(&self) -> usize {
        self.quiz_excludes.lock().len()
    }
}

impl RoundFetcher for MockApi {
    async fn fetch_quiz(
        &self,
        quiz_type: Option<QuizType>,
        exclude: &[i64],
    ) -> Result<Option<QuizQuestion>, ApiError> {
        self.quiz_excludes.lock().push(exclude.to_vec());
        self.quiz_types.lock().push(quiz_type);
        let gate = self.quiz_gate.lock().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        self.quiz_queue.lock().pop_front().unwrap_or(Ok(None))
    }

    async fn submit_quiz_answer(
        &self,
        _card_id: i64,
        _answer: &str,
        _quiz_type: QuizType,
    ) -> Result<QuizAnswer, ApiError> {
        self.answer_queue
            .lock()
            .pop_front()
            .unwrap_or_else(|| Ok(verdict(true)))
    }

    async fn fetch_round(&self, _game_type: GameType, _level: u8) -> Result<GameRound, ApiError> {
        self.round_fetches.fetch_add(1, Ordering::SeqCst);
        let gate = self.round_gate.lock().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        self.round_queue
            .lock()
            .pop_front()
            .unwrap_or_else(|| Ok(matching_round()))
    }

    async fn sentence_count(&self, _level: u8) -> Result<u32, ApiError> {
        self.sentence_queue.lock().pop_front().unwrap_or(Ok(0))
    }

    async fn audio_card_count(&self) -> Result<u32, ApiError> {
        self.audio_queue.lock().pop_front().unwrap_or(Ok(0))
    }
}

impl CardStore for MockApi {
    async fn list_cards(&self, _active: Option<bool>) -> Result<Vec<Flashcard>, ApiError> {
        self.list_queue.lock().pop_front().unwrap_or(Ok(Vec::new()))
    }

    async fn fetch_card(&self, id: i64) -> Result<Flashcard, ApiError> {
        self.fetch_card_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(response) = self.card_queue.lock().pop_front() {
            return response;
        }
        match self.fallback_card.lock().clone() {
            Some(card) => Ok(card),
            None => Err(http_error(format!("no scripted card {id}"))),
        }
    }

    async fn create_card(&self, card: &NewCard) -> Result<Flashcard, ApiError> {
        self.card_queue.lock().pop_front().unwrap_or_else(|| {
            let mut created = pending_card(1);
            created.chinese = card.chinese.clone();
            created.english = card.english.clone();
            Ok(created)
        })
    }

    async fn update_card(&self, id: i64, patch: &CardPatch) -> Result<Flashcard, ApiError> {
        self.patches.lock().push((id, patch.clone()));
        let mut card = pending_card(id);
        if let Some(active) = patch.active {
            card.active = active;
        }
        Ok(card)
    }

    async fn delete_card(&self, _id: i64) -> Result<(), ApiError> {
        Ok(())
    }

    async fn regenerate_card(&self, id: i64) -> Result<Flashcard, ApiError> {
        self.card_queue
            .lock()
            .pop_front()
            .unwrap_or_else(|| Ok(pending_card(id)))
    }
}

pub fn http_error(body: impl Into<String>) -> ApiError {
    ApiError::HttpStatus {
        status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
        body: body.into(),
    }
}

/// A card fresh from creation: notes and audio still pending.
pub fn pending_card(id: i64) -> Flashcard {
    Flashcard {
        id,
        chinese: "猫".into(),
        pinyin: "māo".into(),
        english: "cat".into(),
        notes: None,
        audio_path: None,
        image_path: None,
        active: true,
        created_at: Utc::now(),
        source: "manual".into(),
    }
}

pub fn notes_only_card(id: i64) -> Flashcard {
    Flashcard {
        notes: Some("usage notes".into()),
        ..pending_card(id)
    }
}

pub fn ready_card(id: i64) -> Flashcard {
    Flashcard {
        notes: Some("usage notes".into()),
        audio_path: Some(format!("audio/{id}.mp3")),
        ..pending_card(id)
    }
}

pub fn question(card_id: i64) -> QuizQuestion {
    QuizQuestion {
        card_id,
        quiz_type: QuizType::ZhToEn,
        prompt: "猫".into(),
        pinyin: Some("māo".into()),
        options: vec!["cat".into(), "dog".into(), "fish".into(), "bird".into()],
        audio_path: None,
        image_path: None,
    }
}

pub fn verdict(correct: bool) -> QuizAnswer {
    QuizAnswer {
        correct,
        correct_answer: "cat".into(),
    }
}

pub fn matching_round() -> GameRound {
    GameRound::Matching(MatchingRound {
        pairs: vec![
            MatchingPair {
                chinese: "猫".into(),
                pinyin: "māo".into(),
                english: "cat".into(),
                audio_path: None,
            },
            MatchingPair {
                chinese: "狗".into(),
                pinyin: "gǒu".into(),
                english: "dog".into(),
                audio_path: None,
            },
        ],
    })
}

pub fn madlibs_round(rate_limited: bool) -> GameRound {
    GameRound::MadLibs(MadLibsRound {
        sentence_zh: "我想____茶。".into(),
        sentence_en: "I want to drink tea.".into(),
        pinyin_sentence: "wǒ xiǎng ____ chá".into(),
        vocab_word: "喝".into(),
        options: vec!["喝".into(), "吃".into(), "看".into(), "说".into()],
        rate_limited,
    })
}
