use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A vocabulary card as served by the backing service. `notes`, `audio_path`
/// and `image_path` may lag behind creation while assets are generated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flashcard {
    pub id: i64,
    pub chinese: String,
    pub pinyin: String,
    pub english: String,
    pub notes: Option<String>,
    pub audio_path: Option<String>,
    pub image_path: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub source: String,
}

impl Flashcard {
    /// True while notes or audio are still being generated server-side.
    pub fn assets_pending(&self) -> bool {
        self.notes.is_none() || self.audio_path.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizType {
    EnToZh,
    ZhToEn,
}

impl QuizType {
    pub fn as_str(self) -> &'static str {
        match self {
            QuizType::EnToZh => "en_to_zh",
            QuizType::ZhToEn => "zh_to_en",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QuizQuestion {
    pub card_id: i64,
    pub quiz_type: QuizType,
    pub prompt: String,
    pub pinyin: Option<String>,
    pub options: Vec<String>,
    #[serde(default)]
    pub audio_path: Option<String>,
    #[serde(default)]
    pub image_path: Option<String>,
}

/// Server verdict on a submitted quiz answer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QuizAnswer {
    pub correct: bool,
    pub correct_answer: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewCard {
    pub chinese: String,
    pub english: String,
    pub pinyin: String,
}

/// Partial update for PATCH /flashcards/{id}. Absent fields are left alone.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CardPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chinese: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pinyin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub english: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

impl CardPatch {
    pub fn set_active(active: bool) -> Self {
        Self {
            active: Some(active),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewMode {
    Fixed(u32),
    Endless,
}

impl ReviewMode {
    /// Number of questions remaining before the session is done, if bounded.
    pub fn remaining(self, answered: u32) -> Option<u32> {
        match self {
            ReviewMode::Fixed(n) => Some(n.saturating_sub(answered)),
            ReviewMode::Endless => None,
        }
    }
}
