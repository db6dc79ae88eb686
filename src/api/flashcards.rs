//! Flashcard and quiz endpoints.

use serde::Serialize;

use super::ApiClient;
use crate::error::ApiError;
use crate::models::{CardPatch, Flashcard, NewCard, QuizAnswer, QuizQuestion, QuizType};

#[derive(Serialize)]
struct QuizAnswerBody<'a> {
    card_id: i64,
    answer: &'a str,
    quiz_type: QuizType,
}

impl ApiClient {
    pub async fn get_cards(&self, active: Option<bool>) -> Result<Vec<Flashcard>, ApiError> {
        let path = match active {
            Some(flag) => format!("/flashcards?active={flag}"),
            None => "/flashcards".to_string(),
        };
        self.get_json(&path).await
    }

    pub async fn get_card(&self, id: i64) -> Result<Flashcard, ApiError> {
        self.get_json(&format!("/flashcards/{id}")).await
    }

    pub async fn post_card(&self, card: &NewCard) -> Result<Flashcard, ApiError> {
        self.post_json("/flashcards", card).await
    }

    pub async fn patch_card(&self, id: i64, patch: &CardPatch) -> Result<Flashcard, ApiError> {
        self.patch_json(&format!("/flashcards/{id}"), patch).await
    }

    pub async fn delete_card_by_id(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/flashcards/{id}")).await
    }

    pub async fn post_regenerate(&self, id: i64) -> Result<Flashcard, ApiError> {
        self.post_empty(&format!("/flashcards/{id}/regenerate"))
            .await
    }

    /// Fetch the next quiz question. A 404/204 from the service means no
    /// eligible card remains under `exclude` and maps to `Ok(None)`.
    pub async fn get_quiz(
        &self,
        quiz_type: Option<QuizType>,
        exclude: &[i64],
    ) -> Result<Option<QuizQuestion>, ApiError> {
        let mut params = Vec::new();
        if let Some(qt) = quiz_type {
            params.push(format!("quiz_type={}", qt.as_str()));
        }
        if !exclude.is_empty() {
            let csv = exclude
                .iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join(",");
            params.push(format!("exclude={csv}"));
        }
        let path = if params.is_empty() {
            "/flashcards/quiz".to_string()
        } else {
            format!("/flashcards/quiz?{}", params.join("&"))
        };
        self.get_json_opt(&path).await
    }

    pub async fn post_quiz_answer(
        &self,
        card_id: i64,
        answer: &str,
        quiz_type: QuizType,
    ) -> Result<QuizAnswer, ApiError> {
        let body = QuizAnswerBody {
            card_id,
            answer,
            quiz_type,
        };
        self.post_json("/flashcards/quiz/answer", &body).await
    }
}
