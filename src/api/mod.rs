//! HTTP client for the backing service, plus the traits the session
//! controllers consume so tests can substitute scripted fetchers.

pub mod flashcards;
pub mod games;

use std::future::Future;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::EngineConfig;
use crate::error::ApiError;
use crate::models::{
    CardPatch, Flashcard, GameRound, GameType, NewCard, QuizAnswer, QuizQuestion, QuizType,
};

/// Round-level retrieval and checking. The flashcard quiz is the only
/// server-checked operation (`submit_quiz_answer`); the six game round types
/// are fetched here and checked client-side by the `play` state machines.
#[allow(async_fn_in_trait)]
pub trait RoundFetcher: Send + Sync {
    /// `Ok(None)` means the pool is exhausted under the exclusion set. That
    /// is the normal end-of-review sentinel, never an error.
    fn fetch_quiz(
        &self,
        quiz_type: Option<QuizType>,
        exclude: &[i64],
    ) -> impl Future<Output = Result<Option<QuizQuestion>, ApiError>> + Send;

    fn submit_quiz_answer(
        &self,
        card_id: i64,
        answer: &str,
        quiz_type: QuizType,
    ) -> impl Future<Output = Result<QuizAnswer, ApiError>> + Send;

    fn fetch_round(
        &self,
        game_type: GameType,
        level: u8,
    ) -> impl Future<Output = Result<GameRound, ApiError>> + Send;

    fn sentence_count(&self, level: u8) -> impl Future<Output = Result<u32, ApiError>> + Send;

    fn audio_card_count(&self) -> impl Future<Output = Result<u32, ApiError>> + Send;
}

/// Card CRUD surface. Persistence lives server-side; this is only the wire.
#[allow(async_fn_in_trait)]
pub trait CardStore: Send + Sync {
    fn list_cards(
        &self,
        active: Option<bool>,
    ) -> impl Future<Output = Result<Vec<Flashcard>, ApiError>> + Send;

    fn fetch_card(&self, id: i64) -> impl Future<Output = Result<Flashcard, ApiError>> + Send;

    fn create_card(&self, card: &NewCard)
        -> impl Future<Output = Result<Flashcard, ApiError>> + Send;

    fn update_card(
        &self,
        id: i64,
        patch: &CardPatch,
    ) -> impl Future<Output = Result<Flashcard, ApiError>> + Send;

    fn delete_card(&self, id: i64) -> impl Future<Output = Result<(), ApiError>> + Send;

    fn regenerate_card(&self, id: i64)
        -> impl Future<Output = Result<Flashcard, ApiError>> + Send;
}

/// reqwest-backed client for the service contract. Token handling is
/// pass-through; the embedding app owns auth.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    bearer_token: Option<String>,
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(config: &EngineConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            bearer_token: config.bearer_token.clone(),
            client,
        }
    }

    pub fn from_env() -> Self {
        Self::new(&EngineConfig::from_env())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let mut builder = self.client.request(method, self.url(path));
        if let Some(token) = &self.bearer_token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ApiError> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::HttpStatus { status, body });
        }
        let bytes = resp.bytes().await?;
        match serde_json::from_slice(&bytes) {
            Ok(value) => Ok(value),
            Err(err) => {
                let body = String::from_utf8_lossy(&bytes);
                tracing::error!(%err, %body, "failed to parse service response");
                Err(ApiError::Json(err))
            }
        }
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let resp = self.request(reqwest::Method::GET, path).send().await?;
        Self::decode(resp).await
    }

    /// GET that treats 404 and 204 as "nothing available" instead of errors.
    pub(crate) async fn get_json_opt<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<Option<T>, ApiError> {
        let resp = self.request(reqwest::Method::GET, path).send().await?;
        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND || status == reqwest::StatusCode::NO_CONTENT {
            return Ok(None);
        }
        Self::decode(resp).await.map(Some)
    }

    pub(crate) async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let resp = self
            .request(reqwest::Method::POST, path)
            .json(body)
            .send()
            .await?;
        Self::decode(resp).await
    }

    pub(crate) async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let resp = self.request(reqwest::Method::POST, path).send().await?;
        Self::decode(resp).await
    }

    pub(crate) async fn patch_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let resp = self
            .request(reqwest::Method::PATCH, path)
            .json(body)
            .send()
            .await?;
        Self::decode(resp).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let resp = self.request(reqwest::Method::DELETE, path).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::HttpStatus { status, body });
        }
        Ok(())
    }
}

impl RoundFetcher for ApiClient {
    async fn fetch_quiz(
        &self,
        quiz_type: Option<QuizType>,
        exclude: &[i64],
    ) -> Result<Option<QuizQuestion>, ApiError> {
        self.get_quiz(quiz_type, exclude).await
    }

    async fn submit_quiz_answer(
        &self,
        card_id: i64,
        answer: &str,
        quiz_type: QuizType,
    ) -> Result<QuizAnswer, ApiError> {
        self.post_quiz_answer(card_id, answer, quiz_type).await
    }

    async fn fetch_round(&self, game_type: GameType, level: u8) -> Result<GameRound, ApiError> {
        self.get_round(game_type, level).await
    }

    async fn sentence_count(&self, level: u8) -> Result<u32, ApiError> {
        self.get_sentence_count(level).await
    }

    async fn audio_card_count(&self) -> Result<u32, ApiError> {
        self.get_audio_card_count().await
    }
}

impl CardStore for ApiClient {
    async fn list_cards(&self, active: Option<bool>) -> Result<Vec<Flashcard>, ApiError> {
        self.get_cards(active).await
    }

    async fn fetch_card(&self, id: i64) -> Result<Flashcard, ApiError> {
        self.get_card(id).await
    }

    async fn create_card(&self, card: &NewCard) -> Result<Flashcard, ApiError> {
        self.post_card(card).await
    }

    async fn update_card(&self, id: i64, patch: &CardPatch) -> Result<Flashcard, ApiError> {
        self.patch_card(id, patch).await
    }

    async fn delete_card(&self, id: i64) -> Result<(), ApiError> {
        self.delete_card_by_id(id).await
    }

    async fn regenerate_card(&self, id: i64) -> Result<Flashcard, ApiError> {
        self.post_regenerate(id).await
    }
}
