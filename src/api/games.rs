//! Game round and unlock-counter endpoints.

use serde::Deserialize;

use super::ApiClient;
use crate::error::ApiError;
use crate::models::{GameRound, GameType};

#[derive(Deserialize)]
struct CountBody {
    count: u32,
}

impl ApiClient {
    pub async fn get_round(&self, game_type: GameType, level: u8) -> Result<GameRound, ApiError> {
        let path = format!("/games/{}?level={level}", game_type.endpoint());
        let round = match game_type {
            GameType::Matching => GameRound::Matching(self.get_json(&path).await?),
            GameType::MadLibs => GameRound::MadLibs(self.get_json(&path).await?),
            GameType::Scrambler => GameRound::Scrambler(self.get_json(&path).await?),
            GameType::ScrambleHarder => GameRound::ScrambleHarder(self.get_json(&path).await?),
            GameType::TuneIn => GameRound::TuneIn(self.get_json(&path).await?),
            GameType::Dedede => GameRound::Dedede(self.get_json(&path).await?),
        };
        Ok(round)
    }

    pub async fn get_sentence_count(&self, level: u8) -> Result<u32, ApiError> {
        let body: CountBody = self
            .get_json(&format!("/games/sentence-count?level={level}"))
            .await?;
        Ok(body.count)
    }

    pub async fn get_audio_card_count(&self) -> Result<u32, ApiError> {
        let body: CountBody = self.get_json("/games/audio-card-count").await?;
        Ok(body.count)
    }
}
