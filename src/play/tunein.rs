use super::choice::{ChoiceEvent, ChoiceState};
use crate::error::EngineError;
use crate::models::TuneInRound;
use crate::play::RoundOutcome;

/// Listen-and-pick: no text prompt, the audio clip is the whole question.
pub struct TuneInPlay {
    round: TuneInRound,
    state: ChoiceState,
}

impl TuneInPlay {
    pub fn new(round: TuneInRound) -> Self {
        Self {
            round,
            state: ChoiceState::default(),
        }
    }

    pub fn round(&self) -> &TuneInRound {
        &self.round
    }

    /// Path of the prompt clip; replays are free and unscored.
    pub fn audio_path(&self) -> &str {
        &self.round.audio_path
    }

    pub fn choose(&mut self, option: &str) -> Result<ChoiceEvent, EngineError> {
        if !self.round.options.iter().any(|o| o == option) {
            return Err(EngineError::InvalidMove("option not in this round"));
        }
        self.state.choose(option, &self.round.correct)
    }

    pub fn is_disabled(&self, option: &str) -> bool {
        self.state.is_disabled(option)
    }

    pub fn outcome(&self) -> Option<RoundOutcome> {
        self.state.outcome()
    }
}
