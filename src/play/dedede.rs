use super::choice::{ChoiceEvent, ChoiceState};
use crate::error::EngineError;
use crate::models::DededeRound;
use crate::play::RoundOutcome;

/// The closed option set: the three homophone particles.
pub const PARTICLES: [&str; 3] = ["的", "得", "地"];

/// Pick the particle that completes the sentence.
pub struct DededePlay {
    round: DededeRound,
    state: ChoiceState,
}

impl DededePlay {
    pub fn new(round: DededeRound) -> Self {
        Self {
            round,
            state: ChoiceState::default(),
        }
    }

    pub fn round(&self) -> &DededeRound {
        &self.round
    }

    pub fn choose(&mut self, option: &str) -> Result<ChoiceEvent, EngineError> {
        if !PARTICLES.contains(&option) {
            return Err(EngineError::InvalidMove("not one of 的/得/地"));
        }
        self.state.choose(option, &self.round.answer)
    }

    pub fn is_disabled(&self, option: &str) -> bool {
        self.state.is_disabled(option)
    }

    pub fn display_sentence(&self) -> String {
        if self.state.outcome().is_some() {
            self.round.sentence.replace("____", &self.round.answer)
        } else {
            self.round.sentence.clone()
        }
    }

    pub fn outcome(&self) -> Option<RoundOutcome> {
        self.state.outcome()
    }
}
