use super::choice::{ChoiceEvent, ChoiceState};
use crate::error::EngineError;
use crate::models::MadLibsRound;
use crate::play::RoundOutcome;

/// Fill-in-the-blank: pick the vocab word that completes the sentence.
pub struct MadLibsPlay {
    round: MadLibsRound,
    state: ChoiceState,
}

impl MadLibsPlay {
    pub fn new(round: MadLibsRound) -> Self {
        Self {
            round,
            state: ChoiceState::default(),
        }
    }

    pub fn round(&self) -> &MadLibsRound {
        &self.round
    }

    pub fn choose(&mut self, option: &str) -> Result<ChoiceEvent, EngineError> {
        if !self.round.options.iter().any(|o| o == option) {
            return Err(EngineError::InvalidMove("option not in this round"));
        }
        self.state.choose(option, &self.round.vocab_word)
    }

    pub fn is_disabled(&self, option: &str) -> bool {
        self.state.is_disabled(option)
    }

    /// The sentence with the blank filled once answered.
    pub fn display_sentence(&self) -> String {
        if self.state.outcome().is_some() {
            self.round
                .sentence_zh
                .replace("____", &self.round.vocab_word)
        } else {
            self.round.sentence_zh.clone()
        }
    }

    pub fn outcome(&self) -> Option<RoundOutcome> {
        self.state.outcome()
    }
}
