//! Shared multiple-choice flow used by MadLibs, TuneIn and Dedede: a wrong
//! pick permanently disables that option and latches the first-try flag; the
//! correct pick ends the round.

use std::collections::HashSet;

use crate::error::EngineError;
use crate::play::RoundOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoiceEvent {
    /// Round complete. `first_try` is false if any wrong pick came first.
    Correct { first_try: bool },
    /// Option disabled, round continues.
    Wrong,
}

#[derive(Debug, Default)]
pub(crate) struct ChoiceState {
    disabled: HashSet<String>,
    was_wrong: bool,
    answered: bool,
}

impl ChoiceState {
    pub(crate) fn choose(
        &mut self,
        option: &str,
        correct: &str,
    ) -> Result<ChoiceEvent, EngineError> {
        if self.answered {
            return Err(EngineError::InvalidMove("round already answered"));
        }
        if self.disabled.contains(option) {
            return Err(EngineError::InvalidMove("option already disabled"));
        }
        if option == correct {
            self.answered = true;
            Ok(ChoiceEvent::Correct {
                first_try: !self.was_wrong,
            })
        } else {
            self.was_wrong = true;
            self.disabled.insert(option.to_string());
            Ok(ChoiceEvent::Wrong)
        }
    }

    pub(crate) fn is_disabled(&self, option: &str) -> bool {
        self.disabled.contains(option)
    }

    pub(crate) fn outcome(&self) -> Option<RoundOutcome> {
        self.answered.then_some(RoundOutcome {
            correct: !self.was_wrong,
        })
    }
}
