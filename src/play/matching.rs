use std::collections::HashSet;

use crate::error::EngineError;
use crate::models::MatchingRound;
use crate::play::RoundOutcome;

/// Result of a pair selection. Mismatches reset the selection (the UI
/// shakes); the round cannot be failed, so completion always scores true.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchEvent {
    /// One side selected, waiting for the other.
    Pending,
    /// Pair matched. `audio_path` is for fire-and-forget playback.
    Matched {
        pair: usize,
        audio_path: Option<String>,
        all_matched: bool,
    },
    /// Wrong pair; both selections reset.
    Mismatch { left: usize, right: usize },
}

/// Match-the-columns play state. Both sides are addressed by pair index;
/// shuffling the displayed right column is presentation.
pub struct MatchingPlay {
    round: MatchingRound,
    selected_left: Option<usize>,
    selected_right: Option<usize>,
    matched: HashSet<usize>,
}

impl MatchingPlay {
    pub fn new(round: MatchingRound) -> Self {
        Self {
            round,
            selected_left: None,
            selected_right: None,
            matched: HashSet::new(),
        }
    }

    pub fn round(&self) -> &MatchingRound {
        &self.round
    }

    pub fn is_matched(&self, pair: usize) -> bool {
        self.matched.contains(&pair)
    }

    pub fn pick_left(&mut self, pair: usize) -> Result<MatchEvent, EngineError> {
        self.validate(pair)?;
        self.selected_left = Some(pair);
        self.try_match()
    }

    pub fn pick_right(&mut self, pair: usize) -> Result<MatchEvent, EngineError> {
        self.validate(pair)?;
        self.selected_right = Some(pair);
        self.try_match()
    }

    fn validate(&self, pair: usize) -> Result<(), EngineError> {
        if pair >= self.round.pairs.len() {
            return Err(EngineError::InvalidMove("pair index out of range"));
        }
        if self.matched.contains(&pair) {
            return Err(EngineError::InvalidMove("pair already matched"));
        }
        Ok(())
    }

    fn try_match(&mut self) -> Result<MatchEvent, EngineError> {
        let (Some(left), Some(right)) = (self.selected_left, self.selected_right) else {
            return Ok(MatchEvent::Pending);
        };
        self.selected_left = None;
        self.selected_right = None;

        if left == right {
            self.matched.insert(left);
            Ok(MatchEvent::Matched {
                pair: left,
                audio_path: self.round.pairs[left].audio_path.clone(),
                all_matched: self.matched.len() == self.round.pairs.len(),
            })
        } else {
            Ok(MatchEvent::Mismatch { left, right })
        }
    }

    pub fn outcome(&self) -> Option<RoundOutcome> {
        (self.matched.len() == self.round.pairs.len()).then_some(RoundOutcome { correct: true })
    }
}
