use crate::error::EngineError;
use crate::models::{ScrambleHarderRound, ScramblerRound};
use crate::play::RoundOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckResult {
    /// Sequence matched. `first_try` is false after any earlier wrong check.
    Solved { first_try: bool },
    /// Wrong sequence; all placements were cleared, re-placement is open.
    Cleared,
}

/// Word-order play state shared by Scrambler and ScrambleHarder. The bank
/// may hold decoys: only `required` placements are accepted and compared
/// against `correct_order`.
pub struct ScramblePlay {
    words: Vec<String>,
    correct_order: Vec<String>,
    required: usize,
    placed: Vec<usize>,
    was_wrong: bool,
    solved: bool,
}

impl ScramblePlay {
    pub fn from_scrambler(round: ScramblerRound) -> Self {
        let required = round.correct_order.len();
        Self {
            words: round.words,
            correct_order: round.correct_order,
            required,
            placed: Vec::new(),
            was_wrong: false,
            solved: false,
        }
    }

    pub fn from_scramble_harder(round: ScrambleHarderRound) -> Self {
        Self {
            words: round.words,
            correct_order: round.correct_order,
            required: round.num_correct,
            placed: Vec::new(),
            was_wrong: false,
            solved: false,
        }
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn required(&self) -> usize {
        self.required
    }

    /// Bank indices currently placed, in placement order.
    pub fn placed(&self) -> &[usize] {
        &self.placed
    }

    pub fn is_placed(&self, bank_idx: usize) -> bool {
        self.placed.contains(&bank_idx)
    }

    pub fn all_placed(&self) -> bool {
        self.placed.len() == self.required
    }

    pub fn place(&mut self, bank_idx: usize) -> Result<(), EngineError> {
        if self.solved {
            return Err(EngineError::InvalidMove("round already solved"));
        }
        if bank_idx >= self.words.len() {
            return Err(EngineError::InvalidMove("bank index out of range"));
        }
        if self.is_placed(bank_idx) {
            return Err(EngineError::InvalidMove("word already placed"));
        }
        if self.all_placed() {
            return Err(EngineError::InvalidMove("all slots filled"));
        }
        self.placed.push(bank_idx);
        Ok(())
    }

    pub fn remove(&mut self, position: usize) -> Result<(), EngineError> {
        if self.solved {
            return Err(EngineError::InvalidMove("round already solved"));
        }
        if position >= self.placed.len() {
            return Err(EngineError::InvalidMove("position out of range"));
        }
        self.placed.remove(position);
        Ok(())
    }

    pub fn clear(&mut self) {
        if !self.solved {
            self.placed.clear();
        }
    }

    /// Check the full placed sequence. Only callable once every slot is
    /// filled; a wrong check clears all placements and latches the flag.
    pub fn check(&mut self) -> Result<CheckResult, EngineError> {
        if self.solved {
            return Err(EngineError::InvalidMove("round already solved"));
        }
        if !self.all_placed() {
            return Err(EngineError::InvalidMove("not all slots filled"));
        }

        let attempt: Vec<&str> = self
            .placed
            .iter()
            .map(|&i| self.words[i].as_str())
            .collect();
        let target: Vec<&str> = self.correct_order.iter().map(String::as_str).collect();

        if attempt == target {
            self.solved = true;
            Ok(CheckResult::Solved {
                first_try: !self.was_wrong,
            })
        } else {
            self.was_wrong = true;
            self.placed.clear();
            Ok(CheckResult::Cleared)
        }
    }

    pub fn outcome(&self) -> Option<RoundOutcome> {
        self.solved.then_some(RoundOutcome {
            correct: !self.was_wrong,
        })
    }
}
