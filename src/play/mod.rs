//! Client-side play state, one machine per round type.
//!
//! All six game round types are checked client-side with first-try-only
//! scoring: the round may allow retries, but any wrong attempt latches a
//! flag and the eventual completion reports `correct = false`. Matching is
//! the exception by construction; mismatches reset and the round always
//! completes correct. The flag never outlives its round.

mod choice;
pub mod dedede;
pub mod madlibs;
pub mod matching;
pub mod scramble;
pub mod tunein;

pub use dedede::DededePlay;
pub use madlibs::MadLibsPlay;
pub use matching::{MatchEvent, MatchingPlay};
pub use scramble::{CheckResult, ScramblePlay};
pub use tunein::TuneInPlay;

pub use choice::ChoiceEvent;

use crate::models::GameRound;

/// What a finished round reports to `GameSessionController::complete_round`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundOutcome {
    pub correct: bool,
}

/// A fetched round wrapped in its play machine, ready for the UI to drive.
pub enum RoundPlay {
    Matching(MatchingPlay),
    MadLibs(MadLibsPlay),
    Scramble(ScramblePlay),
    TuneIn(TuneInPlay),
    Dedede(DededePlay),
}

impl RoundPlay {
    /// The outcome once the round is complete, `None` while still playing.
    pub fn outcome(&self) -> Option<RoundOutcome> {
        match self {
            RoundPlay::Matching(p) => p.outcome(),
            RoundPlay::MadLibs(p) => p.outcome(),
            RoundPlay::Scramble(p) => p.outcome(),
            RoundPlay::TuneIn(p) => p.outcome(),
            RoundPlay::Dedede(p) => p.outcome(),
        }
    }
}

impl GameRound {
    pub fn into_play(self) -> RoundPlay {
        match self {
            GameRound::Matching(r) => RoundPlay::Matching(MatchingPlay::new(r)),
            GameRound::MadLibs(r) => RoundPlay::MadLibs(MadLibsPlay::new(r)),
            GameRound::Scrambler(r) => RoundPlay::Scramble(ScramblePlay::from_scrambler(r)),
            GameRound::ScrambleHarder(r) => {
                RoundPlay::Scramble(ScramblePlay::from_scramble_harder(r))
            }
            GameRound::TuneIn(r) => RoundPlay::TuneIn(TuneInPlay::new(r)),
            GameRound::Dedede(r) => RoundPlay::Dedede(DededePlay::new(r)),
        }
    }
}
