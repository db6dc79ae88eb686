pub mod flashcard;
pub mod game;

pub use flashcard::{
    CardPatch, Flashcard, NewCard, QuizAnswer, QuizQuestion, QuizType, ReviewMode,
};
pub use game::{
    DededeRound, GameRound, GameSelector, GameType, MadLibsRound, MatchingPair, MatchingRound,
    ScrambleHarderRound, ScramblerRound, TuneInRound,
};
