use serde::Deserialize;

/// The six concrete round types. "Random" is not a round type, see
/// [`GameSelector`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameType {
    Matching,
    MadLibs,
    Scrambler,
    ScrambleHarder,
    TuneIn,
    Dedede,
}

impl GameType {
    pub const ALL: [GameType; 6] = [
        GameType::Matching,
        GameType::MadLibs,
        GameType::Scrambler,
        GameType::ScrambleHarder,
        GameType::TuneIn,
        GameType::Dedede,
    ];

    /// Path segment under /games/ on the backing service.
    pub fn endpoint(self) -> &'static str {
        match self {
            GameType::Matching => "matching",
            GameType::MadLibs => "madlibs",
            GameType::Scrambler => "scrambler",
            GameType::ScrambleHarder => "scramble-harder",
            GameType::TuneIn => "tunein",
            GameType::Dedede => "dedede",
        }
    }
}

/// What the user picked in the lobby: one concrete type, or a random mix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameSelector {
    Fixed(GameType),
    Random,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MatchingPair {
    pub chinese: String,
    pub pinyin: String,
    pub english: String,
    pub audio_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MatchingRound {
    pub pairs: Vec<MatchingPair>,
}

/// Fill-in-the-blank round. `rate_limited` flags degraded/cached content
/// from upstream generation throttling; it is a notice, not an error.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MadLibsRound {
    pub sentence_zh: String,
    pub sentence_en: String,
    pub pinyin_sentence: String,
    pub vocab_word: String,
    pub options: Vec<String>,
    #[serde(default)]
    pub rate_limited: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScramblerRound {
    pub sentence_en: String,
    pub words: Vec<String>,
    pub correct_order: Vec<String>,
    pub full_sentence_zh: String,
    pub pinyin_sentence: String,
}

/// Like Scrambler but the word bank carries decoys: only `num_correct` of
/// `words` belong in the answer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScrambleHarderRound {
    pub direction: String,
    pub prompt: String,
    pub words: Vec<String>,
    pub correct_order: Vec<String>,
    pub num_correct: usize,
    pub full_sentence_zh: String,
    pub full_sentence_en: String,
    pub pinyin_sentence: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TuneInRound {
    pub audio_path: String,
    pub correct: String,
    pub correct_pinyin: String,
    pub correct_english: String,
    pub options: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DededeRound {
    pub sentence: String,
    pub english: String,
    pub pinyin: String,
    pub answer: String,
    pub audio_path: Option<String>,
}

/// One fetched round, tagged with its type and carrying its payload.
#[derive(Debug, Clone, PartialEq)]
pub enum GameRound {
    Matching(MatchingRound),
    MadLibs(MadLibsRound),
    Scrambler(ScramblerRound),
    ScrambleHarder(ScrambleHarderRound),
    TuneIn(TuneInRound),
    Dedede(DededeRound),
}

impl GameRound {
    pub fn game_type(&self) -> GameType {
        match self {
            GameRound::Matching(_) => GameType::Matching,
            GameRound::MadLibs(_) => GameType::MadLibs,
            GameRound::Scrambler(_) => GameType::Scrambler,
            GameRound::ScrambleHarder(_) => GameType::ScrambleHarder,
            GameRound::TuneIn(_) => GameType::TuneIn,
            GameRound::Dedede(_) => GameType::Dedede,
        }
    }

    pub fn rate_limited(&self) -> bool {
        matches!(self, GameRound::MadLibs(r) if r.rate_limited)
    }
}
