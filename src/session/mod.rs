pub mod game;
pub mod gate;
pub mod poller;
pub mod review;

pub use game::{GamePhase, GameSession, GameSessionController, GameSummary, RoundAdvance};
pub use gate::{GameCatalogGate, GateProgress};
pub use poller::{spawn_asset_poll, PollHandle, PollSettings};
pub use review::{ReviewPhase, ReviewSession, ReviewSessionController, ReviewSummary};
