//! Practice-session engine for a Chinese-learning client.
//!
//! Two session families run on top of a shared flashcard pool:
//! - flashcard quiz reviews (fixed-length or endless), server-checked
//! - multi-round game sessions over six round types, client-checked with
//!   first-try-only scoring
//!
//! The engine is embedded in a UI event loop. All round fetching is
//! asynchronous; controllers tag in-flight requests with an epoch and drop
//! responses that arrive for a superseded session state.

pub mod api;
pub mod audio;
pub mod cards;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod play;
pub mod pool;
pub mod session;
