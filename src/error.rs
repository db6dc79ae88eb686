use thiserror::Error;

/// Failures talking to the backing service.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("HTTP {status}: {body}")]
    HttpStatus {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("JSON decode failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures raised by the session engine itself. Out-of-order UI calls map
/// to `Phase` / `InvalidMove` instead of panicking.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("operation not valid in phase {phase}")]
    Phase { phase: &'static str },
    #[error("no unlocked game types to sample from")]
    EmptyCatalog,
    #[error("invalid move: {0}")]
    InvalidMove(&'static str),
    #[error("card {0} is still active, deactivate it first")]
    CardStillActive(i64),
    #[error("card {0} not found in pool")]
    CardNotFound(i64),
}
