//! Audio playback seam. Playback itself lives in the embedding app; the
//! engine only hands paths to a sink and swallows failures, since audio is
//! an enhancement, never a requirement.

use std::sync::Arc;

use thiserror::Error;

#[derive(Debug, Error)]
#[error("audio playback failed: {0}")]
pub struct AudioError(pub String);

pub trait AudioSink: Send + Sync {
    fn play(&self, path: &str) -> Result<(), AudioError>;
}

/// Sink that drops everything. Default for headless use and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl AudioSink for NullSink {
    fn play(&self, _path: &str) -> Result<(), AudioError> {
        Ok(())
    }
}

pub type SharedSink = Arc<dyn AudioSink>;

/// Fire-and-forget playback. Failures are logged at debug and dropped.
pub fn play_quiet(sink: &dyn AudioSink, path: &str) {
    if let Err(err) = sink.play(path) {
        tracing::debug!(%err, path, "audio playback failed, ignoring");
    }
}
