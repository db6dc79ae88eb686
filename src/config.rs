use std::time::Duration;

use crate::session::poller::PollSettings;

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_TIMEOUT_MS: u64 = 15_000;

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub bearer_token: Option<String>,
    pub log_level: String,
    pub poll: PollSettings,
}

impl EngineConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let base_url = env_string("API_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let timeout =
            Duration::from_millis(env_u64("API_TIMEOUT_MS").unwrap_or(DEFAULT_TIMEOUT_MS));
        let bearer_token = env_string("API_TOKEN");
        let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let mut poll = PollSettings::default();
        if let Some(ms) = env_u64("ASSET_POLL_INTERVAL_MS") {
            poll.interval = Duration::from_millis(ms);
        }
        if let Some(n) = env_u64("ASSET_POLL_MAX_ATTEMPTS") {
            poll.max_attempts = n as u32;
        }

        Self {
            base_url,
            timeout,
            bearer_token,
            log_level,
            poll,
        }
    }
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_u64(key: &str) -> Option<u64> {
    env_string(key)?.parse().ok()
}
