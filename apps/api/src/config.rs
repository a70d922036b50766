use std::path::PathBuf;

use anyhow::{Context, Result};

/// Process configuration loaded from environment variables.
/// User-editable AI settings live in the settings store, not here.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// When set, user settings are persisted in Redis; otherwise in `settings_path`.
    pub redis_url: Option<String>,
    pub settings_key: String,
    pub settings_path: PathBuf,
    pub openai_api_url: String,
    pub anthropic_api_url: String,
    pub relay_timeout_secs: u64,
    /// Sessions untouched for this long are dropped from memory.
    pub session_idle_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: optional_env("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional_env("RUST_LOG", "info"),
            redis_url: std::env::var("REDIS_URL").ok().filter(|v| !v.trim().is_empty()),
            settings_key: optional_env("SETTINGS_KEY", "resumeai-settings"),
            settings_path: PathBuf::from(optional_env("SETTINGS_PATH", "resumeai-settings.json")),
            openai_api_url: optional_env(
                "OPENAI_API_URL",
                "https://api.openai.com/v1/chat/completions",
            ),
            anthropic_api_url: optional_env(
                "ANTHROPIC_API_URL",
                "https://api.anthropic.com/v1/messages",
            ),
            relay_timeout_secs: optional_env("RELAY_TIMEOUT_SECS", "120")
                .parse::<u64>()
                .context("RELAY_TIMEOUT_SECS must be a whole number of seconds")?,
            session_idle_secs: optional_env("SESSION_IDLE_SECS", "3600")
                .parse::<u64>()
                .context("SESSION_IDLE_SECS must be a whole number of seconds")?,
        })
    }
}

fn optional_env(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
impl Config {
    /// Configuration for tests: file-backed settings at `settings_path`, unreachable relays.
    pub fn for_tests(settings_path: PathBuf) -> Self {
        Config {
            port: 0,
            rust_log: "debug".to_string(),
            redis_url: None,
            settings_key: "resumeai-settings".to_string(),
            settings_path,
            openai_api_url: "http://127.0.0.1:9/v1/chat/completions".to_string(),
            anthropic_api_url: "http://127.0.0.1:9/v1/messages".to_string(),
            relay_timeout_secs: 1,
            session_idle_secs: 3600,
        }
    }
}
