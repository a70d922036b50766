//! Settings persistence as a load/save capability injected into handlers.
//!
//! The record is one namespaced JSON document. A missing record loads as defaults.

use std::path::PathBuf;

use async_trait::async_trait;
use redis::AsyncCommands;
use thiserror::Error;
use tracing::{debug, info};

use crate::models::settings::Settings;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Stored settings are not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),
}

#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn load(&self) -> Result<Settings, SettingsError>;
    async fn save(&self, settings: &Settings) -> Result<(), SettingsError>;

    /// Backend name for logging.
    fn name(&self) -> &'static str;
}

/// Settings record stored under a single Redis key.
pub struct RedisSettingsStore {
    client: redis::Client,
    key: String,
}

impl RedisSettingsStore {
    pub fn new(client: redis::Client, key: impl Into<String>) -> Self {
        Self {
            client,
            key: key.into(),
        }
    }
}

#[async_trait]
impl SettingsStore for RedisSettingsStore {
    async fn load(&self) -> Result<Settings, SettingsError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let raw: Option<String> = conn.get(&self.key).await?;
        match raw {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => {
                debug!("No settings under '{}', using defaults", self.key);
                Ok(Settings::default())
            }
        }
    }

    async fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        let json = serde_json::to_string(settings)?;
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.set::<_, _, ()>(&self.key, json).await?;
        info!("Settings saved to Redis key '{}'", self.key);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "redis"
    }
}

/// Settings record stored as one JSON file.
pub struct FileSettingsStore {
    path: PathBuf,
}

impl FileSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SettingsStore for FileSettingsStore {
    async fn load(&self) -> Result<Settings, SettingsError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(json) => Ok(serde_json::from_str(&json)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No settings at {}, using defaults", self.path.display());
                Ok(Settings::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(settings)?;
        // Write-then-rename: readers never see a partial record.
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        info!("Settings saved to {}", self.path.display());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "file"
    }
}
