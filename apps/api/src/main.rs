mod chat;
mod config;
mod documents;
mod errors;
mod generation;
mod llm_client;
mod models;
mod routes;
mod settings;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::chat::registry::SessionRegistry;
use crate::config::Config;
use crate::llm_client::relay::HttpRelay;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::settings::store::{FileSettingsStore, RedisSettingsStore, SettingsStore};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ResumeAI API v{}", env!("CARGO_PKG_VERSION"));

    // Settings store: Redis when configured, otherwise a local JSON file
    let settings: Arc<dyn SettingsStore> = match &config.redis_url {
        Some(url) => {
            let client = redis::Client::open(url.as_str())?;
            info!("Settings stored in Redis under key '{}'", config.settings_key);
            Arc::new(RedisSettingsStore::new(client, config.settings_key.clone()))
        }
        None => {
            info!("Settings stored in {}", config.settings_path.display());
            Arc::new(FileSettingsStore::new(config.settings_path.clone()))
        }
    };

    // Initialize LLM client
    let relay = HttpRelay::new(&config)?;
    let llm = LlmClient::new(Arc::new(relay));
    info!("LLM client initialized (timeout: {}s)", config.relay_timeout_secs);

    let sessions = SessionRegistry::new();
    sessions.spawn_eviction(Duration::from_secs(config.session_idle_secs));
    info!("Idle sessions evicted after {}s", config.session_idle_secs);

    let state = AppState {
        config: config.clone(),
        llm,
        settings,
        sessions,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the web client has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
