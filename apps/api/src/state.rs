use std::sync::Arc;

use crate::chat::registry::SessionRegistry;
use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::settings::store::SettingsStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub llm: LlmClient,
    /// Load/save capability for the user's AI settings. Handlers load a fresh copy
    /// per action and pass it down explicitly.
    pub settings: Arc<dyn SettingsStore>,
    pub sessions: SessionRegistry,
}

#[cfg(test)]
impl AppState {
    /// State backed by a file settings store in `dir` and the given relay.
    pub fn for_tests(relay: Arc<dyn crate::llm_client::relay::Relay>, dir: &std::path::Path) -> Self {
        let path = dir.join("settings.json");
        AppState {
            config: Config::for_tests(path.clone()),
            llm: LlmClient::new(relay),
            settings: Arc::new(crate::settings::store::FileSettingsStore::new(path)),
            sessions: SessionRegistry::new(),
        }
    }
}
