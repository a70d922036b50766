//! LLM Client — the single point of entry for every model call in the service.
//!
//! Resolves the configured model id to a provider family, builds that family's
//! envelope, hands it to the relay, and normalizes the reply into one string or
//! a typed error. Never retries: every failure goes straight back to the caller.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

pub mod envelope;
pub mod prompts;
pub mod relay;
pub mod routing;

use crate::llm_client::envelope::{extract_reply, Envelope};
use crate::llm_client::relay::Relay;
use crate::llm_client::routing::{resolve_model, ProviderFamily};
use crate::models::chat::ChatMessage;
use crate::models::settings::Settings;

pub const MISSING_CREDENTIAL_MESSAGE: &str =
    "API key not configured. Please set your API key in Settings.";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("{}", MISSING_CREDENTIAL_MESSAGE)]
    Configuration,

    #[error("{}: {}", .family.error_label(), upstream_message(.payload))]
    Upstream {
        family: ProviderFamily,
        status: u16,
        payload: serde_json::Value,
    },

    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// The backend's own message from an error envelope (`{"error": {"message"}}`),
/// a bare string error, or "Unknown error".
pub fn upstream_message(payload: &serde_json::Value) -> String {
    match payload.get("error") {
        Some(serde_json::Value::String(message)) => message.clone(),
        Some(error) => error
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or("Unknown error")
            .to_string(),
        None => match payload {
            serde_json::Value::String(body) if !body.trim().is_empty() => body.clone(),
            _ => "Unknown error".to_string(),
        },
    }
}

/// Provider gateway shared by chat, generation and job prompts.
#[derive(Clone)]
pub struct LlmClient {
    relay: Arc<dyn Relay>,
}

impl LlmClient {
    pub fn new(relay: Arc<dyn Relay>) -> Self {
        Self { relay }
    }

    /// Sends `messages` to whichever backend `settings.model_id` resolves to and
    /// returns the reply text. Fails with `Configuration` before any network call
    /// when no credential is set.
    pub async fn complete(
        &self,
        messages: &[ChatMessage],
        settings: &Settings,
    ) -> Result<String, LlmError> {
        if !settings.has_credential() {
            return Err(LlmError::Configuration);
        }

        let resolved = resolve_model(&settings.model_id);
        let envelope = Envelope::build(&resolved, messages, settings);
        info!(
            "{} request - Model: {}, Messages: {}",
            resolved.family.provider_name(),
            envelope.model(),
            envelope.message_count()
        );

        let reply = self.relay.forward(&settings.credential, &envelope).await?;

        if !reply.is_success() {
            warn!(
                "{} returned {}: {}",
                resolved.family.provider_name(),
                reply.status,
                reply.body
            );
            return Err(LlmError::Upstream {
                family: resolved.family,
                status: reply.status,
                payload: reply.body,
            });
        }

        let text = extract_reply(resolved.family, reply.body)?;
        debug!("LLM call succeeded: {} chars", text.len());
        Ok(text)
    }
}
