//! Forwards an envelope to the provider with the credential injected and
//! hands the reply back unchanged. No retries, no body rewriting.

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::config::Config;
use crate::llm_client::envelope::Envelope;
use crate::llm_client::routing::ProviderFamily;
use crate::llm_client::LlmError;

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Raw upstream reply: status code and the body as received.
#[derive(Debug, Clone)]
pub struct RelayReply {
    pub status: u16,
    pub body: serde_json::Value,
}

impl RelayReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait Relay: Send + Sync {
    async fn forward(&self, credential: &str, envelope: &Envelope) -> Result<RelayReply, LlmError>;
}

/// Relay backed by reqwest, posting straight to the provider endpoints.
#[derive(Clone)]
pub struct HttpRelay {
    client: Client,
    completion_url: String,
    messages_url: String,
}

impl HttpRelay {
    pub fn new(config: &Config) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(config.relay_timeout_secs))
                .build()?,
            completion_url: config.openai_api_url.clone(),
            messages_url: config.anthropic_api_url.clone(),
        })
    }
}

#[async_trait]
impl Relay for HttpRelay {
    async fn forward(&self, credential: &str, envelope: &Envelope) -> Result<RelayReply, LlmError> {
        let request = match envelope.family() {
            ProviderFamily::CompletionCompatible => self
                .client
                .post(&self.completion_url)
                .bearer_auth(credential),
            ProviderFamily::MessageCompatible => self
                .client
                .post(&self.messages_url)
                .header("x-api-key", credential)
                .header("anthropic-version", ANTHROPIC_VERSION),
        };

        let response = request
            .header("content-type", "application/json")
            .json(envelope)
            .send()
            .await?;

        let status = response.status().as_u16();
        let text = response.text().await?;
        debug!("Relay reply: status={status}, {} bytes", text.len());

        // Error pages are not always JSON; keep them verbatim as a string.
        let body = serde_json::from_str(&text).unwrap_or(serde_json::Value::String(text));

        Ok(RelayReply { status, body })
    }
}

#[cfg(test)]
pub mod testing {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use parking_lot::Mutex;

    use super::*;

    /// Test double that replays a canned reply and records every call.
    pub struct MockRelay {
        reply: RelayReply,
        calls: AtomicUsize,
        envelopes: Mutex<Vec<Envelope>>,
    }

    impl MockRelay {
        pub fn replying(status: u16, body: serde_json::Value) -> Self {
            Self {
                reply: RelayReply { status, body },
                calls: AtomicUsize::new(0),
                envelopes: Mutex::new(Vec::new()),
            }
        }

        /// 200 reply in the completion family's shape.
        pub fn completion(text: &str) -> Self {
            Self::replying(
                200,
                serde_json::json!({"choices": [{"message": {"role": "assistant", "content": text}}]}),
            )
        }

        /// 200 reply in the message family's shape.
        pub fn messages(text: &str) -> Self {
            Self::replying(
                200,
                serde_json::json!({"content": [{"type": "text", "text": text}]}),
            )
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        pub fn last_envelope(&self) -> Option<Envelope> {
            self.envelopes.lock().last().cloned()
        }
    }

    #[async_trait]
    impl Relay for MockRelay {
        async fn forward(
            &self,
            _credential: &str,
            envelope: &Envelope,
        ) -> Result<RelayReply, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.envelopes.lock().push(envelope.clone());
            Ok(self.reply.clone())
        }
    }
}
