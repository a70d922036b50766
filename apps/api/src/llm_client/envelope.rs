//! Backend-specific request envelopes and success-reply shapes.

use serde::{Deserialize, Serialize};

use crate::llm_client::routing::{ProviderFamily, ResolvedModel};
use crate::llm_client::LlmError;
use crate::models::chat::{ChatMessage, Role};
use crate::models::settings::Settings;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WireMessage {
    pub role: &'static str,
    pub content: String,
}

impl From<&ChatMessage> for WireMessage {
    fn from(message: &ChatMessage) -> Self {
        Self {
            role: message.role.as_str(),
            content: message.content.clone(),
        }
    }
}

/// Chat-completions request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<WireMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Messages-API request body. System turns are not allowed inside `messages`,
/// so they are lifted into the top-level `system` field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessagesRequest {
    pub model: String,
    pub max_tokens: u32,
    pub messages: Vec<WireMessage>,
    pub temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
}

/// The request a relay forwards upstream.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Envelope {
    Completion(CompletionRequest),
    Messages(MessagesRequest),
}

impl Envelope {
    pub fn build(resolved: &ResolvedModel, messages: &[ChatMessage], settings: &Settings) -> Self {
        match resolved.family {
            ProviderFamily::CompletionCompatible => Envelope::Completion(CompletionRequest {
                model: resolved.model.clone(),
                messages: messages.iter().map(WireMessage::from).collect(),
                temperature: settings.temperature,
                max_tokens: settings.max_tokens,
            }),
            ProviderFamily::MessageCompatible => {
                let system_turns: Vec<&str> = messages
                    .iter()
                    .filter(|m| m.role == Role::System)
                    .map(|m| m.content.as_str())
                    .collect();
                let system = (!system_turns.is_empty()).then(|| system_turns.join("\n\n"));

                Envelope::Messages(MessagesRequest {
                    model: resolved.model.clone(),
                    max_tokens: settings.max_tokens,
                    messages: messages
                        .iter()
                        .filter(|m| m.role != Role::System)
                        .map(WireMessage::from)
                        .collect(),
                    temperature: settings.temperature,
                    system,
                })
            }
        }
    }

    pub fn family(&self) -> ProviderFamily {
        match self {
            Envelope::Completion(_) => ProviderFamily::CompletionCompatible,
            Envelope::Messages(_) => ProviderFamily::MessageCompatible,
        }
    }

    pub fn model(&self) -> &str {
        match self {
            Envelope::Completion(r) => &r.model,
            Envelope::Messages(r) => &r.model,
        }
    }

    pub fn message_count(&self) -> usize {
        match self {
            Envelope::Completion(r) => r.messages.len(),
            Envelope::Messages(r) => r.messages.len(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    text: Option<String>,
}

/// Pulls the reply text out of a 2xx body: the first choice's message for the
/// completion family, the first content block's text for the message family.
pub fn extract_reply(family: ProviderFamily, body: serde_json::Value) -> Result<String, LlmError> {
    let text = match family {
        ProviderFamily::CompletionCompatible => {
            let response: CompletionResponse = serde_json::from_value(body)?;
            response
                .choices
                .into_iter()
                .next()
                .and_then(|c| c.message.content)
        }
        ProviderFamily::MessageCompatible => {
            let response: MessagesResponse = serde_json::from_value(body)?;
            response.content.into_iter().next().and_then(|b| b.text)
        }
    };

    text.ok_or(LlmError::EmptyContent)
}
