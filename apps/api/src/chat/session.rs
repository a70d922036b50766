//! Conversation session: an ordered, append-only transcript plus the resume text
//! extracted from an uploaded document, if any.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;
use uuid::Uuid;

use crate::generation::prompts::build_chat_messages;
use crate::llm_client::{LlmClient, LlmError};
use crate::models::chat::ChatMessage;
use crate::models::settings::Settings;

/// Assistant-visible text appended in place of a reply when a turn fails.
pub fn failure_diagnostic(error: &LlmError) -> String {
    format!(
        "Sorry, I encountered an error: {error}. Please check your API configuration in Settings."
    )
}

/// Result of one user turn. `reply` is always appended to the transcript;
/// `error` is set when it is a diagnostic rather than a model reply.
#[derive(Debug, Clone, Serialize)]
pub struct TurnOutcome {
    pub reply: ChatMessage,
    pub error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ConversationSession {
    id: Uuid,
    created_at: DateTime<Utc>,
    messages: Vec<ChatMessage>,
    document: Option<String>,
}

impl ConversationSession {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            messages: Vec::new(),
            document: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn document(&self) -> Option<&str> {
        self.document.as_deref()
    }

    /// Replaces the resume text used to prefix subsequent turns.
    pub fn attach_document(&mut self, text: String) {
        self.document = Some(text);
    }

    /// Appends the user's turn, asks the model with the full history, and appends
    /// either the reply or a diagnostic. Failures never escape as errors.
    pub async fn send(
        &mut self,
        llm: &LlmClient,
        settings: &Settings,
        utterance: &str,
    ) -> TurnOutcome {
        let request = build_chat_messages(
            &settings.system_prompt,
            &self.messages,
            utterance,
            self.document(),
        );
        self.messages.push(ChatMessage::user(utterance));

        let outcome = match llm.complete(&request, settings).await {
            Ok(text) => TurnOutcome {
                reply: ChatMessage::assistant(text),
                error: None,
            },
            Err(e) => {
                warn!("Chat turn failed for session {}: {e}", self.id);
                TurnOutcome {
                    reply: ChatMessage::assistant(failure_diagnostic(&e)),
                    error: Some(e.to_string()),
                }
            }
        };

        self.messages.push(outcome.reply.clone());
        outcome
    }
}

impl Default for ConversationSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::llm_client::relay::testing::MockRelay;
    use crate::models::chat::Role;

    fn configured() -> Settings {
        Settings {
            credential: "sk-test".to_string(),
            ..Settings::default()
        }
    }

    #[tokio::test]
    async fn test_successful_turn_appends_user_and_assistant() {
        let relay = Arc::new(MockRelay::completion("Add metrics to each bullet."));
        let llm = LlmClient::new(relay.clone());
        let mut session = ConversationSession::new();

        let outcome = session.send(&llm, &configured(), "How can I improve?").await;

        assert!(outcome.error.is_none());
        assert_eq!(
            session.messages(),
            &[
                ChatMessage::user("How can I improve?"),
                ChatMessage::assistant("Add metrics to each bullet."),
            ]
        );
    }

    #[tokio::test]
    async fn test_second_turn_sends_accumulated_history() {
        let relay = Arc::new(MockRelay::completion("ok"));
        let llm = LlmClient::new(relay.clone());
        let mut session = ConversationSession::new();
        let settings = configured();

        session.send(&llm, &settings, "first").await;
        session.send(&llm, &settings, "second").await;

        let envelope = serde_json::to_value(relay.last_envelope().unwrap()).unwrap();
        let contents: Vec<&str> = envelope["messages"]
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["content"].as_str().unwrap())
            .collect();
        assert_eq!(
            contents,
            vec![settings.system_prompt.as_str(), "first", "ok", "second"]
        );
        assert_eq!(session.messages().len(), 4);
    }

    #[tokio::test]
    async fn test_document_prefixes_only_the_outgoing_turn() {
        let relay = Arc::new(MockRelay::completion("ok"));
        let llm = LlmClient::new(relay.clone());
        let mut session = ConversationSession::new();
        session.attach_document("Jane Doe - Engineer".to_string());

        session.send(&llm, &configured(), "Rate my resume").await;

        let envelope = serde_json::to_value(relay.last_envelope().unwrap()).unwrap();
        assert_eq!(
            envelope["messages"][1]["content"],
            "Resume Content:\nJane Doe - Engineer\n\nUser Question: Rate my resume"
        );
        // The transcript keeps what the user actually typed.
        assert_eq!(session.messages()[0].content, "Rate my resume");
    }

    #[tokio::test]
    async fn test_failure_appends_diagnostic_instead_of_erroring() {
        let relay = Arc::new(MockRelay::replying(
            401,
            json!({"error": {"message": "Invalid API key"}}),
        ));
        let llm = LlmClient::new(relay);
        let mut session = ConversationSession::new();

        let outcome = session.send(&llm, &configured(), "hello").await;

        assert_eq!(outcome.error.as_deref(), Some("OpenAI API error: Invalid API key"));
        assert_eq!(session.messages().len(), 2);
        let last = &session.messages()[1];
        assert_eq!(last.role, Role::Assistant);
        assert_eq!(
            last.content,
            "Sorry, I encountered an error: OpenAI API error: Invalid API key. \
             Please check your API configuration in Settings."
        );
    }

    #[tokio::test]
    async fn test_missing_credential_is_reported_in_transcript() {
        let relay = Arc::new(MockRelay::completion("unused"));
        let llm = LlmClient::new(relay.clone());
        let mut session = ConversationSession::new();

        let outcome = session.send(&llm, &Settings::default(), "hello").await;

        assert_eq!(relay.calls(), 0);
        assert!(outcome.reply.content.contains("API key not configured"));
        assert_eq!(session.messages().len(), 2);
    }
}
