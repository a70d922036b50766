//! Axum route handlers for conversation sessions.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::chat::session::TurnOutcome;
use crate::documents::extract_text_blocking;
use crate::errors::AppError;
use crate::models::chat::ChatMessage;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct SessionCreatedResponse {
    pub session_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub messages: Vec<ChatMessage>,
    pub has_document: bool,
}

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct DocumentUploadResponse {
    pub attached: bool,
    pub characters: usize,
    /// Set when extraction failed; the session continues without document content.
    pub warning: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<SessionCreatedResponse>) {
    let session = state.sessions.create();
    (
        StatusCode::CREATED,
        Json(SessionCreatedResponse {
            session_id: session.id(),
            created_at: session.created_at(),
        }),
    )
}

/// GET /api/v1/sessions/:id
///
/// Waits for any in-flight turn to finish so the transcript is never half-written.
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionResponse>, AppError> {
    let handle = state.sessions.get(session_id)?;
    let session = handle.lock().await;
    Ok(Json(SessionResponse {
        session_id: session.id(),
        created_at: session.created_at(),
        messages: session.messages().to_vec(),
        has_document: session.document().is_some(),
    }))
}

/// POST /api/v1/sessions/:id/messages
///
/// Always answers 200 once the turn ran: failures arrive as a diagnostic assistant
/// message with `error` set.
pub async fn handle_send_message(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<SendMessageRequest>,
) -> Result<Json<TurnOutcome>, AppError> {
    let content = request.content.trim();
    if content.is_empty() {
        return Err(AppError::Validation("content cannot be empty".to_string()));
    }

    let mut session = state.sessions.acquire(session_id)?;
    let settings = state.settings.load().await?;
    let outcome = session.send(&state.llm, &settings, content).await;

    Ok(Json(outcome))
}

/// POST /api/v1/sessions/:id/document
///
/// Multipart upload (field `file`). Extraction failures are reported as a warning,
/// not an error.
pub async fn handle_upload_document(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<DocumentUploadResponse>, AppError> {
    let mut session = state.sessions.acquire(session_id)?;

    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(str::to_string);
        let bytes: bytes::Bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
        upload = Some((file_name, content_type, bytes));
        break;
    }

    let (file_name, content_type, bytes) =
        upload.ok_or_else(|| AppError::Validation("multipart field 'file' is required".to_string()))?;

    let response = match extract_text_blocking(file_name, content_type, bytes).await {
        Ok(text) => {
            let characters = text.chars().count();
            session.attach_document(text);
            DocumentUploadResponse {
                attached: true,
                characters,
                warning: None,
            }
        }
        Err(e) => {
            warn!("Continuing without document content for session {session_id}: {e}");
            DocumentUploadResponse {
                attached: false,
                characters: 0,
                warning: Some(e.to_string()),
            }
        }
    };

    Ok(Json(response))
}
