use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;
use crate::settings::store::SettingsError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("A request is already in flight for this session")]
    Busy,

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone(), None),
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                msg.clone(),
                None,
            ),
            AppError::Busy => (
                StatusCode::CONFLICT,
                "SESSION_BUSY",
                self.to_string(),
                None,
            ),
            AppError::Llm(LlmError::Configuration) => (
                StatusCode::BAD_REQUEST,
                "CONFIGURATION_ERROR",
                LlmError::Configuration.to_string(),
                None,
            ),
            AppError::Llm(e @ LlmError::Upstream { payload, .. }) => {
                tracing::warn!("Upstream error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "UPSTREAM_ERROR",
                    e.to_string(),
                    Some(payload.clone()),
                )
            }
            AppError::Llm(e) => {
                tracing::error!("LLM error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "LLM_ERROR",
                    "An AI processing error occurred".to_string(),
                    None,
                )
            }
            AppError::Settings(e) => {
                tracing::error!("Settings error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "SETTINGS_ERROR",
                    "Settings could not be read or written".to_string(),
                    None,
                )
            }
        };

        let mut error = json!({
            "code": code,
            "message": message
        });
        if let Some(details) = details {
            error["details"] = details;
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;

    use super::*;
    use crate::llm_client::routing::ProviderFamily;

    async fn body_json(error: AppError) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_configuration_error_is_bad_request() {
        let (status, body) = body_json(AppError::Llm(LlmError::Configuration)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "CONFIGURATION_ERROR");
        assert_eq!(
            body["error"]["message"],
            "API key not configured. Please set your API key in Settings."
        );
    }

    #[tokio::test]
    async fn test_upstream_error_carries_payload() {
        let payload = json!({"error": {"message": "Rate limit reached"}});
        let (status, body) = body_json(AppError::Llm(LlmError::Upstream {
            family: ProviderFamily::CompletionCompatible,
            status: 429,
            payload: payload.clone(),
        }))
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["message"], "OpenAI API error: Rate limit reached");
        assert_eq!(body["error"]["details"], payload);
    }

    #[tokio::test]
    async fn test_busy_is_conflict() {
        let (status, body) = body_json(AppError::Busy).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], "SESSION_BUSY");
    }
}
