//! Axum route handlers for the Settings API.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::errors::AppError;
use crate::llm_client::routing::resolve_model;
use crate::models::settings::Settings;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ModelInfoResponse {
    pub model: String,
    pub provider: &'static str,
    pub resolved_model: String,
    pub configured: bool,
}

/// GET /api/v1/settings
///
/// Current settings with the credential masked.
pub async fn handle_get_settings(State(state): State<AppState>) -> Result<Json<Settings>, AppError> {
    let settings = state.settings.load().await?;
    Ok(Json(settings.masked()))
}

/// PUT /api/v1/settings
///
/// Explicit save. The whole record is replaced; nothing is written if validation fails.
/// A credential sent back in its masked form keeps the stored credential.
pub async fn handle_save_settings(
    State(state): State<AppState>,
    Json(mut settings): Json<Settings>,
) -> Result<Json<Settings>, AppError> {
    settings.validate().map_err(AppError::Validation)?;

    let current = state.settings.load().await?;
    if current.has_credential() && settings.credential == current.masked().credential {
        settings.credential = current.credential;
    }

    state.settings.save(&settings).await?;
    Ok(Json(settings.masked()))
}

/// POST /api/v1/settings/reset
///
/// Restores and persists the defaults, clearing the credential.
pub async fn handle_reset_settings(
    State(state): State<AppState>,
) -> Result<Json<Settings>, AppError> {
    let defaults = Settings::default();
    state.settings.save(&defaults).await?;
    Ok(Json(defaults))
}

/// GET /api/v1/settings/model
///
/// Which provider the configured model id routes to and whether a credential is set.
pub async fn handle_model_info(
    State(state): State<AppState>,
) -> Result<Json<ModelInfoResponse>, AppError> {
    let settings = state.settings.load().await?;
    let resolved = resolve_model(&settings.model_id);
    Ok(Json(ModelInfoResponse {
        provider: resolved.family.provider_name(),
        resolved_model: resolved.model,
        configured: settings.has_credential(),
        model: settings.model_id,
    }))
}
