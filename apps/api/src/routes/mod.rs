pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::chat::handlers as chat;
use crate::documents::MAX_DOCUMENT_BYTES;
use crate::generation::handlers as generation;
use crate::settings::handlers as settings;
use crate::state::AppState;

/// Headroom for multipart boundaries and headers on top of the file itself.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Settings API
        .route(
            "/api/v1/settings",
            get(settings::handle_get_settings).put(settings::handle_save_settings),
        )
        .route("/api/v1/settings/reset", post(settings::handle_reset_settings))
        .route("/api/v1/settings/model", get(settings::handle_model_info))
        // Session API
        .route("/api/v1/sessions", post(chat::handle_create_session))
        .route("/api/v1/sessions/:id", get(chat::handle_get_session))
        .route(
            "/api/v1/sessions/:id/messages",
            post(chat::handle_send_message),
        )
        .route(
            "/api/v1/sessions/:id/document",
            post(chat::handle_upload_document).layer(DefaultBodyLimit::max(
                MAX_DOCUMENT_BYTES + MULTIPART_OVERHEAD_BYTES,
            )),
        )
        // Generation API
        .route(
            "/api/v1/sessions/:id/generate",
            post(generation::handle_generate),
        )
        .route("/api/v1/jobs/resume", post(generation::handle_job_resume))
        .with_state(state)
}
