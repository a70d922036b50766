//! Axum route handlers for the Generation API.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::generator::{generate_for_job, generate_resume, GenerationOutput};
use crate::generation::prompts::JobPosting;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub job_description: String,
    /// Overrides the session's uploaded resume text for this call.
    #[serde(default)]
    pub existing_document: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct JobResumeResponse {
    pub title: String,
    pub company: String,
    pub content: String,
}

/// POST /api/v1/sessions/:id/generate
///
/// Tailored LaTeX resume plus classified improvements. Errors are not retried.
pub async fn handle_generate(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerationOutput>, AppError> {
    if request.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "job_description cannot be empty".to_string(),
        ));
    }

    let session = state.sessions.acquire(session_id)?;
    let settings = state.settings.load().await?;
    let existing = request.existing_document.as_deref().or(session.document());

    let output = generate_resume(&state.llm, &settings, &request.job_description, existing).await?;

    Ok(Json(output))
}

/// POST /api/v1/jobs/resume
///
/// One-shot tailored resume for a job posting; the reply is returned as-is.
pub async fn handle_job_resume(
    State(state): State<AppState>,
    Json(job): Json<JobPosting>,
) -> Result<Json<JobResumeResponse>, AppError> {
    if job.title.trim().is_empty() || job.description.trim().is_empty() {
        return Err(AppError::Validation(
            "title and description cannot be empty".to_string(),
        ));
    }

    let settings = state.settings.load().await?;
    let content = generate_for_job(&state.llm, &settings, &job).await?;

    Ok(Json(JobResumeResponse {
        title: job.title,
        company: job.company,
        content,
    }))
}
