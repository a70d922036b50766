//! Orchestrates one resume generation call.
//!
//! Flow: build_generation_messages → LLM complete → extract → classify → group.
//! Settings are passed in by the caller; nothing here reads ambient state.

use serde::Serialize;
use tracing::info;

use crate::generation::extractor::{extract, GenerationResult};
use crate::generation::improvements::{
    classify, group_by_category, summarize, ImprovementGroup, ImprovementRecord,
    ImprovementSummary,
};
use crate::generation::prompts::{build_generation_messages, build_job_messages, JobPosting};
use crate::llm_client::{LlmClient, LlmError};
use crate::models::settings::Settings;

/// Suggested file name for the generated LaTeX document.
pub const RESUME_FILE_NAME: &str = "tailored-resume.tex";

/// Everything the result view needs from one generation call.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationOutput {
    #[serde(flatten)]
    pub result: GenerationResult,
    pub file_name: &'static str,
    pub improvements: Vec<ImprovementRecord>,
    pub summary: ImprovementSummary,
    pub groups: Vec<ImprovementGroup>,
}

impl GenerationOutput {
    /// Derives the classified view from an extracted reply.
    pub fn from_result(result: GenerationResult) -> Self {
        let improvements = classify(&result.improvements_raw);
        let summary = summarize(&improvements);
        let groups = group_by_category(&improvements);
        Self {
            result,
            file_name: RESUME_FILE_NAME,
            improvements,
            summary,
            groups,
        }
    }
}

/// Generates a tailored LaTeX resume for `job_description`, optionally grounded
/// in the user's existing resume text.
pub async fn generate_resume(
    llm: &LlmClient,
    settings: &Settings,
    job_description: &str,
    existing_document: Option<&str>,
) -> Result<GenerationOutput, LlmError> {
    info!(
        "Generating resume: jd={} chars, existing resume={}",
        job_description.len(),
        existing_document.map_or(0, str::len)
    );

    let messages =
        build_generation_messages(&settings.system_prompt, job_description, existing_document);
    let raw = llm.complete(&messages, settings).await?;

    let output = GenerationOutput::from_result(extract(&raw));
    info!(
        "Generated resume: document={} chars, {} improvements",
        output.result.document.len(),
        output.improvements.len()
    );
    Ok(output)
}

/// One-shot tailored resume for a job posting. Returns the reply text unparsed.
pub async fn generate_for_job(
    llm: &LlmClient,
    settings: &Settings,
    job: &JobPosting,
) -> Result<String, LlmError> {
    info!("Generating job resume for '{}' at '{}'", job.title, job.company);
    let messages = build_job_messages(&settings.system_prompt, job);
    llm.complete(&messages, settings).await
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::generation::improvements::Category;
    use crate::generation::prompts::build_generation_prompt;
    use crate::llm_client::prompts::{
        IMPROVEMENTS_MARKER, LATEX_RESUME_MARKER, NO_IMPROVEMENTS_SENTINEL,
    };
    use crate::llm_client::relay::testing::MockRelay;

    const JD: &str = "Frontend Engineer, React, 2 years experience";

    fn configured(model_id: &str) -> Settings {
        Settings {
            credential: "sk-test".to_string(),
            model_id: model_id.to_string(),
            ..Settings::default()
        }
    }

    #[tokio::test]
    async fn test_end_to_end_with_mocked_reply() {
        let prompt = build_generation_prompt(JD, None);
        assert!(prompt.contains(JD));
        assert!(prompt.contains(LATEX_RESUME_MARKER));
        assert!(prompt.contains(IMPROVEMENTS_MARKER));

        let relay = Arc::new(MockRelay::completion(
            "===LATEX_RESUME===\nDOC\n===IMPROVEMENTS===\nSkills: add React",
        ));
        let llm = LlmClient::new(relay.clone());

        let output = generate_resume(&llm, &configured("gpt-4"), JD, None)
            .await
            .unwrap();

        assert_eq!(output.result.document, "DOC");
        assert_eq!(output.improvements.len(), 1);
        assert_eq!(output.improvements[0].category, Category::Skills);
        assert_eq!(output.summary.skills, 1);
        assert_eq!(relay.calls(), 1);
    }

    #[tokio::test]
    async fn test_generation_sends_system_prompt_then_instruction() {
        let relay = Arc::new(MockRelay::messages("plain reply"));
        let llm = LlmClient::new(relay.clone());
        let settings = configured("claude-3-sonnet");

        generate_resume(&llm, &settings, JD, Some("Jane Doe, React developer"))
            .await
            .unwrap();

        let envelope = serde_json::to_value(relay.last_envelope().unwrap()).unwrap();
        let messages = envelope["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0]["content"], settings.system_prompt.as_str());
        let instruction = messages[1]["content"].as_str().unwrap();
        assert!(instruction.contains("Existing Resume Content:\nJane Doe, React developer"));
    }

    #[tokio::test]
    async fn test_missing_credential_is_configuration_error_without_relay_call() {
        let relay = Arc::new(MockRelay::completion("unused"));
        let llm = LlmClient::new(relay.clone());
        let settings = Settings::default();

        let result = generate_resume(&llm, &settings, JD, None).await;

        assert!(matches!(result, Err(LlmError::Configuration)));
        assert_eq!(relay.calls(), 0);
    }

    #[tokio::test]
    async fn test_untagged_reply_degrades_without_error() {
        let relay = Arc::new(MockRelay::completion("\\documentclass{resume} only"));
        let llm = LlmClient::new(relay);

        let output = generate_resume(&llm, &configured("gpt-4"), JD, None)
            .await
            .unwrap();

        assert_eq!(output.result.document, "\\documentclass{resume} only");
        assert_eq!(output.result.improvements_raw, NO_IMPROVEMENTS_SENTINEL);
        assert_eq!(output.improvements.len(), 1);
        assert_eq!(output.improvements[0].category, Category::General);
    }

    #[tokio::test]
    async fn test_job_prompt_leads_with_system_turn() {
        let relay = Arc::new(MockRelay::completion("A resume"));
        let llm = LlmClient::new(relay.clone());
        let job = JobPosting {
            title: "Data Engineer".to_string(),
            company: "Initech".to_string(),
            description: "Pipelines".to_string(),
            requirements: None,
        };

        let text = generate_for_job(&llm, &configured("gpt-4"), &job).await.unwrap();

        assert_eq!(text, "A resume");
        let envelope = serde_json::to_value(relay.last_envelope().unwrap()).unwrap();
        let messages = envelope["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0]["role"], "user");
        assert_eq!(messages[0]["content"], Settings::default().system_prompt.as_str());
        let prompt = messages[1]["content"].as_str().unwrap();
        assert!(prompt.contains("Job Title: Data Engineer\nCompany: Initech"));
    }

    #[tokio::test]
    async fn test_job_prompt_without_system_prompt_is_single_turn() {
        let relay = Arc::new(MockRelay::completion("A resume"));
        let llm = LlmClient::new(relay.clone());
        let settings = Settings {
            system_prompt: "  ".to_string(),
            ..configured("gpt-4")
        };
        let job = JobPosting {
            title: "SRE".to_string(),
            company: "Globex".to_string(),
            description: "On-call".to_string(),
            requirements: Some("Linux".to_string()),
        };

        generate_for_job(&llm, &settings, &job).await.unwrap();

        let envelope = serde_json::to_value(relay.last_envelope().unwrap()).unwrap();
        assert_eq!(envelope["messages"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_output_serializes_flat_result_fields() {
        let output = GenerationOutput::from_result(GenerationResult {
            document: "DOC".to_string(),
            improvements_raw: "Projects: add one".to_string(),
        });
        let value = serde_json::to_value(&output).unwrap();
        assert_eq!(value["document"], "DOC");
        assert_eq!(value["improvements_raw"], "Projects: add one");
        assert_eq!(value["file_name"], RESUME_FILE_NAME);
        assert_eq!(value["improvements"][0]["category"], "projects");
    }
}
