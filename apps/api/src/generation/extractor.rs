//! Splits a raw generation reply into the LaTeX document and
//! the improvements notes using the tagged segment markers.
//!
//! Total: a reply that ignores the markers degrades to "whole reply is the
//! document" with the fixed sentinel as improvements. The degradation is logged,
//! never raised.

use serde::Serialize;
use tracing::warn;

use crate::llm_client::prompts::{IMPROVEMENTS_MARKER, LATEX_RESUME_MARKER, NO_IMPROVEMENTS_SENTINEL};

/// One generation reply, split. Ephemeral; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationResult {
    pub document: String,
    pub improvements_raw: String,
}

/// Primary path only: `Some` when the document marker is followed by the
/// improvements marker, `None` otherwise.
pub fn extract_tagged(raw: &str) -> Option<GenerationResult> {
    let doc_start = raw.find(LATEX_RESUME_MARKER)? + LATEX_RESUME_MARKER.len();
    let doc_len = raw[doc_start..].find(IMPROVEMENTS_MARKER)?;
    let improvements_start = doc_start + doc_len + IMPROVEMENTS_MARKER.len();

    Some(GenerationResult {
        document: raw[doc_start..doc_start + doc_len].trim().to_string(),
        improvements_raw: raw[improvements_start..].trim().to_string(),
    })
}

/// Splits `raw` into exactly one [`GenerationResult`]. Never fails.
pub fn extract(raw: &str) -> GenerationResult {
    extract_tagged(raw).unwrap_or_else(|| {
        warn!(
            "Reply did not contain {} followed by {} ({} chars); using whole reply as the document",
            LATEX_RESUME_MARKER,
            IMPROVEMENTS_MARKER,
            raw.len()
        );
        GenerationResult {
            document: raw.to_string(),
            improvements_raw: NO_IMPROVEMENTS_SENTINEL.to_string(),
        }
    })
}
