//! Document ingestion. Turns an uploaded resume (DOCX or PDF) into plain text
//! used to prefix chat turns and ground generation.
//!
//! Every failure here is a non-fatal warning for the caller: the session simply
//! continues without document content.

pub mod docx;

use bytes::Bytes;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use tracing::{info, warn};

/// Upload size ceiling.
pub const MAX_DOCUMENT_BYTES: usize = 10 * 1024 * 1024;

/// Extracted text shorter than this is treated as a failed extraction.
const MIN_TEXT_CHARS: usize = 10;

const RESUME_KEYWORDS: &[&str] = &[
    "experience",
    "education",
    "skills",
    "work",
    "job",
    "position",
    "company",
    "university",
    "degree",
];

static HORIZONTAL_WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ \t\u{a0}]+").expect("valid whitespace regex"));
static BLANK_LINES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n[ \t]*(\n[ \t]*)+").expect("valid blank-line regex"));

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("File is too large ({size} bytes). Please upload a file smaller than 10MB.")]
    TooLarge { size: usize },

    #[error("Unsupported file '{0}'. Please upload a valid DOCX or PDF file.")]
    Unsupported(String),

    #[error("Failed to extract text from DOCX file: {0}")]
    Docx(#[from] zip::result::ZipError),

    #[error("Failed to read document: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to extract text from PDF file: {0}")]
    Pdf(String),

    #[error("Could not extract meaningful text from the document. The file might be corrupted or empty.")]
    NoText,

    #[error("Document processing was interrupted: {0}")]
    Interrupted(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Docx,
    Pdf,
}

impl DocumentKind {
    /// Detects the format from the file extension, falling back to the MIME type.
    pub fn detect(file_name: &str, content_type: Option<&str>) -> Option<Self> {
        let lower = file_name.to_lowercase();
        if lower.ends_with(".docx") {
            return Some(DocumentKind::Docx);
        }
        if lower.ends_with(".pdf") {
            return Some(DocumentKind::Pdf);
        }
        match content_type {
            Some(ct) if ct.contains("wordprocessingml") || ct.contains("docx") => {
                Some(DocumentKind::Docx)
            }
            Some("application/pdf") => Some(DocumentKind::Pdf),
            _ => None,
        }
    }
}

/// Collapses runs of spaces and blank lines; trims the result.
pub fn clean_text(text: &str) -> String {
    let text = text.replace("\r\n", "\n");
    let text = HORIZONTAL_WHITESPACE.replace_all(&text, " ");
    let text = BLANK_LINES.replace_all(&text, "\n");
    text.lines()
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

pub fn looks_like_resume(text: &str) -> bool {
    let lower = text.to_lowercase();
    RESUME_KEYWORDS.iter().any(|k| lower.contains(k))
}

/// Extracts cleaned text from an uploaded document.
pub fn extract_text(
    file_name: &str,
    content_type: Option<&str>,
    bytes: &[u8],
) -> Result<String, DocumentError> {
    if bytes.len() > MAX_DOCUMENT_BYTES {
        return Err(DocumentError::TooLarge { size: bytes.len() });
    }

    let kind = DocumentKind::detect(file_name, content_type)
        .ok_or_else(|| DocumentError::Unsupported(file_name.to_string()))?;

    let raw = match kind {
        DocumentKind::Docx => docx::extract_docx_text(bytes)?,
        DocumentKind::Pdf => {
            pdf_extract::extract_text_from_mem(bytes).map_err(|e| DocumentError::Pdf(e.to_string()))?
        }
    };

    if raw.len() > MAX_DOCUMENT_BYTES {
        return Err(DocumentError::TooLarge { size: raw.len() });
    }

    let text = clean_text(&raw);
    if text.chars().count() < MIN_TEXT_CHARS {
        return Err(DocumentError::NoText);
    }
    if !looks_like_resume(&text) {
        warn!("'{file_name}' may not be a resume - continuing anyway");
    }

    info!(
        "Document '{file_name}' ({kind:?}) parsed: {} characters",
        text.len()
    );
    Ok(text)
}

/// [`extract_text`] on the blocking pool. Inflating, parsing and cleaning a
/// document are CPU-bound; a panic inside a parser comes back as `Interrupted`.
pub async fn extract_text_blocking(
    file_name: String,
    content_type: Option<String>,
    bytes: Bytes,
) -> Result<String, DocumentError> {
    run_blocking(move || extract_text(&file_name, content_type.as_deref(), &bytes)).await
}

async fn run_blocking<F>(job: F) -> Result<String, DocumentError>
where
    F: FnOnce() -> Result<String, DocumentError> + Send + 'static,
{
    tokio::task::spawn_blocking(job)
        .await
        .unwrap_or_else(|e| Err(DocumentError::Interrupted(e.to_string())))
}
