//! Minimal DOCX text extraction: reads `word/document.xml` out of the zip
//! container and flattens WordprocessingML to plain text.

use std::io::{Cursor, Read};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::documents::{DocumentError, MAX_DOCUMENT_BYTES};

const DOCUMENT_PART: &str = "word/document.xml";

static PARAGRAPH_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"</w:p>|<w:br\s*/>|<w:cr\s*/>").expect("valid break regex"));
static TAB: Lazy<Regex> = Lazy::new(|| Regex::new(r"<w:tab\s*/>").expect("valid tab regex"));
static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("valid tag regex"));
static NUMERIC_ENTITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&#(?:[xX]([0-9a-fA-F]+)|([0-9]+));").expect("valid entity regex"));

/// Inflated `word/document.xml` may not exceed the upload ceiling.
pub fn extract_docx_text(bytes: &[u8]) -> Result<String, DocumentError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
    let mut part = archive.by_name(DOCUMENT_PART)?;

    let mut raw = Vec::new();
    (&mut part)
        .take(MAX_DOCUMENT_BYTES as u64 + 1)
        .read_to_end(&mut raw)?;
    if raw.len() > MAX_DOCUMENT_BYTES {
        return Err(DocumentError::TooLarge {
            size: usize::try_from(part.size()).unwrap_or(usize::MAX).max(raw.len()),
        });
    }

    let xml = String::from_utf8(raw)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    Ok(xml_to_text(&xml))
}

fn xml_to_text(xml: &str) -> String {
    let text = PARAGRAPH_BREAK.replace_all(xml, "\n");
    let text = TAB.replace_all(&text, " ");
    let text = TAG.replace_all(&text, "");
    decode_entities(&text)
}

fn decode_entities(text: &str) -> String {
    let text = NUMERIC_ENTITY.replace_all(text, |caps: &regex::Captures| {
        let code = match (caps.get(1), caps.get(2)) {
            (Some(hex), _) => u32::from_str_radix(hex.as_str(), 16).ok(),
            (_, Some(dec)) => dec.as_str().parse::<u32>().ok(),
            _ => None,
        };
        // Out-of-range references are left as written.
        code.and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_else(|| caps[0].to_string())
    });
    // `&amp;` last so "&amp;lt;" decodes to "&lt;", not "<".
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
