//! Extraction adapters: free-form text in, four lead fields out.
//!
//! `LeadExtractor` is the seam the capture flow depends on. The model-backed
//! implementation lives in `llm_client`; `RegexExtractor` here is the
//! deterministic stand-in used offline and in tests.
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{ExtractionResult, DEFAULT_CAPTURE_SOURCE};

/// Why an extraction adapter could not produce fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractionError {
    #[error("model API key is not configured")]
    CredentialMissing,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("upstream returned {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    #[error("unparseable model response: {0}")]
    UnparseableResponse(String),
}

/// Turns arbitrary text into `full_name`/`email`/`phone`/`source`.
#[async_trait]
pub trait LeadExtractor: Send + Sync {
    /// Adapter identifier for logs.
    fn name(&self) -> &str;

    async fn extract(&self, text: &str) -> Result<ExtractionResult, ExtractionError>;
}

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[a-zA-Z0-9_.+\-]+@[a-zA-Z0-9\-]+\.[a-zA-Z0-9\-.]+").expect("valid email regex")
});

// ASCII digits only, so every match survives `normalize_phone`.
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:\+?[0-9][\s\-()]?){7,15}").expect("valid phone regex"));

// Whole pattern is case-insensitive: "i'm looking for a house" yields "looking for a house".
static NAME_PHRASES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)\bmy name is\s+([A-Z][a-zA-Z]*(?:\s+[A-Z][a-zA-Z]*){0,3})",
        r"(?i)\b(?:I am|I'm)\s+([A-Z][a-zA-Z]*(?:\s+[A-Z][a-zA-Z]*){0,3})",
        r"(?i)\bthis is\s+([A-Z][a-zA-Z]*(?:\s+[A-Z][a-zA-Z]*){0,3})",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid name phrase regex"))
    .collect()
});

static TWO_CAPITALIZED_WORDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b([A-Z][a-zA-Z]+\s+[A-Z][a-zA-Z]+)\b").expect("valid name regex")
});

static CAPITALIZED_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b([A-Z][a-zA-Z]+)\b").expect("valid name regex"));

/// Regex heuristics over the raw text. Never fails; unmatched fields are empty.
#[derive(Debug, Clone, Default)]
pub struct RegexExtractor;

impl RegexExtractor {
    pub fn new() -> Self {
        Self
    }

    /// First match wins: lead-in phrases, then two capitalized words, then one.
    pub fn extract_name(text: &str) -> String {
        for pattern in NAME_PHRASES.iter() {
            if let Some(caps) = pattern.captures(text) {
                return caps[1].trim().to_string();
            }
        }

        if let Some(caps) = TWO_CAPITALIZED_WORDS.captures(text) {
            return caps[1].trim().to_string();
        }

        CAPITALIZED_WORD
            .captures(text)
            .map(|caps| caps[1].trim().to_string())
            .unwrap_or_default()
    }

    pub fn extract_email(text: &str) -> String {
        EMAIL_RE
            .find(text)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default()
    }

    pub fn extract_phone(text: &str) -> String {
        PHONE_RE
            .find(text)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default()
    }

    pub fn extract_fields(text: &str) -> ExtractionResult {
        ExtractionResult {
            full_name: Self::extract_name(text),
            email: Self::extract_email(text),
            phone: Self::extract_phone(text),
            source: DEFAULT_CAPTURE_SOURCE.to_string(),
        }
    }
}

#[async_trait]
impl LeadExtractor for RegexExtractor {
    fn name(&self) -> &str {
        "regex"
    }

    async fn extract(&self, text: &str) -> Result<ExtractionResult, ExtractionError> {
        Ok(Self::extract_fields(text))
    }
}

static FENCED_JSON: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```json\s*(\{.*?\})\s*```").expect("valid fence regex"));

static FENCED_ANY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```\s*(\{.*?\})\s*```").expect("valid fence regex"));

static FIRST_OBJECT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{[\s\S]*\}").expect("valid object regex"));

/// Locates the JSON object in free-form model output.
///
/// Tries a ```json fence, any fence, then the widest `{...}` span, and
/// finally the whole content.
pub fn locate_json_object(content: &str) -> &str {
    if let Some(caps) = FENCED_JSON.captures(content) {
        if let Some(m) = caps.get(1) {
            return m.as_str();
        }
    }
    if let Some(caps) = FENCED_ANY.captures(content) {
        if let Some(m) = caps.get(1) {
            return m.as_str();
        }
    }
    FIRST_OBJECT
        .find(content)
        .map(|m| m.as_str())
        .unwrap_or(content)
}

/// Parses model output into fields. The payload must be a JSON object.
pub fn parse_extraction_content(content: &str) -> Result<ExtractionResult, ExtractionError> {
    let candidate = locate_json_object(content.trim());
    let value: serde_json::Value = serde_json::from_str(candidate)
        .map_err(|e| ExtractionError::UnparseableResponse(e.to_string()))?;

    if !value.is_object() {
        return Err(ExtractionError::UnparseableResponse(
            "model response is not a JSON object".to_string(),
        ));
    }

    Ok(ExtractionResult::from_json(&value))
}
