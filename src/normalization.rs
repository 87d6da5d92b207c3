//! Field normalization and validation for captured leads.
//!
//! None of these functions fail: a value that does not survive validation is
//! coerced to an empty string and the lead is still stored.
use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::DEFAULT_CAPTURE_SOURCE;

static EMAIL_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

/// Trim and lower-case an email address.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Accepts `local@domain.tld` shapes: one `@`, no whitespace, a dot after the `@`.
pub fn is_valid_email(email: &str) -> bool {
    !email.is_empty() && EMAIL_SHAPE.is_match(email)
}

/// Strip every non-digit character. No length check happens here.
pub fn normalize_phone(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Trimmed source, with blank values collapsing to `"manual"`.
pub fn normalize_source(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        DEFAULT_CAPTURE_SOURCE.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Normalized email, or an empty string when the value is malformed.
pub fn sanitize_email(raw: &str) -> String {
    let email = normalize_email(raw);
    if email.is_empty() || is_valid_email(&email) {
        email
    } else {
        tracing::warn!("Discarding malformed email: {}", email);
        String::new()
    }
}
