//! Heuristic lead enrichment from the email domain.
//!
//! Stands in for a people-data API: corporate domains are read as a signal of
//! higher income and stable employment. Pure and deterministic, no I/O.
use async_trait::async_trait;

use crate::models::{CompanyInfo, CreditIndicators, EnrichmentResult};

/// Consumer webmail domains; anything else is treated as a corporate address.
pub const CONSUMER_EMAIL_DOMAINS: [&str; 5] = [
    "gmail.com",
    "yahoo.com",
    "hotmail.com",
    "outlook.com",
    "icloud.com",
];

pub const CORPORATE_INCOME_BRACKET: &str = "$75,000-$125,000";
pub const CONSUMER_INCOME_BRACKET: &str = "$50,000-$100,000";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnrichmentError {
    /// The email has no `@`, so there is no domain to classify.
    #[error("email '{0}' has no domain part")]
    MissingDomain(String),

    /// The enrichment provider could not be reached or answered badly.
    #[error("enrichment provider unavailable: {0}")]
    Unavailable(String),
}

/// Enrichment seam, so a remote people-data provider can replace the heuristic.
#[async_trait]
pub trait LeadEnricher: Send + Sync {
    async fn enrich(
        &self,
        email: &str,
        phone: Option<&str>,
    ) -> Result<EnrichmentResult, EnrichmentError>;
}

/// The email-domain heuristic behind the `LeadEnricher` seam.
#[derive(Debug, Clone, Default)]
pub struct DomainHeuristicEnricher;

#[async_trait]
impl LeadEnricher for DomainHeuristicEnricher {
    async fn enrich(
        &self,
        email: &str,
        phone: Option<&str>,
    ) -> Result<EnrichmentResult, EnrichmentError> {
        enrich_lead(email, phone)
    }
}

/// Title-cases a label word by word: `acme-corp` -> `Acme-Corp`.
fn title_case(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut word_start = true;
    for c in label.chars() {
        if c.is_alphabetic() {
            if word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            word_start = false;
        } else {
            out.push(c);
            word_start = true;
        }
    }
    out
}

/// Exact, case-sensitive match against the consumer list.
pub fn is_corporate_domain(domain: &str) -> bool {
    !CONSUMER_EMAIL_DOMAINS.contains(&domain)
}

/// Enriches a lead from its email address.
///
/// The phone number is accepted for parity with real enrichment providers but
/// does not influence the heuristic.
///
/// # Errors
///
/// `EnrichmentError::MissingDomain` when the email has no `@`.
pub fn enrich_lead(email: &str, _phone: Option<&str>) -> Result<EnrichmentResult, EnrichmentError> {
    // Domain is the segment between the first and second `@`; anything after is ignored.
    let mut segments = email.split('@');
    let local = segments.next().unwrap_or_default();
    let domain = segments
        .next()
        .ok_or_else(|| EnrichmentError::MissingDomain(email.to_string()))?;

    let is_corporate = is_corporate_domain(domain);

    let (company_info, linkedin_profile) = if is_corporate {
        let first_label = domain.split('.').next().unwrap_or_default();
        (
            Some(CompanyInfo {
                name: title_case(first_label),
                industry: "Technology".to_string(),
                size: "100-500".to_string(),
            }),
            Some(format!("https://linkedin.com/in/{}", local)),
        )
    } else {
        (None, None)
    };

    tracing::debug!(
        "Enriched {}: corporate={}, company={:?}",
        email,
        is_corporate,
        company_info.as_ref().map(|c| c.name.as_str())
    );

    Ok(EnrichmentResult {
        email: email.to_string(),
        is_corporate_email: is_corporate,
        estimated_income: if is_corporate {
            CORPORATE_INCOME_BRACKET.to_string()
        } else {
            CONSUMER_INCOME_BRACKET.to_string()
        },
        credit_indicators: CreditIndicators {
            has_stable_employment: is_corporate,
            likely_homeowner: false,
        },
        company_info,
        linkedin_profile,
    })
}
