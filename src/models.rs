use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

pub const DEFAULT_CAPTURE_SOURCE: &str = "manual";
pub const DEFAULT_LEAD_SOURCE: &str = "direct";

// ============ Capture Flow ============

/// A prospective customer's contact record captured from free text.
///
/// Fields are already normalized when a `Lead` exists: email is lower-case and
/// either empty or well-formed, phone holds digits only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub source: String,
}

/// Request body for the capture endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct LeadCaptureRequest {
    pub text: String,
}

/// The four raw fields produced by an extraction adapter, before normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub source: String,
}

impl ExtractionResult {
    /// Builds a result from loosely-typed upstream JSON.
    ///
    /// Missing or `null` keys become empty strings, scalars are rendered as
    /// text and a blank `source` collapses to `"manual"`.
    pub fn from_json(value: &serde_json::Value) -> Self {
        let field = |key: &str| -> String {
            match value.get(key) {
                Some(serde_json::Value::String(s)) => s.trim().to_string(),
                Some(serde_json::Value::Number(n)) => n.to_string(),
                Some(serde_json::Value::Bool(b)) => b.to_string(),
                _ => String::new(),
            }
        };

        let source = field("source");
        Self {
            full_name: field("full_name"),
            email: field("email"),
            phone: field("phone"),
            source: if source.is_empty() {
                DEFAULT_CAPTURE_SOURCE.to_string()
            } else {
                source
            },
        }
    }
}

// ============ Qualification Flow ============

/// Budget as supplied by the caller: either a number or free text such as
/// `"$450,000"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Budget {
    Integer(i64),
    Decimal(f64),
    Text(String),
}

impl Budget {
    /// Zero and blank budgets count as "not provided".
    pub fn is_present(&self) -> bool {
        match self {
            Budget::Integer(n) => *n != 0,
            Budget::Decimal(n) => *n != 0.0,
            Budget::Text(s) => !s.trim().is_empty(),
        }
    }

    /// Numeric amount: the value itself for numbers, the concatenated digits
    /// for text. `None` when text carries no digits.
    pub fn amount(&self) -> Option<i128> {
        match self {
            Budget::Integer(n) => Some(*n as i128),
            Budget::Decimal(n) if n.is_finite() => Some(n.trunc() as i128),
            Budget::Decimal(_) => None,
            Budget::Text(s) => {
                let digits: String = s.chars().filter(|c| c.is_ascii_digit()).collect();
                if digits.is_empty() {
                    return None;
                }
                // Digit runs too long for i128 are far above every tier.
                Some(digits.parse::<i128>().unwrap_or(i128::MAX))
            }
        }
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Budget::Integer(n) => write!(f, "{}", n),
            Budget::Decimal(n) => write!(f, "{}", n),
            Budget::Text(s) => write!(f, "{}", s),
        }
    }
}

fn default_lead_source() -> String {
    DEFAULT_LEAD_SOURCE.to_string()
}

/// Lead record handed to the qualification flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadInput {
    pub id: String,
    pub tenant_id: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub budget: Option<Budget>,
    #[serde(default)]
    pub years_in_city: Option<u32>,
    #[serde(default)]
    pub occupation: Option<String>,
    #[serde(default = "default_lead_source")]
    pub source: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl LeadInput {
    pub fn new(id: impl Into<String>, tenant_id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tenant_id: tenant_id.into(),
            email: email.into(),
            phone: None,
            budget: None,
            years_in_city: None,
            occupation: None,
            source: default_lead_source(),
            created_at: None,
            metadata: HashMap::new(),
        }
    }

    pub fn has_budget(&self) -> bool {
        self.budget.as_ref().is_some_and(Budget::is_present)
    }

    pub fn has_phone(&self) -> bool {
        self.phone.as_deref().is_some_and(|p| !p.trim().is_empty())
    }
}

/// Company block attached to corporate-domain enrichments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyInfo {
    pub name: String,
    pub industry: String,
    pub size: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditIndicators {
    pub has_stable_employment: bool,
    pub likely_homeowner: bool,
}

/// Heuristic signals derived from a lead's email domain. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichmentResult {
    pub email: String,
    pub is_corporate_email: bool,
    pub estimated_income: String,
    pub credit_indicators: CreditIndicators,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_info: Option<CompanyInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin_profile: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
            Confidence::Low => "low",
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Weighted 0-100 composite of the four sub-scores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualificationScore {
    /// 0-30
    pub budget_score: u32,
    /// 0-25
    pub intent_score: u32,
    /// 0-25
    pub readiness_score: u32,
    /// Fixed at 20.
    pub engagement_score: u32,
    pub total_score: u32,
    pub confidence: Confidence,
    pub reasoning: String,
    pub strengths: Vec<String>,
    pub concerns: Vec<String>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualificationStatus {
    Qualified,
    NeedsReview,
    NotQualified,
}

impl QualificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualificationStatus::Qualified => "qualified",
            QualificationStatus::NeedsReview => "needs_review",
            QualificationStatus::NotQualified => "not_qualified",
        }
    }

    /// Upper-case label used in summaries, e.g. `NEEDS REVIEW`.
    pub fn label(&self) -> &'static str {
        match self {
            QualificationStatus::Qualified => "QUALIFIED",
            QualificationStatus::NeedsReview => "NEEDS REVIEW",
            QualificationStatus::NotQualified => "NOT QUALIFIED",
        }
    }
}

impl fmt::Display for QualificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub status: QualificationStatus,
    pub requires_human_review: bool,
    pub human_review_reason: Option<String>,
    pub next_steps: Vec<String>,
    pub qualified_at: DateTime<Utc>,
    pub qualified_by: String,
}

/// Estimated model spend for one qualification run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostEstimate {
    pub model_id: String,
    pub input_tokens: usize,
    pub output_tokens: usize,
    pub input_cost: f64,
    pub output_cost: f64,
    pub total_cost: f64,
    pub timestamp: DateTime<Utc>,
}

/// Response of the qualification entry point.
#[derive(Debug, Clone, Serialize)]
pub struct QualificationReport {
    pub status: String,
    pub score: Option<u32>,
    pub response: String,
    pub cost: f64,
    pub cost_breakdown: CostEstimate,
    pub enrichment: Option<EnrichmentResult>,
    pub qualification: QualificationScore,
    pub decision: Decision,
}

/// Request body for the standalone enrichment endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct EnrichRequest {
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
}
