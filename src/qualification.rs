//! Lead qualification workflow
//!
//! 1. Enrich the lead from its email (failure degrades to no enrichment)
//! 2. Score budget, intent, readiness and engagement
//! 3. Decide status and whether a human must review
//! 4. Render the narrative summary and estimate model cost
use chrono::Utc;
use serde_json::json;
use std::sync::Arc;

use crate::config::Config;
use crate::cost::calculate_cost;
use crate::decision::make_qualification_decision;
use crate::enrichment::{DomainHeuristicEnricher, EnrichmentError, LeadEnricher};
use crate::errors::AppError;
use crate::models::{Decision, EnrichmentResult, LeadInput, QualificationReport, QualificationScore};
use crate::scoring::{
    calculate_qualification_score, BUDGET_MAX, ENGAGEMENT_SCORE, INTENT_MAX, READINESS_MAX,
};

pub const QUALIFICATION_SYSTEM_PROMPT: &str = "You are a lead qualification specialist. \
Enrich the lead, calculate its qualification score and make a qualification decision. \
Explain the score breakdown, strengths, concerns and next steps.";

#[derive(Clone)]
pub struct QualificationService {
    enricher: Arc<dyn LeadEnricher>,
    model_id: String,
    review_threshold: u32,
}

impl QualificationService {
    pub fn new(enricher: Arc<dyn LeadEnricher>, model_id: impl Into<String>, review_threshold: u32) -> Self {
        Self {
            enricher,
            model_id: model_id.into(),
            review_threshold,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Arc::new(DomainHeuristicEnricher),
            config.qualification_model_id.clone(),
            config.review_threshold,
        )
    }

    /// Qualifies a lead end to end.
    ///
    /// # Arguments
    ///
    /// * `lead` - Lead record; only `email` is required
    ///
    /// # Returns
    ///
    /// * `Ok(QualificationReport)` - Score, decision, narrative and cost
    /// * `Err(AppError::BadRequest)` - Email has no `@`
    pub async fn qualify(&self, lead: &LeadInput) -> Result<QualificationReport, AppError> {
        tracing::info!("Qualifying lead {} (tenant {})", lead.id, lead.tenant_id);

        let enrichment = match self.enricher.enrich(&lead.email, lead.phone.as_deref()).await {
            Ok(result) => Some(result),
            Err(err @ EnrichmentError::MissingDomain(_)) => return Err(err.into()),
            Err(err) => {
                tracing::warn!("Enrichment failed for lead {}, proceeding with original data: {}", lead.id, err);
                None
            }
        };

        let score = calculate_qualification_score(lead, enrichment.as_ref());
        let decision = make_qualification_decision(&score, self.review_threshold);

        let response = render_summary(lead, enrichment.as_ref(), &score, &decision);
        let cost_breakdown = calculate_cost(&render_prompt(lead), &response, &self.model_id);

        tracing::info!(
            "Lead {} -> {} ({}/100), est. cost ${:.6}",
            lead.id,
            decision.status.label(),
            score.total_score,
            cost_breakdown.total_cost
        );

        Ok(QualificationReport {
            status: decision.status.label().to_string(),
            score: Some(score.total_score),
            response,
            cost: cost_breakdown.total_cost,
            cost_breakdown,
            enrichment,
            qualification: score,
            decision,
        })
    }
}

impl Default for QualificationService {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Prompt text a model-backed qualifier would receive; sized for the cost estimate.
pub fn render_prompt(lead: &LeadInput) -> String {
    let lead_json = json!({
        "id": lead.id,
        "tenant_id": lead.tenant_id,
        "email": lead.email,
        "phone": lead.phone,
        "budget": lead.budget,
        "years_in_city": lead.years_in_city,
        "occupation": lead.occupation,
        "source": lead.source,
        "created_at": lead.created_at.unwrap_or_else(Utc::now),
        "metadata": lead.metadata,
    });
    let pretty = serde_json::to_string_pretty(&lead_json).unwrap_or_else(|_| lead_json.to_string());

    format!(
        "{}\n\nPlease qualify this lead:\n\n{}",
        QUALIFICATION_SYSTEM_PROMPT, pretty
    )
}

fn or_not_provided(value: Option<String>) -> String {
    value.unwrap_or_else(|| "Not provided".to_string())
}

fn bullet_list(items: &[String], empty: &str) -> String {
    if items.is_empty() {
        return format!("- {}", empty);
    }
    items
        .iter()
        .map(|item| format!("- {}", item))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Markdown summary of a qualification run.
pub fn render_summary(
    lead: &LeadInput,
    enrichment: Option<&EnrichmentResult>,
    score: &QualificationScore,
    decision: &Decision,
) -> String {
    let budget = or_not_provided(lead.budget.as_ref().filter(|b| b.is_present()).map(|b| b.to_string()));
    let years = or_not_provided(lead.years_in_city.filter(|y| *y > 0).map(|y| y.to_string()));
    let occupation = or_not_provided(lead.occupation.clone().filter(|o| !o.trim().is_empty()));

    let company = enrichment
        .and_then(|e| e.company_info.as_ref())
        .map(|c| c.name.clone())
        .unwrap_or_else(|| "Personal email".to_string());
    let income = enrichment
        .map(|e| e.estimated_income.clone())
        .unwrap_or_else(|| "Unknown".to_string());
    let stable = if enrichment.is_some_and(|e| e.credit_indicators.has_stable_employment) {
        "Yes"
    } else {
        "Unknown"
    };

    let note = decision
        .human_review_reason
        .as_ref()
        .map(|reason| format!("Note: {}\n", reason))
        .unwrap_or_default();

    let next_steps = decision
        .next_steps
        .iter()
        .enumerate()
        .map(|(i, step)| format!("{}. {}", i + 1, step))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Based on my analysis of the lead {email}, here are my findings:

**Lead Information:**
- Email: {email}
- Budget: {budget}
- Source: {source}
- Years in City: {years}
- Occupation: {occupation}

**Enrichment Results:**
- Company: {company}
- Estimated Income: {income}
- Employment Stability: {stable}

**Qualification Score Breakdown:**
- Budget Score: {budget_score}/{budget_max}
- Intent Score: {intent_score}/{intent_max}
- Readiness Score: {readiness_score}/{readiness_max}
- Engagement Score: {engagement_score}/{engagement_max}
- **Total Score: {total}/100** ({confidence} confidence)

**Analysis:**
{reasoning}

**Strengths:**
{strengths}

**Concerns:**
{concerns}

**Decision: {status}**
{note}
**Recommended Next Steps:**
{next_steps}
",
        email = lead.email,
        source = lead.source,
        budget_score = score.budget_score,
        budget_max = BUDGET_MAX,
        intent_score = score.intent_score,
        intent_max = INTENT_MAX,
        readiness_score = score.readiness_score,
        readiness_max = READINESS_MAX,
        engagement_score = score.engagement_score,
        engagement_max = ENGAGEMENT_SCORE,
        total = score.total_score,
        confidence = score.confidence,
        reasoning = score.reasoning,
        strengths = bullet_list(&score.strengths, "No specific strengths identified"),
        concerns = bullet_list(&score.concerns, "No major concerns"),
        status = decision.status.label(),
    )
}
