//! Lead qualification scoring.
//!
//! Four sub-scores, each capped:
//!
//! | Component  | Max | Driven by                                   |
//! |------------|-----|---------------------------------------------|
//! | budget     | 30  | presence and size of the stated budget      |
//! | intent     | 25  | lead source                                 |
//! | readiness  | 25  | years in city, employment stability         |
//! | engagement | 20  | fixed placeholder                           |
use crate::models::{Budget, Confidence, EnrichmentResult, LeadInput, QualificationScore};

pub const BUDGET_MAX: u32 = 30;
pub const INTENT_MAX: u32 = 25;
pub const READINESS_MAX: u32 = 25;
pub const ENGAGEMENT_SCORE: u32 = 20;

const HIGH_INTENT_SOURCES: [&str; 3] = ["direct", "referral", "property-listing"];
const MEDIUM_INTENT_SOURCES: [&str; 2] = ["google-ads", "facebook-ads"];

/// Budget tiers as (minimum amount, bonus), checked top-down.
const BUDGET_TIERS: [(i128, u32); 4] = [(500_000, 20), (300_000, 15), (200_000, 10), (100_000, 5)];

const FAST_TRACK: [&str; 3] = [
    "Fast-track to sales team",
    "Schedule property viewing within 48 hours",
    "Assign senior sales agent",
];
const NURTURE: [&str; 3] = [
    "Nurture with targeted content",
    "Schedule discovery call",
    "Send market analysis report",
];
const LONG_TERM_NURTURE: [&str; 3] = [
    "Add to long-term nurture campaign",
    "Send educational content series",
    "Re-evaluate in 3 months",
];

pub fn budget_score(budget: Option<&Budget>) -> u32 {
    let Some(budget) = budget.filter(|b| b.is_present()) else {
        return 0;
    };

    let bonus = match budget.amount() {
        Some(amount) => BUDGET_TIERS
            .iter()
            .find(|(minimum, _)| amount >= *minimum)
            .map(|(_, bonus)| *bonus)
            .unwrap_or(0),
        None => 5,
    };

    (10 + bonus).min(BUDGET_MAX)
}

pub fn intent_score(source: Option<&str>) -> u32 {
    match source {
        Some(s) if HIGH_INTENT_SOURCES.contains(&s) => 20,
        Some(s) if MEDIUM_INTENT_SOURCES.contains(&s) => 15,
        _ => 10,
    }
}

pub fn readiness_score(years_in_city: Option<u32>, enrichment: Option<&EnrichmentResult>) -> u32 {
    let tenure = match years_in_city.unwrap_or(0) {
        y if y >= 5 => 15,
        y if y >= 2 => 10,
        y if y >= 1 => 5,
        _ => 0,
    };

    let stability = match enrichment {
        Some(e) if e.credit_indicators.has_stable_employment => 10,
        _ => 0,
    };

    tenure + stability
}

pub fn confidence(has_budget: bool, has_enrichment: bool) -> Confidence {
    match (has_budget, has_enrichment) {
        (true, true) => Confidence::High,
        (false, false) => Confidence::Low,
        _ => Confidence::Medium,
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Scores a lead. Pure: no I/O, never fails; missing fields lower the score.
pub fn calculate_qualification_score(
    lead: &LeadInput,
    enrichment: Option<&EnrichmentResult>,
) -> QualificationScore {
    let budget_score = budget_score(lead.budget.as_ref());
    let intent_score = intent_score(Some(lead.source.as_str()));
    let readiness_score = readiness_score(lead.years_in_city, enrichment);
    let engagement_score = ENGAGEMENT_SCORE;

    let total_score = budget_score + intent_score + readiness_score + engagement_score;
    let confidence = confidence(lead.has_budget(), enrichment.is_some());

    let mut strengths = Vec::new();
    if budget_score >= 20 {
        strengths.push("Strong budget alignment".to_string());
    }
    if intent_score >= 15 {
        strengths.push("High purchase intent from quality source".to_string());
    }
    if readiness_score >= 15 {
        strengths.push("Stable and ready to move forward".to_string());
    }

    let mut concerns = Vec::new();
    if budget_score < 15 {
        concerns.push("Budget may be insufficient".to_string());
    }
    if !lead.has_phone() {
        concerns.push("No phone number provided".to_string());
    }

    let (recommendations, tier_clause) = if total_score >= 70 {
        (
            to_strings(&FAST_TRACK),
            "Highly qualified lead ready for immediate sales engagement.",
        )
    } else if total_score >= 50 {
        (
            to_strings(&NURTURE),
            "Moderate qualification, needs nurturing before sales.",
        )
    } else {
        (
            to_strings(&LONG_TERM_NURTURE),
            "Low qualification, requires long-term nurturing.",
        )
    };

    let reasoning = format!(
        "Lead scored {}/100 with {} confidence. {}",
        total_score, confidence, tier_clause
    );

    tracing::debug!(
        lead_id = %lead.id,
        budget_score,
        intent_score,
        readiness_score,
        total_score,
        confidence = %confidence,
        "Lead scored"
    );

    QualificationScore {
        budget_score,
        intent_score,
        readiness_score,
        engagement_score,
        total_score,
        confidence,
        reasoning,
        strengths,
        concerns,
        recommendations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrichment::enrich_lead;

    fn text(s: &str) -> Budget {
        Budget::Text(s.to_string())
    }

    #[test]
    fn test_budget_tiers() {
        assert_eq!(budget_score(None), 0);
        assert_eq!(budget_score(Some(&text(""))), 0);
        assert_eq!(budget_score(Some(&text("$50,000"))), 10);
        assert_eq!(budget_score(Some(&text("$100,000"))), 15);
        assert_eq!(budget_score(Some(&text("$250,000"))), 20);
        assert_eq!(budget_score(Some(&text("$450,000"))), 25);
        assert_eq!(budget_score(Some(&text("$750,000"))), 30);
        assert_eq!(budget_score(Some(&Budget::Integer(300_000))), 25);
    }

    #[test]
    fn test_budget_without_digits_gets_flat_bonus() {
        assert_eq!(budget_score(Some(&text("flexible"))), 15);
    }

    #[test]
    fn test_intent_by_source() {
        assert_eq!(intent_score(Some("referral")), 20);
        assert_eq!(intent_score(Some("facebook-ads")), 15);
        assert_eq!(intent_score(Some("organic")), 10);
        assert_eq!(intent_score(None), 10);
    }

    #[test]
    fn test_readiness() {
        let corporate = enrich_lead("a@acme.io", None).unwrap();
        let consumer = enrich_lead("a@gmail.com", None).unwrap();

        assert_eq!(readiness_score(None, None), 0);
        assert_eq!(readiness_score(Some(1), None), 5);
        assert_eq!(readiness_score(Some(3), Some(&consumer)), 10);
        assert_eq!(readiness_score(Some(5), Some(&corporate)), 25);
    }

    #[test]
    fn test_confidence_matrix() {
        assert_eq!(confidence(true, true), Confidence::High);
        assert_eq!(confidence(true, false), Confidence::Medium);
        assert_eq!(confidence(false, true), Confidence::Medium);
        assert_eq!(confidence(false, false), Confidence::Low);
    }

    #[test]
    fn test_high_quality_lead() {
        let mut lead = LeadInput::new("test-001", "tenant-123", "sarah.johnson@techstartup.com");
        lead.phone = Some("+1-555-987-6543".to_string());
        lead.budget = Some(text("$450,000"));
        lead.years_in_city = Some(5);
        lead.source = "referral".to_string();
        let enrichment = enrich_lead(&lead.email, lead.phone.as_deref()).unwrap();

        let score = calculate_qualification_score(&lead, Some(&enrichment));

        assert_eq!(score.budget_score, 25);
        assert_eq!(score.intent_score, 20);
        assert_eq!(score.readiness_score, 25);
        assert_eq!(score.engagement_score, 20);
        assert_eq!(score.total_score, 90);
        assert_eq!(score.confidence, Confidence::High);
        assert_eq!(score.strengths.len(), 3);
        assert!(score.concerns.is_empty());
        assert_eq!(score.recommendations[0], "Fast-track to sales team");
        assert_eq!(
            score.reasoning,
            "Lead scored 90/100 with high confidence. Highly qualified lead ready for immediate sales engagement."
        );
    }

    #[test]
    fn test_sparse_lead_is_low_confidence() {
        let mut lead = LeadInput::new("x", "t", "someone@gmail.com");
        lead.source = "cold-call".to_string();

        let score = calculate_qualification_score(&lead, None);

        assert_eq!(score.total_score, 30);
        assert_eq!(score.confidence, Confidence::Low);
        assert_eq!(
            score.concerns,
            vec!["Budget may be insufficient", "No phone number provided"]
        );
        assert_eq!(score.recommendations[0], "Add to long-term nurture campaign");
    }
}
