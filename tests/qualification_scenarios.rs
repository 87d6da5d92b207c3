/// Scenario tests for the qualification flow
/// Scores, decisions and reports for representative leads
use lead_agents::decision::make_qualification_decision;
use lead_agents::enrichment::enrich_lead;
use lead_agents::models::{Budget, Confidence, LeadInput, QualificationStatus};
use lead_agents::qualification::QualificationService;
use lead_agents::scoring::{budget_score, calculate_qualification_score, intent_score};

fn lead(email: &str) -> LeadInput {
    LeadInput::new("lead-test", "tenant-test", email)
}

#[test]
fn test_currency_formatted_budget_hits_300k_tier() {
    assert_eq!(budget_score(Some(&Budget::Text("$450,000".to_string()))), 25);
    assert_eq!(budget_score(Some(&Budget::Integer(450_000))), 25);
    assert_eq!(budget_score(Some(&Budget::Text("$1,200,000".to_string()))), 30);
    assert_eq!(budget_score(Some(&Budget::Text("about 50k".to_string()))), 10);
    assert_eq!(budget_score(Some(&Budget::Text("flexible".to_string()))), 15);
    assert_eq!(budget_score(None), 0);
}

#[test]
fn test_intent_by_source() {
    for source in ["direct", "referral", "property-listing"] {
        assert_eq!(intent_score(Some(source)), 20, "{}", source);
    }
    for source in ["google-ads", "facebook-ads"] {
        assert_eq!(intent_score(Some(source)), 15, "{}", source);
    }
    for source in ["organic", "Referral", ""] {
        assert_eq!(intent_score(Some(source)), 10, "{}", source);
    }
    assert_eq!(intent_score(None), 10);
}

#[test]
fn test_consumer_lead_with_small_budget_needs_review() {
    let mut input = lead("test@gmail.com");
    input.budget = Some(Budget::Text("$50,000".to_string()));
    input.source = "organic".to_string();

    let enrichment = enrich_lead(&input.email, None).unwrap();
    let score = calculate_qualification_score(&input, Some(&enrichment));

    assert_eq!(score.budget_score, 10);
    assert_eq!(score.intent_score, 10);
    assert_eq!(score.readiness_score, 0);
    assert_eq!(score.engagement_score, 20);
    assert_eq!(score.total_score, 40);
    // Budget and enrichment are both present, consumer domain or not.
    assert_eq!(score.confidence, Confidence::High);
    assert_eq!(
        score.concerns,
        vec!["Budget may be insufficient", "No phone number provided"]
    );

    let decision = make_qualification_decision(&score, 65);
    assert_eq!(decision.status, QualificationStatus::NeedsReview);
    assert!(decision.requires_human_review);
    assert_eq!(
        decision.human_review_reason.as_deref(),
        Some("Borderline qualification score")
    );
    assert_eq!(decision.next_steps[0], "Queue for human review within 4 hours");
    assert_eq!(decision.next_steps[1], "Add to long-term nurture campaign");
    assert_eq!(decision.qualified_by, "lead-qualification-engine");
}

#[test]
fn test_no_budget_no_enrichment_is_low_confidence() {
    let mut input = lead("someone@acme.io");
    input.source = "cold-call".to_string();

    let score = calculate_qualification_score(&input, None);
    assert_eq!(score.total_score, 30);
    assert_eq!(score.confidence, Confidence::Low);
    assert_eq!(
        score.reasoning,
        "Lead scored 30/100 with low confidence. Low qualification, requires long-term nurturing."
    );

    let decision = make_qualification_decision(&score, 65);
    assert_eq!(decision.status, QualificationStatus::NotQualified);
    assert!(decision.requires_human_review);
    assert_eq!(
        decision.human_review_reason.as_deref(),
        Some("Low confidence due to insufficient data")
    );
}

#[tokio::test]
async fn test_corporate_referral_qualifies() {
    let mut input = lead("sarah.johnson@techstartup.com");
    input.phone = Some("+1-555-987-6543".to_string());
    input.budget = Some(Budget::Integer(350_000));
    input.years_in_city = Some(3);
    input.occupation = Some("Software Engineer".to_string());
    input.source = "referral".to_string();

    let report = QualificationService::default().qualify(&input).await.unwrap();

    // 25 budget + 20 intent + (10 tenure + 10 stability) + 20 engagement
    assert_eq!(report.score, Some(85));
    assert_eq!(report.status, "QUALIFIED");
    assert_eq!(report.qualification.confidence, Confidence::High);
    assert!(report.qualification.concerns.is_empty());
    assert_eq!(
        report.qualification.strengths,
        vec![
            "Strong budget alignment",
            "High purchase intent from quality source",
            "Stable and ready to move forward"
        ]
    );
    assert!(!report.decision.requires_human_review);
    assert_eq!(report.decision.next_steps.len(), 3);

    let enrichment = report.enrichment.unwrap();
    assert!(enrichment.is_corporate_email);
    assert_eq!(enrichment.company_info.unwrap().name, "Techstartup");
    assert!(report.response.contains("- No major concerns"));
    assert!(report.response.contains("- Occupation: Software Engineer"));
}

#[tokio::test]
async fn test_report_serializes_for_http_clients() {
    let report = QualificationService::default()
        .qualify(&lead("test@gmail.com"))
        .await
        .unwrap();

    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["status"], "NEEDS REVIEW");
    assert_eq!(value["score"], 40);
    assert_eq!(value["decision"]["status"], "needs_review");
    assert_eq!(value["qualification"]["confidence"], "medium");
    assert!(value["cost"].as_f64().unwrap() > 0.0);
    assert!(value["enrichment"].get("company_info").is_none());
}
