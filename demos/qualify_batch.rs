use anyhow::Result;
use lead_agents::config::Config;
use lead_agents::models::{Budget, LeadInput};
use lead_agents::qualification::QualificationService;
use std::collections::HashMap;

fn sample_leads() -> Vec<LeadInput> {
    let mut leads = Vec::new();

    let mut lead = LeadInput::new("demo-001", "tenant-123", "sarah.johnson@techstartup.com");
    lead.phone = Some("+1-555-987-6543".to_string());
    lead.budget = Some(Budget::Text("$450,000".to_string()));
    lead.years_in_city = Some(5);
    lead.occupation = Some("Product Manager".to_string());
    lead.source = "referral".to_string();
    lead.metadata = HashMap::from([
        ("property_interest".to_string(), "3-bedroom house downtown".into()),
        ("timeline".to_string(), "3-6 months".into()),
    ]);
    leads.push(lead);

    let mut lead = LeadInput::new("demo-002", "tenant-123", "mike.ross@gmail.com");
    lead.phone = Some("+1-555-222-3333".to_string());
    lead.budget = Some(Budget::Integer(220_000));
    lead.years_in_city = Some(2);
    lead.source = "google-ads".to_string();
    leads.push(lead);

    let mut lead = LeadInput::new("demo-003", "tenant-123", "test@gmail.com");
    lead.budget = Some(Budget::Text("$50,000".to_string()));
    lead.source = "organic".to_string();
    leads.push(lead);

    leads.push(LeadInput::new("demo-004", "tenant-123", "no-reply@yahoo.com"));

    leads
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    println!("=== Batch Lead Qualification ===\n");

    let config = Config::from_env()?;
    let service = QualificationService::from_config(&config);

    let leads = sample_leads();
    let total = leads.len();
    let mut qualified = 0;
    let mut review = 0;
    let mut total_cost = 0.0;

    for (idx, lead) in leads.iter().enumerate() {
        println!("[{}/{}] Qualifying {} ({})", idx + 1, total, lead.id, lead.email);

        match service.qualify(lead).await {
            Ok(report) => {
                println!(
                    "  ✓ {} - score {}/100, {} confidence",
                    report.status,
                    report.qualification.total_score,
                    report.qualification.confidence
                );
                if let Some(reason) = &report.decision.human_review_reason {
                    println!("    review: {}", reason);
                }
                if report.decision.status == lead_agents::models::QualificationStatus::Qualified {
                    qualified += 1;
                }
                if report.decision.requires_human_review {
                    review += 1;
                }
                total_cost += report.cost;
            }
            Err(e) => println!("  ✗ Qualification failed: {}", e),
        }
    }

    println!("\n=== Batch Qualification Complete ===");
    println!("Total processed: {}", total);
    println!("✓ Qualified: {}", qualified);
    println!("⚑ Human review: {}", review);
    println!(
        "Estimated cost ({}): ${:.6}",
        config.qualification_model_id, total_cost
    );

    Ok(())
}
