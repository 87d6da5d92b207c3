use anyhow::Result;
use lead_agents::capture::LeadCaptureService;
use lead_agents::events::LeadEvents;
use lead_agents::extraction::RegexExtractor;
use lead_agents::repository::InMemoryLeadRepository;
use std::sync::Arc;

// Captures a few messages with the regex extractor; no model API key needed.
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    println!("=== Offline Lead Capture ===\n");

    let events = LeadEvents::new();
    let mut notifications = events.subscribe();
    let service = LeadCaptureService::new(
        Arc::new(RegexExtractor::new()),
        Arc::new(InMemoryLeadRepository::new()),
        events,
    );

    let messages = [
        "Hi, my name is John Doe. You can reach me at John.Doe@Example.com or 555-123-4567.",
        "This is Priya Sharma. Met you at the open house, priya@sharma.dev",
        "call back +44 20 7946 0958, ask for Alex",
        "no contact details at all",
    ];

    for text in messages {
        let lead = service.capture(text).await?;
        println!("✓ {} | {} | {} | {}", lead.full_name, lead.email, lead.phone, lead.source);
    }

    let mut created = 0;
    while notifications.try_recv().is_ok() {
        created += 1;
    }

    println!("\nStored leads: {}", service.list().len());
    println!("lead.created events: {}", created);

    Ok(())
}
