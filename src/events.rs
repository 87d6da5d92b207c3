use serde::Serialize;
use tokio::sync::broadcast;
use uuid::Uuid;

const CHANNEL_CAPACITY: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event")]
pub enum LeadEvent {
    #[serde(rename = "lead.created")]
    Created { lead_id: Uuid },
}

/// Fire-and-forget lead notifications.
///
/// Publishing never blocks and never fails: with no subscribers the event is
/// only logged, and slow subscribers lag rather than back-pressure capture.
#[derive(Debug, Clone)]
pub struct LeadEvents {
    sender: broadcast::Sender<LeadEvent>,
}

impl Default for LeadEvents {
    fn default() -> Self {
        Self::new()
    }
}

impl LeadEvents {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<LeadEvent> {
        self.sender.subscribe()
    }

    pub fn publish(&self, event: LeadEvent) {
        match &event {
            LeadEvent::Created { lead_id } => {
                tracing::info!(event = "lead.created", %lead_id, "Lead created");
            }
        }
        let _ = self.sender.send(event);
    }
}
