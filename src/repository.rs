use std::sync::RwLock;

use crate::models::Lead;

/// Storage seam for captured leads. Append-only: no update or delete path.
pub trait LeadRepository: Send + Sync {
    fn add(&self, lead: Lead);

    /// Snapshot copy of every stored lead, in insertion order.
    fn list(&self) -> Vec<Lead>;
}

/// Process-local store. Lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryLeadRepository {
    leads: RwLock<Vec<Lead>>,
}

impl InMemoryLeadRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LeadRepository for InMemoryLeadRepository {
    fn add(&self, lead: Lead) {
        // A panicked writer cannot leave a half-pushed Vec behind, so the data is still usable.
        let mut leads = self
            .leads
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        leads.push(lead);
    }

    fn list(&self) -> Vec<Lead> {
        self.leads
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}
