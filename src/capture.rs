//! Lead capture flow
//!
//! 1. Extract fields from free text (model-backed or regex adapter)
//! 2. Normalize email/phone/source, discarding malformed emails
//! 3. Build the `Lead` with a fresh id
//! 4. Append it to the repository
//! 5. Publish `lead.created` (fire-and-forget)
use std::sync::Arc;
use uuid::Uuid;

use crate::errors::{AppError, ResultExt};
use crate::events::{LeadEvent, LeadEvents};
use crate::extraction::LeadExtractor;
use crate::models::Lead;
use crate::normalization::{normalize_phone, normalize_source, sanitize_email};
use crate::repository::LeadRepository;

#[derive(Clone)]
pub struct LeadCaptureService {
    extractor: Arc<dyn LeadExtractor>,
    repository: Arc<dyn LeadRepository>,
    events: LeadEvents,
}

impl LeadCaptureService {
    pub fn new(
        extractor: Arc<dyn LeadExtractor>,
        repository: Arc<dyn LeadRepository>,
        events: LeadEvents,
    ) -> Self {
        Self {
            extractor,
            repository,
            events,
        }
    }

    /// Captures one lead from free text.
    ///
    /// # Errors
    ///
    /// Extraction failures are fatal for the request; nothing is stored.
    pub async fn capture(&self, input_text: &str) -> Result<Lead, AppError> {
        tracing::info!(
            "Capturing lead via '{}' extractor ({} chars)",
            self.extractor.name(),
            input_text.chars().count()
        );

        let extracted = self
            .extractor
            .extract(input_text)
            .await
            .context("extracting lead fields")?;

        let lead = Lead {
            id: Uuid::new_v4(),
            full_name: extracted.full_name.trim().to_string(),
            email: sanitize_email(&extracted.email),
            phone: normalize_phone(&extracted.phone),
            source: normalize_source(&extracted.source),
        };

        self.repository.add(lead.clone());
        self.events.publish(LeadEvent::Created { lead_id: lead.id });

        Ok(lead)
    }

    pub fn list(&self) -> Vec<Lead> {
        self.repository.list()
    }
}
