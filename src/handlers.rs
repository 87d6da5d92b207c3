use crate::capture::LeadCaptureService;
use crate::config::Config;
use crate::enrichment::enrich_lead;
use crate::errors::AppError;
use crate::models::*;
use crate::qualification::QualificationService;
use axum::{
    extract::State,
    http::{StatusCode, Uri},
    Json,
};
use serde_json::json;
use std::sync::Arc;

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Config,
    /// Capture flow: extractor, lead store and event channel.
    pub capture: LeadCaptureService,
    /// Qualification flow: enrichment, scoring and decision.
    pub qualification: QualificationService,
}

/// Health check endpoint.
///
/// # Returns
///
/// * `(StatusCode, Json<serde_json::Value>)` - HTTP 200 OK with health status JSON.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "lead-agents",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

/// POST /leads and POST /api/v1/leads
///
/// Captures a lead from free text and stores it.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `payload` - `{"text": "..."}`; blank text is rejected before extraction.
///
/// # Returns
///
/// * `Result<(StatusCode, Json<Lead>), AppError>` - HTTP 201 with the stored lead.
pub async fn create_lead(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LeadCaptureRequest>,
) -> Result<(StatusCode, Json<Lead>), AppError> {
    if payload.text.trim().is_empty() {
        return Err(AppError::BadRequest("text must not be empty".to_string()));
    }

    tracing::info!("POST /leads - {} chars", payload.text.chars().count());

    let lead = state.capture.capture(&payload.text).await?;

    tracing::info!("✓ Lead {} captured (source: {})", lead.id, lead.source);
    Ok((StatusCode::CREATED, Json(lead)))
}

/// GET /api/v1/leads
pub async fn list_leads(State(state): State<Arc<AppState>>) -> Json<Vec<Lead>> {
    Json(state.capture.list())
}

/// POST /api/v1/leads/qualify
///
/// # Returns
///
/// * `Result<Json<QualificationReport>, AppError>` - Score, decision, narrative and cost,
///   or 400 when the email has no `@`.
pub async fn qualify_lead(
    State(state): State<Arc<AppState>>,
    Json(lead): Json<LeadInput>,
) -> Result<Json<QualificationReport>, AppError> {
    tracing::info!("POST /api/v1/leads/qualify - lead_id: {}", lead.id);

    let report = state.qualification.qualify(&lead).await?;
    Ok(Json(report))
}

/// Fallback for unknown routes.
pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("no route for {}", uri.path()))
}

/// POST /api/v1/enrich
pub async fn enrich(Json(payload): Json<EnrichRequest>) -> Result<Json<EnrichmentResult>, AppError> {
    tracing::info!("POST /api/v1/enrich - email: {}", payload.email);

    let result = enrich_lead(&payload.email, payload.phone.as_deref())?;
    Ok(Json(result))
}
