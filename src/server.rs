use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor, GovernorLayer,
};
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};

use crate::handlers::{self, AppState};

pub const MAX_BODY_BYTES: usize = 1024 * 1024;

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/leads", post(handlers::create_lead))
        .route(
            "/api/v1/leads",
            post(handlers::create_lead).get(handlers::list_leads),
        )
        .route("/api/v1/leads/qualify", post(handlers::qualify_lead))
        .route("/api/v1/enrich", post(handlers::enrich))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
}

fn finish(api: Router<Arc<AppState>>, state: Arc<AppState>) -> Router {
    // Health check sits outside the API layers so it is never rate limited.
    Router::new()
        .route("/health", get(handlers::health))
        .merge(api)
        .fallback(handlers::not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Application router without rate limiting; drivable with `oneshot` in tests.
pub fn router(state: Arc<AppState>) -> Router {
    finish(api_routes(), state)
}

/// Application router with per-IP rate limiting on the API routes.
///
/// Must be served with `into_make_service_with_connect_info::<SocketAddr>()`
/// so the key extractor can fall back to the peer address.
pub fn rate_limited_router(state: Arc<AppState>) -> anyhow::Result<Router> {
    // The builder takes a replenish interval, not a rate.
    let replenish_ms = (1000 / state.config.rate_limit_per_second.max(1)).max(1);
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_millisecond(replenish_ms)
            .burst_size(state.config.rate_limit_burst)
            .key_extractor(SmartIpKeyExtractor)
            .finish()
            .ok_or_else(|| anyhow::anyhow!("invalid rate limit configuration"))?,
    );

    tracing::info!(
        "Rate limiting: {} req/s per IP, burst {}",
        state.config.rate_limit_per_second,
        state.config.rate_limit_burst
    );

    let api = api_routes().layer(ServiceBuilder::new().layer(GovernorLayer {
        config: governor_conf,
    }));

    Ok(finish(api, state))
}
