use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lead_agents::capture::LeadCaptureService;
use lead_agents::config::{Config, LlmProvider};
use lead_agents::events::LeadEvents;
use lead_agents::extraction::{LeadExtractor, RegexExtractor};
use lead_agents::handlers::AppState;
use lead_agents::llm_client::OpenAiExtractor;
use lead_agents::qualification::QualificationService;
use lead_agents::repository::InMemoryLeadRepository;
use lead_agents::server;

/// Main entry point for the application.
///
/// This function initializes the application, including:
/// - Logging and tracing.
/// - Configuration loading.
/// - The extraction adapter selected by `LLM_PROVIDER`.
/// - Lead store, event channel and both services.
/// - HTTP routes and middleware (CORS, Rate Limiting).
///
/// It then starts the Axum server.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lead_agents=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;

    let extractor: Arc<dyn LeadExtractor> = match config.llm_provider {
        LlmProvider::OpenAi => {
            let client = OpenAiExtractor::from_config(&config)?;
            tracing::info!("✓ Model extractor initialized: {}", config.openai_model);
            Arc::new(client)
        }
        LlmProvider::Mock => {
            tracing::info!("✓ Regex extractor initialized (offline mode)");
            Arc::new(RegexExtractor::new())
        }
    };

    let events = LeadEvents::new();
    let capture = LeadCaptureService::new(
        extractor,
        Arc::new(InMemoryLeadRepository::new()),
        events,
    );
    let qualification = QualificationService::from_config(&config);
    tracing::info!(
        "Qualification engine ready (cost model: {})",
        config.qualification_model_id
    );

    // Build application state
    let app_state = Arc::new(AppState {
        config: config.clone(),
        capture,
        qualification,
    });

    let app = server::rate_limited_router(app_state)?;

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
