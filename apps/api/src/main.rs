use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use interview_api::config::Config;
use interview_api::llm_client::{self, LlmBackend, LlmClient};
use interview_api::routes::build_router;
use interview_api::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed numeric env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Interview API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client; without a key the model-backed routes answer 503
    let llm: Option<Arc<dyn LlmBackend>> = match &config.anthropic_api_key {
        Some(api_key) => {
            let client = LlmClient::new(
                api_key.clone(),
                Duration::from_secs(config.llm_timeout_secs),
                config.llm_max_attempts,
            )?;
            info!(
                "LLM client initialized (model: {}, attempts: {})",
                llm_client::MODEL,
                config.llm_max_attempts
            );
            Some(Arc::new(client) as Arc<dyn LlmBackend>)
        }
        None => {
            warn!("ANTHROPIC_API_KEY not set; /interview and /evaluate will return 503");
            None
        }
    };

    let state = AppState {
        llm,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict CORS to the web client's origin

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
