mod config;
mod errors;
mod fairness;
mod interview;
mod llm_client;
mod models;
mod render;
mod routes;
mod skills;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::fairness::store::ResultStore;
use crate::llm_client::{ChatModel, GroqClient};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Fairview v{}", env!("CARGO_PKG_VERSION"));

    // A missing key is not fatal: the dashboards still work without the model.
    let llm: Option<Arc<dyn ChatModel>> = match &config.groq_api_key {
        Some(key) => {
            let client: Arc<dyn ChatModel> = Arc::new(GroqClient::new(
                key.clone(),
                config.model_url.clone(),
                config.model_timeout,
            )?);
            info!(
                "LLM client initialized (model: {}, timeout: {:?})",
                config.model, config.model_timeout
            );
            Some(client)
        }
        None => {
            warn!("GROQ_API_KEY is not set; question generation and scoring are disabled");
            None
        }
    };

    let store = ResultStore::new(config.results_path.clone());
    info!("Recording results to {}", store.path().display());

    let state = AppState::new(llm, config.model.clone(), store);

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
