mod config;
mod state;
mod websocket;
mod routes;
mod handlers;
mod chat_history;
mod error;
mod ollama;
mod utils;

use anyhow::Result;
use axum::Router;
use std::net::SocketAddr;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use config::Config;
use ollama::InferenceBackend;
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("ollama_chat_web=debug,tower_http=debug")),
        )
        .init();

    let (config, loaded_path) = Config::discover(&Config::candidate_paths())?;
    match loaded_path {
        Some(path) => info!("Loaded configuration from: {}", path),
        None => info!("No config file found, using built-in defaults"),
    }

    let app_state = AppState::new(config.clone());

    // Startup probe is informational only; each session re-checks on connect.
    if app_state.backend.is_available().await {
        let models = app_state.backend.list_models().await;
        info!("Ollama reachable at {} with {} model(s)", config.ollama_config.base_url, models.len());
    } else {
        warn!(
            "Ollama is not reachable at {}; run `ollama serve` and reload the page",
            config.ollama_config.base_url
        );
    }

    // Build application
    let app = Router::new()
        .merge(routes::create_routes(app_state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server
    let host: std::net::IpAddr = config.system_config.host.parse()?;
    let addr = SocketAddr::from((host, config.system_config.port));
    info!("Starting server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
