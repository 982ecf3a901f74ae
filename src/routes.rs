use axum::{
    extract::State,
    routing::get,
    Router,
    Json,
};
use serde_json::{json, Value};
use std::path::PathBuf;
use tower_http::services::{ServeDir, ServeFile};

use crate::ollama::ModelOptions;
use crate::state::AppState;

pub fn create_routes(state: AppState) -> Router<AppState> {
    let static_dir = PathBuf::from(&state.config.system_config.static_dir);

    Router::new()
        // Chat page
        .route_service("/", ServeFile::new(static_dir.join("index.html")))

        // WebSocket
        .route("/client-ws", get(crate::websocket::websocket_handler))

        // Health check
        .route("/api/health", get(health_check))

        // REST API routes
        .route("/api/models", get(get_models))
        .route("/api/sample-prompts", get(get_sample_prompts))

        // Static file serving
        .nest_service("/static", ServeDir::new(&static_dir))
}

async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let ollama = state.backend.is_available().await;
    Json(json!({
        "status": "ok",
        "ollama": ollama,
        "active_sessions": state.active_sessions()
    }))
}

async fn get_models(State(state): State<AppState>) -> Json<ModelOptions> {
    Json(state.model_options().await)
}

async fn get_sample_prompts(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "prompts": state.config.sample_prompts
    }))
}
