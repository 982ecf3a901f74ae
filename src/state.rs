use std::sync::Arc;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use uuid::Uuid;

use crate::chat_history::SessionLog;
use crate::config::Config;
use crate::ollama::{InferenceBackend, ModelOptions, OllamaClient};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub backend: Arc<dyn InferenceBackend>,
    pub client_contexts: Arc<DashMap<String, ClientContext>>,
}

#[derive(Clone)]
pub struct ClientContext {
    pub client_uid: String,
    pub connected_at: DateTime<Utc>,
}

/// Everything one browser session owns. Created when the socket opens and
/// dropped with it, taking the conversation log along.
pub struct ChatSession {
    pub client_uid: String,
    pub selected_model: String,
    pub log: SessionLog,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let backend = Arc::new(OllamaClient::from_config(&config.ollama_config));
        Self::with_backend(config, backend)
    }

    pub fn with_backend(config: Config, backend: Arc<dyn InferenceBackend>) -> Self {
        Self {
            config,
            backend,
            client_contexts: Arc::new(DashMap::new()),
        }
    }

    pub fn generate_client_uid(&self) -> String {
        Uuid::new_v4().to_string()
    }

    /// Discovered models, or the configured fallback list when none are installed.
    pub async fn model_options(&self) -> ModelOptions {
        let ollama = &self.config.ollama_config;
        ModelOptions::resolve(
            self.backend.list_models().await,
            &ollama.fallback_models,
            &ollama.default_model,
        )
    }

    pub fn open_session(&self) -> ChatSession {
        let client_uid = self.generate_client_uid();
        self.client_contexts.insert(
            client_uid.clone(),
            ClientContext {
                client_uid: client_uid.clone(),
                connected_at: Utc::now(),
            },
        );
        ChatSession {
            client_uid,
            selected_model: self.config.ollama_config.default_model.clone(),
            log: SessionLog::new(),
        }
    }

    pub fn close_session(&self, session: ChatSession) {
        if let Some((_, context)) = self.client_contexts.remove(&session.client_uid) {
            let lasted = Utc::now() - context.connected_at;
            tracing::info!(
                "Closed session {} after {}s with {} turn(s)",
                context.client_uid,
                lasted.num_seconds(),
                session.log.len()
            );
        }
    }

    pub fn active_sessions(&self) -> usize {
        self.client_contexts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ollama::mock::MockBackend;

    #[test]
    fn sessions_are_tracked_until_closed() {
        let state = AppState::with_backend(Config::default(), Arc::new(MockBackend::unavailable()));

        let first = state.open_session();
        let second = state.open_session();
        assert_ne!(first.client_uid, second.client_uid);
        assert_eq!(state.active_sessions(), 2);
        assert_eq!(first.selected_model, "llama3.2");
        assert!(first.log.is_empty());

        state.close_session(first);
        assert_eq!(state.active_sessions(), 1);
        state.close_session(second);
        assert_eq!(state.active_sessions(), 0);
    }

    #[tokio::test]
    async fn model_options_fall_back_when_nothing_installed() {
        let state = AppState::with_backend(Config::default(), Arc::new(MockBackend::unavailable()));

        let options = state.model_options().await;

        assert!(!options.discovered);
        assert_eq!(options.options, state.config.ollama_config.fallback_models);
        assert_eq!(options.default_model, "llama3.2");
    }
}
