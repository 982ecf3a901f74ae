use async_trait::async_trait;
use serde_json::Value;
use std::sync::Mutex;

use super::inference_interface::InferenceBackend;
use super::types::ChatRequest;

/// In-memory backend that records every chat request it receives.
pub struct MockBackend {
    pub available: bool,
    pub models: Vec<String>,
    reply: Result<Value, String>,
    pub requests: Mutex<Vec<ChatRequest>>,
}

impl MockBackend {
    /// Available, with the given models, answering every chat with `reply`.
    pub fn replying(models: &[&str], reply: Value) -> Self {
        Self {
            available: true,
            models: models.iter().map(|m| m.to_string()).collect(),
            reply: Ok(reply),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Available, but every chat call fails with `reason`.
    pub fn failing(reason: &str) -> Self {
        Self {
            available: true,
            models: vec!["llama3.2".to_string()],
            reply: Err(reason.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            available: false,
            models: Vec::new(),
            reply: Err("connection refused".to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn recorded(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl InferenceBackend for MockBackend {
    async fn is_available(&self) -> bool {
        self.available
    }

    async fn list_models(&self) -> Vec<String> {
        self.models.clone()
    }

    async fn chat(&self, request: &ChatRequest) -> anyhow::Result<Value> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.reply {
            Ok(value) => Ok(value.clone()),
            Err(reason) => Err(anyhow::anyhow!("{}", reason)),
        }
    }
}
