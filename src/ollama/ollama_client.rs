use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::inference_interface::InferenceBackend;
use super::types::{ChatRequest, TagsResponse};
use crate::config::OllamaConfig;

/// HTTP client for a local Ollama server.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    client: Client,
    base_url: String,
    probe_timeout: Duration,
}

/// Wire body for `POST /api/chat`; streaming is always off.
#[derive(Serialize)]
struct ChatBody<'a> {
    #[serde(flatten)]
    request: &'a ChatRequest,
    stream: bool,
}

impl OllamaClient {
    pub fn new(base_url: String, probe_timeout: Duration) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        info!("Initialized OllamaClient: base_url={}, probe_timeout={:?}", base_url, probe_timeout);
        Self {
            // No client-wide timeout: generation waits as long as the server takes.
            client: Client::new(),
            base_url,
            probe_timeout,
        }
    }

    pub fn from_config(config: &OllamaConfig) -> Self {
        Self::new(
            config.base_url.clone(),
            Duration::from_secs(config.probe_timeout_secs),
        )
    }

    fn tags_url(&self) -> String {
        format!("{}/api/tags", self.base_url)
    }

    fn chat_url(&self) -> String {
        format!("{}/api/chat", self.base_url)
    }

    async fn fetch_models(&self) -> anyhow::Result<Vec<String>> {
        let response = self
            .client
            .get(self.tags_url())
            .timeout(self.probe_timeout)
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            anyhow::bail!("Ollama API returned status: {}", response.status());
        }

        let tags: TagsResponse = response.json().await?;
        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }
}

#[async_trait]
impl InferenceBackend for OllamaClient {
    async fn is_available(&self) -> bool {
        match self
            .client
            .get(self.tags_url())
            .timeout(self.probe_timeout)
            .send()
            .await
        {
            Ok(response) => {
                let ok = response.status() == StatusCode::OK;
                if !ok {
                    debug!("Ollama probe returned status {}", response.status());
                }
                ok
            }
            Err(e) => {
                debug!("Ollama probe failed: {}", e);
                false
            }
        }
    }

    async fn list_models(&self) -> Vec<String> {
        match self.fetch_models().await {
            Ok(models) => {
                debug!("Ollama lists {} model(s)", models.len());
                models
            }
            Err(e) => {
                warn!("Could not list Ollama models: {}", e);
                Vec::new()
            }
        }
    }

    async fn chat(&self, request: &ChatRequest) -> anyhow::Result<Value> {
        let body = ChatBody {
            request,
            stream: false,
        };
        let response = self.client.post(self.chat_url()).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let snippet: String = text.chars().take(200).collect();
            anyhow::bail!("HTTP {}: {}", status, snippet);
        }

        Ok(response.json().await?)
    }
}
