use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// What gets sent to the chat endpoint: a model name and the message list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

impl ChatRequest {
    /// A single-turn exchange: one "user" message carrying the prompt verbatim.
    pub fn single_user_turn(model: &str, prompt: &str) -> Self {
        Self {
            model: model.to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        }
    }
}

/// `GET /api/tags` response body.
#[derive(Debug, Deserialize)]
pub(crate) struct TagsResponse {
    #[serde(default)]
    pub models: Vec<TagModel>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TagModel {
    pub name: String,
}

/// Models the UI can offer, plus whether they came from the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelOptions {
    pub options: Vec<String>,
    pub default_model: String,
    pub discovered: bool,
}

impl ModelOptions {
    /// Prefer the discovered list; fall back to the configured common names.
    pub fn resolve(discovered: Vec<String>, fallback: &[String], default_model: &str) -> Self {
        let (options, discovered) = if discovered.is_empty() {
            (fallback.to_vec(), false)
        } else {
            (discovered, true)
        };
        let default_model = options
            .first()
            .cloned()
            .unwrap_or_else(|| default_model.to_string());
        Self {
            options,
            default_model,
            discovered,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_user_turn_shape() {
        let request = ChatRequest::single_user_turn("m", "P");
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"model": "m", "messages": [{"role": "user", "content": "P"}]})
        );
    }

    #[test]
    fn discovered_models_win() {
        let fallback = vec!["llama3.2".to_string()];
        let opts = ModelOptions::resolve(vec!["qwen3:8b".into(), "phi4".into()], &fallback, "llama3.2");
        assert!(opts.discovered);
        assert_eq!(opts.default_model, "qwen3:8b");
        assert_eq!(opts.options.len(), 2);
    }

    #[test]
    fn empty_discovery_uses_fallback() {
        let fallback = vec!["llama3.2".to_string(), "mistral".to_string()];
        let opts = ModelOptions::resolve(vec![], &fallback, "llama3.2");
        assert!(!opts.discovered);
        assert_eq!(opts.options, fallback);
        assert_eq!(opts.default_model, "llama3.2");
    }

    #[test]
    fn empty_fallback_still_has_default() {
        let opts = ModelOptions::resolve(vec![], &[], "llama3.2");
        assert!(opts.options.is_empty());
        assert_eq!(opts.default_model, "llama3.2");
    }
}
