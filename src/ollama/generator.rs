use serde_json::Value;
use tracing::debug;

use super::inference_interface::InferenceBackend;
use super::types::ChatRequest;
use crate::error::GenerationError;

/// Send `prompt` to `model` as a single user message and return the reply text.
///
/// The prompt is forwarded as-is, empty or not. Transport failures and
/// replies without a string `message.content` both come back as
/// [`GenerationError`]. No retry.
pub async fn generate(
    backend: &dyn InferenceBackend,
    prompt: &str,
    model: &str,
) -> Result<String, GenerationError> {
    let request = ChatRequest::single_user_turn(model, prompt);
    debug!("Sending {} char prompt to model {}", prompt.len(), model);

    let reply = backend.chat(&request).await?;

    reply
        .pointer("/message/content")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| GenerationError::new(format!("reply has no message.content: {}", reply)))
}
