use async_trait::async_trait;
use serde_json::Value;

use super::types::ChatRequest;

/// Boundary to the external inference server.
///
/// The probe methods never fail: any problem degrades to `false` or an
/// empty list. `chat` returns the raw reply so callers decide what a
/// well-formed answer looks like.
#[async_trait]
pub trait InferenceBackend: Send + Sync {
    /// True iff the listing endpoint answers 200 within the probe timeout.
    async fn is_available(&self) -> bool;

    /// Names of installed models; empty on any failure.
    async fn list_models(&self) -> Vec<String>;

    /// One blocking, non-streaming chat round trip.
    async fn chat(&self, request: &ChatRequest) -> anyhow::Result<Value>;
}
