use thiserror::Error;

/// Prefix every generation failure carries when shown to the user.
pub const GENERATION_ERROR_MARKER: &str = "Error communicating with Ollama: ";

/// A single chat round trip to the inference server failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}{}", GENERATION_ERROR_MARKER, .reason)]
pub struct GenerationError {
    pub reason: String,
}

impl GenerationError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }
}

impl From<anyhow::Error> for GenerationError {
    fn from(err: anyhow::Error) -> Self {
        Self::new(err.to_string())
    }
}

/// The two failures an interaction can surface to the browser.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("Ollama is not running or not accessible")]
    Unavailable,

    #[error(transparent)]
    Generation(#[from] GenerationError),
}
