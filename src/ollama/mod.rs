pub mod inference_interface;
pub mod ollama_client;
pub mod generator;
pub mod types;
#[cfg(test)]
pub mod mock;

pub use inference_interface::*;
pub use ollama_client::*;
pub use generator::*;
pub use types::*;
