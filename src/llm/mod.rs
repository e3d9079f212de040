//! Text-generation backend: configuration, port, and the Azure OpenAI adapter.

pub mod azure;
pub mod config;
pub mod generator;

pub use azure::AzureOpenAiClient;
pub use config::GenerationConfig;
pub use generator::{MessageGenerator, generate_draft};
