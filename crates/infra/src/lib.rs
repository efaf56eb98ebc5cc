//! Infrastructure layer: storage adapters, external service clients, config.

pub mod config;
pub mod inference;
pub mod repository;

pub use config::{ConfigError, InferenceConfig, ServerConfig};
pub use inference::OpenAiInferenceClient;
pub use repository::InMemoryInventoryRepository;
