pub mod settings;

pub use settings::{KnowledgeConfig, LoggingConfig, ModelConfig, ServerConfig, Settings};
