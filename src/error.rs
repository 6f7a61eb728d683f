use crate::ai::ModelError;
use crate::dispatcher::DispatchError;
use crate::knowledge::KnowledgeError;

/// Top-level error for startup and the CLI.
#[derive(Debug, thiserror::Error)]
pub enum TourError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Knowledge base error: {0}")]
    Knowledge(#[from] KnowledgeError),

    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("Dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),

    #[error("Server error: {0}")]
    Server(String),
}

pub type Result<T> = std::result::Result<T, TourError>;
