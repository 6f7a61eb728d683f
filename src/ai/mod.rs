pub mod decoding;
pub mod gpt2;
pub mod local_llm;

pub use decoding::{CausalLm, DecodingConfig};
pub use local_llm::LocalLlm;

/// Text completion over a pretrained model.
///
/// `generate` takes `&mut self` because generation mutates model buffers;
/// shared callers must hold exclusive access for the whole call.
pub trait TextGenerator: Send {
    fn generate(&mut self, prompt: &str, max_length: usize) -> Result<String, ModelError>;

    fn name(&self) -> &str {
        "text-generator"
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Failed to fetch {file}: {message}")]
    Hub { file: String, message: String },

    #[error("Unsupported device: {0}")]
    Device(String),

    #[error("Invalid model config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),

    #[error("Tokenizer error: {0}")]
    Tokenizer(String),

    #[error("Tensor error: {0}")]
    Tensor(#[from] candle_core::Error),

    #[error("Model returned no logits")]
    EmptyLogits,

    #[error("Generation failed: {0}")]
    Generation(String),
}
