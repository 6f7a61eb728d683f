use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::ai::{ModelError, TextGenerator};
use crate::config::KnowledgeConfig;
use crate::knowledge::{KnowledgeBase, LocationEntry};

/// What the dispatcher hands back to a presentation surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchResult {
    LocationList(Vec<LocationEntry>),
    GeneratedText(String),
}

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("Generation failed: {0}")]
    Generation(#[from] ModelError),

    #[error("Dispatch worker failed: {0}")]
    Worker(String),

    #[error("Trigger phrases must not be empty")]
    EmptyTriggerPhrase,
}

/// Rule matching over the knowledge base with a language model fallback.
///
/// The generator sits behind one mutex and every `respond` call holds it from
/// start to finish, so callers on any surface are served one at a time.
pub struct Dispatcher {
    knowledge: Arc<KnowledgeBase>,
    generator: Mutex<Box<dyn TextGenerator>>,
    trigger_phrases: Vec<String>,
    recommendation_count: usize,
    max_length: usize,
}

impl Dispatcher {
    pub fn new(
        knowledge: Arc<KnowledgeBase>,
        generator: Box<dyn TextGenerator>,
        config: &KnowledgeConfig,
        max_length: usize,
    ) -> Result<Self, DispatchError> {
        if config.trigger_phrases.iter().any(|phrase| phrase.is_empty()) {
            return Err(DispatchError::EmptyTriggerPhrase);
        }

        info!(
            locations = knowledge.len(),
            generator = generator.name(),
            "Dispatcher ready"
        );

        Ok(Self {
            knowledge,
            generator: Mutex::new(generator),
            trigger_phrases: config.trigger_phrases.clone(),
            recommendation_count: config.recommendation_count,
            max_length,
        })
    }

    /// Answers one user message. Blocks the calling thread while waiting for
    /// the model lock and while generating; call from a blocking context.
    ///
    /// # Panics
    ///
    /// Panics when called from inside an async runtime, because the model
    /// lock is taken with [`Mutex::blocking_lock`]. Async callers use
    /// [`Dispatcher::ask`].
    pub fn respond(&self, user_input: &str) -> Result<DispatchResult, DispatchError> {
        let mut generator = self.generator.blocking_lock();

        if self
            .trigger_phrases
            .iter()
            .any(|phrase| user_input.contains(phrase.as_str()))
        {
            debug!("Matched recommendation trigger");
            return Ok(DispatchResult::LocationList(
                self.knowledge.top(self.recommendation_count),
            ));
        }

        if let Some(entry) = self.knowledge.find_by_name_substring(user_input) {
            debug!(location = %entry.name, "Matched known location");
            return Ok(DispatchResult::LocationList(vec![entry.clone()]));
        }

        debug!("No rule matched, falling back to generation");
        let text = generator.generate(user_input, self.max_length)?;
        Ok(DispatchResult::GeneratedText(text))
    }

    /// Async entry point for the servers: runs `respond` on the blocking pool.
    pub async fn ask(self: Arc<Self>, user_input: String) -> Result<DispatchResult, DispatchError> {
        tokio::task::spawn_blocking(move || self.respond(&user_input))
            .await
            .map_err(|e| DispatchError::Worker(e.to_string()))?
    }
}
