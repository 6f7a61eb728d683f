#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anseong_tour::ai::{ModelError, TextGenerator};
use anseong_tour::config::KnowledgeConfig;
use anseong_tour::{Dispatcher, KnowledgeBase};

/// Returns a fixed continuation of the prompt.
pub struct Echo;

impl TextGenerator for Echo {
    fn generate(&mut self, prompt: &str, _max_length: usize) -> Result<String, ModelError> {
        Ok(format!("{prompt} ... and the story goes on"))
    }

    fn name(&self) -> &str {
        "echo"
    }
}

/// Sleeps while tracking how many calls are inside `generate` at once.
pub struct Slow {
    pub delay: Duration,
    pub active: Arc<AtomicUsize>,
    pub peak: Arc<AtomicUsize>,
}

impl Slow {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            active: Arc::new(AtomicUsize::new(0)),
            peak: Arc::new(AtomicUsize::new(0)),
        }
    }
}

impl TextGenerator for Slow {
    fn generate(&mut self, prompt: &str, _max_length: usize) -> Result<String, ModelError> {
        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        thread::sleep(self.delay);
        self.active.fetch_sub(1, Ordering::SeqCst);
        Ok(format!("slow answer to {prompt}"))
    }
}

/// Fails the first `failures` calls, then answers.
pub struct Flaky {
    pub failures: usize,
}

impl TextGenerator for Flaky {
    fn generate(&mut self, _prompt: &str, _max_length: usize) -> Result<String, ModelError> {
        if self.failures > 0 {
            self.failures -= 1;
            return Err(ModelError::Generation("out of memory".to_string()));
        }
        Ok("recovered".to_string())
    }
}

pub fn anseong_dispatcher(generator: Box<dyn TextGenerator>) -> Arc<Dispatcher> {
    Arc::new(
        Dispatcher::new(
            Arc::new(KnowledgeBase::anseong()),
            generator,
            &KnowledgeConfig::default(),
            50,
        )
        .unwrap(),
    )
}
