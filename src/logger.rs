use tracing::{debug, error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::settings::LoggingConfig;

/// Prefixes every message with a component name.
#[derive(Debug, Clone)]
pub struct Logger {
    name: String,
}

impl Logger {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }

    pub fn info(&self, message: &str) {
        info!("[{}] {}", self.name, message);
    }

    pub fn warn(&self, message: &str) {
        warn!("[{}] {}", self.name, message);
    }

    pub fn error(&self, message: &str) {
        error!("[{}] {}", self.name, message);
    }

    pub fn debug(&self, message: &str) {
        debug!("[{}] {}", self.name, message);
    }
}

/// `RUST_LOG` takes precedence over `config.level`.
pub fn init(config: &LoggingConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    let result = if config.json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer())
            .try_init()
    };

    result.map_err(|e| anyhow::anyhow!("Failed to set global subscriber: {}", e))
}
