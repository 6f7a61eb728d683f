use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_TRIGGER_PHRASES: [&str; 2] = [
    "recommend me Anseong's tourist spots",
    "안성의 관광명소를 추천해줘",
];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub logging: LoggingConfig,
    pub server: ServerConfig,
    pub model: ModelConfig,
    pub knowledge: KnowledgeConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub http_port: u16,
    pub form_port: u16,
    pub enable_http: bool,
    pub enable_form: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            http_port: 8502,
            form_port: 8501,
            enable_http: true,
            enable_form: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Hub repository id, used when `path` is unset or incomplete.
    pub name: String,
    /// Local directory holding `config.json`, `tokenizer.json` and `model.safetensors`.
    pub path: Option<PathBuf>,
    pub device: String, // "cpu", "cuda"
    pub max_length: usize,
    pub no_repeat_ngram_size: usize,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: "gpt2".to_string(),
            path: None,
            device: "cpu".to_string(),
            max_length: 50,
            no_repeat_ngram_size: 2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KnowledgeConfig {
    /// JSON file replacing the built-in Anseong spots.
    pub path: Option<PathBuf>,
    pub trigger_phrases: Vec<String>,
    pub recommendation_count: usize,
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            path: None,
            trigger_phrases: DEFAULT_TRIGGER_PHRASES
                .iter()
                .map(|phrase| phrase.to_string())
                .collect(),
            recommendation_count: 3,
        }
    }
}

impl Settings {
    /// Layers the optional file at `path` under `TOUR__*` environment variables.
    pub fn load(path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("TOUR")
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("knowledge.trigger_phrases")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}
