use std::path::PathBuf;
use std::time::Instant;

use candle_core::{DType, Device};
use candle_nn::VarBuilder;
use hf_hub::api::tokio::{Api, ApiRepo};
use tokenizers::Tokenizer;

use super::decoding::{greedy_decode, DecodingConfig};
use super::gpt2::{Gpt2, Gpt2Config};
use super::{ModelError, TextGenerator};
use crate::config::ModelConfig;
use crate::logger::Logger;

const CONFIG_FILE: &str = "config.json";
const TOKENIZER_FILE: &str = "tokenizer.json";
const WEIGHTS_FILE: &str = "model.safetensors";

// GPT-2 uses one id for both beginning and end of text.
const GPT2_END_OF_TEXT: u32 = 50256;

/// Local paths of everything needed to build the model.
#[derive(Debug, Clone)]
pub struct ModelFiles {
    pub config: PathBuf,
    pub tokenizer: PathBuf,
    pub weights: PathBuf,
}

/// GPT-2 with its tokenizer, decoded greedily.
pub struct LocalLlm {
    name: String,
    model: Gpt2,
    tokenizer: Tokenizer,
    no_repeat_ngram_size: usize,
    eos_token_id: u32,
    bos_token_id: u32,
    logger: Logger,
}

impl LocalLlm {
    /// Resolves model files and loads them. Any failure here is fatal for the service.
    pub async fn load(config: &ModelConfig) -> Result<Self, ModelError> {
        let logger = Logger::new("LocalLlm");
        logger.info(&format!(
            "Initializing LLM: {} on {}",
            config.name, config.device
        ));

        let start_time = Instant::now();
        let files = resolve_files(config, &logger).await?;
        let device = select_device(&config.device)?;
        let llm = Self::from_files(config, &files, &device)?;

        logger.info(&format!("Model loaded in {:?}", start_time.elapsed()));
        Ok(llm)
    }

    pub fn from_files(
        config: &ModelConfig,
        files: &ModelFiles,
        device: &Device,
    ) -> Result<Self, ModelError> {
        let logger = Logger::new("LocalLlm");

        logger.debug("Loading tokenizer...");
        let tokenizer = Tokenizer::from_file(&files.tokenizer)
            .map_err(|e| ModelError::Tokenizer(e.to_string()))?;

        logger.debug("Loading model weights...");
        let model_config: Gpt2Config =
            serde_json::from_str(&std::fs::read_to_string(&files.config)?)?;
        // Safety: the weights file is not modified while mapped.
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(
                std::slice::from_ref(&files.weights),
                DType::F32,
                device,
            )?
        };
        let model = Gpt2::load(vb, &model_config)?;

        let eos_token_id = model_config.eos_token_id.unwrap_or(GPT2_END_OF_TEXT);
        Ok(Self {
            name: config.name.clone(),
            model,
            tokenizer,
            no_repeat_ngram_size: config.no_repeat_ngram_size,
            eos_token_id,
            bos_token_id: model_config.bos_token_id.unwrap_or(eos_token_id),
            logger,
        })
    }

    fn encode(&self, prompt: &str) -> Result<Vec<u32>, ModelError> {
        let encoding = self
            .tokenizer
            .encode(prompt, false)
            .map_err(|e| ModelError::Tokenizer(e.to_string()))?;

        let mut ids = encoding.get_ids().to_vec();
        if ids.is_empty() {
            ids.push(self.bos_token_id);
        }
        Ok(ids)
    }
}

impl TextGenerator for LocalLlm {
    fn generate(&mut self, prompt: &str, max_length: usize) -> Result<String, ModelError> {
        let start_time = Instant::now();
        let prompt_ids = self.encode(prompt)?;
        let config = DecodingConfig {
            max_length,
            no_repeat_ngram_size: self.no_repeat_ngram_size,
            eos_token_id: Some(self.eos_token_id),
        };

        let output = greedy_decode(&mut self.model, &prompt_ids, &config).map_err(|e| {
            self.logger.error(&format!("Generation failed: {}", e));
            e
        })?;
        let text = self
            .tokenizer
            .decode(&output, true)
            .map_err(|e| ModelError::Tokenizer(e.to_string()))?;

        self.logger.debug(&format!(
            "Generated {} tokens in {:?}",
            output.len().saturating_sub(prompt_ids.len()),
            start_time.elapsed()
        ));
        Ok(text)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Prefers files in `config.path`; fetches whatever is missing from the hub.
pub async fn resolve_files(config: &ModelConfig, logger: &Logger) -> Result<ModelFiles, ModelError> {
    if let Some(local_path) = &config.path {
        let files = ModelFiles {
            config: local_path.join(CONFIG_FILE),
            tokenizer: local_path.join(TOKENIZER_FILE),
            weights: local_path.join(WEIGHTS_FILE),
        };
        if files.config.exists() && files.tokenizer.exists() && files.weights.exists() {
            logger.debug(&format!("Using local model files in {}", local_path.display()));
            return Ok(files);
        }
        logger.warn(&format!(
            "Incomplete model directory {}, falling back to hub repository {}",
            local_path.display(),
            config.name
        ));
    }

    let api = Api::new().map_err(|e| ModelError::Hub {
        file: config.name.clone(),
        message: e.to_string(),
    })?;
    let repo = api.model(config.name.clone());

    Ok(ModelFiles {
        config: fetch(&repo, CONFIG_FILE).await?,
        tokenizer: fetch(&repo, TOKENIZER_FILE).await?,
        weights: fetch(&repo, WEIGHTS_FILE).await?,
    })
}

async fn fetch(repo: &ApiRepo, file: &str) -> Result<PathBuf, ModelError> {
    repo.get(file).await.map_err(|e| ModelError::Hub {
        file: file.to_string(),
        message: e.to_string(),
    })
}

pub fn select_device(device: &str) -> Result<Device, ModelError> {
    match device {
        "cpu" => Ok(Device::Cpu),
        "cuda" => Ok(Device::new_cuda(0)?),
        other => Err(ModelError::Device(other.to_string())),
    }
}
