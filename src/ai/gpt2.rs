//! GPT-2 forward pass on candle.
//!
//! Recomputes the whole sequence on every step: sequences here are capped at a
//! few dozen tokens, so no key/value cache is kept.

use candle_core::{Device, IndexOp, Module, Result, Tensor, D};
use candle_nn::{embedding, layer_norm, Embedding, LayerNorm, Linear, VarBuilder};
use serde::Deserialize;

use super::decoding::CausalLm;
use super::ModelError;

fn default_layer_norm_epsilon() -> f64 {
    1e-5
}

/// The subset of a Hugging Face `config.json` the model needs.
#[derive(Debug, Clone, Deserialize)]
pub struct Gpt2Config {
    pub vocab_size: usize,
    pub n_positions: usize,
    pub n_embd: usize,
    pub n_layer: usize,
    pub n_head: usize,
    #[serde(default)]
    pub n_inner: Option<usize>,
    #[serde(default = "default_layer_norm_epsilon")]
    pub layer_norm_epsilon: f64,
    #[serde(default)]
    pub bos_token_id: Option<u32>,
    #[serde(default)]
    pub eos_token_id: Option<u32>,
}

// Hugging Face "Conv1D": a linear layer with its weight stored as (in, out).
struct Conv1D {
    weight: Tensor,
    bias: Tensor,
}

impl Conv1D {
    fn load(in_dim: usize, out_dim: usize, vb: VarBuilder) -> Result<Self> {
        Ok(Self {
            weight: vb.get((in_dim, out_dim), "weight")?,
            bias: vb.get(out_dim, "bias")?,
        })
    }
}

impl Module for Conv1D {
    fn forward(&self, xs: &Tensor) -> Result<Tensor> {
        xs.broadcast_matmul(&self.weight)?.broadcast_add(&self.bias)
    }
}

struct Attention {
    c_attn: Conv1D,
    c_proj: Conv1D,
    n_head: usize,
}

impl Attention {
    fn load(cfg: &Gpt2Config, vb: VarBuilder) -> Result<Self> {
        Ok(Self {
            c_attn: Conv1D::load(cfg.n_embd, 3 * cfg.n_embd, vb.pp("c_attn"))?,
            c_proj: Conv1D::load(cfg.n_embd, cfg.n_embd, vb.pp("c_proj"))?,
            n_head: cfg.n_head,
        })
    }

    fn forward(&self, xs: &Tensor, mask: &Tensor) -> Result<Tensor> {
        let (batch, seq_len, hidden) = xs.dims3()?;
        let head_dim = hidden / self.n_head;
        let qkv = self.c_attn.forward(xs)?;

        let split_heads = |index: usize| -> Result<Tensor> {
            qkv.narrow(D::Minus1, index * hidden, hidden)?
                .reshape((batch, seq_len, self.n_head, head_dim))?
                .transpose(1, 2)?
                .contiguous()
        };
        let query = split_heads(0)?;
        let key = split_heads(1)?;
        let value = split_heads(2)?;

        let scores = query
            .matmul(&key.t()?.contiguous()?)?
            .affine(1.0 / (head_dim as f64).sqrt(), 0.0)?
            .broadcast_add(mask)?;
        let weights = candle_nn::ops::softmax_last_dim(&scores)?;

        let attended = weights
            .matmul(&value)?
            .transpose(1, 2)?
            .contiguous()?
            .reshape((batch, seq_len, hidden))?;
        self.c_proj.forward(&attended)
    }
}

struct Mlp {
    c_fc: Conv1D,
    c_proj: Conv1D,
}

impl Mlp {
    fn load(cfg: &Gpt2Config, vb: VarBuilder) -> Result<Self> {
        let inner = cfg.n_inner.unwrap_or(4 * cfg.n_embd);
        Ok(Self {
            c_fc: Conv1D::load(cfg.n_embd, inner, vb.pp("c_fc"))?,
            c_proj: Conv1D::load(inner, cfg.n_embd, vb.pp("c_proj"))?,
        })
    }
}

impl Module for Mlp {
    fn forward(&self, xs: &Tensor) -> Result<Tensor> {
        // gelu() is the tanh approximation GPT-2 was trained with.
        self.c_proj.forward(&self.c_fc.forward(xs)?.gelu()?)
    }
}

struct Block {
    ln_1: LayerNorm,
    attn: Attention,
    ln_2: LayerNorm,
    mlp: Mlp,
}

impl Block {
    fn load(cfg: &Gpt2Config, vb: VarBuilder) -> Result<Self> {
        Ok(Self {
            ln_1: layer_norm(cfg.n_embd, cfg.layer_norm_epsilon, vb.pp("ln_1"))?,
            attn: Attention::load(cfg, vb.pp("attn"))?,
            ln_2: layer_norm(cfg.n_embd, cfg.layer_norm_epsilon, vb.pp("ln_2"))?,
            mlp: Mlp::load(cfg, vb.pp("mlp"))?,
        })
    }

    fn forward(&self, xs: &Tensor, mask: &Tensor) -> Result<Tensor> {
        let xs = self.attn.forward(&self.ln_1.forward(xs)?, mask)?.add(xs)?;
        self.mlp.forward(&self.ln_2.forward(&xs)?)?.add(&xs)
    }
}

pub struct Gpt2 {
    wte: Embedding,
    wpe: Embedding,
    blocks: Vec<Block>,
    ln_f: LayerNorm,
    lm_head: Linear,
    n_positions: usize,
    device: Device,
}

impl Gpt2 {
    /// Accepts checkpoints with or without the `transformer.` prefix.
    pub fn load(vb: VarBuilder, cfg: &Gpt2Config) -> Result<Self> {
        let vb = if vb.contains_tensor("transformer.wte.weight") {
            vb.pp("transformer")
        } else {
            vb
        };

        let wte = embedding(cfg.vocab_size, cfg.n_embd, vb.pp("wte"))?;
        let wpe = embedding(cfg.n_positions, cfg.n_embd, vb.pp("wpe"))?;
        let blocks = (0..cfg.n_layer)
            .map(|index| Block::load(cfg, vb.pp(format!("h.{index}"))))
            .collect::<Result<Vec<_>>>()?;
        let ln_f = layer_norm(cfg.n_embd, cfg.layer_norm_epsilon, vb.pp("ln_f"))?;
        // Output projection is tied to the token embedding.
        let lm_head = Linear::new(wte.embeddings().clone(), None);

        Ok(Self {
            wte,
            wpe,
            blocks,
            ln_f,
            lm_head,
            n_positions: cfg.n_positions,
            device: vb.device().clone(),
        })
    }

    /// Logits for the token following `tokens`, shape `(vocab_size,)`.
    pub fn forward(&self, tokens: &[u32]) -> Result<Tensor> {
        if tokens.is_empty() {
            return Err(candle_core::Error::Msg("empty input sequence".to_string()));
        }
        // Only the most recent context window is visible to the model.
        let tokens = &tokens[tokens.len().saturating_sub(self.n_positions)..];
        let seq_len = tokens.len();

        let input_ids = Tensor::new(tokens, &self.device)?.unsqueeze(0)?;
        let positions = Tensor::arange(0u32, seq_len as u32, &self.device)?.unsqueeze(0)?;
        let mut xs = self
            .wte
            .forward(&input_ids)?
            .add(&self.wpe.forward(&positions)?)?;

        let mask = causal_mask(seq_len, &self.device)?;
        for block in &self.blocks {
            xs = block.forward(&xs, &mask)?;
        }

        let last = self.ln_f.forward(&xs)?.i((.., seq_len - 1, ..))?;
        self.lm_head.forward(&last)?.squeeze(0)
    }
}

impl CausalLm for Gpt2 {
    fn next_token_logits(&mut self, tokens: &[u32]) -> std::result::Result<Vec<f32>, ModelError> {
        Ok(self.forward(tokens)?.to_vec1::<f32>()?)
    }
}

fn causal_mask(seq_len: usize, device: &Device) -> Result<Tensor> {
    let mask: Vec<f32> = (0..seq_len)
        .flat_map(|row| {
            (0..seq_len).map(move |col| if col > row { f32::NEG_INFINITY } else { 0.0 })
        })
        .collect();
    Tensor::from_vec(mask, (seq_len, seq_len), device)
}
