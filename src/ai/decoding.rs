use super::ModelError;

/// A model that scores the next token given the whole sequence so far.
pub trait CausalLm {
    fn next_token_logits(&mut self, tokens: &[u32]) -> Result<Vec<f32>, ModelError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodingConfig {
    /// Upper bound on prompt plus continuation, in tokens.
    pub max_length: usize,
    /// 0 disables n-gram suppression.
    pub no_repeat_ngram_size: usize,
    pub eos_token_id: Option<u32>,
}

impl Default for DecodingConfig {
    fn default() -> Self {
        Self {
            max_length: 50,
            no_repeat_ngram_size: 2,
            eos_token_id: None,
        }
    }
}

/// Greedy decoding with repeated n-gram suppression.
///
/// Returns the prompt followed by the generated tokens. Generation stops after
/// the end-of-sequence token is emitted or once the sequence reaches
/// `max_length`. At least one token is always generated, so a prompt already
/// at or over `max_length` comes back with exactly one more.
pub fn greedy_decode<M>(
    model: &mut M,
    prompt: &[u32],
    config: &DecodingConfig,
) -> Result<Vec<u32>, ModelError>
where
    M: CausalLm + ?Sized,
{
    let mut tokens = prompt.to_vec();
    let limit = config.max_length.max(prompt.len() + 1);

    while tokens.len() < limit {
        let mut logits = model.next_token_logits(&tokens)?;

        for banned in banned_tokens(&tokens, config.no_repeat_ngram_size) {
            if let Some(logit) = logits.get_mut(banned as usize) {
                *logit = f32::NEG_INFINITY;
            }
        }

        let next_token = argmax(&logits).ok_or(ModelError::EmptyLogits)?;
        tokens.push(next_token);

        if config.eos_token_id == Some(next_token) {
            break;
        }
    }

    Ok(tokens)
}

/// Tokens that would complete an n-gram already present in `tokens`.
pub fn banned_tokens(tokens: &[u32], ngram_size: usize) -> Vec<u32> {
    if ngram_size == 0 || tokens.len() + 1 < ngram_size {
        return Vec::new();
    }

    let prefix = &tokens[tokens.len() + 1 - ngram_size..];
    tokens
        .windows(ngram_size)
        .filter(|window| &window[..ngram_size - 1] == prefix)
        .map(|window| window[ngram_size - 1])
        .collect()
}

// First index wins on ties.
fn argmax(logits: &[f32]) -> Option<u32> {
    let mut best: Option<(usize, f32)> = None;
    for (index, &logit) in logits.iter().enumerate() {
        match best {
            Some((_, best_logit)) if logit <= best_logit || logit.is_nan() => {}
            _ => best = Some((index, logit)),
        }
    }
    best.map(|(index, _)| index as u32)
}
