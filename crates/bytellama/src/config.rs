//! Configuration for ByteLlama models.
//!
//! ByteLlama is a Llama 3.2 style decoder over the octet vocabulary. The
//! configuration is a plain record handed to a [`ModelProvider`]; this crate
//! only validates and persists it.
//!
//! [`ModelProvider`]: crate::provider::ModelProvider

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ByteLlamaError, Result};
use crate::tokenizer::VOCAB_SIZE;

/// Model configuration for a ByteLlama decoder.
///
/// # Parameter count
///
/// Roughly `2 * vocab_size * embed_dim` for the embedding and output
/// projection plus, per layer, the grouped-query attention projections and
/// the gated feed-forward block; the feed-forward block dominates. The preset
/// estimates at roughly 240M parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ByteLlamaConfig {
    /// Vocabulary size, at least [`VOCAB_SIZE`]
    pub vocab_size: usize,

    /// Number of transformer layers
    pub num_layers: usize,

    /// Number of attention heads
    pub num_heads: usize,

    /// Number of key-value heads (grouped-query attention)
    pub num_kv_heads: usize,

    /// Embedding (hidden) dimension
    pub embed_dim: usize,

    /// Maximum sequence length in tokens
    pub max_seq_len: usize,

    /// Feed-forward hidden dimension
    pub intermediate_dim: usize,

    /// Attention dropout probability
    pub attn_dropout: f32,

    /// Normalization epsilon for RMSNorm
    pub norm_eps: f32,

    /// RoPE base frequency
    pub rope_base: f32,

    /// RoPE scaling factor
    pub scale_factor: f32,

    /// Standard deviation of the normal weight initialization
    pub init_std: f32,
}

impl ByteLlamaConfig {
    /// The ByteLlama preset: 12 layers, 16 heads, 1024-wide embeddings.
    pub fn byte_llama() -> Self {
        Self {
            vocab_size: VOCAB_SIZE,
            num_layers: 12,
            num_heads: 16,
            num_kv_heads: 4,
            embed_dim: 1024,
            max_seq_len: 131_072,
            intermediate_dim: 5632,
            attn_dropout: 0.0,
            norm_eps: 1e-5,
            rope_base: 500_000.0,
            scale_factor: 32.0,
            init_std: 0.02,
        }
    }

    /// Calculate head dimension
    pub fn head_dim(&self) -> usize {
        self.embed_dim / self.num_heads
    }

    /// Estimate the parameter count of the model.
    ///
    /// Fails with a configuration error when the count does not fit in `usize`.
    pub fn estimated_param_count(&self) -> Result<usize> {
        let overflow = || {
            ByteLlamaError::config_error(
                "embed_dim",
                "parameter count overflows usize for these dimensions",
            )
        };
        let mul = |a: usize, b: usize| a.checked_mul(b).ok_or_else(overflow);
        let sum = |terms: &[usize]| {
            terms
                .iter()
                .try_fold(0usize, |acc, &t| acc.checked_add(t))
                .ok_or_else(overflow)
        };

        let embedding_params = mul(self.vocab_size, self.embed_dim)?;

        // K and V are projected to the reduced grouped-query width
        let kv_dim = mul(self.num_kv_heads, self.head_dim())?;
        let square = mul(self.embed_dim, self.embed_dim)?;
        let kv_proj = mul(self.embed_dim, kv_dim)?;
        let per_layer_attention = sum(&[
            square,         // Q
            kv_proj,        // K
            kv_proj,        // V
            square,         // O
            self.embed_dim, // attention norm
        ])?;
        let attention_params = mul(self.num_layers, per_layer_attention)?;

        // gate, up, down
        let ffn_proj = mul(3, mul(self.embed_dim, self.intermediate_dim)?)?;
        let ffn_params = mul(self.num_layers, sum(&[ffn_proj, self.embed_dim])?)?;

        let final_norm = self.embed_dim;
        let lm_head = embedding_params;

        sum(&[
            embedding_params,
            attention_params,
            ffn_params,
            final_norm,
            lm_head,
        ])
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("num_layers", self.num_layers),
            ("num_heads", self.num_heads),
            ("num_kv_heads", self.num_kv_heads),
            ("embed_dim", self.embed_dim),
            ("max_seq_len", self.max_seq_len),
            ("intermediate_dim", self.intermediate_dim),
        ] {
            if value == 0 {
                return Err(ByteLlamaError::config_error(field, "must be greater than 0"));
            }
        }

        if self.vocab_size < VOCAB_SIZE {
            return Err(ByteLlamaError::config_error(
                "vocab_size",
                format!(
                    "must cover the octet vocabulary ({} tokens), got {}",
                    VOCAB_SIZE, self.vocab_size
                ),
            ));
        }

        if self.embed_dim % self.num_heads != 0 {
            return Err(ByteLlamaError::config_error(
                "embed_dim",
                format!("must be divisible by num_heads ({})", self.num_heads),
            ));
        }

        if self.num_heads % self.num_kv_heads != 0 {
            return Err(ByteLlamaError::config_error(
                "num_kv_heads",
                format!(
                    "num_heads ({}) must be divisible by num_kv_heads ({})",
                    self.num_heads, self.num_kv_heads
                ),
            ));
        }

        if !(0.0..1.0).contains(&self.attn_dropout) {
            return Err(ByteLlamaError::config_error(
                "attn_dropout",
                format!("must be in [0, 1), got {}", self.attn_dropout),
            ));
        }

        for (field, value) in [
            ("norm_eps", self.norm_eps),
            ("rope_base", self.rope_base),
            ("scale_factor", self.scale_factor),
            ("init_std", self.init_std),
        ] {
            if !(value > 0.0 && value.is_finite()) {
                return Err(ByteLlamaError::config_error(
                    field,
                    format!("must be a positive finite number, got {}", value),
                ));
            }
        }

        Ok(())
    }

    /// Read and validate a configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| ByteLlamaError::io_error(path, e))?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        debug!(path = %path.display(), "loaded model configuration");
        Ok(config)
    }

    /// Write the configuration as pretty-printed JSON
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| ByteLlamaError::io_error(parent, e))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|e| ByteLlamaError::io_error(path, e))
    }
}

impl Default for ByteLlamaConfig {
    fn default() -> Self {
        Self::byte_llama()
    }
}
