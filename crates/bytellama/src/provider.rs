//! # Model Provider
//!
//! ByteLlama does not implement a transformer. A [`ModelProvider`] turns a
//! [`ByteLlamaConfig`] into a model object from whichever framework backs it,
//! and the rest of the pipeline only talks to the [`ByteModel`] trait.
//!
//! ```text
//! ByteLlamaConfig → [validate] → ModelProvider::build → impl ByteModel
//!                                                        ├─ forward(tokens) → logits
//!                                                        └─ save(path)
//! ```

use std::path::Path;

use tracing::info;

use crate::config::ByteLlamaConfig;
use crate::error::{ByteLlamaError, Result};
use crate::tokenizer::{TokenId, PAD_ID};

/// A model built from a [`ByteLlamaConfig`].
pub trait ByteModel {
    /// Configuration the model was built with
    fn config(&self) -> &ByteLlamaConfig;

    /// Run a forward pass, returning one row of `vocab_size` logits per token.
    fn forward(&self, tokens: &[TokenId]) -> Result<Vec<Vec<f32>>>;

    /// Persist the model's weights to `path`.
    fn save(&self, path: &Path) -> Result<()>;
}

/// Factory producing [`ByteModel`]s for a specific framework.
pub trait ModelProvider {
    type Model: ByteModel;

    /// Construct a freshly initialized model. `config` has already been validated.
    fn create(&self, config: &ByteLlamaConfig, init: &WeightInit) -> Result<Self::Model>;

    /// Restore a model previously written with [`ByteModel::save`].
    fn restore(&self, config: &ByteLlamaConfig, path: &Path) -> Result<Self::Model>;

    /// Validate `config` and construct a freshly initialized model.
    fn build(&self, config: &ByteLlamaConfig) -> Result<Self::Model> {
        config.validate()?;
        let init = WeightInit::from_config(config);
        info!(
            num_layers = config.num_layers,
            embed_dim = config.embed_dim,
            vocab_size = config.vocab_size,
            std = init.std,
            "building ByteLlama model"
        );
        self.create(config, &init)
    }

    /// Validate `config` and load a saved model from `path`.
    fn load(&self, config: &ByteLlamaConfig, path: &Path) -> Result<Self::Model> {
        config.validate()?;
        if !path.exists() {
            return Err(ByteLlamaError::model_error(
                "load",
                format!("checkpoint not found at {}", path.display()),
            ));
        }
        self.restore(config, path)
    }
}

/// Weight initialization rule applied to a new model.
///
/// Linear and embedding weights are drawn from `normal(mean, std)`, biases
/// start at zero, and the embedding row of `padding_idx` is zeroed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightInit {
    pub mean: f32,
    pub std: f32,
    pub zero_bias: bool,
    pub padding_idx: Option<TokenId>,
}

impl WeightInit {
    pub fn from_config(config: &ByteLlamaConfig) -> Self {
        Self {
            mean: 0.0,
            std: config.init_std,
            zero_bias: true,
            padding_idx: Some(PAD_ID),
        }
    }
}

impl Default for WeightInit {
    fn default() -> Self {
        Self::from_config(&ByteLlamaConfig::default())
    }
}
