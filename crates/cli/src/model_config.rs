//! `bytellama model-config`: emit the ByteLlama model configuration.

use std::path::PathBuf;

use bytellama::{ByteLlamaConfig, Result};
use clap::Args;
use tracing::info;

/// Options for the `model-config` command
#[derive(Args, Debug, Clone)]
pub struct ModelConfigOptions {
    /// Validate and re-emit an existing configuration instead of the preset
    #[arg(long)]
    pub from: Option<PathBuf>,

    /// Write the configuration to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl ModelConfigOptions {
    pub fn run(self) -> Result<()> {
        let config = self.load()?;
        let params = config.estimated_param_count()?;
        info!(
            num_layers = config.num_layers,
            embed_dim = config.embed_dim,
            vocab_size = config.vocab_size,
            params,
            "ByteLlama configuration"
        );

        match &self.output {
            Some(path) => {
                config.to_file(path)?;
                println!(
                    "Model config ({:.1}M parameters) written to {}",
                    params as f64 / 1e6,
                    path.display()
                );
            }
            None => println!("{}", serde_json::to_string_pretty(&config)?),
        }
        Ok(())
    }

    /// Resolve the configuration to emit
    pub fn load(&self) -> Result<ByteLlamaConfig> {
        match &self.from {
            Some(path) => ByteLlamaConfig::from_file(path),
            None => {
                let config = ByteLlamaConfig::byte_llama();
                config.validate()?;
                Ok(config)
            }
        }
    }
}
