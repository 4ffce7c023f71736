//! Top-level command-line options

use bytellama::Result;
use clap::{Parser, Subcommand};

use crate::logging::LoggingOptions;
use crate::model_config::ModelConfigOptions;
use crate::prepare::PrepareOptions;

/// ByteLlama - data preparation and configuration for a byte-level Llama
#[derive(Parser, Debug)]
#[command(name = "bytellama", author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub logging: LoggingOptions,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available ByteLlama commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Prepare a byte-chunked pretraining dataset from a manifest file
    Prepare(PrepareOptions),

    /// Print or write the ByteLlama model configuration
    ModelConfig(ModelConfigOptions),
}

impl Cli {
    /// Run the selected command
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Prepare(opts) => opts.run().await,
            Commands::ModelConfig(opts) => opts.run(),
        }
    }
}
