//! # ByteLlama CLI - Main Entry Point
//!
//! Dataset preparation and model configuration tools for ByteLlama.

use bytellama::Result;
use bytellama_cli::Cli;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.logging.init_logging();
    cli.run().await
}
