//! # ByteLlama CLI
//!
//! Command-line front end for the `bytellama` crate.
//!
//! ## Usage
//!
//! ```bash
//! # Chunk every file listed in manifest.txt into a shuffled dataset
//! bytellama prepare manifest.txt --output data/pretrain --chunk-size 2048 --seed 42
//!
//! # Print the ByteLlama model configuration
//! bytellama model-config --output checkpoints/config.json
//! ```

pub mod cli_options;
pub mod logging;
pub mod model_config;
pub mod prepare;

pub use cli_options::{Cli, Commands};
pub use logging::LoggingOptions;
pub use model_config::ModelConfigOptions;
pub use prepare::{PrepareConfig, PrepareOptions};
