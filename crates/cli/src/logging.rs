//! Logging options shared by all subcommands

use clap::Args;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Common logging options
#[derive(Args, Debug, Clone)]
pub struct LoggingOptions {
    /// Logging level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn", env = "BYTELLAMA_LOG_LEVEL")]
    pub log_level: String,
}

impl LoggingOptions {
    /// Initialize logging to stderr with the configured level.
    ///
    /// A subscriber that is already installed is left in place.
    pub fn init_logging(&self) {
        let filter = EnvFilter::new(self.parse_log_level().as_str().to_lowercase());
        let _ = tracing_subscriber::fmt()
            .with_target(false)
            .with_writer(std::io::stderr)
            .with_env_filter(filter)
            .try_init();
    }

    /// Parse the log level string into a tracing Level
    pub fn parse_log_level(&self) -> Level {
        match self.log_level.to_lowercase().as_str() {
            "error" => Level::ERROR,
            "warn" => Level::WARN,
            "info" => Level::INFO,
            "debug" => Level::DEBUG,
            "trace" => Level::TRACE,
            _ => Level::WARN,
        }
    }
}
