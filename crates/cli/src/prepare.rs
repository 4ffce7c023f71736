//! `bytellama prepare`: build a chunked pretraining dataset from a manifest.
//!
//! MANIFEST is a text file containing one input file path per line. Each input
//! file is split into chunks of up to `--chunk-size` bytes at whitespace
//! boundaries; the chunks of all files are shuffled together and saved to the
//! output directory.

use std::path::PathBuf;

use bytellama::{
    read_manifest, ByteLlamaError, ChunkSampler, DatasetBuilder, DatasetInfo, Result,
    DEFAULT_MAX_CHUNK_BYTES,
};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

/// Options for the `prepare` command
#[derive(Args, Debug, Clone)]
pub struct PrepareOptions {
    /// Text file listing one input file path per line
    pub manifest: PathBuf,

    /// Output directory for the dataset
    #[arg(short, long, env = "BYTELLAMA_DATASET_DIR")]
    pub output: PathBuf,

    /// Maximum chunk size in bytes
    #[arg(short, long, default_value_t = DEFAULT_MAX_CHUNK_BYTES)]
    pub chunk_size: usize,

    /// Random seed for reproducibility
    #[arg(short, long, env = "BYTELLAMA_SEED")]
    pub seed: Option<u64>,
}

/// Validated settings for a dataset preparation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrepareConfig {
    pub manifest: PathBuf,
    pub output: PathBuf,
    pub chunk_size: usize,
    pub seed: Option<u64>,
}

impl PrepareOptions {
    /// Run dataset preparation and report the result on stdout
    pub async fn run(self) -> Result<()> {
        let config = self.to_config()?;
        let info = prepare_dataset(&config).await?;

        println!(
            "Created {} chunks from {} file(s)",
            info.num_rows, info.num_documents
        );
        println!("Dataset saved to {}", config.output.display());
        Ok(())
    }

    /// Convert CLI options to a PrepareConfig
    pub fn to_config(&self) -> Result<PrepareConfig> {
        if self.chunk_size == 0 {
            return Err(ByteLlamaError::invalid_argument(
                "chunk_size",
                "must be greater than 0",
            ));
        }
        if !self.manifest.is_file() {
            return Err(ByteLlamaError::invalid_argument(
                "manifest",
                format!("{} is not a file", self.manifest.display()),
            ));
        }

        Ok(PrepareConfig {
            manifest: self.manifest.clone(),
            output: self.output.clone(),
            chunk_size: self.chunk_size,
            seed: self.seed,
        })
    }
}

/// Chunk every manifest entry, shuffle, and save the dataset.
pub async fn prepare_dataset(config: &PrepareConfig) -> Result<DatasetInfo> {
    let files = read_manifest(&config.manifest)?;
    info!(
        manifest = %config.manifest.display(),
        files = files.len(),
        chunk_size = config.chunk_size,
        seed = ?config.seed,
        "Preparing dataset"
    );

    let sampler = ChunkSampler::new(config.chunk_size)?;
    let mut builder = DatasetBuilder::new(sampler, config.seed);

    let progress = ProgressBar::new(files.len() as u64);
    progress.set_style(
        ProgressStyle::with_template("{msg} [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> "),
    );
    progress.set_message("Chunking files");

    for path in &files {
        let document = tokio::fs::read(path)
            .await
            .map_err(|e| ByteLlamaError::io_error(path, e))?;
        let added = builder.add_document(&document);
        debug!(path = %path.display(), bytes = document.len(), chunks = added, "chunked file");
        progress.inc(1);
    }
    progress.finish_and_clear();

    let (dataset, info) = builder.finish();
    let output = config.output.clone();
    tokio::task::spawn_blocking(move || dataset.save_to_dir(&output, &info).map(|()| info))
        .await
        .map_err(|e| ByteLlamaError::io_error(&config.output, std::io::Error::other(e)))?
}
