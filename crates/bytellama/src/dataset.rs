//! # Dataset Preparation
//!
//! Builds a pretraining dataset from a manifest of text files: every document
//! is chunked with a [`ChunkSampler`], the chunks of all documents are shuffled
//! together, and the result is written as JSON lines.
//!
//! ## On-disk layout
//!
//! ```text
//! <dir>/data.jsonl          {"text": "..."} per line
//! <dir>/dataset_info.json   DatasetInfo
//! ```
//!
//! A single RNG drives both sampling and the final shuffle, so a fixed seed
//! and the same documents in the same order reproduce the dataset exactly.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::chunking::ChunkSampler;
use crate::error::{ByteLlamaError, Result};

pub const DATA_FILE: &str = "data.jsonl";
pub const INFO_FILE: &str = "dataset_info.json";

/// Read a manifest: one input path per line, blank lines ignored.
pub fn read_manifest(path: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|e| ByteLlamaError::io_error(path, e))?;
    Ok(parse_manifest(&raw))
}

/// Parse manifest contents; see [`read_manifest`].
pub fn parse_manifest(contents: &str) -> Vec<PathBuf> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(PathBuf::from)
        .collect()
}

/// One dataset row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Record {
    pub text: String,
}

/// Metadata stored next to the dataset rows
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DatasetInfo {
    pub num_rows: usize,
    pub num_documents: usize,
    pub max_chunk_bytes: usize,
    pub seed: Option<u64>,
}

/// Accumulates chunks from many documents.
#[derive(Debug)]
pub struct DatasetBuilder {
    sampler: ChunkSampler,
    rng: StdRng,
    seed: Option<u64>,
    chunks: Vec<String>,
    num_documents: usize,
}

impl DatasetBuilder {
    /// Create a builder seeded from `seed`, or from OS entropy when `None`.
    pub fn new(sampler: ChunkSampler, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Self {
            sampler,
            rng,
            seed,
            chunks: Vec::new(),
            num_documents: 0,
        }
    }

    /// Chunk one document, returning the number of chunks it contributed.
    pub fn add_document(&mut self, document: &[u8]) -> usize {
        let report = self.sampler.sample_with_report(document, &mut self.rng);
        let added = report.chunks.len();
        self.chunks.extend(report.chunks);
        self.num_documents += 1;
        added
    }

    pub fn num_documents(&self) -> usize {
        self.num_documents
    }

    pub fn num_chunks(&self) -> usize {
        self.chunks.len()
    }

    /// Shuffle the accumulated chunks and return the dataset with its metadata.
    pub fn finish(mut self) -> (ChunkDataset, DatasetInfo) {
        self.chunks.shuffle(&mut self.rng);
        let info = DatasetInfo {
            num_rows: self.chunks.len(),
            num_documents: self.num_documents,
            max_chunk_bytes: self.sampler.max_chunk_bytes(),
            seed: self.seed,
        };
        (
            ChunkDataset {
                chunks: self.chunks,
            },
            info,
        )
    }
}

/// A collection of text chunks ready for training
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChunkDataset {
    pub chunks: Vec<String>,
}

impl ChunkDataset {
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.chunks.iter().map(String::as_str)
    }

    /// Write rows and metadata into `dir`, creating it if needed.
    pub fn save_to_dir(&self, dir: impl AsRef<Path>, info: &DatasetInfo) -> Result<()> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir).map_err(|e| ByteLlamaError::io_error(dir, e))?;

        let data_path = dir.join(DATA_FILE);
        let file = File::create(&data_path).map_err(|e| ByteLlamaError::io_error(&data_path, e))?;
        let mut writer = BufWriter::new(file);
        for text in &self.chunks {
            serde_json::to_writer(&mut writer, &Record { text: text.clone() })?;
            writer
                .write_all(b"\n")
                .map_err(|e| ByteLlamaError::io_error(&data_path, e))?;
        }
        writer
            .flush()
            .map_err(|e| ByteLlamaError::io_error(&data_path, e))?;

        let info_path = dir.join(INFO_FILE);
        let json = serde_json::to_string_pretty(info)?;
        fs::write(&info_path, json).map_err(|e| ByteLlamaError::io_error(&info_path, e))?;

        info!(
            dir = %dir.display(),
            rows = self.chunks.len(),
            "saved dataset"
        );
        Ok(())
    }

    /// Read a dataset previously written by [`save_to_dir`](Self::save_to_dir).
    pub fn load_from_dir(dir: impl AsRef<Path>) -> Result<(Self, DatasetInfo)> {
        let dir = dir.as_ref();

        let info_path = dir.join(INFO_FILE);
        let raw = fs::read_to_string(&info_path)
            .map_err(|e| ByteLlamaError::io_error(&info_path, e))?;
        let info: DatasetInfo = serde_json::from_str(&raw)?;

        let data_path = dir.join(DATA_FILE);
        let file = File::open(&data_path).map_err(|e| ByteLlamaError::io_error(&data_path, e))?;
        let mut chunks = Vec::with_capacity(info.num_rows);
        for line in BufReader::new(file).lines() {
            let line = line.map_err(|e| ByteLlamaError::io_error(&data_path, e))?;
            if line.is_empty() {
                continue;
            }
            let record: Record = serde_json::from_str(&line)?;
            chunks.push(record.text);
        }

        if chunks.len() != info.num_rows {
            return Err(ByteLlamaError::config_error(
                "num_rows",
                format!(
                    "{} declares {} rows but {} were read",
                    INFO_FILE,
                    info.num_rows,
                    chunks.len()
                ),
            ));
        }

        debug!(dir = %dir.display(), rows = chunks.len(), "loaded dataset");
        Ok((Self { chunks }, info))
    }
}
