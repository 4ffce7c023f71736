//! # ByteLlama
//!
//! Data preparation and model parameterization for a byte-level Llama.
//!
//! ## Components
//!
//! - `tokenizer`: the octet codec. Text is encoded as its UTF-8 bytes shifted
//!   past three control tokens (PAD, BOS, EOS); decoding silently drops
//!   anything that is not a content byte.
//! - `chunking`: samples whitespace-aligned byte chunks from documents to use
//!   as training examples.
//! - `dataset`: manifest reading, cross-document shuffling and JSON lines
//!   persistence.
//! - `config`: the ByteLlama model configuration and its validation.
//! - `provider`: the seam behind which a transformer framework builds,
//!   loads and saves models.
//!
//! ## Example
//!
//! ```
//! use bytellama::{ChunkSampler, OctetTokenizer};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let sampler = ChunkSampler::new(16)?;
//! let mut rng = StdRng::seed_from_u64(0);
//! let tokenizer = OctetTokenizer::new();
//!
//! for chunk in sampler.sample(b"hello world, this is a document", &mut rng) {
//!     let ids = tokenizer.encode(&chunk, true, true);
//!     assert_eq!(tokenizer.decode(&ids), chunk);
//! }
//! # Ok::<(), bytellama::ByteLlamaError>(())
//! ```

pub mod chunking;
pub mod config;
pub mod dataset;
pub mod error;
pub mod provider;
pub mod tokenizer;
pub mod utf8;

pub use chunking::{sample_chunks, ChunkSampler, SampleReport, DEFAULT_MAX_CHUNK_BYTES};
pub use config::ByteLlamaConfig;
pub use dataset::{read_manifest, ChunkDataset, DatasetBuilder, DatasetInfo};
pub use error::{ByteLlamaError, Result};
pub use provider::{ByteModel, ModelProvider, WeightInit};
pub use tokenizer::{
    decode, encode, truncate, OctetTokenizer, TokenId, BOS_ID, EOS_ID, OFFSET, PAD_ID,
    VOCAB_SIZE,
};

/// Version information for the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[allow(clippy::const_is_empty)]
    fn test_version_available() {
        assert!(!VERSION.is_empty());
    }
}
