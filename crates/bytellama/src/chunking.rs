//! # Chunk Sampler
//!
//! Turns a document into training examples by sampling byte windows that start
//! and end on whitespace.
//!
//! The number of draws is `max(1, total / max_chunk_bytes)`, so the expected
//! sampled volume is about one pass over the document. Chunk starts are drawn
//! uniformly from whitespace positions; the end is backed off to the nearest
//! preceding whitespace so that words and multi-byte characters are not cut.
//! A draw whose end backs off all the way to its start is discarded.
//!
//! Sampling never fails on content: empty documents and documents without any
//! whitespace produce zero chunks.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::error::{ByteLlamaError, Result};
use crate::utf8::{decode_ignoring_invalid, is_whitespace_byte, trim_text};

/// Default chunk size used by dataset preparation
pub const DEFAULT_MAX_CHUNK_BYTES: usize = 2048;

/// Number of draws made for a document of `total` bytes.
pub fn sample_attempts(total: usize, max_chunk_bytes: usize) -> usize {
    (total / max_chunk_bytes.max(1)).max(1)
}

/// Byte indices of every whitespace byte in `document`.
pub fn whitespace_positions(document: &[u8]) -> Vec<usize> {
    document
        .iter()
        .enumerate()
        .filter(|&(_, &b)| is_whitespace_byte(b))
        .map(|(i, _)| i)
        .collect()
}

/// Outcome of one sampling pass over a document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SampleReport {
    /// Emitted chunks, in draw order
    pub chunks: Vec<String>,
    /// Draws made (zero when the document has no whitespace)
    pub attempts: usize,
    /// Draws that produced no chunk
    pub discarded: usize,
}

/// Samples whitespace-aligned chunks of at most `max_chunk_bytes` bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkSampler {
    max_chunk_bytes: usize,
}

impl ChunkSampler {
    /// Create a sampler, rejecting a zero chunk size.
    pub fn new(max_chunk_bytes: usize) -> Result<Self> {
        if max_chunk_bytes == 0 {
            return Err(ByteLlamaError::invalid_argument(
                "max_chunk_bytes",
                "must be greater than 0",
            ));
        }
        Ok(Self { max_chunk_bytes })
    }

    pub fn max_chunk_bytes(&self) -> usize {
        self.max_chunk_bytes
    }

    /// Sample chunks from `document` using `rng`.
    pub fn sample<R: Rng + ?Sized>(&self, document: &[u8], rng: &mut R) -> Vec<String> {
        self.sample_with_report(document, rng).chunks
    }

    /// Sample chunks and report how many draws were made and discarded.
    pub fn sample_with_report<R: Rng + ?Sized>(
        &self,
        document: &[u8],
        rng: &mut R,
    ) -> SampleReport {
        let total = document.len();
        if total == 0 {
            return SampleReport::default();
        }

        let candidates = whitespace_positions(document);
        if candidates.is_empty() {
            debug!(total, "document has no whitespace, skipping");
            return SampleReport::default();
        }

        let attempts = sample_attempts(total, self.max_chunk_bytes);
        let mut report = SampleReport {
            chunks: Vec::with_capacity(attempts),
            attempts,
            discarded: 0,
        };

        for _ in 0..attempts {
            // candidates is non-empty, so choose always yields
            let Some(&position) = candidates.choose(rng) else {
                break;
            };
            match self.chunk_at(document, position + 1) {
                Some(chunk) => report.chunks.push(chunk),
                None => report.discarded += 1,
            }
        }

        debug!(
            total,
            attempts,
            emitted = report.chunks.len(),
            discarded = report.discarded,
            "sampled document"
        );
        report
    }

    /// Extract the chunk starting at `start`, or `None` for a discarded draw.
    fn chunk_at(&self, document: &[u8], start: usize) -> Option<String> {
        let total = document.len();
        let mut end = start.saturating_add(self.max_chunk_bytes).min(total);

        // back off to the last whitespace so no word or character is split
        while end > start && end < total && !is_whitespace_byte(document[end]) {
            end -= 1;
        }
        if end <= start {
            return None;
        }

        let text = decode_ignoring_invalid(&document[start..end]);
        let trimmed = trim_text(&text);
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}

/// Sample chunks from `document` with a one-off [`ChunkSampler`].
///
/// Fails only when `max_chunk_bytes` is zero.
pub fn sample_chunks<R: Rng + ?Sized>(
    document: &[u8],
    max_chunk_bytes: usize,
    rng: &mut R,
) -> Result<Vec<String>> {
    Ok(ChunkSampler::new(max_chunk_bytes)?.sample(document, rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        assert!(ChunkSampler::new(0).is_err());
        assert!(sample_chunks(b"a b", 0, &mut rng()).is_err());
    }

    #[test]
    fn test_sample_attempts() {
        assert_eq!(sample_attempts(0, 5), 1);
        assert_eq!(sample_attempts(4, 5), 1);
        assert_eq!(sample_attempts(15, 5), 3);
        assert_eq!(sample_attempts(4096, 2048), 2);
        assert_eq!(sample_attempts(4095, 2048), 1);
    }

    #[test]
    fn test_whitespace_positions() {
        assert_eq!(whitespace_positions(b"a b\tc\nd\re"), vec![1, 3, 5, 7]);
        assert!(whitespace_positions(b"nowhitespace").is_empty());
    }

    #[test]
    fn test_empty_and_whitespace_free_documents() {
        let sampler = ChunkSampler::new(16).unwrap();
        assert!(sampler.sample(b"", &mut rng()).is_empty());
        assert!(sampler.sample(b"nowhitespace", &mut rng()).is_empty());

        let report = sampler.sample_with_report(b"nowhitespace", &mut rng());
        assert_eq!(report.attempts, 0);
    }

    #[test]
    fn test_end_at_document_edge_is_kept() {
        // Only whitespace is at index 1; start = 2 and the window runs to EOF.
        let sampler = ChunkSampler::new(64).unwrap();
        assert_eq!(sampler.sample(b"a bcd", &mut rng()), vec!["bcd".to_string()]);
    }

    #[test]
    fn test_long_word_draw_is_discarded() {
        // start = 2, end = 5 lands inside "cdefgh" and backs off to start.
        let sampler = ChunkSampler::new(3).unwrap();
        let report = sampler.sample_with_report(b"a cdefgh", &mut rng());
        assert_eq!(report.attempts, 2);
        assert_eq!(report.discarded, 2);
        assert!(report.chunks.is_empty());
    }

    #[test]
    fn test_trailing_whitespace_draw_is_discarded() {
        // start = total, so the window is empty.
        let sampler = ChunkSampler::new(8).unwrap();
        let report = sampler.sample_with_report(b"word ", &mut rng());
        assert_eq!(report.attempts, 1);
        assert_eq!(report.discarded, 1);
    }

    #[test]
    fn test_chunks_are_trimmed() {
        let sampler = ChunkSampler::new(64).unwrap();
        let chunks = sampler.sample(b"x  \t padded words \n", &mut rng());
        for chunk in chunks {
            assert_eq!(chunk, chunk.trim());
            assert!(!chunk.is_empty());
        }
    }

    #[test]
    fn test_information_separators_are_trimmed() {
        let sampler = ChunkSampler::new(64).unwrap();
        assert_eq!(sampler.sample(b"a b\x1f", &mut rng()), vec!["b".to_string()]);

        let report = sampler.sample_with_report(b"a \x1c\x1d", &mut rng());
        assert!(report.chunks.is_empty());
        assert_eq!(report.discarded, 1);
    }

    #[test]
    fn test_multibyte_characters_survive() {
        let text = "chào thế giới ".repeat(20);
        let sampler = ChunkSampler::new(12).unwrap();
        for chunk in sampler.sample(text.as_bytes(), &mut rng()) {
            assert!(chunk.len() <= 12);
            assert!(text.contains(&chunk));
            assert!(!chunk.contains('\u{fffd}'));
        }
    }

    #[test]
    fn test_seeded_sampling_is_reproducible() {
        let text = "the quick brown fox jumps over the lazy dog ".repeat(50);
        let sampler = ChunkSampler::new(32).unwrap();
        let a = sampler.sample(text.as_bytes(), &mut StdRng::seed_from_u64(7));
        let b = sampler.sample(text.as_bytes(), &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
        assert!(!a.is_empty());
    }
}
