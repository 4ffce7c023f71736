//! Behavioral tests for the chunk sampler over many seeds.

use bytellama::chunking::{sample_attempts, whitespace_positions};
use bytellama::{sample_chunks, ChunkSampler};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn is_boundary(text: &[u8], idx: usize) -> bool {
    idx == 0 || idx == text.len() || matches!(text[idx], b' ' | b'\t' | b'\n' | b'\r')
}

/// True if `chunk` occurs in `text` with whitespace or a document edge on both sides.
fn occurs_on_boundaries(text: &str, chunk: &str) -> bool {
    let bytes = text.as_bytes();
    text.match_indices(chunk).any(|(start, _)| {
        let end = start + chunk.len();
        (start == 0 || is_boundary(bytes, start - 1)) && is_boundary(bytes, end)
    })
}

#[test]
fn test_empty_document_yields_nothing() {
    let mut rng = StdRng::seed_from_u64(0);
    assert!(sample_chunks(b"", 5, &mut rng).unwrap().is_empty());
}

#[test]
fn test_document_without_whitespace_yields_nothing() {
    let mut rng = StdRng::seed_from_u64(0);
    assert!(sample_chunks(b"nowhitespace", 5, &mut rng)
        .unwrap()
        .is_empty());
}

#[test]
fn test_hello_world_foo_boundaries() {
    let text = "hello world foo";
    for seed in 0..200 {
        let mut rng = StdRng::seed_from_u64(seed);
        let chunks = sample_chunks(text.as_bytes(), 5, &mut rng).unwrap();
        assert!(chunks.len() <= 3);
        for chunk in &chunks {
            assert!(
                chunk == "world" || chunk == "foo",
                "seed {} produced unexpected chunk {:?}",
                seed,
                chunk
            );
            assert!(occurs_on_boundaries(text, chunk));
        }
    }
}

#[test]
fn test_attempt_count_matches_document_size() {
    let text = "lorem ipsum dolor sit amet consectetur adipiscing elit ".repeat(40);
    let total = text.len();
    for max in [1usize, 7, 64, 512, total, total * 2] {
        let sampler = ChunkSampler::new(max).unwrap();
        let report = sampler.sample_with_report(text.as_bytes(), &mut StdRng::seed_from_u64(3));
        assert_eq!(report.attempts, sample_attempts(total, max));
        assert_eq!(report.attempts, std::cmp::max(1, total / max));
        assert_eq!(report.attempts, report.chunks.len() + report.discarded);
    }
}

#[test]
fn test_chunks_are_bounded_substrings() {
    let text = "The quick brown fox\tjumps over\nthe lazy dog.\r\nPack my box with five dozen liquor jugs. "
        .repeat(25);
    let sampler = ChunkSampler::new(48).unwrap();
    for seed in 0..50 {
        let mut rng = StdRng::seed_from_u64(seed);
        for chunk in sampler.sample(text.as_bytes(), &mut rng) {
            assert!(!chunk.is_empty());
            assert_eq!(chunk.trim(), chunk);
            assert!(chunk.len() <= 48);
            assert!(occurs_on_boundaries(&text, &chunk), "chunk {:?}", chunk);
        }
    }
}

#[test]
fn test_multibyte_text_never_splits_characters() {
    let text = "Xin chào thế giới! 你好世界 Ünïcödé wörds ".repeat(30);
    let sampler = ChunkSampler::new(20).unwrap();
    for seed in 0..50 {
        let mut rng = StdRng::seed_from_u64(seed);
        for chunk in sampler.sample(text.as_bytes(), &mut rng) {
            assert!(text.contains(&chunk));
            assert!(!chunk.contains('\u{fffd}'));
        }
    }
}

#[test]
fn test_invalid_utf8_bytes_are_dropped() {
    let mut doc = b"valid ".to_vec();
    doc.extend_from_slice(&[0xff, 0xfe]);
    doc.extend_from_slice(b"tail");
    let sampler = ChunkSampler::new(64).unwrap();
    let chunks = sampler.sample(&doc, &mut StdRng::seed_from_u64(0));
    assert_eq!(chunks, vec!["tail".to_string()]);
}

#[test]
fn test_whitespace_positions_cover_all_kinds() {
    assert_eq!(whitespace_positions(b" a\tb\nc\r"), vec![0, 2, 4, 6]);
}
