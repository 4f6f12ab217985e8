//! Chunker — splits raw thread text into bounded-size slices.
//!
//! The split is a lossless partition measured in characters: chunks are
//! consecutive, non-overlapping, and concatenating them in index order
//! reproduces the input exactly. Boundaries are semantically blind — a cut
//! may land mid-sentence or mid-word, which downstream summarization
//! tolerates.

use crate::config::CHARS_PER_TOKEN;
use crate::pipeline::types::Chunk;

/// Split `text` into chunks of at most `max_tokens_per_chunk × 4` characters.
///
/// The final chunk may be shorter. Empty input yields zero chunks. Pure and
/// deterministic: no I/O, same partition for the same input.
pub fn chunk(text: &str, max_tokens_per_chunk: usize) -> Vec<Chunk> {
    let budget = max_tokens_per_chunk
        .saturating_mul(CHARS_PER_TOKEN)
        .max(1);

    let mut chunks = Vec::new();
    let mut slice_start = 0;
    let mut chars_in_slice = 0;

    // char_indices keeps every cut on a UTF-8 boundary.
    for (offset, _) in text.char_indices() {
        if chars_in_slice == budget {
            chunks.push(Chunk::new(chunks.len() + 1, text[slice_start..offset].to_string()));
            slice_start = offset;
            chars_in_slice = 0;
        }
        chars_in_slice += 1;
    }

    if slice_start < text.len() {
        chunks.push(Chunk::new(chunks.len() + 1, text[slice_start..].to_string()));
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Concatenating the slices in index order must reproduce the input.
    fn assert_lossless(text: &str, max_tokens: usize) {
        let chunks = chunk(text, max_tokens);
        let rebuilt: String = chunks.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(rebuilt, text);
    }

    #[test]
    fn empty_text_yields_zero_chunks() {
        assert!(chunk("", 100).is_empty());
    }

    #[test]
    fn short_text_yields_one_chunk() {
        let chunks = chunk("0123456789", 100_000);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].index, 1);
        assert_eq!(chunks[0].text, "0123456789");
        assert_eq!(chunks[0].char_len, 10);
    }

    #[test]
    fn partition_is_lossless() {
        assert_lossless("hello world, this is a thread body", 2);
        assert_lossless(&"x".repeat(1001), 10);
        assert_lossless("héllo wörld déjà vu — ünïcode", 2);
    }

    #[test]
    fn no_chunk_except_last_exceeds_budget() {
        let chunks = chunk(&"a".repeat(1000), 30); // 120-char budget
        for c in &chunks[..chunks.len() - 1] {
            assert_eq!(c.char_len, 120);
        }
        assert!(chunks.last().unwrap().char_len <= 120);
    }

    #[test]
    fn indices_are_one_based_and_consecutive() {
        let chunks = chunk(&"a".repeat(50), 2); // 8-char budget
        let indices: Vec<usize> = chunks.iter().map(|c| c.index).collect();
        assert_eq!(indices, (1..=chunks.len()).collect::<Vec<_>>());
    }

    #[test]
    fn nine_hundred_k_chars_at_100k_tokens_gives_three_chunks() {
        let body = "a".repeat(900_000);
        let chunks = chunk(&body, 100_000); // 400,000-char budget
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].char_len, 400_000);
        assert_eq!(chunks[1].char_len, 400_000);
        assert_eq!(chunks[2].char_len, 100_000);
    }

    #[test]
    fn multibyte_text_splits_on_char_boundaries() {
        // 3-byte chars; a byte-offset split would panic or corrupt.
        let body = "é".repeat(100);
        let chunks = chunk(&body, 8); // 32-char budget
        assert_eq!(chunks.len(), 4);
        assert!(chunks.iter().all(|c| c.char_len <= 32));
        assert_lossless(&body, 8);
    }

    #[test]
    fn deterministic() {
        let body = "some thread body ".repeat(100);
        assert_eq!(chunk(&body, 5), chunk(&body, 5));
    }
}
