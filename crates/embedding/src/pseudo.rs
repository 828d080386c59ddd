use crate::normalize::l2_normalize_in_place;
use crate::{Embedding, EMBEDDING_DIM};

/// Secondary bucket multiplier.
const SECONDARY_STRIDE: u64 = 31;
const PRIMARY_WEIGHT: f64 = 1.0;
const SECONDARY_WEIGHT: f64 = 0.5;

/// Sum of the word's UTF-16 code units.
///
/// Crude and collision-prone on purpose; anagrams hash identically.
pub fn word_hash(word: &str) -> u64 {
    word.encode_utf16().map(u64::from).sum()
}

/// Maps `text` to a deterministic, L2-normalized 128-bucket vector.
///
/// Each lower-cased, whitespace-separated word adds `1/n` to bucket
/// `hash % 128` and `0.5/n` to bucket `(hash * 31) % 128`, where `n` is the
/// word count. Empty or whitespace-only input yields the zero vector.
pub fn embed(text: &str) -> Embedding {
    let lowered = text.to_lowercase();
    let words: Vec<&str> = lowered.split_whitespace().collect();
    let mut values = vec![0f64; EMBEDDING_DIM];

    if !words.is_empty() {
        let count = words.len() as f64;
        let dim = EMBEDDING_DIM as u64;
        for word in &words {
            let hash = word_hash(word);
            values[(hash % dim) as usize] += PRIMARY_WEIGHT / count;
            values[(hash.wrapping_mul(SECONDARY_STRIDE) % dim) as usize] +=
                SECONDARY_WEIGHT / count;
        }
    }

    l2_normalize_in_place(&mut values);
    tracing::trace!(words = words.len(), "computed pseudo-embedding");
    Embedding::new_unchecked(values)
}

/// Embeds every input in order.
pub fn embed_batch<T: AsRef<str>>(texts: &[T]) -> Vec<Embedding> {
    texts.iter().map(|text| embed(text.as_ref())).collect()
}
