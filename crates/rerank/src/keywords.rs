//! Query keyword extraction.

/// Words dropped from queries before keyword matching.
pub const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "is", "are", "was", "were", "what", "how", "and", "or", "in", "on", "at",
    "to", "for",
];

/// Minimum keyword length, exclusive.
const MIN_KEYWORD_LEN: usize = 2;

/// Lower-cases `query`, splits on whitespace and keeps tokens longer than two
/// characters that are not stop words. Punctuation is kept as part of the
/// token, so `"ai?"` is a keyword.
pub fn extract_keywords(query: &str) -> Vec<String> {
    extract_keywords_with(query, STOP_WORDS)
}

pub(crate) fn extract_keywords_with<S: AsRef<str>>(query: &str, stop_words: &[S]) -> Vec<String> {
    query
        .to_lowercase()
        .split_whitespace()
        .filter(|token| token.chars().count() > MIN_KEYWORD_LEN)
        .filter(|token| !stop_words.iter().any(|stop| stop.as_ref() == *token))
        .map(str::to_owned)
        .collect()
}
