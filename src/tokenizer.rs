use lazy_static::lazy_static;
use regex::Regex;
use rustc_hash::FxHashSet;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref STOP_WORDS: FxHashSet<&'static str> = {
        let words = vec![
            "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of",
            "with", "is", "are", "was", "were", "be", "been", "being", "have", "has",
            "had", "do", "does", "did", "will", "would", "could", "should", "may",
            "might", "can", "this", "that", "these", "those", "i", "you", "he", "she",
            "it", "we", "they", "what", "which", "who", "when", "where", "why", "how",
        ];
        words.into_iter().collect()
    };
    static ref PUNCTUATION: Regex = Regex::new(r"[^\w\s]").expect("punctuation pattern is valid");
}

/// Normalizes `text` into the word tokens used for matching.
///
/// Lower-cases, removes anything that is neither a word character nor
/// whitespace, splits on whitespace, then drops stop words and
/// single-character tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    let text = text.nfc().collect::<String>().to_lowercase();
    let text = PUNCTUATION.replace_all(&text, "");

    text.split_whitespace()
        .filter(|&token| !STOP_WORDS.contains(token))
        .filter(|token| token.chars().count() > 1)
        .map(|token| token.to_string())
        .collect()
}
