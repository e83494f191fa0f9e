//! Text similarity primitives.
//!
//! Everything here is pure and allocation-light: cosine similarity over
//! embedding vectors, Jaccard overlap over content-word sets, and the word
//! counting used for length analysis.


use std::collections::HashSet;

/// Words ignored by [`content_words`].
pub const STOP_WORDS: &[&str] = &[
    "the", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by", "is", "are",
    "was", "were", "be", "been", "have", "has", "had", "do", "does", "did", "will", "would",
    "could", "should", "may", "might", "can", "this", "that", "these", "those", "a", "an",
];

/// Words this short (in chars) or shorter never count as content words.
pub const MIN_CONTENT_WORD_CHARS: usize = 2;

/// Cosine similarity of two vectors.
///
/// Returns `0.0` for mismatched lengths, empty input, or a zero-norm vector.
#[inline]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let (dot, norm_a_sq, norm_b_sq) = a
        .iter()
        .zip(b.iter())
        .fold((0.0f32, 0.0f32, 0.0f32), |(dot, na, nb), (&av, &bv)| {
            (dot + av * bv, na + av * av, nb + bv * bv)
        });

    let norm_a = norm_a_sq.sqrt();
    let norm_b = norm_b_sq.sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

/// Lowercased whitespace tokens longer than two characters, minus stop words.
///
/// Punctuation stays attached to its word, so `"sunlight."` and `"sunlight"`
/// are different tokens.
pub fn content_words(text: &str) -> HashSet<String> {
    text.split_whitespace()
        .filter(|word| word.chars().count() > MIN_CONTENT_WORD_CHARS)
        .map(str::to_lowercase)
        .filter(|word| !STOP_WORDS.contains(&word.as_str()))
        .collect()
}

/// Jaccard overlap of the content-word sets of two texts.
///
/// `0.0` when either side has no content words.
pub fn jaccard_similarity(user_text: &str, reference_text: &str) -> f32 {
    let user_words = content_words(user_text);
    let reference_words = content_words(reference_text);

    if user_words.is_empty() || reference_words.is_empty() {
        return 0.0;
    }

    let intersection = user_words.intersection(&reference_words).count();
    let union = user_words.union(&reference_words).count();

    if union == 0 {
        0.0
    } else {
        intersection as f32 / union as f32
    }
}

/// Number of whitespace-separated words.
#[inline]
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// `user_words / reference_words`, or `0.0` when the reference is empty.
#[inline]
pub fn length_ratio(user_words: usize, reference_words: usize) -> f32 {
    if reference_words == 0 {
        0.0
    } else {
        user_words as f32 / reference_words as f32
    }
}
