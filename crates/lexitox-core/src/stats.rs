//! Sentence, paragraph and readability statistics.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::text::is_sentence_terminator;

/// Per-sentence word counts gathered in one pass over the raw text.
///
/// A sentence's word count is the number of alphanumeric runs since the
/// previous terminator. Runs are split by any other character, apostrophes
/// included, so `don't` counts as two here even though it is one token for
/// the frequency table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SentenceStats {
    /// Number of sentence terminators.
    pub sentences: usize,
    /// Words in terminated sentences (trailing unterminated words excluded).
    pub words_in_sentences: usize,
    /// Most words in a single sentence.
    pub longest_sentence: usize,
    /// Fewest words in a sentence that had at least one word.
    pub shortest_sentence: Option<usize>,
    /// Newline count plus one.
    pub paragraphs: usize,
    /// `words_in_sentences / sentences`, 0 without sentences.
    pub avg_sentence_length: f64,
}

impl SentenceStats {
    /// Scan `text`. Empty text yields all zeros.
    #[tracing::instrument(skip_all, fields(text_len = text.len()))]
    pub fn scan(text: &str) -> Self {
        let mut stats = Self::default();
        if text.is_empty() {
            return stats;
        }

        let mut current = 0usize;
        let mut in_run = false;
        let mut newlines = 0usize;

        for ch in text.chars() {
            if ch.is_ascii_alphanumeric() {
                if !in_run {
                    current += 1;
                    in_run = true;
                }
                continue;
            }
            in_run = false;

            if ch == '\n' {
                newlines += 1;
            } else if is_sentence_terminator(ch) {
                stats.sentences += 1;
                stats.words_in_sentences += current;
                stats.longest_sentence = stats.longest_sentence.max(current);
                if current > 0 {
                    stats.shortest_sentence =
                        Some(stats.shortest_sentence.map_or(current, |s| s.min(current)));
                }
                current = 0;
            }
        }

        stats.paragraphs = newlines + 1;
        if stats.sentences > 0 {
            stats.avg_sentence_length = stats.words_in_sentences as f64 / stats.sentences as f64;
        }
        stats
    }
}

/// Unique words over total words, 0 when there are no words.
pub fn lexical_diversity(unique_words: usize, word_count: usize) -> f64 {
    if word_count == 0 {
        return 0.0;
    }
    unique_words as f64 / word_count as f64
}

/// Characters per word, 0 when there are no words.
///
/// The character count covers the whole text, whitespace and punctuation
/// included.
pub fn average_word_length(char_count: usize, word_count: usize) -> f64 {
    if word_count == 0 {
        return 0.0;
    }
    char_count as f64 / word_count as f64
}

/// Grade-level estimate: `0.39 * (words / sentences) + 11.8 * avg_word_length - 15.59`.
///
/// Returns 0 when there are no words or no sentences.
pub fn reading_level(word_count: usize, sentence_count: usize, avg_word_length: f64) -> f64 {
    if word_count == 0 || sentence_count == 0 {
        return 0.0;
    }
    let words_per_sentence = word_count as f64 / sentence_count as f64;
    0.39f64.mul_add(words_per_sentence, 11.8 * avg_word_length) - 15.59
}
