//! End-to-end analysis of one text.
//!
//! An [`Analyzer`] holds the read-only context shared across analyses (the
//! stopword set, the toxic phrase dictionary and the ranking algorithm).
//! Each call to [`Analyzer::analyze`] builds a fresh frequency table, ranks
//! it, scans for toxic phrases and derives the statistics into an
//! [`AnalysisResult`]. Nothing here fails: empty input returns a zero-valued
//! result.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::dictionary::{StopWords, ToxicDictionary};
use crate::frequency::{FrequencyTable, WordEntry};
use crate::sort::{self, SortAlgorithm};
use crate::stats::{self, SentenceStats};
use crate::text::{self, TextCounts, Tokens};
use crate::toxicity::{self, ToxicityReport};

/// Shared analysis context.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    stopwords: StopWords,
    dictionary: ToxicDictionary,
    sort_algorithm: SortAlgorithm,
}

impl Analyzer {
    /// Create an analyzer. An empty dictionary disables toxicity detection.
    pub fn new(stopwords: StopWords, dictionary: ToxicDictionary) -> Self {
        Self {
            stopwords,
            dictionary,
            sort_algorithm: SortAlgorithm::default(),
        }
    }

    /// Use `algorithm` to rank words.
    #[must_use]
    pub const fn with_sort_algorithm(mut self, algorithm: SortAlgorithm) -> Self {
        self.sort_algorithm = algorithm;
        self
    }

    /// Whether a non-empty dictionary is loaded.
    pub fn toxicity_enabled(&self) -> bool {
        !self.dictionary.is_empty()
    }

    /// The loaded stopwords.
    pub const fn stopwords(&self) -> &StopWords {
        &self.stopwords
    }

    /// The loaded dictionary.
    pub const fn dictionary(&self) -> &ToxicDictionary {
        &self.dictionary
    }

    /// Algorithm used to rank words.
    pub const fn sort_algorithm(&self) -> SortAlgorithm {
        self.sort_algorithm
    }

    /// Analyze one text.
    #[tracing::instrument(skip_all, fields(text_len = text.len(), algorithm = %self.sort_algorithm))]
    pub fn analyze(&self, text: &str) -> AnalysisResult {
        let toxicity_enabled = self.toxicity_enabled();
        if text.is_empty() {
            return AnalysisResult {
                sort_algorithm: self.sort_algorithm,
                toxicity_enabled,
                ..AnalysisResult::default()
            };
        }

        let counts = TextCounts::scan(text);
        let mut table = FrequencyTable::new();
        let mut word_count = 0usize;

        for token in Tokens::new(text) {
            word_count += 1;
            let word = text::normalize_word(token);
            if word.is_empty() || self.stopwords.contains(&word) {
                continue;
            }
            table.insert(&word);
        }

        if table.dropped() > 0 {
            tracing::warn!(
                dropped = table.dropped(),
                limit = crate::frequency::MAX_WORDS,
                "word table full, new unique words were dropped"
            );
        }

        let unique_words = table.len();
        let mut words = table.export();
        sort::sort_entries(&mut words, self.sort_algorithm);
        let filtered_word_count = words.iter().map(|e| e.frequency).sum();

        let avg_word_length = stats::average_word_length(counts.chars, word_count);
        let reading_level = stats::reading_level(word_count, counts.sentences, avg_word_length);

        let toxicity = if toxicity_enabled {
            let matches = toxicity::detect(text, &self.dictionary);
            ToxicityReport::from_matches(matches, word_count)
        } else {
            ToxicityReport::from_matches(toxicity::ToxicityMatches::default(), word_count)
        };

        tracing::debug!(
            word_count,
            unique_words,
            toxic_phrases = toxicity.toxic_phrase_count,
            "analysis complete"
        );

        AnalysisResult {
            word_count,
            char_count: counts.chars,
            line_count: counts.lines,
            sentence_count: counts.sentences,
            unique_words,
            filtered_word_count,
            avg_word_length,
            reading_level,
            lexical_diversity: stats::lexical_diversity(unique_words, word_count),
            words,
            sort_algorithm: self.sort_algorithm,
            sentence_stats: SentenceStats::scan(text),
            toxicity_enabled,
            toxicity,
        }
    }
}

/// Everything derived from one text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AnalysisResult {
    /// Tokens before stopword filtering.
    pub word_count: usize,
    /// Characters in the text.
    pub char_count: usize,
    /// Lines in the text.
    pub line_count: usize,
    /// Sentence terminators in the text.
    pub sentence_count: usize,
    /// Distinct words after stopword filtering.
    pub unique_words: usize,
    /// Words after stopword filtering (sum of frequencies).
    pub filtered_word_count: usize,
    /// Characters per word.
    pub avg_word_length: f64,
    /// Grade-level estimate.
    pub reading_level: f64,
    /// Unique words over total words, in `[0, 1]`.
    pub lexical_diversity: f64,
    /// Ranked word frequencies, highest first.
    pub words: Vec<WordEntry>,
    /// Algorithm that ranked `words`.
    pub sort_algorithm: SortAlgorithm,
    /// Sentence and paragraph statistics.
    pub sentence_stats: SentenceStats,
    /// Whether a dictionary was available. When false, `toxicity` is empty
    /// because detection was skipped, not because the text is clean.
    pub toxicity_enabled: bool,
    /// Toxic phrase findings and score.
    pub toxicity: ToxicityReport,
}

/// The `n` highest-ranked words of an analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TopWords {
    /// Algorithm used for ranking.
    pub algorithm: SortAlgorithm,
    /// Ranked entries, at most `n`.
    pub entries: Vec<WordEntry>,
    /// Share of all filtered words covered by `entries`, as a percentage.
    pub coverage_percent: f64,
}

/// Re-rank the analysis' words with `algorithm` and keep the top `n`.
pub fn top_words(result: &AnalysisResult, n: usize, algorithm: SortAlgorithm) -> TopWords {
    let mut entries = sort::sorted(&result.words, algorithm);
    entries.truncate(n);

    let shown: usize = entries.iter().map(|e| e.frequency).sum();
    let coverage_percent = if result.filtered_word_count == 0 {
        0.0
    } else {
        shown as f64 / result.filtered_word_count as f64 * 100.0
    };

    TopWords {
        algorithm,
        entries,
        coverage_percent,
    }
}
