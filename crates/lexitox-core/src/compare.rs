//! Side-by-side comparison of two analyses.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::analysis::AnalysisResult;
use crate::dictionary::Severity;

/// Toxicity difference (percentage points) above which one text is called more toxic.
pub const TOXICITY_DIFF_THRESHOLD: f64 = 2.0;

/// Toxicity difference above which the gap is called significant.
pub const TOXICITY_SIGNIFICANT_THRESHOLD: f64 = 5.0;

/// Lexical diversity difference (percentage points) worth reporting.
pub const DIVERSITY_DIFF_THRESHOLD: f64 = 1.0;

/// Average sentence length difference (words) worth reporting.
pub const SENTENCE_DIFF_THRESHOLD: f64 = 0.5;

/// An integer metric for both texts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CountDiff {
    /// Value for the first text.
    pub first: usize,
    /// Value for the second text.
    pub second: usize,
    /// `second - first`.
    pub diff: i64,
}

impl CountDiff {
    /// Pair two counts.
    pub fn new(first: usize, second: usize) -> Self {
        let to_i64 = |v: usize| i64::try_from(v).unwrap_or(i64::MAX);
        Self {
            first,
            second,
            diff: to_i64(second) - to_i64(first),
        }
    }
}

/// A floating-point metric for both texts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RatioDiff {
    /// Value for the first text.
    pub first: f64,
    /// Value for the second text.
    pub second: f64,
    /// `second - first`.
    pub diff: f64,
}

impl RatioDiff {
    /// Pair two values.
    pub fn new(first: f64, second: f64) -> Self {
        Self {
            first,
            second,
            diff: second - first,
        }
    }
}

/// Which text a comparison favors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Leaning {
    /// Difference below the threshold.
    #[default]
    Comparable,
    /// The first text is higher.
    First,
    /// The second text is higher.
    Second,
}

impl Leaning {
    fn from_diff(diff: f64, threshold: f64) -> Self {
        if diff > threshold {
            Self::Second
        } else if diff < -threshold {
            Self::First
        } else {
            Self::Comparable
        }
    }
}

/// Overall sentiment label of a text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum Sentiment {
    /// No toxic phrase matched.
    #[default]
    Neutral,
    /// At least one toxic phrase matched.
    Negative,
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Neutral => "Neutral",
            Self::Negative => "Negative",
        })
    }
}

/// Sentiment of one text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SentimentSummary {
    /// Label.
    pub label: Sentiment,
    /// `-toxicity_percentage / 10`.
    pub score: f64,
}

impl SentimentSummary {
    fn from_result(result: &AnalysisResult) -> Self {
        let label = if result.toxicity.toxic_phrase_count > 0 {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        };
        Self {
            label,
            score: -toxicity_percentage(result) / 10.0,
        }
    }
}

/// Metric-by-metric comparison of two analyses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ResultComparison {
    /// Total words.
    pub word_count: CountDiff,
    /// Distinct filtered words.
    pub unique_words: CountDiff,
    /// Lexical diversity, in percent.
    pub lexical_diversity: RatioDiff,
    /// Characters per word.
    pub avg_word_length: RatioDiff,
    /// Words per sentence.
    pub avg_sentence_length: RatioDiff,
    /// Distinct toxic phrases.
    pub toxic_phrases: CountDiff,
    /// Distinct toxic phrases per hundred words.
    pub toxicity_percentage: RatioDiff,
    /// Distinct MILD phrases.
    pub mild: CountDiff,
    /// Distinct MODERATE phrases.
    pub moderate: CountDiff,
    /// Distinct SEVERE phrases.
    pub severe: CountDiff,
    /// Sentiment of the first text.
    pub first_sentiment: SentimentSummary,
    /// Sentiment of the second text.
    pub second_sentiment: SentimentSummary,
    /// Which text is more toxic.
    pub more_toxic: Leaning,
    /// Whether the toxicity gap exceeds the significance threshold.
    pub significant_toxicity_gap: bool,
    /// Which text has more SEVERE phrases.
    pub more_severe: Leaning,
    /// Which text has the richer vocabulary.
    pub richer_vocabulary: Leaning,
    /// Which text has longer sentences.
    pub longer_sentences: Leaning,
}

impl ResultComparison {
    /// Compare `first` against `second`. Every diff is `second - first`.
    pub fn new(first: &AnalysisResult, second: &AnalysisResult) -> Self {
        let severity = |sev: Severity| {
            CountDiff::new(
                first.toxicity.severity_counts.get(sev),
                second.toxicity.severity_counts.get(sev),
            )
        };

        let lexical_diversity = RatioDiff::new(
            first.lexical_diversity * 100.0,
            second.lexical_diversity * 100.0,
        );
        let avg_sentence_length = RatioDiff::new(
            first.sentence_stats.avg_sentence_length,
            second.sentence_stats.avg_sentence_length,
        );
        let toxicity_percentage =
            RatioDiff::new(toxicity_percentage(first), toxicity_percentage(second));
        let severe = severity(Severity::Severe);

        Self {
            word_count: CountDiff::new(first.word_count, second.word_count),
            unique_words: CountDiff::new(first.unique_words, second.unique_words),
            lexical_diversity,
            avg_word_length: RatioDiff::new(first.avg_word_length, second.avg_word_length),
            avg_sentence_length,
            toxic_phrases: CountDiff::new(
                first.toxicity.toxic_phrase_count,
                second.toxicity.toxic_phrase_count,
            ),
            toxicity_percentage,
            mild: severity(Severity::Mild),
            moderate: severity(Severity::Moderate),
            severe,
            first_sentiment: SentimentSummary::from_result(first),
            second_sentiment: SentimentSummary::from_result(second),
            more_toxic: Leaning::from_diff(toxicity_percentage.diff, TOXICITY_DIFF_THRESHOLD),
            significant_toxicity_gap: toxicity_percentage.diff.abs()
                > TOXICITY_SIGNIFICANT_THRESHOLD,
            more_severe: Leaning::from_diff(severe.diff as f64, 0.0),
            richer_vocabulary: Leaning::from_diff(lexical_diversity.diff, DIVERSITY_DIFF_THRESHOLD),
            longer_sentences: Leaning::from_diff(avg_sentence_length.diff, SENTENCE_DIFF_THRESHOLD),
        }
    }

    /// Plain-language conclusions, one per line.
    pub fn conclusions(&self, first_name: &str, second_name: &str) -> Vec<String> {
        let name = |leaning: Leaning| match leaning {
            Leaning::First => Some(first_name),
            Leaning::Second => Some(second_name),
            Leaning::Comparable => None,
        };

        let mut lines = Vec::new();
        match name(self.more_toxic) {
            Some(file) if self.significant_toxicity_gap => {
                lines.push(format!("{file} shows significantly higher toxicity levels."));
                lines.push(format!("Recommendation: review and moderate {file} content."));
            }
            Some(file) => {
                lines.push(format!("{file} shows higher toxicity levels."));
                lines.push(format!("Recommendation: review {file} content."));
            }
            None => {
                lines.push("Both texts have comparable toxicity levels.".to_string());
                lines.push("Recommendation: continue monitoring both.".to_string());
            }
        }
        if let Some(file) = name(self.more_severe) {
            lines.push(format!("{file} contains more severe toxic content."));
        }
        if let Some(file) = name(self.richer_vocabulary) {
            lines.push(format!("{file} has better vocabulary richness."));
        }
        if let Some(file) = name(self.longer_sentences) {
            lines.push(format!("{file} uses longer, more complex sentences."));
        }
        lines
    }
}

/// Distinct toxic phrases per hundred words, 0 without words.
pub fn toxicity_percentage(result: &AnalysisResult) -> f64 {
    crate::toxicity::toxicity_density(result.toxicity.toxic_phrase_count, result.word_count)
}
