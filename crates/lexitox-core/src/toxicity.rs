//! Toxic phrase matching and scoring.
//!
//! Matching runs every dictionary phrase over an ASCII-lowercased copy of
//! the text. An occurrence counts only when it is delimited by non-alphanumeric
//! characters (or the text edges) on both sides, so `kill` matches in
//! `I will kill you` but not in `killer`.
//!
//! The scan is greedy and non-overlapping: after every hit, boundary-delimited
//! or not, it resumes at the end of that hit. `aa` occurs twice in `aaaa`.
//!
//! Severity tallies count *distinct* matched phrases, while the toxic word
//! count sums occurrences. Density and score use the distinct count.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::dictionary::{Severity, ToxicDictionary};

/// Maximum number of distinct phrases reported per analysis.
pub const MAX_DETECTED_PHRASES: usize = 50;

/// A dictionary phrase found in the analyzed text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DetectedPhrase {
    /// Phrase as written in the dictionary.
    pub text: String,
    /// Severity tier of the phrase.
    pub severity: Severity,
    /// Number of boundary-delimited occurrences (at least 1).
    pub count: usize,
}

/// Number of distinct matched phrases per severity tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SeverityCounts {
    /// Distinct MILD phrases.
    pub mild: usize,
    /// Distinct MODERATE phrases.
    pub moderate: usize,
    /// Distinct SEVERE phrases.
    pub severe: usize,
}

impl SeverityCounts {
    /// Tally for one tier.
    pub const fn get(&self, severity: Severity) -> usize {
        match severity {
            Severity::Mild => self.mild,
            Severity::Moderate => self.moderate,
            Severity::Severe => self.severe,
        }
    }

    fn increment(&mut self, severity: Severity) {
        match severity {
            Severity::Mild => self.mild += 1,
            Severity::Moderate => self.moderate += 1,
            Severity::Severe => self.severe += 1,
        }
    }

    /// Sum over all tiers.
    pub const fn total(&self) -> usize {
        self.mild + self.moderate + self.severe
    }

    /// Severity-weighted sum (SEVERE 3, MODERATE 2, MILD 1).
    pub fn weighted(&self) -> u32 {
        Severity::ALL
            .into_iter()
            .map(|sev| sev.weight() * u32::try_from(self.get(sev)).unwrap_or(u32::MAX))
            .fold(0u32, u32::saturating_add)
    }
}

/// Raw output of [`detect`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToxicityMatches {
    /// Matched phrases in dictionary order, at most [`MAX_DETECTED_PHRASES`].
    pub phrases: Vec<DetectedPhrase>,
    /// Distinct phrases per tier.
    pub severity_counts: SeverityCounts,
    /// Sum of occurrence counts over `phrases`.
    pub toxic_word_count: usize,
}

/// Count boundary-delimited, non-overlapping occurrences of `pattern`.
///
/// Both arguments are expected to be lowercased already. An empty pattern
/// never matches.
pub fn count_occurrences(haystack: &str, pattern: &str) -> usize {
    if pattern.is_empty() {
        return 0;
    }

    let bytes = haystack.as_bytes();
    let mut count = 0;
    let mut from = 0;

    while let Some(offset) = haystack.get(from..).and_then(|rest| rest.find(pattern)) {
        let start = from + offset;
        let end = start + pattern.len();

        let left_ok = start == 0 || !bytes[start - 1].is_ascii_alphanumeric();
        let right_ok = bytes.get(end).is_none_or(|b| !b.is_ascii_alphanumeric());
        if left_ok && right_ok {
            count += 1;
        }
        from = end;
    }

    count
}

/// Scan `text` for every dictionary phrase.
///
/// Stops once [`MAX_DETECTED_PHRASES`] distinct phrases have matched; later
/// dictionary entries are not scanned at all.
#[tracing::instrument(skip_all, fields(text_len = text.len(), phrases = dictionary.len()))]
pub fn detect(text: &str, dictionary: &ToxicDictionary) -> ToxicityMatches {
    let mut matches = ToxicityMatches::default();
    if dictionary.is_empty() || text.is_empty() {
        return matches;
    }

    let lowered = text.to_ascii_lowercase();

    for (phrase, pattern) in dictionary.patterns() {
        if matches.phrases.len() >= MAX_DETECTED_PHRASES {
            tracing::warn!(
                limit = MAX_DETECTED_PHRASES,
                "detected phrase limit reached, skipping remaining dictionary entries"
            );
            break;
        }

        let count = count_occurrences(&lowered, pattern);
        if count == 0 {
            continue;
        }

        matches.toxic_word_count += count;
        matches.severity_counts.increment(phrase.severity);
        matches.phrases.push(DetectedPhrase {
            text: phrase.text.clone(),
            severity: phrase.severity,
            count,
        });
    }

    tracing::debug!(
        distinct = matches.phrases.len(),
        occurrences = matches.toxic_word_count,
        "toxic phrase scan complete"
    );
    matches
}

/// Distinct matched phrases per hundred words.
pub fn toxicity_density(distinct_phrases: usize, word_count: usize) -> f64 {
    if word_count == 0 {
        return 0.0;
    }
    distinct_phrases as f64 / word_count as f64 * 100.0
}

/// Composite 0 to 100 score: severity weights plus a density bonus.
pub fn toxicity_score(counts: &SeverityCounts, word_count: usize) -> u32 {
    if word_count == 0 {
        return 0;
    }

    let density = toxicity_density(counts.total(), word_count);
    let bonus = if density > 5.0 {
        40
    } else if density > 2.0 {
        25
    } else if density > 1.0 {
        15
    } else if density > 0.5 {
        5
    } else {
        0
    };

    counts.weighted().saturating_add(bonus).min(100)
}

/// Label bucket for a toxicity score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ToxicityLevel {
    /// Score below 15.
    #[default]
    VeryLow,
    /// Score 15 to 29.
    Low,
    /// Score 30 to 49.
    Medium,
    /// Score 50 to 69.
    High,
    /// Score 70 and above.
    VeryHigh,
}

impl ToxicityLevel {
    /// Bucket a score.
    pub const fn from_score(score: u32) -> Self {
        match score {
            0..15 => Self::VeryLow,
            15..30 => Self::Low,
            30..50 => Self::Medium,
            50..70 => Self::High,
            _ => Self::VeryHigh,
        }
    }

    /// Human-readable label.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::VeryLow => "VERY LOW",
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::VeryHigh => "VERY HIGH",
        }
    }
}

impl std::fmt::Display for ToxicityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Coarse risk assessment derived from the severity tallies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// Nothing matched.
    #[default]
    None,
    /// Minor toxic content.
    Low,
    /// Three or more distinct MODERATE phrases.
    Medium,
    /// At least one SEVERE phrase.
    High,
}

impl RiskLevel {
    /// Assess risk from severity tallies.
    pub const fn assess(counts: &SeverityCounts) -> Self {
        if counts.severe > 0 {
            Self::High
        } else if counts.moderate >= 3 {
            Self::Medium
        } else if counts.total() > 0 {
            Self::Low
        } else {
            Self::None
        }
    }

    /// One-line description used in reports.
    pub const fn description(&self) -> &'static str {
        match self {
            Self::None => "NO RISK - No toxic content detected",
            Self::Low => "LOW RISK - Minor toxic content",
            Self::Medium => "MEDIUM RISK - Multiple toxic phrases detected",
            Self::High => "HIGH RISK - Contains severe toxic content",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::None => "NONE",
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        })
    }
}

/// Toxicity section of an analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ToxicityReport {
    /// Matched phrases in dictionary order.
    pub phrases: Vec<DetectedPhrase>,
    /// Distinct matched phrases per tier.
    pub severity_counts: SeverityCounts,
    /// Number of distinct matched phrases.
    pub toxic_phrase_count: usize,
    /// Total occurrences across matched phrases.
    pub toxic_word_count: usize,
    /// Distinct phrases per hundred words.
    pub density: f64,
    /// Composite score, 0 to 100.
    pub score: u32,
    /// Label for `score`.
    pub level: ToxicityLevel,
    /// Risk assessment.
    pub risk: RiskLevel,
    /// Toxic occurrences as a percentage of all words.
    pub toxic_ratio: f64,
    /// Words not accounted for by toxic occurrences.
    pub clean_word_count: usize,
    /// `clean_word_count` as a percentage of all words.
    pub clean_ratio: f64,
}

impl ToxicityReport {
    /// Derive the report from raw matches and the text's total word count.
    pub fn from_matches(matches: ToxicityMatches, word_count: usize) -> Self {
        let ToxicityMatches {
            phrases,
            severity_counts,
            toxic_word_count,
        } = matches;

        let score = toxicity_score(&severity_counts, word_count);
        let clean_word_count = word_count.saturating_sub(toxic_word_count);
        let (toxic_ratio, clean_ratio) = if word_count == 0 {
            (0.0, 0.0)
        } else {
            (
                toxic_word_count as f64 / word_count as f64 * 100.0,
                clean_word_count as f64 / word_count as f64 * 100.0,
            )
        };

        Self {
            toxic_phrase_count: phrases.len(),
            phrases,
            severity_counts,
            toxic_word_count,
            density: toxicity_density(severity_counts.total(), word_count),
            score,
            level: ToxicityLevel::from_score(score),
            risk: RiskLevel::assess(&severity_counts),
            toxic_ratio,
            clean_word_count,
            clean_ratio,
        }
    }

    /// The `n` most frequent phrases; see [`most_toxic`].
    pub fn most_toxic(&self, n: usize) -> Vec<DetectedPhrase> {
        most_toxic(&self.phrases, n)
    }
}

/// Phrases ordered by occurrence count, highest first, truncated to `n`.
///
/// Equal counts keep dictionary order.
pub fn most_toxic(phrases: &[DetectedPhrase], n: usize) -> Vec<DetectedPhrase> {
    let mut ranked = phrases.to_vec();
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(n);
    ranked
}
