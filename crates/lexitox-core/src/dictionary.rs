//! Stopword lists and the toxic phrase dictionary.
//!
//! Both are loaded once and shared read-only across analyses. A missing or
//! empty source is reported as a [`DictionaryError`]; callers treat that as
//! "subsystem disabled" and carry on with an empty set.
//!
//! # Phrase dictionary format
//!
//! One `phrase,SEVERITY` entry per line. Blank lines and lines starting with
//! `#` or `;` are comments. A line without a comma is a MILD phrase, and an
//! unrecognized severity falls back to MILD with a warning.

use std::collections::HashSet;
use std::str::FromStr;

use camino::Utf8Path;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{DictionaryError, DictionaryResult, PhraseRejected};
use crate::text::MAX_WORD_LEN;

/// Maximum number of phrases in a dictionary.
pub const MAX_TOXIC_PHRASES: usize = 1000;

/// Maximum phrase length, in bytes.
pub const MAX_PHRASE_LEN: usize = 99;

/// Maximum number of stopwords read from a list.
pub const MAX_STOPWORDS: usize = 1000;

/// Severity tier of a toxic phrase.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "UPPERCASE")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum Severity {
    /// Mild insult or rudeness.
    #[default]
    Mild,
    /// Moderate harassment.
    Moderate,
    /// Severe abuse or threats.
    Severe,
}

impl Severity {
    /// All tiers, mildest first.
    pub const ALL: [Self; 3] = [Self::Mild, Self::Moderate, Self::Severe];

    /// Uppercase name used in dictionaries and reports.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Mild => "MILD",
            Self::Moderate => "MODERATE",
            Self::Severe => "SEVERE",
        }
    }

    /// Score weight of one distinct phrase in this tier.
    pub const fn weight(&self) -> u32 {
        match self {
            Self::Mild => 1,
            Self::Moderate => 2,
            Self::Severe => 3,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a severity token is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSeverity(pub String);

impl std::fmt::Display for UnknownSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown severity '{}'", self.0)
    }
}

impl std::error::Error for UnknownSeverity {}

impl FromStr for Severity {
    type Err = UnknownSeverity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|sev| sev.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownSeverity(s.to_string()))
    }
}

/// A dictionary entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToxicPhrase {
    /// Phrase as written in the dictionary.
    pub text: String,
    /// Severity tier.
    pub severity: Severity,
}

#[derive(Debug, Clone)]
struct Entry {
    phrase: ToxicPhrase,
    pattern: String,
}

/// Ordered, duplicate-free set of toxic phrases.
#[derive(Debug, Clone, Default)]
pub struct ToxicDictionary {
    entries: Vec<Entry>,
    seen: HashSet<String>,
}

impl ToxicDictionary {
    /// Create an empty dictionary. An empty dictionary disables detection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a phrase, rejecting duplicates, bad lengths and overflow.
    pub fn add(&mut self, phrase: &str, severity: Severity) -> Result<(), PhraseRejected> {
        if self.entries.len() >= MAX_TOXIC_PHRASES {
            return Err(PhraseRejected::Full);
        }
        if phrase.is_empty() || phrase.len() > MAX_PHRASE_LEN {
            return Err(PhraseRejected::InvalidLength);
        }
        let pattern = phrase.to_ascii_lowercase();
        if !self.seen.insert(pattern.clone()) {
            return Err(PhraseRejected::Duplicate);
        }
        self.entries.push(Entry {
            phrase: ToxicPhrase {
                text: phrase.to_string(),
                severity,
            },
            pattern,
        });
        Ok(())
    }

    /// Parse dictionary source text, skipping bad lines with a warning.
    #[tracing::instrument(skip_all, fields(source_len = source.len()))]
    pub fn parse(source: &str) -> Self {
        let mut dictionary = Self::new();

        for (line_no, raw) in source.lines().enumerate() {
            let line = raw.trim_end_matches('\r');
            if line.trim().is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            let (phrase, severity) = match line.split_once(',') {
                Some((phrase, token)) => {
                    let token = token.trim();
                    let severity = token.parse().unwrap_or_else(|_| {
                        tracing::warn!(
                            line = line_no + 1,
                            severity = token,
                            phrase,
                            "invalid severity, using MILD"
                        );
                        Severity::Mild
                    });
                    (phrase.trim(), severity)
                }
                None => (line.trim(), Severity::Mild),
            };

            match dictionary.add(phrase, severity) {
                Ok(()) => {}
                Err(PhraseRejected::Full) => {
                    tracing::warn!(
                        limit = MAX_TOXIC_PHRASES,
                        line = line_no + 1,
                        "toxic phrase dictionary full, ignoring remaining lines"
                    );
                    break;
                }
                Err(reason) => {
                    tracing::warn!(line = line_no + 1, phrase, %reason, "skipping toxic phrase");
                }
            }
        }

        dictionary
    }

    /// Load a dictionary file.
    ///
    /// Fails if the file cannot be read or contains no usable phrase.
    #[tracing::instrument(fields(path = %path))]
    pub fn load(path: &Utf8Path) -> DictionaryResult<Self> {
        let source =
            std::fs::read_to_string(path.as_std_path()).map_err(|e| DictionaryError::Read {
                path: path.to_path_buf(),
                source: e,
            })?;
        let dictionary = Self::parse(&source);
        if dictionary.is_empty() {
            return Err(DictionaryError::Empty {
                path: path.to_path_buf(),
            });
        }
        tracing::info!(phrases = dictionary.len(), "loaded toxic phrase dictionary");
        Ok(dictionary)
    }

    /// Number of phrases.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the dictionary holds no phrase.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Phrases in load order.
    pub fn phrases(&self) -> impl Iterator<Item = &ToxicPhrase> {
        self.entries.iter().map(|e| &e.phrase)
    }

    /// Phrases paired with their lowercase search pattern, in load order.
    pub(crate) fn patterns(&self) -> impl Iterator<Item = (&ToxicPhrase, &str)> {
        self.entries.iter().map(|e| (&e.phrase, e.pattern.as_str()))
    }
}

/// Words excluded from the frequency table.
///
/// Matching is exact and case-sensitive against the already-normalized
/// (lowercase) form of each word.
#[derive(Debug, Clone, Default)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    /// Create an empty stopword set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a whitespace-separated word list, keeping at most [`MAX_STOPWORDS`].
    pub fn parse(source: &str) -> Self {
        let mut words = HashSet::new();
        for word in source.split_whitespace().take(MAX_STOPWORDS) {
            let word: String = word.chars().take(MAX_WORD_LEN).collect();
            words.insert(word);
        }
        Self { words }
    }

    /// Load a stopword file.
    #[tracing::instrument(fields(path = %path))]
    pub fn load(path: &Utf8Path) -> DictionaryResult<Self> {
        let source =
            std::fs::read_to_string(path.as_std_path()).map_err(|e| DictionaryError::Read {
                path: path.to_path_buf(),
                source: e,
            })?;
        let stopwords = Self::parse(&source);
        if stopwords.is_empty() {
            return Err(DictionaryError::Empty {
                path: path.to_path_buf(),
            });
        }
        tracing::info!(words = stopwords.len(), "loaded stopwords");
        Ok(stopwords)
    }

    /// Whether `word` is a stopword.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Number of distinct stopwords.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for StopWords {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            words: iter.into_iter().map(Into::into).collect(),
        }
    }
}
