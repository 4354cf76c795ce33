//! Core library for lexitox.
//!
//! This crate holds the text analysis engine used by the `lexitox` CLI and
//! MCP server: tokenizing, word frequency counting, ranking, toxic phrase
//! detection and scoring, plus the file ingestion and report rendering that
//! sit around it.
//!
//! # Modules
//!
//! - [`text`] - Tokenizer, word normalization and raw counts
//! - [`frequency`] - Fixed-capacity word frequency table
//! - [`sort`] - The three ranking algorithms
//! - [`dictionary`] - Toxic phrase dictionary and stopword list
//! - [`toxicity`] - Phrase matching, scoring and risk levels
//! - [`stats`] - Sentence statistics and readability
//! - [`analysis`] - The [`Analyzer`] context and [`AnalysisResult`]
//! - [`compare`] - Comparing two analyses
//! - [`input`] - Reading text and CSV files
//! - [`export`] - Text/CSV reports and ASCII charts
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```
//! use lexitox_core::{Analyzer, StopWords, ToxicDictionary};
//!
//! let analyzer = Analyzer::new(
//!     StopWords::parse("the a"),
//!     ToxicDictionary::parse("stupid,MILD\n"),
//! );
//! let result = analyzer.analyze("The cat is not stupid. A stupid dog, maybe.");
//!
//! assert_eq!(result.toxicity.toxic_phrase_count, 1);
//! assert_eq!(result.toxicity.toxic_word_count, 2);
//! ```
#![deny(unsafe_code)]

pub mod analysis;
pub mod compare;
pub mod config;
pub mod dictionary;
pub mod error;
pub mod export;
pub mod frequency;
pub mod input;
pub mod sort;
pub mod stats;
pub mod text;
pub mod toxicity;

pub use analysis::{AnalysisResult, Analyzer, TopWords, top_words};
pub use compare::ResultComparison;
pub use config::{Config, ConfigLoader, ConfigSources, LogLevel};
pub use dictionary::{Severity, StopWords, ToxicDictionary, ToxicPhrase};
pub use error::{
    ConfigError, ConfigResult, DictionaryError, DictionaryResult, InputError, InputResult,
    ReportError, ReportResult,
};
pub use export::ReportFormat;
pub use frequency::{FrequencyTable, WordEntry};
pub use input::{CsvSelection, DEFAULT_MAX_INPUT_BYTES};
pub use sort::SortAlgorithm;
pub use toxicity::{DetectedPhrase, RiskLevel, ToxicityLevel, ToxicityReport};
