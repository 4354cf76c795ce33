//! Error types for lexitox-core.
//!
//! Analysis itself never fails: empty input, capacity overflow and
//! malformed dictionary lines all degrade to a usable result. The errors
//! here cover the edges where the core touches the filesystem.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),

    /// Configuration file not found after searching all locations.
    #[error("no configuration file found")]
    NotFound,
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur when loading a stopword list or phrase dictionary.
///
/// Callers treat either variant as "subsystem disabled" rather than fatal.
#[derive(Error, Debug)]
pub enum DictionaryError {
    /// The source file could not be read.
    #[error("cannot read {path}: {source}")]
    Read {
        /// Path that failed to load.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The source was readable but yielded no usable entries.
    #[error("{path} contains no usable entries")]
    Empty {
        /// Path that was read.
        path: Utf8PathBuf,
    },
}

/// Result type alias using [`DictionaryError`].
pub type DictionaryResult<T> = Result<T, DictionaryError>;

/// Reasons a single phrase is refused by the toxic phrase dictionary.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhraseRejected {
    /// The dictionary already holds its maximum number of phrases.
    #[error("dictionary is full")]
    Full,

    /// The phrase is empty or longer than the phrase limit.
    #[error("invalid phrase length")]
    InvalidLength,

    /// The phrase is already present (compared case-insensitively).
    #[error("duplicate phrase")]
    Duplicate,
}

/// Errors that can occur while writing report files.
#[derive(Error, Debug)]
pub enum ReportError {
    /// A report file could not be written.
    #[error("failed to write {path}: {source}")]
    Write {
        /// Path that failed to write.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Result type alias using [`ReportError`].
pub type ReportResult<T> = Result<T, ReportError>;

/// Errors that can occur while turning input files into analyzable text.
#[derive(Error, Debug)]
pub enum InputError {
    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// Path that failed to read.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The file exceeds the configured size limit.
    #[error("input too large: {path} is {size} bytes (limit: {limit} bytes)")]
    TooLarge {
        /// Offending path.
        path: Utf8PathBuf,
        /// Actual size in bytes.
        size: u64,
        /// Configured limit in bytes.
        limit: usize,
    },

    /// The file is empty.
    #[error("{path} is empty")]
    EmptyFile {
        /// Offending path.
        path: Utf8PathBuf,
    },

    /// Too much of the file's leading sample is binary data.
    #[error("{path} might be corrupted: {percent}% of the first bytes are not text")]
    Corrupted {
        /// Offending path.
        path: Utf8PathBuf,
        /// Share of non-text bytes in the sample.
        percent: usize,
    },

    /// The file starts with a UTF-16 byte-order mark.
    #[error("UTF-16 input is not supported: {path}")]
    UnsupportedEncoding {
        /// Offending path.
        path: Utf8PathBuf,
    },

    /// The file extension is neither `.txt` nor `.csv`.
    #[error("unsupported file type: {path}")]
    UnsupportedExtension {
        /// Offending path.
        path: Utf8PathBuf,
    },

    /// A CSV column extraction found no non-empty cells.
    #[error("no data found in CSV column {column}")]
    NoColumnData {
        /// Zero-based column index that was requested.
        column: usize,
    },

    /// None of the requested files could be read.
    #[error("no files were successfully processed")]
    NoReadableFiles,
}

/// Result type alias using [`InputError`].
pub type InputResult<T> = Result<T, InputError>;
