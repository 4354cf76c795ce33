//! Command implementations.

use std::time::Duration;

use anyhow::bail;
use camino::Utf8PathBuf;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::warn;

use lexitox_core::input::{self, CsvSelection};
use lexitox_core::{Analyzer, Config, SortAlgorithm, StopWords, ToxicDictionary};

pub mod analyze;
pub mod compare;
pub mod export;
pub mod info;
#[cfg(feature = "mcp")]
pub mod serve;
pub mod top;
pub mod toxicity;

/// Input files shared by the analysis commands.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Text (.txt) or CSV (.csv) files. Several files are analyzed as one text.
    #[arg(required = true, value_name = "FILE")]
    pub files: Vec<Utf8PathBuf>,

    /// Analyze only this zero-based CSV column (single CSV file only).
    #[arg(long, value_name = "N")]
    pub column: Option<usize>,
}

impl InputArgs {
    /// Display name for reports: the file name, or a count for several files.
    pub fn label(&self) -> String {
        match self.files.as_slice() {
            [single] => single.to_string(),
            files => format!("{} files", files.len()),
        }
    }
}

/// Read the files named by `args` into one text.
///
/// A single file is read as-is (or as one CSV column with `--column`).
/// Several files are concatenated with a header line each; unreadable ones
/// are skipped with a warning.
pub fn load_text(args: &InputArgs, max_bytes: Option<usize>) -> anyhow::Result<String> {
    let selection = args.column.map_or(CsvSelection::All, CsvSelection::Column);

    if let [path] = args.files.as_slice() {
        return Ok(input::read_input(path, selection, max_bytes)?);
    }
    if args.column.is_some() {
        bail!("--column can only be used with a single CSV file");
    }

    let combined = input::combine_files(args.files.as_slice(), max_bytes)?;
    for (path, reason) in &combined.skipped {
        warn!(path = %path, reason = %reason, "skipped input file");
    }
    Ok(combined.text)
}

/// Build the analyzer from the configured stopword list and dictionary.
///
/// A missing or empty dictionary disables toxicity detection, and a missing
/// stopword list means every word is counted. Neither is an error.
pub fn load_analyzer(config: &Config, sort: Option<SortAlgorithm>) -> Analyzer {
    let stopwords_path = config.stopwords_path();
    let stopwords = StopWords::load(&stopwords_path).unwrap_or_else(|e| {
        warn!(error = %e, "stopword list unavailable, counting every word");
        StopWords::new()
    });

    let dictionary_path = config.dictionary_path();
    let dictionary = ToxicDictionary::load(&dictionary_path).unwrap_or_else(|e| {
        warn!(error = %e, "toxicity detection disabled");
        ToxicDictionary::new()
    });

    Analyzer::new(stopwords, dictionary).with_sort_algorithm(sort.unwrap_or(config.sort_algorithm))
}

/// Spinner on stderr for work that may take a moment.
///
/// Hidden automatically when stderr is not a terminal.
pub fn spinner(message: &'static str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        bar.set_style(style);
    }
    bar.set_message(message);
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}
