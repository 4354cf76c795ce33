//! Report rendering: text reports, CSV tables, ASCII charts and report bundles.
//!
//! Rendering functions return `String`s; only [`write_bundle`] and
//! [`write_report`] touch the filesystem.

use std::fmt::Write as _;

use camino::{Utf8Path, Utf8PathBuf};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::analysis::AnalysisResult;
use crate::compare::{CountDiff, RatioDiff, ResultComparison};
use crate::dictionary::Severity;
use crate::error::{ReportError, ReportResult};
use crate::frequency::WordEntry;

/// Maximum rows in the word frequency CSV.
pub const MAX_WORD_CSV_ROWS: usize = 100;

/// Words listed in the full text report.
pub const FULL_REPORT_TOP_WORDS: usize = 20;

/// Width of the longest bar in the word frequency chart.
const WORD_BAR_WIDTH: usize = 40;

/// Width of a bar covering every matched phrase in the severity chart.
const SEVERITY_BAR_WIDTH: usize = 20;

/// Which files a report bundle contains.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum ReportFormat {
    /// Only the full text report.
    Text,
    /// Only the CSV tables.
    Csv,
    /// Text report and CSV tables.
    #[default]
    Both,
}

impl ReportFormat {
    /// Lowercase name, as written in configuration.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Csv => "csv",
            Self::Both => "both",
        }
    }

    const fn includes_text(self) -> bool {
        matches!(self, Self::Text | Self::Both)
    }

    const fn includes_csv(self) -> bool {
        matches!(self, Self::Csv | Self::Both)
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Quote a CSV field if it contains a comma, quote or line break.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn shortest(result: &AnalysisResult) -> String {
    result
        .sentence_stats
        .shortest_sentence
        .map_or_else(|| "n/a".to_string(), |n| n.to_string())
}

/// `Metric,Value` table of the headline numbers.
///
/// Toxicity rows are present only when at least one phrase matched.
pub fn analysis_csv(result: &AnalysisResult) -> String {
    let mut out = String::from("Metric,Value\n");
    let stats = &result.sentence_stats;
    let tox = &result.toxicity;

    let _ = writeln!(out, "Total Characters,{}", result.char_count);
    let _ = writeln!(out, "Total Words,{}", result.word_count);
    let _ = writeln!(out, "Total Sentences,{}", result.sentence_count);
    let _ = writeln!(out, "Total Lines,{}", result.line_count);
    let _ = writeln!(out, "Unique Words,{}", result.unique_words);
    let _ = writeln!(out, "Average Word Length,{:.2}", result.avg_word_length);
    let _ = writeln!(out, "Reading Level,{:.2}", result.reading_level);
    let _ = writeln!(out, "Lexical Diversity,{:.3}", result.lexical_diversity);
    let _ = writeln!(out, "Average Sentence Length,{:.1}", stats.avg_sentence_length);
    let _ = writeln!(out, "Paragraph Count,{}", stats.paragraphs);

    if tox.toxic_phrase_count > 0 {
        let _ = writeln!(out, "Total Toxic Phrases,{}", tox.toxic_phrase_count);
        let _ = writeln!(out, "Severe Toxic Phrases,{}", tox.severity_counts.severe);
        let _ = writeln!(out, "Moderate Toxic Phrases,{}", tox.severity_counts.moderate);
        let _ = writeln!(out, "Mild Toxic Phrases,{}", tox.severity_counts.mild);
        let _ = writeln!(out, "Toxicity Score,{}", tox.score);
        let _ = writeln!(out, "Toxicity Density,{:.2}%", tox.density);
    }
    out
}

/// `Rank,Word,Frequency,Percentage` table of the first 100 ranked words.
///
/// Percentages are relative to all ranked words, not just the rows shown.
pub fn word_frequency_csv(words: &[WordEntry]) -> String {
    let mut out = String::from("Rank,Word,Frequency,Percentage\n");
    let total: usize = words.iter().map(|e| e.frequency).sum();
    for (rank, entry) in words.iter().take(MAX_WORD_CSV_ROWS).enumerate() {
        let pct = if total == 0 {
            0.0
        } else {
            entry.frequency as f64 / total as f64 * 100.0
        };
        let _ = writeln!(
            out,
            "{},{},{},{pct:.2}%",
            rank + 1,
            csv_field(&entry.word),
            entry.frequency
        );
    }
    out
}

/// `Rank,Toxic Phrase,Severity,Count` table in detection order.
pub fn toxicity_csv(result: &AnalysisResult) -> String {
    let mut out = String::from("Rank,Toxic Phrase,Severity,Count\n");
    for (rank, phrase) in result.toxicity.phrases.iter().enumerate() {
        let _ = writeln!(
            out,
            "{},{},{},{}",
            rank + 1,
            csv_field(&phrase.text),
            phrase.severity,
            phrase.count
        );
    }
    out
}

/// Human-readable report: basic, advanced and toxicity sections.
pub fn text_report(result: &AnalysisResult, top_n: usize) -> String {
    let mut out = String::new();
    let stats = &result.sentence_stats;

    out.push_str("TEXT ANALYSIS REPORT\n====================\n\n");

    out.push_str("BASIC STATISTICS:\n");
    let _ = writeln!(out, "Total characters:    {}", result.char_count);
    let _ = writeln!(out, "Total words:         {}", result.word_count);
    let _ = writeln!(out, "Total sentences:     {}", result.sentence_count);
    let _ = writeln!(out, "Total lines:         {}", result.line_count);
    let _ = writeln!(out, "Unique words:        {}", result.unique_words);
    let _ = writeln!(out, "Average word length: {:.2}", result.avg_word_length);
    let _ = writeln!(out, "Reading level:       {:.2}", result.reading_level);
    out.push('\n');

    out.push_str("ADVANCED STATISTICS:\n");
    let _ = writeln!(
        out,
        "Lexical diversity:   {:.1}%",
        result.lexical_diversity * 100.0
    );
    let _ = writeln!(out, "Avg sentence length: {:.1} words", stats.avg_sentence_length);
    let _ = writeln!(out, "Longest sentence:    {} words", stats.longest_sentence);
    let _ = writeln!(out, "Shortest sentence:   {}", shortest(result));
    let _ = writeln!(out, "Paragraphs:          {}", stats.paragraphs);
    out.push('\n');

    let shown = top_n.min(result.words.len());
    let _ = writeln!(out, "TOP {shown} WORDS ({}):", result.sort_algorithm);
    for (rank, entry) in result.words.iter().take(shown).enumerate() {
        let _ = writeln!(
            out,
            "{:>2}. {:<15} ({} occurrences)",
            rank + 1,
            entry.word,
            entry.frequency
        );
    }
    out.push('\n');

    out.push_str(&toxicity_section(result));
    out
}

/// The toxicity part of [`text_report`].
pub fn toxicity_section(result: &AnalysisResult) -> String {
    let mut out = String::from("TOXICITY ANALYSIS:\n");
    let tox = &result.toxicity;

    if !result.toxicity_enabled {
        out.push_str("Toxicity detection skipped: no phrase dictionary loaded\n");
        return out;
    }
    if tox.toxic_phrase_count == 0 {
        out.push_str("No toxic content detected\n");
        return out;
    }

    let _ = writeln!(out, "Total toxic phrases: {}", tox.toxic_phrase_count);
    let _ = writeln!(
        out,
        "Severe: {}, Moderate: {}, Mild: {}",
        tox.severity_counts.severe, tox.severity_counts.moderate, tox.severity_counts.mild
    );
    let _ = writeln!(out, "Toxicity density:    {:.2}%", tox.density);
    let _ = writeln!(
        out,
        "Word composition:    {} toxic ({:.1}%) / {} clean ({:.1}%)",
        tox.toxic_word_count, tox.toxic_ratio, tox.clean_word_count, tox.clean_ratio
    );
    let _ = writeln!(out, "Toxicity score:      {}/100 ({})", tox.score, tox.level);
    let _ = writeln!(out, "Risk assessment:     {}", tox.risk.description());
    out.push_str("\nDETECTED TOXIC PHRASES:\n");
    for (rank, phrase) in tox.phrases.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>2}. {} [{}] x{}",
            rank + 1,
            phrase.text,
            phrase.severity,
            phrase.count
        );
    }
    out
}

/// Horizontal bar chart of the first `top_n` ranked words.
///
/// The most frequent word gets a 40-cell bar; every shown word gets at
/// least one cell.
pub fn word_frequency_chart(words: &[WordEntry], top_n: usize) -> String {
    let shown = &words[..top_n.min(words.len())];
    let Some(max) = shown.iter().map(|e| e.frequency).max() else {
        return "No words available for chart.\n".to_string();
    };
    let max = max.max(1);

    let mut out = String::new();
    let _ = writeln!(out, "TOP {} WORDS FREQUENCY CHART", shown.len());
    for entry in shown {
        let bar = (entry.frequency * WORD_BAR_WIDTH / max).max(1);
        let _ = writeln!(
            out,
            "{:<15} {} {}",
            entry.word,
            "█".repeat(bar),
            entry.frequency
        );
    }
    out
}

/// Bar chart of matched phrases per severity tier.
///
/// Returns an empty string when nothing matched.
pub fn severity_chart(result: &AnalysisResult) -> String {
    let counts = &result.toxicity.severity_counts;
    let total = counts.total();
    if total == 0 {
        return String::new();
    }

    let mut out = String::from("TOXICITY DISTRIBUTION\n");
    for severity in [Severity::Severe, Severity::Moderate, Severity::Mild] {
        let count = counts.get(severity);
        let label = format!("{severity}:");
        let _ = writeln!(
            out,
            "{label:<10} {count:>2} phrases {}",
            "█".repeat(count * SEVERITY_BAR_WIDTH / total)
        );
    }
    out
}

/// Side-by-side report for two analyses.
pub fn comparison_report(
    comparison: &ResultComparison,
    first_name: &str,
    second_name: &str,
) -> String {
    let c = comparison;
    let mut out = String::from("TEXT COMPARISON REPORT\n======================\n\n");
    let _ = writeln!(out, "First:  {first_name}");
    let _ = writeln!(out, "Second: {second_name}\n");

    let rule = "-".repeat(62);
    out.push_str("BASIC STATISTICS:\n");
    let _ = writeln!(
        out,
        "{:<22} | {:>12} | {:>12} | {:>8}\n{rule}",
        "Metric", "First", "Second", "Diff"
    );
    let count_row = |out: &mut String, label: &str, d: CountDiff| {
        let _ = writeln!(
            out,
            "{label:<22} | {:>12} | {:>12} | {:>+8}",
            d.first, d.second, d.diff
        );
    };
    let ratio_row = |out: &mut String, label: &str, d: RatioDiff, pct: &str| {
        let _ = writeln!(
            out,
            "{label:<22} | {:>11.2}{pct} | {:>11.2}{pct} | {:>+7.2}{pct}",
            d.first, d.second, d.diff
        );
    };

    count_row(&mut out, "Total words", c.word_count);
    count_row(&mut out, "Unique words", c.unique_words);
    ratio_row(&mut out, "Lexical diversity", c.lexical_diversity, "%");
    ratio_row(&mut out, "Avg word length", c.avg_word_length, " ");
    ratio_row(&mut out, "Avg sentence length", c.avg_sentence_length, " ");

    out.push_str("\nTOXICITY:\n");
    let _ = writeln!(
        out,
        "{:<22} | {:>12} | {:>12} | {:>8}\n{rule}",
        "Metric", "First", "Second", "Diff"
    );
    count_row(&mut out, "Toxic phrases", c.toxic_phrases);
    ratio_row(&mut out, "Toxicity percentage", c.toxicity_percentage, "%");
    count_row(&mut out, "Mild", c.mild);
    count_row(&mut out, "Moderate", c.moderate);
    count_row(&mut out, "Severe", c.severe);

    out.push_str("\nSENTIMENT:\n");
    let _ = writeln!(
        out,
        "{first_name}: {} ({:.2})",
        c.first_sentiment.label, c.first_sentiment.score
    );
    let _ = writeln!(
        out,
        "{second_name}: {} ({:.2})",
        c.second_sentiment.label, c.second_sentiment.score
    );

    out.push_str("\nCONCLUSIONS:\n");
    for line in c.conclusions(first_name, second_name) {
        let _ = writeln!(out, "- {line}");
    }
    out
}

/// Write `contents` to `path`.
pub fn write_report(path: &Utf8Path, contents: &str) -> ReportResult<()> {
    std::fs::write(path.as_std_path(), contents).map_err(|source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn bundle_path(base: &Utf8Path, suffix: &str) -> Utf8PathBuf {
    Utf8PathBuf::from(format!("{base}{suffix}"))
}

/// Write the report bundle for `result` next to `base`.
///
/// Produces `<base>_analysis.csv`, `<base>_words.csv` and, when phrases
/// matched, `<base>_toxicity.csv` for the CSV formats, and `<base>_full.txt`
/// for the text formats. Returns the written paths in that order.
#[tracing::instrument(skip(result), fields(base = %base, ?format))]
pub fn write_bundle(
    base: &Utf8Path,
    result: &AnalysisResult,
    format: ReportFormat,
) -> ReportResult<Vec<Utf8PathBuf>> {
    let mut written = Vec::new();

    if format.includes_csv() {
        let path = bundle_path(base, "_analysis.csv");
        write_report(&path, &analysis_csv(result))?;
        written.push(path);

        let path = bundle_path(base, "_words.csv");
        write_report(&path, &word_frequency_csv(&result.words))?;
        written.push(path);

        if result.toxicity.toxic_phrase_count > 0 {
            let path = bundle_path(base, "_toxicity.csv");
            write_report(&path, &toxicity_csv(result))?;
            written.push(path);
        }
    }

    if format.includes_text() {
        let path = bundle_path(base, "_full.txt");
        let mut report = format!("Analysis ID: {base}\n");
        if !written.is_empty() {
            report.push_str("Output files:\n");
            for file in &written {
                let _ = writeln!(report, "- {file}");
            }
        }
        report.push('\n');
        report.push_str(&text_report(result, FULL_REPORT_TOP_WORDS));
        write_report(&path, &report)?;
        written.push(path);
    }

    tracing::info!(files = written.len(), "wrote report bundle");
    Ok(written)
}
