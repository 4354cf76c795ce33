//! Turning input files into analyzable text.
//!
//! `.txt` files are read whole. `.csv` files are flattened into text either
//! from a single column or from every column. Splitting is a plain comma
//! split (no quoted-comma support); runs of commas collapse, so empty cells
//! do not shift column indices. A cell wrapped in double quotes has them
//! removed.

use camino::{Utf8Path, Utf8PathBuf};

use crate::error::{InputError, InputResult};

/// Default maximum input file size (5 MiB).
pub const DEFAULT_MAX_INPUT_BYTES: usize = 5 * 1024 * 1024;

/// Number of leading bytes inspected for binary content.
const SAMPLE_BYTES: usize = 1000;

/// Files whose sample is more than this percentage non-text are rejected.
const MAX_BINARY_PERCENT: usize = 30;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];
const UTF16_LE_BOM: &[u8] = &[0xFF, 0xFE];
const UTF16_BE_BOM: &[u8] = &[0xFE, 0xFF];

/// Which CSV cells to keep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CsvSelection {
    /// Every non-empty cell, one output line per row.
    #[default]
    All,
    /// A single zero-based column.
    Column(usize),
}

/// Kind of input, decided by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// Plain text.
    Text,
    /// Comma-separated values.
    Csv,
}

impl InputKind {
    /// Classify `path` by extension (case-insensitive).
    pub fn from_path(path: &Utf8Path) -> Option<Self> {
        match path.extension()?.to_ascii_lowercase().as_str() {
            "txt" => Some(Self::Text),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }
}

/// Percentage of non-text bytes in the leading sample of `bytes`.
///
/// Control bytes other than tab, newline and carriage return always count.
/// Bytes above 0x7E count only when the sample is not valid UTF-8, so
/// non-English UTF-8 text is not mistaken for binary.
pub fn binary_percent(bytes: &[u8]) -> usize {
    let sample = &bytes[..bytes.len().min(SAMPLE_BYTES)];
    if sample.is_empty() {
        return 0;
    }
    // A multi-byte character cut off at the sample edge is still valid text.
    let utf8 = match std::str::from_utf8(sample) {
        Ok(_) => true,
        Err(e) => e.error_len().is_none(),
    };
    let binary = sample
        .iter()
        .filter(|&&b| match b {
            b'\t' | b'\n' | b'\r' => false,
            0..=31 | 127 => true,
            128..=255 => !utf8,
            _ => false,
        })
        .count();
    binary * 100 / sample.len()
}

/// Decode raw file bytes, rejecting UTF-16 and binary content.
///
/// A UTF-8 byte-order mark is dropped. Invalid UTF-8 sequences in otherwise
/// textual data are replaced rather than rejected.
pub fn decode_text(path: &Utf8Path, bytes: &[u8]) -> InputResult<String> {
    if bytes.starts_with(UTF16_LE_BOM) || bytes.starts_with(UTF16_BE_BOM) {
        return Err(InputError::UnsupportedEncoding {
            path: path.to_path_buf(),
        });
    }
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    let percent = binary_percent(bytes);
    if percent > MAX_BINARY_PERCENT {
        return Err(InputError::Corrupted {
            path: path.to_path_buf(),
            percent,
        });
    }
    Ok(String::from_utf8_lossy(bytes).into_owned())
}

/// Read a file after checking it against `max_bytes`.
///
/// Binary and UTF-16 files are rejected; see [`decode_text`].
pub fn read_text_file(path: &Utf8Path, max_bytes: Option<usize>) -> InputResult<String> {
    let read_err = |source| InputError::Read {
        path: path.to_path_buf(),
        source,
    };

    let metadata = std::fs::metadata(path.as_std_path()).map_err(read_err)?;
    if let Some(limit) = max_bytes
        && metadata.len() > limit as u64
    {
        return Err(InputError::TooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            limit,
        });
    }
    if metadata.len() == 0 {
        return Err(InputError::EmptyFile {
            path: path.to_path_buf(),
        });
    }

    let bytes = std::fs::read(path.as_std_path()).map_err(read_err)?;
    decode_text(path, &bytes)
}

fn csv_cells(line: &str) -> impl Iterator<Item = &str> {
    line.split(',').filter(|cell| !cell.is_empty())
}

fn strip_quotes(cell: &str) -> &str {
    cell.strip_prefix('"')
        .and_then(|c| c.strip_suffix('"'))
        .unwrap_or(cell)
}

fn csv_rows(source: &str) -> impl Iterator<Item = &str> {
    source
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.is_empty())
}

/// Join the cells of column `column` with spaces.
///
/// Fails with [`InputError::NoColumnData`] when no row has a non-empty cell
/// in that column.
#[tracing::instrument(skip(source), fields(source_len = source.len()))]
pub fn csv_column_to_text(source: &str, column: usize) -> InputResult<String> {
    let mut text = String::new();
    let mut rows = 0usize;

    for line in csv_rows(source) {
        let Some(cell) = csv_cells(line).nth(column) else {
            continue;
        };
        let cell = strip_quotes(cell);
        if cell.is_empty() {
            continue;
        }
        text.push_str(cell);
        text.push(' ');
        rows += 1;
    }

    if rows == 0 {
        return Err(InputError::NoColumnData { column });
    }
    tracing::debug!(rows, "extracted CSV column");
    Ok(text)
}

/// Join every non-empty cell with spaces, one line per row.
#[tracing::instrument(skip(source), fields(source_len = source.len()))]
pub fn csv_all_columns_to_text(source: &str) -> String {
    let mut text = String::new();
    for line in csv_rows(source) {
        for cell in csv_cells(line).map(strip_quotes) {
            if !cell.is_empty() {
                text.push_str(cell);
                text.push(' ');
            }
        }
        text.push('\n');
    }
    text
}

/// Column headers of a CSV source (cells of its first line).
pub fn csv_headers(source: &str) -> Vec<String> {
    source
        .lines()
        .next()
        .map(|line| {
            csv_cells(line.trim_end_matches('\r'))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Read one input file as text, applying `selection` to CSV files.
#[tracing::instrument(fields(path = %path))]
pub fn read_input(
    path: &Utf8Path,
    selection: CsvSelection,
    max_bytes: Option<usize>,
) -> InputResult<String> {
    let kind = InputKind::from_path(path).ok_or_else(|| InputError::UnsupportedExtension {
        path: path.to_path_buf(),
    })?;
    let content = read_text_file(path, max_bytes)?;
    match (kind, selection) {
        (InputKind::Text, _) => Ok(content),
        (InputKind::Csv, CsvSelection::All) => Ok(csv_all_columns_to_text(&content)),
        (InputKind::Csv, CsvSelection::Column(column)) => csv_column_to_text(&content, column),
    }
}

/// Outcome of combining several files.
#[derive(Debug, Clone, Default)]
pub struct CombinedInput {
    /// Concatenated text with a header line before each file.
    pub text: String,
    /// Files that contributed text.
    pub processed: Vec<Utf8PathBuf>,
    /// Files that were skipped, with the reason.
    pub skipped: Vec<(Utf8PathBuf, String)>,
}

/// Concatenate several files, each preceded by a `--- File: <name> ---` line.
///
/// CSV files contribute all their columns. Unreadable, empty, oversized and
/// unsupported files are skipped with a warning. Fails only if every file
/// was skipped.
#[tracing::instrument(skip_all, fields(files = paths.len()))]
pub fn combine_files<P: AsRef<Utf8Path>>(
    paths: &[P],
    max_bytes: Option<usize>,
) -> InputResult<CombinedInput> {
    let mut combined = CombinedInput::default();

    for path in paths {
        let path = path.as_ref();
        match read_input(path, CsvSelection::All, max_bytes) {
            Ok(content) => {
                combined.text.push_str("\n--- File: ");
                combined.text.push_str(path.as_str());
                combined.text.push_str(" ---\n");
                combined.text.push_str(&content);
                combined.processed.push(path.to_path_buf());
            }
            Err(e) => {
                tracing::warn!(path = %path, error = %e, "skipping input file");
                combined.skipped.push((path.to_path_buf(), e.to_string()));
            }
        }
    }

    if combined.processed.is_empty() {
        return Err(InputError::NoReadableFiles);
    }
    tracing::info!(
        processed = combined.processed.len(),
        skipped = combined.skipped.len(),
        "combined input files"
    );
    Ok(combined)
}
