//! Export command: write the report bundle to disk.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, info, instrument};

use lexitox_core::{Config, ReportFormat, SortAlgorithm, export};

use super::{InputArgs, load_analyzer, load_text, spinner};

/// Arguments for the `export` subcommand.
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Files to analyze.
    #[command(flatten)]
    pub input: InputArgs,

    /// Base path for the report files (`<base>_analysis.csv`, `<base>_full.txt`, ...).
    #[arg(short, long, value_name = "BASE")]
    pub output: Utf8PathBuf,

    /// Which reports to write.
    #[arg(long, value_enum)]
    pub format: Option<ReportFormat>,

    /// Algorithm used to rank words.
    #[arg(long, value_enum)]
    pub sort: Option<SortAlgorithm>,
}

/// Analyze the input files and write the reports.
#[instrument(name = "cmd_export", skip_all, fields(output = %args.output))]
pub fn cmd_export(
    args: ExportArgs,
    global_json: bool,
    config: &Config,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(format = ?args.format, "executing export command");

    let text = load_text(&args.input, max_input_bytes)?;
    let analyzer = load_analyzer(config, args.sort);
    let format = args.format.unwrap_or(config.report_format);

    let progress = spinner("writing reports");
    let result = analyzer.analyze(&text);
    let written = export::write_bundle(&args.output, &result, format)
        .with_context(|| format!("failed to export reports for {}", args.input.label()));
    progress.finish_and_clear();
    let written = written?;

    info!(files = written.len(), "reports written");

    if global_json {
        println!("{}", serde_json::to_string_pretty(&written)?);
    } else {
        for path in &written {
            println!("{} {}", "Wrote".green(), path);
        }
    }

    Ok(())
}
