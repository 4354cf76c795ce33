//! Analyze command: the full text report with optional charts.

use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use lexitox_core::{Config, SortAlgorithm, export};

use super::{InputArgs, load_analyzer, load_text, spinner};

/// Arguments for the `analyze` subcommand.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Files to analyze.
    #[command(flatten)]
    pub input: InputArgs,

    /// Algorithm used to rank words.
    #[arg(long, value_enum)]
    pub sort: Option<SortAlgorithm>,

    /// Number of ranked words to show.
    #[arg(short = 'n', long)]
    pub top: Option<usize>,

    /// Skip the ASCII charts.
    #[arg(long)]
    pub no_charts: bool,
}

/// Analyze the input files and print the report.
#[instrument(name = "cmd_analyze", skip_all, fields(files = args.input.files.len()))]
pub fn cmd_analyze(
    args: AnalyzeArgs,
    global_json: bool,
    config: &Config,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(sort = ?args.sort, top = ?args.top, "executing analyze command");

    let text = load_text(&args.input, max_input_bytes)?;
    let analyzer = load_analyzer(config, args.sort);

    let progress = spinner("analyzing");
    let result = analyzer.analyze(&text);
    progress.finish_and_clear();

    if global_json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    let top = args.top.unwrap_or_else(|| config.top_words());
    println!("{} {}", "Analyzed".bold(), args.input.label().cyan());
    println!();
    print!("{}", export::text_report(&result, top));

    if config.show_charts() && !args.no_charts {
        println!();
        print!("{}", export::word_frequency_chart(&result.words, top));
        let severity = export::severity_chart(&result);
        if !severity.is_empty() {
            println!();
            print!("{severity}");
        }
    }

    Ok(())
}
