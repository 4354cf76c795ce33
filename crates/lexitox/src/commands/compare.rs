//! Compare command: two texts side by side.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use lexitox_core::input::{self, CsvSelection};
use lexitox_core::{Config, ResultComparison, export};

use super::load_analyzer;

/// Arguments for the `compare` subcommand.
#[derive(Args, Debug)]
pub struct CompareArgs {
    /// First file.
    pub first: Utf8PathBuf,

    /// Second file.
    pub second: Utf8PathBuf,

    /// Also write the comparison report to this file.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<Utf8PathBuf>,
}

#[derive(Serialize)]
struct CompareOutput<'a> {
    first: &'a str,
    second: &'a str,
    #[serde(flatten)]
    comparison: &'a ResultComparison,
    conclusions: Vec<String>,
}

/// Analyze two files and report how they differ.
#[instrument(name = "cmd_compare", skip_all, fields(first = %args.first, second = %args.second))]
pub fn cmd_compare(
    args: CompareArgs,
    global_json: bool,
    config: &Config,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(output = ?args.output, "executing compare command");

    let first_text = input::read_input(&args.first, CsvSelection::All, max_input_bytes)?;
    let second_text = input::read_input(&args.second, CsvSelection::All, max_input_bytes)?;

    let analyzer = load_analyzer(config, None);
    let first = analyzer.analyze(&first_text);
    let second = analyzer.analyze(&second_text);
    let comparison = ResultComparison::new(&first, &second);

    let report = export::comparison_report(&comparison, args.first.as_str(), args.second.as_str());
    if let Some(ref path) = args.output {
        export::write_report(path, &report)
            .with_context(|| format!("failed to save comparison report to {path}"))?;
    }

    if global_json {
        let output = CompareOutput {
            first: args.first.as_str(),
            second: args.second.as_str(),
            comparison: &comparison,
            conclusions: comparison.conclusions(args.first.as_str(), args.second.as_str()),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!("{report}");
        if let Some(ref path) = args.output {
            println!();
            println!("{} {}", "Saved:".green(), path);
        }
    }

    Ok(())
}
