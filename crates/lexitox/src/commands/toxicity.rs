//! Toxicity command: phrase detection, scoring and an optional score gate.

use anyhow::bail;
use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use lexitox_core::toxicity::{DetectedPhrase, RiskLevel};
use lexitox_core::{Config, ToxicityReport, export};

use super::{InputArgs, load_analyzer, load_text};

/// Phrases listed under "most toxic" when `--top` is not given.
const DEFAULT_MOST_TOXIC: usize = 10;

/// Arguments for the `toxicity` subcommand.
#[derive(Args, Debug)]
pub struct ToxicityArgs {
    /// Files to analyze.
    #[command(flatten)]
    pub input: InputArgs,

    /// Number of most frequent phrases to list.
    #[arg(long)]
    pub top: Option<usize>,

    /// Fail when the toxicity score is above this value (0-100).
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=100))]
    pub max_score: Option<u32>,
}

#[derive(Serialize)]
struct ToxicityOutput<'a> {
    enabled: bool,
    #[serde(flatten)]
    report: &'a ToxicityReport,
    most_toxic: Vec<DetectedPhrase>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_score: Option<u32>,
    over_max: bool,
}

/// Detect toxic phrases in the input files and score them.
#[instrument(name = "cmd_toxicity", skip_all, fields(files = args.input.files.len()))]
pub fn cmd_toxicity(
    args: ToxicityArgs,
    global_json: bool,
    config: &Config,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(max_score = ?args.max_score, top = ?args.top, "executing toxicity command");

    let text = load_text(&args.input, max_input_bytes)?;
    let analyzer = load_analyzer(config, None);
    let max_score = args.max_score.or(config.max_score);

    if max_score.is_some() && !analyzer.toxicity_enabled() {
        bail!(
            "cannot enforce a toxicity score limit: no phrase dictionary loaded from {}",
            config.dictionary_path()
        );
    }

    let result = analyzer.analyze(&text);
    let report = &result.toxicity;
    let over_max = max_score.is_some_and(|max| report.score > max);
    let label = args.input.label();

    if global_json {
        let output = ToxicityOutput {
            enabled: result.toxicity_enabled,
            report,
            most_toxic: report.most_toxic(args.top.unwrap_or(DEFAULT_MOST_TOXIC)),
            max_score,
            over_max,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!("{}", export::toxicity_section(&result));
        if report.toxic_phrase_count > 0 {
            println!();
            print!("{}", export::severity_chart(&result));
            let most = report.most_toxic(args.top.unwrap_or(DEFAULT_MOST_TOXIC));
            println!();
            println!("{}", "MOST FREQUENT TOXIC PHRASES:".bold());
            for (rank, phrase) in most.iter().enumerate() {
                println!(
                    "{:>2}. {:<20} {:>3} occurrences [{}]",
                    rank + 1,
                    phrase.text,
                    phrase.count,
                    phrase.severity
                );
            }
        }
        if let Some(max) = max_score
            && !over_max
        {
            println!();
            println!(
                "{} {} scores {} (max: {})",
                "PASS:".green(),
                label,
                report.score,
                max
            );
        }
    }

    if let Some(max) = max_score
        && over_max
    {
        let hint = if report.risk == RiskLevel::High {
            "Severe phrases present; review before publishing."
        } else {
            "Review the flagged phrases."
        };
        bail!(
            "{label} scores {} (max: {max}, level: {}). {hint}",
            report.score,
            report.level
        );
    }

    Ok(())
}
