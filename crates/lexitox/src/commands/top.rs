//! Top command: most frequent words, optionally checking the ranking algorithms agree.

use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use lexitox_core::sort::{self, SortComparison};
use lexitox_core::{Config, SortAlgorithm, TopWords, top_words};

use super::{InputArgs, load_analyzer, load_text};

/// Arguments for the `top` subcommand.
#[derive(Args, Debug)]
pub struct TopArgs {
    /// Files to analyze.
    #[command(flatten)]
    pub input: InputArgs,

    /// Number of words to show.
    #[arg(short = 'n', long)]
    pub count: Option<usize>,

    /// Algorithm used to rank words.
    #[arg(long, value_enum)]
    pub sort: Option<SortAlgorithm>,

    /// Also rank with every algorithm and report whether the orders agree.
    #[arg(long)]
    pub compare_algorithms: bool,
}

#[derive(Serialize)]
struct TopOutput {
    #[serde(flatten)]
    top: TopWords,
    #[serde(skip_serializing_if = "Option::is_none")]
    algorithm_comparison: Option<SortComparison>,
}

/// Print the most frequent words of the input files.
#[instrument(name = "cmd_top", skip_all, fields(files = args.input.files.len()))]
pub fn cmd_top(
    args: TopArgs,
    global_json: bool,
    config: &Config,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(count = ?args.count, sort = ?args.sort, "executing top command");

    let text = load_text(&args.input, max_input_bytes)?;
    let analyzer = load_analyzer(config, args.sort);
    let result = analyzer.analyze(&text);

    let count = args.count.unwrap_or_else(|| config.top_words());
    let top = top_words(&result, count, analyzer.sort_algorithm());
    let algorithm_comparison = if args.compare_algorithms {
        sort::compare_algorithms(&result.words)
    } else {
        None
    };

    if global_json {
        let output = TopOutput {
            top,
            algorithm_comparison,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if top.entries.is_empty() {
        println!("{}", "No words found.".yellow());
    } else {
        println!(
            "{} ({} sort)",
            format!("Top {} words", top.entries.len()).bold(),
            top.algorithm
        );
        for (rank, entry) in top.entries.iter().enumerate() {
            println!("{:>3}. {:<20} {}", rank + 1, entry.word, entry.frequency);
        }
        println!(
            "{}: {:.1}% of all counted words",
            "Coverage".dimmed(),
            top.coverage_percent
        );
    }

    if args.compare_algorithms {
        println!();
        print_comparison(algorithm_comparison.as_ref());
    }

    Ok(())
}

fn print_comparison(comparison: Option<&SortComparison>) {
    let Some(c) = comparison else {
        println!("Algorithm comparison: not applicable (fewer than 2 words)");
        return;
    };

    let verdict = |same: bool| {
        if same {
            "identical".green().to_string()
        } else {
            "different".yellow().to_string()
        }
    };
    println!("{} ({} entries)", "Algorithm comparison".bold(), c.entries);
    println!("  bubble vs quick: {}", verdict(c.bubble_vs_quick));
    println!("  bubble vs merge: {}", verdict(c.bubble_vs_merge));
    println!("  quick vs merge:  {}", verdict(c.quick_vs_merge));
    if !c.all_identical() {
        println!(
            "{}",
            "Orders differ only among words with equal frequency.".dimmed()
        );
    }
}
