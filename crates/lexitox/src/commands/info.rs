//! Info command implementation

use clap::Args;
use lexitox_core::config::{Config, ConfigSources, user_config_dir};
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

/// Arguments for the `info` subcommand.
#[derive(Args, Debug, Default)]
pub struct InfoArgs {
    // No subcommand-specific arguments; uses global --json flag
}

#[derive(Serialize)]
struct PackageInfo {
    name: &'static str,
    version: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    description: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    license: &'static str,
}

impl PackageInfo {
    const fn new() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            description: env!("CARGO_PKG_DESCRIPTION"),
            license: env!("CARGO_PKG_LICENSE"),
        }
    }
}

#[derive(Serialize)]
struct ConfigInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    config_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_config_dir: Option<String>,
    log_level: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    log_dir: Option<String>,
    stopwords_file: String,
    stopwords_found: bool,
    dictionary_file: String,
    dictionary_found: bool,
    sort_algorithm: String,
    top_words: usize,
    show_charts: bool,
    report_format: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_score: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_input_bytes: Option<usize>,
}

impl ConfigInfo {
    fn from_config(config: &Config, sources: &ConfigSources) -> Self {
        let stopwords = config.stopwords_path();
        let dictionary = config.dictionary_path();
        Self {
            config_file: sources.primary_file().map(|p| p.to_string()),
            user_config_dir: user_config_dir().map(|p| p.to_string()),
            log_level: config.log_level.as_str().to_string(),
            log_dir: config.log_dir.as_ref().map(|p| p.to_string()),
            stopwords_found: stopwords.is_file(),
            stopwords_file: stopwords.into_string(),
            dictionary_found: dictionary.is_file(),
            dictionary_file: dictionary.into_string(),
            sort_algorithm: config.sort_algorithm.to_string(),
            top_words: config.top_words(),
            show_charts: config.show_charts(),
            report_format: config.report_format.to_string(),
            max_score: config.max_score,
            max_input_bytes: config.input_limit(),
        }
    }
}

#[derive(Serialize)]
struct FullInfo {
    #[serde(flatten)]
    package: PackageInfo,
    config: ConfigInfo,
}

/// Print package information
///
/// # Arguments
/// * `global_json` - Global `--json` flag from CLI
/// * `config` - Loaded configuration
/// * `sources` - Config source metadata from loading
#[instrument(name = "cmd_info", skip_all, fields(json_output))]
pub fn cmd_info(
    _args: InfoArgs,
    global_json: bool,
    config: &Config,
    sources: &ConfigSources,
) -> anyhow::Result<()> {
    debug!(json_output = global_json, "executing info command");

    let full_info = FullInfo {
        package: PackageInfo::new(),
        config: ConfigInfo::from_config(config, sources),
    };

    if global_json {
        println!("{}", serde_json::to_string_pretty(&full_info)?);
        return Ok(());
    }

    let package = &full_info.package;
    println!("{} {}", package.name.bold(), package.version.green());
    if !package.description.is_empty() {
        println!("{}", package.description);
    }
    if !package.license.is_empty() {
        println!("{}: {}", "License".dimmed(), package.license);
    }

    let cfg = &full_info.config;
    println!();
    println!("{}", "Configuration".bold().underline());
    if let Some(ref path) = cfg.config_file {
        println!("{}: {}", "Config file".dimmed(), path.cyan());
    } else {
        println!("{}: {}", "Config file".dimmed(), "none loaded".yellow());
    }
    if let Some(ref dir) = cfg.user_config_dir {
        println!("{}: {}", "User config dir".dimmed(), dir);
    }
    println!("{}: {}", "Log level".dimmed(), cfg.log_level);
    if let Some(ref dir) = cfg.log_dir {
        println!("{}: {}", "Log directory".dimmed(), dir);
    }

    println!();
    println!("{}", "Dictionaries".bold().underline());
    print_file("Stopwords", &cfg.stopwords_file, cfg.stopwords_found);
    print_file("Toxic phrases", &cfg.dictionary_file, cfg.dictionary_found);

    println!();
    println!("{}", "Analysis".bold().underline());
    println!("{}: {}", "Sort algorithm".dimmed(), cfg.sort_algorithm);
    println!("{}: {}", "Top words".dimmed(), cfg.top_words);
    println!("{}: {}", "Charts".dimmed(), cfg.show_charts);
    println!("{}: {}", "Report format".dimmed(), cfg.report_format);
    print_opt("Max score", &cfg.max_score);
    print_opt("Input limit (bytes)", &cfg.max_input_bytes);

    Ok(())
}

fn print_file(label: &str, path: &str, found: bool) {
    if found {
        println!("{}: {}", label.dimmed(), path.cyan());
    } else {
        println!("{}: {} {}", label.dimmed(), path, "(not found)".yellow());
    }
}

/// Print an optional numeric value or "(not set)".
fn print_opt<T: std::fmt::Display>(label: &str, value: &Option<T>) {
    match value {
        Some(v) => println!("{}: {}", label.dimmed(), v),
        None => println!("{}: {}", label.dimmed(), "(not set)".dimmed()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config::default()
    }

    fn test_sources() -> ConfigSources {
        ConfigSources::default()
    }

    #[test]
    fn test_cmd_info_text_succeeds() {
        assert!(cmd_info(InfoArgs::default(), false, &test_config(), &test_sources()).is_ok());
    }

    #[test]
    fn test_cmd_info_json_via_global() {
        assert!(cmd_info(InfoArgs::default(), true, &test_config(), &test_sources()).is_ok());
    }

    #[test]
    fn test_config_info_defaults() {
        let info = ConfigInfo::from_config(&test_config(), &test_sources());
        assert!(info.config_file.is_none());
        assert_eq!(info.log_level, "info");
        assert_eq!(info.stopwords_file, "stopwords.txt");
        assert_eq!(info.dictionary_file, "toxicwords.txt");
        assert_eq!(info.sort_algorithm, "quick");
        assert_eq!(info.report_format, "both");
        assert_eq!(info.top_words, 20);
    }

    #[test]
    fn test_config_info_disabled_limit() {
        let config = Config {
            disable_input_limit: true,
            ..Config::default()
        };
        let info = ConfigInfo::from_config(&config, &test_sources());
        assert!(info.max_input_bytes.is_none());
    }
}
