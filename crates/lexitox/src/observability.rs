//! Logging setup: compact stderr output plus optional JSON log files.
//!
//! stderr always gets human-readable events. A JSON-lines file layer is added
//! when `LEXITOX_LOG_PATH` names a file, or when `LEXITOX_LOG_DIR` or the
//! configured `log_dir` names a directory (rotated daily). `RUST_LOG`
//! overrides the level derived from `-q`/`-v` and the config.

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Environment variable naming an explicit log file.
pub const LOG_PATH_ENV: &str = "LEXITOX_LOG_PATH";

/// Environment variable naming a log directory.
pub const LOG_DIR_ENV: &str = "LEXITOX_LOG_DIR";

const LOG_FILE_PREFIX: &str = "lexitox.jsonl";

/// Where log files go, if anywhere.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LogTarget {
    /// stderr only.
    #[default]
    Stderr,
    /// A single file, appended to.
    File(PathBuf),
    /// Daily-rotated files in a directory.
    Directory(PathBuf),
}

/// Resolved observability settings.
#[derive(Debug, Clone, Default)]
pub struct ObservabilityConfig {
    /// File logging target.
    pub target: LogTarget,
}

impl ObservabilityConfig {
    /// Resolve from the environment, falling back to the configured log directory.
    pub fn from_env_with_overrides(config_log_dir: Option<PathBuf>) -> Self {
        Self::resolve(
            std::env::var_os(LOG_PATH_ENV).map(PathBuf::from),
            std::env::var_os(LOG_DIR_ENV).map(PathBuf::from),
            config_log_dir,
        )
    }

    fn resolve(
        env_path: Option<PathBuf>,
        env_dir: Option<PathBuf>,
        config_dir: Option<PathBuf>,
    ) -> Self {
        let target = match (env_path, env_dir.or(config_dir)) {
            (Some(path), _) if !path.as_os_str().is_empty() => LogTarget::File(path),
            (_, Some(dir)) if !dir.as_os_str().is_empty() => LogTarget::Directory(dir),
            _ => LogTarget::Stderr,
        };
        Self { target }
    }
}

/// Level used when `RUST_LOG` is unset.
fn default_directive(quiet: bool, verbose: u8, config_level: &str) -> &str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => config_level,
        1 => "debug",
        _ => "trace",
    }
}

/// Build the event filter. `RUST_LOG` wins when set and valid.
pub fn env_filter(quiet: bool, verbose: u8, config_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(quiet, verbose, config_level)))
}

fn file_writer(target: &LogTarget) -> anyhow::Result<Option<RollingFileAppender>> {
    let appender = match target {
        LogTarget::Stderr => return Ok(None),
        LogTarget::File(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            let name = path
                .file_name()
                .with_context(|| format!("log path has no file name: {}", path.display()))?;
            std::fs::create_dir_all(dir)
                .with_context(|| format!("failed to create log directory {}", dir.display()))?;
            tracing_appender::rolling::never(dir, name)
        }
        LogTarget::Directory(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("failed to create log directory {}", dir.display()))?;
            tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX)
        }
    };
    Ok(Some(appender))
}

/// Install the global subscriber.
///
/// The returned guard flushes the file writer on drop; keep it alive for
/// the life of the process.
pub fn init_observability(
    config: &ObservabilityConfig,
    filter: EnvFilter,
) -> anyhow::Result<Option<WorkerGuard>> {
    let stderr_layer = fmt::layer()
        .compact()
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr);

    let (file_layer, guard) = match file_writer(&config.target)? {
        Some(appender) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().json().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("failed to install tracing subscriber")?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_wins_over_verbose() {
        assert_eq!(default_directive(true, 2, "info"), "error");
    }

    #[test]
    fn verbosity_raises_level() {
        assert_eq!(default_directive(false, 0, "warn"), "warn");
        assert_eq!(default_directive(false, 1, "warn"), "debug");
        assert_eq!(default_directive(false, 3, "warn"), "trace");
    }

    #[test]
    fn explicit_log_path_beats_directories() {
        let cfg = ObservabilityConfig::resolve(
            Some(PathBuf::from("/tmp/a.log")),
            Some(PathBuf::from("/tmp/env")),
            Some(PathBuf::from("/tmp/cfg")),
        );
        assert_eq!(cfg.target, LogTarget::File(PathBuf::from("/tmp/a.log")));
    }

    #[test]
    fn env_dir_beats_config_dir() {
        let cfg = ObservabilityConfig::resolve(
            None,
            Some(PathBuf::from("/tmp/env")),
            Some(PathBuf::from("/tmp/cfg")),
        );
        assert_eq!(cfg.target, LogTarget::Directory(PathBuf::from("/tmp/env")));

        let cfg = ObservabilityConfig::resolve(None, None, Some(PathBuf::from("/tmp/cfg")));
        assert_eq!(cfg.target, LogTarget::Directory(PathBuf::from("/tmp/cfg")));
    }

    #[test]
    fn nothing_set_logs_to_stderr_only() {
        let cfg = ObservabilityConfig::resolve(None, None, None);
        assert_eq!(cfg.target, LogTarget::Stderr);
        let cfg = ObservabilityConfig::resolve(Some(PathBuf::new()), None, None);
        assert_eq!(cfg.target, LogTarget::Stderr);
    }

    #[test]
    fn file_writer_creates_directory() {
        let tmp = tempfile::TempDir::new().unwrap();
        let dir = tmp.path().join("logs");
        let writer = file_writer(&LogTarget::Directory(dir.clone())).unwrap();
        assert!(writer.is_some());
        assert!(dir.is_dir());
    }
}
