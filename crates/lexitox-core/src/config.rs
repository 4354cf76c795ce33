//! Configuration loading and discovery.
//!
//! Configuration is merged from, lowest precedence first:
//! 1. Built-in defaults
//! 2. `~/.config/lexitox/config.<ext>` (user config)
//! 3. `.lexitox.<ext>` then `lexitox.<ext>` in the closest directory, walking
//!    up from the search root and stopping at a `.git` boundary
//! 4. Explicit files (`--config`)
//! 5. `LEXITOX_*` environment variables
//!
//! Where `<ext>` is one of: `toml`, `yaml`, `yml`, `json`. When several
//! files exist in the same directory, all are merged via figment and later
//! extensions override earlier: toml < yaml < yml < json.
//!
//! # Example
//! ```no_run
//! use camino::Utf8PathBuf;
//! use lexitox_core::config::ConfigLoader;
//!
//! let cwd = std::env::current_dir().unwrap();
//! let cwd = Utf8PathBuf::try_from(cwd).expect("current directory is not valid UTF-8");
//! let (config, _sources) = ConfigLoader::new()
//!     .with_project_search(&cwd)
//!     .load()
//!     .unwrap();
//! println!("ranking with {}", config.sort_algorithm);
//! ```

use camino::{Utf8Path, Utf8PathBuf};
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::export::ReportFormat;
use crate::input::DEFAULT_MAX_INPUT_BYTES;
use crate::sort::SortAlgorithm;

/// Stopword list used when none is configured.
pub const DEFAULT_STOPWORDS_FILE: &str = "stopwords.txt";

/// Toxic phrase dictionary used when none is configured.
pub const DEFAULT_DICTIONARY_FILE: &str = "toxicwords.txt";

/// Number of ranked words shown when none is configured.
pub const DEFAULT_TOP_WORDS: usize = 20;

/// The configuration for lexitox.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Log level for the application (e.g., "debug", "info", "warn", "error").
    pub log_level: LogLevel,
    /// Directory for JSONL log files. File logging is off when unset.
    pub log_dir: Option<Utf8PathBuf>,
    /// Stopword list (whitespace-separated words).
    pub stopwords_file: Option<Utf8PathBuf>,
    /// Toxic phrase dictionary (`phrase,SEVERITY` lines).
    pub dictionary_file: Option<Utf8PathBuf>,
    /// Algorithm used to rank words.
    pub sort_algorithm: SortAlgorithm,
    /// Number of ranked words shown in reports.
    pub top_words: Option<usize>,
    /// Whether to print ASCII charts after an analysis.
    pub show_charts: Option<bool>,
    /// Which files `export` writes.
    pub report_format: ReportFormat,
    /// Default toxicity score gate for the `toxicity` command.
    pub max_score: Option<u32>,
    /// Maximum input size in bytes (default: 5 MiB).
    ///
    /// Applies to files read by the CLI and to text passed to the MCP server.
    /// Use `disable_input_limit` to remove the limit entirely.
    pub max_input_bytes: Option<usize>,
    /// Disable the input size limit entirely.
    ///
    /// When `true`, `max_input_bytes` is ignored and no size check is performed.
    #[serde(default)]
    pub disable_input_limit: bool,
}

impl Config {
    /// Stopword list path, falling back to [`DEFAULT_STOPWORDS_FILE`].
    pub fn stopwords_path(&self) -> Utf8PathBuf {
        self.stopwords_file
            .clone()
            .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_STOPWORDS_FILE))
    }

    /// Dictionary path, falling back to [`DEFAULT_DICTIONARY_FILE`].
    pub fn dictionary_path(&self) -> Utf8PathBuf {
        self.dictionary_file
            .clone()
            .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_DICTIONARY_FILE))
    }

    /// Number of ranked words to show.
    pub fn top_words(&self) -> usize {
        self.top_words.unwrap_or(DEFAULT_TOP_WORDS)
    }

    /// Whether charts are enabled (default: yes).
    pub fn show_charts(&self) -> bool {
        self.show_charts.unwrap_or(true)
    }

    /// Effective input size limit, `None` when disabled.
    pub fn input_limit(&self) -> Option<usize> {
        if self.disable_input_limit {
            None
        } else {
            Some(self.max_input_bytes.unwrap_or(DEFAULT_MAX_INPUT_BYTES))
        }
    }
}

/// Log level configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Verbose output for debugging and development.
    Debug,
    /// Standard operational information (default).
    #[default]
    Info,
    /// Warnings about potential issues.
    Warn,
    /// Errors that indicate failures.
    Error,
}

impl LogLevel {
    /// Returns the log level as a lowercase string slice.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Metadata about which configuration sources were loaded.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigSources {
    /// Project config files found by walking up, ordered low→high precedence.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub project_files: Vec<Utf8PathBuf>,
    /// User config file from XDG config directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_file: Option<Utf8PathBuf>,
    /// Explicit config files loaded (e.g., from `--config` flag).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub explicit_files: Vec<Utf8PathBuf>,
}

impl ConfigSources {
    /// Returns the highest-precedence config file that was loaded.
    ///
    /// Precedence: explicit files > project files > user file.
    pub fn primary_file(&self) -> Option<&Utf8Path> {
        self.explicit_files
            .last()
            .map(Utf8PathBuf::as_path)
            .or_else(|| self.project_files.last().map(Utf8PathBuf::as_path))
            .or(self.user_file.as_deref())
    }
}

/// Supported configuration file extensions (in order of preference).
const CONFIG_EXTENSIONS: &[&str] = &["toml", "yaml", "yml", "json"];

/// Application name for XDG directory lookup and config file names.
const APP_NAME: &str = "lexitox";

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "LEXITOX_";

/// Builder for loading configuration from multiple sources.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    project_search_root: Option<Utf8PathBuf>,
    include_user_config: bool,
    /// Stop searching when we hit a directory containing this file/dir.
    boundary_marker: Option<String>,
    explicit_files: Vec<Utf8PathBuf>,
}

impl ConfigLoader {
    /// Create a new config loader with default settings.
    pub fn new() -> Self {
        Self {
            project_search_root: None,
            include_user_config: true,
            boundary_marker: Some(".git".to_string()),
            explicit_files: Vec::new(),
        }
    }

    /// Set the starting directory for project config search.
    pub fn with_project_search<P: AsRef<Utf8Path>>(mut self, path: P) -> Self {
        self.project_search_root = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set whether to include user config from `~/.config/lexitox/`.
    pub const fn with_user_config(mut self, include: bool) -> Self {
        self.include_user_config = include;
        self
    }

    /// Set a boundary marker to stop directory traversal. Default is `.git`.
    pub fn with_boundary_marker<S: Into<String>>(mut self, marker: S) -> Self {
        self.boundary_marker = Some(marker.into());
        self
    }

    /// Disable boundary marker (search all the way to filesystem root).
    pub fn without_boundary_marker(mut self) -> Self {
        self.boundary_marker = None;
        self
    }

    /// Add an explicit config file to load. Later files take precedence.
    pub fn with_file<P: AsRef<Utf8Path>>(mut self, path: P) -> Self {
        self.explicit_files.push(path.as_ref().to_path_buf());
        self
    }

    /// Load configuration, merging all discovered sources.
    #[tracing::instrument(skip(self), fields(search_root = ?self.project_search_root))]
    pub fn load(self) -> ConfigResult<(Config, ConfigSources)> {
        tracing::debug!("loading configuration");
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));
        let mut sources = ConfigSources::default();

        if self.include_user_config
            && let Some(user_config) = self.find_user_config()
        {
            figment = Self::merge_file(figment, &user_config);
            sources.user_file = Some(user_config);
        }

        if let Some(ref root) = self.project_search_root {
            let project_configs = self.find_project_configs(root);
            for pc in &project_configs {
                figment = Self::merge_file(figment, pc);
            }
            sources.project_files = project_configs;
        }

        for file in &self.explicit_files {
            figment = Self::merge_file(figment, file);
        }
        sources.explicit_files = self.explicit_files;

        // LEXITOX_SORT_ALGORITHM=merge, LEXITOX_TOP_WORDS=10, etc.
        figment = figment.merge(Env::prefixed(ENV_PREFIX).lowercase(true));

        let config: Config = figment
            .extract()
            .map_err(|e| ConfigError::Deserialize(Box::new(e)))?;
        tracing::info!(
            log_level = config.log_level.as_str(),
            sort_algorithm = %config.sort_algorithm,
            "configuration loaded"
        );
        Ok((config, sources))
    }

    /// Load configuration, returning an error if no config file is found.
    pub fn load_or_error(self) -> ConfigResult<(Config, ConfigSources)> {
        let has_user = self.include_user_config && self.find_user_config().is_some();
        let has_project = self
            .project_search_root
            .as_ref()
            .is_some_and(|root| !self.find_project_configs(root).is_empty());
        let has_explicit = !self.explicit_files.is_empty();

        if !has_user && !has_project && !has_explicit {
            return Err(ConfigError::NotFound);
        }

        self.load()
    }

    /// Config files from the closest directory that has any, ordered
    /// low-to-high precedence (dotfiles before regular files).
    fn find_project_configs(&self, start: &Utf8Path) -> Vec<Utf8PathBuf> {
        let mut current = Some(start.to_path_buf());

        while let Some(dir) = current {
            let found: Vec<Utf8PathBuf> = [format!(".{APP_NAME}"), APP_NAME.to_string()]
                .iter()
                .flat_map(|stem| {
                    CONFIG_EXTENSIONS
                        .iter()
                        .map(move |ext| format!("{stem}.{ext}"))
                })
                .map(|name| dir.join(name))
                .filter(|path| path.is_file())
                .collect();

            if !found.is_empty() {
                return found;
            }

            // Checked after the config files so a config next to the marker is found.
            if let Some(ref marker) = self.boundary_marker
                && dir.join(marker).exists()
                && dir != start
            {
                break;
            }

            current = dir.parent().map(Utf8Path::to_path_buf);
        }

        Vec::new()
    }

    fn find_user_config(&self) -> Option<Utf8PathBuf> {
        let config_dir = user_config_dir()?;
        CONFIG_EXTENSIONS
            .iter()
            .map(|ext| config_dir.join(format!("config.{ext}")))
            .find(|path| path.is_file())
    }

    /// Merge a config file into the figment, detecting format from extension.
    fn merge_file(figment: Figment, path: &Utf8Path) -> Figment {
        match path.extension() {
            Some("yaml" | "yml") => figment.merge(Yaml::file_exact(path.as_str())),
            Some("json") => figment.merge(Json::file_exact(path.as_str())),
            _ => figment.merge(Toml::file_exact(path.as_str())),
        }
    }
}

/// Get the user config directory path.
///
/// Returns `~/.config/lexitox/` on Linux, `~/Library/Application Support/lexitox/`
/// on macOS, and equivalent on other platforms.
pub fn user_config_dir() -> Option<Utf8PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("", "", APP_NAME)?;
    Utf8PathBuf::from_path_buf(proj_dirs.config_dir().to_path_buf()).ok()
}
