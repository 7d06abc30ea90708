//! Oracle configuration.

use crate::cli::{Cli, Command};
use clap::ValueEnum;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Configuration for the oracle command line.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct OracleConfig {
    /// Tracing filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    log_filter: String,

    /// Output format.
    #[serde(default)]
    format: OutputFormat,

    /// Whether `analyze` prints the board diagram.
    #[serde(default = "default_show_diagram")]
    show_diagram: bool,
}

fn default_log_filter() -> String {
    "info".to_string()
}

fn default_show_diagram() -> bool {
    true
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
            format: OutputFormat::default(),
            show_diagram: default_show_diagram(),
        }
    }
}

impl OracleConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::new(ConfigErrorKind::Unreadable {
                path: path.display().to_string(),
                reason: e.to_string(),
            })
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            ConfigError::new(ConfigErrorKind::Malformed {
                path: path.display().to_string(),
                reason: e.message().to_string(),
            })
        })?;

        info!(format = ?config.format, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise falls back to defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            debug!("No config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Replaces the output format.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Turns the board diagram on or off.
    pub fn with_show_diagram(mut self, show_diagram: bool) -> Self {
        self.show_diagram = show_diagram;
        self
    }

    /// Records the settings in effect, including where they were read from.
    ///
    /// Loading runs before the subscriber is installed, so this is called
    /// again once logging is live.
    pub fn log_summary(&self, source: &Path) {
        info!(
            config = %source.display(),
            log_filter = %self.log_filter,
            format = ?self.format,
            show_diagram = self.show_diagram,
            "Configuration in effect"
        );
    }

    /// Layers command-line flags over the loaded configuration.
    ///
    /// Only flags the user actually passed take effect: `--format` when
    /// given, and `--no-diagram` on `analyze`. Everything else keeps the
    /// value from the file.
    #[instrument(skip_all)]
    pub fn apply_cli(self, cli: &Cli) -> Self {
        let config = match cli.format {
            Some(format) => self.with_format(format),
            None => self,
        };
        match cli.command {
            Command::Analyze {
                no_diagram: true, ..
            } => config.with_show_diagram(false),
            _ => config,
        }
    }
}

/// What went wrong while loading the oracle configuration.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ConfigErrorKind {
    /// The file exists but could not be read.
    #[display("cannot read oracle config {path}: {reason}")]
    Unreadable {
        /// Path of the configuration file.
        path: String,
        /// Underlying I/O error.
        reason: String,
    },
    /// The file is not valid oracle TOML.
    #[display("oracle config {path} is malformed: {reason}")]
    Malformed {
        /// Path of the configuration file.
        path: String,
        /// Parser message.
        reason: String,
    },
}

/// Configuration error with the location that raised it.
#[derive(Debug, Clone, Display, Error)]
#[display("{} at {}:{}", kind, file, line)]
pub struct ConfigError {
    /// What went wrong.
    pub kind: ConfigErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a configuration error at the caller's location.
    #[track_caller]
    pub fn new(kind: ConfigErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
