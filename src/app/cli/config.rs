//! TOML configuration file loading and settings resolution
//!
//! Command line values win over the configuration file, which wins over the
//! built-in defaults.
//!
//! ```toml
//! [buffer]
//! metric_name = "line_buffer_peak_load"
//! window_ms = 1000
//!
//! [output]
//! delay_ms = 0
//!
//! [logging]
//! level = "info"
//! format = "text"
//! file = "/var/log/tailbuffer.log"
//! color = false
//! ```

use super::args::Args;
use crate::core::error_handling::ContextualError;
use crate::tailer::api::BufferConfig;
use serde::Deserialize;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::time::Duration;

const LOG_FORMATS: [&str; 3] = ["text", "ext", "json"];

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{message}")]
    Unreadable {
        message: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{message}")]
    Malformed {
        message: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("{message}")]
    Invalid { message: String },
}

impl ContextualError for ConfigError {
    fn is_user_actionable(&self) -> bool {
        true
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            ConfigError::Unreadable { message, .. }
            | ConfigError::Malformed { message, .. }
            | ConfigError::Invalid { message } => Some(message.as_str()),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BufferSection {
    pub metric_name: Option<String>,
    pub window_ms: Option<u64>,
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputSection {
    pub delay_ms: Option<u64>,
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSection {
    pub level: Option<String>,
    pub format: Option<String>,
    pub file: Option<PathBuf>,
    pub color: Option<bool>,
}

/// Contents of a `tailbuffer.toml` file
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub buffer: BufferSection,
    pub output: OutputSection,
    pub logging: LoggingSection,
}

/// Default config location: `<config dir>/Tailbuffer/tailbuffer.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("Tailbuffer").join("tailbuffer.toml"))
}

impl FileConfig {
    pub fn parse(contents: &str, origin: &Path) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|source| ConfigError::Malformed {
            message: format!(
                "Error parsing configuration file {}: {}",
                origin.display(),
                source.message()
            ),
            source,
        })
    }

    /// Load the explicitly requested file, or the default one if it exists
    ///
    /// A missing explicit file is an error; a missing default file is not.
    pub async fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match config_file {
            Some(path) => path.to_path_buf(),
            None => match default_config_path() {
                Some(path) if path.exists() => path,
                _ => {
                    log::trace!("No configuration file found, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        let contents =
            tokio::fs::read_to_string(&path)
                .await
                .map_err(|source| ConfigError::Unreadable {
                    message: format!(
                        "Error reading configuration file {}: {}",
                        path.display(),
                        source
                    ),
                    source,
                })?;
        log::debug!("Loaded configuration from {}", path.display());
        Self::parse(&contents, &path)
    }
}

/// Fully resolved run settings
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// `None` reads stdin
    pub input: Option<PathBuf>,
    pub buffer: BufferConfig,
    /// Pause after each written line
    pub delay: Duration,
    pub log_level: String,
    pub log_format: String,
    pub log_file: Option<PathBuf>,
    pub color: bool,
}

impl Settings {
    pub fn resolve(args: &Args, file: FileConfig) -> Result<Self, ConfigError> {
        let mut buffer = BufferConfig::default();
        if let Some(name) = args.metric_name.clone().or(file.buffer.metric_name) {
            if name.trim().is_empty() {
                return Err(invalid("Metric name cannot be empty"));
            }
            buffer = buffer.with_metric_name(name);
        }
        if let Some(window_ms) = args.window_ms.or(file.buffer.window_ms) {
            if window_ms == 0 {
                return Err(invalid("Sample window (window_ms) must be greater than 0"));
            }
            buffer = buffer.with_sample_window(Duration::from_millis(window_ms));
        }

        let log_format = args
            .log_format
            .clone()
            .or(file.logging.format)
            .unwrap_or_else(|| "text".to_string());
        if !LOG_FORMATS.contains(&log_format.as_str()) {
            return Err(invalid(&format!(
                "Unknown log format '{}' (expected one of: {})",
                log_format,
                LOG_FORMATS.join(", ")
            )));
        }

        let color = if args.color {
            true
        } else if args.no_color {
            false
        } else {
            file.logging
                .color
                .unwrap_or_else(|| std::io::stderr().is_terminal())
        };

        Ok(Self {
            input: args.input_path().cloned(),
            buffer,
            delay: Duration::from_millis(args.delay_ms.or(file.output.delay_ms).unwrap_or(0)),
            log_level: args
                .log_level
                .clone()
                .or(file.logging.level)
                .unwrap_or_else(|| "info".to_string()),
            log_format,
            log_file: args.log_file.clone().or(file.logging.file),
            color,
        })
    }
}

fn invalid(message: &str) -> ConfigError {
    ConfigError::Invalid {
        message: message.to_string(),
    }
}
