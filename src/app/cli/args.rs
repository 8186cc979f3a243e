//! Command line arguments

use clap::Parser;
use std::path::PathBuf;

/// Copy lines from a log source to stdout through an unbounded buffer
///
/// A slow reader on stdout never slows down the input; lines wait in memory
/// instead and the peak backlog per window is reported when the input ends.
#[derive(Parser, Debug, Clone, Default, PartialEq)]
#[command(name = "tailbuffer")]
#[command(version)]
pub struct Args {
    /// Input file to read (reads stdin when omitted or '-')
    #[arg(value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Configuration file path
    #[arg(long = "config-file", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Name of the peak-load summary metric
    #[arg(long = "metric-name", value_name = "NAME")]
    pub metric_name: Option<String>,

    /// Peak-load measurement window in milliseconds
    #[arg(long = "window-ms", value_name = "MS")]
    pub window_ms: Option<u64>,

    /// Pause after writing each line, simulating a slow consumer
    #[arg(long = "delay-ms", value_name = "MS")]
    pub delay_ms: Option<u64>,

    /// Log level
    #[arg(long = "log-level", value_name = "LEVEL", value_parser = ["trace", "debug", "info", "warn", "error", "off"])]
    pub log_level: Option<String>,

    /// Log output format
    #[arg(long = "log-format", value_name = "FORMAT", value_parser = ["text", "ext", "json"])]
    pub log_format: Option<String>,

    /// Also write logs to this file
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Force colored log output
    #[arg(long = "color")]
    pub color: bool,

    /// Disable colored log output
    #[arg(long = "no-color", conflicts_with = "color")]
    pub no_color: bool,
}

impl Args {
    /// The input path, with `-` meaning stdin
    pub fn input_path(&self) -> Option<&PathBuf> {
        self.input.as_ref().filter(|path| path.as_os_str() != "-")
    }
}
