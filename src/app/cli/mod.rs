//! Command line interface: arguments and configuration file

pub mod args;
pub mod config;

pub use args::Args;
pub use config::{ConfigError, FileConfig, Settings};
