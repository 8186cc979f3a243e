//! Line buffer configuration

use crate::tailer::error::{BufferError, BufferResult};
use std::time::Duration;

/// Name of the peak-load summary registered by default
pub const DEFAULT_METRIC_NAME: &str = "line_buffer_peak_load";

/// Help text of the peak-load summary registered by default
pub const DEFAULT_METRIC_HELP: &str =
    "Number of lines that are read from the logfile and waiting to be processed. Peak value per second.";

/// Settings for a [`BufferedTailer`](super::BufferedTailer)
#[derive(Debug, Clone, PartialEq)]
pub struct BufferConfig {
    /// Metric name the peak-load summary is registered under
    pub metric_name: String,
    pub metric_help: String,
    /// Length of one peak-load measurement window
    pub sample_window: Duration,
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            metric_name: DEFAULT_METRIC_NAME.to_string(),
            metric_help: DEFAULT_METRIC_HELP.to_string(),
            sample_window: Duration::from_secs(1),
        }
    }
}

impl BufferConfig {
    pub fn with_metric_name(mut self, name: impl Into<String>) -> Self {
        self.metric_name = name.into();
        self
    }

    pub fn with_metric_help(mut self, help: impl Into<String>) -> Self {
        self.metric_help = help.into();
        self
    }

    pub fn with_sample_window(mut self, window: Duration) -> Self {
        self.sample_window = window;
        self
    }

    pub fn validate(&self) -> BufferResult<()> {
        if self.sample_window.is_zero() {
            return Err(BufferError::InvalidWindow);
        }
        Ok(())
    }
}
