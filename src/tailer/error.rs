//! Tailer Error Types

use crate::core::error_handling::ContextualError;
use crate::metrics::MetricsError;

/// Errors reported by a line source
#[derive(Debug, thiserror::Error)]
pub enum TailerError {
    #[error("Error reading from {source_name}: {source}")]
    Io {
        source_name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Line source failed: {message}")]
    Upstream { message: String },

    #[error("Line source is no longer accepting input")]
    ChannelClosed,
}

pub type TailerResult<T> = Result<T, TailerError>;

/// Errors raised while wrapping a tailer in a line buffer
#[derive(Debug, thiserror::Error)]
pub enum BufferError {
    #[error("The tailer's line stream has already been taken")]
    LinesUnavailable,

    #[error("Sample window must be greater than zero")]
    InvalidWindow,

    #[error("No tokio runtime available to run the line buffer")]
    NoRuntime,

    #[error("Could not register buffer metric: {0}")]
    Metrics(#[from] MetricsError),
}

pub type BufferResult<T> = Result<T, BufferError>;

impl ContextualError for TailerError {
    fn is_user_actionable(&self) -> bool {
        matches!(self, TailerError::Io { .. })
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            TailerError::Io { .. } => Some("Could not read the input; check that it exists and is readable"),
            _ => None,
        }
    }
}

impl ContextualError for BufferError {
    fn is_user_actionable(&self) -> bool {
        match self {
            BufferError::InvalidWindow => true,
            BufferError::Metrics(inner) => inner.is_user_actionable(),
            _ => false,
        }
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            BufferError::InvalidWindow => Some("The metric sample window must be greater than zero"),
            BufferError::Metrics(inner) => inner.user_message(),
            _ => None,
        }
    }
}
