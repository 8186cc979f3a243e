//! Top-level errors of the command line front end

use crate::app::cli::ConfigError;
use crate::core::error_handling::ContextualError;
use crate::tailer::api::{BufferError, TailerError};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Tailer(#[from] TailerError),

    #[error(transparent)]
    Buffer(#[from] BufferError),

    #[error("Error writing output: {0}")]
    Output(#[from] std::io::Error),

    #[error("Input reported {count} error(s)")]
    UpstreamFailed { count: usize },
}

impl ContextualError for AppError {
    fn is_user_actionable(&self) -> bool {
        match self {
            AppError::Config(e) => e.is_user_actionable(),
            AppError::Tailer(e) => e.is_user_actionable(),
            AppError::Buffer(e) => e.is_user_actionable(),
            AppError::Output(_) | AppError::UpstreamFailed { .. } => false,
        }
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            AppError::Config(e) => e.user_message(),
            AppError::Tailer(e) => e.user_message(),
            AppError::Buffer(e) => e.user_message(),
            AppError::Output(_) | AppError::UpstreamFailed { .. } => None,
        }
    }
}
