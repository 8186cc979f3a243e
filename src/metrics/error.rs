//! Metrics Error Types

#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    #[error("Metric already registered: {name}")]
    AlreadyRegistered { name: String },

    #[error("Invalid metric '{name}': {reason}")]
    InvalidMetric { name: String, reason: String },

    #[error("Prometheus error: {0}")]
    Prometheus(#[from] prometheus::Error),
}

/// Result type for metrics operations
pub type MetricsResult<T> = Result<T, MetricsError>;

impl crate::core::error_handling::ContextualError for MetricsError {
    fn is_user_actionable(&self) -> bool {
        matches!(
            self,
            MetricsError::AlreadyRegistered { .. } | MetricsError::InvalidMetric { .. }
        )
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            MetricsError::AlreadyRegistered { .. } => {
                Some("A metric with this name is already registered; choose a different metric name")
            }
            MetricsError::InvalidMetric { .. } => Some(
                "Metric names may only contain ASCII letters, digits, '_' and ':', and need a non-empty help text",
            ),
            MetricsError::Prometheus(_) => None,
        }
    }
}
