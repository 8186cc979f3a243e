//! Queue Error Types

#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    #[error("Queue is closed; line rejected ({length} bytes)")]
    Closed { length: usize },

    #[error("Queue lock unavailable: {message}")]
    LockPoisoned { message: String },
}

/// Result type for queue operations
pub type QueueResult<T> = Result<T, QueueError>;
