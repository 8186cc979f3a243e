//! Error reporting for the command line front end
//!
//! Errors that the user can fix (a bad config value, an unreadable input)
//! are shown with their own message; everything else is reported with the
//! operation that failed, and the details go to the debug log.

/// Errors that can tell whether their message is meant for the user
///
/// When `is_user_actionable()` returns `true`, `user_message()` should return
/// `Some(message)`; otherwise it should return `None`.
pub trait ContextualError: std::error::Error {
    fn is_user_actionable(&self) -> bool;

    fn user_message(&self) -> Option<&str>;
}

/// Log a fatal error with a level of detail matching its kind
///
/// # Examples
/// ```rust,no_run
/// # use tailbuffer::core::error_handling::log_error_with_context;
/// # use tailbuffer::tailer::api::BufferError;
/// let error = BufferError::InvalidWindow;
/// log_error_with_context(&error, "Starting line buffer");
/// // Logs: "FATAL: The metric sample window must be greater than zero"
/// ```
pub fn log_error_with_context<E: ContextualError>(error: &E, operation_context: &str) {
    log::error!("FATAL: {}", fatal_message(error, operation_context));
    log::debug!("DETAIL: {}", error);
    log::debug!("DEBUG_DETAILS: {:?}", error);
}

fn fatal_message<'a, E: ContextualError>(error: &'a E, operation_context: &'a str) -> &'a str {
    if error.is_user_actionable() {
        error.user_message().unwrap_or(operation_context)
    } else {
        operation_context
    }
}
