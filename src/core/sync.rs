//! Lock poisoning helpers
//!
//! Convert a poisoned `Mutex` into the caller's domain error instead
//! of panicking the task that happens to touch the lock next.

use std::sync::LockResult;

/// Map a poisoned mutex lock into a domain error
///
/// # Examples
/// ```
/// use std::sync::Mutex;
/// use tailbuffer::core::sync::handle_mutex_poison;
/// use tailbuffer::queue::QueueError;
///
/// let mutex = Mutex::new(42);
/// let guard = handle_mutex_poison(
///     mutex.lock(),
///     |message| QueueError::LockPoisoned { message }
/// ).unwrap();
/// assert_eq!(*guard, 42);
/// ```
pub fn handle_mutex_poison<T, E>(
    result: LockResult<T>,
    error_constructor: impl FnOnce(String) -> E,
) -> Result<T, E> {
    result.map_err(|_| {
        error_constructor(
            "mutex poisoned: a task panicked while holding the lock".to_string(),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queue::QueueError;
    use std::sync::{Arc, Mutex};
    use std::thread;

    #[test]
    fn test_mutex_success_passes_guard_through() {
        let mutex = Mutex::new(vec!["line"]);
        let guard = handle_mutex_poison(mutex.lock(), |message| QueueError::LockPoisoned {
            message,
        })
        .unwrap();

        assert_eq!(guard.len(), 1);
    }

    #[test]
    fn test_poisoned_mutex_becomes_queue_error() {
        let mutex = Arc::new(Mutex::new(0usize));
        let clone = Arc::clone(&mutex);
        let _ = thread::spawn(move || {
            let _guard = clone.lock().unwrap();
            panic!("Intentional panic to poison mutex");
        })
        .join();

        match handle_mutex_poison(mutex.lock(), |message| QueueError::LockPoisoned { message }) {
            Err(QueueError::LockPoisoned { message }) => {
                assert!(message.contains("mutex poisoned"))
            }
            other => panic!("Expected LockPoisoned, got {:?}", other.map(|g| *g)),
        };
    }

    #[test]
    fn test_guard_released_before_mutex_dropped() {
        let mutex = Mutex::new(7u32);

        let value = match handle_mutex_poison(mutex.lock(), |message| QueueError::LockPoisoned {
            message,
        }) {
            Ok(guard) => *guard,
            Err(e) => panic!("Unexpected error: {}", e),
        };

        assert_eq!(value, 7);
        assert!(mutex.try_lock().is_ok());
    }
}
