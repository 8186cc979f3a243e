//! Internal LineQueue implementation
//!
//! A single mutex guards the tagged queue state and a [`Notify`] plays the
//! role of the condition signal. The consumer registers interest in the
//! notification *before* inspecting the state, so a signal sent between the
//! check and the wait is never lost.

use crate::core::sync::handle_mutex_poison;
use crate::queue::error::{QueueError, QueueResult};
use crate::queue::Line;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};
use tokio::sync::Notify;

/// Tagged queue state. `Draining` always holds at least one line.
#[derive(Debug)]
enum QueueState {
    Open(VecDeque<Line>),
    Draining(VecDeque<Line>),
    Closed,
}

/// Externally visible lifecycle of the queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueuePhase {
    /// Accepting appends
    Running,
    /// Closed for appends, buffered lines still waiting to be removed
    Draining,
    /// Closed and empty
    Terminated,
}

/// Unbounded single-producer / single-consumer FIFO of lines
#[derive(Debug)]
pub struct LineQueue {
    state: Mutex<QueueState>,
    available: Notify,
}

impl Default for LineQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl LineQueue {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(QueueState::Open(VecDeque::new())),
            available: Notify::new(),
        }
    }

    fn lock(&self) -> QueueResult<MutexGuard<'_, QueueState>> {
        handle_mutex_poison(self.state.lock(), |message| QueueError::LockPoisoned {
            message,
        })
    }

    /// Append a line at the tail and wake the consumer
    ///
    /// Returns the queue depth immediately after the append. A closed queue
    /// rejects the line and is left untouched.
    pub fn append(&self, line: Line) -> QueueResult<usize> {
        let depth = {
            let mut state = self.lock()?;
            match &mut *state {
                QueueState::Open(lines) => {
                    lines.push_back(line);
                    lines.len()
                }
                QueueState::Draining(_) | QueueState::Closed => {
                    return Err(QueueError::Closed { length: line.len() });
                }
            }
        };
        self.available.notify_one();
        Ok(depth)
    }

    /// Remove the line at the head, waiting while the queue is open and empty
    ///
    /// Returns `Ok(None)` once the queue is closed and every buffered line
    /// has been handed out. Never waits on a closed queue.
    pub async fn remove_front(&self) -> QueueResult<Option<Line>> {
        loop {
            let notified = self.available.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            {
                let mut state = self.lock()?;
                match &mut *state {
                    QueueState::Open(lines) => {
                        if let Some(line) = lines.pop_front() {
                            return Ok(Some(line));
                        }
                    }
                    QueueState::Draining(lines) => {
                        let line = lines.pop_front();
                        if lines.is_empty() {
                            *state = QueueState::Closed;
                        }
                        return Ok(line);
                    }
                    QueueState::Closed => return Ok(None),
                }
            }

            notified.await;
        }
    }

    /// Close the queue for good and wake every waiter
    ///
    /// Lines already buffered stay available to [`remove_front`](Self::remove_front).
    /// Closing twice is a no-op.
    pub fn close(&self) -> QueueResult<()> {
        {
            let mut state = self.lock()?;
            let next = match std::mem::replace(&mut *state, QueueState::Closed) {
                QueueState::Open(lines) | QueueState::Draining(lines) if !lines.is_empty() => {
                    QueueState::Draining(lines)
                }
                _ => QueueState::Closed,
            };
            *state = next;
        }
        self.available.notify_waiters();
        Ok(())
    }

    /// Number of lines currently buffered
    pub fn len(&self) -> QueueResult<usize> {
        let state = self.lock()?;
        Ok(match &*state {
            QueueState::Open(lines) | QueueState::Draining(lines) => lines.len(),
            QueueState::Closed => 0,
        })
    }

    pub fn is_empty(&self) -> QueueResult<bool> {
        Ok(self.len()? == 0)
    }

    /// True once [`close`](Self::close) has been called
    pub fn is_closed(&self) -> QueueResult<bool> {
        Ok(self.phase()? != QueuePhase::Running)
    }

    pub fn phase(&self) -> QueueResult<QueuePhase> {
        let state = self.lock()?;
        Ok(match &*state {
            QueueState::Open(_) => QueuePhase::Running,
            QueueState::Draining(_) => QueuePhase::Draining,
            QueueState::Closed => QueuePhase::Terminated,
        })
    }
}
