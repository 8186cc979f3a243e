//! Traits for the tailer system

use crate::queue::Line;
use crate::tailer::error::TailerError;
use tokio::sync::mpsc;

/// Ordered stream of lines, closed once the source is exhausted
pub type LineReceiver = mpsc::Receiver<Line>;

/// Asynchronous error notifications from a tailer
pub type ErrorReceiver = mpsc::UnboundedReceiver<TailerError>;

/// A source of lines with a side channel for errors
///
/// The line stream is handed over exactly once; after that the tailer only
/// keeps its error channel and its ability to be closed.
pub trait Tailer: Send {
    /// Take ownership of the line stream
    ///
    /// Returns `None` if the stream was already taken.
    fn take_lines(&mut self) -> Option<LineReceiver>;

    /// Error notifications, independent of the line stream's lifetime
    fn errors(&mut self) -> &mut ErrorReceiver;

    /// Ask the source to stop producing
    ///
    /// The line stream closes once the source has wound down.
    fn close(&mut self);
}

impl<T: Tailer + ?Sized> Tailer for Box<T> {
    fn take_lines(&mut self) -> Option<LineReceiver> {
        (**self).take_lines()
    }

    fn errors(&mut self) -> &mut ErrorReceiver {
        (**self).errors()
    }

    fn close(&mut self) {
        (**self).close()
    }
}
