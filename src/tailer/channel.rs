//! In-memory tailer fed through channels
//!
//! Useful for embedding the line buffer behind a source that is not a file,
//! and for driving the buffer in tests.

use crate::core::shutdown::ShutdownCoordinator;
use crate::queue::Line;
use crate::tailer::error::{TailerError, TailerResult};
use crate::tailer::traits::{ErrorReceiver, LineReceiver, Tailer};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};

const DEFAULT_CAPACITY: usize = 64;

/// Tailer whose lines and errors are pushed in through a [`ChannelFeed`]
pub struct ChannelTailer {
    lines: Option<LineReceiver>,
    errors: ErrorReceiver,
    shutdown: ShutdownCoordinator,
}

/// Producing half of a [`ChannelTailer`]
///
/// Dropping the feed (or calling [`finish`](Self::finish)) ends the line stream.
pub struct ChannelFeed {
    lines: mpsc::Sender<Line>,
    errors: mpsc::UnboundedSender<TailerError>,
    close_requested: Arc<AtomicBool>,
    close_rx: broadcast::Receiver<()>,
}

impl ChannelTailer {
    pub fn new() -> (Self, ChannelFeed) {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a tailer whose line channel holds at most `capacity` lines
    /// before [`ChannelFeed::send`] waits
    pub fn with_capacity(capacity: usize) -> (Self, ChannelFeed) {
        let (lines_tx, lines_rx) = mpsc::channel(capacity.max(1));
        let (errors_tx, errors_rx) = mpsc::unbounded_channel();
        let (shutdown, close_rx) = ShutdownCoordinator::new();

        let feed = ChannelFeed {
            lines: lines_tx,
            errors: errors_tx,
            close_requested: shutdown.requested_flag(),
            close_rx,
        };
        let tailer = Self {
            lines: Some(lines_rx),
            errors: errors_rx,
            shutdown,
        };

        (tailer, feed)
    }
}

impl Tailer for ChannelTailer {
    fn take_lines(&mut self) -> Option<LineReceiver> {
        self.lines.take()
    }

    fn errors(&mut self) -> &mut ErrorReceiver {
        &mut self.errors
    }

    fn close(&mut self) {
        log::debug!("Close requested for channel tailer");
        self.shutdown.trigger_shutdown();
    }
}

impl ChannelFeed {
    /// Push one line, waiting while the line channel is full
    pub async fn send(&self, line: impl Into<Line>) -> TailerResult<()> {
        self.lines
            .send(line.into())
            .await
            .map_err(|_| TailerError::ChannelClosed)
    }

    /// Report an error on the tailer's error channel
    pub fn report_error(&self, error: TailerError) -> TailerResult<()> {
        self.errors
            .send(error)
            .map_err(|_| TailerError::ChannelClosed)
    }

    /// True once the tailer's `close()` has been called
    pub fn is_close_requested(&self) -> bool {
        self.close_requested.load(Ordering::Acquire)
    }

    /// Wait until the tailer's `close()` is called
    pub async fn close_requested(&mut self) {
        if self.is_close_requested() {
            return;
        }
        // Lagged or closed both mean the request has been made or can never come
        let _ = self.close_rx.recv().await;
    }

    /// End the line stream
    pub fn finish(self) {
        log::trace!("Channel feed finished");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{timeout, Duration};

    #[tokio::test]
    async fn test_lines_flow_until_finish() {
        let (mut tailer, feed) = ChannelTailer::new();
        let mut lines = tailer.take_lines().unwrap();

        feed.send("first").await.unwrap();
        feed.send(String::from("second")).await.unwrap();
        feed.finish();

        assert_eq!(lines.recv().await.as_deref(), Some("first"));
        assert_eq!(lines.recv().await.as_deref(), Some("second"));
        assert_eq!(lines.recv().await, None);
        assert!(tailer.take_lines().is_none());
    }

    #[tokio::test]
    async fn test_close_reaches_feed() {
        let (mut tailer, mut feed) = ChannelTailer::new();
        assert!(!feed.is_close_requested());

        tailer.close();

        assert!(feed.is_close_requested());
        timeout(Duration::from_millis(100), feed.close_requested())
            .await
            .expect("close request should be observed");
    }

    #[tokio::test]
    async fn test_reported_errors_arrive_in_order() {
        let (mut tailer, feed) = ChannelTailer::new();

        feed.report_error(TailerError::Upstream {
            message: "rotated".to_string(),
        })
        .unwrap();
        feed.report_error(TailerError::ChannelClosed).unwrap();
        drop(feed);

        assert!(matches!(
            tailer.errors().recv().await,
            Some(TailerError::Upstream { message }) if message == "rotated"
        ));
        assert!(matches!(
            tailer.errors().recv().await,
            Some(TailerError::ChannelClosed)
        ));
        assert!(tailer.errors().recv().await.is_none());
    }

    #[tokio::test]
    async fn test_send_after_receiver_dropped_fails() {
        let (mut tailer, feed) = ChannelTailer::with_capacity(0);
        drop(tailer.take_lines());

        assert!(matches!(
            feed.send("lost").await,
            Err(TailerError::ChannelClosed)
        ));
    }
}
