//! Tailer reading lines from an async reader
//!
//! Reads a stream once from start to end (stdin, a file, a pipe). Following
//! a growing file and handling rotation are left to dedicated sources.

use crate::core::shutdown::ShutdownCoordinator;
use crate::queue::Line;
use crate::tailer::error::{TailerError, TailerResult};
use crate::tailer::traits::{ErrorReceiver, LineReceiver, Tailer};
use std::path::Path;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::{broadcast, mpsc};

const LINE_CHANNEL_CAPACITY: usize = 256;

/// Tailer that splits an [`AsyncBufRead`] into lines on a background task
pub struct ReaderTailer {
    source_name: String,
    lines: Option<LineReceiver>,
    errors: ErrorReceiver,
    shutdown: ShutdownCoordinator,
}

impl ReaderTailer {
    /// Start reading `reader` on a new task
    ///
    /// Must be called inside a tokio runtime. Dropping the tailer stops the
    /// reading task just like [`close`](Tailer::close) does.
    pub fn spawn<R>(reader: R, source_name: impl Into<String>) -> Self
    where
        R: AsyncBufRead + Unpin + Send + 'static,
    {
        let source_name = source_name.into();
        let (lines_tx, lines_rx) = mpsc::channel(LINE_CHANNEL_CAPACITY);
        let (errors_tx, errors_rx) = mpsc::unbounded_channel();
        let (shutdown, shutdown_rx) = ShutdownCoordinator::new();

        tokio::spawn(read_lines(
            reader,
            source_name.clone(),
            lines_tx,
            errors_tx,
            shutdown_rx,
        ));

        Self {
            source_name,
            lines: Some(lines_rx),
            errors: errors_rx,
            shutdown,
        }
    }

    /// Read the process's standard input
    pub fn stdin() -> Self {
        Self::spawn(BufReader::new(tokio::io::stdin()), "stdin")
    }

    /// Open `path` and read it from the beginning
    pub async fn open(path: &Path) -> TailerResult<Self> {
        let source_name = path.display().to_string();
        let file = tokio::fs::File::open(path)
            .await
            .map_err(|source| TailerError::Io {
                source_name: source_name.clone(),
                source,
            })?;
        Ok(Self::spawn(BufReader::new(file), source_name))
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }
}

impl Tailer for ReaderTailer {
    fn take_lines(&mut self) -> Option<LineReceiver> {
        self.lines.take()
    }

    fn errors(&mut self) -> &mut ErrorReceiver {
        &mut self.errors
    }

    fn close(&mut self) {
        log::debug!("Close requested for {}", self.source_name);
        self.shutdown.trigger_shutdown();
    }
}

async fn read_lines<R>(
    reader: R,
    source_name: String,
    lines_tx: mpsc::Sender<Line>,
    errors_tx: mpsc::UnboundedSender<TailerError>,
    mut shutdown_rx: broadcast::Receiver<()>,
) where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut count: u64 = 0;

    loop {
        tokio::select! {
            biased;
            _ = shutdown_rx.recv() => {
                log::debug!("Stopped reading {} on request", source_name);
                break;
            }
            next = lines.next_line() => match next {
                Ok(Some(line)) => {
                    tokio::select! {
                        biased;
                        _ = shutdown_rx.recv() => {
                            log::debug!("Stopped reading {} on request", source_name);
                            break;
                        }
                        sent = lines_tx.send(line) => {
                            if sent.is_err() {
                                log::debug!("Line receiver for {} dropped", source_name);
                                break;
                            }
                            count += 1;
                        }
                    }
                }
                Ok(None) => {
                    log::debug!("Reached end of {}", source_name);
                    break;
                }
                Err(source) => {
                    log::trace!("Read error on {}: {}", source_name, source);
                    let _ = errors_tx.send(TailerError::Io {
                        source_name: source_name.clone(),
                        source,
                    });
                    break;
                }
            }
        }
    }

    log::debug!("Read {} lines from {}", count, source_name);
}
