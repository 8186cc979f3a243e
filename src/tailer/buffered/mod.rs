//! Buffered tailer
//!
//! Wraps any [`Tailer`] so that a slow reader never slows down the source.
//! A producer task moves upstream lines into an unbounded [`LineQueue`] and a
//! consumer task forwards them, one at a time and in order, to the outward
//! line channel. Peak queue depth per window is reported as a summary metric.
//!
//! Shutdown is driven by the upstream alone: once its line stream closes the
//! producer closes the queue and deregisters the metric, and the consumer
//! closes the outward channel after forwarding the last buffered line.

mod config;
mod consumer;
mod peak;
mod producer;

pub use config::{BufferConfig, DEFAULT_METRIC_HELP, DEFAULT_METRIC_NAME};

use crate::metrics::api::get_metrics_registry;
use crate::metrics::{MetricsRegistry, Summary};
use crate::queue::{LineQueue, QueuePhase, QueueResult};
use crate::tailer::error::{BufferError, BufferResult};
use crate::tailer::traits::{ErrorReceiver, LineReceiver, Tailer};
use peak::PeakLoad;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::mpsc;

/// Outward channel slots; a send waits until the reader has taken the previous line
const OUTWARD_CAPACITY: usize = 1;

/// A [`Tailer`] whose lines pass through an unbounded in-memory buffer
///
/// # Example
///
/// ```rust,no_run
/// use tailbuffer::tailer::api::{BufferedTailer, ReaderTailer, Tailer};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let mut buffered = BufferedTailer::new(ReaderTailer::stdin())?;
/// let mut lines = buffered.take_lines().expect("fresh tailer");
///
/// while let Some(line) = lines.recv().await {
///     println!("{}", line);
/// }
/// println!("peak load: {:?}", buffered.peak_load().snapshot().max);
/// # Ok(())
/// # }
/// ```
pub struct BufferedTailer<T: Tailer> {
    inner: T,
    outward: Option<LineReceiver>,
    queue: Arc<LineQueue>,
    peak_load: Summary,
}

impl<T: Tailer> BufferedTailer<T> {
    /// Buffer `tailer` using the process-wide metrics registry and default settings
    pub fn new(tailer: T) -> BufferResult<Self> {
        Self::with_registry(tailer, get_metrics_registry(), BufferConfig::default())
    }

    /// Buffer `tailer`, registering the peak-load summary in `registry`
    ///
    /// Spawns the producer and consumer tasks on the current tokio runtime.
    pub fn with_registry(
        mut tailer: T,
        registry: Arc<MetricsRegistry>,
        config: BufferConfig,
    ) -> BufferResult<Self> {
        config.validate()?;
        let runtime = Handle::try_current().map_err(|_| BufferError::NoRuntime)?;

        let peak = PeakLoad::register(registry, &config.metric_name, &config.metric_help)?;
        let Some(upstream) = tailer.take_lines() else {
            peak.deregister();
            return Err(BufferError::LinesUnavailable);
        };

        let peak_load = peak.summary();
        let queue = Arc::new(LineQueue::new());
        let (outward_tx, outward_rx) = mpsc::channel(OUTWARD_CAPACITY);

        runtime.spawn(producer::run_producer(
            upstream,
            Arc::clone(&queue),
            peak,
            config.sample_window,
        ));
        runtime.spawn(consumer::run_consumer(Arc::clone(&queue), outward_tx));
        log::debug!(
            "Line buffer started (metric '{}', window {:?})",
            config.metric_name,
            config.sample_window
        );

        Ok(Self {
            inner: tailer,
            outward: Some(outward_rx),
            queue,
            peak_load,
        })
    }

    /// Handle to the peak-load summary
    ///
    /// Stays readable after the buffer has shut down and deregistered it.
    pub fn peak_load(&self) -> Summary {
        self.peak_load.clone()
    }

    /// Lines buffered and not yet handed to the outward channel
    pub fn queue_len(&self) -> QueueResult<usize> {
        self.queue.len()
    }

    pub fn phase(&self) -> QueueResult<QueuePhase> {
        self.queue.phase()
    }
}

impl<T: Tailer> Tailer for BufferedTailer<T> {
    fn take_lines(&mut self) -> Option<LineReceiver> {
        self.outward.take()
    }

    fn errors(&mut self) -> &mut ErrorReceiver {
        self.inner.errors()
    }

    fn close(&mut self) {
        self.inner.close();
    }
}
