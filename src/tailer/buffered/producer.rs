//! Producer task: upstream lines into the queue

use super::peak::PeakLoad;
use crate::queue::LineQueue;
use crate::tailer::traits::LineReceiver;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// Move upstream lines into `queue` until the upstream closes
///
/// Also emits one peak-depth sample per `window`. On upstream closure the
/// queue is closed (the consumer drains what is left), the metric is
/// deregistered and the ticker is dropped.
pub(crate) async fn run_producer(
    mut upstream: LineReceiver,
    queue: Arc<LineQueue>,
    mut peak: PeakLoad,
    window: Duration,
) {
    let mut ticker = interval_at(Instant::now() + window, window);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut appended: u64 = 0;

    loop {
        tokio::select! {
            next = upstream.recv() => {
                let Some(line) = next else {
                    log::debug!("Upstream closed after {} lines", appended);
                    break;
                };
                match queue.append(line) {
                    Ok(depth) => {
                        peak.record(depth);
                        appended += 1;
                    }
                    Err(e) => {
                        log::error!("Line buffer rejected a line, stopping intake: {}", e);
                        break;
                    }
                }
            }
            _ = ticker.tick() => {
                let sample = peak.flush();
                log::trace!("Peak buffer load in last window: {}", sample);
            }
        }
    }

    log::trace!("Unreported peak load of final window: {}", peak.window_peak());
    if let Err(e) = queue.close() {
        log::error!("Could not close line buffer: {}", e);
    }
    peak.deregister();
}
