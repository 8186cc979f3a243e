//! Consumer task: queue into the outward channel

use crate::queue::{Line, LineQueue};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Forward lines from `queue` to `outward` in order until the queue is
/// closed and empty, then close `outward`
///
/// Sending waits for the downstream reader, which is the only place the
/// buffer applies backpressure. If the reader goes away, remaining lines are
/// discarded so the queue does not keep growing.
pub(crate) async fn run_consumer(queue: Arc<LineQueue>, outward: mpsc::Sender<Line>) {
    let mut outward = Some(outward);
    let mut delivered: u64 = 0;
    let mut discarded: u64 = 0;

    loop {
        let line = match queue.remove_front().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                log::error!("Line buffer unavailable, closing output: {}", e);
                break;
            }
        };

        match &outward {
            Some(sender) => {
                if sender.send(line).await.is_ok() {
                    delivered += 1;
                } else {
                    log::warn!("Downstream reader dropped; discarding buffered lines");
                    outward = None;
                    discarded += 1;
                }
            }
            None => discarded += 1,
        }
    }

    // Dropping the sender is what closes the outward channel
    drop(outward);
    log::debug!(
        "Line buffer drained: {} delivered, {} discarded",
        delivered,
        discarded
    );
}
