//! Shared helpers for integration tests

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;
use tailbuffer::metrics::MetricsRegistry;
use tailbuffer::tailer::api::{BufferConfig, BufferedTailer, ChannelFeed, ChannelTailer, LineReceiver, Tailer};

pub const RECV_TIMEOUT: Duration = Duration::from_secs(2);

pub struct Harness {
    pub tailer: BufferedTailer<ChannelTailer>,
    pub lines: LineReceiver,
    pub feed: ChannelFeed,
    pub registry: Arc<MetricsRegistry>,
}

/// Buffered channel tailer with its own registry so tests never collide
pub fn buffered_channel(metric_name: &str) -> Harness {
    let registry = Arc::new(MetricsRegistry::new());
    let (upstream, feed) = ChannelTailer::new();
    let mut tailer = BufferedTailer::with_registry(
        upstream,
        Arc::clone(&registry),
        BufferConfig::default().with_metric_name(metric_name),
    )
    .expect("buffered tailer should start");
    let lines = tailer.take_lines().expect("fresh tailer has lines");

    Harness {
        tailer,
        lines,
        feed,
        registry,
    }
}

/// Next line from the outward channel, failing the test if it stalls
pub async fn next_line(lines: &mut LineReceiver) -> Option<String> {
    tokio::time::timeout(RECV_TIMEOUT, lines.recv())
        .await
        .expect("outward channel stalled")
}

/// Collect every remaining line until the outward channel closes
pub async fn collect_all(lines: &mut LineReceiver) -> Vec<String> {
    let mut collected = Vec::new();
    while let Some(line) = next_line(lines).await {
        collected.push(line);
    }
    collected
}
