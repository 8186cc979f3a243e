//! End-to-end behaviour of the buffered tailer

mod common;

use common::{buffered_channel, collect_all, next_line};
use std::time::Duration;
use tailbuffer::tailer::api::{QueuePhase, Tailer};
use tokio::sync::mpsc::error::TryRecvError;

#[tokio::test]
async fn test_stalled_reader_then_upstream_close() {
    let mut harness = buffered_channel("scenario_abc");

    for line in ["a", "b", "c"] {
        harness.feed.send(line).await.unwrap();
    }
    tokio::time::sleep(Duration::from_millis(50)).await;
    harness.feed.finish();

    // The error channel stays silent; it only closes with the upstream
    assert!(matches!(
        harness.tailer.errors().try_recv(),
        Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected)
    ));

    assert_eq!(next_line(&mut harness.lines).await.as_deref(), Some("a"));
    assert_eq!(next_line(&mut harness.lines).await.as_deref(), Some("b"));
    assert_eq!(next_line(&mut harness.lines).await.as_deref(), Some("c"));
    assert_eq!(next_line(&mut harness.lines).await, None);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_order_preserved_with_uneven_speeds() {
    let mut harness = buffered_channel("uneven_speeds");
    let feed = harness.feed;
    let total = 2_000;

    let writer = tokio::spawn(async move {
        for i in 0..total {
            feed.send(format!("{:05}", i)).await.unwrap();
            if i % 250 == 0 {
                tokio::time::sleep(Duration::from_millis(2)).await;
            }
        }
    });

    let mut received = Vec::with_capacity(total);
    while let Some(line) = next_line(&mut harness.lines).await {
        received.push(line);
        if received.len() % 300 == 0 {
            tokio::time::sleep(Duration::from_millis(3)).await;
        }
    }
    writer.await.unwrap();

    let expected: Vec<String> = (0..total).map(|i| format!("{:05}", i)).collect();
    assert_eq!(received, expected);
    assert_eq!(harness.tailer.phase().unwrap(), QueuePhase::Terminated);
}

#[tokio::test]
async fn test_backlog_grows_without_blocking_upstream() {
    let mut harness = buffered_channel("backlog");
    let total = 10_000;

    // With nobody reading, every send still completes promptly
    tokio::time::timeout(Duration::from_secs(5), async {
        for i in 0..total {
            harness.feed.send(i.to_string()).await.unwrap();
        }
    })
    .await
    .expect("upstream must not be throttled by the reader");
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert!(harness.tailer.queue_len().unwrap() >= total - 10);

    harness.feed.finish();
    let received = collect_all(&mut harness.lines).await;
    assert_eq!(received.len(), total);
    assert_eq!(received.first().map(String::as_str), Some("0"));
    assert_eq!(received.last().map(String::as_str), Some("9999"));
}

#[tokio::test]
async fn test_output_stays_closed() {
    let mut harness = buffered_channel("stays_closed");

    harness.feed.send("only").await.unwrap();
    harness.feed.finish();

    assert_eq!(collect_all(&mut harness.lines).await, vec!["only"]);
    for _ in 0..3 {
        assert_eq!(next_line(&mut harness.lines).await, None);
    }
    assert!(harness.tailer.take_lines().is_none());
}

#[tokio::test]
async fn test_metric_lives_as_long_as_upstream() {
    let mut harness = buffered_channel("metric_lifetime");

    assert!(harness.registry.contains("metric_lifetime"));
    let text = harness.registry.render_text().unwrap();
    assert!(text.contains("# TYPE metric_lifetime histogram"));
    assert!(text.contains("# TYPE metric_lifetime_max gauge"));

    harness.feed.finish();
    assert_eq!(next_line(&mut harness.lines).await, None);
    assert!(!harness.registry.contains("metric_lifetime"));

    // The handle keeps its data for final reporting
    let snapshot = harness.tailer.peak_load().snapshot();
    assert_eq!(snapshot.name, "metric_lifetime");
}
