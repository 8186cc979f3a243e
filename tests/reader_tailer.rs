//! Reading real files through the line buffer

mod common;

use common::collect_all;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tailbuffer::metrics::MetricsRegistry;
use tailbuffer::tailer::api::{BufferConfig, BufferedTailer, ReaderTailer, Tailer, TailerError};

#[tokio::test]
async fn test_file_lines_forwarded_in_order() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    for i in 0..300 {
        writeln!(file, "entry {}", i).unwrap();
    }
    file.flush().unwrap();

    let upstream = ReaderTailer::open(file.path()).await.unwrap();
    assert_eq!(upstream.source_name(), file.path().display().to_string());

    let mut buffered = BufferedTailer::with_registry(
        upstream,
        Arc::new(MetricsRegistry::new()),
        BufferConfig::default().with_metric_name("file_read"),
    )
    .unwrap();
    let mut lines = buffered.take_lines().unwrap();

    let received = collect_all(&mut lines).await;
    let expected: Vec<String> = (0..300).map(|i| format!("entry {}", i)).collect();
    assert_eq!(received, expected);
    assert!(buffered.errors().try_recv().is_err());
}

#[tokio::test]
async fn test_missing_file_reports_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.log");

    match ReaderTailer::open(&missing).await {
        Err(TailerError::Io { source_name, source }) => {
            assert!(source_name.ends_with("nope.log"));
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        Err(other) => panic!("Unexpected error: {:?}", other),
        Ok(_) => panic!("Opening a missing file should fail"),
    }
}

#[tokio::test]
async fn test_invalid_utf8_surfaces_on_error_channel() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"good line\n\xff\xfe broken\nnever read\n").unwrap();
    file.flush().unwrap();

    let mut buffered = BufferedTailer::with_registry(
        ReaderTailer::open(file.path()).await.unwrap(),
        Arc::new(MetricsRegistry::new()),
        BufferConfig::default().with_metric_name("utf8_read"),
    )
    .unwrap();
    let mut lines = buffered.take_lines().unwrap();

    assert_eq!(collect_all(&mut lines).await, vec!["good line"]);

    let error = tokio::time::timeout(Duration::from_secs(2), buffered.errors().recv())
        .await
        .unwrap()
        .expect("read error should be reported");
    assert!(matches!(error, TailerError::Io { .. }));
}

#[tokio::test]
async fn test_close_stops_reader_and_drains() {
    let (mut client, server) = tokio::io::duplex(1024);

    let upstream = ReaderTailer::spawn(tokio::io::BufReader::new(server), "duplex");
    let mut buffered = BufferedTailer::with_registry(
        upstream,
        Arc::new(MetricsRegistry::new()),
        BufferConfig::default().with_metric_name("duplex_read"),
    )
    .unwrap();
    let mut lines = buffered.take_lines().unwrap();

    client.write_all(b"one\ntwo\n").await.unwrap();
    client.flush().await.unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;

    // The writer never finishes; only close() can end the stream
    buffered.close();

    assert_eq!(collect_all(&mut lines).await, vec!["one", "two"]);
}
