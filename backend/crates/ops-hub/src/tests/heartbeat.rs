use crate::{HubEvent, HubStats, Metrics, Publisher, ShutdownCoordinator, heartbeat};

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::time::{Duration, advance};

fn publisher() -> (Publisher, mpsc::Receiver<Arc<HubEvent>>) {
    let (inbox_tx, inbox_rx) = mpsc::channel(8);
    let publisher = Publisher::new(inbox_tx, Arc::new(HubStats::new()), Metrics::new());
    (publisher, inbox_rx)
}

#[tokio::test(start_paused = true)]
async fn given_running_ticker_when_period_elapses_then_ping_published() {
    // Given
    let (publisher, mut inbox) = publisher();
    let shutdown = ShutdownCoordinator::new();
    let _task = heartbeat::spawn(publisher, Duration::from_secs(30), shutdown.subscribe_guard());

    // When
    advance(Duration::from_secs(29)).await;
    let early = inbox.try_recv();
    advance(Duration::from_secs(1)).await;
    let ping = inbox.recv().await.unwrap();

    // Then
    assert!(early.is_err(), "no ping before the first full period");
    assert_eq!(ping.kind().as_str(), "ping");
    assert!(ping.payload()["timestamp"].as_i64().unwrap() > 0);
}

#[tokio::test(start_paused = true)]
async fn given_ticker_when_shutdown_then_task_exits_and_no_more_pings() {
    // Given
    let (publisher, mut inbox) = publisher();
    let shutdown = ShutdownCoordinator::new();
    let task = heartbeat::spawn(publisher, Duration::from_secs(5), shutdown.subscribe_guard());

    // When
    shutdown.shutdown();
    task.await.unwrap();

    // Then
    assert!(inbox.recv().await.is_none(), "publisher dropped with the task");
}
