use crate::{
    Control, Dispatcher, HubConfig, HubError, HubEvent, HubStats, HubStatsSnapshot, Metrics,
    Publisher, Result as HubResult, ShutdownCoordinator, Subscriber, SubscriberId,
    SubscriberIdGenerator, heartbeat,
};

use std::panic::Location;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use error_location::ErrorLocation;
use log::{debug, error, info, warn};
use serde::Serialize;
use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinHandle;

/// In-process fan-out hub. Cheap to clone; all clones share one dispatcher.
#[derive(Clone)]
pub struct EventHub {
    inner: Arc<HubInner>,
}

struct HubInner {
    config: HubConfig,
    publisher: Publisher,
    control_tx: mpsc::Sender<Control>,
    ids: SubscriberIdGenerator,
    stats: Arc<HubStats>,
    metrics: Metrics,
    running: AtomicBool,
    tasks: Mutex<Option<HubTasks>>,
}

struct HubTasks {
    heartbeat_shutdown: ShutdownCoordinator,
    heartbeat: JoinHandle<()>,
    dispatcher_shutdown: ShutdownCoordinator,
    dispatcher: JoinHandle<()>,
}

impl EventHub {
    /// Spawn the dispatcher and heartbeat. Must be called inside a Tokio runtime.
    pub fn start(config: HubConfig) -> Self {
        let config = config.sanitized();
        let stats = Arc::new(HubStats::new());
        let metrics = Metrics::new();

        let (inbox_tx, inbox_rx) = mpsc::channel(config.broadcast_capacity);
        let (control_tx, control_rx) = mpsc::channel(HubConfig::CONTROL_CAPACITY);
        let publisher = Publisher::new(inbox_tx, Arc::clone(&stats), metrics.clone());

        let dispatcher_shutdown = ShutdownCoordinator::new();
        let dispatcher = Dispatcher::new(control_rx, inbox_rx, Arc::clone(&stats), metrics.clone());
        let dispatcher = tokio::spawn(dispatcher.run(dispatcher_shutdown.subscribe_guard()));

        let heartbeat_shutdown = ShutdownCoordinator::new();
        let heartbeat = heartbeat::spawn(
            publisher.clone(),
            config.heartbeat_interval,
            heartbeat_shutdown.subscribe_guard(),
        );

        info!(
            "Event hub started (mailbox={}, broadcast={}, heartbeat={}s)",
            config.mailbox_capacity,
            config.broadcast_capacity,
            config.heartbeat_interval.as_secs()
        );

        Self {
            inner: Arc::new(HubInner {
                ids: SubscriberIdGenerator::new(config.id_prefix.clone()),
                config,
                publisher,
                control_tx,
                stats,
                metrics,
                running: AtomicBool::new(true),
                tasks: Mutex::new(Some(HubTasks {
                    heartbeat_shutdown,
                    heartbeat,
                    dispatcher_shutdown,
                    dispatcher,
                })),
            }),
        }
    }

    /// Stop the heartbeat, then drain and stop the dispatcher. Idempotent;
    /// concurrent callers return once shutdown has completed.
    pub async fn stop(&self) {
        let mut slot = self.inner.tasks.lock().await;
        let Some(tasks) = slot.take() else {
            debug!("Event hub already stopped");
            return;
        };

        self.inner.running.store(false, Ordering::Release);
        info!("Stopping event hub");

        tasks.heartbeat_shutdown.shutdown();
        if let Err(e) = tasks.heartbeat.await {
            error!("Heartbeat task failed: {e}");
        }

        tasks.dispatcher_shutdown.shutdown();
        if let Err(e) = tasks.dispatcher.await {
            error!("Dispatcher task failed: {e}");
        }

        info!("Event hub stopped");
    }

    pub fn is_running(&self) -> bool {
        self.inner.running.load(Ordering::Acquire)
    }

    /// Non-blocking, best-effort
    pub fn publish(&self, event: HubEvent) {
        self.inner.publisher.publish(event);
    }

    pub fn publish_alert<T: Serialize + ?Sized>(&self, alert: &T) {
        match HubEvent::alert(alert) {
            Ok(event) => self.publish(event),
            Err(e) => warn!("Alert not published: {e}"),
        }
    }

    pub fn publish_ack(&self, alert_id: i64) {
        self.publish(HubEvent::ack(alert_id));
    }

    pub fn publish_health(&self, app_id: i64, status: &str) {
        self.publish(HubEvent::health(app_id, status));
    }

    pub fn count(&self) -> usize {
        self.inner.stats.subscribers()
    }

    pub fn stats(&self) -> HubStatsSnapshot {
        self.inner.stats.snapshot()
    }

    pub fn config(&self) -> &HubConfig {
        &self.inner.config
    }

    pub(crate) fn metrics(&self) -> &Metrics {
        &self.inner.metrics
    }

    pub(crate) fn next_subscriber_id(&self) -> SubscriberId {
        self.inner.ids.next_id()
    }

    pub(crate) async fn register(&self, subscriber: Subscriber) -> HubResult<()> {
        self.inner
            .control_tx
            .send(Control::Register(subscriber))
            .await
            .map_err(|_| HubError::HubStopped {
                location: ErrorLocation::from(Location::caller()),
            })
    }

    /// No-op if already evicted or the hub has stopped
    pub(crate) async fn unregister(&self, id: &SubscriberId) {
        if self
            .inner
            .control_tx
            .send(Control::Unregister(id.clone()))
            .await
            .is_err()
        {
            debug!("Hub stopped, unregister of {id} skipped");
        }
    }
}
