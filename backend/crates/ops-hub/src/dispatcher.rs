use crate::{
    Delivery, HubEvent, HubStats, Metrics, MetricsTimer, Registry, ShutdownGuard, Subscriber,
    SubscriberId,
};

use std::sync::Arc;
use std::time::Duration;

use log::{debug, info};
use tokio::sync::mpsc;

/// Membership changes routed through the dispatcher
#[derive(Debug)]
pub enum Control {
    Register(Subscriber),
    Unregister(SubscriberId),
}

/// The single task that owns the registry.
///
/// Membership changes and broadcasts are handled one at a time from the same
/// loop, so no event reaches a subscriber after its removal. Deliveries never
/// wait: a full mailbox evicts the subscriber in the same pass.
pub struct Dispatcher {
    registry: Registry,
    control_rx: mpsc::Receiver<Control>,
    inbox_rx: mpsc::Receiver<Arc<HubEvent>>,
    stats: Arc<HubStats>,
    metrics: Metrics,
}

impl Dispatcher {
    pub fn new(
        control_rx: mpsc::Receiver<Control>,
        inbox_rx: mpsc::Receiver<Arc<HubEvent>>,
        stats: Arc<HubStats>,
        metrics: Metrics,
    ) -> Self {
        Self {
            registry: Registry::new(Arc::clone(&stats)),
            control_rx,
            inbox_rx,
            stats,
            metrics,
        }
    }

    pub async fn run(mut self, mut shutdown: ShutdownGuard) {
        debug!("Dispatcher started");

        loop {
            tokio::select! {
                biased;

                _ = shutdown.wait() => break,

                Some(control) = self.control_rx.recv() => self.handle_control(control),

                Some(event) = self.inbox_rx.recv() => self.broadcast(&event),

                else => break,
            }
        }

        self.shut_down();
    }

    fn handle_control(&mut self, control: Control) {
        match control {
            Control::Register(subscriber) => {
                let id = subscriber.id().clone();
                self.registry.insert(subscriber);
                self.metrics.subscriber_connected();
                info!("subscriber connected {id}");
            }
            Control::Unregister(id) => {
                if let Some(connected_for) = self.registry.remove(&id) {
                    self.metrics.subscriber_disconnected("unregistered");
                    info!(
                        "subscriber disconnected {id} after {}",
                        humantime::format_duration(Duration::from_secs(connected_for.as_secs()))
                    );
                } else {
                    debug!("Subscriber {id} already removed");
                }
            }
        }
    }

    fn broadcast(&mut self, event: &Arc<HubEvent>) {
        let timer = MetricsTimer::new(self.metrics.clone());

        let mut delivered = 0u64;
        let mut slow = Vec::new();
        let mut gone = Vec::new();

        for subscriber in self.registry.snapshot() {
            match subscriber.try_deliver(event) {
                Delivery::Delivered => delivered += 1,
                Delivery::Full => slow.push(subscriber.id().clone()),
                Delivery::Closed => gone.push(subscriber.id().clone()),
            }
        }

        for id in slow {
            if let Some(connected_for) = self.registry.remove(&id) {
                self.stats.record_eviction();
                self.metrics.slow_consumer_evicted();
                self.metrics.subscriber_disconnected("slow_consumer");
                info!(
                    "evicting slow subscriber {id} after {}",
                    humantime::format_duration(Duration::from_secs(connected_for.as_secs()))
                );
            }
        }

        for id in gone {
            if self.registry.remove(&id).is_some() {
                self.metrics.subscriber_disconnected("receiver_gone");
                debug!("Subscriber {id} receiver gone, removed");
            }
        }

        self.stats.record_delivered(delivered);
        self.metrics.events_delivered(delivered);
        timer.finish();
    }

    fn shut_down(&mut self) {
        // Stop accepting, then flush what producers already queued.
        self.inbox_rx.close();
        self.control_rx.close();

        let mut drained = 0usize;
        while let Ok(event) = self.inbox_rx.try_recv() {
            self.broadcast(&event);
            drained += 1;
        }

        while let Ok(control) = self.control_rx.try_recv() {
            if let Control::Register(subscriber) = control {
                debug!("Rejecting late registration of {}", subscriber.id());
                subscriber.close();
            }
        }

        let evicted = self.registry.evict_all();
        for _ in 0..evicted {
            self.metrics.subscriber_disconnected("shutdown");
        }

        info!("Dispatcher stopped: drained {drained} events, closed {evicted} subscribers");
    }
}
