use metrics::{counter, gauge, histogram};

/// Metrics collector for hub operations
#[derive(Clone)]
pub struct Metrics {
    prefix: &'static str,
}

impl Metrics {
    pub fn new() -> Self {
        Self { prefix: "ops_hub" }
    }

    /// Record subscriber added to the registry
    pub fn subscriber_connected(&self) {
        counter!(format!("{}.subscribers.connected", self.prefix)).increment(1);
        gauge!(format!("{}.subscribers.active", self.prefix)).increment(1.0);
    }

    /// Record subscriber removed from the registry
    pub fn subscriber_disconnected(&self, reason: &str) {
        counter!(format!("{}.subscribers.disconnected", self.prefix)).increment(1);
        counter!(format!("{}.subscribers.disconnected.{}", self.prefix, reason)).increment(1);
        gauge!(format!("{}.subscribers.active", self.prefix)).decrement(1.0);
    }

    pub fn slow_consumer_evicted(&self) {
        counter!(format!("{}.subscribers.slow_consumer_evictions", self.prefix)).increment(1);
    }

    pub fn event_published(&self) {
        counter!(format!("{}.events.published", self.prefix)).increment(1);
    }

    pub fn event_dropped(&self) {
        counter!(format!("{}.events.dropped", self.prefix)).increment(1);
    }

    pub fn events_delivered(&self, count: u64) {
        counter!(format!("{}.events.delivered", self.prefix)).increment(count);
    }

    /// Record frame written to a stream
    pub fn frame_written(&self) {
        counter!(format!("{}.frames.written", self.prefix)).increment(1);
    }

    /// Record stream endpoint closing, by reason
    pub fn stream_closed(&self, reason: &str) {
        counter!(format!("{}.streams.closed.{}", self.prefix, reason)).increment(1);
    }

    pub fn stream_rejected(&self, code: &str) {
        counter!(format!("{}.streams.rejected.{}", self.prefix, code)).increment(1);
    }

    /// Record one broadcast pass
    pub fn dispatch_latency(&self, duration: std::time::Duration) {
        histogram!(format!("{}.dispatch.latency_us", self.prefix))
            .record(duration.as_micros() as f64);
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
