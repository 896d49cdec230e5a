use std::time::Duration;

/// Hub tuning knobs
#[derive(Debug, Clone)]
pub struct HubConfig {
    /// Per-subscriber backlog before eviction
    pub mailbox_capacity: usize,
    /// Producer backlog before publish drops
    pub broadcast_capacity: usize,
    pub heartbeat_interval: Duration,
    pub id_prefix: String,
}

impl HubConfig {
    pub const DEFAULT_MAILBOX_CAPACITY: usize = 10;
    pub const DEFAULT_BROADCAST_CAPACITY: usize = 100;
    pub const DEFAULT_HEARTBEAT_INTERVAL: Duration = Duration::from_secs(30);
    pub const DEFAULT_ID_PREFIX: &'static str = "client_";
    pub const CONTROL_CAPACITY: usize = 256;

    pub fn with_mailbox_capacity(mut self, capacity: usize) -> Self {
        self.mailbox_capacity = capacity;
        self
    }

    pub fn with_broadcast_capacity(mut self, capacity: usize) -> Self {
        self.broadcast_capacity = capacity;
        self
    }

    pub fn with_heartbeat_interval(mut self, interval: Duration) -> Self {
        self.heartbeat_interval = interval;
        self
    }

    /// Zero capacities and a zero interval fall back to the minimum usable values.
    pub(crate) fn sanitized(mut self) -> Self {
        if self.mailbox_capacity == 0 {
            log::warn!("mailbox_capacity 0 is not usable, using 1");
            self.mailbox_capacity = 1;
        }
        if self.broadcast_capacity == 0 {
            log::warn!("broadcast_capacity 0 is not usable, using 1");
            self.broadcast_capacity = 1;
        }
        if self.heartbeat_interval.is_zero() {
            log::warn!(
                "heartbeat_interval 0 is not usable, using {}s",
                Self::DEFAULT_HEARTBEAT_INTERVAL.as_secs()
            );
            self.heartbeat_interval = Self::DEFAULT_HEARTBEAT_INTERVAL;
        }
        self
    }
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            mailbox_capacity: Self::DEFAULT_MAILBOX_CAPACITY,
            broadcast_capacity: Self::DEFAULT_BROADCAST_CAPACITY,
            heartbeat_interval: Self::DEFAULT_HEARTBEAT_INTERVAL,
            id_prefix: Self::DEFAULT_ID_PREFIX.to_string(),
        }
    }
}
