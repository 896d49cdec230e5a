use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use serde::Serialize;

/// Lock-free hub counters, readable from any task
#[derive(Debug, Default)]
pub struct HubStats {
    subscribers: AtomicUsize,
    events_published: AtomicU64,
    broadcast_dropped: AtomicU64,
    slow_consumer_evictions: AtomicU64,
    events_delivered: AtomicU64,
}

/// Point-in-time copy of [`HubStats`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HubStatsSnapshot {
    pub subscribers: usize,
    pub events_published: u64,
    pub broadcast_dropped: u64,
    pub slow_consumer_evictions: u64,
    pub events_delivered: u64,
}

impl HubStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_subscribers(&self, count: usize) {
        self.subscribers.store(count, Ordering::Release);
    }

    pub fn subscribers(&self) -> usize {
        self.subscribers.load(Ordering::Acquire)
    }

    pub fn record_published(&self) {
        self.events_published.fetch_add(1, Ordering::Relaxed);
    }

    /// Returns the new drop total
    pub fn record_dropped(&self) -> u64 {
        self.broadcast_dropped.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn record_eviction(&self) {
        self.slow_consumer_evictions.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_delivered(&self, count: u64) {
        self.events_delivered.fetch_add(count, Ordering::Relaxed);
    }

    pub fn broadcast_dropped(&self) -> u64 {
        self.broadcast_dropped.load(Ordering::Relaxed)
    }

    pub fn slow_consumer_evictions(&self) -> u64 {
        self.slow_consumer_evictions.load(Ordering::Relaxed)
    }

    pub fn snapshot(&self) -> HubStatsSnapshot {
        HubStatsSnapshot {
            subscribers: self.subscribers(),
            events_published: self.events_published.load(Ordering::Relaxed),
            broadcast_dropped: self.broadcast_dropped(),
            slow_consumer_evictions: self.slow_consumer_evictions(),
            events_delivered: self.events_delivered.load(Ordering::Relaxed),
        }
    }
}
