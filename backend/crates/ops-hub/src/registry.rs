use crate::{HubStats, Subscriber, SubscriberId};

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

/// Live subscribers by id.
///
/// Owned and mutated by the dispatcher task only; other tasks read the
/// cardinality through [`HubStats::subscribers`].
pub struct Registry {
    subscribers: HashMap<SubscriberId, Subscriber>,
    stats: Arc<HubStats>,
}

impl Registry {
    pub fn new(stats: Arc<HubStats>) -> Self {
        Self {
            subscribers: HashMap::new(),
            stats,
        }
    }

    pub fn insert(&mut self, subscriber: Subscriber) {
        self.subscribers.insert(subscriber.id().clone(), subscriber);
        self.publish_count();
    }

    /// Remove and close. Returns how long the subscriber was registered,
    /// or `None` if the id was not present.
    pub fn remove(&mut self, id: &SubscriberId) -> Option<Duration> {
        let subscriber = self.subscribers.remove(id)?;
        let connected_for = (Utc::now() - subscriber.created_at())
            .to_std()
            .unwrap_or_default();
        subscriber.close();
        self.publish_count();
        Some(connected_for)
    }

    pub fn snapshot(&self) -> impl Iterator<Item = &Subscriber> {
        self.subscribers.values()
    }

    pub fn contains(&self, id: &SubscriberId) -> bool {
        self.subscribers.contains_key(id)
    }

    pub fn count(&self) -> usize {
        self.subscribers.len()
    }

    /// Close every mailbox; returns how many were evicted
    pub fn evict_all(&mut self) -> usize {
        let evicted = self.subscribers.len();
        for (_, subscriber) in self.subscribers.drain() {
            subscriber.close();
        }
        self.publish_count();
        evicted
    }

    fn publish_count(&self) {
        self.stats.set_subscribers(self.subscribers.len());
    }
}
