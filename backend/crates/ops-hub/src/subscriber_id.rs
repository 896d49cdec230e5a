use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Process-unique subscriber identifier, `<prefix><n>`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SubscriberId(String);

impl SubscriberId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monotonic id source, numbering from 1
#[derive(Debug)]
pub struct SubscriberIdGenerator {
    prefix: String,
    next: AtomicU64,
}

impl SubscriberIdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(1),
        }
    }

    pub fn next_id(&self) -> SubscriberId {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        SubscriberId(format!("{}{}", self.prefix, n))
    }
}
