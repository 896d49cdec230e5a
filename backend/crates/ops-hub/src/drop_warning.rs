use crate::EventKind;

use std::num::NonZeroU32;
use std::sync::atomic::{AtomicU64, Ordering};

use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
};
use log::warn;

/// Rate-limited warning for events dropped at a full broadcast inbox
pub struct DropWarning {
    limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
    suppressed: AtomicU64,
}

impl DropWarning {
    /// At most one warning per second
    pub fn new() -> Self {
        Self {
            limiter: RateLimiter::direct(Quota::per_second(NonZeroU32::MIN)),
            suppressed: AtomicU64::new(0),
        }
    }

    /// Returns true if a warning was emitted
    pub fn event_dropped(&self, kind: &EventKind, total_dropped: u64) -> bool {
        if self.limiter.check().is_err() {
            self.suppressed.fetch_add(1, Ordering::Relaxed);
            return false;
        }

        let suppressed = self.suppressed.swap(0, Ordering::Relaxed);
        warn!(
            "Broadcast inbox full, dropped '{}' event ({} dropped total, {} warnings suppressed)",
            kind, total_dropped, suppressed
        );
        true
    }
}

impl Default for DropWarning {
    fn default() -> Self {
        Self::new()
    }
}
