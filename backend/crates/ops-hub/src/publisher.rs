use crate::{DropWarning, HubEvent, HubStats, Metrics};

use std::sync::Arc;

use log::debug;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

/// Producer handle onto the broadcast inbox. Cheap to clone.
#[derive(Clone)]
pub struct Publisher {
    inbox: mpsc::Sender<Arc<HubEvent>>,
    stats: Arc<HubStats>,
    metrics: Metrics,
    drop_warning: Arc<DropWarning>,
}

impl Publisher {
    pub fn new(inbox: mpsc::Sender<Arc<HubEvent>>, stats: Arc<HubStats>, metrics: Metrics) -> Self {
        Self {
            inbox,
            stats,
            metrics,
            drop_warning: Arc::new(DropWarning::new()),
        }
    }

    /// Best-effort, never waits. A full inbox drops the event.
    pub fn publish(&self, event: HubEvent) {
        match self.inbox.try_send(Arc::new(event)) {
            Ok(()) => {
                self.stats.record_published();
                self.metrics.event_published();
            }
            Err(TrySendError::Full(event)) => {
                let total = self.stats.record_dropped();
                self.metrics.event_dropped();
                self.drop_warning.event_dropped(event.kind(), total);
            }
            Err(TrySendError::Closed(event)) => {
                debug!("Hub stopped, discarding '{}' event", event.kind());
            }
        }
    }
}
