use crate::{HubEvent, Publisher, ShutdownGuard};

use std::time::Duration;

use chrono::Utc;
use log::debug;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};

/// Spawn the ping ticker. First tick fires one full period after start.
pub fn spawn(publisher: Publisher, period: Duration, mut shutdown: ShutdownGuard) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;

                _ = shutdown.wait() => break,

                _ = ticker.tick() => {
                    publisher.publish(HubEvent::ping(Utc::now().timestamp()));
                }
            }
        }

        debug!("Heartbeat stopped");
    })
}
