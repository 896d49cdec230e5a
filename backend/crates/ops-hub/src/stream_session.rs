use crate::{
    EventHub, FrameWriter, HubError, HubEvent, Mailbox, Metrics, Result as HubResult, Subscriber,
    SubscriberId, frame,
};

use ops_auth::TokenValidator;

use std::fmt;
use std::panic::Location;

use chrono::Utc;
use error_location::ErrorLocation;
use log::{debug, info, warn};

/// Why a stream pump ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisconnectReason {
    /// Client went away (request cancelled)
    ClientGone,
    WriteFailed,
    /// Mailbox closed by the dispatcher: slow consumer or hub shutdown
    Evicted,
    /// Hub stopped before registration
    HubStopped,
}

impl DisconnectReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ClientGone => "client_gone",
            Self::WriteFailed => "write_failed",
            Self::Evicted => "evicted",
            Self::HubStopped => "hub_stopped",
        }
    }
}

impl fmt::Display for DisconnectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An accepted stream, not yet registered with the hub
pub struct StreamSession<W: FrameWriter> {
    hub: EventHub,
    subscriber: Subscriber,
    mailbox: Mailbox,
    writer: W,
}

/// Admission checks for a new stream.
///
/// Rejects a missing or invalid token, a writer that cannot flush per frame,
/// or a stopped hub. Nothing is allocated in the hub on rejection; the
/// subscriber id is taken only once every check has passed.
#[track_caller]
pub fn open_stream<W: FrameWriter>(
    hub: &EventHub,
    validator: &dyn TokenValidator,
    token: Option<&str>,
    writer: W,
) -> HubResult<StreamSession<W>> {
    let result = admit(hub, validator, token, &writer);
    if let Err(e) = &result {
        hub.metrics().stream_rejected(e.error_code());
    }
    result?;

    let id = hub.next_subscriber_id();
    let (subscriber, mailbox) = Subscriber::new(id, hub.config().mailbox_capacity);
    debug!("Stream accepted as {}", subscriber.id());

    Ok(StreamSession {
        hub: hub.clone(),
        subscriber,
        mailbox,
        writer,
    })
}

#[track_caller]
fn admit<W: FrameWriter>(
    hub: &EventHub,
    validator: &dyn TokenValidator,
    token: Option<&str>,
    writer: &W,
) -> HubResult<()> {
    let token = token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| HubError::Unauthorized {
            message: "Missing token".to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?;

    validator.validate(token).map_err(|e| {
        warn!("Stream token rejected: {e}");
        HubError::Unauthorized {
            message: format!("Token rejected ({})", e.error_code()),
            location: ErrorLocation::from(Location::caller()),
        }
    })?;

    if !writer.supports_flush() {
        return Err(HubError::FlushUnsupported {
            location: ErrorLocation::from(Location::caller()),
        });
    }

    if !hub.is_running() {
        return Err(HubError::HubStopped {
            location: ErrorLocation::from(Location::caller()),
        });
    }

    Ok(())
}

impl<W: FrameWriter> StreamSession<W> {
    pub fn id(&self) -> &SubscriberId {
        self.subscriber.id()
    }

    /// Greet, register, pump until disconnect, unregister.
    pub async fn run(self) -> DisconnectReason {
        let StreamSession {
            hub,
            subscriber,
            mut mailbox,
            mut writer,
        } = self;
        let id = subscriber.id().clone();
        let metrics = hub.metrics().clone();

        // The greeting goes out before registration so it precedes every broadcast.
        let greeting = HubEvent::connected(&id, Utc::now().timestamp());
        match frame::encode(&greeting) {
            Ok(frame) => {
                if let Err(e) = writer.write_frame(frame).await {
                    info!("Stream {id} closed before registration: {e}");
                    metrics.stream_closed(DisconnectReason::WriteFailed.as_str());
                    return DisconnectReason::WriteFailed;
                }
                metrics.frame_written();
            }
            Err(e) => warn!("Greeting for {id} not encoded: {e}"),
        }

        if let Err(e) = hub.register(subscriber).await {
            info!("Stream {id} not registered: {e}");
            metrics.stream_closed(DisconnectReason::HubStopped.as_str());
            return DisconnectReason::HubStopped;
        }

        let reason = pump(&id, &mut mailbox, &mut writer, &metrics).await;

        hub.unregister(&id).await;
        metrics.stream_closed(reason.as_str());
        info!("Stream {id} closed: {reason}");

        reason
    }
}

async fn pump<W: FrameWriter>(
    id: &SubscriberId,
    mailbox: &mut Mailbox,
    writer: &mut W,
    metrics: &Metrics,
) -> DisconnectReason {
    loop {
        let event = tokio::select! {
            biased;

            _ = writer.closed() => return DisconnectReason::ClientGone,

            next = mailbox.recv() => match next {
                Some(event) => event,
                None => return DisconnectReason::Evicted,
            },
        };

        let frame = match frame::encode(&event) {
            Ok(frame) => frame,
            Err(e) => {
                warn!("Skipping '{}' event for {id}: {e}", event.kind());
                continue;
            }
        };

        // Write first: an event already taken from the mailbox is delivered
        // unless the write itself is stuck when eviction arrives.
        tokio::select! {
            biased;

            result = writer.write_frame(frame) => {
                if let Err(e) = result {
                    debug!("Write to {id} failed: {e}");
                    return DisconnectReason::WriteFailed;
                }
                metrics.frame_written();
            }

            _ = mailbox.cancelled() => return DisconnectReason::Evicted,
        }
    }
}
