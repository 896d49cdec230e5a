use crate::{HubError, Result as HubResult};

use std::convert::Infallible;
use std::panic::Location;

use async_trait::async_trait;
use axum::body::Body;
use bytes::Bytes;
use error_location::ErrorLocation;
use tokio::sync::mpsc;

/// Sink for encoded frames, owned by one stream pump
#[async_trait]
pub trait FrameWriter: Send + Sync + 'static {
    /// Whether each frame reaches the client as its own flush
    fn supports_flush(&self) -> bool {
        true
    }

    /// Write one complete frame and flush it
    async fn write_frame(&mut self, frame: Bytes) -> HubResult<()>;

    /// Resolves once the client has gone away
    async fn closed(&self);
}

/// Writer backing a streaming `axum` response body.
///
/// Each frame becomes one body chunk. The body owns the receiving end, so
/// when the client disconnects and the body is dropped, [`closed`] resolves.
///
/// [`closed`]: FrameWriter::closed
pub struct ChannelWriter {
    tx: mpsc::Sender<Bytes>,
}

impl ChannelWriter {
    pub fn new() -> (Self, Body) {
        let (tx, rx) = mpsc::channel::<Bytes>(1);

        let stream = futures::stream::unfold(rx, |mut rx| async move {
            rx.recv()
                .await
                .map(|frame| (Ok::<_, Infallible>(frame), rx))
        });

        (Self { tx }, Body::from_stream(stream))
    }
}

#[async_trait]
impl FrameWriter for ChannelWriter {
    async fn write_frame(&mut self, frame: Bytes) -> HubResult<()> {
        self.tx
            .send(frame)
            .await
            .map_err(|_| HubError::StreamClosed {
                reason: "response body dropped".to_string(),
                location: ErrorLocation::from(Location::caller()),
            })
    }

    async fn closed(&self) {
        self.tx.closed().await
    }
}
