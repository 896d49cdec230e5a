#![allow(dead_code)]

use ops_hub::{FrameWriter, HubError, HubResult};

use std::panic::Location;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use error_location::ErrorLocation;
use tokio::sync::watch;
use tokio::time::{Duration, sleep, timeout};

/// In-memory writer with knobs for stalling, failing, and disconnecting
pub struct RecordingWriter {
    frames: Arc<Mutex<Vec<Bytes>>>,
    disconnected: watch::Receiver<bool>,
    flushable: bool,
    stall_after: Option<usize>,
    fail_after: Option<usize>,
}

/// Test-side view of a [`RecordingWriter`]
pub struct WriterHandle {
    frames: Arc<Mutex<Vec<Bytes>>>,
    disconnect: watch::Sender<bool>,
}

impl RecordingWriter {
    pub fn new() -> (Self, WriterHandle) {
        let frames = Arc::new(Mutex::new(Vec::new()));
        let (disconnect, disconnected) = watch::channel(false);

        let writer = Self {
            frames: Arc::clone(&frames),
            disconnected,
            flushable: true,
            stall_after: None,
            fail_after: None,
        };

        (writer, WriterHandle { frames, disconnect })
    }

    /// Writer whose response cannot be flushed incrementally
    pub fn unflushable() -> (Self, WriterHandle) {
        let (mut writer, handle) = Self::new();
        writer.flushable = false;
        (writer, handle)
    }

    /// Accept `count` frames, then block every later write forever
    pub fn stalling_after(count: usize) -> (Self, WriterHandle) {
        let (mut writer, handle) = Self::new();
        writer.stall_after = Some(count);
        (writer, handle)
    }

    /// Accept `count` frames, then fail every later write
    pub fn failing_after(count: usize) -> (Self, WriterHandle) {
        let (mut writer, handle) = Self::new();
        writer.fail_after = Some(count);
        (writer, handle)
    }

    fn written(&self) -> usize {
        self.frames.lock().unwrap().len()
    }
}

#[async_trait]
impl FrameWriter for RecordingWriter {
    fn supports_flush(&self) -> bool {
        self.flushable
    }

    async fn write_frame(&mut self, frame: Bytes) -> HubResult<()> {
        let written = self.written();
        if self.stall_after.is_some_and(|limit| written >= limit) {
            std::future::pending::<()>().await;
        }
        if self.fail_after.is_some_and(|limit| written >= limit) {
            return Err(HubError::StreamClosed {
                reason: "simulated write failure".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        self.frames.lock().unwrap().push(frame);
        Ok(())
    }

    async fn closed(&self) {
        let mut disconnected = self.disconnected.clone();
        if disconnected.wait_for(|gone| *gone).await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

impl WriterHandle {
    pub fn frames(&self) -> Vec<String> {
        self.frames
            .lock()
            .unwrap()
            .iter()
            .map(|frame| String::from_utf8(frame.to_vec()).unwrap())
            .collect()
    }

    pub fn frame_count(&self) -> usize {
        self.frames.lock().unwrap().len()
    }

    /// Simulate the client cancelling its request
    pub fn disconnect(&self) {
        self.disconnect.send_replace(true);
    }

    pub async fn wait_for_frames(&self, expected: usize) {
        timeout(Duration::from_secs(5), async {
            while self.frame_count() < expected {
                sleep(Duration::from_millis(2)).await;
            }
        })
        .await
        .unwrap_or_else(|_| {
            panic!(
                "only {} of {expected} frames written",
                self.frame_count()
            )
        });
    }
}

/// Counts `seq` payloads and flags any repeat or step backwards.
/// Gaps are allowed; compare `received` against the number published.
pub struct SequenceWriter {
    last_seq: Option<u64>,
    progress: Arc<SequenceProgress>,
}

#[derive(Default)]
pub struct SequenceProgress {
    pub received: AtomicU64,
    pub out_of_order: AtomicBool,
}

impl SequenceWriter {
    pub fn new() -> (Self, Arc<SequenceProgress>) {
        let progress = Arc::new(SequenceProgress::default());
        let writer = Self {
            last_seq: None,
            progress: Arc::clone(&progress),
        };
        (writer, progress)
    }
}

#[async_trait]
impl FrameWriter for SequenceWriter {
    async fn write_frame(&mut self, frame: Bytes) -> HubResult<()> {
        let text = std::str::from_utf8(&frame).unwrap();
        if !text.starts_with("event: load\n") {
            return Ok(());
        }

        let data = text.trim_end().split_once("\ndata: ").unwrap().1;
        let payload: serde_json::Value = serde_json::from_str(data).unwrap();
        let seq = payload["seq"].as_u64().unwrap();
        if self.last_seq.is_some_and(|last| seq <= last) {
            self.progress.out_of_order.store(true, Ordering::Relaxed);
        }
        self.last_seq = Some(seq);
        self.progress.received.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    async fn closed(&self) {
        std::future::pending::<()>().await
    }
}
