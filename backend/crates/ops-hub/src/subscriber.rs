use crate::{HubEvent, SubscriberId};

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, oneshot};

/// Outcome of a non-blocking delivery attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Delivered,
    /// Mailbox at capacity: slow consumer
    Full,
    /// Pump already gone
    Closed,
}

/// Dispatcher-side half of a connected stream.
///
/// Holds the mailbox sender and the cancel signal. Dropping it closes the
/// mailbox; [`Subscriber::close`] additionally fires the cancel signal so a
/// pump blocked on a write gives up.
#[derive(Debug)]
pub struct Subscriber {
    id: SubscriberId,
    sender: mpsc::Sender<Arc<HubEvent>>,
    cancel: Option<oneshot::Sender<()>>,
    created_at: DateTime<Utc>,
}

/// Pump-side half: receives events and the cancel signal
#[derive(Debug)]
pub struct Mailbox {
    receiver: mpsc::Receiver<Arc<HubEvent>>,
    cancel: Option<oneshot::Receiver<()>>,
}

impl Subscriber {
    pub fn new(id: SubscriberId, capacity: usize) -> (Self, Mailbox) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        let (cancel_tx, cancel_rx) = oneshot::channel();

        let subscriber = Self {
            id,
            sender,
            cancel: Some(cancel_tx),
            created_at: Utc::now(),
        };
        let mailbox = Mailbox {
            receiver,
            cancel: Some(cancel_rx),
        };

        (subscriber, mailbox)
    }

    pub fn id(&self) -> &SubscriberId {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Enqueue without waiting
    pub fn try_deliver(&self, event: &Arc<HubEvent>) -> Delivery {
        match self.sender.try_send(Arc::clone(event)) {
            Ok(()) => Delivery::Delivered,
            Err(TrySendError::Full(_)) => Delivery::Full,
            Err(TrySendError::Closed(_)) => Delivery::Closed,
        }
    }

    /// Close the mailbox and signal cancellation. Consumes the subscriber,
    /// so it runs at most once.
    pub fn close(mut self) {
        if let Some(cancel) = self.cancel.take() {
            let _ = cancel.send(());
        }
    }
}

impl Mailbox {
    /// Next event, or `None` once closed and drained
    pub async fn recv(&mut self) -> Option<Arc<HubEvent>> {
        self.receiver.recv().await
    }

    /// Resolves when the dispatcher has closed this mailbox
    pub async fn cancelled(&mut self) {
        match self.cancel.as_mut() {
            Some(cancel) => {
                let _ = cancel.await;
                self.cancel = None;
            }
            None => std::future::pending::<()>().await,
        }
    }
}
