pub mod app_state;
pub mod dispatcher;
pub mod drop_warning;
pub mod error;
pub mod event;
pub mod event_hub;
pub mod frame;
pub mod frame_writer;
pub mod heartbeat;
pub mod hub_config;
pub mod hub_stats;
pub mod metrics;
pub mod metrics_timer;
pub mod publisher;
pub mod registry;
pub mod shutdown_coordinator;
pub mod shutdown_guard;
pub mod stream_session;
pub mod subscriber;
pub mod subscriber_id;

pub use app_state::{AppState, StreamQuery, extract_bearer_token, handler};
pub use dispatcher::{Control, Dispatcher};
pub use drop_warning::DropWarning;
pub use error::{HubError, Result, Result as HubResult};
pub use event::{EventKind, HubEvent, MAX_KIND_LENGTH};
pub use event_hub::EventHub;
pub use frame_writer::{ChannelWriter, FrameWriter};
pub use hub_config::HubConfig;
pub use hub_stats::{HubStats, HubStatsSnapshot};
pub use metrics::Metrics;
pub use metrics_timer::MetricsTimer;
pub use publisher::Publisher;
pub use registry::Registry;
pub use shutdown_coordinator::ShutdownCoordinator;
pub use shutdown_guard::ShutdownGuard;
pub use stream_session::{DisconnectReason, StreamSession, open_stream};
pub use subscriber::{Delivery, Mailbox, Subscriber};
pub use subscriber_id::{SubscriberId, SubscriberIdGenerator};

#[cfg(test)]
mod tests;
