use crate::{ConfigError, ConfigErrorResult, ConfigSection};

use serde::Deserialize;

// Mailbox capacity constraints (events buffered per subscriber)
pub const MIN_MAILBOX_CAPACITY: usize = 1;
pub const MAX_MAILBOX_CAPACITY: usize = 10_000;
pub const DEFAULT_MAILBOX_CAPACITY: usize = 10;

// Broadcast inbox capacity constraints (events buffered ahead of the dispatcher)
pub const MIN_BROADCAST_CAPACITY: usize = 1;
pub const MAX_BROADCAST_CAPACITY: usize = 100_000;
pub const DEFAULT_BROADCAST_CAPACITY: usize = 100;

// Heartbeat interval constraints (seconds)
pub const MIN_HEARTBEAT_INTERVAL_SECS: u64 = 1;
pub const MAX_HEARTBEAT_INTERVAL_SECS: u64 = 300;
pub const DEFAULT_HEARTBEAT_INTERVAL_SECS: u64 = 30;

pub const MAX_ID_PREFIX_LENGTH: usize = 32;
pub const DEFAULT_ID_PREFIX: &str = "client_";

/// Live event stream settings.
/// All values validated to be within reasonable operational ranges.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EventStreamConfig {
    /// Events buffered per subscriber before it is evicted as a slow consumer
    pub mailbox_capacity: usize,
    /// Events buffered ahead of the dispatcher before publishes are dropped
    pub broadcast_capacity: usize,
    /// Ping period in seconds
    pub heartbeat_interval_secs: u64,
    /// Prefix of generated subscriber ids
    pub id_prefix: String,
}

impl Default for EventStreamConfig {
    fn default() -> Self {
        Self {
            mailbox_capacity: DEFAULT_MAILBOX_CAPACITY,
            broadcast_capacity: DEFAULT_BROADCAST_CAPACITY,
            heartbeat_interval_secs: DEFAULT_HEARTBEAT_INTERVAL_SECS,
            id_prefix: String::from(DEFAULT_ID_PREFIX),
        }
    }
}

impl EventStreamConfig {
    /// Validate all fields are within acceptable ranges.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.mailbox_capacity < MIN_MAILBOX_CAPACITY
            || self.mailbox_capacity > MAX_MAILBOX_CAPACITY
        {
            return Err(ConfigError::invalid(ConfigSection::EventStream, format!(
                "event_stream.mailbox_capacity must be {}-{}, got {}",
                MIN_MAILBOX_CAPACITY, MAX_MAILBOX_CAPACITY, self.mailbox_capacity
            )));
        }

        if self.broadcast_capacity < MIN_BROADCAST_CAPACITY
            || self.broadcast_capacity > MAX_BROADCAST_CAPACITY
        {
            return Err(ConfigError::invalid(ConfigSection::EventStream, format!(
                "event_stream.broadcast_capacity must be {}-{}, got {}",
                MIN_BROADCAST_CAPACITY, MAX_BROADCAST_CAPACITY, self.broadcast_capacity
            )));
        }

        if self.heartbeat_interval_secs < MIN_HEARTBEAT_INTERVAL_SECS
            || self.heartbeat_interval_secs > MAX_HEARTBEAT_INTERVAL_SECS
        {
            return Err(ConfigError::invalid(ConfigSection::EventStream, format!(
                "event_stream.heartbeat_interval_secs must be {}-{}, got {}",
                MIN_HEARTBEAT_INTERVAL_SECS, MAX_HEARTBEAT_INTERVAL_SECS, self.heartbeat_interval_secs
            )));
        }

        if self.id_prefix.is_empty() || self.id_prefix.len() > MAX_ID_PREFIX_LENGTH {
            return Err(ConfigError::invalid(ConfigSection::EventStream, format!(
                "event_stream.id_prefix must be 1-{} characters, got {}",
                MAX_ID_PREFIX_LENGTH,
                self.id_prefix.len()
            )));
        }

        if !self
            .id_prefix
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(ConfigError::invalid(ConfigSection::EventStream, format!(
                "event_stream.id_prefix may only contain [A-Za-z0-9_-], got '{}'",
                self.id_prefix
            )));
        }

        Ok(())
    }
}
