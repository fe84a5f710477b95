//! Server configuration.

use crate::domain::{DEFAULT_PARTICIPANT_CAPACITY, DimensionLimits};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_SUBSCRIBER_QUEUE_CAPACITY: usize = 256;
pub const DEFAULT_MAX_RECENT_MESSAGES: usize = 200;

/// Runtime settings shared by the use cases and the UI layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Accepted range for canvas width and height
    pub dimension_limits: DimensionLimits,
    /// Events buffered per subscriber before it is dropped
    pub subscriber_queue_capacity: usize,
    pub max_participants: usize,
    /// Upper bound for `limit` on recent message queries
    pub max_recent_messages: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            dimension_limits: DimensionLimits::default(),
            subscriber_queue_capacity: DEFAULT_SUBSCRIBER_QUEUE_CAPACITY,
            max_participants: DEFAULT_PARTICIPANT_CAPACITY,
            max_recent_messages: DEFAULT_MAX_RECENT_MESSAGES,
        }
    }
}

impl ServerConfig {
    /// Capacity of a new subscriber queue; at least one event
    pub fn queue_capacity(&self) -> usize {
        self.subscriber_queue_capacity.max(1)
    }
}
