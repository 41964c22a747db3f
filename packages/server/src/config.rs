//! Server configuration.
//!
//! All values have defaults so the server runs without any flags. The binary
//! fills these in from command-line arguments or `HIROBA_*` environment
//! variables.

use std::time::Duration;

/// Default capacity of each room's inbound queue
pub const DEFAULT_QUEUE_CAPACITY: usize = 16;

/// Default time allowed for a client to send its nickname
pub const DEFAULT_HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(10);

/// Per-room settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomConfig {
    /// Capacity of the inbound queue. `enqueue` waits while the queue is full.
    pub queue_capacity: usize,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

/// What happens to a room once its last member disconnects
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum RoomRetention {
    /// Keep empty rooms for the lifetime of the process
    #[default]
    Retain,
    /// Remove a room from the registry when its last member disconnects
    Reclaim,
}

/// Complete server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host address to bind to (e.g., "127.0.0.1")
    pub host: String,
    /// Port number to bind to (e.g., 8080)
    pub port: u16,
    pub room: RoomConfig,
    pub retention: RoomRetention,
    /// Time allowed between the WebSocket upgrade and the nickname frame
    pub handshake_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            room: RoomConfig::default(),
            retention: RoomRetention::default(),
            handshake_timeout: DEFAULT_HANDSHAKE_TIMEOUT,
        }
    }
}
