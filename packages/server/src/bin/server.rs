//! WebSocket room relay server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hiroba-server
//! cargo run --bin hiroba-server -- --host 0.0.0.0 --port 3000 --retention reclaim
//! ```

use std::{sync::Arc, time::Duration};

use clap::Parser;
use hiroba_server::{
    config::{DEFAULT_QUEUE_CAPACITY, RoomConfig, RoomRetention, ServerConfig},
    infrastructure::repository::InMemoryRoomRegistry,
    ui::Server,
    usecase::{
        ConnectClientUseCase, DisconnectClientUseCase, GetRoomDetailUseCase, GetRoomsUseCase,
        RelayMessagesUseCase,
    },
};
use hiroba_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "hiroba-server")]
#[command(about = "WebSocket room relay server", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "HIROBA_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "HIROBA_PORT", default_value = "8080")]
    port: u16,

    /// Capacity of each room's inbound message queue
    #[arg(
        long,
        env = "HIROBA_QUEUE_CAPACITY",
        default_value_t = DEFAULT_QUEUE_CAPACITY,
        value_parser = parse_queue_capacity
    )]
    queue_capacity: usize,

    /// What to do with a room once its last member leaves (retain | reclaim)
    #[arg(
        long,
        env = "HIROBA_RETENTION",
        value_enum,
        ignore_case = true,
        default_value_t = RoomRetention::Retain
    )]
    retention: RoomRetention,

    /// Seconds a client has to send its nickname after connecting
    #[arg(long, env = "HIROBA_HANDSHAKE_TIMEOUT_SECS", default_value = "10")]
    handshake_timeout_secs: u64,
}

fn parse_queue_capacity(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("queue capacity must be at least 1".to_string()),
        Ok(capacity) => Ok(capacity),
        Err(e) => Err(e.to_string()),
    }
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            room: RoomConfig {
                queue_capacity: args.queue_capacity,
            },
            retention: args.retention,
            handshake_timeout: Duration::from_secs(args.handshake_timeout_secs),
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let config = ServerConfig::from(Args::parse());
    tracing::debug!("Starting with {:?}", config);

    // Initialize dependencies in order:
    // 1. Registry
    // 2. UseCases
    // 3. Server

    // 1. Create Registry (in-memory room directory)
    let registry = Arc::new(InMemoryRoomRegistry::new(config.room));

    // 2. Create UseCases
    let connect_client_usecase = Arc::new(ConnectClientUseCase::new(registry.clone()));
    let relay_messages_usecase = Arc::new(RelayMessagesUseCase::new());
    let disconnect_client_usecase = Arc::new(DisconnectClientUseCase::new(
        registry.clone(),
        config.retention,
    ));
    let get_rooms_usecase = Arc::new(GetRoomsUseCase::new(registry.clone()));
    let get_room_detail_usecase = Arc::new(GetRoomDetailUseCase::new(registry.clone()));

    // 3. Create and run the server
    let server = Server::new(
        connect_client_usecase,
        relay_messages_usecase,
        disconnect_client_usecase,
        get_rooms_usecase,
        get_room_detail_usecase,
        config.handshake_timeout,
    );
    if let Err(e) = server.run(config.host, config.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
